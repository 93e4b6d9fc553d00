//! AWS Lambda handler exposing the tax calculation over HTTP
//!
//! Accepts a POST with a JSON object holding the 15 taxpayer fields and
//! returns the result record for each regime. Malformed payloads and
//! invalid filing-status/dependent combinations both come back as 400.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Serialize;
use taxsim::{calculate, Regime, TaxError, TaxResult, Taxpayer};

#[derive(Debug, Serialize)]
struct CalculationResponse {
    current_law: TaxResult,
    house_2018: TaxResult,
    senate_2018: TaxResult,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(format!(r#"{{"error":"{}"}}"#, message)))
        .unwrap()
}

fn json_response(body: &CalculationResponse) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => return Ok(error_response(400, "Missing request body")),
    };

    let taxpayer: Taxpayer = match serde_json::from_str(&body_str) {
        Ok(t) => t,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    match run_all_regimes(&taxpayer) {
        Ok(response) => Ok(json_response(&response)),
        Err(
            e @ (TaxError::HeadOfHouseholdWithoutDependent | TaxError::SingleWithChildDependent),
        ) => Ok(error_response(400, &e.to_string())),
        Err(e) => Ok(error_response(500, &e.to_string())),
    }
}

fn run_all_regimes(taxpayer: &Taxpayer) -> Result<CalculationResponse, TaxError> {
    let run = |regime: Regime| calculate(regime, &regime.builtin_policy(), taxpayer);
    Ok(CalculationResponse {
        current_law: run(Regime::CurrentLaw)?,
        house_2018: run(Regime::House2018)?,
        senate_2018: run(Regime::Senate2018)?,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
