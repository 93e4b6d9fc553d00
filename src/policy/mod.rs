pub mod data;
pub mod loader;

pub use data::Policy;
pub use loader::{load_policy, load_policy_from_reader};
