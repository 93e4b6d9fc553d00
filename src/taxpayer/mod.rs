pub mod data;
pub mod loader;

pub use data::{FilingStatus, Taxpayer};
pub use loader::{gen_blank_csv, load_taxpayers, load_taxpayers_from_reader};
