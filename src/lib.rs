pub mod ambiguity;
pub mod cli;
pub mod commands;
pub mod config;
pub mod coverage;
pub mod error;
pub mod export;
pub mod metrics;
pub mod plot;
pub mod primers;
pub mod sources;
pub mod types;
pub mod utils;

pub use error::{QcError, Result};
