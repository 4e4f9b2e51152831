pub mod cli;
pub mod commands;
pub mod composition;
pub mod config;
pub mod error;
pub mod report;
pub mod store;
pub mod uniprot;

pub(crate) mod progress;

pub use error::{Error, Result};
