pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{CoordinateError, FieldToolsError, Result};
pub use models::Dms;
