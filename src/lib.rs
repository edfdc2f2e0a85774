// Crate root library declaration and module exports.
pub mod account;
pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod filter;
pub mod logging;
pub mod model;
pub mod report;
pub mod storage;

pub use crate::error::{Result, ScrapeError};
pub use crate::extract::Extractor;
pub use crate::model::{Assignment, Course, Season, Term};
