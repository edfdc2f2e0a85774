// File: ./src/cli.rs
//! Command-line arguments of the `gradescrape` binary.
use crate::config::Config;
use crate::client::FetchStrategy;
use anyhow::{Result, anyhow};
use chrono::{Duration, NaiveDateTime};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Upper bound for `--days-forward`; ten years.
pub const MAX_DAYS_FORWARD: u32 = 3650;

#[derive(Parser, Debug, Default)]
#[command(name = "gradescrape")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List upcoming Gradescope assignments across your courses")]
pub struct Cli {
    /// How many days ahead to look (default from config, 7)
    #[arg(
        short = 'd',
        long = "days-forward",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(0..=MAX_DAYS_FORWARD as i64)
    )]
    pub days_forward: Option<u32>,

    /// Account file with {"email": ..., "password": ...}
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "account")]
    pub file: Option<PathBuf>,

    /// Log in with these credentials instead of the account file
    #[arg(long = "account", num_args = 2, value_names = ["EMAIL", "PASSWORD"])]
    pub account: Option<Vec<String>>,

    /// Save the credentials used to the account file
    #[arg(long = "remember-me")]
    pub remember_me: bool,

    /// Only list assignments that have not been submitted
    #[arg(long = "unsubmitted")]
    pub unsubmitted: bool,

    /// Include courses from every term, not only the most recent one
    #[arg(long = "all-terms")]
    pub all_terms: bool,

    /// Fetch course pages one at a time
    #[arg(long = "sequential")]
    pub sequential: bool,

    /// Print the assignments as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// More terminal logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Use a different directory for config and data
    #[arg(short = 'r', long = "root", value_name = "PATH")]
    pub root: Option<PathBuf>,
}

/// Settings for one run: config values with CLI flags applied on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub days_forward: u32,
    pub unsubmitted_only: bool,
    pub recent_only: bool,
    pub strategy: FetchStrategy,
}

impl Cli {
    pub fn account_pair(&self) -> Option<(&str, &str)> {
        match self.account.as_deref() {
            Some([email, password]) => Some((email.as_str(), password.as_str())),
            _ => None,
        }
    }

    pub fn settings(&self, config: &Config) -> RunSettings {
        RunSettings {
            days_forward: self.days_forward.unwrap_or(config.days_forward),
            unsubmitted_only: self.unsubmitted || config.unsubmitted_only,
            recent_only: config.recent_only && !self.all_terms,
            strategy: if self.sequential {
                FetchStrategy::Sequential
            } else {
                FetchStrategy::from_limit(config.max_concurrent_fetches)
            },
        }
    }
}

impl RunSettings {
    /// `(now, now + days_forward)`. A window reaching past the calendar's
    /// range is an error; `days_forward` can come from the config file.
    pub fn window(&self, now: NaiveDateTime) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let end = Duration::try_days(i64::from(self.days_forward))
            .and_then(|span| now.checked_add_signed(span))
            .ok_or_else(|| anyhow!("{} days from {} is out of range", self.days_forward, now))?;
        Ok((now, end))
    }
}
