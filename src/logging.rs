// File: ./src/logging.rs
// Terminal + file logging via simplelog.
use crate::context::AppContext;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::OpenOptions;

/// Terminal level for a `-v` count: warnings by default, then info, then debug.
pub fn terminal_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Installs the global logger. Failures are reported on stderr and otherwise
/// ignored; the scrape runs the same without logs.
pub fn init(ctx: &dyn AppContext, verbosity: u8) {
    let config = ConfigBuilder::new()
        // hyper and rustls are chatty at debug
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("rustls")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level(verbosity),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = ctx.get_log_file_path() {
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, file)),
            Err(e) => eprintln!("Could not open log file {}: {}", path.display(), e),
        }
    }

    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Logger already initialised: {}", e);
    }
}
