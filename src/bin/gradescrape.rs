use anyhow::Result;
use clap::Parser;
use gradescrape::app;
use gradescrape::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    app::run(Cli::parse()).await
}
