// File: ./src/app.rs
//! The `gradescrape` run: credentials, login, course discovery, retrieval,
//! listing.
use crate::account::AccountFile;
use crate::cli::{Cli, RunSettings};
use crate::client::{
    Credentials, DocumentSource, GradescopeClient, LoginOutcome, Retrieval, retrieve_assignments,
};
use crate::config::Config;
use crate::context::{AppContext, StandardContext};
use crate::extract::Extractor;
use crate::filter::{strip_to_most_recent_term, upcoming_assignments};
use crate::model::Course;
use crate::{logging, report};
use anyhow::{Context, Result, bail};
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub async fn run(cli: Cli) -> Result<()> {
    let ctx = StandardContext::new(cli.root.clone());
    logging::init(&ctx, cli.verbose);

    let config = Config::load_or_default(&ctx)
        .with_context(|| format!("Loading {}", Config::get_path_string(&ctx).unwrap_or_default()))?;
    let settings = cli.settings(&config);
    let (start, end) = settings.window(Local::now().naive_local())?;

    let (credentials, account_path) = resolve_credentials(&cli, &config, &ctx)?;
    if cli.remember_me {
        AccountFile::from(&credentials).save(&account_path)?;
    }

    eprintln!("📶 Retrieving assignments from courses...");
    let client = GradescopeClient::from_config(&config)?;
    let dashboard = match client.login(&credentials).await? {
        LoginOutcome::LoggedIn { dashboard } => dashboard,
        LoginOutcome::Rejected => bail!("Login failed for {}", credentials.email),
    };
    if config.save_if_missing(&ctx)? {
        log::info!("Wrote default config to {}", Config::get_path_string(&ctx)?);
    }

    let extractor = Extractor::new(client.base_url());
    let retrieval = retrieve_courses(&client, &extractor, &dashboard, &settings).await?;
    for failure in &retrieval.failures {
        eprintln!(
            "Could not read {} ({}): {:#}",
            failure.course.short_name, failure.course.name, failure.error
        );
    }

    let upcoming = upcoming_assignments(&retrieval.courses, start, end, settings.unsubmitted_only);
    if cli.json {
        println!("{}", report::render_json(&upcoming)?);
    } else {
        print!("{}", report::render_table(settings.days_forward, start, end, &upcoming));
    }
    Ok(())
}

/// Courses from a logged-in dashboard, narrowed per `settings`, with their
/// assignments filled in.
pub async fn retrieve_courses<S: DocumentSource>(
    source: &S,
    extractor: &Extractor,
    dashboard: &str,
    settings: &RunSettings,
) -> Result<Retrieval> {
    let mut courses: Vec<Course> = extractor
        .extract_courses_str(dashboard)
        .context("Could not read the course list from the dashboard")?;
    log::info!("Found {} course(s) on the dashboard", courses.len());

    // An account without courses has no most recent term.
    if settings.recent_only && !courses.is_empty() {
        courses = strip_to_most_recent_term(courses)?;
    }
    Ok(retrieve_assignments(source, extractor, courses, settings.strategy).await)
}

/// Credentials from `--account`, else the account file, prompting for
/// whatever is missing. Also returns the account file path used for
/// `--remember-me`.
pub fn resolve_credentials(
    cli: &Cli,
    config: &Config,
    ctx: &dyn AppContext,
) -> Result<(Credentials, PathBuf)> {
    let account_path = match &cli.file {
        Some(path) => path.clone(),
        None => AccountFile::default_path(ctx)?,
    };

    if let Some((email, password)) = cli.account_pair() {
        return Ok((Credentials::new(email, password), account_path));
    }

    let stored = match AccountFile::load(&account_path) {
        Ok(stored) => stored.unwrap_or_default(),
        Err(e) if cli.file.is_some() => return Err(e),
        Err(e) => {
            log::warn!("Ignoring unreadable account file: {:#}", e);
            AccountFile::default()
        }
    };
    if let Some(credentials) = stored.credentials() {
        return Ok((credentials, account_path));
    }

    let email = match stored.email.or_else(|| config.email.clone()) {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = rpassword::prompt_password(format!("Password for {}: ", email))
        .context("Failed to read password")?;
    Ok((Credentials::new(email, password), account_path))
}

fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim().to_string();
    if line.is_empty() {
        bail!("No email given");
    }
    Ok(line)
}
