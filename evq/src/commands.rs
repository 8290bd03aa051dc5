//! CLI command implementations.

use std::path::PathBuf;

use evlog::{parse_path, Config, Error, Event, EventQuery, SortOrder};

/// Raw query parameters, validated by [`EventQuery::from_params`].
pub struct QueryParams<'a> {
    pub user_id: Option<&'a str>,
    pub event_type: Option<&'a str>,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
}

/// Pick the log file: explicit path, otherwise the configured one.
fn log_path(config: &Config, file: Option<&str>) -> PathBuf {
    let path = file.map(PathBuf::from).unwrap_or_else(|| config.log_path());
    tracing::debug!(path = %path.display(), "using event log");
    path
}

/// Write config.toml under EVLOG_ROOT.
pub fn init(log_file: Option<&str>, force: bool) -> evlog::Result<()> {
    let mut config = Config::load()?;

    if config.config_path().exists() && !force {
        println!("evlog already initialized at {}", config.root.display());
        println!("Use --force to overwrite the config file");
        return Ok(());
    }

    if let Some(log_file) = log_file {
        config.log_file = PathBuf::from(log_file);
    }

    config.save()?;
    println!("evlog initialized at {}", config.root.display());
    println!("Log file: {}", config.log_path().display());
    println!("Order: {}", config.order);

    Ok(())
}

/// Filter and sort events from the log, printing them to stdout.
pub fn query(
    file: Option<&str>,
    params: QueryParams<'_>,
    order: Option<&str>,
    limit: Option<usize>,
    format: &str,
) -> evlog::Result<()> {
    let config = Config::load()?;

    // Reject bad parameters before touching the log
    let order = match order {
        Some(o) => o.parse::<SortOrder>()?,
        None => config.order,
    };
    let query = EventQuery::from_params(params.user_id, params.event_type, params.from, params.to)?
        .with_order(order)
        .with_limit(limit.or(config.limit));

    let path = log_path(&config, file);
    let log = parse_path(&path)?;
    let selected = query.apply(&log);
    print!("{}", render_events(&selected, format)?);

    Ok(())
}

/// Render selected events as a pretty JSON array or as their source lines.
/// The output ends with a newline unless there are no lines to print.
fn render_events(selected: &[&Event], format: &str) -> evlog::Result<String> {
    match format {
        "lines" => Ok(selected
            .iter()
            .map(|event| format!("{}\n", event.original_line))
            .collect()),
        "json" => Ok(serde_json::to_string_pretty(selected)? + "\n"),
        other => Err(Error::Config(format!(
            "Unknown output format '{}', expected json or lines",
            other
        ))),
    }
}

/// Parse the whole log and report the number of events.
pub fn check(file: Option<&str>) -> evlog::Result<()> {
    let config = Config::load()?;
    let path = log_path(&config, file);

    let log = parse_path(&path)?;
    println!("{}: {} events", path.display(), log.len());

    Ok(())
}
