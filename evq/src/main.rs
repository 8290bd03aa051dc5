//! evq: Event Query - CLI for filtering and sorting user event logs.

use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "evq")]
#[command(about = "Event Query - filter and sort user event logs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file under EVLOG_ROOT
    Init {
        /// Event log path (relative paths resolve against EVLOG_ROOT)
        #[arg(short = 'l', long = "log-file")]
        log_file: Option<String>,

        /// Overwrite an existing config file
        #[arg(long = "force")]
        force: bool,
    },

    /// Query events by user, event type and time range
    #[command(visible_alias = "q")]
    Query {
        /// Event log to read (default: log_file from config)
        #[arg(short = 'f', long = "file")]
        file: Option<String>,

        /// Only events from this user id
        #[arg(short = 'u', long = "user-id", allow_hyphen_values = true)]
        user_id: Option<String>,

        /// Only events of this type (submit_form, click_button, view_page, logout)
        #[arg(short = 'e', long = "event-type")]
        event_type: Option<String>,

        /// Earliest timestamp, inclusive (YYYY-MM-DDTHH:MM:SS)
        #[arg(long = "from")]
        from: Option<String>,

        /// Latest timestamp, inclusive (YYYY-MM-DDTHH:MM:SS)
        #[arg(long = "to")]
        to: Option<String>,

        /// Timestamp order: asc or desc (default: from config)
        #[arg(short = 'o', long = "order", value_parser = ["asc", "desc"])]
        order: Option<String>,

        /// Maximum number of events to print
        #[arg(short = 'n', long = "limit")]
        limit: Option<usize>,

        /// Output format: json, lines
        #[arg(long = "format", default_value = "json", value_parser = ["json", "lines"])]
        format: String,
    },

    /// Parse a log file and report whether it is well-formed
    Check {
        /// Event log to read (default: log_file from config)
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
}

fn main() {
    logging::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { log_file, force } => commands::init(log_file.as_deref(), force),
        Commands::Query { file, user_id, event_type, from, to, order, limit, format } => {
            let params = commands::QueryParams {
                user_id: user_id.as_deref(),
                event_type: event_type.as_deref(),
                from: from.as_deref(),
                to: to.as_deref(),
            };
            commands::query(file.as_deref(), params, order.as_deref(), limit, &format)
        }
        Commands::Check { file } => commands::check(file.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
