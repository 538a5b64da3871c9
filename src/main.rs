//! bookstore-queries
//!
//! Connects to MongoDB, runs the bookstore plan step by step, prints each
//! step's result and closes the connection whether or not the plan succeeded.
//!
//! # Usage
//!
//! ```bash
//! bookstore-queries mongodb://localhost:27017 --database plp_bookstore
//! bookstore-queries plan --format json-pretty
//! ```

use bookstore_queries::cli::CliInterface;
use bookstore_queries::error::Result;
use bookstore_queries::executor::{
    ExecutionResult, SessionReporter, Step, book_plan, run_session,
};
use bookstore_queries::{BookstoreError, ConnectionManager, Formatter};

/// Application entry point
///
/// Exits with status 1 when setup fails or the plan stops on an error.
#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or run the plan
///
/// # Returns
/// * `Result<bool>` - Whether the plan ran to completion; a plan failure has
///   already been printed by the time this returns
async fn run() -> Result<bool> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(true);
    }

    cli.print_banner();

    let config = cli.config();
    let mut connection = ConnectionManager::new(config.connection.clone());
    let plan = book_plan(cli.args().explain_verbosity);
    let mut console = ConsoleReporter {
        formatter: Formatter::new(&config.display),
    };

    Ok(run_session(&mut connection, &plan, &mut console).await.is_ok())
}

/// Prints session events to the console
struct ConsoleReporter {
    formatter: Formatter,
}

impl SessionReporter for ConsoleReporter {
    fn connected(&mut self) {
        println!("Connected to MongoDB");
    }

    fn step_completed(&mut self, step: &Step, result: &ExecutionResult) -> Result<()> {
        println!("{}", self.formatter.format_step(&step.label, result)?);
        Ok(())
    }

    fn failed(&mut self, error: &BookstoreError) {
        eprintln!("Error: {}", error);
    }

    fn closed(&mut self) {
        println!("Connection closed");
    }
}

/// Initialize logging; output goes to stderr so results on stdout stay clean
fn initialize_logging(cli: &CliInterface) {
    let logging = &cli.config().logging;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(logging.level.to_tracing_level())
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
