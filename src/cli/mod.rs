//! Command-line interface
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading, with CLI flags layered over the config file
//! - Subcommands (plan, version, config)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, LogLevel, OutputFormat};
use crate::connection::sanitize_uri;
use crate::error::Result;
use crate::executor::{ExplainVerbosity, book_plan};
use crate::formatter::Formatter;

/// Runs the bookstore query plan against a MongoDB collection
#[derive(Parser, Debug)]
#[command(
    name = "bookstore-queries",
    version,
    about = "Run the bookstore CRUD, query, aggregation and indexing plan against MongoDB",
    long_about = "Connects to MongoDB and runs a fixed sequence of operations against the books
collection: filtered reads, a point update and delete, projections, sorting,
pagination, aggregations, index creation and a query plan explanation.
Execution stops at the first failing step."
)]
pub struct CliArgs {
    /// MongoDB connection URI
    ///
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    #[arg(value_name = "URI")]
    pub uri: Option<String>,

    /// Database holding the books collection
    #[arg(long, value_name = "NAME")]
    pub database: Option<String>,

    /// Books collection name
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (shell, json, json-pretty, table, compact)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Server selection and connect timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity of the final explain step
    #[arg(long, value_enum, value_name = "MODE", default_value = "queryPlanner")]
    pub explain_verbosity: ExplainVerbosity,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every step and the command it sends, without connecting
    Plan,

    /// Show version information
    Version,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Effective configuration (file + CLI overrides)
    config: Config,
}

impl CliInterface {
    /// Parse the process arguments and load configuration
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// An unreadable or invalid file falls back to defaults with a warning;
    /// values given on the command line must be valid.
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = match Config::load_from_file(args.config_file.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to load configuration: {}", e);
                eprintln!("Using default configuration instead.");
                Config::default()
            }
        };

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        config.validate()?;

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
        Self::apply_connection_args(config, args);
    }

    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }

        if args.no_color {
            config.display.color_output = false;
        }
    }

    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    fn apply_connection_args(config: &mut Config, args: &CliArgs) {
        if let Some(uri) = &args.uri {
            config.connection.uri = uri.clone();
        }
        if let Some(database) = &args.database {
            config.connection.database = database.clone();
        }
        if let Some(collection) = &args.collection {
            config.connection.collection = collection.clone();
        }
        if let Some(timeout) = args.timeout {
            config.connection.timeout = timeout;
        }
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        match format_str.to_lowercase().as_str() {
            "shell" => OutputFormat::Shell,
            "json" => OutputFormat::Json,
            "json-pretty" | "jsonpretty" => OutputFormat::JsonPretty,
            "table" => OutputFormat::Table,
            "compact" => OutputFormat::Compact,
            _ => {
                eprintln!("Warning: Unknown format '{}', using default", format_str);
                OutputFormat::Shell
            }
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to run the plan
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Plan) => {
                self.print_plan()?;
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Print each step's label and the command document it sends
    fn print_plan(&self) -> Result<()> {
        let formatter = Formatter::new(&self.config.display);
        let collection = &self.config.connection.collection;
        let plan = book_plan(self.args.explain_verbosity);

        println!(
            "Plan for {}.{} ({} steps)",
            self.config.connection.database,
            collection,
            plan.len()
        );

        for (index, step) in plan.iter().enumerate() {
            println!();
            println!("[{}/{}] {}", index + 1, plan.len(), step.label);
            println!("{}", formatter.format_command(&step.operation.to_command(collection))?);
        }

        Ok(())
    }

    fn show_version(&self) {
        println!("bookstore-queries version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file and report the outcome
    fn validate_config_file(&self) {
        let path = self.config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist, defaults apply");
            return;
        }

        match Config::from_file(&path) {
            Ok(config) => match config.validate() {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        println!("Configuration file: {}", self.config_path().display());
        println!();
        println!("{}", self.config.to_toml_string()?);
        Ok(())
    }

    /// Configuration file path (from args or default)
    fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print the target before connecting
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!(
                "Connecting to: {} ({}.{})",
                sanitize_uri(&self.config.connection.uri),
                self.config.connection.database,
                self.config.connection.collection
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse arguments with a config path that does not exist, so the
    /// user's own config file never leaks into the tests
    fn cli(extra: &[&str]) -> Result<CliInterface> {
        let mut argv = vec!["bookstore-queries", "-c", "/nonexistent/bookstore-queries.toml"];
        argv.extend_from_slice(extra);
        CliInterface::from_args(CliArgs::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(vec!["bookstore-queries"]).unwrap();
        assert!(args.uri.is_none());
        assert!(args.database.is_none());
        assert!(args.command.is_none());
        assert_eq!(args.explain_verbosity, ExplainVerbosity::QueryPlanner);
    }

    #[test]
    fn test_cli_args_with_uri() {
        let args =
            CliArgs::try_parse_from(vec!["bookstore-queries", "mongodb://db.example:27017"])
                .unwrap();
        assert_eq!(args.uri, Some("mongodb://db.example:27017".to_string()));
    }

    #[test]
    fn test_cli_args_subcommands() {
        let args = CliArgs::try_parse_from(vec!["bookstore-queries", "plan"]).unwrap();
        assert!(matches!(args.command, Some(Commands::Plan)));

        let args =
            CliArgs::try_parse_from(vec!["bookstore-queries", "config", "--show"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Config {
                show: true,
                validate: false
            })
        ));
    }

    #[test]
    fn test_explain_verbosity_flag() {
        let args = CliArgs::try_parse_from(vec![
            "bookstore-queries",
            "--explain-verbosity",
            "executionStats",
        ])
        .unwrap();
        assert_eq!(args.explain_verbosity, ExplainVerbosity::ExecutionStats);

        assert!(
            CliArgs::try_parse_from(vec!["bookstore-queries", "--explain-verbosity", "full"])
                .is_err()
        );
    }

    #[test]
    fn test_defaults_without_config_file() {
        let cli = cli(&[]).unwrap();
        let config = cli.config();
        assert_eq!(config.connection.uri, "mongodb://localhost:27017");
        assert_eq!(config.connection.database, "plp_bookstore");
        assert_eq!(config.connection.collection, "books");
        assert_eq!(config.display.format, OutputFormat::Shell);
    }

    #[test]
    fn test_args_override_config() {
        let cli = cli(&[
            "mongodb://db.example:27018",
            "--database",
            "library",
            "--collection",
            "novels",
            "--timeout",
            "5",
            "--format",
            "table",
            "--no-color",
            "--vv",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.connection.uri, "mongodb://db.example:27018");
        assert_eq!(config.connection.database, "library");
        assert_eq!(config.connection.collection, "novels");
        assert_eq!(config.connection.timeout, 5);
        assert_eq!(config.display.format, OutputFormat::Table);
        assert!(!config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Trace);
    }

    #[test]
    fn test_quiet_lowers_log_level() {
        let cli = cli(&["-q"]).unwrap();
        assert_eq!(cli.config().logging.level, LogLevel::Error);
    }

    #[test]
    fn test_invalid_cli_values_are_rejected() {
        assert!(cli(&["http://localhost"]).is_err());
        assert!(cli(&["--database", "bad.name"]).is_err());
        assert!(cli(&["--timeout", "0"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(CliInterface::parse_output_format("JSON"), OutputFormat::Json);
        assert_eq!(
            CliInterface::parse_output_format("json-pretty"),
            OutputFormat::JsonPretty
        );
        assert_eq!(
            CliInterface::parse_output_format("compact"),
            OutputFormat::Compact
        );
        assert_eq!(CliInterface::parse_output_format("xml"), OutputFormat::Shell);
    }

    #[test]
    fn test_subcommand_handled() {
        let version = cli(&["version"]).unwrap();
        assert!(version.handle_subcommand().unwrap());

        let run = cli(&[]).unwrap();
        assert!(!run.handle_subcommand().unwrap());
    }
}
