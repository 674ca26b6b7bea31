//! Personal data CLI.
//!
//! The main entry point for pd-core, handling:
//! - Redaction of `field=value` messages
//! - Password hashing and verification
//! - Logging the users table through the redacting formatter

use clap::{Args, Parser, Subcommand};
use pd_config::{env_lookup, DbConfig, DbOverrides};
use pd_core::exit_codes::ExitCode;
use pd_core::logging::{init_logging, LogConfig, LogFormat};
#[cfg(feature = "mysql")]
use pd_core::rows::log_rows;
use pd_core::source::USERS_TABLE;
use pd_redact::password::DEFAULT_COST;
use pd_redact::{hash_password_with_cost, is_valid, FieldSet, RedactingFormatter, Redactor};
use std::io::{self, BufRead, Write};
use tracing_subscriber::filter::LevelFilter;

/// Personal data tools: PII redaction and password hashing
#[derive(Parser)]
#[command(name = "pd-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Comma separated sensitive field names [default: name,email,phone,ssn,password]
    #[arg(long, global = true, env = "PERSONAL_DATA_PII_FIELDS")]
    fields: Option<String>,

    /// Application name shown in the log line prefix
    #[arg(long, global = true, env = "PERSONAL_DATA_APP_NAME", default_value = RedactingFormatter::DEFAULT_APP_NAME)]
    app_name: String,

    /// Diagnostic log format (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Redact field=value messages given as arguments or read from stdin
    Filter(FilterArgs),

    /// Hash a password with a fresh random salt
    HashPassword(HashArgs),

    /// Check a password against a stored hash (exit 1 on mismatch)
    VerifyPassword(VerifyArgs),

    /// Log every row of the users table through the redacting formatter
    Users(UsersArgs),

    /// Show the resolved database configuration (password masked)
    Config(DbArgs),

    /// Print version information
    Version,
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct FilterArgs {
    /// Replacement for sensitive values
    #[arg(long, default_value = RedactingFormatter::REDACTION)]
    redaction: String,

    /// Segment separator
    #[arg(long, default_value_t = RedactingFormatter::SEPARATOR)]
    separator: char,

    /// Messages to redact; stdin lines are used when none are given
    messages: Vec<String>,
}

#[derive(Args, Debug)]
struct HashArgs {
    /// Password to hash; read from stdin when omitted
    password: Option<String>,

    /// bcrypt cost factor
    #[arg(long, default_value_t = DEFAULT_COST)]
    cost: u32,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Stored hash
    #[arg(long)]
    hash: String,

    /// Password to check; read from stdin when omitted
    password: Option<String>,
}

#[derive(Args, Debug)]
struct DbArgs {
    /// Database user (overrides PERSONAL_DATA_DB_USERNAME)
    #[arg(long)]
    db_user: Option<String>,

    /// Database host (overrides PERSONAL_DATA_DB_HOST)
    #[arg(long)]
    db_host: Option<String>,

    /// Database port (overrides PERSONAL_DATA_DB_PORT)
    #[arg(long)]
    db_port: Option<u16>,

    /// Database name (overrides PERSONAL_DATA_DB_NAME)
    #[arg(long)]
    db_name: Option<String>,
}

impl DbArgs {
    fn overrides(&self) -> DbOverrides {
        DbOverrides {
            username: self.db_user.clone(),
            password: None,
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct UsersArgs {
    #[command(flatten)]
    db: DbArgs,

    /// Table to read
    #[arg(long, default_value = USERS_TABLE)]
    table: String,
}

fn main() {
    let cli = Cli::parse();

    // -q/-v win over PD_LOG and RUST_LOG
    let log_level = if cli.global.quiet {
        Some(LevelFilter::ERROR)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LevelFilter::DEBUG),
            _ => Some(LevelFilter::TRACE),
        }
    };
    let log_config = LogConfig::from_env(log_level, cli.global.log_format);

    // Only `users` feeds the sink; other commands validate --fields themselves
    // against the separator they use.
    let fields = match &cli.command {
        Commands::Users(_) => match parse_fields(&cli.global, RedactingFormatter::SEPARATOR) {
            Ok(fields) => fields,
            Err(code) => std::process::exit(code.as_i32()),
        },
        _ => FieldSet::pii(),
    };
    let formatter = RedactingFormatter::new(fields).with_app_name(cli.global.app_name.clone());
    init_logging(&log_config, formatter);

    let exit_code = match &cli.command {
        Commands::Filter(args) => run_filter(&cli.global, args),
        Commands::HashPassword(args) => run_hash_password(args),
        Commands::VerifyPassword(args) => run_verify_password(args),
        Commands::Users(args) => run_users(args),
        Commands::Config(args) => run_config(args),
        Commands::Version => {
            println!("pd-core {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn parse_fields(global: &GlobalOpts, separator: char) -> Result<FieldSet, ExitCode> {
    match &global.fields {
        None => Ok(FieldSet::pii()),
        Some(list) => FieldSet::parse_list(list, separator).map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::ArgsError
        }),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn run_filter(global: &GlobalOpts, args: &FilterArgs) -> ExitCode {
    let fields = match parse_fields(global, args.separator) {
        Ok(fields) => fields,
        Err(code) => return code,
    };
    let redactor = match Redactor::new(fields, args.redaction.clone(), args.separator) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::ArgsError;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.messages.is_empty() {
        for message in &args.messages {
            if writeln!(out, "{}", redactor.redact(message)).is_err() {
                return ExitCode::IoError;
            }
        }
        return ExitCode::Clean;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error: failed to read stdin: {}", e);
                return ExitCode::IoError;
            }
        };
        if writeln!(out, "{}", redactor.redact(&line)).is_err() {
            return ExitCode::IoError;
        }
    }
    ExitCode::Clean
}

fn run_hash_password(args: &HashArgs) -> ExitCode {
    let password = match password_arg(args.password.as_deref()) {
        Ok(p) => p,
        Err(code) => return code,
    };
    match hash_password_with_cost(&password, args.cost) {
        Ok(hashed) => {
            println!("{}", hashed);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::ArgsError
        }
    }
}

fn run_verify_password(args: &VerifyArgs) -> ExitCode {
    let password = match password_arg(args.password.as_deref()) {
        Ok(p) => p,
        Err(code) => return code,
    };
    if is_valid(&args.hash, &password) {
        println!("valid");
        ExitCode::Clean
    } else {
        println!("invalid");
        ExitCode::Mismatch
    }
}

fn run_users(args: &UsersArgs) -> ExitCode {
    let config = match resolve_db(&args.db) {
        Ok(config) => config,
        Err(code) => return code,
    };

    #[cfg(feature = "mysql")]
    {
        let mut source = match pd_core::source::MySqlSource::connect(&config) {
            Ok(source) => source,
            Err(e) => {
                tracing::error!(error = %e, "database connection failed");
                eprintln!("Error: Unable to connect to the database: {}", e);
                return ExitCode::SourceError;
            }
        };

        match log_rows(&mut source, &args.table, RedactingFormatter::SEPARATOR) {
            Ok(count) => {
                tracing::debug!(rows = count, table = %args.table, "logged rows");
                ExitCode::Clean
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::SourceError
            }
        }
    }

    #[cfg(not(feature = "mysql"))]
    {
        let _ = config;
        eprintln!("Error: pd-core was built without the `mysql` feature");
        ExitCode::ArgsError
    }
}

fn run_config(args: &DbArgs) -> ExitCode {
    let config = match resolve_db(args) {
        Ok(config) => config,
        Err(code) => return code,
    };
    match config.to_json_pretty() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::InternalError
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn resolve_db(args: &DbArgs) -> Result<DbConfig, ExitCode> {
    DbConfig::resolve(&args.overrides(), env_lookup).map_err(|e| {
        tracing::debug!(error = %e, "configuration rejected");
        eprintln!("Error: {}", e);
        ExitCode::from(e)
    })
}

/// Use the argument if present, else the first stdin line without its newline.
fn password_arg(arg: Option<&str>) -> Result<String, ExitCode> {
    if let Some(password) = arg {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => Ok(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(e) => {
            eprintln!("Error: failed to read stdin: {}", e);
            Err(ExitCode::IoError)
        }
    }
}
