//! CLI definition and dispatch for the `viewconf` tool.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::domain::config::Config;
use crate::domain::context::ViewContext;
use crate::domain::error::{ConfigError, ErrorChannel};
use crate::domain::value::{parse_literal, Value};

#[derive(Parser, Debug)]
#[command(name = "viewconf", about = "Inspect and edit view configuration files")]
pub struct Cli {
    /// Log debug output and warn about lookups that miss
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a configuration file and report how many entries it holds
    Check { file: PathBuf },
    /// Print a configuration file in canonical form
    Dump { file: PathBuf },
    /// Print a single value
    Get {
        file: PathBuf,
        section: String,
        key: String,
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Set a value from a literal and write the file back
    Set {
        file: PathBuf,
        section: String,
        key: String,
        literal: String,
        /// Start from an empty store if the file does not exist
        #[arg(long)]
        create: bool,
    },
    /// Remove a value and write the file back
    Unset {
        file: PathBuf,
        section: String,
        key: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Color,
    Str,
    Num,
    Bool,
}

const NOT_FOUND: u8 = 4;

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);
    let ctx = ViewContext::new().verbose(cli.verbose);
    match cli.command {
        Command::Check { file } => run_check(&file, &ctx),
        Command::Dump { file } => run_dump(&file, &ctx),
        Command::Get {
            file,
            section,
            key,
            kind,
        } => run_get(&file, &ctx, &section, &key, kind),
        Command::Set {
            file,
            section,
            key,
            literal,
            create,
        } => run_set(&file, &ctx, &section, &key, &literal, create),
        Command::Unset { file, section, key } => run_unset(&file, &ctx, &section, &key),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "viewconf=debug" } else { "viewconf=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fail(err: &ConfigError) -> ExitCode {
    let channel = ErrorChannel::from(err);
    eprintln!("error: {}", channel.get().unwrap_or("unknown failure"));
    ExitCode::from(err)
}

pub fn load_config(path: &Path, ctx: &ViewContext) -> Result<Config, ConfigError> {
    let mut config = Config::with_context(ctx);
    config.load_file(path)?;
    Ok(config)
}

fn run_check(file: &Path, ctx: &ViewContext) -> ExitCode {
    match load_config(file, ctx) {
        Ok(config) => {
            println!(
                "{}: {} entries in {} sections",
                file.display(),
                config.len(),
                config.sections().count()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_dump(file: &Path, ctx: &ViewContext) -> ExitCode {
    let text = load_config(file, ctx).and_then(|config| config.to_str());
    match text {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

/// Format the value at `(section, key)`. With a kind, only a value of that
/// kind matches and text is printed unquoted.
pub fn format_value(
    config: &Config,
    section: &str,
    key: &str,
    kind: Option<KindArg>,
) -> Option<String> {
    match kind {
        None => config.get(section, key).map(Value::to_string),
        Some(KindArg::Color) => config.get_color(section, key).map(|c| c.to_string()),
        Some(KindArg::Str) => config.get_cstr(section, key).map(str::to_string),
        Some(KindArg::Num) => config.get_num(section, key).map(|n| n.to_string()),
        Some(KindArg::Bool) => config.get_bool(section, key).map(|b| b.to_string()),
    }
}

fn run_get(
    file: &Path,
    ctx: &ViewContext,
    section: &str,
    key: &str,
    kind: Option<KindArg>,
) -> ExitCode {
    let config = match load_config(file, ctx) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    match format_value(&config, section, key, kind) {
        Some(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("not found: [{section}] {key}");
            ExitCode::from(NOT_FOUND)
        }
    }
}

/// Apply `literal` at `(section, key)` in the file, creating the store when
/// `create` is set and the file is missing.
pub fn set_in_file(
    file: &Path,
    ctx: &ViewContext,
    section: &str,
    key: &str,
    literal: &str,
    create: bool,
) -> Result<(), ConfigError> {
    let value = parse_literal(literal).map_err(|source| ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        source,
    })?;
    let mut config = match load_config(file, ctx) {
        Ok(config) => config,
        Err(ConfigError::Io { source, .. })
            if create && source.kind() == std::io::ErrorKind::NotFound =>
        {
            Config::with_context(ctx)
        }
        Err(e) => return Err(e),
    };
    config.set(section, key, value);
    config.save_file(file)
}

fn run_set(
    file: &Path,
    ctx: &ViewContext,
    section: &str,
    key: &str,
    literal: &str,
    create: bool,
) -> ExitCode {
    match set_in_file(file, ctx, section, key, literal, create) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", set_error_message(&e, literal));
            ExitCode::from(&e)
        }
    }
}

/// A bad literal is shown with a caret under the failing column.
pub fn set_error_message(err: &ConfigError, literal: &str) -> String {
    match err {
        ConfigError::InvalidValue { source, .. } => source.display_with_context(literal),
        other => ErrorChannel::from(other)
            .get()
            .unwrap_or("unknown failure")
            .to_string(),
    }
}

pub fn unset_in_file(
    file: &Path,
    ctx: &ViewContext,
    section: &str,
    key: &str,
) -> Result<(), ConfigError> {
    let mut config = load_config(file, ctx)?;
    config.unset(section, key);
    config.save_file(file)
}

fn run_unset(file: &Path, ctx: &ViewContext, section: &str, key: &str) -> ExitCode {
    match unset_in_file(file, ctx, section, key) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}
