use std::io::{self, Write};
use std::path::{Path, PathBuf};

use argbind_config::SchemaFile;
use argbind_core::{
    ParseMode, ParsedValues, Schema, parse_values, write_short_usage, write_usage, write_values,
};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ARGBIND_LOG";

/// Output format for parsed values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Table,
}

#[derive(Debug, Parser)]
#[command(name = "argbind")]
#[command(about = "Parse command-line tokens against a declarative schema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens against a schema file and print the resulting values.
    Parse(ParseArgs),
    /// Print usage text for a schema file.
    Usage(UsageArgs),
    /// Validate one or more schema files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema file (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Force fused mode regardless of the schema file.
    #[arg(long)]
    fused: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Tokens to parse; pass them after `--`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Schema file (YAML, or JSON with a .json extension).
    #[arg(long)]
    schema: PathBuf,
    /// Print the one-line synopsis only.
    #[arg(long)]
    short: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to check.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Usage(args) => run_usage(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_schema(path: &Path) -> Result<(SchemaFile, Schema), String> {
    let file = SchemaFile::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    let schema = file
        .to_schema()
        .map_err(|err| format!("Invalid schema '{}': {err}", path.display()))?;
    Ok((file, schema))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let (file, schema) = load_schema(&args.schema)?;
    let mode = if args.fused { ParseMode::Fused } else { file.mode };
    debug!(schema = %file.name, ?mode, tokens = args.tokens.len(), "Parsing tokens");

    let values = parse_values(&schema, &args.tokens, mode).map_err(|err| err.to_string())?;
    print_values(&schema, &values, args.format)
}

fn print_values(
    schema: &Schema,
    values: &ParsedValues,
    format: CliOutputFormat,
) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(values)
            .map_err(|err| format!("Failed to serialize values: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(values)
            .map_err(|err| format!("Failed to serialize values: {err}"))?,
        CliOutputFormat::Table => {
            let mut buf = Vec::new();
            write_values(&mut buf, schema, values)
                .map_err(|err| format!("Failed to render values: {err}"))?;
            String::from_utf8_lossy(&buf).into_owned()
        }
    };

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", rendered.trim_end())
        .and_then(|()| writeln!(stdout))
        .map_err(|err| format!("Failed to write output: {err}"))
}

fn run_usage(args: UsageArgs) -> Result<(), String> {
    let (file, schema) = load_schema(&args.schema)?;
    let mut stdout = io::stdout().lock();

    let written = if args.short {
        write!(stdout, "{} ", file.name).and_then(|()| write_short_usage(&mut stdout, &schema))
    } else {
        let header = match &file.description {
            Some(description) => format!("{}: {description}\n", file.name),
            None => format!("{}\n", file.name),
        };
        stdout
            .write_all(header.as_bytes())
            .and_then(|()| write_usage(&mut stdout, &schema))
    };
    written.map_err(|err| format!("Failed to write usage: {err}"))
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    for path in &args.inputs {
        let (file, schema) = load_schema(path)?;
        debug!(
            path = %path.display(),
            fields = schema.fields().len(),
            flags = schema.flag_count(),
            "Validated schema"
        );
        println!("{}: ok ({} field(s))", file.name, schema.fields().len());
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(())
}
