use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use seqopts_core::{
    GlobalSettings, OptionDescriptor, SubcommandConfig, ToolConfig, apply_global_matches,
    register_global_args, write_global_help,
};
use tracing::{debug, info};

/// Short letters every subcommand keeps for itself.
const RESERVED_SHORTS: &[char] = &['h'];

/// Subcommand names `seqtool` handles itself.
const RESERVED_SUBCOMMANDS: &[&str] = &["config", "usage", "help"];

#[derive(Debug, Parser)]
#[command(name = "seqtool")]
#[command(about = "Sequence toolkit with shared global format options")]
struct Cli {
    /// Path to a YAML subcommand configuration (default: built-in subcommands).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the global options accepted by a subcommand.
    Usage(UsageArgs),
    /// Print the effective subcommand configuration as YAML.
    Config,
    /// Any configured subcommand, e.g. `view -O bam in.sam`.
    #[command(external_subcommand)]
    Run(Vec<String>),
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Subcommand name.
    subcommand: String,
}

/// What a subcommand resolved from its command line.
#[derive(Debug, Serialize)]
struct Resolved<'a> {
    subcommand: &'a str,
    inputs: Vec<&'a str>,
    settings: &'a GlobalSettings,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.parse().unwrap_or_default()),
        )
        .init();

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Command::Usage(args) => run_usage(&config, args),
        Command::Config => run_config(&config),
        Command::Run(args) => run_subcommand(&config, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ToolConfig, String> {
    let config = match path {
        Some(path) => ToolConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ToolConfig::default(),
    };
    config
        .validate(RESERVED_SHORTS, RESERVED_SUBCOMMANDS)
        .map_err(|e| e.to_string())?;
    debug!(subcommands = config.subcommands.len(), "loaded configuration");
    Ok(config)
}

fn find_subcommand<'a>(config: &'a ToolConfig, name: &str) -> Result<&'a SubcommandConfig, String> {
    config.find_subcommand(name).ok_or_else(|| {
        let known: Vec<&str> = config.subcommands.iter().map(|s| s.name.as_str()).collect();
        format!("unknown subcommand '{name}' (expected one of: {})", known.join(", "))
    })
}

fn subcommand_parser(sub: &SubcommandConfig, table: &[OptionDescriptor]) -> clap::Command {
    let cmd = clap::Command::new(sub.name.clone())
        .about(sub.about.clone())
        .arg(
            Arg::new("yaml")
                .long("yaml")
                .action(ArgAction::SetTrue)
                .help("Print the resolved settings as YAML instead of JSON"),
        )
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .action(ArgAction::Append)
                .num_args(0..),
        );
    register_global_args(cmd, table)
}

fn run_usage(config: &ToolConfig, args: UsageArgs) -> Result<(), String> {
    let sub = find_subcommand(config, &args.subcommand)?;
    write_usage(&mut std::io::stdout().lock(), sub)
        .map_err(|err| format!("Failed to write usage: {err}"))
}

fn write_usage(out: &mut impl Write, sub: &SubcommandConfig) -> std::io::Result<()> {
    writeln!(out, "Usage: seqtool {} [options] [INPUT]...", sub.name)?;
    if !sub.about.is_empty() {
        writeln!(out, "\n{}", sub.about)?;
    }
    writeln!(out, "\nOptions:")?;
    writeln!(out, "      --yaml")?;
    writeln!(
        out,
        "               Print the resolved settings as YAML instead of JSON"
    )?;
    write_global_help(out, &sub.short_opts)
}

fn run_config(config: &ToolConfig) -> Result<(), String> {
    let raw = serde_yaml::to_string(config)
        .map_err(|err| format!("Failed to serialize configuration: {err}"))?;
    print!("{raw}");
    Ok(())
}

fn run_subcommand(config: &ToolConfig, args: Vec<String>) -> Result<(), String> {
    let name = args
        .first()
        .ok_or_else(|| "missing subcommand".to_string())?;
    let sub = find_subcommand(config, name)?;
    let table = sub.option_table();

    let matches = subcommand_parser(sub, &table)
        .try_get_matches_from(&args)
        .unwrap_or_else(|err| err.exit());

    let mut settings = GlobalSettings::new();
    apply_global_matches(&matches, &table, &mut settings)
        .map_err(|err| format!("{}: {err}", sub.name))?;

    let inputs: Vec<&str> = matches
        .get_many::<String>("inputs")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    info!(
        subcommand = %sub.name,
        inputs = inputs.len(),
        verbosity = settings.verbosity,
        "resolved global options"
    );

    let resolved = Resolved {
        subcommand: &sub.name,
        inputs,
        settings: &settings,
    };
    let raw = if matches.get_flag("yaml") {
        serde_yaml::to_string(&resolved)
            .map_err(|err| format!("YAML serialization failed: {err}"))?
    } else {
        serde_json::to_string_pretty(&resolved)
            .map_err(|err| format!("JSON serialization failed: {err}"))?
    };
    println!("{}", raw.trim_end());

    settings.release();
    Ok(())
}
