//! CLI entry point for ichise-trigger
//!
//! Provides command-line interface for parsing single trigger strings,
//! listing the triggers of a config file and checking it for errors.

use clap::{Parser, Subcommand};
use colored::*;
use ichise_trigger::config::{
    DiscriminationRule, LoadReport, TriggerLoader, TriggerSection, DEFAULT_SECTION,
};
use ichise_trigger::core::{
    parse_trigger, validator::check_signal_payload, ConflictDetector, Trigger,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ichise-trigger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Path to the Wayfire config file
    #[arg(short, long, default_value = "~/.config/wayfire.ini")]
    config: PathBuf,

    /// Config section holding the triggers
    #[arg(short, long, default_value = DEFAULT_SECTION)]
    section: String,

    /// Tell command and signal triggers apart by `command_`/`signal_` option names
    #[arg(long)]
    legacy_names: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single trigger string
    Parse {
        /// Trigger string, e.g. "(super+KEY_a)->{firefox}"
        trigger: String,

        /// Print the descriptor as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all triggers in the config
    List {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Check the config for malformed triggers and binding conflicts
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse { trigger, json } => parse_one(&trigger, json)?,
        Commands::List { source } => list_triggers(&source)?,
        Commands::Check { source } => check_config(&source)?,
    }

    Ok(())
}

/// Installs the log subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ichise_trigger={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_one(input: &str, json: bool) -> anyhow::Result<()> {
    let trigger = parse_trigger(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trigger)?);
    } else {
        print_trigger(None, &trigger);
    }

    Ok(())
}

fn print_trigger(name: Option<&str>, trigger: &Trigger) {
    if let Some(name) = name {
        println!("{}", name.bold());
    }
    println!("  {:<8} {}", "binding".dimmed(), trigger.binding.cyan().bold());
    println!("  {:<8} {}", "kind".dimmed(), trigger.kind().to_string().magenta());
    if let Some(signal) = &trigger.signal {
        println!("  {:<8} {}", "signal".dimmed(), signal.yellow());
    }
    println!("  {:<8} {}", "payload".dimmed(), trigger.payload.green());
    println!("  {:<8} {}", "mode".dimmed(), trigger.mode);
}

/// Reads and loads the trigger section named by the CLI arguments
fn load(source: &SourceArgs) -> anyhow::Result<(PathBuf, LoadReport)> {
    // Expand tilde in path
    let expanded_path = shellexpand::tilde(
        source
            .config
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    let path = Path::new(expanded_path.as_ref()).to_path_buf();

    let section = TriggerSection::from_file(&path, &source.section)?;

    let rule = if source.legacy_names {
        DiscriminationRule::OptionName
    } else {
        DiscriminationRule::Grammar
    };

    Ok((path, TriggerLoader::with_rule(rule).load(&section)))
}

fn list_triggers(source: &SourceArgs) -> anyhow::Result<()> {
    let (path, report) = load(source)?;

    println!("{}", format!("Triggers from: {}\n", path.display()).bold());

    for entry in &report.entries {
        print_trigger(Some(&entry.name), &entry.trigger);
    }

    println!("\n{} Total: {} triggers", "✓".green(), report.entries.len());
    if !report.is_clean() {
        println!(
            "{} {} option{} skipped (run `check` for details)",
            "⚠".yellow(),
            report.failures.len(),
            if report.failures.len() == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn check_config(source: &SourceArgs) -> anyhow::Result<()> {
    let (path, report) = load(source)?;

    println!("{} Checking config: {}", "→".cyan(), path.display());
    println!("{} Loaded {} triggers\n", "✓".green(), report.entries.len());

    let mut problems = 0;

    for failure in &report.failures {
        problems += 1;
        println!(
            "{} {} (line {}): {}",
            "✗".red().bold(),
            failure.name.yellow(),
            failure.line,
            failure.error
        );
    }

    // Payloads are only decoded when a signal fires, so these never fail the check
    for entry in &report.entries {
        if let Err(e) = check_signal_payload(&entry.trigger) {
            println!("{} {}: {}", "⚠".yellow(), entry.name.yellow(), e);
        }
    }

    let detector: ConflictDetector = report.triggers().cloned().collect();
    for conflict in detector.find_conflicts() {
        problems += 1;
        println!(
            "{} {} is bound {} times:",
            "✗".red().bold(),
            conflict.binding.cyan(),
            conflict.conflicting_triggers.len()
        );
        for (idx, trigger) in conflict.conflicting_triggers.iter().enumerate() {
            println!("  {} {}", format!("{}.", idx + 1).dimmed(), trigger);
        }
    }

    if problems == 0 {
        println!("{} {}", "✓".green().bold(), "No problems detected!".bold());
    } else {
        println!(
            "\n{}",
            format!("⚠ {} problem(s) found", problems).yellow()
        );
        std::process::exit(1);
    }

    Ok(())
}
