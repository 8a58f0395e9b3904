mod debug_report;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use screener::{Quote, RuleStore, Settings, TextBuffer, generate_suggestions_with, parse_verbose, screen, validate_rule};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Stock screener rule engine")]
struct Args {
    /// Path to a TOML settings file.
    #[arg(short, long, value_name = "CONFIG_PATH", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of the human-readable report.
    #[arg(long, global = true)]
    json: bool,

    /// Force ANSI color output.
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Suggest completions for partially typed rule text.
    Suggest {
        /// Rule text typed so far.
        text: String,
        /// Cursor byte offset; defaults to the end of the text.
        #[arg(long)]
        cursor: Option<usize>,
        /// Apply the Nth suggestion (0-based) and print the resulting text.
        #[arg(long, value_name = "N")]
        apply: Option<usize>,
    },
    /// Heuristically check that each line looks like a rule.
    Validate {
        /// Rule lines; read from stdin when omitted.
        lines: Vec<String>,
    },
    /// Parse rules and show tokens, structure and timings.
    Parse {
        /// Rule text; read from stdin when omitted. One rule per line.
        input: Vec<String>,
    },
    /// Filter quotes from a JSON file with rules.
    Screen {
        /// JSON array of flat quote objects.
        #[arg(long, value_name = "QUOTES_PATH")]
        quotes: PathBuf,
        /// Rule lines; read from stdin when omitted.
        rules: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    let options = settings.options();
    let color = if args.no_color { false } else { args.color || io::stdout().is_terminal() };
    debug!(?options, color, "starting");

    match args.command {
        Command::Suggest { text, cursor, apply } => {
            let mut buffer = TextBuffer::new(text);
            if let Some(cursor) = cursor {
                buffer.set_cursor(cursor);
            }
            let suggestions = generate_suggestions_with(buffer.text(), buffer.cursor(), &options);

            if let Some(n) = apply {
                let Some(chosen) = suggestions.get(n) else {
                    bail!("no suggestion #{n} ({} available)", suggestions.len());
                };
                buffer.apply_suggestion(chosen);
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&buffer)?);
                } else {
                    println!("{}", buffer.text());
                }
                return Ok(());
            }

            if args.json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                debug_report::print_suggestions(&buffer, &suggestions, color);
            }
        }
        Command::Validate { lines } => {
            let text = join_or_stdin(lines)?;
            let verdicts: Vec<(&str, bool)> = rule_lines(&text).map(|l| (l, validate_rule(l))).collect();
            if args.json {
                let out: Vec<_> =
                    verdicts.iter().map(|(l, ok)| serde_json::json!({ "text": l, "validated": ok })).collect();
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                debug_report::print_validation(&verdicts, color);
            }
        }
        Command::Parse { input } => {
            let text = join_or_stdin(input)?;
            let results: Vec<_> = rule_lines(&text).map(parse_verbose).collect();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for res in &results {
                    debug_report::print_run(res, color);
                }
            }
        }
        Command::Screen { quotes, rules } => {
            let raw = std::fs::read_to_string(&quotes)
                .with_context(|| format!("failed to read quotes from {}", quotes.display()))?;
            let quotes: Vec<Quote> = serde_json::from_str(&raw).context("quotes must be a JSON array of objects")?;

            let mut store = RuleStore::new();
            store.add_rules(&join_or_stdin(rules)?);
            let hits = screen(store.rules(), &quotes, &options);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                debug_report::print_screen(store.rules(), &hits, quotes.len(), color);
            }
        }
    }

    Ok(())
}

/// Arguments joined by newlines, or all of stdin when there are none.
fn join_or_stdin(args: Vec<String>) -> anyhow::Result<String> {
    let text = if args.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
        buffer
    } else {
        args.join("\n")
    };

    if text.trim().is_empty() {
        bail!("no input provided");
    }
    Ok(text)
}

fn rule_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}
