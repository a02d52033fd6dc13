use std::path::PathBuf;

use anchor_config::{Config, LoadOptions};
use anchor_core::{build_url, strip_fragment, Mode};
use anchor_ops::{existing_fragment, AnchorPolicy, OpsError, PermalinkResolver, StaticResolver};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::json;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut load = LoadOptions::default();
    if let Some(path) = cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load)?;

    match cli.command {
        Command::Sanitize(args) => handle_sanitize(&config, args),
        Command::BuildUrl(args) => handle_build_url(&config, args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

#[derive(Parser)]
#[command(
    name = "anchor-link",
    about = "Sanitize anchor fragments and build dynamic URLs",
    version
)]
struct Cli {
    /// Path to a config file overriding the discovered layers
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sanitize a raw anchor string into a safe token
    Sanitize(SanitizeArgs),
    /// Build the final URL for an anchor and base
    BuildUrl(BuildUrlArgs),
    /// Show the base and fragment parts of a URL
    Inspect(InspectArgs),
}

#[derive(Args)]
struct SanitizeArgs {
    /// Raw anchor text as typed by an editor
    #[arg(allow_hyphen_values = true)]
    input: String,

    /// Use the CSS-identifier-safe mode (guards against a leading digit)
    #[arg(long)]
    identifier: bool,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct BuildUrlArgs {
    /// Original URL of the link (may already carry a fragment)
    #[arg(long)]
    url: String,

    /// Raw anchor text; sanitized before use
    #[arg(long, allow_hyphen_values = true)]
    anchor: Option<String>,

    /// Target id resolved through the configured permalink table
    #[arg(long)]
    target: Option<String>,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InspectArgs {
    /// URL to split into base and fragment
    url: String,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn handle_sanitize(config: &Config, args: SanitizeArgs) -> Result<i32> {
    let mode = if args.identifier {
        Mode::Identifier
    } else {
        Mode::Anchor
    };
    let policy = AnchorPolicy::from_config(mode, config);

    match policy.apply(&args.input) {
        Some(token) => {
            if args.json {
                println!("{}", json!({ "token": token }));
            } else {
                println!("{token}");
            }
            Ok(0)
        }
        None => {
            if args.json {
                println!("{}", json!({ "token": null }));
            }
            Ok(1)
        }
    }
}

fn handle_build_url(config: &Config, args: BuildUrlArgs) -> Result<i32> {
    let resolved = match args.target.as_deref() {
        Some(target) => {
            let resolver = StaticResolver::from_config(config);
            match resolver.resolve(target) {
                Some(url) => Some(url),
                None => {
                    let err = OpsError::UnknownTarget(target.to_string());
                    eprintln!("anchor-link: {err}");
                    return Ok(2);
                }
            }
        }
        None => None,
    };

    let policy = AnchorPolicy::from_config(Mode::Anchor, config);
    let token = args.anchor.as_deref().and_then(|raw| policy.apply(raw));
    let url = build_url(token.as_deref(), &args.url, resolved.as_deref());

    if args.json {
        println!("{}", json!({ "url": url, "token": token }));
    } else {
        println!("{url}");
    }
    Ok(0)
}

fn handle_inspect(args: InspectArgs) -> Result<i32> {
    let base = strip_fragment(&args.url);
    let fragment = existing_fragment(&args.url);

    if args.json {
        println!("{}", json!({ "base": base, "fragment": fragment }));
    } else {
        println!("base: {base}");
        match &fragment {
            Some(fragment) => println!("fragment: {fragment}"),
            None => println!("fragment: (none)"),
        }
    }
    Ok(0)
}
