//! CRO Backlog Generator
//!
//! Command-line front end: analyzes one landing page screenshot and writes
//! the scored idea backlog as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use cro_backlog::analysis::export;
use cro_backlog::{Analyzer, AnalyzerConfig, config, log, paths};

#[derive(Parser, Debug)]
#[command(name = "cro-backlog", version, about = "Generate a CRO idea backlog from a landing page screenshot")]
struct Args {
    /// Screenshot to analyze (PNG, JPEG, WebP, ...)
    image: PathBuf,

    /// Write the JSON result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (defaults to config.json next to the executable, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the vision model and use the heuristic tiers only
    #[arg(long)]
    offline: bool,

    /// Number of top ideas to log
    #[arg(long, default_value_t = 5)]
    top: usize,
}

fn main() -> Result<()> {
    // Log panics to the log file as well as stderr
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|l| format!(" at {}:{}", l.file(), l.line()))
            .unwrap_or_default();
        log(&format!("PANIC: {}{}", msg, location));
    }));

    let args = Args::parse();

    if let Err(e) = paths::ensure_directories() {
        eprintln!("Failed to create logs directory: {}", e);
    }
    log("CRO backlog generator starting");

    config::load_env(None);
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::load(path),
        None => AnalyzerConfig::load_default(),
    };
    if args.offline {
        log("Offline mode: model assistance disabled");
        config.model.enabled = false;
    }

    let analyzer = Analyzer::from_config(&config);
    let result = analyzer.analyze_or_fallback_path(&args.image);

    if let Some(error) = &result.metadata.error {
        log(&format!("Returned fallback backlog: {}", error));
    }

    for (rank, item) in result.ideas.iter().take(args.top).enumerate() {
        log(&format!(
            "#{} [{}] {} (ICE {:.2}, {:?}, {})",
            rank + 1,
            item.id,
            item.idea.title,
            item.ice.score,
            item.ice.priority,
            item.estimated_lift
        ));
    }

    match &args.output {
        Some(path) => {
            export::export_to_json(&result, path)?;
            log(&format!("Backlog saved: {}", path.display()));
        }
        None => {
            let json = export::to_pretty_json(&result).context("Failed to render backlog")?;
            println!("{}", json);
        }
    }

    Ok(())
}
