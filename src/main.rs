//! isupport-check - Straylight ISUPPORT checker
//!
//! Replays captured `RPL_ISUPPORT` lines into a capability store and prints
//! the normalised advertisement.
//!
//! Usage: `isupport-check [CONFIG [TOKENS]]`. Without CONFIG the defaults
//! apply; without TOKENS (or with `-`) lines are read from stdin.

mod config;
mod input;
mod telemetry;

use anyhow::Context;
use crate::config::Config;
use crate::telemetry::spans;
use slirc_isupport::advert::{ApplyReport, apply_params};
use slirc_isupport::{IsupportBuilder, ServerCapabilities};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::{error, info};

/// Servers send at most 13 tokens per 005 reply.
const MAX_TOKENS_PER_LINE: usize = 13;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);

    // Load configuration
    let config = match args.next() {
        Some(path) => Config::load(&path)
            .map_err(|e| anyhow::anyhow!("failed to load config {}: {}", path, e))?,
        None => Config::default(),
    };
    if let Err(errors) = config::validate(&config) {
        for e in &errors {
            eprintln!("config error: {}", e);
        }
        anyhow::bail!("invalid configuration ({} error(s))", errors.len());
    }

    telemetry::init(&config.log);

    let (source, lines) = match args.next().as_deref() {
        None | Some("-") => ("stdin".to_string(), input::read_lines(io::stdin().lock())?),
        Some(path) => (
            path.to_string(),
            input::read_lines(BufReader::new(
                File::open(path).with_context(|| format!("failed to open {}", path))?,
            ))?,
        ),
    };
    info!(source = %source, lines = lines.len(), "Applying advertisement");

    let mut caps = ServerCapabilities::new();
    let mut report = ApplyReport::default();
    for line in &lines {
        let _span = spans::advertisement(&source, line.number).entered();
        match apply_params(&mut caps, &line.params(), &config.policy) {
            Ok(r) => report.merge(r),
            Err(e) => {
                error!(kind = e.kind().as_str(), error = %e, "Advertisement rejected by policy");
                return Err(e.into());
            }
        }
    }

    info!(
        accepted = report.accepted.len(),
        rejected = report.rejected.len(),
        reset = report.reset.len(),
        unknown = report.unknown.len(),
        "Advertisement applied"
    );

    for line in IsupportBuilder::from_capabilities(&caps).build_lines(MAX_TOKENS_PER_LINE) {
        println!("{}", line);
    }

    Ok(())
}
