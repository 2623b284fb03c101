// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ippwerk: inspect captured IPP responses and list the attribute schemas
// of the printer and job records.

mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use ippwerk_core::{CodecConfig, DecodePolicy, Result};
use ippwerk_print::Message;

/// Schema-driven IPP attribute inspector
#[derive(Parser, Debug)]
#[command(name = "ippwerk", version, about = "Decode IPP messages into typed printer records")]
struct Args {
    /// JSON settings file (decode policy, size limit, output style)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode the printer attributes of a binary IPP response
    Dump {
        /// File holding the raw message (e.g. from a packet capture)
        file: PathBuf,

        /// Stop at the first attribute that does not decode
        #[arg(long)]
        fail_fast: bool,
    },
    /// List the attributes the printer, job and request records know
    Schema,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "ippwerk failed");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    match path {
        Some(path) => {
            let config = CodecConfig::load(path)?;
            debug!(path = %path.display(), ?config, "loaded config");
            Ok(config)
        }
        None => Ok(CodecConfig::default()),
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let json = match &args.command {
        Command::Dump { file, fail_fast } => {
            let policy = if *fail_fast { DecodePolicy::FailFast } else { config.policy };
            let data = std::fs::read(file)?;
            info!(file = %file.display(), bytes = data.len(), ?policy, "decoding IPP message");

            let msg = Message::decode_with_limit(&data, config.max_message_bytes)?;
            report::to_json(&report::dump(&msg, policy)?, config.pretty_json)?
        }
        Command::Schema => report::to_json(&report::schemas()?, config.pretty_json)?,
    };

    println!("{json}");
    Ok(())
}
