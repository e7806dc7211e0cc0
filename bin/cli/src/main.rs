// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{io, process::ExitCode};

use clap::Parser;
use recframe_arena::ArenaConfig;
use recframe_core::{FrameFormat, IntoDiagnostic};
use recframe_native::SummaryConfig;
use tracing::debug;

use crate::args::{Args, Command};

mod args;
mod command;

fn main() -> ExitCode {
	let args = Args::parse();

	setup_tracing(args.verbose);

	match run(args.command) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("{}", err.into_diagnostic());
			ExitCode::FAILURE
		}
	}
}

fn run(command: Command) -> command::Result<()> {
	let mut out = io::stdout().lock();

	match command {
		Command::Frames {
			records,
			no_terminator,
			hex,
			max_region_bytes,
		} => {
			let records = if records.is_empty() {
				command::default_records()
			} else {
				records
			};
			let format = if no_terminator {
				FrameFormat::without_terminator()
			} else {
				FrameFormat::new()
			};
			let config = match max_region_bytes {
				Some(bytes) => ArenaConfig::new().max_region_bytes(bytes),
				None => ArenaConfig::new(),
			};
			debug!(records = records.len(), ?format, "running frames");
			command::frames(&mut out, &records, format, hex, config)
		}

		Command::Indexed {
			names,
			capacity,
		} => {
			let names = if names.is_empty() {
				command::default_records().into_iter().map(|record| record.name).collect()
			} else {
				names
			};
			command::indexed(&mut out, &names, capacity)
		}

		Command::Summarize {
			dir,
			sample_limit,
			skip_hidden,
		} => {
			let mut config = SummaryConfig::new().include_hidden(!skip_hidden);
			if let Some(limit) = sample_limit {
				config = config.sample_content_limit(limit);
			}
			match dir {
				Some(dir) => command::summarize(&mut out, &dir, &config),
				None => command::summarize_interactive(io::stdin().lock(), &mut out, &config),
			}
		}

		Command::Hello => command::hello(&mut out),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("recframe=trace,info")
		} else {
			EnvFilter::new("recframe=info,warn")
		}
	});

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true).init();
}
