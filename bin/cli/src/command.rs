// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	io::{self, BufRead, Write},
	path::Path,
};

use recframe_arena::{Arena, ArenaConfig};
use recframe_core::{
	Diagnostic, FrameEncoder, FrameError, FrameFormat, IndexedSlot, IntoDiagnostic, Record, encode_indexed, hex_dump,
};
use recframe_native::{ForeignString, NativeError, SummaryConfig, summarize_dir};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
	#[error(transparent)]
	Frame(#[from] FrameError),

	#[error(transparent)]
	Native(#[from] NativeError),

	#[error(transparent)]
	Io(#[from] io::Error),

	#[error("slot {index} cannot be numbered with an i32 id")]
	SlotIdOverflow {
		index: usize,
	},
}

impl IntoDiagnostic for CliError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			CliError::Frame(err) => err.into_diagnostic(),
			CliError::Native(err) => err.into_diagnostic(),
			CliError::Io(err) => Diagnostic {
				code: "IO_001".to_string(),
				message: err.to_string(),
				offset: None,
				label: None,
				help: None,
				notes: vec![],
			},
			CliError::SlotIdOverflow {
				..
			} => Diagnostic {
				code: "CLI_001".to_string(),
				message: self.to_string(),
				offset: None,
				label: None,
				help: Some(format!("pass at most {} names", i32::MAX as u64 + 1)),
				notes: vec![],
			},
		}
	}
}

pub type Result<T> = std::result::Result<T, CliError>;

pub fn default_records() -> Vec<Record> {
	vec![Record::new(1, "C"), Record::new(2, "Java"), Record::new(3, "Go")]
}

pub fn frames(
	out: &mut impl Write,
	records: &[Record],
	format: FrameFormat,
	hex: bool,
	config: ArenaConfig,
) -> Result<()> {
	let encoder = FrameEncoder::new(format);

	Arena::scope(config, |arena| -> Result<()> {
		let encoded = encoder.encode(records, arena)?;
		writeln!(out, "Allocated {} bytes of memory.", encoded.total_bytes())?;

		for (index, frame) in encoded.decoder().frames().enumerate() {
			writeln!(out, "Writing entry {index} at offset {}", frame?.offset)?;
		}

		if hex {
			write!(out, "{}", hex_dump(encoded.as_bytes()))?;
		}

		for record in encoded.decoder() {
			writeln!(out, "{}", record?)?;
		}
		Ok(())
	})
}

pub fn indexed(out: &mut impl Write, names: &[String], capacity: usize) -> Result<()> {
	let slots = names
		.iter()
		.enumerate()
		.map(|(index, name)| {
			let field_count = u16::try_from(name.chars().count()).unwrap_or(u16::MAX);
			let method_count = u16::try_from(name.split('.').count()).unwrap_or(u16::MAX);
			Ok(IndexedSlot::new(slot_id(index)?, name.as_str()).with_counts(field_count, method_count))
		})
		.collect::<Result<Vec<_>>>()?;

	Arena::scope(ArenaConfig::new(), |arena| -> Result<()> {
		let region = encode_indexed(&slots, capacity, arena)?;
		writeln!(
			out,
			"Slot stride: {} bytes, {} slots, {} bytes total",
			region.layout().stride(),
			region.len(),
			region.total_bytes()
		)?;

		for index in (0..region.len()).rev() {
			let slot = region.get(index)?;
			writeln!(
				out,
				"Slot {index}: {}, fields: {}, methods: {}",
				slot.record(),
				slot.field_count,
				slot.method_count
			)?;
		}
		Ok(())
	})
}

fn slot_id(index: usize) -> Result<i32> {
	i32::try_from(index).map_err(|_| CliError::SlotIdOverflow {
		index,
	})
}

pub fn summarize(out: &mut impl Write, dir: &Path, config: &SummaryConfig) -> Result<()> {
	let summary = summarize_dir(dir, config)?;
	writeln!(out, "{summary} in the directory '{}'", dir.display())?;
	Ok(())
}

/// Prompts for directories until `exit` or end of input.
pub fn summarize_interactive(input: impl BufRead, out: &mut impl Write, config: &SummaryConfig) -> Result<()> {
	let mut lines = input.lines();
	loop {
		write!(out, "Enter a directory (or 'exit'): ")?;
		out.flush()?;

		let Some(line) = lines.next() else {
			writeln!(out)?;
			break;
		};
		let command = line?;
		let command = command.trim();

		if command.eq_ignore_ascii_case("exit") {
			writeln!(out, "Exiting...")?;
			break;
		}

		match summarize(out, Path::new(command), config) {
			Err(CliError::Native(NativeError::NotADirectory {
				..
			})) => writeln!(out, "Invalid directory. Try again.")?,
			result => result?,
		}
	}
	Ok(())
}

pub fn hello(out: &mut impl Write) -> Result<()> {
	let greeting = ForeignString::hello()?;
	match greeting.to_str() {
		Ok(text) => writeln!(out, "{text}")?,
		Err(_) => writeln!(out, "{}", greeting.as_c_str().to_string_lossy())?,
	}
	greeting.release();
	info!("released foreign string");
	Ok(())
}
