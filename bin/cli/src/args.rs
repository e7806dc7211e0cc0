// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recframe_core::Record;

#[derive(Parser, Debug)]
#[command(name = "recframe")]
#[command(about = "Encode records into arena regions and read them back")]
pub struct Args {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Encode records as variable-width frames, then decode them
	Frames {
		/// Records as ID=NAME; defaults to 1=C 2=Java 3=Go
		#[arg(value_name = "ID=NAME", value_parser = parse_record)]
		records: Vec<Record>,

		/// Omit the 0x00 byte after each name
		#[arg(long)]
		no_terminator: bool,

		/// Print a hex dump of the encoded region
		#[arg(long)]
		hex: bool,

		/// Largest single region the arena hands out
		#[arg(long, value_name = "BYTES")]
		max_region_bytes: Option<usize>,
	},

	/// Encode names into fixed-stride slots and read them back out of order
	Indexed {
		names: Vec<String>,

		/// Bytes reserved per name, including its terminator
		#[arg(long, default_value_t = 32)]
		capacity: usize,
	},

	/// Count lines and bytes of every file below a directory
	Summarize {
		/// Prompts for directories when omitted
		dir: Option<PathBuf>,

		/// Bytes read from each file
		#[arg(long, value_name = "BYTES")]
		sample_limit: Option<u64>,

		/// Skip dotfiles and dot-directories
		#[arg(long)]
		skip_hidden: bool,
	},

	/// Ask the C side for a greeting
	Hello,
}

pub fn parse_record(value: &str) -> Result<Record, String> {
	let (id, name) = value.split_once('=').ok_or_else(|| format!("expected ID=NAME, got `{value}`"))?;
	let id = id.trim().parse::<i32>().map_err(|err| format!("invalid id `{id}`: {err}"))?;
	Ok(Record::new(id, name))
}

#[cfg(test)]
mod tests {
	mod parse_record {
		use recframe_core::Record;

		use crate::args::parse_record;

		#[test]
		fn test_valid() {
			assert_eq!(parse_record("2=Java"), Ok(Record::new(2, "Java")));
			assert_eq!(parse_record("-7="), Ok(Record::new(-7, "")));
		}

		#[test]
		fn test_name_may_contain_equals() {
			assert_eq!(parse_record("1=a=b"), Ok(Record::new(1, "a=b")));
		}

		#[test]
		fn test_missing_separator() {
			assert!(parse_record("Java").is_err());
		}

		#[test]
		fn test_bad_id() {
			assert!(parse_record("x=Java").unwrap_err().starts_with("invalid id"));
		}
	}

	mod args {
		use clap::Parser;

		use crate::args::{Args, Command};

		#[test]
		fn test_frames_defaults() {
			let args = Args::try_parse_from(["recframe", "frames"]).unwrap();
			match args.command {
				Command::Frames {
					records,
					no_terminator,
					hex,
					max_region_bytes,
				} => {
					assert!(records.is_empty());
					assert!(!no_terminator);
					assert!(!hex);
					assert_eq!(max_region_bytes, None);
				}
				other => panic!("unexpected command {other:?}"),
			}
		}

		#[test]
		fn test_indexed_capacity() {
			let args = Args::try_parse_from(["recframe", "--verbose", "indexed", "a", "b", "--capacity", "8"]).unwrap();
			assert!(args.verbose);
			match args.command {
				Command::Indexed {
					names,
					capacity,
				} => {
					assert_eq!(names, vec!["a", "b"]);
					assert_eq!(capacity, 8);
				}
				other => panic!("unexpected command {other:?}"),
			}
		}

		#[test]
		fn test_rejects_malformed_record() {
			assert!(Args::try_parse_from(["recframe", "frames", "nope"]).is_err());
		}
	}
}
