// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	path::Path,
};

use ignore::WalkBuilder;
use tracing::{debug, instrument, warn};

use crate::{ForeignFileData, NativeError, Result};

/// 1 MiB
pub const DEFAULT_SAMPLE_CONTENT_LIMIT: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryConfig {
	/// Bytes read from each file; longer files are counted up to this limit.
	pub sample_content_limit: u64,
	pub include_hidden: bool,
	pub follow_links: bool,
}

impl SummaryConfig {
	pub const fn new() -> Self {
		Self {
			sample_content_limit: DEFAULT_SAMPLE_CONTENT_LIMIT,
			include_hidden: true,
			follow_links: false,
		}
	}

	pub const fn sample_content_limit(mut self, limit: u64) -> Self {
		self.sample_content_limit = limit;
		self
	}

	pub const fn include_hidden(mut self, include: bool) -> Self {
		self.include_hidden = include;
		self
	}

	pub const fn follow_links(mut self, follow: bool) -> Self {
		self.follow_links = follow;
		self
	}
}

impl Default for SummaryConfig {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
	pub files: usize,
	pub lines: u64,
	pub bytes: u64,
	/// Entries that could not be walked or read.
	pub failures: usize,
}

impl Display for FileSummary {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"Found {} lines and {} bytes in {} files ({} skipped)",
			self.lines, self.bytes, self.files, self.failures
		)
	}
}

/// Totals lines and bytes over every regular file below `dir`.
///
/// Each file is read through [`ForeignFileData`] and released before the next one is opened. A file that cannot
/// be read is logged, counted in [`FileSummary::failures`] and skipped.
#[instrument(name = "native::summarize", level = "debug", skip(config), fields(limit = config.sample_content_limit))]
pub fn summarize_dir(dir: &Path, config: &SummaryConfig) -> Result<FileSummary> {
	if !dir.is_dir() {
		return Err(NativeError::NotADirectory {
			path: dir.to_path_buf(),
		});
	}

	let walker = WalkBuilder::new(dir)
		.hidden(!config.include_hidden)
		.follow_links(config.follow_links)
		.ignore(false)
		.parents(false)
		.git_ignore(false)
		.git_global(false)
		.git_exclude(false)
		.sort_by_file_name(|a, b| a.cmp(b))
		.build();

	let mut summary = FileSummary::default();
	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(err) => {
				warn!(%err, "skipping unreadable entry");
				summary.failures += 1;
				continue;
			}
		};

		if !entry.file_type().is_some_and(|kind| kind.is_file()) {
			continue;
		}

		match ForeignFileData::read(entry.path(), config.sample_content_limit) {
			Ok(data) => {
				summary.files += 1;
				summary.lines += data.lines();
				summary.bytes += data.bytes();
				data.release();
			}
			Err(err) => {
				warn!(path = %entry.path().display(), %err, "skipping file");
				summary.failures += 1;
			}
		}
	}

	debug!(
		files = summary.files,
		lines = summary.lines,
		bytes = summary.bytes,
		failures = summary.failures,
		"summarized directory"
	);
	Ok(summary)
}
