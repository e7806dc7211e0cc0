// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

use recframe_arena::{Arena, Region};
use tracing::{debug, instrument, trace};

use super::{FrameDecoder, FrameFormat, MAX_NAME_BYTES, Terminator};
use crate::{
	Cursor, FrameError, Layout, Record, Result,
	layout::{HEADER_ID, HEADER_NAME_LENGTH},
};

/// Writes records as consecutive frames.
///
/// Encoding is two passes: every record is validated and sized first, and only a fully valid input is written.
/// A failed encode never allocates and never touches the destination.
#[derive(Debug, Clone)]
pub struct FrameEncoder {
	format: FrameFormat,
	header: Layout,
}

impl FrameEncoder {
	pub fn new(format: FrameFormat) -> Self {
		Self {
			format,
			header: Layout::frame_header(),
		}
	}

	pub fn format(&self) -> FrameFormat {
		self.format
	}

	/// Validates `records` and returns the exact number of bytes their frames occupy.
	pub fn measure(&self, records: &[Record]) -> Result<usize> {
		let mut total: usize = 0;
		for (index, record) in records.iter().enumerate() {
			total = total.saturating_add(self.frame_size(index, record)?);
		}
		Ok(total)
	}

	/// Encodes `records` into a single region allocated from `arena`.
	#[instrument(name = "frame::encode", level = "debug", skip_all, fields(records = records.len()))]
	pub fn encode<'a>(&self, records: &[Record], arena: &'a Arena) -> Result<EncodedRegion<'a>> {
		let total_bytes = self.measure(records)?;
		let mut region = arena.allocate(total_bytes)?;
		self.write(records, &mut region);

		debug!(records = records.len(), total_bytes, "encoded frames");
		Ok(EncodedRegion {
			region,
			total_bytes,
			record_count: records.len(),
			format: self.format,
		})
	}

	/// Encodes `records` into `target`, which must be exactly [`FrameEncoder::measure`] bytes long.
	pub fn encode_into(&self, records: &[Record], target: &mut [u8]) -> Result<usize> {
		let expected = self.measure(records)?;
		if target.len() != expected {
			return Err(FrameError::BufferSizeMismatch {
				expected,
				actual: target.len(),
			});
		}
		self.write(records, target);
		Ok(expected)
	}

	fn frame_size(&self, index: usize, record: &Record) -> Result<usize> {
		let name = record.name.as_bytes();

		if name.len() > MAX_NAME_BYTES {
			return Err(FrameError::FieldOverflow {
				index,
				id: record.id,
				field: "name",
				actual: name.len(),
				max: MAX_NAME_BYTES,
			});
		}

		if self.format.terminator == Terminator::Nul {
			if let Some(position) = name.iter().position(|&b| b == 0) {
				return Err(FrameError::EmbeddedNul {
					index,
					id: record.id,
					position,
				});
			}
		}

		Ok(self.format.frame_size(name.len()))
	}

	// Callers have validated every record and sized `target` with `measure`.
	fn write(&self, records: &[Record], target: &mut [u8]) {
		let header = &self.header;
		let mut cursor = Cursor::new(target.len());

		for (index, record) in records.iter().enumerate() {
			let name = record.name.as_bytes();
			trace!(index, id = record.id, offset = cursor.position(), "writing frame");

			let window = step(&mut cursor, header.size());
			let dst = &mut target[window];
			header.set_i32(dst, HEADER_ID, record.id);
			header.set_u16(dst, HEADER_NAME_LENGTH, name.len() as u16);

			let window = step(&mut cursor, name.len());
			target[window].copy_from_slice(name);

			if self.format.terminator == Terminator::Nul {
				let window = step(&mut cursor, 1);
				target[window].fill(0);
			}
		}

		assert_eq!(
			cursor.position(),
			target.len(),
			"frame encoder stopped at offset {} of a {} byte region",
			cursor.position(),
			target.len()
		);
	}
}

impl Default for FrameEncoder {
	fn default() -> Self {
		Self::new(FrameFormat::default())
	}
}

fn step(cursor: &mut Cursor, n: usize) -> Range<usize> {
	cursor.take(n).unwrap_or_else(|overrun| panic!("frame encoder overran its region: {overrun}"))
}

/// Encodes `records` with the default, NUL-terminated format.
pub fn encode<'a>(records: &[Record], arena: &'a Arena) -> Result<EncodedRegion<'a>> {
	FrameEncoder::default().encode(records, arena)
}

/// Frames written into an arena region.
#[derive(Debug)]
pub struct EncodedRegion<'a> {
	region: Region<'a>,
	total_bytes: usize,
	record_count: usize,
	format: FrameFormat,
}

impl<'a> EncodedRegion<'a> {
	pub fn total_bytes(&self) -> usize {
		self.total_bytes
	}

	pub fn record_count(&self) -> usize {
		self.record_count
	}

	pub fn format(&self) -> FrameFormat {
		self.format
	}

	pub fn as_bytes(&self) -> &[u8] {
		self.region.as_slice()
	}

	/// Starts a fresh pass over the frames, from offset 0.
	pub fn decoder(&self) -> FrameDecoder<'_> {
		FrameDecoder::over(self.region.as_slice(), self.format)
	}

	pub fn into_region(self) -> Region<'a> {
		self.region
	}
}
