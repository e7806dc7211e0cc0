// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::{FrameFormat, Terminator};
use crate::{
	Cursor, FrameError, Layout, Record, Result,
	layout::{HEADER_ID, HEADER_NAME_LENGTH},
};

/// A decoded frame that borrows its name from the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRef<'r> {
	/// Offset of the frame's first header byte.
	pub offset: usize,
	pub id: i32,
	pub name: &'r str,
}

impl FrameRef<'_> {
	pub fn to_record(&self) -> Record {
		Record::new(self.id, self.name)
	}
}

/// Single forward pass over the frames of a region.
///
/// Yields one `Result` per frame. Every read is bounds-checked against the declared total length before it
/// happens; the first malformed frame is reported once and ends the pass.
#[derive(Debug)]
pub struct FrameDecoder<'r> {
	bytes: &'r [u8],
	cursor: Cursor,
	format: FrameFormat,
	header: Layout,
	frames: usize,
	done: bool,
}

impl<'r> FrameDecoder<'r> {
	/// Decodes the first `total_bytes` bytes of `region`.
	pub fn new(region: &'r [u8], total_bytes: usize, format: FrameFormat) -> Result<Self> {
		if total_bytes > region.len() {
			return Err(FrameError::MalformedRegion {
				offset: 0,
				needed: total_bytes,
				total: region.len(),
				context: "declared total length",
			});
		}
		Ok(Self::over(&region[..total_bytes], format))
	}

	pub(crate) fn over(bytes: &'r [u8], format: FrameFormat) -> Self {
		Self {
			bytes,
			cursor: Cursor::new(bytes.len()),
			format,
			header: Layout::frame_header(),
			frames: 0,
			done: false,
		}
	}

	/// Offset of the next unread byte.
	pub fn position(&self) -> usize {
		self.cursor.position()
	}

	pub fn next_frame(&mut self) -> Option<Result<FrameRef<'r>>> {
		if self.done {
			return None;
		}

		if self.cursor.is_at_end() {
			self.done = true;
			debug!(frames = self.frames, total_bytes = self.bytes.len(), "decoded frames");
			return None;
		}

		match self.read_frame() {
			Ok(frame) => {
				self.frames += 1;
				Some(Ok(frame))
			}
			Err(err) => {
				self.done = true;
				Some(Err(err))
			}
		}
	}

	/// Borrowing view of the remaining frames.
	pub fn frames(mut self) -> impl Iterator<Item = Result<FrameRef<'r>>> {
		std::iter::from_fn(move || self.next_frame())
	}

	fn read_frame(&mut self) -> Result<FrameRef<'r>> {
		let bytes = self.bytes;
		let offset = self.cursor.position();

		let window = self.cursor.take(self.header.size()).map_err(|o| FrameError::truncated(o, "frame header"))?;
		let id = self.header.get_i32(&bytes[window.clone()], HEADER_ID);
		let name_length = self.header.get_u16(&bytes[window], HEADER_NAME_LENGTH) as usize;

		let window = self.cursor.take(name_length).map_err(|o| FrameError::truncated(o, "frame name"))?;
		let start = window.start;
		if self.format.terminator == Terminator::Nul {
			if let Some(position) = bytes[window.clone()].iter().position(|&byte| byte == 0) {
				return Err(FrameError::NulInFrameName {
					offset: start + position,
					id,
				});
			}
		}
		let name = std::str::from_utf8(&bytes[window]).map_err(|source| FrameError::InvalidUtf8 {
			offset: start,
			source,
		})?;

		if self.format.terminator == Terminator::Nul {
			let window =
				self.cursor.take(1).map_err(|o| FrameError::truncated(o, "frame terminator"))?;
			let found = bytes[window.start];
			if found != 0 {
				return Err(FrameError::BadTerminator {
					offset: window.start,
					found,
				});
			}
		}

		trace!(offset, id, name_length, "read frame");
		Ok(FrameRef {
			offset,
			id,
			name,
		})
	}
}

impl Iterator for FrameDecoder<'_> {
	type Item = Result<Record>;

	fn next(&mut self) -> Option<Self::Item> {
		self.next_frame().map(|frame| frame.map(|f| f.to_record()))
	}
}

impl FusedIterator for FrameDecoder<'_> {}

/// Decodes `total_bytes` bytes of NUL-terminated frames from `region`.
pub fn decode(region: &[u8], total_bytes: usize) -> Result<FrameDecoder<'_>> {
	FrameDecoder::new(region, total_bytes, FrameFormat::default())
}
