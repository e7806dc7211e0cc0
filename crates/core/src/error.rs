// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::str::Utf8Error;

use recframe_arena::AllocationError;

use crate::{Diagnostic, IntoDiagnostic, Overrun};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
	#[error("record {index} (id {id}): field `{field}` is {actual} bytes, maximum is {max}")]
	FieldOverflow {
		index: usize,
		id: i32,
		field: &'static str,
		actual: usize,
		max: usize,
	},

	#[error("record {index} (id {id}): name contains a NUL byte at position {position}")]
	EmbeddedNul {
		index: usize,
		id: i32,
		position: usize,
	},

	#[error("region truncated: {context} needs {needed} bytes at offset {offset}, region is {total} bytes")]
	MalformedRegion {
		offset: usize,
		needed: usize,
		total: usize,
		context: &'static str,
	},

	#[error("name at offset {offset} is not valid UTF-8")]
	InvalidUtf8 {
		offset: usize,
		#[source]
		source: Utf8Error,
	},

	#[error("expected terminator 0x00 at offset {offset}, found {found:#04X}")]
	BadTerminator {
		offset: usize,
		found: u8,
	},

	#[error("slot {index} is out of bounds for a region of {count} slots")]
	SlotOutOfBounds {
		index: usize,
		count: usize,
	},

	#[error("slot name capacity must be between 1 and {max} bytes, got {capacity}")]
	InvalidNameCapacity {
		capacity: usize,
		max: usize,
	},

	#[error("slot {index} has no NUL terminator inside its name buffer")]
	UnterminatedSlotName {
		index: usize,
	},

	#[error("destination buffer is {actual} bytes, encoding needs exactly {expected}")]
	BufferSizeMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("frame {id} has a NUL byte inside its name at offset {offset}")]
	NulInFrameName {
		offset: usize,
		id: i32,
	},

	#[error(transparent)]
	Allocation(#[from] AllocationError),
}

impl FrameError {
	pub(crate) fn truncated(overrun: Overrun, context: &'static str) -> Self {
		FrameError::MalformedRegion {
			offset: overrun.position,
			needed: overrun.requested,
			total: overrun.limit,
			context,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			FrameError::FieldOverflow {
				..
			} => "FRAME_001",
			FrameError::EmbeddedNul {
				..
			} => "FRAME_002",
			FrameError::MalformedRegion {
				..
			} => "FRAME_003",
			FrameError::InvalidUtf8 {
				..
			} => "FRAME_004",
			FrameError::BadTerminator {
				..
			} => "FRAME_005",
			FrameError::SlotOutOfBounds {
				..
			} => "FRAME_006",
			FrameError::InvalidNameCapacity {
				..
			} => "FRAME_007",
			FrameError::UnterminatedSlotName {
				..
			} => "FRAME_008",
			FrameError::BufferSizeMismatch {
				..
			} => "FRAME_009",
			FrameError::NulInFrameName {
				..
			} => "FRAME_010",
			FrameError::Allocation(err) => allocation_code(err),
		}
	}
}

fn allocation_code(err: &AllocationError) -> &'static str {
	match err {
		AllocationError::NegativeSize {
			..
		} => "ARENA_001",
		AllocationError::RegionTooLarge {
			..
		} => "ARENA_002",
		AllocationError::CapacityExceeded {
			..
		} => "ARENA_003",
		AllocationError::OutOfMemory {
			..
		} => "ARENA_004",
	}
}

impl IntoDiagnostic for FrameError {
	fn into_diagnostic(self) -> Diagnostic {
		let code = self.code().to_string();
		let message = self.to_string();

		let (offset, label, help, notes) = match &self {
			FrameError::FieldOverflow {
				max,
				..
			} => (
				None,
				Some("length prefix overflow".to_string()),
				Some(format!("shorten the value to at most {} UTF-8 bytes", max)),
				vec!["nothing was written: sizes are validated before the region is allocated".to_string()],
			),
			FrameError::EmbeddedNul {
				..
			} => (
				None,
				Some("embedded terminator".to_string()),
				Some("remove the NUL byte or use a format without terminators".to_string()),
				vec![],
			),
			FrameError::MalformedRegion {
				offset,
				context,
				..
			} => (
				Some(*offset),
				Some(context.to_string()),
				Some("the declared total length does not match the frames inside the region".to_string()),
				vec![],
			),
			FrameError::InvalidUtf8 {
				offset,
				..
			} => (Some(*offset), Some("invalid UTF-8".to_string()), None, vec![]),
			FrameError::BadTerminator {
				offset,
				..
			} => (
				Some(*offset),
				Some("terminator mismatch".to_string()),
				Some("the region may have been written with a different frame format".to_string()),
				vec![],
			),
			FrameError::SlotOutOfBounds {
				..
			} => (None, None, None, vec![]),
			FrameError::InvalidNameCapacity {
				..
			} => (
				None,
				None,
				Some("one byte of the capacity is always reserved for the terminator".to_string()),
				vec![],
			),
			FrameError::UnterminatedSlotName {
				..
			} => (
				None,
				None,
				Some("the region may have been written with a different slot layout".to_string()),
				vec![],
			),
			FrameError::BufferSizeMismatch {
				..
			} => (None, None, Some("size the buffer with FrameEncoder::measure".to_string()), vec![]),
			FrameError::NulInFrameName {
				offset,
				..
			} => (
				Some(*offset),
				Some("embedded terminator".to_string()),
				Some("the region may have been written with a different frame format".to_string()),
				vec![],
			),
			FrameError::Allocation(_) => (
				None,
				Some("allocation rejected".to_string()),
				Some("reduce the input or raise the arena limits".to_string()),
				vec![],
			),
		};

		Diagnostic {
			code,
			message,
			offset,
			label,
			help,
			notes,
		}
	}
}

impl IntoDiagnostic for AllocationError {
	fn into_diagnostic(self) -> Diagnostic {
		FrameError::Allocation(self).into_diagnostic()
	}
}
