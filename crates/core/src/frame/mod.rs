// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Variable-width record frames.
//!
//! ```text
//! offset 0               id            i32, little-endian
//! offset 4               name_length   u16, little-endian
//! offset 6               name          name_length bytes of UTF-8
//! offset 6 + name_length terminator    0x00 (only with Terminator::Nul)
//! ```
//!
//! Frames follow each other with no gaps. The region does not store a record count or its own length; readers
//! are handed the total length and walk frames until they reach it.

pub use decode::{FrameDecoder, FrameRef, decode};
pub use encode::{EncodedRegion, FrameEncoder, encode};

mod decode;
mod encode;

/// Size of `[id][name_length]`.
pub const FRAME_HEADER_SIZE: usize = 6;

/// Largest name, in UTF-8 bytes, that `name_length` can describe.
pub const MAX_NAME_BYTES: usize = u16::MAX as usize;

/// Whether each frame ends with a `0x00` byte after the name.
///
/// The choice is a property of the format: writer and reader must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
	#[default]
	Nul,
	None,
}

impl Terminator {
	pub const fn size(self) -> usize {
		match self {
			Terminator::Nul => 1,
			Terminator::None => 0,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFormat {
	pub terminator: Terminator,
}

impl FrameFormat {
	pub const fn new() -> Self {
		Self {
			terminator: Terminator::Nul,
		}
	}

	pub const fn without_terminator() -> Self {
		Self {
			terminator: Terminator::None,
		}
	}

	/// Bytes occupied by one frame whose name is `name_len` bytes long.
	pub const fn frame_size(&self, name_len: usize) -> usize {
		FRAME_HEADER_SIZE + name_len + self.terminator.size()
	}
}
