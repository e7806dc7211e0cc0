// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

/// Attempt to move a [`Cursor`] past its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot advance {requested} bytes from offset {position}, limit is {limit}")]
pub struct Overrun {
	pub position: usize,
	pub requested: usize,
	pub limit: usize,
}

/// Running byte offset over a region of known length.
///
/// The position only moves forward and never passes `limit`. A failed advance leaves the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
	position: usize,
	limit: usize,
}

impl Cursor {
	pub const fn new(limit: usize) -> Self {
		Self {
			position: 0,
			limit,
		}
	}

	pub const fn position(&self) -> usize {
		self.position
	}

	pub const fn limit(&self) -> usize {
		self.limit
	}

	pub const fn remaining(&self) -> usize {
		self.limit - self.position
	}

	pub const fn is_at_end(&self) -> bool {
		self.position == self.limit
	}

	/// Moves forward by `n` bytes and returns the new position.
	pub fn advance(&mut self, n: usize) -> Result<usize, Overrun> {
		let next = self.position.checked_add(n).filter(|&next| next <= self.limit).ok_or(Overrun {
			position: self.position,
			requested: n,
			limit: self.limit,
		})?;
		self.position = next;
		Ok(next)
	}

	/// Moves forward by `n` bytes and returns the range that was stepped over.
	pub fn take(&mut self, n: usize) -> Result<Range<usize>, Overrun> {
		let start = self.position;
		let end = self.advance(n)?;
		Ok(start..end)
	}
}
