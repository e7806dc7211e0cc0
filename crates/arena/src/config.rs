// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Default upper bound for a single region: 64 MiB.
pub const DEFAULT_MAX_REGION_BYTES: usize = 64 * 1024 * 1024;

/// Limits applied by an [`Arena`](crate::Arena).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
	max_region_bytes: usize,
	capacity: Option<usize>,
	initial_chunk: usize,
}

impl ArenaConfig {
	pub const fn new() -> Self {
		Self {
			max_region_bytes: DEFAULT_MAX_REGION_BYTES,
			capacity: None,
			initial_chunk: 0,
		}
	}

	/// Largest single allocation the arena accepts.
	///
	/// Requests under this limit that the system allocator cannot satisfy fail with
	/// [`AllocationError::OutOfMemory`](crate::AllocationError::OutOfMemory).
	pub const fn max_region_bytes(mut self, bytes: usize) -> Self {
		self.max_region_bytes = bytes;
		self
	}

	/// Cap on the sum of all regions allocated from one arena.
	pub const fn capacity(mut self, bytes: usize) -> Self {
		self.capacity = Some(bytes);
		self
	}

	/// Bytes reserved up front, before the first allocation.
	pub const fn initial_chunk(mut self, bytes: usize) -> Self {
		self.initial_chunk = bytes;
		self
	}

	pub const fn region_limit(&self) -> usize {
		self.max_region_bytes
	}

	pub const fn capacity_limit(&self) -> Option<usize> {
		self.capacity
	}

	pub const fn initial_chunk_size(&self) -> usize {
		self.initial_chunk
	}
}

impl Default for ArenaConfig {
	fn default() -> Self {
		Self::new()
	}
}
