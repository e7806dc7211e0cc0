// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
	#[error("cannot allocate a region of negative size ({requested} bytes)")]
	NegativeSize {
		requested: i64,
	},

	#[error("region of {requested} bytes exceeds the per-region maximum of {max} bytes")]
	RegionTooLarge {
		requested: usize,
		max: usize,
	},

	#[error("region of {requested} bytes exceeds remaining arena capacity ({allocated} of {capacity} bytes in use)")]
	CapacityExceeded {
		requested: usize,
		allocated: usize,
		capacity: usize,
	},

	#[error("allocator could not provide a region of {requested} bytes")]
	OutOfMemory {
		requested: usize,
	},
}
