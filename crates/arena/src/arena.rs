// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{alloc::Layout, cell::Cell, slice};

use bumpalo::Bump;
use tracing::{debug, trace};

use crate::{AllocationError, ArenaConfig, Region};

/// Owner of zero or more [`Region`]s for the duration of one processing scope.
///
/// Regions are carved out of a bump allocator and are never freed one by one;
/// dropping the arena releases all of them at once. Every region borrows the
/// arena, which makes it impossible to use a region after its arena is gone.
///
/// The arena is confined to the thread that created it.
pub struct Arena {
	bump: Bump,
	config: ArenaConfig,
	allocated: Cell<usize>,
	regions: Cell<usize>,
}

impl Arena {
	pub fn new() -> Self {
		Self::with_config(ArenaConfig::default())
	}

	pub fn with_config(config: ArenaConfig) -> Self {
		let bump = match config.initial_chunk_size() {
			0 => Bump::new(),
			size => Bump::try_with_capacity(size).unwrap_or_else(|_| {
				debug!(size, "initial chunk unavailable, growing on demand");
				Bump::new()
			}),
		};

		Self {
			bump,
			config,
			allocated: Cell::new(0),
			regions: Cell::new(0),
		}
	}

	/// Runs `f` with a fresh arena and releases the arena when `f` returns or unwinds.
	///
	/// The result of `f` cannot borrow from the arena, so no region survives the scope:
	///
	/// ```compile_fail
	/// use recframe_arena::{Arena, ArenaConfig};
	///
	/// let escaped = Arena::scope(ArenaConfig::new(), |arena| arena.allocate(4));
	/// ```
	pub fn scope<R>(config: ArenaConfig, f: impl FnOnce(&Arena) -> R) -> R {
		let arena = Arena::with_config(config);
		f(&arena)
	}

	pub fn config(&self) -> &ArenaConfig {
		&self.config
	}

	/// Allocates a zeroed region of exactly `byte_count` bytes.
	pub fn allocate(&self, byte_count: usize) -> Result<Region<'_>, AllocationError> {
		let max = self.config.region_limit();
		if byte_count > max {
			return Err(AllocationError::RegionTooLarge {
				requested: byte_count,
				max,
			});
		}

		let allocated = self.allocated.get();
		if let Some(capacity) = self.config.capacity_limit() {
			let fits = allocated.checked_add(byte_count).is_some_and(|total| total <= capacity);
			if !fits {
				return Err(AllocationError::CapacityExceeded {
					requested: byte_count,
					allocated,
					capacity,
				});
			}
		}

		let out_of_memory = || AllocationError::OutOfMemory {
			requested: byte_count,
		};
		let layout = Layout::array::<u8>(byte_count).map_err(|_| out_of_memory())?;
		let ptr = self.bump.try_alloc_layout(layout).map_err(|_| out_of_memory())?;
		// SAFETY: `ptr` is a fresh, exclusive allocation of `byte_count` bytes owned by `self.bump`.
		let bytes: &mut [u8] = unsafe {
			ptr.as_ptr().write_bytes(0, byte_count);
			slice::from_raw_parts_mut(ptr.as_ptr(), byte_count)
		};
		self.allocated.set(allocated.saturating_add(byte_count));
		self.regions.set(self.regions.get() + 1);

		trace!(bytes = byte_count, region = self.regions.get(), "allocated region");
		Ok(Region::new(bytes))
	}

	/// Like [`Arena::allocate`], for sizes computed in signed arithmetic.
	pub fn allocate_signed(&self, byte_count: i64) -> Result<Region<'_>, AllocationError> {
		let byte_count = usize::try_from(byte_count).map_err(|_| AllocationError::NegativeSize {
			requested: byte_count,
		})?;
		self.allocate(byte_count)
	}

	pub fn region_count(&self) -> usize {
		self.regions.get()
	}

	pub fn allocated_bytes(&self) -> usize {
		self.allocated.get()
	}
}

impl Default for Arena {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for Arena {
	fn drop(&mut self) {
		debug!(regions = self.regions.get(), bytes = self.allocated.get(), "arena released");
	}
}

#[cfg(test)]
mod tests {
	mod allocate {
		use crate::{AllocationError, Arena, ArenaConfig};

		#[test]
		fn test_region_is_zeroed() {
			let arena = Arena::new();
			let region = arena.allocate(16).unwrap();
			assert_eq!(region.len(), 16);
			assert!(region.iter().all(|&b| b == 0));
		}

		#[test]
		fn test_zero_bytes() {
			let arena = Arena::new();
			let region = arena.allocate(0).unwrap();
			assert!(region.is_empty());
			assert_eq!(arena.region_count(), 1);
			assert_eq!(arena.allocated_bytes(), 0);
		}

		#[test]
		fn test_regions_do_not_overlap() {
			let arena = Arena::new();
			let mut first = arena.allocate(8).unwrap();
			let mut second = arena.allocate(8).unwrap();

			first.as_mut_slice().fill(0xAA);
			second.as_mut_slice().fill(0x55);

			assert!(first.iter().all(|&b| b == 0xAA));
			assert!(second.iter().all(|&b| b == 0x55));
			assert_eq!(arena.region_count(), 2);
			assert_eq!(arena.allocated_bytes(), 16);
		}

		#[test]
		fn test_exceeds_region_limit() {
			let arena = Arena::with_config(ArenaConfig::new().max_region_bytes(10));
			let err = arena.allocate(11).unwrap_err();
			assert_eq!(
				err,
				AllocationError::RegionTooLarge {
					requested: 11,
					max: 10
				}
			);
			assert_eq!(arena.region_count(), 0);
		}

		#[test]
		fn test_region_limit_is_inclusive() {
			let arena = Arena::with_config(ArenaConfig::new().max_region_bytes(10));
			assert_eq!(arena.allocate(10).unwrap().len(), 10);
		}

		#[test]
		fn test_exceeds_capacity() {
			let arena = Arena::with_config(ArenaConfig::new().capacity(20));
			arena.allocate(12).unwrap();
			let err = arena.allocate(9).unwrap_err();
			assert_eq!(
				err,
				AllocationError::CapacityExceeded {
					requested: 9,
					allocated: 12,
					capacity: 20
				}
			);
			assert_eq!(arena.allocate(8).unwrap().len(), 8);
			assert_eq!(arena.allocated_bytes(), 20);
		}

		#[test]
		fn test_unsatisfiable_request_is_an_error() {
			let arena = Arena::with_config(ArenaConfig::new().max_region_bytes(usize::MAX));
			let err = arena.allocate(usize::MAX).unwrap_err();
			assert_eq!(
				err,
				AllocationError::OutOfMemory {
					requested: usize::MAX
				}
			);
			assert_eq!(arena.region_count(), 0);
			assert_eq!(arena.allocated_bytes(), 0);
			assert_eq!(arena.allocate(4).unwrap().len(), 4);
		}

		#[test]
		fn test_initial_chunk() {
			let arena = Arena::with_config(ArenaConfig::new().initial_chunk(4096));
			assert_eq!(arena.allocate(100).unwrap().len(), 100);
		}
	}

	mod allocate_signed {
		use crate::{AllocationError, Arena};

		#[test]
		fn test_negative() {
			let arena = Arena::new();
			let err = arena.allocate_signed(-1).unwrap_err();
			assert_eq!(
				err,
				AllocationError::NegativeSize {
					requested: -1
				}
			);
		}

		#[test]
		fn test_positive() {
			let arena = Arena::new();
			assert_eq!(arena.allocate_signed(28).unwrap().len(), 28);
		}
	}

	mod scope {
		use crate::{Arena, ArenaConfig};

		#[test]
		fn test_returns_owned_result() {
			let copied = Arena::scope(ArenaConfig::new(), |arena| {
				let mut region = arena.allocate(3).unwrap();
				region.copy_from_slice(b"abc");
				region.to_vec()
			});
			assert_eq!(copied, b"abc");
		}

		#[test]
		fn test_freeze_keeps_bytes_readable() {
			let arena = Arena::new();
			let mut region = arena.allocate(2).unwrap();
			region.copy_from_slice(&[1, 2]);
			let frozen = region.freeze();
			let other = arena.allocate(2).unwrap();
			assert_eq!(frozen, &[1, 2]);
			assert_eq!(&*other, &[0, 0]);
		}
	}
}
