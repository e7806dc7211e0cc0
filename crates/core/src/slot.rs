// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Fixed-stride slots for random access.
//!
//! ```text
//! offset 0             id            i32
//! offset 4             name          name_capacity bytes, UTF-8, NUL-terminated and NUL-padded
//! offset 4 + cap       field_count   u16
//! offset 6 + cap       method_count  u16
//! ```
//!
//! Slot `k` starts at `k * stride`. Names longer than `name_capacity - 1` bytes are cut at the last character
//! boundary that fits; the final byte of the buffer is always left for the terminator.

use recframe_arena::{Arena, Region};
use tracing::{debug, instrument, trace};

use crate::{
	FrameError, Layout, Record, Result,
	layout::{SLOT_FIELD_COUNT, SLOT_ID, SLOT_METHOD_COUNT, SLOT_NAME},
};

/// Upper bound on `name_capacity`, keeping strides well inside `u16` territory.
pub const MAX_NAME_CAPACITY: usize = u16::MAX as usize;

#[derive(Debug, Clone)]
pub struct SlotLayout {
	layout: Layout,
	name_capacity: usize,
}

impl SlotLayout {
	pub fn new(name_capacity: usize) -> Result<Self> {
		if name_capacity == 0 || name_capacity > MAX_NAME_CAPACITY {
			return Err(FrameError::InvalidNameCapacity {
				capacity: name_capacity,
				max: MAX_NAME_CAPACITY,
			});
		}
		let layout = Layout::slot(name_capacity).ok_or(FrameError::InvalidNameCapacity {
			capacity: name_capacity,
			max: MAX_NAME_CAPACITY,
		})?;
		Ok(Self {
			layout,
			name_capacity,
		})
	}

	/// `4 + name_capacity + 2 + 2`
	pub fn stride(&self) -> usize {
		self.layout.size()
	}

	pub fn name_capacity(&self) -> usize {
		self.name_capacity
	}

	pub fn layout(&self) -> &Layout {
		&self.layout
	}

	fn write(&self, target: &mut [u8], slot: &IndexedSlot) {
		let layout = &self.layout;
		layout.set_i32(target, SLOT_ID, slot.id);

		let stored = truncate_name(&slot.name, self.name_capacity);
		let buffer = layout.bytes_mut(target, SLOT_NAME);
		buffer[..stored.len()].copy_from_slice(stored.as_bytes());
		buffer[stored.len()..].fill(0);

		layout.set_u16(target, SLOT_FIELD_COUNT, slot.field_count);
		layout.set_u16(target, SLOT_METHOD_COUNT, slot.method_count);
	}

	fn read(&self, source: &[u8], index: usize, offset: usize) -> Result<IndexedSlot> {
		let layout = &self.layout;
		let buffer = layout.bytes(source, SLOT_NAME);
		let end = buffer.iter().position(|&b| b == 0).ok_or(FrameError::UnterminatedSlotName {
			index,
		})?;
		let name = std::str::from_utf8(&buffer[..end]).map_err(|source| FrameError::InvalidUtf8 {
			offset: offset + layout.field(SLOT_NAME).map_or(0, |field| field.offset),
			source,
		})?;

		Ok(IndexedSlot {
			id: layout.get_i32(source, SLOT_ID),
			name: name.to_string(),
			field_count: layout.get_u16(source, SLOT_FIELD_COUNT),
			method_count: layout.get_u16(source, SLOT_METHOD_COUNT),
		})
	}
}

/// A record plus the two fixed counters stored alongside it in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexedSlot {
	pub id: i32,
	pub name: String,
	pub field_count: u16,
	pub method_count: u16,
}

impl IndexedSlot {
	pub fn new(id: i32, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
			field_count: 0,
			method_count: 0,
		}
	}

	pub fn with_counts(mut self, field_count: u16, method_count: u16) -> Self {
		self.field_count = field_count;
		self.method_count = method_count;
		self
	}

	pub fn record(&self) -> Record {
		Record::new(self.id, self.name.clone())
	}
}

impl From<Record> for IndexedSlot {
	fn from(record: Record) -> Self {
		IndexedSlot::new(record.id, record.name)
	}
}

/// Longest prefix of `name` that fits a `name_capacity` byte buffer together with its terminator.
///
/// The cut lands on a UTF-8 character boundary. ASCII names keep exactly `name_capacity - 1` bytes; when a
/// multibyte character straddles that limit it is dropped whole, so the prefix can be up to three bytes shorter.
///
/// ```
/// use recframe_core::truncate_name;
///
/// assert_eq!(truncate_name("java.util", 5), "java");
/// assert_eq!(truncate_name("a\u{e9}\u{20ac}", 5), "a\u{e9}");
/// ```
pub fn truncate_name(name: &str, name_capacity: usize) -> &str {
	let limit = name_capacity.saturating_sub(1);
	if name.len() <= limit {
		return name;
	}
	let mut end = limit;
	while !name.is_char_boundary(end) {
		end -= 1;
	}
	&name[..end]
}

/// Writes `slots` into one region of `slots.len() * stride` bytes.
#[instrument(
	name = "slot::encode",
	level = "debug",
	skip_all,
	fields(slots = slots.len(), name_capacity = name_capacity)
)]
pub fn encode_indexed<'a>(slots: &[IndexedSlot], name_capacity: usize, arena: &'a Arena) -> Result<IndexedRegion<'a>> {
	let layout = SlotLayout::new(name_capacity)?;

	for (index, slot) in slots.iter().enumerate() {
		if let Some(position) = slot.name.bytes().position(|b| b == 0) {
			return Err(FrameError::EmbeddedNul {
				index,
				id: slot.id,
				position,
			});
		}
	}

	let stride = layout.stride();
	let total_bytes = slots.len().saturating_mul(stride);
	let mut region = arena.allocate(total_bytes)?;

	for (index, (slot, target)) in slots.iter().zip(region.chunks_exact_mut(stride)).enumerate() {
		if slot.name.len() >= name_capacity {
			trace!(index, id = slot.id, bytes = slot.name.len(), "truncating slot name");
		}
		layout.write(target, slot);
	}

	debug!(slots = slots.len(), stride, total_bytes, "encoded slots");
	Ok(IndexedRegion {
		region,
		layout,
		count: slots.len(),
	})
}

/// Reads slot `index` out of `bytes`, which holds whole slots of `layout`.
pub fn get_slot(bytes: &[u8], layout: &SlotLayout, index: usize) -> Result<IndexedSlot> {
	let stride = layout.stride();
	let count = bytes.len() / stride;
	if index >= count {
		return Err(FrameError::SlotOutOfBounds {
			index,
			count,
		});
	}

	let offset = index * stride;
	layout.read(&bytes[offset..offset + stride], index, offset)
}

#[derive(Debug)]
pub struct IndexedRegion<'a> {
	region: Region<'a>,
	layout: SlotLayout,
	count: usize,
}

impl IndexedRegion<'_> {
	pub fn len(&self) -> usize {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	pub fn layout(&self) -> &SlotLayout {
		&self.layout
	}

	pub fn total_bytes(&self) -> usize {
		self.region.len()
	}

	pub fn as_bytes(&self) -> &[u8] {
		self.region.as_slice()
	}

	/// Constant-time read of slot `index`.
	pub fn get(&self, index: usize) -> Result<IndexedSlot> {
		get_slot(self.region.as_slice(), &self.layout, index)
	}

	pub fn iter(&self) -> impl Iterator<Item = Result<IndexedSlot>> + '_ {
		(0..self.count).map(move |index| self.get(index))
	}
}

#[cfg(test)]
mod tests {
	mod slot_layout {
		use crate::{FrameError, SlotLayout, slot::MAX_NAME_CAPACITY};

		#[test]
		fn test_stride() {
			assert_eq!(SlotLayout::new(32).unwrap().stride(), 40);
			assert_eq!(SlotLayout::new(1).unwrap().stride(), 9);
		}

		#[test]
		fn test_zero_capacity() {
			assert_eq!(
				SlotLayout::new(0).unwrap_err(),
				FrameError::InvalidNameCapacity {
					capacity: 0,
					max: MAX_NAME_CAPACITY
				}
			);
		}

		#[test]
		fn test_capacity_too_large() {
			assert!(SlotLayout::new(MAX_NAME_CAPACITY + 1).is_err());
		}
	}

	mod truncate_name {
		use recframe_arena::Arena;

		use crate::{IndexedSlot, encode_indexed, truncate_name};

		#[test]
		fn test_fits() {
			assert_eq!(truncate_name("Java", 5), "Java");
			assert_eq!(truncate_name("", 1), "");
		}

		#[test]
		fn test_exact_capacity_loses_last_byte() {
			assert_eq!(truncate_name("Java", 4), "Jav");
		}

		#[test]
		fn test_capacity_one_keeps_nothing() {
			assert_eq!(truncate_name("Java", 1), "");
		}

		#[test]
		fn test_cuts_on_char_boundary() {
			// 'é' is two bytes: "caf" + [0xC3 0xA9]
			assert_eq!(truncate_name("café", 5), "caf");
			assert_eq!(truncate_name("café", 6), "café");
		}

		#[test]
		fn test_multibyte_straddle_keeps_fewer_bytes() {
			// 'a' (1) + 'é' (2) + '€' (3); limit 4 falls inside '€'
			let stored = truncate_name("aé€", 5);
			assert_eq!(stored, "aé");
			assert_eq!(stored.len(), 3);

			// a single 4 byte character never fits a limit of 3
			assert_eq!(truncate_name("\u{1F600}", 4), "");
			assert_eq!(truncate_name("aé€", 7), "aé€");
		}

		#[test]
		fn test_stored_slot_matches_truncation() {
			let arena = Arena::new();
			let region = encode_indexed(&[IndexedSlot::new(1, "aé€")], 5, &arena).unwrap();
			assert_eq!(region.get(0).unwrap().name, "aé");
		}
	}

	mod encode_indexed {
		use recframe_arena::Arena;

		use crate::{FrameError, IndexedSlot, encode_indexed};

		#[test]
		fn test_slot_bytes() {
			let arena = Arena::new();
			let region = encode_indexed(&[IndexedSlot::new(7, "Go").with_counts(3, 9)], 4, &arena).unwrap();

			#[rustfmt::skip]
			let expected: &[u8] = &[
				7, 0, 0, 0,
				b'G', b'o', 0, 0,
				3, 0,
				9, 0,
			];
			assert_eq!(region.as_bytes(), expected);
			assert_eq!(region.total_bytes(), 12);
			assert_eq!(region.len(), 1);
		}

		#[test]
		fn test_truncated_name_is_returned() {
			let arena = Arena::new();
			let name = "java.util.concurrent.ConcurrentHashMap";
			let region = encode_indexed(&[IndexedSlot::new(1, name)], 32, &arena).unwrap();

			let slot = region.get(0).unwrap();
			assert_eq!(slot.name.len(), 31);
			assert_eq!(slot.name, &name[..31]);
			assert_eq!(region.as_bytes()[4 + 31], 0);
		}

		#[test]
		fn test_empty() {
			let arena = Arena::new();
			let region = encode_indexed(&[], 8, &arena).unwrap();
			assert!(region.is_empty());
			assert_eq!(region.total_bytes(), 0);
			assert_eq!(region.iter().count(), 0);
		}

		#[test]
		fn test_embedded_nul_rejected_before_allocation() {
			let arena = Arena::new();
			let err = encode_indexed(&[IndexedSlot::new(1, "ok"), IndexedSlot::new(2, "b\0d")], 8, &arena)
				.unwrap_err();
			assert_eq!(
				err,
				FrameError::EmbeddedNul {
					index: 1,
					id: 2,
					position: 1
				}
			);
			assert_eq!(arena.region_count(), 0);
		}

		#[test]
		fn test_invalid_capacity_rejected_before_allocation() {
			let arena = Arena::new();
			assert!(encode_indexed(&[IndexedSlot::new(1, "a")], 0, &arena).is_err());
			assert_eq!(arena.region_count(), 0);
		}
	}

	mod get {
		use recframe_arena::Arena;

		use crate::{FrameError, IndexedSlot, SlotLayout, encode_indexed, get_slot};

		fn slots() -> Vec<IndexedSlot> {
			vec![
				IndexedSlot::new(10, "alpha").with_counts(1, 2),
				IndexedSlot::new(-20, "beta").with_counts(3, 4),
				IndexedSlot::new(30, "gamma").with_counts(u16::MAX, 0),
			]
		}

		#[test]
		fn test_random_order_access() {
			let arena = Arena::new();
			let slots = slots();
			let region = encode_indexed(&slots, 16, &arena).unwrap();

			assert_eq!(region.get(2).unwrap(), slots[2]);
			assert_eq!(region.get(0).unwrap(), slots[0]);
			assert_eq!(region.get(1).unwrap(), slots[1]);
		}

		#[test]
		fn test_out_of_bounds() {
			let arena = Arena::new();
			let region = encode_indexed(&slots(), 16, &arena).unwrap();
			assert_eq!(
				region.get(3).unwrap_err(),
				FrameError::SlotOutOfBounds {
					index: 3,
					count: 3
				}
			);
		}

		#[test]
		fn test_get_slot_over_plain_bytes() {
			let arena = Arena::new();
			let region = encode_indexed(&slots(), 16, &arena).unwrap();
			let copy = region.as_bytes().to_vec();
			let layout = SlotLayout::new(16).unwrap();
			assert_eq!(get_slot(&copy, &layout, 1).unwrap().id, -20);
		}

		#[test]
		fn test_partial_trailing_slot_is_not_addressable() {
			let layout = SlotLayout::new(4).unwrap();
			let bytes = vec![0u8; layout.stride() + 5];
			assert_eq!(
				get_slot(&bytes, &layout, 1).unwrap_err(),
				FrameError::SlotOutOfBounds {
					index: 1,
					count: 1
				}
			);
		}

		#[test]
		fn test_unterminated_name() {
			let layout = SlotLayout::new(2).unwrap();
			let bytes = [1, 0, 0, 0, b'a', b'b', 0, 0, 0, 0];
			assert_eq!(
				get_slot(&bytes, &layout, 0).unwrap_err(),
				FrameError::UnterminatedSlotName {
					index: 0
				}
			);
		}

		#[test]
		fn test_record_view() {
			let slot = IndexedSlot::new(5, "x").with_counts(1, 1);
			assert_eq!(slot.record().to_string(), "ID: 5, Name: x");
		}
	}
}
