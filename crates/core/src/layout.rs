// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Packed field layouts.
//!
//! A [`Layout`] fixes the order and width of a run of fields and computes each field's offset once. Fields are
//! packed back to back with no alignment padding, and multi-byte integers are stored little-endian. Accessors
//! operate on a byte slice that starts at the first byte of the laid-out struct, and panic when the index or the
//! slice does not match the layout.

use std::{
	ops::Deref,
	sync::{Arc, LazyLock},
};

/// Index of `id` in [`Layout::frame_header`].
pub const HEADER_ID: usize = 0;
/// Index of `name_length` in [`Layout::frame_header`].
pub const HEADER_NAME_LENGTH: usize = 1;

/// Index of `id` in [`Layout::slot`].
pub const SLOT_ID: usize = 0;
/// Index of `name` in [`Layout::slot`].
pub const SLOT_NAME: usize = 1;
/// Index of `field_count` in [`Layout::slot`].
pub const SLOT_FIELD_COUNT: usize = 2;
/// Index of `method_count` in [`Layout::slot`].
pub const SLOT_METHOD_COUNT: usize = 3;

static FRAME_HEADER: LazyLock<Layout> = LazyLock::new(|| {
	Layout::new(&[("id", FieldType::Int4), ("name_length", FieldType::Uint2)])
		.unwrap_or_else(|| unreachable!("a 6 byte header cannot overflow"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
	/// `i32`
	Int4,
	/// `u16`
	Uint2,
	/// Inline byte buffer of fixed width.
	Bytes(usize),
}

impl FieldType {
	pub const fn size(&self) -> usize {
		match self {
			FieldType::Int4 => 4,
			FieldType::Uint2 => 2,
			FieldType::Bytes(width) => *width,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	pub name: &'static str,
	pub offset: usize,
	pub size: usize,
	pub value: FieldType,
}

#[derive(Debug, Clone)]
pub struct Layout(Arc<LayoutInner>);

impl Deref for Layout {
	type Target = LayoutInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Layout {
	/// Returns `None` when the total size does not fit in `usize`.
	pub fn new(fields: &[(&'static str, FieldType)]) -> Option<Self> {
		LayoutInner::new(fields).map(|inner| Self(Arc::new(inner)))
	}

	/// The 6 byte record header: `id: i32` at 0, `name_length: u16` at 4.
	pub fn frame_header() -> Self {
		FRAME_HEADER.clone()
	}

	/// A fixed-stride slot: `id: i32`, `name: [u8; name_capacity]`, `field_count: u16`, `method_count: u16`.
	pub fn slot(name_capacity: usize) -> Option<Self> {
		Self::new(&[
			("id", FieldType::Int4),
			("name", FieldType::Bytes(name_capacity)),
			("field_count", FieldType::Uint2),
			("method_count", FieldType::Uint2),
		])
	}
}

#[derive(Debug)]
pub struct LayoutInner {
	pub fields: Vec<Field>,
	/// size of all fields in bytes
	pub size: usize,
}

impl LayoutInner {
	fn new(fields: &[(&'static str, FieldType)]) -> Option<Self> {
		let mut offset: usize = 0;
		let mut result = Vec::with_capacity(fields.len());

		for &(name, value) in fields {
			let size = value.size();
			result.push(Field {
				name,
				offset,
				size,
				value,
			});
			offset = offset.checked_add(size)?;
		}

		Some(LayoutInner {
			fields: result,
			size: offset,
		})
	}

	pub const fn size(&self) -> usize {
		self.size
	}

	pub fn field(&self, index: usize) -> Option<&Field> {
		self.fields.get(index)
	}

	pub fn find(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|field| field.name == name)
	}

	pub fn offset_of(&self, name: &str) -> Option<usize> {
		self.find(name).map(|field| field.offset)
	}

	pub fn set_i32(&self, target: &mut [u8], index: usize, value: i32) {
		let field = &self.fields[index];
		debug_assert!(target.len() >= self.size);
		debug_assert_eq!(field.value, FieldType::Int4);
		target[field.offset..field.offset + 4].copy_from_slice(&value.to_le_bytes());
	}

	pub fn get_i32(&self, source: &[u8], index: usize) -> i32 {
		let field = &self.fields[index];
		debug_assert!(source.len() >= self.size);
		debug_assert_eq!(field.value, FieldType::Int4);
		let mut bytes = [0u8; 4];
		bytes.copy_from_slice(&source[field.offset..field.offset + 4]);
		i32::from_le_bytes(bytes)
	}

	pub fn set_u16(&self, target: &mut [u8], index: usize, value: u16) {
		let field = &self.fields[index];
		debug_assert!(target.len() >= self.size);
		debug_assert_eq!(field.value, FieldType::Uint2);
		target[field.offset..field.offset + 2].copy_from_slice(&value.to_le_bytes());
	}

	pub fn get_u16(&self, source: &[u8], index: usize) -> u16 {
		let field = &self.fields[index];
		debug_assert!(source.len() >= self.size);
		debug_assert_eq!(field.value, FieldType::Uint2);
		u16::from_le_bytes([source[field.offset], source[field.offset + 1]])
	}

	pub fn bytes<'a>(&self, source: &'a [u8], index: usize) -> &'a [u8] {
		let field = &self.fields[index];
		debug_assert!(matches!(field.value, FieldType::Bytes(_)));
		&source[field.offset..field.offset + field.size]
	}

	pub fn bytes_mut<'a>(&self, target: &'a mut [u8], index: usize) -> &'a mut [u8] {
		let field = &self.fields[index];
		debug_assert!(matches!(field.value, FieldType::Bytes(_)));
		&mut target[field.offset..field.offset + field.size]
	}
}

#[cfg(test)]
mod tests {
	mod new {
		use crate::layout::{FieldType, Layout};

		#[test]
		fn test_packed_offsets() {
			let layout = Layout::new(&[
				("a", FieldType::Uint2),
				("b", FieldType::Int4),
				("c", FieldType::Bytes(3)),
				("d", FieldType::Uint2),
			])
			.unwrap();
			let offsets: Vec<usize> = layout.fields.iter().map(|f| f.offset).collect();
			assert_eq!(offsets, vec![0, 2, 6, 9]);
			assert_eq!(layout.size(), 11);
		}

		#[test]
		fn test_empty() {
			let layout = Layout::new(&[]).unwrap();
			assert_eq!(layout.size(), 0);
			assert!(layout.fields.is_empty());
			assert!(layout.field(0).is_none());
		}

		#[test]
		fn test_size_overflow() {
			assert!(Layout::new(&[("a", FieldType::Bytes(usize::MAX)), ("b", FieldType::Int4)]).is_none());
			assert!(Layout::new(&[("a", FieldType::Bytes(usize::MAX))]).is_some());
		}
	}

	mod frame_header {
		use crate::layout::{HEADER_ID, HEADER_NAME_LENGTH, Layout};

		#[test]
		fn test_six_bytes() {
			let header = Layout::frame_header();
			assert_eq!(header.size(), 6);
			assert_eq!(header.field(HEADER_ID).unwrap().offset, 0);
			assert_eq!(header.field(HEADER_NAME_LENGTH).unwrap().offset, 4);
			assert!(header.field(2).is_none());
			assert_eq!(header.offset_of("id"), Some(0));
			assert_eq!(header.offset_of("name_length"), Some(4));
			assert_eq!(header.offset_of("missing"), None);
		}

		#[test]
		fn test_shared_instance() {
			let a = Layout::frame_header();
			let b = Layout::frame_header();
			assert!(std::ptr::eq(&*a, &*b));
		}

		#[test]
		fn test_little_endian_encoding() {
			let header = Layout::frame_header();
			let mut buf = [0u8; 6];
			header.set_i32(&mut buf, HEADER_ID, 0x0403_0201);
			header.set_u16(&mut buf, HEADER_NAME_LENGTH, 0x0605);
			assert_eq!(buf, [1, 2, 3, 4, 5, 6]);
			assert_eq!(header.get_i32(&buf, HEADER_ID), 0x0403_0201);
			assert_eq!(header.get_u16(&buf, HEADER_NAME_LENGTH), 0x0605);
		}

		#[test]
		fn test_negative_id() {
			let header = Layout::frame_header();
			let mut buf = [0u8; 6];
			header.set_i32(&mut buf, HEADER_ID, -2);
			assert_eq!(&buf[..4], &[0xFE, 0xFF, 0xFF, 0xFF]);
			assert_eq!(header.get_i32(&buf, HEADER_ID), -2);
		}
	}

	mod slot {
		use crate::layout::{Layout, SLOT_FIELD_COUNT, SLOT_ID, SLOT_METHOD_COUNT, SLOT_NAME};

		#[test]
		fn test_stride() {
			let slot = Layout::slot(32).unwrap();
			assert_eq!(slot.size(), 4 + 32 + 2 + 2);
			assert_eq!(slot.field(SLOT_ID).unwrap().offset, 0);
			assert_eq!(slot.field(SLOT_NAME).unwrap().offset, 4);
			assert_eq!(slot.field(SLOT_FIELD_COUNT).unwrap().offset, 36);
			assert_eq!(slot.field(SLOT_METHOD_COUNT).unwrap().offset, 38);
			assert!(slot.field(99).is_none());
		}

		#[test]
		fn test_capacity_overflow() {
			assert!(Layout::slot(usize::MAX).is_none());
			assert!(Layout::slot(usize::MAX - 8).is_some());
		}

		#[test]
		fn test_bytes_window() {
			let slot = Layout::slot(4).unwrap();
			let mut buf = vec![0u8; slot.size()];
			slot.bytes_mut(&mut buf, SLOT_NAME).copy_from_slice(b"abc\0");
			assert_eq!(slot.bytes(&buf, SLOT_NAME), b"abc\0");
			assert_eq!(&buf[4..8], b"abc\0");
		}
	}
}
