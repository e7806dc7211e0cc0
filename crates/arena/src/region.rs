// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, DerefMut};

/// A contiguous, zero-initialised byte buffer owned by an [`Arena`](crate::Arena).
///
/// The `'arena` lifetime ties the region to the arena that allocated it.
#[derive(Debug)]
pub struct Region<'arena> {
	bytes: &'arena mut [u8],
}

impl<'arena> Region<'arena> {
	pub(crate) fn new(bytes: &'arena mut [u8]) -> Self {
		Self {
			bytes,
		}
	}

	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn as_slice(&self) -> &[u8] {
		self.bytes
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		self.bytes
	}

	/// Gives up write access, keeping the bytes readable for the arena's lifetime.
	pub fn freeze(self) -> &'arena [u8] {
		self.bytes
	}
}

impl Deref for Region<'_> {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		self.bytes
	}
}

impl DerefMut for Region<'_> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.bytes
	}
}
