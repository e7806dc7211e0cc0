// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	ffi::{CStr, CString, c_char, c_long},
	fmt,
	path::Path,
	ptr::NonNull,
	slice,
	str::Utf8Error,
};

use tracing::trace;

use crate::{
	NativeError, Result,
	ffi::{FileDataFFI, recframe_free_file_data, recframe_free_string, recframe_hello, recframe_read_file},
};

/// Owns a [`FileDataFFI`] allocated by the C reader. Dropping the handle releases it.
#[must_use]
pub struct ForeignFileData {
	ptr: NonNull<FileDataFFI>,
}

impl ForeignFileData {
	/// Reads up to `max_size` bytes of `path` through [`recframe_read_file`].
	pub fn read(path: &Path, max_size: u64) -> Result<Self> {
		let invalid = || NativeError::InvalidPath {
			path: path.to_path_buf(),
		};
		let name = path.to_str().ok_or_else(invalid)?;
		let name = CString::new(name).map_err(|_| invalid())?;
		let max_size = c_long::try_from(max_size).unwrap_or(c_long::MAX);

		let raw = unsafe { recframe_read_file(name.as_ptr(), max_size) };
		let ptr = NonNull::new(raw).ok_or_else(|| NativeError::ReadFailed {
			path: path.to_path_buf(),
		})?;
		trace!(path = %path.display(), "acquired foreign file data");
		Ok(Self {
			ptr,
		})
	}

	fn data(&self) -> &FileDataFFI {
		unsafe { self.ptr.as_ref() }
	}

	pub fn lines(&self) -> u64 {
		u64::try_from(self.data().lines).unwrap_or(0)
	}

	pub fn bytes(&self) -> u64 {
		u64::try_from(self.data().bytes).unwrap_or(0)
	}

	pub fn name(&self) -> &CStr {
		unsafe { CStr::from_ptr(self.data().name) }
	}

	pub fn content(&self) -> &[u8] {
		let data = self.data();
		unsafe { slice::from_raw_parts(data.content.cast::<u8>(), self.bytes() as usize) }
	}

	/// Releases the foreign memory now rather than at end of scope.
	pub fn release(self) {
		drop(self)
	}
}

impl Drop for ForeignFileData {
	fn drop(&mut self) {
		unsafe { recframe_free_file_data(self.ptr.as_ptr()) };
	}
}

impl fmt::Debug for ForeignFileData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ForeignFileData")
			.field("name", &self.name())
			.field("lines", &self.lines())
			.field("bytes", &self.bytes())
			.finish()
	}
}

/// Owns a NUL-terminated string allocated by the C side. Dropping the handle releases it.
#[must_use]
pub struct ForeignString {
	ptr: NonNull<c_char>,
}

impl ForeignString {
	pub fn hello() -> Result<Self> {
		let ptr = NonNull::new(recframe_hello()).ok_or(NativeError::OutOfMemory)?;
		Ok(Self {
			ptr,
		})
	}

	pub fn as_c_str(&self) -> &CStr {
		unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
	}

	pub fn to_str(&self) -> std::result::Result<&str, Utf8Error> {
		self.as_c_str().to_str()
	}

	pub fn release(self) {
		drop(self)
	}
}

impl Drop for ForeignString {
	fn drop(&mut self) {
		unsafe { recframe_free_string(self.ptr.as_ptr()) };
	}
}

impl fmt::Debug for ForeignString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ForeignString").field(&self.as_c_str()).finish()
	}
}
