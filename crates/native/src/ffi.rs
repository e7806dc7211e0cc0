// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! C ABI over the C allocator.
//!
//! Every non-null pointer returned here was allocated with `malloc` and must be passed back to its paired
//! release function exactly once: [`recframe_free_file_data`] for [`FileDataFFI`], [`recframe_free_string`] for
//! strings. Failures are reported as NULL.

use std::{
	ffi::{CStr, c_char, c_int, c_long},
	fs::File,
	io::Read,
	ptr,
	sync::atomic::{AtomicUsize, Ordering},
};

use tracing::debug;

static LIVE: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn live_allocations() -> usize {
	LIVE.load(Ordering::SeqCst)
}

/// File contents and metadata, laid out as `struct file_data { int lines; long bytes; char* name; char* content; }`.
#[repr(C)]
#[derive(Debug)]
pub struct FileDataFFI {
	/// 0 for empty content, otherwise 1 + the number of `\n` bytes
	pub lines: c_int,
	/// Bytes held in `content`, excluding its terminator
	pub bytes: c_long,
	/// NUL-terminated copy of the requested path
	pub name: *mut c_char,
	/// `bytes` bytes of file content followed by a NUL
	pub content: *mut c_char,
}

/// Reads at most `max_size` bytes of the file at `name`.
///
/// Returns NULL if `name` is NULL, `max_size` is negative, the file cannot be read, or allocation fails.
///
/// # Safety
///
/// `name` must be NULL or point to a NUL-terminated string that stays valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recframe_read_file(name: *const c_char, max_size: c_long) -> *mut FileDataFFI {
	if name.is_null() || max_size < 0 {
		return ptr::null_mut();
	}

	let name = unsafe { CStr::from_ptr(name) };
	let Ok(path) = name.to_str() else {
		debug!("file name is not valid UTF-8");
		return ptr::null_mut();
	};

	let content = match read_capped(path, max_size as u64) {
		Ok(content) => content,
		Err(err) => {
			debug!(path, %err, "failed to read file");
			return ptr::null_mut();
		}
	};

	let Ok(bytes) = c_long::try_from(content.len()) else {
		return ptr::null_mut();
	};

	unsafe {
		let name_copy = malloc_c_string(name.to_bytes());
		if name_copy.is_null() {
			return ptr::null_mut();
		}

		let content_copy = malloc_c_string(&content);
		if content_copy.is_null() {
			libc::free(name_copy.cast());
			return ptr::null_mut();
		}

		let data = libc::malloc(size_of::<FileDataFFI>()).cast::<FileDataFFI>();
		if data.is_null() {
			libc::free(name_copy.cast());
			libc::free(content_copy.cast());
			return ptr::null_mut();
		}

		data.write(FileDataFFI {
			lines: count_lines(&content),
			bytes,
			name: name_copy,
			content: content_copy,
		});

		LIVE.fetch_add(1, Ordering::SeqCst);
		data
	}
}

/// Releases a [`FileDataFFI`] returned by [`recframe_read_file`], including its `name` and `content`.
///
/// # Safety
///
/// `data` must be NULL or a pointer returned by [`recframe_read_file`] that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recframe_free_file_data(data: *mut FileDataFFI) {
	if data.is_null() {
		return;
	}

	unsafe {
		libc::free((*data).name.cast());
		libc::free((*data).content.cast());
		libc::free(data.cast());
	}
	LIVE.fetch_sub(1, Ordering::SeqCst);
}

/// Returns a newly allocated `"hello"`, or NULL if allocation fails.
#[unsafe(no_mangle)]
pub extern "C" fn recframe_hello() -> *mut c_char {
	let result = unsafe { malloc_c_string(b"hello") };
	if !result.is_null() {
		LIVE.fetch_add(1, Ordering::SeqCst);
	}
	result
}

/// Releases a string returned by [`recframe_hello`].
///
/// # Safety
///
/// `value` must be NULL or a pointer returned by [`recframe_hello`] that has not been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn recframe_free_string(value: *mut c_char) {
	if value.is_null() {
		return;
	}

	unsafe { libc::free(value.cast()) };
	LIVE.fetch_sub(1, Ordering::SeqCst);
}

fn read_capped(path: &str, max_size: u64) -> std::io::Result<Vec<u8>> {
	let file = File::open(path)?;
	let mut content = Vec::new();
	file.take(max_size).read_to_end(&mut content)?;
	Ok(content)
}

fn count_lines(content: &[u8]) -> c_int {
	if content.is_empty() {
		return 0;
	}
	let newlines = content.iter().filter(|&&b| b == b'\n').count();
	c_int::try_from(newlines.saturating_add(1)).unwrap_or(c_int::MAX)
}

// Copies `bytes` into a `malloc`ed buffer of `bytes.len() + 1` and terminates it with a NUL.
unsafe fn malloc_c_string(bytes: &[u8]) -> *mut c_char {
	unsafe {
		let target = libc::malloc(bytes.len() + 1).cast::<u8>();
		if target.is_null() {
			return ptr::null_mut();
		}
		ptr::copy_nonoverlapping(bytes.as_ptr(), target, bytes.len());
		target.add(bytes.len()).write(0);
		target.cast()
	}
}
