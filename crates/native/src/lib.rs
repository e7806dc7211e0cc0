// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Memory that belongs to the C allocator, and safe handles around it.
//!
//! [`ffi`] exports a small C ABI (`recframe_read_file`, `recframe_hello` and their release functions) whose
//! results are allocated with `malloc`. Rust callers never touch those pointers directly: [`ForeignFileData`]
//! and [`ForeignString`] own them and call the matching release function when dropped.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::NativeError;
pub use handle::{ForeignFileData, ForeignString};
pub use summary::{DEFAULT_SAMPLE_CONTENT_LIMIT, FileSummary, SummaryConfig, summarize_dir};

pub mod ffi;

mod error;
mod handle;
mod summary;

pub type Result<T> = std::result::Result<T, NativeError>;

/// Number of foreign allocations handed out by [`ffi`] and not yet released.
pub fn live_foreign_allocations() -> usize {
	ffi::live_allocations()
}
