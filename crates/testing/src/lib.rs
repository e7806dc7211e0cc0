// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared fixtures for the workspace's tests.

pub mod fixture;
pub mod tempdir;

pub use fixture::{PROGRAMMING_LANGUAGES, long_name};
pub use tempdir::{temp_dir, write_file};
