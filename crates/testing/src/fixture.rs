// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// `(id, name)` pairs whose frames occupy 28 bytes with terminators, 25 without.
pub const PROGRAMMING_LANGUAGES: &[(i32, &str)] = &[(1, "C"), (2, "Java"), (3, "Go")];

/// An ASCII name of exactly `len` bytes, cycling through the alphabet.
pub fn long_name(len: usize) -> String {
	(b'a'..=b'z').cycle().take(len).map(char::from).collect()
}
