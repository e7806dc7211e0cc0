// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

const BYTES_PER_LINE: usize = 16;

/// Formats `bytes` as upper-case hex pairs, 16 per line, each line prefixed with its offset.
pub fn hex_dump(bytes: &[u8]) -> String {
	let mut output = String::with_capacity(bytes.len() * 3 + bytes.len() / BYTES_PER_LINE * 8);

	for (line, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
		let _ = write!(&mut output, "{:06X} ", line * BYTES_PER_LINE);
		for (i, byte) in chunk.iter().enumerate() {
			if i > 0 {
				output.push(' ');
			}
			let _ = write!(&mut output, "{:02X}", byte);
		}
		output.push('\n');
	}

	output
}
