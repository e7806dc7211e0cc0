// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Minimal binary record format for `(id, name)` records.
//!
//! Two encodings are provided:
//! - [`frame`]: variable-width frames `[id: i32][name_length: u16][name][0x00]`, laid out back to back and read
//!   sequentially. Full fidelity, no random access.
//! - [`slot`]: fixed-stride slots `[id: i32][name: cap bytes][field_count: u16][method_count: u16]`. Names are
//!   truncated to `cap - 1` bytes, any slot is reachable in O(1).
//!
//! Both write into [`Region`](recframe_arena::Region)s owned by an [`Arena`](recframe_arena::Arena).

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use cursor::{Cursor, Overrun};
pub use diagnostic::{Diagnostic, IntoDiagnostic};
pub use error::FrameError;
pub use frame::{
	EncodedRegion, FRAME_HEADER_SIZE, FrameDecoder, FrameEncoder, FrameFormat, FrameRef, MAX_NAME_BYTES,
	Terminator, decode, encode,
};
pub use hex::hex_dump;
pub use layout::{Field, FieldType, Layout};
pub use record::Record;
pub use slot::{IndexedRegion, IndexedSlot, SlotLayout, encode_indexed, get_slot, truncate_name};

pub type Result<T> = std::result::Result<T, FrameError>;

mod cursor;
mod diagnostic;
mod error;
pub mod frame;
mod hex;
pub mod layout;
mod record;
pub mod slot;
