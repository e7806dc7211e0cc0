// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scope-bound memory for encoded record regions.
//!
//! An [`Arena`] owns every [`Region`] it hands out. Regions borrow the arena,
//! so the borrow checker rejects any attempt to keep one after the arena is
//! dropped, and all regions are released together when the arena goes away.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::AllocationError;
pub use region::Region;

mod arena;
mod config;
mod error;
mod region;
