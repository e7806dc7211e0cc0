// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::PathBuf;

use recframe_core::{Diagnostic, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub enum NativeError {
	#[error("`{}` is not a directory", path.display())]
	NotADirectory {
		path: PathBuf,
	},

	#[error("path `{}` cannot be passed to the C reader", path.display())]
	InvalidPath {
		path: PathBuf,
	},

	#[error("C reader returned no data for `{}`", path.display())]
	ReadFailed {
		path: PathBuf,
	},

	#[error("C allocator returned no memory")]
	OutOfMemory,
}

impl NativeError {
	pub fn code(&self) -> &'static str {
		match self {
			NativeError::NotADirectory {
				..
			} => "NATIVE_001",
			NativeError::InvalidPath {
				..
			} => "NATIVE_002",
			NativeError::ReadFailed {
				..
			} => "NATIVE_003",
			NativeError::OutOfMemory => "NATIVE_004",
		}
	}
}

impl IntoDiagnostic for NativeError {
	fn into_diagnostic(self) -> Diagnostic {
		let help = match &self {
			NativeError::NotADirectory {
				..
			} => Some("pass an existing directory".to_string()),
			NativeError::InvalidPath {
				..
			} => Some("paths must be UTF-8 without NUL bytes".to_string()),
			NativeError::ReadFailed {
				..
			} => Some("check that the file exists and is readable".to_string()),
			NativeError::OutOfMemory => None,
		};

		Diagnostic {
			code: self.code().to_string(),
			message: self.to_string(),
			offset: None,
			label: None,
			help,
			notes: vec![],
		}
	}
}
