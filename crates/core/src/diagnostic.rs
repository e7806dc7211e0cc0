// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter, Write};

/// Human-facing description of a failure, with a stable `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub code: String,
	pub message: String,
	/// Byte offset into the region the failure refers to, if any.
	pub offset: Option<usize>,
	pub label: Option<String>,
	pub help: Option<String>,
	pub notes: Vec<String>,
}

pub trait IntoDiagnostic {
	fn into_diagnostic(self) -> Diagnostic;
}

impl Diagnostic {
	pub fn render(&self) -> String {
		let mut output = String::new();

		let _ = writeln!(&mut output, "error[{}]: {}", self.code, self.message);

		if let Some(offset) = self.offset {
			let _ = writeln!(
				&mut output,
				"  --> byte {} = {}",
				offset,
				self.label.as_deref().unwrap_or("region is not well formed")
			);
		}

		if let Some(help) = &self.help {
			let _ = writeln!(&mut output, "\nhelp: {}", help);
		}

		for note in &self.notes {
			let _ = writeln!(&mut output, "\nnote: {}", note);
		}

		output
	}
}

impl Display for Diagnostic {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}
