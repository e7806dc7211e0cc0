// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

/// One logical entry: a signed id and a UTF-8 name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
	pub id: i32,
	pub name: String,
}

impl Record {
	pub fn new(id: i32, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}
}

impl Display for Record {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "ID: {}, Name: {}", self.id, self.name)
	}
}

impl<S: Into<String>> From<(i32, S)> for Record {
	fn from((id, name): (i32, S)) -> Self {
		Record::new(id, name)
	}
}

#[cfg(test)]
mod tests {
	use crate::Record;

	#[test]
	fn test_display() {
		assert_eq!(Record::new(2, "Java").to_string(), "ID: 2, Name: Java");
	}

	#[test]
	fn test_from_tuple() {
		assert_eq!(Record::from((3, "Go")), Record::new(3, "Go".to_string()));
	}
}
