// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Runs `f` against a fresh directory under the system temp dir and removes it afterwards.
pub fn temp_dir<F>(f: F) -> std::io::Result<()>
where
	F: FnOnce(&Path) -> std::io::Result<()>,
{
	let mut path = env::temp_dir();
	path.push(format!("recframe-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

/// Writes `content` to `dir/relative`, creating parent directories as needed.
pub fn write_file(dir: &Path, relative: impl AsRef<Path>, content: impl AsRef<[u8]>) -> std::io::Result<PathBuf> {
	let path = dir.join(relative);
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	fs::write(&path, content)?;
	Ok(path)
}
