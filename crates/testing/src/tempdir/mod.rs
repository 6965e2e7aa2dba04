// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// A uniquely named directory under the system temp dir, removed on drop.
pub struct TempDir {
	path: PathBuf,
}

impl TempDir {
	pub fn new() -> io::Result<Self> {
		let path = env::temp_dir().join(format!("pgcolumnar-{}", Uuid::new_v4()));
		fs::create_dir(&path)?;
		Ok(Self {
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

/// Runs `f` with a fresh directory; the directory is gone once this returns or unwinds.
pub fn temp_dir<F, T>(f: F) -> io::Result<T>
where
	F: FnOnce(&Path) -> io::Result<T>,
{
	let dir = TempDir::new()?;
	f(dir.path())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_removed_after_use() {
		let path = temp_dir(|dir| {
			fs::write(dir.join("a.txt"), b"x")?;
			Ok(dir.to_path_buf())
		})
		.unwrap();
		assert!(!path.exists());
	}

	#[test]
	fn test_unique() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		assert_ne!(a.path(), b.path());
		assert!(a.path().is_dir());
	}
}
