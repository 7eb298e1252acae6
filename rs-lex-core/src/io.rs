use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically replaces the file at `path` with `bytes`.
///
/// Writes into a named temporary file in the destination directory, then
/// renames it over `path`. Readers either see the previous snapshot or the
/// new one, never a partial write.
///
/// # Notes
/// - Missing parent directories are created.
/// - The temporary file lives next to the destination so the final rename
///   stays on one filesystem.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();

	let parent = match path.parent() {
		Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
		_ => std::env::current_dir()?,
	};
	fs::create_dir_all(&parent)?;

	let mut file = NamedTempFile::new_in(&parent)?;
	file.write_all(bytes)?;
	file.persist(path).map_err(|e| e.error)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn write_atomic_creates_parent_directories() {
		let dir = tempfile::tempdir().expect("tempdir");
		let target = dir.path().join("nested/deeper/snapshot.db");

		write_atomic(&target, b"payload").expect("write");
		assert_eq!(fs::read(&target).expect("read"), b"payload");
	}

	#[test]
	fn write_atomic_replaces_existing_content() {
		let dir = tempfile::tempdir().expect("tempdir");
		let target = dir.path().join("snapshot.db");

		write_atomic(&target, b"first").expect("first write");
		write_atomic(&target, b"second").expect("second write");
		assert_eq!(fs::read(&target).expect("read"), b"second");
	}
}
