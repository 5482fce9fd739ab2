//! Single-key lookup straight from the source file.
//!
//! Matching is by raw line prefix: the first non-comment line whose text
//! starts with the requested key wins. A key that is a prefix of another
//! key (`app.port` vs `app.portal=...`) can therefore pick up the longer
//! key's line if it appears first. Keys written with leading whitespace
//! are never matched.

use crate::error::{PropertyError, Result};
use crate::properties::parser::{is_skipped, split_entry};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scan the file at `path` for `key` and return its current value.
///
/// Returns `Ok(None)` when no line matches before end of input.
pub fn find_property_file(path: &Path, key: &str) -> Result<Option<String>> {
	let file = File::open(path).map_err(|source| PropertyError::unavailable(path, source))?;
	find_property_reader(BufReader::new(file), key, path)
}

/// Scan a buffered reader for `key`, stopping at the first match.
pub fn find_property_reader<R: BufRead>(
	reader: R,
	key: &str,
	path: &Path,
) -> Result<Option<String>> {
	for (index, line) in reader.lines().enumerate() {
		let line = line.map_err(|source| PropertyError::unavailable(path, source))?;

		if is_skipped(&line) || !line.starts_with(key) {
			continue;
		}

		let (_, value) = split_entry(&line).ok_or_else(|| PropertyError::MalformedLine {
			path: path.to_path_buf(),
			line_number: index + 1,
			line: line.clone(),
		})?;

		return Ok(Some(value.to_string()));
	}

	Ok(None)
}
