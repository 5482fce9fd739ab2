use crate::error::{PropertyError, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

/// Parsed contents of a property file, keyed by property name.
pub type Properties = BTreeMap<String, String>;

/// Lines starting with this prefix are comments.
pub const COMMENT_PREFIX: char = '#';

/// Separator between key and value.
pub const SEPARATOR: char = '=';

/// Parse a property file from the given path.
pub fn parse_properties_file(path: &Path) -> Result<Properties> {
	let file = File::open(path).map_err(|source| PropertyError::unavailable(path, source))?;
	parse_properties_reader(BufReader::new(file), path)
}

/// Parse properties from a string (useful for testing).
///
/// `path` is only used to label errors.
pub fn parse_properties_str(content: &str, path: &Path) -> Result<Properties> {
	parse_properties_reader(content.as_bytes(), path)
}

/// Parse properties from any buffered reader.
///
/// Comment and blank lines are skipped. Every other line is split on its
/// first `=`; both sides are trimmed. A later definition of a key replaces
/// an earlier one.
pub fn parse_properties_reader<R: BufRead>(reader: R, path: &Path) -> Result<Properties> {
	let mut properties = Properties::new();

	for (index, line) in reader.lines().enumerate() {
		let line = line.map_err(|source| PropertyError::unavailable(path, source))?;

		if is_skipped(&line) {
			trace!(line_number = index + 1, "skipping line");
			continue;
		}

		let (key, value) = split_entry(&line).ok_or_else(|| PropertyError::MalformedLine {
			path: path.to_path_buf(),
			line_number: index + 1,
			line: line.clone(),
		})?;

		properties.insert(key.to_string(), value.to_string());
	}

	Ok(properties)
}

/// Whether a raw line carries no entry (comment or blank).
///
/// Only a `#` in the very first column marks a comment.
pub(crate) fn is_skipped(line: &str) -> bool {
	line.starts_with(COMMENT_PREFIX) || line.trim().is_empty()
}

/// Split a line on its first separator into a trimmed key and value.
pub(crate) fn split_entry(line: &str) -> Option<(&str, &str)> {
	line.split_once(SEPARATOR)
		.map(|(key, value)| (key.trim(), value.trim()))
}
