use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

/// Library-level structured errors for proprdr.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
	#[error("Property file unavailable: {path}")]
	ResourceUnavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Malformed line {line_number} in {path}: missing '=' in {line:?}")]
	MalformedLine {
		path: PathBuf,
		line_number: usize,
		line: String,
	},

	#[error("Property not found: {key}")]
	PropertyNotFound { key: String },

	#[error("Property {key} is not an integer: {value:?}")]
	InvalidInteger {
		key: String,
		value: String,
		#[source]
		source: ParseIntError,
	},

	#[error("Property {key} is not a float: {value:?}")]
	InvalidFloat {
		key: String,
		value: String,
		#[source]
		source: ParseFloatError,
	},

	#[error("Property {key} is out of range for a {bits}-bit float: {value:?}")]
	FloatOutOfRange { key: String, value: String, bits: u32 },

	#[error("Property {key} is not a boolean: {value:?}")]
	InvalidBoolean { key: String, value: String },
}

impl PropertyError {
	/// True for errors raised while converting a string value to a number.
	pub fn is_conversion(&self) -> bool {
		matches!(
			self,
			PropertyError::InvalidInteger { .. }
				| PropertyError::InvalidFloat { .. }
				| PropertyError::FloatOutOfRange { .. }
		)
	}

	pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		PropertyError::ResourceUnavailable {
			path: path.into(),
			source,
		}
	}

	pub(crate) fn not_found(key: &str) -> Self {
		PropertyError::PropertyNotFound {
			key: key.to_string(),
		}
	}
}

/// Result type alias using PropertyError.
pub type Result<T> = std::result::Result<T, PropertyError>;
