use crate::error::PropertyError;

/// Bit precision used when parsing a float property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatPrecision {
	/// Parse as `f32`, then widen.
	F32,
	#[default]
	F64,
}

impl FloatPrecision {
	/// Map a bit count to a precision. Only 32 and 64 are supported.
	pub fn from_bits(bits: u32) -> Option<Self> {
		match bits {
			32 => Some(FloatPrecision::F32),
			64 => Some(FloatPrecision::F64),
			_ => None,
		}
	}

	pub fn bits(&self) -> u32 {
		match self {
			FloatPrecision::F32 => 32,
			FloatPrecision::F64 => 64,
		}
	}
}

/// Whether a store's snapshot may have diverged from its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
	/// File not modified since the last load or refresh.
	Fresh,
	/// File modified after the last load or refresh.
	PotentiallyStale,
}

/// Value returned by a live single-key read.
#[derive(Debug)]
pub struct UpdatedValue {
	/// The freshest value available.
	pub value: String,

	/// Why the live read failed, when `value` came from memory instead.
	pub stale: Option<PropertyError>,
}

impl UpdatedValue {
	pub fn is_stale(&self) -> bool {
		self.stale.is_some()
	}
}
