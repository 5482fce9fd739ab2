use crate::error::{PropertyError, Result};
use crate::properties::lookup::find_property_file;
use crate::properties::parser::{Properties, parse_properties_file, parse_properties_str};
use crate::properties::types::{FloatPrecision, Staleness, UpdatedValue};
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, instrument, warn};

/// An in-memory snapshot of a property file with typed accessors.
///
/// The snapshot is taken when the store is opened and replaced only by
/// [`refresh`](Self::refresh), or patched one key at a time by
/// [`get_updated`](Self::get_updated). Nothing watches the file; callers
/// ask [`has_changed`](Self::has_changed) when they care.
///
/// Methods that mutate take `&mut self`. Sharing a store across threads
/// needs an outer lock.
#[derive(Debug, Clone)]
pub struct PropertyStore {
	path: PathBuf,
	created_at: SystemTime,
	entries: Properties,
}

impl PropertyStore {
	/// Parse the file at `path` and capture the load time.
	#[instrument(skip_all, fields(path = %path.as_ref().display()))]
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		// Taken before reading so an edit racing the read still shows up as a change.
		let created_at = SystemTime::now();
		let entries = parse_properties_file(path)?;

		debug!(entries = entries.len(), "loaded property file");

		Ok(PropertyStore {
			path: path.to_path_buf(),
			created_at,
			entries,
		})
	}

	/// Build a store from already-read `content` that still refers to `path`
	/// for change detection and refresh.
	pub fn from_content(content: &str, path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let created_at = SystemTime::now();
		let entries = parse_properties_str(content, path)?;

		Ok(PropertyStore {
			path: path.to_path_buf(),
			created_at,
			entries,
		})
	}

	/// The source file this store was loaded from.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// When the current snapshot was taken.
	pub fn created_at(&self) -> SystemTime {
		self.created_at
	}

	pub fn get(&self, key: &str) -> Result<&str> {
		self.entries
			.get(key)
			.map(String::as_str)
			.ok_or_else(|| PropertyError::not_found(key))
	}

	/// Get a property as a base-10 integer.
	pub fn get_as_int(&self, key: &str) -> Result<i64> {
		let value = self.get(key)?;
		value.parse().map_err(|source| PropertyError::InvalidInteger {
			key: key.to_string(),
			value: value.to_string(),
			source,
		})
	}

	/// Get a property as a float parsed at the given precision.
	pub fn get_as_float(&self, key: &str, precision: FloatPrecision) -> Result<f64> {
		let value = self.get(key)?;
		let parsed = match precision {
			FloatPrecision::F32 => value.parse::<f32>().map(f64::from),
			FloatPrecision::F64 => value.parse::<f64>(),
		};
		let parsed = parsed.map_err(|source| PropertyError::InvalidFloat {
			key: key.to_string(),
			value: value.to_string(),
			source,
		})?;

		// Overflow parses to infinity; only an infinite literal may produce one.
		if parsed.is_infinite() && !is_infinity_literal(value) {
			return Err(PropertyError::FloatOutOfRange {
				key: key.to_string(),
				value: value.to_string(),
				bits: precision.bits(),
			});
		}

		Ok(parsed)
	}

	/// Get a property as a boolean, surfacing missing keys and bad literals.
	///
	/// Accepts exactly `true` and `false`.
	pub fn try_get_as_bool(&self, key: &str) -> Result<bool> {
		let value = self.get(key)?;
		value.parse().map_err(|_| PropertyError::InvalidBoolean {
			key: key.to_string(),
			value: value.to_string(),
		})
	}

	/// Get a property as a boolean, defaulting to `false`.
	///
	/// Missing keys and values other than `true`/`false` both read as
	/// `false`. Use [`try_get_as_bool`](Self::try_get_as_bool) to tell them
	/// apart.
	pub fn get_as_bool(&self, key: &str) -> bool {
		self.try_get_as_bool(key).unwrap_or(false)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Number of entries in the snapshot.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Copy out every entry whose key starts with `prefix`.
	pub fn get_all(&self, prefix: &str) -> Properties {
		// Keys sharing a prefix sort contiguously, starting at the prefix itself.
		self.entries
			.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
			.take_while(|(key, _)| key.starts_with(prefix))
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect()
	}

	/// Keys in sorted order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Entries in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Whether the file was modified after the current snapshot was taken.
	pub fn has_changed(&self) -> Result<bool> {
		let modified = std::fs::metadata(&self.path)
			.and_then(|metadata| metadata.modified())
			.map_err(|source| PropertyError::unavailable(&self.path, source))?;

		Ok(modified > self.created_at)
	}

	pub fn staleness(&self) -> Result<Staleness> {
		if self.has_changed()? {
			Ok(Staleness::PotentiallyStale)
		} else {
			Ok(Staleness::Fresh)
		}
	}

	/// Re-parse the file and replace the whole snapshot.
	///
	/// On failure the previous snapshot and its timestamp are kept.
	#[instrument(skip(self), fields(path = %self.path.display()))]
	pub fn refresh(&mut self) -> Result<()> {
		let created_at = SystemTime::now();

		match parse_properties_file(&self.path) {
			Ok(entries) => {
				debug!(
					before = self.entries.len(),
					after = entries.len(),
					"refreshed property file"
				);
				self.entries = entries;
				self.created_at = created_at;
				Ok(())
			}
			Err(err) => {
				warn!(error = %err, "refresh failed, keeping previous snapshot");
				Err(err)
			}
		}
	}

	/// Refresh only if the file changed. Returns whether a refresh happened.
	pub fn refresh_if_changed(&mut self) -> Result<bool> {
		if !self.has_changed()? {
			return Ok(false);
		}
		self.refresh()?;
		Ok(true)
	}

	/// Re-read a single key from the file and patch it into the snapshot.
	///
	/// The key must already be in memory. When the live read fails, or the
	/// key can no longer be found in the file, the in-memory value is
	/// returned with the reason attached in [`UpdatedValue::stale`].
	///
	/// The live read takes the first line starting with `key`, so it can hit
	/// a longer key sharing the prefix. It also differs from a full load on
	/// duplicate keys: loading keeps the last definition, this keeps the
	/// first, so it may change the value even when the file has not.
	#[instrument(skip(self), fields(path = %self.path.display()))]
	pub fn get_updated(&mut self, key: &str) -> Result<UpdatedValue> {
		let path = &self.path;
		let Some(current) = self.entries.get_mut(key) else {
			return Err(PropertyError::not_found(key));
		};

		let stale = match find_property_file(path, key) {
			Ok(Some(value)) => {
				debug!("read live value");
				current.clone_from(&value);
				return Ok(UpdatedValue { value, stale: None });
			}
			Ok(None) => PropertyError::not_found(key),
			Err(err) => err,
		};

		warn!(error = %stale, "live read failed, returning in-memory value");
		Ok(UpdatedValue {
			value: current.clone(),
			stale: Some(stale),
		})
	}
}

fn is_infinity_literal(value: &str) -> bool {
	let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
	unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
