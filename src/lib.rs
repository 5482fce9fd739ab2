//! proprdr - flat `key=value` property files with typed access and live refresh.
//!
//! This library provides:
//! - Parsing of property files (`#` comments, blank lines skipped)
//! - A [`PropertyStore`] with string, integer, float and boolean getters
//! - Change detection against the file's modification time
//! - Full refresh and single-key live reads
//!
//! # Example
//!
//! ```no_run
//! use proprdr::{FloatPrecision, PropertyStore};
//!
//! let mut store = PropertyStore::open("config.properties").unwrap();
//! let name = store.get("app.name").unwrap().to_string();
//! let amount = store.get_as_float("app.amount", FloatPrecision::F64).unwrap();
//! println!("{name}: {amount}");
//!
//! if store.has_changed().unwrap() {
//!     store.refresh().unwrap();
//! }
//! ```

pub mod error;
pub mod logging;
pub mod properties;

pub use error::{PropertyError, Result};
pub use properties::{FloatPrecision, Properties, PropertyStore, Staleness, UpdatedValue};
