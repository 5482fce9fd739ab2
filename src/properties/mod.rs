//! Property file loading and querying.
//!
//! This module handles:
//! - Parsing flat `key=value` files
//! - Single-key lookups straight from disk
//! - The in-memory store with change detection and refresh

pub mod lookup;
pub mod parser;
pub mod store;
pub mod types;

pub use lookup::{find_property_file, find_property_reader};
pub use parser::{Properties, parse_properties_file, parse_properties_reader, parse_properties_str};
pub use store::PropertyStore;
pub use types::{FloatPrecision, Staleness, UpdatedValue};
