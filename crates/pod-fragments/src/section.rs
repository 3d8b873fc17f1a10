//! Section mapping type and key helpers
//!
//! A Section is one layer of pod configuration: an ordered mapping from
//! string key to YAML value. Sections come straight out of parsed fragment
//! documents, so the representation stays `serde_yaml::Mapping` and the
//! helpers below paper over its `Value`-keyed API.

use serde_yaml::{Mapping, Value};

/// One layer of pod configuration.
///
/// Insertion order is preserved, so container order and list order survive
/// merging.
pub type Section = Mapping;

/// Build a mapping key from a string.
pub fn key(k: &str) -> Value {
    Value::String(k.to_owned())
}

/// Look up a string key in a section.
pub fn get<'a>(section: &'a Section, k: &str) -> Option<&'a Value> {
    section.get(&key(k))
}

/// Look up a string key, expecting a string value.
pub fn get_str<'a>(section: &'a Section, k: &str) -> Option<&'a str> {
    get(section, k).and_then(Value::as_str)
}

/// Look up a string key, expecting a mapping value.
pub fn get_mapping<'a>(section: &'a Section, k: &str) -> Option<&'a Mapping> {
    get(section, k).and_then(Value::as_mapping)
}

/// Look up a string key, expecting a sequence value.
pub fn get_sequence<'a>(section: &'a Section, k: &str) -> Option<&'a Vec<Value>> {
    get(section, k).and_then(Value::as_sequence)
}
