//! Per-key merge of pod Sections
//!
//! `merge_sections` combines two Sections with override-wins semantics,
//! but four key families carry their own strategy:
//!
//! - `containers`: deep merge per container; mapping-valued fields (env,
//!   resources, ...) merge key-by-key so adding an env var does not wipe
//!   the others
//! - `volumes`, `configmaps`, `secrets`: list merge by `name`; an override
//!   entry replaces the base entry with the same name, everything else from
//!   both sides is kept (base entries first, then override entries)
//! - `tolerations`: concatenate base then override, no dedup
//! - everything else: override wins outright
//!
//! The strategy for a key is resolved through a lookup table, so a new
//! specially-merged key is a single table entry.

use crate::section::{Section, key};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;

/// How one Section key combines with the same key from an override layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Per-container deep merge (`containers`).
    DeepMergeContainers,
    /// List merge keyed on each entry's `name` field.
    MergeListByName,
    /// Base list followed by override list, duplicates preserved.
    Concatenate,
    /// Override value replaces the base value outright.
    Override,
}

/// Keys with non-default merge behavior.
const STRATEGY_TABLE: &[(&str, MergeStrategy)] = &[
    ("containers", MergeStrategy::DeepMergeContainers),
    ("volumes", MergeStrategy::MergeListByName),
    ("configmaps", MergeStrategy::MergeListByName),
    ("secrets", MergeStrategy::MergeListByName),
    ("tolerations", MergeStrategy::Concatenate),
];

/// Resolve the merge strategy for a Section key.
pub fn strategy_for(section_key: &str) -> MergeStrategy {
    STRATEGY_TABLE
        .iter()
        .find(|(k, _)| *k == section_key)
        .map_or(MergeStrategy::Override, |(_, strategy)| *strategy)
}

/// Merge two pod Sections. `overlay` wins over `base`.
///
/// Total function: never fails, never mutates its inputs, and always
/// returns a new Section. Keys present only in `base` carry through
/// unchanged.
pub fn merge_sections(base: &Section, overlay: &Section) -> Section {
    if base.is_empty() {
        return overlay.clone();
    }
    if overlay.is_empty() {
        return base.clone();
    }

    let mut result = base.clone();
    for (k, value) in overlay {
        let strategy = k.as_str().map_or(MergeStrategy::Override, strategy_for);
        let merged = match strategy {
            MergeStrategy::DeepMergeContainers => merge_containers(result.get(k), value),
            MergeStrategy::MergeListByName => merge_list_by_name(result.get(k), value),
            MergeStrategy::Concatenate => concatenate(result.get(k), value),
            MergeStrategy::Override => value.clone(),
        };
        result.insert(k.clone(), merged);
    }
    result
}

/// Deep merge the `containers` mapping.
///
/// An override container definition merges field-by-field into an existing
/// base definition; a new container name, or a non-mapping definition on
/// either side, replaces wholesale.
fn merge_containers(base: Option<&Value>, overlay: &Value) -> Value {
    let Some(overlay_map) = overlay.as_mapping() else {
        return overlay.clone();
    };

    let mut merged = base
        .and_then(Value::as_mapping)
        .cloned()
        .unwrap_or_default();
    for (name, definition) in overlay_map {
        let combined = match (
            merged.get(name).and_then(Value::as_mapping),
            definition.as_mapping(),
        ) {
            (Some(existing), Some(incoming)) => {
                Value::Mapping(merge_container_fields(existing, incoming))
            }
            _ => definition.clone(),
        };
        merged.insert(name.clone(), combined);
    }
    Value::Mapping(merged)
}

/// Merge one container definition into another, field by field.
///
/// Mapping-valued fields (env, resources, ...) merge key-by-key with the
/// incoming side winning per inner key; any other field value replaces the
/// base field outright. No field present on either side is ever dropped.
fn merge_container_fields(base: &Mapping, incoming: &Mapping) -> Mapping {
    let mut merged = base.clone();
    for (field, value) in incoming {
        let combined = match (merged.get(field).and_then(Value::as_mapping), value.as_mapping()) {
            (Some(existing), Some(overlay)) => {
                let mut sub = existing.clone();
                for (k, v) in overlay {
                    sub.insert(k.clone(), v.clone());
                }
                Value::Mapping(sub)
            }
            _ => value.clone(),
        };
        merged.insert(field.clone(), combined);
    }
    merged
}

/// List merge keyed on each entry's `name` field.
///
/// Base entries whose name reappears in the override list are dropped;
/// both sides keep their internal order, base first. Entries without a
/// `name` are never matched by identity and pass straight through.
fn merge_list_by_name(base: Option<&Value>, overlay: &Value) -> Value {
    let base_list = base
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();
    let overlay_list = overlay
        .as_sequence()
        .cloned()
        .unwrap_or_default();

    let overlay_names: HashSet<String> = overlay_list
        .iter()
        .filter_map(entry_name)
        .map(str::to_owned)
        .collect();

    let mut result: Vec<Value> = base_list
        .into_iter()
        .filter(|entry| entry_name(entry).is_none_or(|name| !overlay_names.contains(name)))
        .collect();
    result.extend(overlay_list);
    Value::Sequence(result)
}

/// Base list followed by override list, duplicates preserved.
fn concatenate(base: Option<&Value>, overlay: &Value) -> Value {
    let mut result = base
        .and_then(Value::as_sequence)
        .cloned()
        .unwrap_or_default();
    if let Some(overlay_list) = overlay.as_sequence() {
        result.extend(overlay_list.iter().cloned());
    }
    Value::Sequence(result)
}

/// The `name` field of a list entry, when the entry is a named mapping.
fn entry_name(entry: &Value) -> Option<&str> {
    entry
        .as_mapping()
        .and_then(|m| m.get(&key("name")))
        .and_then(Value::as_str)
}
