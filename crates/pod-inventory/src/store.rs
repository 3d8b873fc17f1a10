//! Inventory store interface and in-memory implementation
//!
//! The enclosing inventory system is a collaborator: this crate only
//! needs group/host/variable primitives plus group-name visibility for
//! collision detection, so that is the whole trait surface.

use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Mutable inventory state, as seen by the Host Expander.
pub trait InventoryStore {
    /// Ensure a group exists.
    fn add_group(&mut self, name: &str);

    /// Ensure a host exists.
    fn add_host(&mut self, name: &str);

    /// Add a member to a group, creating the group if needed.
    fn add_child(&mut self, group: &str, member: &str);

    /// Set a host variable.
    fn set_variable(&mut self, host: &str, key: &str, value: Value);

    /// Whether a group with this name already exists.
    fn has_group(&self, name: &str) -> bool;
}

/// In-memory inventory with ordered state, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    groups: BTreeMap<String, BTreeSet<String>>,
    hosts: BTreeSet<String>,
    variables: BTreeMap<String, BTreeMap<String, Value>>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Members of a group, if the group exists.
    pub fn group_members(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.groups.get(group)
    }

    /// All known hosts.
    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    /// One variable of one host.
    pub fn variable(&self, host: &str, key: &str) -> Option<&Value> {
        self.variables.get(host).and_then(|vars| vars.get(key))
    }

    /// All variables of one host.
    pub fn host_variables(&self, host: &str) -> Option<&BTreeMap<String, Value>> {
        self.variables.get(host)
    }
}

impl InventoryStore for MemoryInventory {
    fn add_group(&mut self, name: &str) {
        self.groups.entry(name.to_owned()).or_default();
    }

    fn add_host(&mut self, name: &str) {
        self.hosts.insert(name.to_owned());
    }

    fn add_child(&mut self, group: &str, member: &str) {
        self.groups
            .entry(group.to_owned())
            .or_default()
            .insert(member.to_owned());
    }

    fn set_variable(&mut self, host: &str, key: &str, value: Value) {
        self.variables
            .entry(host.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }

    fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_creates_the_group() {
        let mut inventory = MemoryInventory::new();
        inventory.add_child("k3s_pods", "web1");

        assert!(inventory.has_group("k3s_pods"));
        assert!(inventory.group_members("k3s_pods").unwrap().contains("web1"));
    }

    #[test]
    fn set_variable_overwrites() {
        let mut inventory = MemoryInventory::new();
        inventory.set_variable("web1", "ansible_connection", Value::from("ssh"));
        inventory.set_variable("web1", "ansible_connection", Value::from("sshkubectl"));

        assert_eq!(
            inventory.variable("web1", "ansible_connection"),
            Some(&Value::from("sshkubectl"))
        );
    }

    #[test]
    fn unknown_lookups_return_none() {
        let inventory = MemoryInventory::new();
        assert!(inventory.group_members("ghosts").is_none());
        assert!(inventory.variable("web1", "ansible_host").is_none());
        assert!(!inventory.has_group("ghosts"));
    }
}
