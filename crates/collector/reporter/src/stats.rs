//! The nested [`Stats`] tree produced by a source on every tick.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// `type_instance -> value`
pub type TypeInstances = BTreeMap<String, f64>;

/// `type -> type_instance -> value`
pub type Types = BTreeMap<String, TypeInstances>;

/// `plugin_instance -> type -> type_instance -> value`
pub type PluginInstances = BTreeMap<String, Types>;

/// Gauge values keyed by `plugin -> plugin_instance -> type -> type_instance`.
///
/// Only fully nested values are leaves; a branch that stops short of the fourth level yields
/// nothing. Keys iterate in lexicographic order at every level.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stats(BTreeMap<String, PluginInstances>);

/// One fully nested value of a [`Stats`] tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatLeaf<'a> {
    /// First level key.
    pub plugin: &'a str,
    /// Second level key.
    pub plugin_instance: &'a str,
    /// Third level key.
    pub type_name: &'a str,
    /// Fourth level key.
    pub type_instance: &'a str,
    /// The gauge value.
    pub value: f64,
}

impl Stats {
    /// Creates an empty tree.
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets a value, creating the intermediate levels. Returns the previous value, if any.
    pub fn insert(
        &mut self,
        plugin: impl Into<String>,
        plugin_instance: impl Into<String>,
        type_name: impl Into<String>,
        type_instance: impl Into<String>,
        value: f64,
    ) -> Option<f64> {
        self.0
            .entry(plugin.into())
            .or_default()
            .entry(plugin_instance.into())
            .or_default()
            .entry(type_name.into())
            .or_default()
            .insert(type_instance.into(), value)
    }

    /// Returns the instances of `plugin`.
    pub fn plugin(&self, plugin: &str) -> Option<&PluginInstances> {
        self.0.get(plugin)
    }

    /// Number of top-level plugins.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no plugins at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates every fully nested value.
    pub fn leaves(&self) -> impl Iterator<Item = StatLeaf<'_>> {
        self.0.iter().flat_map(|(plugin, instances)| {
            instances.iter().flat_map(move |(plugin_instance, types)| {
                types.iter().flat_map(move |(type_name, type_instances)| {
                    type_instances.iter().map(move |(type_instance, value)| StatLeaf {
                        plugin: plugin.as_str(),
                        plugin_instance: plugin_instance.as_str(),
                        type_name: type_name.as_str(),
                        type_instance: type_instance.as_str(),
                        value: *value,
                    })
                })
            })
        })
    }
}

impl From<BTreeMap<String, PluginInstances>> for Stats {
    fn from(plugins: BTreeMap<String, PluginInstances>) -> Self {
        Self(plugins)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leaf() {
        let stats: Stats =
            serde_json::from_str(r#"{"nova": {"instance1": {"vcpus": {"used": 4}}}}"#).unwrap();

        let leaves: Vec<_> = stats.leaves().collect();
        assert_eq!(
            leaves,
            vec![StatLeaf {
                plugin: "nova",
                plugin_instance: "instance1",
                type_name: "vcpus",
                type_instance: "used",
                value: 4.0,
            }]
        );
        assert_eq!(stats.len(), 1);
    }

    #[test]
    fn test_partial_branches_have_no_leaves() {
        let stats: Stats = serde_json::from_str(
            r#"{
                "nova": {"instance1": {}},
                "glance": {"images": {"count": {}}},
                "cinder": {}
            }"#,
        )
        .unwrap();

        assert_eq!(stats.len(), 3);
        assert!(!stats.is_empty());
        assert_eq!(stats.leaves().count(), 0);
    }

    #[test]
    fn test_leaves_are_ordered_per_level() {
        let mut stats = Stats::new();
        stats.insert("nova", "b", "vcpus", "used", 2.0);
        stats.insert("glance", "images", "count", "total", 7.0);
        stats.insert("nova", "a", "vcpus", "used", 1.0);
        stats.insert("nova", "a", "memory", "used", 512.0);

        let order: Vec<_> = stats
            .leaves()
            .map(|leaf| {
                format!(
                    "{}.{}.{}.{}",
                    leaf.plugin, leaf.plugin_instance, leaf.type_name, leaf.type_instance
                )
            })
            .collect();
        assert_eq!(
            order,
            vec![
                "glance.images.count.total",
                "nova.a.memory.used",
                "nova.a.vcpus.used",
                "nova.b.vcpus.used",
            ]
        );
    }

    #[test]
    fn test_insert_overwrites() {
        let mut stats = Stats::new();
        assert_eq!(stats.insert("nova", "a", "vcpus", "used", 1.0), None);
        assert_eq!(stats.insert("nova", "a", "vcpus", "used", 3.0), Some(1.0));
        assert_eq!(stats.plugin("nova").map(|p| p.len()), Some(1));
        assert_eq!(stats.leaves().count(), 1);
    }

    #[test]
    fn test_leaf_at_wrong_depth_does_not_decode() {
        let result = serde_json::from_str::<Stats>(r#"{"nova": {"instance1": 4}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let mut stats = Stats::new();
        stats.insert("nova", "instance1", "vcpus", "used", 4.0);
        assert_eq!(stats.to_string(), r#"{"nova": {"instance1": {"vcpus": {"used": 4.0}}}}"#);
    }
}
