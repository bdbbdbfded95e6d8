//! Deep merging of configuration values.
//!
//! The merge rules are asymmetric by type:
//!
//! - object + object: recursive merge, keys from both sides are kept
//! - array + array: concatenation, base elements first
//! - anything else: the overlay replaces the base wholesale

use crate::config::value::{ConfigMap, ConfigValue};

/// Merges configuration values according to the layering rules.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::config::ConfigMerger;
///
/// let base = json!({"excludes": ["*.log"], "depth": 1, "nested": {"a": 1}});
/// let overlay = json!({"excludes": ["target/"], "depth": 3, "nested": {"b": 2}});
///
/// let merged = ConfigMerger::merge(&base, &overlay);
/// assert_eq!(
///     merged,
///     json!({"excludes": ["*.log", "target/"], "depth": 3, "nested": {"a": 1, "b": 2}})
/// );
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge `overlay` on top of `base`, returning a new value.
    ///
    /// Neither operand is modified.
    #[must_use]
    pub fn merge(base: &ConfigValue, overlay: &ConfigValue) -> ConfigValue {
        let mut result = base.clone();
        Self::merge_into(&mut result, overlay);
        result
    }

    /// Merge two objects, returning a new object.
    #[must_use]
    pub fn merge_maps(base: &ConfigMap, overlay: &ConfigMap) -> ConfigMap {
        let mut result = base.clone();
        Self::merge_map_into(&mut result, overlay);
        result
    }

    /// Merge `overlay` into `target` in place.
    ///
    /// `target` must be a value the caller owns outright (typically a fresh
    /// copy); `overlay` is only read.
    pub fn merge_into(target: &mut ConfigValue, overlay: &ConfigValue) {
        match (target, overlay) {
            (ConfigValue::Object(target_map), ConfigValue::Object(overlay_map)) => {
                Self::merge_map_into(target_map, overlay_map);
            }
            (ConfigValue::Array(target_items), ConfigValue::Array(overlay_items)) => {
                target_items.extend(overlay_items.iter().cloned());
            }
            (target, overlay) => {
                *target = overlay.clone();
            }
        }
    }

    /// Object-level form of [`merge_into`](Self::merge_into).
    pub fn merge_map_into(target: &mut ConfigMap, overlay: &ConfigMap) {
        for (key, value) in overlay {
            match target.get_mut(key) {
                Some(existing) => Self::merge_into(existing, value),
                None => {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
    }
}
