//! Layered configuration: a base object plus a stack of overlays.
//!
//! The effective configuration is computed by deep-merging, in order,
//! `base → layers[0] → … → layers[n-1]`, so later layers win conflicts.
//! Layers are pushed and popped in step with a depth-first directory walk;
//! [`LayerScope`] ties a pushed layer to a lexical scope so that it is
//! removed again when the scope ends.

use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::value::{ConfigMap, ConfigValue, DottedPath};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration key holding gitignore-style exclusion patterns.
pub const EXCLUDES_KEY: &str = "excludes";

// Shared by every LayeredConfig in the process so ids are never reused.
static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a layer.
///
/// Ids come from a process-wide counter: they are strictly increasing in
/// creation order across all [`LayeredConfig`] instances and are never
/// reused, even after the layer is removed. They render as `layer-NNNNNN`.
///
/// # Examples
///
/// ```
/// use strata::config::LayerId;
///
/// let id: LayerId = "layer-000042".parse().unwrap();
/// assert_eq!(id.sequence(), 42);
/// assert_eq!(id.to_string(), "layer-000042");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u64);

impl LayerId {
    fn next() -> Self {
        Self(NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The numeric position of this id in the process-wide sequence.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer-{:06}", self.0)
    }
}

impl FromStr for LayerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.strip_prefix("layer-")
            .and_then(|n| n.parse().ok())
            .map(Self)
            .ok_or_else(|| Error::InvalidLayerId { id: s.to_string() })
    }
}

/// One overlay on top of the base configuration.
///
/// A layer's data is fixed at creation and shared, not copied, when the
/// owning [`LayeredConfig`] is cloned.
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    source_path: PathBuf,
    data: Arc<ConfigMap>,
}

impl Layer {
    /// The layer's unique id.
    #[must_use]
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// Human-readable label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the data came from. Informational only.
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The overlay object.
    #[must_use]
    pub fn data(&self) -> &ConfigMap {
        &self.data
    }

    fn info(&self) -> LayerInfo {
        LayerInfo {
            id: self.id,
            name: self.name.clone(),
            source_path: self.source_path.clone(),
        }
    }
}

/// Metadata about an active layer, as returned by
/// [`LayeredConfig::list_layers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerInfo {
    /// The layer's id.
    pub id: LayerId,
    /// The layer's label.
    pub name: String,
    /// The layer's source.
    pub source_path: PathBuf,
}

/// A base configuration with an ordered stack of overlay layers.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata::config::LayeredConfig;
///
/// let base = json!({"excludes": ["*.log"], "title": "root"});
/// let mut config = LayeredConfig::new(base.as_object().unwrap().clone());
///
/// let overlay = json!({"excludes": ["!keep.log"], "title": "child"});
/// let id = config
///     .push_value(overlay.as_object().unwrap().clone(), "child", "child/summarize.json")
///     .unwrap();
///
/// assert_eq!(config.get("title", json!(null)).unwrap(), json!("child"));
/// assert_eq!(config.excludes().unwrap(), vec!["*.log", "!keep.log"]);
///
/// assert_eq!(config.pop_layer().unwrap().id(), id);
/// assert_eq!(config.get("title", json!(null)).unwrap(), json!("root"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    base: ConfigMap,
    layers: Vec<Layer>,
}

impl LayeredConfig {
    /// Creates a configuration with the given base and no layers.
    #[must_use]
    pub fn new(base: ConfigMap) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Creates a configuration whose base is loaded from `path`.
    ///
    /// # Errors
    ///
    /// See [`load_base`](Self::load_base).
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::default();
        config.load_base(path)?;
        Ok(config)
    }

    /// Replaces the base configuration with the contents of `path`.
    ///
    /// A missing file yields an empty base. Layers are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its root
    /// is not an object ([`Error::InvalidConfigRoot`]).
    pub fn load_base(&mut self, path: &Path) -> Result<()> {
        self.base = ConfigLoader::load_file(path)?;
        log::debug!("Loaded base configuration from {}", path.display());
        Ok(())
    }

    /// The base configuration.
    #[must_use]
    pub fn base(&self) -> &ConfigMap {
        &self.base
    }

    /// Loads `path` as a new overlay layer on top of the stack.
    ///
    /// The layer is named after the file unless `name` is given. If the file
    /// is missing or holds an empty object no layer is created and `None`
    /// is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if its root is not an object. The stack is unchanged on error.
    pub fn push_layer(&mut self, path: &Path, name: Option<&str>) -> Result<Option<LayerId>> {
        let data = ConfigLoader::load_file(path)?;
        let name = name.map_or_else(
            || {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            },
            str::to_string,
        );
        Ok(self.push_value(data, &name, path))
    }

    /// Pushes an in-memory object as a new overlay layer.
    ///
    /// Returns `None` without creating a layer if `data` is empty.
    pub fn push_value(
        &mut self,
        data: ConfigMap,
        name: &str,
        source_path: impl Into<PathBuf>,
    ) -> Option<LayerId> {
        if data.is_empty() {
            return None;
        }

        let layer = Layer {
            id: LayerId::next(),
            name: name.to_string(),
            source_path: source_path.into(),
            data: Arc::new(data),
        };
        let id = layer.id;
        log::debug!(
            "Pushed layer {id} ({}) from {}",
            layer.name,
            layer.source_path.display()
        );
        self.layers.push(layer);
        Some(id)
    }

    /// Removes and returns the most recently pushed layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLayerStack`] if there are no layers.
    pub fn pop_layer(&mut self) -> Result<Layer> {
        let layer = self.layers.pop().ok_or(Error::EmptyLayerStack)?;
        log::debug!("Popped layer {}", layer.id);
        Ok(layer)
    }

    /// Removes the layer with the given id, wherever it sits in the stack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LayerNotFound`] if no such layer exists.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<Layer> {
        let index = self
            .layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or_else(|| Error::LayerNotFound { id: id.to_string() })?;
        log::debug!("Removed layer {id}");
        Ok(self.layers.remove(index))
    }

    /// Removes all layers, keeping the base.
    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Metadata for every active layer, oldest first.
    #[must_use]
    pub fn list_layers(&self) -> Vec<LayerInfo> {
        self.layers.iter().map(Layer::info).collect()
    }

    /// Number of active layers.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layers are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Computes the fully merged configuration.
    ///
    /// Starts from a copy of the base and merges each layer, oldest first.
    /// Neither the base nor any layer is modified.
    #[must_use]
    pub fn effective(&self) -> ConfigValue {
        let mut merged = self.base.clone();
        for layer in &self.layers {
            ConfigMerger::merge_map_into(&mut merged, &layer.data);
        }
        ConfigValue::Object(merged)
    }

    /// Looks up a dotted path, returning `default` if it does not resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `dotted_path` is malformed.
    pub fn get(&self, dotted_path: &str, default: ConfigValue) -> Result<ConfigValue> {
        match self.require(dotted_path) {
            Err(e) if e.is_not_found() => Ok(default),
            other => other,
        }
    }

    /// Looks up a dotted path that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `dotted_path` is malformed, or
    /// [`Error::PathNotFound`] with the failing depth if it does not resolve.
    pub fn require(&self, dotted_path: &str) -> Result<ConfigValue> {
        let path = DottedPath::parse(dotted_path)?;
        let effective = self.effective();
        path.resolve(&effective).cloned()
    }

    /// Returns true if the dotted path resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `dotted_path` is malformed.
    pub fn has(&self, dotted_path: &str) -> Result<bool> {
        match self.require(dotted_path) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Looks up a dotted path and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is malformed or the value does not
    /// deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, dotted_path: &str, default: T) -> Result<T> {
        match self.require(dotted_path) {
            Ok(value) => Ok(serde_json::from_value(value)?),
            Err(e) if e.is_not_found() => Ok(default),
            Err(e) => Err(e),
        }
    }

    /// The merged `excludes` pattern list, empty if unset.
    ///
    /// # Errors
    ///
    /// Returns an error if `excludes` is not a list of strings.
    pub fn excludes(&self) -> Result<Vec<String>> {
        self.get_as(EXCLUDES_KEY, Vec::new())
    }

    /// Pushes the layer at `path` for the lifetime of the returned scope.
    ///
    /// The scope dereferences to this configuration, so nested scopes can be
    /// opened from it. When it is dropped, exactly the layer it pushed (if
    /// any) is removed.
    ///
    /// # Errors
    ///
    /// See [`push_layer`](Self::push_layer).
    pub fn scoped_layer(&mut self, path: &Path) -> Result<LayerScope<'_>> {
        let layer = self.push_layer(path, None)?;
        Ok(LayerScope {
            config: self,
            layer,
        })
    }
}

/// A layer that lives as long as a lexical scope.
///
/// Created by [`LayeredConfig::scoped_layer`].
pub struct LayerScope<'a> {
    config: &'a mut LayeredConfig,
    layer: Option<LayerId>,
}

impl LayerScope<'_> {
    /// The id of the layer this scope pushed, if the source was non-empty.
    #[must_use]
    pub fn layer_id(&self) -> Option<LayerId> {
        self.layer
    }
}

impl Deref for LayerScope<'_> {
    type Target = LayeredConfig;

    fn deref(&self) -> &LayeredConfig {
        &*self.config
    }
}

impl DerefMut for LayerScope<'_> {
    fn deref_mut(&mut self) -> &mut LayeredConfig {
        &mut *self.config
    }
}

impl Drop for LayerScope<'_> {
    fn drop(&mut self) {
        if let Some(id) = self.layer.take() {
            if let Err(e) = self.config.remove_layer(id) {
                log::warn!("Scoped layer already gone: {e}");
            }
        }
    }
}
