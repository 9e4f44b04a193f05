//! Resource providers besides the built-in set.

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use jnibridge_core::{ConfigurationError, ResourceProvider};
use rustc_hash::FxHashMap;

/// Resources held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResources {
    entries: FxHashMap<String, String>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(path.into(), text.into());
    }

    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceProvider for InMemoryResources {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        self.entries
            .get(path)
            .map(|text| Cow::Borrowed(text.as_str()))
            .ok_or_else(|| ConfigurationError::missing_resource(path, "not registered"))
    }
}

/// Resources read from files below a root directory.
///
/// Paths are relative and may not escape the root.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ConfigurationError> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(ConfigurationError::missing_resource(
                path,
                "path must be relative to the resource root",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceProvider for DirectoryResources {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        let file = self.resolve(path)?;
        std::fs::read_to_string(&file)
            .map(Cow::Owned)
            .map_err(|e| ConfigurationError::missing_resource(path, e.to_string()))
    }
}

/// Tries each provider in order; the first that has the path wins.
#[derive(Default)]
pub struct LayeredResources<'a> {
    layers: Vec<Box<dyn ResourceProvider + 'a>>,
}

impl<'a> LayeredResources<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a layer with lower priority than every existing one.
    pub fn with_layer(mut self, provider: impl ResourceProvider + 'a) -> Self {
        self.layers.push(Box::new(provider));
        self
    }
}

impl std::fmt::Debug for LayeredResources<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredResources")
            .field("layers", &self.layers.len())
            .finish()
    }
}

impl ResourceProvider for LayeredResources<'_> {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        let mut last = ConfigurationError::missing_resource(path, "no resource layers");
        for layer in &self.layers {
            match layer.load(path) {
                Ok(text) => return Ok(text),
                Err(e) => last = e,
            }
        }
        Err(last)
    }
}
