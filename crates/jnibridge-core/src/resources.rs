use std::borrow::Cow;

use crate::ConfigurationError;

/// Resolves template and custom code resource paths to their text.
///
/// A missing path is always a [`ConfigurationError::MissingResource`].
pub trait ResourceProvider {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError>;

    /// Whether `path` can be loaded.
    fn contains(&self, path: &str) -> bool {
        self.load(path).is_ok()
    }
}

impl<T: ResourceProvider + ?Sized> ResourceProvider for &T {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        (**self).load(path)
    }
}

impl<T: ResourceProvider + ?Sized> ResourceProvider for Box<T> {
    fn load(&self, path: &str) -> Result<Cow<'_, str>, ConfigurationError> {
        (**self).load(path)
    }
}
