use jnibridge_core::JavaPath;

/// Translation of one native exception type to a managed exception class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRule {
    /// Native exception type, e.g. `std::invalid_argument`.
    pub native: String,
    /// Managed exception class thrown in its place.
    pub target: JavaPath,
}

/// User-registered exception translations.
///
/// Rules are kept in registration order; ordering for dispatch happens when
/// the exception chain is planned.
#[derive(Debug, Clone, Default)]
pub struct ExceptionRegistry {
    rules: Vec<ExceptionRule>,
}

impl ExceptionRegistry {
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a translation. Re-registering a native type replaces its target.
    pub fn register(&mut self, native: impl Into<String>, target: impl Into<JavaPath>) {
        let native = native.into();
        let target = target.into();
        match self.rules.iter_mut().find(|r| r.native == native) {
            Some(rule) => rule.target = target,
            None => self.rules.push(ExceptionRule { native, target }),
        }
    }

    pub fn with_rule(mut self, native: impl Into<String>, target: impl Into<JavaPath>) -> Self {
        self.register(native, target);
        self
    }

    pub fn rules(&self) -> &[ExceptionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
