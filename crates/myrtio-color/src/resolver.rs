//! Symbolic color resolution
//!
//! A symbolic color is an indirection such as `var(--primary-color)` whose
//! concrete value lives in an external rendering context (a theme). The
//! engine never reaches into that context itself; callers inject a resolver.

use std::collections::HashMap;

/// Maps a symbolic color reference to its concrete rendered value.
///
/// `name` is the custom property name including its leading `--`.
/// Implementations must be synchronous and reentrant. Returning `None` is
/// not an error: the caller treats the reference as opaque and unresolved.
pub trait SymbolResolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

impl<F> SymbolResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Resolver that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl SymbolResolver for NoopResolver {
    fn resolve(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Resolver backed by a fixed token table, e.g. a theme snapshot.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    tokens: HashMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, returning the resolver for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }
}

impl SymbolResolver for MapResolver {
    fn resolve(&self, name: &str) -> Option<String> {
        self.tokens.get(name).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MapResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tokens: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
