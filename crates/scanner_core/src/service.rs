use std::fmt;
use std::ops::Deref;

use crate::classify;

/// Normalized display label for a detected service, e.g. `"Instagram"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for ServiceName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServiceName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ServiceName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Duplicate-free collection of detected services, kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSet {
    names: Vec<ServiceName>,
}

impl ServiceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `name` unless already present. Returns whether it was new.
    pub fn insert(&mut self, name: ServiceName) -> bool {
        if self.names.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.as_str() == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceName> {
        self.names.iter()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names.into_iter().map(ServiceName::into_string).collect()
    }
}

impl Extend<ServiceName> for ServiceSet {
    fn extend<I: IntoIterator<Item = ServiceName>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl FromIterator<ServiceName> for ServiceSet {
    fn from_iter<I: IntoIterator<Item = ServiceName>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Classifies every subject and folds the hits into a [`ServiceSet`].
pub fn collect_services<'a>(subjects: impl IntoIterator<Item = &'a str>) -> ServiceSet {
    subjects.into_iter().filter_map(classify).collect()
}
