//! Mock executable locator for testing.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::invocation::{ExecutableLocator, InvocationError};

/// Mock implementation of the ExecutableLocator trait.
///
/// Resolves every tool to `/mock/bin/<name>` unless told otherwise, and
/// records each lookup so tests can assert that validation failures never
/// reach the locator.
#[derive(Debug, Clone, Default)]
pub struct MockLocator {
    lookups: Arc<Mutex<Vec<String>>>,
    paths: Arc<Mutex<HashMap<String, PathBuf>>>,
    missing: Arc<Mutex<HashSet<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockLocator {
    /// Create a new mock locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` to a specific path.
    pub fn set_path(&self, name: &str, path: impl Into<PathBuf>) {
        lock(&self.paths).insert(name.to_string(), path.into());
    }

    /// Make lookups of `name` fail as if the tool were not installed.
    pub fn set_missing(&self, name: &str) {
        lock(&self.missing).insert(name.to_string());
    }

    /// Names looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        lock(&self.lookups).clone()
    }

    /// Number of lookups performed.
    pub fn lookup_count(&self) -> usize {
        lock(&self.lookups).len()
    }
}

impl ExecutableLocator for MockLocator {
    fn locate(&self, name: &str) -> Result<PathBuf, InvocationError> {
        lock(&self.lookups).push(name.to_string());

        if lock(&self.missing).contains(name) {
            return Err(InvocationError::launch_failure(name, "executable not found"));
        }

        Ok(lock(&self.paths)
            .get(name)
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/mock/bin").join(name)))
    }
}
