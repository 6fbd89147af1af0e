//! Storage interface consumed by the console

use anyhow::Result;

use crate::domain::{ClassName, Instance};

/// Keyed collection of instances with bulk persistence.
///
/// Keys are `"<ClassName>.<id>"`. Mutations only touch memory until
/// [`Storage::save`] is called.
pub trait Storage {
    /// Returns stored instances in enumeration order, optionally limited to
    /// keys whose class prefix matches `class`
    fn all(&self, class: Option<ClassName>) -> Vec<&Instance>;

    fn get(&self, key: &str) -> Option<&Instance>;

    fn get_mut(&mut self, key: &str) -> Option<&mut Instance>;

    /// Registers an instance under its key
    fn insert(&mut self, instance: Instance);

    fn remove(&mut self, key: &str) -> Option<Instance>;

    /// Persists every stored instance
    fn save(&self) -> Result<()>;

    /// Number of stored instances of `class`
    fn len_of(&self, class: ClassName) -> usize {
        self.all(Some(class)).len()
    }
}
