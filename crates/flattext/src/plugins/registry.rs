//! Extractor registration and lookup.
//!
//! The registry is the fixed table from [`FormatTag`] to extraction strategy.
//! It is an ordinary value owned by whoever dispatches; there is no
//! process-wide instance.

use crate::plugins::DocumentExtractor;
use crate::types::FormatTag;
use crate::{FlattextError, Result};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Validate a plugin name before registration.
///
/// # Rules
///
/// - Name cannot be empty
/// - Name cannot contain whitespace
fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FlattextError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(FlattextError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Registry for document extractor plugins.
///
/// Each format keeps its extractors ordered by priority; lookups return the
/// highest one.
///
/// # Example
///
/// ```rust
/// use flattext::FormatTag;
/// use flattext::plugins::ExtractorRegistry;
///
/// let registry = ExtractorRegistry::with_builtin_extractors().unwrap();
/// assert!(registry.get(FormatTag::Pdf).is_ok());
/// assert!(registry.get(FormatTag::Unsupported).is_err());
/// ```
pub struct ExtractorRegistry {
    extractors: HashMap<FormatTag, BTreeMap<i32, Arc<dyn DocumentExtractor>>>,
    name_index: IndexMap<String, Vec<(FormatTag, i32)>>,
}

impl ExtractorRegistry {
    /// Create a new empty extractor registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
            name_index: IndexMap::new(),
        }
    }

    /// Create a registry holding one built-in extractor per supported format.
    pub fn with_builtin_extractors() -> Result<Self> {
        let mut registry = Self::new();
        crate::extractors::register_default_extractors(&mut registry)?;
        Ok(registry)
    }

    /// Register a document extractor for every format it supports.
    ///
    /// Registering a second extractor with the same priority for a format
    /// replaces the first. An extractor left with no slot at all is dropped
    /// from [`list`](Self::list) and shut down. Re-registering a name first
    /// clears the slots it held before.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if registration succeeded
    /// - `Err(...)` if the name is invalid or initialization failed
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let name = extractor.name().to_string();
        let priority = extractor.priority();

        validate_plugin_name(&name)?;

        extractor.initialize()?;

        if let Some(previous) = self.name_index.shift_remove(&name) {
            for (format, slot) in previous {
                self.vacate(format, slot);
            }
        }

        let mut index_entries = Vec::new();
        let mut displaced = Vec::new();

        for format in extractor.supported_formats() {
            let replaced = self
                .extractors
                .entry(*format)
                .or_default()
                .insert(priority, Arc::clone(&extractor));
            if let Some(replaced) = replaced
                && replaced.name() != name
            {
                displaced.push((replaced, *format));
            }
            index_entries.push((*format, priority));
        }

        tracing::debug!(
            "Registered extractor '{}' (priority {}) for {} format(s)",
            name,
            priority,
            index_entries.len()
        );

        self.name_index.insert(name, index_entries);

        for (replaced, format) in displaced {
            self.release_slot(replaced, format, priority)?;
        }

        Ok(())
    }

    /// Get the highest priority extractor for a format.
    ///
    /// # Errors
    ///
    /// `FlattextError::UnsupportedFormat` if nothing is registered for it.
    pub fn get(&self, format: FormatTag) -> Result<Arc<dyn DocumentExtractor>> {
        self.extractors
            .get(&format)
            .and_then(|priority_map| priority_map.values().next_back())
            .map(Arc::clone)
            .ok_or_else(|| {
                FlattextError::UnsupportedFormat(format!("No extractor registered for format '{}'", format))
            })
    }

    /// List all registered extractor names, in registration order.
    pub fn list(&self) -> Vec<String> {
        self.name_index.keys().cloned().collect()
    }

    /// Formats that currently have at least one extractor, in table order.
    pub fn formats(&self) -> Vec<FormatTag> {
        FormatTag::SUPPORTED
            .iter()
            .copied()
            .filter(|format| self.extractors.contains_key(format))
            .collect()
    }

    /// Drop the index entry of an extractor that lost `(format, priority)`
    /// to a newer registration, shutting it down once it holds no slot.
    fn release_slot(&mut self, replaced: Arc<dyn DocumentExtractor>, format: FormatTag, priority: i32) -> Result<()> {
        let replaced_name = replaced.name();
        let Some(entries) = self.name_index.get_mut(replaced_name) else {
            return Ok(());
        };
        entries.retain(|entry| *entry != (format, priority));
        if !entries.is_empty() {
            return Ok(());
        }

        self.name_index.shift_remove(replaced_name);
        tracing::debug!("Extractor '{}' was replaced in every slot, shutting it down", replaced_name);
        replaced.shutdown()
    }

    fn vacate(&mut self, format: FormatTag, priority: i32) {
        if let Some(priority_map) = self.extractors.get_mut(&format) {
            priority_map.remove(&priority);
            if priority_map.is_empty() {
                self.extractors.remove(&format);
            }
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
