//! Base plugin trait definition.
//!
//! All plugins must implement the `Plugin` trait, which provides basic lifecycle
//! management and metadata methods.

use crate::Result;

/// Base trait that all plugins must implement.
///
/// # Thread Safety
///
/// All plugins must be `Send + Sync`: the dispatcher moves them onto worker
/// tasks and shares them across concurrent requests.
///
/// # Example
///
/// ```rust
/// use flattext::plugins::Plugin;
/// use flattext::Result;
///
/// struct Shouter;
///
/// impl Plugin for Shouter {
///     fn name(&self) -> &str {
///         "shouter"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
///
///     fn initialize(&self) -> Result<()> {
///         Ok(())
///     }
///
///     fn shutdown(&self) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Unique, kebab-case identifier (e.g. `"pdf-extractor"`).
    fn name(&self) -> &str;

    /// Semantic version of this plugin.
    fn version(&self) -> String;

    /// Called once when the plugin is registered. A failure prevents registration.
    ///
    /// Takes `&self` so plugins can live behind `Arc<dyn Plugin>`; use interior
    /// mutability for state that needs setting up.
    fn initialize(&self) -> Result<()>;

    /// Called when the plugin is removed from its registry.
    fn shutdown(&self) -> Result<()>;

    /// Optional human-readable description.
    fn description(&self) -> &str {
        ""
    }
}
