//! Plugin system for extraction strategies.
//!
//! - [`Plugin`] - base lifecycle trait
//! - [`DocumentExtractor`] - one extraction strategy per [`FormatTag`](crate::FormatTag)
//! - [`ExtractorRegistry`] - the table the dispatcher routes through
//!
//! Plugins are stored as `Arc<dyn DocumentExtractor>` so a single instance can
//! serve concurrent requests.

mod extractor;
pub mod registry;
mod traits;

pub use extractor::{DocumentExtractor, ExtractionInput};
pub use registry::ExtractorRegistry;
pub use traits::Plugin;
