// Game catalog model
// Systems, game entries and the directory-tree loader

pub mod entry;
pub mod loader;
pub mod system;

// Re-export commonly used types for convenience
pub use entry::{GameEntry, MetadataField};
pub use loader::{load_catalog, SystemManifest};
pub use system::{Catalog, SystemData};
