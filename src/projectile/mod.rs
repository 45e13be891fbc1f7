pub mod catalog;
pub mod profile;

pub use catalog::{CatalogError, ProfileCatalog, ProfileSpec};
pub use profile::{BallisticBody, Profile, ProfileBuilder};

// ---------------------------------------------------------------------------
// Preset profiles
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    /// 235 gr carbon target arrow at 230 fps.
    pub fn default_profile() -> Profile {
        ProfileBuilder::new("default").build()
    }

    /// Catalog used when no profile file is given.
    pub fn catalog() -> ProfileCatalog {
        let mut catalog = ProfileCatalog::default();
        catalog.insert("default", ProfileSpec::default());
        catalog
    }
}
