//! Named profile catalogs loaded from JSON (`arrows.json`).

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::profile::{
    Profile, ProfileBuilder, DEFAULT_CW, DEFAULT_DIAMETER_M, DEFAULT_MASS_GRAINS, DEFAULT_V0_FPS,
};
use crate::error::FlightError;

/// One catalog entry as stored on disk. Missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSpec {
    #[serde(default = "default_mass")]
    pub mass_grains: f64,
    #[serde(default = "default_diameter")]
    pub diameter_m: f64,
    #[serde(default = "default_cw")]
    pub cw: f64,
    #[serde(default = "default_v0")]
    pub v0_fps: f64,
}

fn default_mass() -> f64 {
    DEFAULT_MASS_GRAINS
}

fn default_diameter() -> f64 {
    DEFAULT_DIAMETER_M
}

fn default_cw() -> f64 {
    DEFAULT_CW
}

fn default_v0() -> f64 {
    DEFAULT_V0_FPS
}

impl Default for ProfileSpec {
    fn default() -> Self {
        Self {
            mass_grains: DEFAULT_MASS_GRAINS,
            diameter_m: DEFAULT_DIAMETER_M,
            cw: DEFAULT_CW,
            v0_fps: DEFAULT_V0_FPS,
        }
    }
}

impl ProfileSpec {
    pub fn to_profile(&self, name: &str) -> Profile {
        ProfileBuilder::new(name)
            .mass_grains(self.mass_grains)
            .diameter_m(self.diameter_m)
            .cw(self.cw)
            .v0_fps(self.v0_fps)
            .build()
    }
}

/// Errors that can occur while reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read profile catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse profile catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only mapping from profile name to arrow parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileCatalog {
    entries: BTreeMap<String, ProfileSpec>,
}

impl ProfileCatalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: ProfileSpec) {
        self.entries.insert(name.into(), spec);
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a profile by name.
    ///
    /// Names end up as the first column of whitespace-delimited result rows,
    /// so an entry whose name is empty or contains whitespace is rejected.
    pub fn get(&self, name: &str) -> Result<Profile, FlightError> {
        let spec = self.entries.get(name).ok_or_else(|| FlightError::ProfileNotFound {
            name: name.to_string(),
            available: self.names().map(str::to_string).collect(),
        })?;
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(FlightError::invalid(format!(
                "profile name {name:?} must be non-empty and contain no whitespace"
            )));
        }
        Ok(spec.to_profile(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "default": {},
        "carbon": { "mass_grains": 300.0, "v0_fps": 250.0 },
        "wood": { "mass_grains": 450, "diameter_m": 0.0085, "cw": 0.4, "v0_fps": 170 }
    }"#;

    #[test]
    fn missing_fields_take_defaults() {
        let catalog = ProfileCatalog::from_json(SAMPLE).unwrap();
        let carbon = catalog.get("carbon").unwrap();
        assert_eq!(carbon.mass_grains(), 300.0);
        assert_eq!(carbon.v0_fps(), 250.0);
        assert_eq!(carbon.diameter_m(), DEFAULT_DIAMETER_M);
        assert_eq!(carbon.cw(), DEFAULT_CW);

        let default = catalog.get("default").unwrap();
        assert_eq!(default.mass_grains(), DEFAULT_MASS_GRAINS);
    }

    #[test]
    fn names_are_sorted() {
        let catalog = ProfileCatalog::from_json(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["carbon", "default", "wood"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn unknown_profile_is_configuration_error() {
        let catalog = ProfileCatalog::from_json(SAMPLE).unwrap();
        match catalog.get("aluminium") {
            Err(FlightError::ProfileNotFound { name, available }) => {
                assert_eq!(name, "aluminium");
                assert_eq!(available.len(), 3);
            }
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn names_with_whitespace_are_rejected() {
        let catalog =
            ProfileCatalog::from_json(r#"{ "long  bow": {}, "tab\tname": {}, "": {} }"#).unwrap();
        for name in ["long  bow", "tab\tname", ""] {
            assert!(
                matches!(catalog.get(name), Err(FlightError::InvalidInput(_))),
                "name {name:?} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = ProfileCatalog::from_json("{ \"default\": \"heavy\" }").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ProfileCatalog::from_path("/nonexistent/arrows.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
