//! Site-document loading
//!
//! Host declarations arrive as one YAML document with a `hosts:` mapping.
//! Parsing it produces the [`HostRegistry`] the resolution passes own.

use crate::error::Error;
use crate::host::HostRegistry;
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A parsed site document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteDocument {
    #[serde(default)]
    pub hosts: HostRegistry,
}

impl SiteDocument {
    /// Read and parse a site document from a file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        text.parse()
    }

    /// Hand the declared hosts over to the resolution passes.
    pub fn into_registry(self) -> HostRegistry {
        self.hosts
    }
}

impl FromStr for SiteDocument {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let document: Value = serde_yaml::from_str(text).map_err(|e| Error::SiteParse {
            message: e.to_string(),
        })?;
        if document.is_null() {
            return Ok(Self::default());
        }
        if !document.is_mapping() {
            return Err(Error::SiteShape);
        }
        serde_yaml::from_value(document).map_err(|e| Error::SiteParse {
            message: e.to_string(),
        })
    }
}
