//! Version Information

use once_cell::sync::Lazy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub full: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl Version {
    pub fn new(full: &str) -> Self {
        let parts: Vec<&str> = full.split('.').collect();
        Version {
            full: full.to_string(),
            major: parts.first().unwrap_or(&"0").to_string(),
            minor: parts.get(1).unwrap_or(&"0").to_string(),
            patch: parts.get(2).unwrap_or(&"0").to_string(),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Version of the compiler crate, stamped from Cargo metadata.
pub static VERSION: Lazy<Version> = Lazy::new(|| Version::new(env!("CARGO_PKG_VERSION")));
