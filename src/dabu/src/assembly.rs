//! Assembly descriptor records returned by a dump

use serde::{Deserialize, Serialize};

/// One assembly found in a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyDescriptor {
    /// File name of the assembly (e.g. "MyApp.dll")
    pub name: String,
    /// Uncompressed size in bytes
    pub size: usize,
}

impl AssemblyDescriptor {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

impl std::fmt::Display for AssemblyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
