//! Assembly store manifest (`assemblies.manifest`)
//!
//! A whitespace-separated text table written next to the blob:
//!
//! ```text
//! Hash 32     Hash 64             Blob ID  Blob idx  Name
//! 0xa2e0939b  0x4288cfb749e4c631  000      0000      Xamarin.AndroidX.Activity
//! ```
//!
//! Lines that do not parse (such as the column header) are ignored.

use std::collections::HashMap;
use std::path::Path;

use crate::Result;

/// One row of the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub hash32: u32,
    pub hash64: u64,
    pub blob_id: u32,
    pub blob_index: u32,
    /// Assembly name without extension (e.g. "fr/MyApp.resources")
    pub name: String,
}

impl ManifestEntry {
    /// Parse a single manifest line
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();

        let hash32 = parse_hex(fields.next()?)?;
        let hash64 = parse_hex(fields.next()?)?;
        let blob_id = fields.next()?.parse().ok()?;
        let blob_index = fields.next()?.parse().ok()?;
        let name = fields.next()?.to_string();

        Some(Self {
            hash32: u32::try_from(hash32).ok()?,
            hash64,
            blob_id,
            blob_index,
            name,
        })
    }

    /// File name used when listing or extracting this assembly
    ///
    /// "fr/MyApp.resources" -> "fr_MyApp.resources.dll"
    pub fn file_name(&self) -> String {
        let mut name = format!("{}.dll", self.name);
        if let Some(pos) = name.rfind('/') {
            name.replace_range(pos..=pos, "_");
        }
        name
    }
}

fn parse_hex(field: &str) -> Option<u64> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

/// Parsed manifest with hash lookups
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
    by_hash32: HashMap<u32, usize>,
    by_hash64: HashMap<u64, usize>,
}

impl Manifest {
    /// Parse manifest text
    pub fn parse(text: &str) -> Self {
        let mut manifest = Self::default();

        for entry in text.lines().filter_map(ManifestEntry::parse_line) {
            let idx = manifest.entries.len();
            manifest.by_hash32.entry(entry.hash32).or_insert(idx);
            manifest.by_hash64.entry(entry.hash64).or_insert(idx);
            manifest.entries.push(entry);
        }

        manifest
    }

    /// Read and parse a manifest file
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Find the entry whose 32-bit or 64-bit hash equals `hash`
    pub fn lookup(&self, hash: u64) -> Option<&ManifestEntry> {
        let idx = u32::try_from(hash)
            .ok()
            .and_then(|h| self.by_hash32.get(&h))
            .or_else(|| self.by_hash64.get(&hash))?;
        self.entries.get(*idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
