//! Reader for .NET for Android assembly stores (`assemblies.blob`)
//!
//! Android builds of .NET/Xamarin apps pack their managed assemblies into a
//! single store file, most of them LZ4-compressed.
//!
//! # Format Overview
//!
//! All integers are little-endian and structures are packed.
//!
//! ## Store header (20 bytes)
//! - Bytes 0-3: "XABA" magic
//! - Bytes 4-7: Store version
//! - Bytes 8-11: Entry (descriptor) count
//! - Bytes 12-15: Index entry count
//! - Bytes 16-19: Index size
//!
//! ## Tables
//! - `entry_count` descriptors (24 bytes each)
//! - `index_entry_count` 32-bit hash entries (20 bytes each)
//! - `index_entry_count` 64-bit hash entries (20 bytes each)
//!
//! ## Compressed entry (`XALZ`)
//! - Bytes 0-3: "XALZ" magic
//! - Bytes 4-7: Descriptor index
//! - Bytes 8-11: Uncompressed size
//! - Bytes 12+: LZ4 block
//!
//! Assembly names are not stored in the blob; they come from the
//! `assemblies.manifest` text file that sits next to it.

mod assembly;
mod dump;
pub mod filter;
mod format;
mod manifest;
mod store;

pub use assembly::AssemblyDescriptor;
pub use dump::{dump, dump_to, manifest_path, AssemblyBlobReader, BlobReader, DumpMode};
pub use filter::FrameworkFilter;
pub use format::{Descriptor, HashEntry, Header, XalzHeader};
pub use manifest::{Manifest, ManifestEntry};
pub use store::{AssemblyStore, Entry, Payload};

/// Magic bytes for the store header: "XABA"
pub const XABA_MAGIC: u32 = 0x4142_4158;

/// Magic bytes for compressed entries: "XALZ"
pub const XALZ_MAGIC: u32 = 0x5a4c_4158;

/// Errors from assembly store parsing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Not an assembly store: expected magic 0x41424158, got 0x{0:08x}")]
    InvalidMagic(u32),

    #[error("Invalid XALZ magic: expected 0x5a4c4158, got 0x{0:08x}")]
    InvalidXalzMagic(u32),

    #[error("Assembly store declares no entries")]
    EmptyStore,

    #[error("Assembly store declares no index entries")]
    EmptyIndex,

    #[error("Data too short: need {needed} bytes, got {actual}")]
    DataTooShort { needed: usize, actual: usize },

    #[error("LZ4 decompression error: {0}")]
    Decompression(String),

    #[error("Decompression size mismatch: expected {expected}, got {actual}")]
    DecompressionSize { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
