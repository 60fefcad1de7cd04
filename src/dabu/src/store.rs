//! Parsed assembly store
//!
//! Borrows the blob bytes and exposes its tables plus per-assembly payloads.

use std::io::Cursor;
use std::path::{Component, Path};

use tracing::{debug, warn};

use crate::format::{Descriptor, HashEntry, Header, XalzHeader};
use crate::manifest::Manifest;
use crate::{AssemblyDescriptor, Error, Result};

/// PE image signature, used by stores built without compression
const MZ_MAGIC: &[u8; 2] = b"MZ";

/// An assembly store over in-memory blob data
#[derive(Debug, Clone)]
pub struct AssemblyStore<'a> {
    data: &'a [u8],
    header: Header,
    descriptors: Vec<Descriptor>,
    hash32: Vec<HashEntry>,
    hash64: Vec<HashEntry>,
}

impl<'a> AssemblyStore<'a> {
    /// Parse header, descriptors and both hash indexes
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = Header::from_bytes(data)?;

        let needed = header.tables_size();
        if data.len() < needed {
            return Err(Error::DataTooShort {
                needed,
                actual: data.len(),
            });
        }

        debug!(
            version = header.version,
            entries = header.entry_count,
            index_entries = header.index_entry_count,
            index_size = header.index_size,
            "assembly store header"
        );

        let mut cursor = Cursor::new(&data[Header::SIZE..needed]);

        let descriptors = (0..header.entry_count)
            .map(|_| Descriptor::read(&mut cursor))
            .collect::<Result<Vec<_>>>()?;
        let hash32 = (0..header.index_entry_count)
            .map(|_| HashEntry::read(&mut cursor))
            .collect::<Result<Vec<_>>>()?;
        let hash64 = (0..header.index_entry_count)
            .map(|_| HashEntry::read(&mut cursor))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            data,
            header,
            descriptors,
            hash32,
            hash64,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn hash32_index(&self) -> &[HashEntry] {
        &self.hash32
    }

    /// Resolve every assembly in 32-bit index order
    ///
    /// Entries with an out-of-range descriptor, truncated data, or an
    /// unrecognized payload are logged and skipped.
    pub fn entries(&self, manifest: Option<&Manifest>) -> Vec<Entry<'a>> {
        self.hash32
            .iter()
            .enumerate()
            .filter_map(|(i, hash)| self.resolve(i, hash, manifest))
            .collect()
    }

    fn resolve(&self, i: usize, hash: &HashEntry, manifest: Option<&Manifest>) -> Option<Entry<'a>> {
        let Some(descriptor) = self.descriptors.get(hash.local_store_index as usize) else {
            warn!(
                index = i,
                local_store_index = hash.local_store_index,
                "hash entry points past descriptor table"
            );
            return None;
        };

        let name = self.entry_name(hash, manifest);
        if !is_plain_file_name(&name) {
            warn!(name = %name, "skipping entry whose name is not a plain file name");
            return None;
        }

        let data: &'a [u8] = self.data;
        let range = descriptor.data_range();
        if range.start >= data.len() {
            warn!(name = %name, offset = range.start, "entry data starts past end of blob");
            return None;
        }
        let raw = &data[range.start..range.end.min(data.len())];

        debug!(
            name = %name,
            index = hash.local_store_index,
            data_offset = descriptor.data_offset,
            data_size = descriptor.data_size,
            "assembly entry"
        );

        let payload = match Payload::from_entry_data(raw) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(name = %name, error = %e, "skipping entry");
                return None;
            }
        };

        if payload.size() == 0 {
            warn!(name = %name, "skipping entry with zero payload size");
            return None;
        }

        Some(Entry {
            name,
            hash: *hash,
            descriptor: *descriptor,
            payload,
        })
    }
}

impl AssemblyStore<'_> {
    /// Name for an index entry
    ///
    /// Tries the manifest by 32-bit hash, then by the 64-bit hash of the same
    /// descriptor, and falls back to the hex 32-bit hash.
    fn entry_name(&self, hash: &HashEntry, manifest: Option<&Manifest>) -> String {
        manifest
            .and_then(|m| {
                m.lookup(u64::from(hash.hash32())).or_else(|| {
                    self.hash64
                        .iter()
                        .find(|h| h.local_store_index == hash.local_store_index)
                        .and_then(|h| m.lookup(h.hash))
                })
            })
            .map(|entry| entry.file_name())
            .unwrap_or_else(|| format!("0x{:x}.dll", hash.hash32()))
    }
}

/// A single normal path component with no separators
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(&['/', '\\'][..])
        && matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
}

/// Entry data as found in the blob
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// XALZ header followed by an LZ4 block
    Compressed { header: XalzHeader, block: &'a [u8] },
    /// Uncompressed PE image
    Stored(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// Classify the bytes at an entry's data offset
    pub fn from_entry_data(raw: &'a [u8]) -> Result<Self> {
        if XalzHeader::is_xalz(raw) {
            let header = XalzHeader::from_bytes(raw)?;
            return Ok(Self::Compressed {
                header,
                block: &raw[XalzHeader::SIZE..],
            });
        }

        if raw.starts_with(MZ_MAGIC) {
            return Ok(Self::Stored(raw));
        }

        match raw.get(0..4) {
            Some(magic) => Err(Error::InvalidXalzMagic(u32::from_le_bytes([
                magic[0], magic[1], magic[2], magic[3],
            ]))),
            None => Err(Error::DataTooShort {
                needed: XalzHeader::SIZE,
                actual: raw.len(),
            }),
        }
    }

    /// Uncompressed size in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Compressed { header, .. } => header.size as usize,
            Self::Stored(data) => data.len(),
        }
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self, Self::Compressed { .. })
    }

    /// Produce the assembly image
    pub fn decompress(&self) -> Result<Vec<u8>> {
        match self {
            Self::Stored(data) => Ok(data.to_vec()),
            Self::Compressed { header, block } => {
                let expected = header.size as usize;
                let mut output = vec![0u8; expected];

                let actual = lz4_flex::block::decompress_into(block, &mut output)
                    .map_err(|e| Error::Decompression(e.to_string()))?;

                if actual != expected {
                    return Err(Error::DecompressionSize { expected, actual });
                }

                Ok(output)
            }
        }
    }
}

/// A resolved assembly within the store
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    /// File name (manifest name or hex hash, always ending in ".dll")
    pub name: String,
    pub hash: HashEntry,
    pub descriptor: Descriptor,
    pub payload: Payload<'a>,
}

impl Entry<'_> {
    pub fn descriptor_record(&self) -> AssemblyDescriptor {
        AssemblyDescriptor::new(self.name.clone(), self.payload.size())
    }
}
