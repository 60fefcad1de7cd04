//! Fixed-size structures of the assembly store

use std::io::Cursor;

use byteorder::{LittleEndian as LE, ReadBytesExt};

use crate::{Error, Result, XABA_MAGIC, XALZ_MAGIC};

/// Ensure `data` holds at least `needed` bytes
#[inline]
fn require(data: &[u8], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(Error::DataTooShort {
            needed,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Store header (20 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: u32,
    pub version: u32,
    /// Number of entry descriptors
    pub entry_count: u32,
    /// Number of entries in each hash index
    pub index_entry_count: u32,
    pub index_size: u32,
}

impl Header {
    pub const SIZE: usize = 20;

    /// Parse and validate the header at the start of `data`
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require(data, Self::SIZE)?;
        let mut cursor = Cursor::new(data);

        let header = Self {
            magic: cursor.read_u32::<LE>()?,
            version: cursor.read_u32::<LE>()?,
            entry_count: cursor.read_u32::<LE>()?,
            index_entry_count: cursor.read_u32::<LE>()?,
            index_size: cursor.read_u32::<LE>()?,
        };

        if header.magic != XABA_MAGIC {
            return Err(Error::InvalidMagic(header.magic));
        }
        if header.entry_count == 0 {
            return Err(Error::EmptyStore);
        }
        if header.index_entry_count == 0 {
            return Err(Error::EmptyIndex);
        }

        Ok(header)
    }

    /// Total size of header plus descriptor and both index tables
    pub fn tables_size(&self) -> usize {
        Self::SIZE
            + self.entry_count as usize * Descriptor::SIZE
            + 2 * self.index_entry_count as usize * HashEntry::SIZE
    }
}

/// Entry descriptor (24 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Descriptor {
    pub data_offset: u32,
    pub data_size: u32,
    pub debug_data_offset: u32,
    pub debug_data_size: u32,
    pub config_data_offset: u32,
    pub config_data_size: u32,
}

impl Descriptor {
    pub const SIZE: usize = 24;

    pub fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self {
            data_offset: cursor.read_u32::<LE>()?,
            data_size: cursor.read_u32::<LE>()?,
            debug_data_offset: cursor.read_u32::<LE>()?,
            debug_data_size: cursor.read_u32::<LE>()?,
            config_data_offset: cursor.read_u32::<LE>()?,
            config_data_size: cursor.read_u32::<LE>()?,
        })
    }

    /// Byte range of the entry data within the blob
    pub fn data_range(&self) -> std::ops::Range<usize> {
        let start = self.data_offset as usize;
        start..start + self.data_size as usize
    }
}

/// Hash index entry (20 bytes)
///
/// The 32-bit and 64-bit tables share this layout; 32-bit hashes occupy the
/// low half of `hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashEntry {
    pub hash: u64,
    pub mapping_index: u32,
    pub local_store_index: u32,
    pub store_id: u32,
}

impl HashEntry {
    pub const SIZE: usize = 20;

    pub fn read(cursor: &mut Cursor<&[u8]>) -> Result<Self> {
        Ok(Self {
            hash: cursor.read_u64::<LE>()?,
            mapping_index: cursor.read_u32::<LE>()?,
            local_store_index: cursor.read_u32::<LE>()?,
            store_id: cursor.read_u32::<LE>()?,
        })
    }

    #[inline]
    pub fn hash32(&self) -> u32 {
        self.hash as u32
    }
}

/// Header of an LZ4-compressed entry (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XalzHeader {
    pub magic: u32,
    /// Descriptor index this entry belongs to
    pub index: u32,
    /// Size after decompression
    pub size: u32,
}

impl XalzHeader {
    pub const SIZE: usize = 12;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        require(data, Self::SIZE)?;
        let mut cursor = Cursor::new(data);

        let magic = cursor.read_u32::<LE>()?;
        if magic != XALZ_MAGIC {
            return Err(Error::InvalidXalzMagic(magic));
        }

        Ok(Self {
            magic,
            index: cursor.read_u32::<LE>()?,
            size: cursor.read_u32::<LE>()?,
        })
    }

    /// Check whether data starts with the XALZ magic
    #[inline]
    pub fn is_xalz(data: &[u8]) -> bool {
        data.len() >= 4 && data[0..4] == XALZ_MAGIC.to_le_bytes()
    }
}
