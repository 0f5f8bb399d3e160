//! GLB binary container format
//!
//! A GLB file frames a glTF JSON document and an optional binary blob as
//! two length-prefixed, 4-byte aligned chunks behind a 12 byte header.
//! This module only deals with the framing; it knows nothing about the
//! JSON schema.

mod reader;
mod writer;

pub use reader::{is_glb, read_glb, read_glb_bytes, read_glb_file};
pub use writer::{to_glb_bytes, write_glb, write_glb_file};

/// "glTF" magic signature (little-endian)
pub const GLB_MAGIC: u32 = 0x46546C67;

/// The only container version this crate reads and writes
pub const GLB_VERSION: u32 = 2;

/// Chunk type of the JSON chunk ("JSON")
pub const CHUNK_JSON: u32 = 0x4E4F534A;

/// Chunk type of the binary chunk ("BIN\0")
pub const CHUNK_BIN: u32 = 0x004E4942;

/// Size of the container header (magic + version + length)
pub const HEADER_SIZE: usize = 12;

/// Size of a chunk header (length + type)
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Chunks must start and end on this boundary
pub const CHUNK_ALIGNMENT: usize = 4;

/// The two segments of a glTF asset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlbChunks {
    /// The JSON document
    pub json: Vec<u8>,
    /// The binary blob; empty when the asset has none
    pub bin: Vec<u8>,
}

impl GlbChunks {
    #[must_use]
    pub fn new(json: Vec<u8>, bin: Vec<u8>) -> Self {
        Self { json, bin }
    }

    /// Whether a binary chunk is present.
    #[must_use]
    pub fn has_bin(&self) -> bool {
        !self.bin.is_empty()
    }
}

/// Number of pad bytes needed to bring `len` up to the chunk alignment.
pub(crate) fn padding_for(len: usize) -> usize {
    (CHUNK_ALIGNMENT - len % CHUNK_ALIGNMENT) % CHUNK_ALIGNMENT
}
