//! GLB container writing
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

#![allow(clippy::cast_possible_truncation)]

use super::{CHUNK_BIN, CHUNK_HEADER_SIZE, CHUNK_JSON, GLB_MAGIC, GLB_VERSION, HEADER_SIZE, padding_for};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pad byte for the JSON chunk (a space keeps the JSON valid)
const JSON_PAD: u8 = b' ';

/// Pad byte for the binary chunk
const BIN_PAD: u8 = 0;

/// Write a .glb file to disk
///
/// # Errors
/// Returns an error if file writing fails or a chunk is too large.
pub fn write_glb_file<P: AsRef<Path>>(path: P, json: &[u8], bin: &[u8]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_glb(&mut writer, json, bin)?;
    writer.flush()?;
    Ok(())
}

/// Pack JSON and binary segments into GLB bytes.
///
/// # Errors
/// Returns [`Error::ContainerTooLarge`] if a length does not fit the 32-bit fields.
///
/// [`Error::ContainerTooLarge`]: crate::Error::ContainerTooLarge
pub fn to_glb_bytes(json: &[u8], bin: &[u8]) -> Result<Vec<u8>> {
    let total = container_size(json.len(), bin.len())?;
    let mut output = Vec::with_capacity(total as usize);
    write_glb(&mut output, json, bin)?;
    Ok(output)
}

/// Pack JSON and binary segments into the GLB container format
///
/// Both chunks are padded to a multiple of 4 bytes: the JSON chunk with
/// spaces, the binary chunk with zeros. The declared chunk lengths include
/// the padding. No binary chunk is written when `bin` is empty.
///
/// # Errors
/// Returns [`Error::ContainerTooLarge`] if a length does not fit the 32-bit fields,
/// or [`Error::Io`] if writing fails.
///
/// [`Error::ContainerTooLarge`]: crate::Error::ContainerTooLarge
/// [`Error::Io`]: crate::Error::Io
pub fn write_glb<W: Write>(writer: &mut W, json: &[u8], bin: &[u8]) -> Result<()> {
    let total = container_size(json.len(), bin.len())?;

    // Header
    writer.write_u32::<LittleEndian>(GLB_MAGIC)?;
    writer.write_u32::<LittleEndian>(GLB_VERSION)?;
    writer.write_u32::<LittleEndian>(total)?;

    write_chunk(writer, CHUNK_JSON, json, JSON_PAD)?;

    if !bin.is_empty() {
        write_chunk(writer, CHUNK_BIN, bin, BIN_PAD)?;
    }

    tracing::debug!("Wrote GLB container: {} bytes", total);
    Ok(())
}

fn write_chunk<W: Write>(writer: &mut W, kind: u32, body: &[u8], pad: u8) -> Result<()> {
    let padding = padding_for(body.len());
    let padded_len = padded_chunk_len(body.len())?;

    writer.write_u32::<LittleEndian>(padded_len)?;
    writer.write_u32::<LittleEndian>(kind)?;
    writer.write_all(body)?;
    for _ in 0..padding {
        writer.write_u8(pad)?;
    }
    Ok(())
}

fn padded_chunk_len(len: usize) -> Result<u32> {
    len.checked_add(padding_for(len))
        .and_then(|padded| u32::try_from(padded).ok())
        .ok_or(Error::ContainerTooLarge { size: len })
}

/// Total container size: header, JSON chunk and the optional binary chunk.
fn container_size(json_len: usize, bin_len: usize) -> Result<u32> {
    let mut total = u64::from(padded_chunk_len(json_len)?) + (HEADER_SIZE + CHUNK_HEADER_SIZE) as u64;
    if bin_len > 0 {
        total += u64::from(padded_chunk_len(bin_len)?) + CHUNK_HEADER_SIZE as u64;
    }
    u32::try_from(total).map_err(|_| Error::ContainerTooLarge { size: total as usize })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::glb::read_glb_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_padding_uses_spaces() {
        let out = to_glb_bytes(b"{\"a\":1}", &[]).unwrap();
        // 12 header + 8 chunk header + 7 json + 1 pad
        assert_eq!(out.len(), 28);
        assert_eq!(&out[8..12], &28u32.to_le_bytes());
        assert_eq!(&out[12..16], &8u32.to_le_bytes());
        assert_eq!(&out[16..20], &CHUNK_JSON.to_le_bytes());
        assert_eq!(out[27], b' ');
    }

    #[test]
    fn test_bin_padding_uses_zeros() {
        let out = to_glb_bytes(b"{}  ", &[9, 9, 9, 9, 9]).unwrap();
        // 12 + (8 + 4) + (8 + 8)
        assert_eq!(out.len(), 40);
        assert_eq!(&out[24..28], &8u32.to_le_bytes());
        assert_eq!(&out[28..32], &CHUNK_BIN.to_le_bytes());
        assert_eq!(&out[32..40], &[9, 9, 9, 9, 9, 0, 0, 0]);
    }

    #[test]
    fn test_no_bin_chunk_when_empty() {
        let out = to_glb_bytes(b"{}", &[]).unwrap();
        assert_eq!(out.len(), HEADER_SIZE + CHUNK_HEADER_SIZE + 4);
    }

    #[test]
    fn test_round_trip() {
        let json = br#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":8}]}"#;
        let bin = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = to_glb_bytes(json, &bin).unwrap();
        let chunks = read_glb_bytes(&out).unwrap();
        assert_eq!(chunks.json, json.to_vec());
        assert_eq!(chunks.bin, bin.to_vec());
    }
}
