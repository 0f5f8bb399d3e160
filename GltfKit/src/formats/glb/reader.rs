//! GLB container reading
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::{CHUNK_ALIGNMENT, CHUNK_BIN, CHUNK_HEADER_SIZE, CHUNK_JSON, GLB_MAGIC, GLB_VERSION, GlbChunks, HEADER_SIZE};
use crate::error::{Error, Result};
use byteorder::{ByteOrder, LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read a .glb (or bare .gltf) file from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened, otherwise the same
/// errors as [`read_glb`].
///
/// [`Error::Io`]: crate::Error::Io
pub fn read_glb_file<P: AsRef<Path>>(path: P) -> Result<GlbChunks> {
    let file = File::open(path)?;
    read_glb(BufReader::new(file))
}

/// Split GLB data held in memory
///
/// # Errors
///
/// Same as [`read_glb`].
pub fn read_glb_bytes(data: &[u8]) -> Result<GlbChunks> {
    read_glb(data)
}

/// Whether `data` starts with the GLB magic.
#[must_use]
pub fn is_glb(data: &[u8]) -> bool {
    data.len() >= 4 && LittleEndian::read_u32(&data[..4]) == GLB_MAGIC
}

/// Split a stream into its JSON and binary segments
///
/// A stream whose first byte is not the first magic byte is taken to be a
/// bare JSON document, returned whole with an empty binary segment. Both
/// packed and bare inputs can therefore share this one entry point.
///
/// The stream is consumed in a single forward pass; nothing is recovered
/// from a read that fails midway.
///
/// Up to 3 trailing spaces of the JSON chunk are stripped as padding, so
/// the returned JSON is byte-exact only for documents that do not end in
/// whitespace.
///
/// # Errors
///
/// Returns [`Error::Truncated`] if the stream ends inside a header or chunk body.
/// Returns [`Error::MalformedContainer`] on a bad magic or a wrong chunk type.
/// Returns [`Error::UnsupportedVersion`] if the version is not 2.
/// Returns [`Error::Io`] on any other read failure.
///
/// [`Error::Truncated`]: crate::Error::Truncated
/// [`Error::MalformedContainer`]: crate::Error::MalformedContainer
/// [`Error::UnsupportedVersion`]: crate::Error::UnsupportedVersion
/// [`Error::Io`]: crate::Error::Io
pub fn read_glb<R: Read>(mut reader: R) -> Result<GlbChunks> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic[..1]).map_err(eof_as("magic"))?;

    if magic[0] != GLB_MAGIC.to_le_bytes()[0] {
        // Not a container at all: treat everything as JSON
        let mut json = vec![magic[0]];
        reader.read_to_end(&mut json)?;
        tracing::debug!("Read bare glTF JSON ({} bytes)", json.len());
        return Ok(GlbChunks::new(json, Vec::new()));
    }

    reader.read_exact(&mut magic[1..]).map_err(eof_as("magic"))?;
    if u32::from_le_bytes(magic) != GLB_MAGIC {
        return Err(Error::malformed(format!("bad magic {magic:02X?}, expected \"glTF\"")));
    }

    let version = reader.read_u32::<LittleEndian>().map_err(eof_as("header version"))?;
    if version != GLB_VERSION {
        return Err(Error::UnsupportedVersion { version });
    }

    // Informational only; compared against what was actually read below
    let declared_total = reader.read_u32::<LittleEndian>().map_err(eof_as("header length"))?;

    let json_len = reader.read_u32::<LittleEndian>().map_err(eof_as("JSON chunk header"))?;
    let json_type = reader.read_u32::<LittleEndian>().map_err(eof_as("JSON chunk header"))?;
    if json_type != CHUNK_JSON {
        return Err(Error::malformed(format!("first chunk is {json_type:08X}, not JSON")));
    }
    tracing::trace!("JSON chunk: {} bytes", json_len);

    let mut json = read_chunk_body(&mut reader, json_len, "JSON chunk")?;
    trim_json_padding(&mut json);

    let mut consumed = HEADER_SIZE + CHUNK_HEADER_SIZE + json_len as usize;

    let mut header = [0u8; CHUNK_HEADER_SIZE];
    if !read_header_or_eof(&mut reader, &mut header)? {
        // Ending right after the JSON chunk is a valid container
        check_total_length(declared_total, consumed);
        tracing::debug!("Read GLB container: JSON {} bytes, no BIN chunk", json.len());
        return Ok(GlbChunks::new(json, Vec::new()));
    }

    let bin_len = LittleEndian::read_u32(&header[..4]);
    let bin_type = LittleEndian::read_u32(&header[4..]);
    if bin_type != CHUNK_BIN {
        return Err(Error::malformed(format!("second chunk is {bin_type:08X}, not BIN")));
    }
    tracing::trace!("BIN chunk: {} bytes", bin_len);

    let bin = read_chunk_body(&mut reader, bin_len, "BIN chunk")?;
    consumed += CHUNK_HEADER_SIZE + bin_len as usize;
    check_total_length(declared_total, consumed);

    tracing::debug!("Read GLB container: JSON {} bytes, BIN {} bytes", json.len(), bin.len());
    Ok(GlbChunks::new(json, bin))
}

/// Map an unexpected end of stream to [`Error::Truncated`].
fn eof_as(context: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated { context }
        } else {
            Error::Io(err)
        }
    }
}

/// Read exactly `len` bytes without trusting `len` for the allocation.
fn read_chunk_body<R: Read>(reader: &mut R, len: u32, context: &'static str) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    reader.by_ref().take(u64::from(len)).read_to_end(&mut body)?;
    if body.len() != len as usize {
        return Err(Error::Truncated { context });
    }
    Ok(body)
}

/// Fill `buf` completely, or report a clean end of stream before its first byte.
fn read_header_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(Error::Io(e)),
        }
    }
    match filled {
        0 => Ok(false),
        n if n == buf.len() => Ok(true),
        _ => Err(Error::Truncated { context: "BIN chunk header" }),
    }
}

/// Strip the space padding the writer appends to the JSON chunk.
///
/// Padding and content are indistinguishable, so up to 3 trailing spaces
/// that belong to the document itself are dropped as well. JSON treats them
/// as insignificant whitespace.
fn trim_json_padding(json: &mut Vec<u8>) {
    let mut stripped = 0;
    while stripped < CHUNK_ALIGNMENT - 1 && json.last() == Some(&b' ') {
        json.pop();
        stripped += 1;
    }
}

fn check_total_length(declared: u32, consumed: usize) {
    if declared as usize != consumed {
        tracing::warn!(
            "GLB header declares {} bytes but chunks span {} bytes",
            declared,
            consumed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(version: u32, total: u32) -> Vec<u8> {
        let mut out = b"glTF".to_vec();
        out.extend_from_slice(&version.to_le_bytes());
        out.extend_from_slice(&total.to_le_bytes());
        out
    }

    fn chunk(kind: u32, body: &[u8]) -> Vec<u8> {
        let mut out = (body.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_json_only_container() {
        let json = br#"{"asset":{"version":"2.0"}}"#;
        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, json));

        let chunks = read_glb_bytes(&data).unwrap();
        assert_eq!(chunks.json, json);
        assert!(chunks.bin.is_empty());
    }

    #[test]
    fn test_trailing_json_spaces_are_treated_as_padding() {
        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        assert_eq!(read_glb_bytes(&data).unwrap().json, b"{}");

        // only up to 3 bytes of padding are ever stripped
        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}      "));
        assert_eq!(read_glb_bytes(&data).unwrap().json, b"{}   ");
    }

    #[test]
    fn test_bare_json_fallback() {
        let json = br#"{"asset":{"version":"2.0"}}"#;
        let chunks = read_glb_bytes(json).unwrap();
        assert_eq!(chunks.json, json);
        assert!(!chunks.has_bin());
    }

    #[test]
    fn test_empty_stream_is_truncated() {
        assert!(matches!(read_glb_bytes(&[]), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_bad_magic() {
        let data = b"gLTF\x02\x00\x00\x00\x00\x00\x00\x00";
        assert!(matches!(read_glb_bytes(data), Err(Error::MalformedContainer { .. })));
    }

    #[test]
    fn test_unsupported_version() {
        let mut data = header(1, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        assert!(matches!(
            read_glb_bytes(&data),
            Err(Error::UnsupportedVersion { version: 1 })
        ));
    }

    #[test]
    fn test_wrong_chunk_types() {
        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_BIN, b"{}  "));
        assert!(matches!(read_glb_bytes(&data), Err(Error::MalformedContainer { .. })));

        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        data.extend(chunk(CHUNK_JSON, &[0, 0, 0, 0]));
        assert!(matches!(read_glb_bytes(&data), Err(Error::MalformedContainer { .. })));
    }

    #[test]
    fn test_truncated_bodies_and_headers() {
        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        data.truncate(data.len() - 2);
        assert!(matches!(read_glb_bytes(&data), Err(Error::Truncated { .. })));

        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        data.extend_from_slice(&[4, 0, 0]);
        assert!(matches!(read_glb_bytes(&data), Err(Error::Truncated { .. })));

        let mut data = header(2, 0);
        data.extend(chunk(CHUNK_JSON, b"{}  "));
        let mut bin = chunk(CHUNK_BIN, &[1, 2, 3, 4]);
        bin.pop();
        data.extend(bin);
        assert!(matches!(read_glb_bytes(&data), Err(Error::Truncated { .. })));

        assert!(matches!(read_glb_bytes(b"glT"), Err(Error::Truncated { .. })));
        assert!(matches!(read_glb_bytes(b"glTF\x02\x00"), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_huge_declared_length_does_not_allocate() {
        let mut data = header(2, 0);
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        data.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        data.extend_from_slice(b"{}");
        assert!(matches!(read_glb_bytes(&data), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_is_glb() {
        assert!(is_glb(b"glTF\x02\x00\x00\x00"));
        assert!(!is_glb(b"{}"));
        assert!(!is_glb(b"glT"));
    }
}
