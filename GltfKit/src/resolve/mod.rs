//! Resource resolution
//!
//! Turns the index references of a decoded [`Document`] into byte slices:
//! buffer → buffer view → accessor, and images from either a buffer view or
//! a URI. Every range is checked against its backing storage before it is
//! sliced, so a returned slice is always inside the buffer it came from.
//!
//! Buffer bytes are resolved lazily and cached on the [`Buffer`] for the
//! lifetime of the document.
//!
//! [`Buffer`]: crate::formats::gltf::Buffer

mod data_uri;
#[cfg(feature = "image")]
mod codec;

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::formats::gltf::{Buffer, BufferData, Document};

pub use data_uri::{
    DEFAULT_BASE64_MIME, DEFAULT_TEXT_MIME, DataUri, data_uri_mime, decode_data_uri, is_data_uri,
};
#[cfg(feature = "image")]
pub use codec::decode_image;

/// MIME reported for the embedded binary chunk and for buffer files
pub const BINARY_MIME: &str = "application/octet-stream";

// ============================================================================
// Buffers
// ============================================================================

/// Resolve the bytes of a buffer.
///
/// The source is the embedded binary chunk when the buffer has no URI, the
/// decoded payload of a `data:` URI, or a local file otherwise. Bytes past
/// the declared `byteLength` are dropped (GLB chunk padding).
///
/// # Errors
///
/// - [`Error::IndexOutOfRange`] for a bad index
/// - [`Error::MissingResource`] if the binary chunk is absent or the file cannot be read
/// - [`Error::InvalidDataUri`] for a malformed `data:` URI
pub fn resolve_buffer(doc: &Document, index: usize) -> Result<&[u8]> {
    Ok(&load_buffer(doc, index)?.bytes)
}

/// MIME type of a buffer's source, resolving the buffer if needed.
///
/// # Errors
/// Same as [`resolve_buffer`].
pub fn buffer_mime(doc: &Document, index: usize) -> Result<&str> {
    Ok(&load_buffer(doc, index)?.mime)
}

fn load_buffer(doc: &Document, index: usize) -> Result<&BufferData> {
    let buffer = doc.buffer(index)?;
    if let Some(data) = buffer.cached() {
        tracing::trace!("Buffer {} cache hit ({} bytes)", index, data.bytes.len());
        return Ok(data);
    }

    let mut data = fetch_buffer(doc, index, buffer)?;
    if data.bytes.len() > buffer.byte_length {
        data.bytes.truncate(buffer.byte_length);
    }
    tracing::debug!("Resolved buffer {}: {} bytes, {}", index, data.bytes.len(), data.mime);

    // A concurrent resolution may have stored first; every caller sees that value.
    Ok(buffer.cache.get_or_init(|| data))
}

fn fetch_buffer(doc: &Document, index: usize, buffer: &Buffer) -> Result<BufferData> {
    match buffer.uri.as_deref() {
        None | Some("") => {
            if !doc.has_bin() {
                return Err(Error::missing(format!(
                    "buffer {index} refers to the binary chunk, but the document has none"
                )));
            }
            let len = doc.bin.len().min(buffer.byte_length);
            Ok(BufferData { bytes: doc.bin[..len].to_vec(), mime: BINARY_MIME.to_string() })
        }
        Some(uri) if is_data_uri(uri) => {
            let DataUri { bytes, mime } = decode_data_uri(uri)?;
            Ok(BufferData { bytes, mime })
        }
        Some(uri) => {
            let bytes = read_local(doc, uri)?;
            Ok(BufferData { bytes, mime: BINARY_MIME.to_string() })
        }
    }
}

/// Read a file URI. Only local paths are supported; relative paths are
/// joined onto the document's base directory when it has one.
fn read_local(doc: &Document, uri: &str) -> Result<Vec<u8>> {
    if uri.contains("://") {
        return Err(Error::missing(format!("remote URI not supported: {uri}")));
    }

    let path = local_path(doc.base_dir.as_deref(), uri);
    tracing::debug!("Reading external resource: {}", path.display());
    std::fs::read(&path).map_err(|e| Error::missing(format!("{}: {e}", path.display())))
}

fn local_path(base_dir: Option<&Path>, uri: &str) -> PathBuf {
    let path = Path::new(uri);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

// ============================================================================
// Buffer views
// ============================================================================

/// Resolve the exact byte range of a buffer view.
///
/// # Errors
///
/// - [`Error::IndexOutOfRange`] for a bad view or buffer index
/// - [`Error::RangeOverflow`] if the view does not fit its buffer
/// - any error from [`resolve_buffer`]
pub fn resolve_buffer_view(doc: &Document, index: usize) -> Result<&[u8]> {
    let view = doc.buffer_view(index)?;
    let buffer = resolve_buffer(doc, view.buffer)?;

    let end = view.byte_offset.checked_add(view.byte_length);
    match end {
        Some(end) if end <= buffer.len() => Ok(&buffer[view.byte_offset..end]),
        _ => Err(Error::RangeOverflow {
            kind: "buffer view",
            index,
            required: end.unwrap_or(usize::MAX),
            available: buffer.len(),
        }),
    }
}

// ============================================================================
// Accessors
// ============================================================================

/// Bytes of a resolved accessor.
///
/// `bytes` starts at the first element and ends with the last element's
/// final byte; elements are `stride` bytes apart and never overlap
/// (`stride >= element_size`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorData<'a> {
    pub bytes: &'a [u8],
    pub stride: usize,
    pub count: usize,
    pub element_size: usize,
}

impl<'a> AccessorData<'a> {
    /// Iterate over the bytes of each element, in order.
    #[must_use]
    pub fn elements(self) -> impl ExactSizeIterator<Item = &'a [u8]> {
        let AccessorData { bytes, stride, count, element_size } = self;
        (0..count).map(move |i| {
            let start = i * stride;
            &bytes[start..start + element_size]
        })
    }

    /// Whether elements are tightly packed.
    #[must_use]
    pub fn is_packed(self) -> bool {
        self.stride == self.element_size
    }
}

/// Resolve the bytes and stride of an accessor.
///
/// The stride is the buffer view's `byteStride`, or the element size when
/// the view has none. The accessor must satisfy
/// `byteOffset + stride * (count - 1) + elementSize <= bufferView.byteLength`.
///
/// # Errors
///
/// - [`Error::IndexOutOfRange`] for a bad accessor, view or buffer index
/// - [`Error::UnsupportedFeature`] for a sparse accessor
/// - [`Error::InvalidAccessor`] if `count` is zero, the accessor has no buffer view,
///   or the view's `byteStride` is smaller than one element
/// - [`Error::RangeOverflow`] if the accessor does not fit its buffer view
/// - any error from [`resolve_buffer_view`]
pub fn resolve_accessor(doc: &Document, index: usize) -> Result<AccessorData<'_>> {
    let accessor = doc.accessor(index)?;
    if accessor.sparse.is_some() {
        return Err(Error::UnsupportedFeature { feature: "sparse accessors" });
    }
    if accessor.count == 0 {
        return Err(Error::InvalidAccessor { index, message: "count is zero".to_string() });
    }
    let Some(view_index) = accessor.buffer_view else {
        return Err(Error::InvalidAccessor { index, message: "no buffer view".to_string() });
    };

    let view = resolve_buffer_view(doc, view_index)?;
    let element_size = accessor.element_size();
    let stride = doc.buffer_view(view_index)?.byte_stride.unwrap_or(element_size);
    if stride < element_size {
        return Err(Error::InvalidAccessor {
            index,
            message: format!("byte stride {stride} is smaller than the {element_size} byte element"),
        });
    }

    let end = stride
        .checked_mul(accessor.count - 1)
        .and_then(|span| span.checked_add(accessor.byte_offset))
        .and_then(|span| span.checked_add(element_size));

    match end {
        Some(end) if end <= view.len() => {
            tracing::trace!(
                "Resolved accessor {}: {} x {} {}, stride {}",
                index,
                accessor.count,
                accessor.accessor_type,
                accessor.component_type,
                stride
            );
            Ok(AccessorData {
                bytes: &view[accessor.byte_offset..end],
                stride,
                count: accessor.count,
                element_size,
            })
        }
        _ => Err(Error::RangeOverflow {
            kind: "accessor",
            index,
            required: end.unwrap_or(usize::MAX),
            available: view.len(),
        }),
    }
}

// ============================================================================
// Images
// ============================================================================

/// Bytes and MIME type of a resolved image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData<'a> {
    /// Borrowed from the buffer for buffer view images, owned otherwise
    pub bytes: Cow<'a, [u8]>,
    /// Empty for a file image without a declared `mimeType`
    pub mime: String,
}

/// Resolve the encoded bytes of an image.
///
/// A buffer view source wins over a URI. The image's declared `mimeType`
/// overrides the MIME of a buffer view or `data:` source and is the only
/// MIME of a file source.
///
/// # Errors
///
/// - [`Error::IndexOutOfRange`] for a bad image, view or buffer index
/// - [`Error::MissingResource`] if the image has no source or the file cannot be read
/// - [`Error::InvalidDataUri`] for a malformed `data:` URI
/// - any error from [`resolve_buffer_view`]
pub fn resolve_image(doc: &Document, index: usize) -> Result<ImageData<'_>> {
    let image = doc.image(index)?;
    let declared = image.mime_type.as_deref().filter(|mime| !mime.is_empty());

    if let Some(view_index) = image.buffer_view {
        let bytes = resolve_buffer_view(doc, view_index)?;
        let buffer = doc.buffer_view(view_index)?.buffer;
        let mime = match declared {
            Some(mime) => mime,
            None => buffer_mime(doc, buffer)?,
        };
        tracing::debug!("Resolved image {} from buffer view {}", index, view_index);
        return Ok(ImageData { bytes: Cow::Borrowed(bytes), mime: mime.to_string() });
    }

    let uri = match image.uri.as_deref() {
        Some(uri) if !uri.is_empty() => uri,
        _ => return Err(Error::missing(format!("image {index} has neither a buffer view nor a URI"))),
    };

    if is_data_uri(uri) {
        let DataUri { bytes, mime } = decode_data_uri(uri)?;
        let mime = declared.map_or(mime, str::to_string);
        return Ok(ImageData { bytes: Cow::Owned(bytes), mime });
    }

    let bytes = read_local(doc, uri)?;
    Ok(ImageData { bytes: Cow::Owned(bytes), mime: declared.unwrap_or_default().to_string() })
}
