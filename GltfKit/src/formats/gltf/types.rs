//! Core glTF 2.0 document types.
//!
//! Every optional property of the format is an `Option`, so "absent" stays
//! distinguishable from "present with a zero value". References between
//! entities are plain indices into the document's arrays and are only
//! checked when they are resolved.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use indexmap::IndexMap;
use serde::Deserialize;

use super::enums::{AccessorType, ComponentType, wrap};
use super::materials::Material;
use crate::error::{Error, Result};

/// Asset metadata
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub version: String,
    pub generator: Option<String>,
    pub copyright: Option<String>,
    #[serde(rename = "minVersion")]
    pub min_version: Option<String>,
}

/// Bytes and MIME type a buffer resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferData {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Binary buffer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Buffer {
    /// Location of the data; absent or empty means the embedded binary chunk.
    pub uri: Option<String>,
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    pub name: Option<String>,
    /// Filled on first resolution, never invalidated.
    #[serde(skip)]
    pub(crate) cache: OnceLock<BufferData>,
}

impl Buffer {
    #[must_use]
    pub fn new(byte_length: usize, uri: Option<String>) -> Self {
        Self { uri, byte_length, ..Self::default() }
    }

    /// Whether the data lives outside the embedded binary chunk.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }

    /// The resolved data, if this buffer has been resolved already.
    #[must_use]
    pub fn cached(&self) -> Option<&BufferData> {
        self.cache.get()
    }
}

/// Buffer view (slice of a buffer)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BufferView {
    pub buffer: usize,
    #[serde(rename = "byteOffset")]
    #[serde(default)]
    pub byte_offset: usize,
    #[serde(rename = "byteLength")]
    pub byte_length: usize,
    /// 4 to 252 when present
    #[serde(rename = "byteStride")]
    pub byte_stride: Option<usize>,
    /// ARRAY_BUFFER or ELEMENT_ARRAY_BUFFER
    pub target: Option<u32>,
    pub name: Option<String>,
}

/// Accessor for typed buffer data
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Accessor {
    #[serde(rename = "bufferView")]
    pub buffer_view: Option<usize>,
    #[serde(rename = "byteOffset")]
    #[serde(default)]
    pub byte_offset: usize,
    #[serde(rename = "componentType")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub normalized: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub accessor_type: AccessorType,
    pub max: Option<Vec<f32>>,
    pub min: Option<Vec<f32>>,
    pub sparse: Option<Sparse>,
    pub name: Option<String>,
}

impl Accessor {
    /// Size of one element in bytes.
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.component_type.size_in_bytes() * self.accessor_type.component_count()
    }

    /// Size of all elements when tightly packed.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.element_size().saturating_mul(self.count)
    }
}

/// Sparse storage of an accessor; recognised but never decoded
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sparse {
    pub count: usize,
    pub indices: SparseIndices,
    pub values: SparseValues,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SparseIndices {
    #[serde(rename = "bufferView")]
    pub buffer_view: usize,
    #[serde(rename = "byteOffset")]
    #[serde(default)]
    pub byte_offset: usize,
    #[serde(rename = "componentType")]
    pub component_type: ComponentType,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SparseValues {
    #[serde(rename = "bufferView")]
    pub buffer_view: usize,
    #[serde(rename = "byteOffset")]
    #[serde(default)]
    pub byte_offset: usize,
}

/// Image, stored in a buffer view or referenced by URI
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Image {
    pub uri: Option<String>,
    #[serde(rename = "bufferView")]
    pub buffer_view: Option<usize>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub name: Option<String>,
}

/// Texture referencing an image and sampler
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Texture {
    pub sampler: Option<usize>,
    pub source: Option<usize>,
    pub name: Option<String>,
}

/// Texture sampler defining filtering and wrapping
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Sampler {
    #[serde(rename = "magFilter")]
    pub mag_filter: Option<u32>,
    #[serde(rename = "minFilter")]
    pub min_filter: Option<u32>,
    #[serde(rename = "wrapS")]
    pub wrap_s: Option<u32>,
    #[serde(rename = "wrapT")]
    pub wrap_t: Option<u32>,
    pub name: Option<String>,
}

impl Sampler {
    /// Horizontal wrap mode, REPEAT when unset.
    #[must_use]
    pub fn wrap_s_or_default(&self) -> u32 {
        self.wrap_s.unwrap_or(wrap::REPEAT)
    }

    /// Vertical wrap mode, REPEAT when unset.
    #[must_use]
    pub fn wrap_t_or_default(&self) -> u32 {
        self.wrap_t.unwrap_or(wrap::REPEAT)
    }
}

/// Scene definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Scene {
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<usize>,
}

/// Node in the scene graph
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    pub name: Option<String>,
    pub mesh: Option<usize>,
    pub skin: Option<usize>,
    pub camera: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    pub matrix: Option<[f32; 16]>,
    pub weights: Option<Vec<f32>>,
}

/// Mesh definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Mesh {
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    pub weights: Option<Vec<f32>>,
    pub name: Option<String>,
}

/// Mesh primitive (geometry + material)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Primitive {
    /// Attribute semantic (`POSITION`, `TEXCOORD_0`, ...) to accessor index
    #[serde(default)]
    pub attributes: IndexMap<String, usize>,
    pub indices: Option<usize>,
    pub material: Option<usize>,
    /// Topology, see [`mode`](super::enums::mode); TRIANGLES after normalization
    pub mode: Option<u32>,
    #[serde(default)]
    pub targets: Vec<MorphTarget>,
}

/// Morph target of a primitive.
///
/// Only the three standard channels are kept; application specific
/// channels such as `_TEMPERATURE` are dropped on decode.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MorphTarget {
    #[serde(rename = "POSITION")]
    pub position: Option<usize>,
    #[serde(rename = "NORMAL")]
    pub normal: Option<usize>,
    #[serde(rename = "TANGENT")]
    pub tangent: Option<usize>,
}

/// Skin for skeletal animation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Skin {
    pub name: Option<String>,
    #[serde(rename = "inverseBindMatrices")]
    pub inverse_bind_matrices: Option<usize>,
    #[serde(default)]
    pub joints: Vec<usize>,
    /// Common root of the joint hierarchy
    pub skeleton: Option<usize>,
}

/// Camera projection
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Camera {
    pub name: Option<String>,
    /// "perspective" or "orthographic"
    #[serde(rename = "type")]
    #[serde(default)]
    pub camera_type: String,
    pub perspective: Option<Perspective>,
    pub orthographic: Option<Orthographic>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Perspective {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: Option<f32>,
    pub yfov: f32,
    pub zfar: Option<f32>,
    pub znear: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Orthographic {
    pub xmag: f32,
    pub ymag: f32,
    pub zfar: f32,
    pub znear: f32,
}

/// Keyframe animation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Animation {
    #[serde(default)]
    pub channels: Vec<AnimationChannel>,
    #[serde(default)]
    pub samplers: Vec<AnimationSampler>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnimationChannel {
    /// Index into the owning animation's `samplers`
    pub sampler: usize,
    pub target: AnimationTarget,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnimationTarget {
    pub node: Option<usize>,
    /// "translation", "rotation", "scale" or "weights"
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnimationSampler {
    /// Accessor with keyframe times
    pub input: usize,
    /// Accessor with keyframe values
    pub output: usize,
    /// "LINEAR", "STEP" or "CUBICSPLINE"; LINEAR when unset
    pub interpolation: Option<String>,
}

/// Complete glTF document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub asset: Asset,
    pub scene: Option<usize>,
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub meshes: Vec<Mesh>,
    #[serde(default)]
    pub skins: Vec<Skin>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default)]
    pub animations: Vec<Animation>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub textures: Vec<Texture>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub samplers: Vec<Sampler>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(rename = "bufferViews")]
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub buffers: Vec<Buffer>,
    #[serde(rename = "extensionsUsed")]
    #[serde(default)]
    pub extensions_used: Vec<String>,
    #[serde(rename = "extensionsRequired")]
    #[serde(default)]
    pub extensions_required: Vec<String>,

    /// Embedded binary chunk; empty when the asset has none.
    #[serde(skip)]
    pub bin: Vec<u8>,
    /// Directory relative file URIs are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Document {
    /// Set the directory relative file URIs are resolved against.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Whether a binary chunk is attached.
    #[must_use]
    pub fn has_bin(&self) -> bool {
        !self.bin.is_empty()
    }

    /// Look up a buffer, checking the index.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for a bad index.
    pub fn buffer(&self, index: usize) -> Result<&Buffer> {
        lookup(&self.buffers, "buffer", index)
    }

    /// Look up a buffer view, checking the index.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for a bad index.
    pub fn buffer_view(&self, index: usize) -> Result<&BufferView> {
        lookup(&self.buffer_views, "buffer view", index)
    }

    /// Look up an accessor, checking the index.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for a bad index.
    pub fn accessor(&self, index: usize) -> Result<&Accessor> {
        lookup(&self.accessors, "accessor", index)
    }

    /// Look up an image, checking the index.
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfRange`] for a bad index.
    pub fn image(&self, index: usize) -> Result<&Image> {
        lookup(&self.images, "image", index)
    }
}

fn lookup<'a, T>(items: &'a [T], kind: &'static str, index: usize) -> Result<&'a T> {
    items.get(index).ok_or(Error::IndexOutOfRange { kind, index, len: items.len() })
}
