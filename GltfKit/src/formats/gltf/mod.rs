//! glTF 2.0 document model and decoder
//!
//! Decoding turns the JSON segment of an asset into a typed [`Document`],
//! checks every enumerated wire code, attaches the binary segment and
//! fills the format defaults (see [`apply_defaults`]).

pub mod defaults;
mod enums;
mod materials;
mod types;

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use super::glb::{read_glb, read_glb_file};
use crate::error::{Error, Result};

pub use defaults::apply_defaults;
pub use enums::{AccessorType, ComponentType, filter, mode, target, wrap};
pub use materials::{
    Clearcoat, Material, MaterialExtensions, NormalTextureInfo, OcclusionTextureInfo,
    PbrMetallicRoughness, PbrSpecularGlossiness, TextureInfo, Unlit,
};
pub use types::{
    Accessor, Animation, AnimationChannel, AnimationSampler, AnimationTarget, Asset, Buffer,
    BufferData, BufferView, Camera, Document, Image, Mesh, MorphTarget, Node, Orthographic,
    Perspective, Primitive, Sampler, Scene, Skin, Sparse, SparseIndices, SparseValues, Texture,
};

/// Decode a glTF JSON segment and its optional binary segment.
///
/// `bin` becomes the document's embedded binary chunk as is; its size is
/// only checked when buffers are resolved. Defaults are applied before the
/// document is returned.
///
/// # Errors
///
/// Returns [`Error::Json`] if the JSON is malformed or does not match the schema.
/// Returns [`Error::UnknownEnumValue`] if a component type or accessor type is not defined.
///
/// [`Error::Json`]: crate::Error::Json
/// [`Error::UnknownEnumValue`]: crate::Error::UnknownEnumValue
pub fn decode_document(json: &[u8], bin: Vec<u8>) -> Result<Document> {
    let value: Value = serde_json::from_slice(json)?;
    check_wire_codes(&value)?;

    let mut doc: Document = serde_json::from_value(value)?;
    apply_defaults(&mut doc);
    doc.bin = bin;

    tracing::debug!(
        "Decoded glTF {}: {} buffers, {} buffer views, {} accessors, {} images",
        doc.asset.version,
        doc.buffers.len(),
        doc.buffer_views.len(),
        doc.accessors.len(),
        doc.images.len()
    );
    Ok(doc)
}

/// Split a .glb or bare .gltf stream and decode it.
///
/// # Errors
/// Returns any container error from [`read_glb`] or decode error from [`decode_document`].
pub fn read_document<R: Read>(reader: R) -> Result<Document> {
    let chunks = read_glb(reader)?;
    decode_document(&chunks.json, chunks.bin)
}

/// Load a .glb or .gltf file.
///
/// Relative file URIs in the document resolve against the file's directory.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, or any container or decode error.
///
/// [`Error::Io`]: crate::Error::Io
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    tracing::debug!("Loading glTF: {}", path.display());

    let chunks = read_glb_file(path)?;
    let mut doc = decode_document(&chunks.json, chunks.bin)?;
    doc.base_dir = Some(match path.parent() {
        Some(parent) => parent.to_path_buf(),
        None => Path::new(".").to_path_buf(),
    });
    Ok(doc)
}

/// Check enumerated codes before typed decoding, so an unknown value is
/// reported as such rather than as a generic schema mismatch.
///
/// Values of the wrong JSON type are left for the typed decode to reject.
fn check_wire_codes(value: &Value) -> Result<()> {
    let Some(accessors) = value.get("accessors").and_then(Value::as_array) else {
        return Ok(());
    };

    for accessor in accessors {
        check_component_type(accessor.get("componentType"))?;

        if let Some(name) = accessor.get("type").and_then(Value::as_str)
            && AccessorType::from_name(name).is_none()
        {
            return Err(Error::UnknownEnumValue { field: "type", value: name.to_string() });
        }

        let sparse_indices = accessor.get("sparse").and_then(|sparse| sparse.get("indices"));
        if let Some(indices) = sparse_indices {
            check_component_type(indices.get("componentType"))?;
        }
    }
    Ok(())
}

fn check_component_type(code: Option<&Value>) -> Result<()> {
    let Some(number) = code.filter(|v| v.is_number()) else {
        return Ok(());
    };
    let known = number
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(ComponentType::from_code)
        .is_some();
    if known {
        Ok(())
    } else {
        Err(Error::UnknownEnumValue { field: "componentType", value: number.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_minimal() {
        let doc = decode_document(br#"{"asset":{"version":"2.0"}}"#, Vec::new()).unwrap();
        assert_eq!(doc.asset.version, "2.0");
        assert!(doc.buffers.is_empty());
        assert!(doc.accessors.is_empty());
        assert!(!doc.has_bin());
    }

    #[test]
    fn test_decode_attaches_bin_verbatim() {
        let json = br#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":2}]}"#;
        let doc = decode_document(json, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(doc.bin, vec![1, 2, 3, 4]);
        assert_eq!(doc.buffers[0].byte_length, 2);
        assert!(!doc.buffers[0].is_external());
    }

    #[test]
    fn test_decode_accessor_fields() {
        let json = br#"{
            "asset": {"version": "2.0"},
            "accessors": [{
                "bufferView": 1,
                "componentType": 5126,
                "count": 3,
                "type": "VEC3",
                "min": [0, 0, 0],
                "max": [1, 1, 1]
            }]
        }"#;
        let doc = decode_document(json, Vec::new()).unwrap();
        let accessor = &doc.accessors[0];
        assert_eq!(accessor.buffer_view, Some(1));
        assert_eq!(accessor.byte_offset, 0);
        assert_eq!(accessor.component_type, ComponentType::F32);
        assert_eq!(accessor.accessor_type, AccessorType::Vec3);
        assert_eq!(accessor.element_size(), 12);
        assert_eq!(accessor.total_size(), 36);
        assert_eq!(accessor.max.as_deref(), Some(&[1.0, 1.0, 1.0][..]));
    }

    #[test]
    fn test_unknown_component_type() {
        let json = br#"{"accessors":[{"componentType":5124,"count":1,"type":"SCALAR"}]}"#;
        match decode_document(json, Vec::new()) {
            Err(Error::UnknownEnumValue { field, value }) => {
                assert_eq!(field, "componentType");
                assert_eq!(value, "5124");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_accessor_type() {
        let json = br#"{"accessors":[{"componentType":5126,"count":1,"type":"VEC5"}]}"#;
        match decode_document(json, Vec::new()) {
            Err(Error::UnknownEnumValue { field, value }) => {
                assert_eq!(field, "type");
                assert_eq!(value, "VEC5");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sparse_index_type() {
        let json = br#"{"accessors":[{"componentType":5126,"count":1,"type":"SCALAR",
            "sparse":{"count":1,"indices":{"bufferView":0,"componentType":7},"values":{"bufferView":1}}}]}"#;
        assert!(matches!(
            decode_document(json, Vec::new()),
            Err(Error::UnknownEnumValue { field: "componentType", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode_document(b"{\"asset\":", Vec::new()), Err(Error::Json(_))));
    }

    #[test]
    fn test_decode_normalizes_materials() {
        let json = br#"{
            "materials": [{
                "pbrMetallicRoughness": {},
                "extensions": {"KHR_materials_pbrSpecularGlossiness": {}}
            }],
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0, "NORMAL": 1}}]}]
        }"#;
        let doc = decode_document(json, Vec::new()).unwrap();
        let material = &doc.materials[0];
        assert!(material.pbr_metallic_roughness.is_none());
        assert!(material.is_specular_glossiness());
        assert_eq!(material.alpha_cutoff, Some(0.5));

        let primitive = &doc.meshes[0].primitives[0];
        assert_eq!(primitive.mode, Some(mode::TRIANGLES));
        let names: Vec<&str> = primitive.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, ["POSITION", "NORMAL"]);
    }

    #[test]
    fn test_morph_targets_keep_standard_channels() {
        let json = br#"{"meshes":[{"primitives":[{"attributes":{},
            "targets":[{"POSITION":3,"_TEMPERATURE":4}]}]}]}"#;
        let doc = decode_document(json, Vec::new()).unwrap();
        let target = &doc.meshes[0].primitives[0].targets[0];
        assert_eq!(target.position, Some(3));
        assert_eq!(target.normal, None);
    }
}
