//! File format handlers for glTF 2.0 assets
//!
//! `glb` handles the binary container framing, `gltf` the JSON document.

pub mod glb;
pub mod gltf;

// Re-export the container entry points
pub use glb::{GlbChunks, is_glb, read_glb, read_glb_bytes, read_glb_file, to_glb_bytes, write_glb, write_glb_file};

// Re-export the document entry points
pub use gltf::{Document, apply_defaults, decode_document, load_document, read_document};
