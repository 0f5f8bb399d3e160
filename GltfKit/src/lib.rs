//! # GltfKit
//!
//! A pure-Rust loader for glTF 2.0 assets, in both the JSON (`.gltf`) and
//! the binary container (`.glb`) form.
//!
//! ## What it does
//!
//! - **GLB container** - Split a `.glb` stream into its JSON and binary
//!   chunks, and pack them back with the required 4-byte alignment
//! - **Document decoding** - Parse the JSON into typed structures, reject
//!   unknown component / accessor types, and fill the format's defaults
//! - **Resource resolution** - Turn buffer, buffer view, accessor and image
//!   indices into bounds-checked byte slices, from the binary chunk, a
//!   `data:` URI, or a local file
//!
//! ## Quick Start
//!
//! ### Loading an Asset
//!
//! ```no_run
//! use gltfkit::prelude::*;
//!
//! let doc = load_document("model.glb")?;
//! let positions = resolve_accessor(&doc, 0)?;
//! println!("{} elements, stride {}", positions.count, positions.stride);
//!
//! for element in positions.elements() {
//!     // element is `positions.element_size` bytes
//!     let _ = element;
//! }
//! # Ok::<(), gltfkit::Error>(())
//! ```
//!
//! ### Packing a GLB
//!
//! ```
//! use gltfkit::formats::glb::{read_glb_bytes, to_glb_bytes};
//!
//! let json = br#"{"asset":{"version":"2.0"}}"#;
//! let glb = to_glb_bytes(json, &[])?;
//! let chunks = read_glb_bytes(&glb)?;
//! assert_eq!(chunks.json, json);
//! assert!(chunks.bin.is_empty());
//! # Ok::<(), gltfkit::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default) - Enables the `gltfkit` command-line binary
//! - `image` - Enables [`resolve::decode_image`] for PNG / JPEG images

pub mod error;
pub mod formats;
pub mod resolve;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    // Container
    pub use crate::formats::glb::{GlbChunks, read_glb, read_glb_file, write_glb, write_glb_file};

    // Document
    pub use crate::formats::gltf::{
        Accessor, AccessorType, Buffer, BufferView, ComponentType, Document, Image, Material,
        decode_document, load_document, read_document,
    };

    // Resolution
    pub use crate::resolve::{
        AccessorData, ImageData, resolve_accessor, resolve_buffer, resolve_buffer_view,
        resolve_image,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
