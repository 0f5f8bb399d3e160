//! Image CLI command

use std::path::Path;

use crate::formats::gltf::load_document;
use crate::resolve::resolve_image;

/// Write the encoded bytes of one image to `output`.
pub fn execute(path: &Path, index: usize, output: &Path) -> anyhow::Result<()> {
    let doc = load_document(path)?;
    let image = resolve_image(&doc, index)?;

    std::fs::write(output, &image.bytes)?;

    let mime = if image.mime.is_empty() { "unknown type" } else { image.mime.as_str() };
    println!("Wrote image {index} ({mime}, {} bytes) to {}", image.bytes.len(), output.display());
    Ok(())
}
