//! Accessor CLI command

use std::path::Path;

use crate::formats::gltf::load_document;
use crate::resolve::resolve_accessor;

/// Print the layout of one accessor.
pub fn execute(path: &Path, index: usize) -> anyhow::Result<()> {
    let doc = load_document(path)?;
    let data = resolve_accessor(&doc, index)?;
    let accessor = doc.accessor(index)?;

    println!("Accessor {index}");
    if let Some(name) = &accessor.name {
        println!("  Name:         {name}");
    }
    println!("  Type:         {} of {}", accessor.accessor_type, accessor.component_type);
    println!("  Normalized:   {}", accessor.normalized);
    println!("  Count:        {}", data.count);
    println!("  Element size: {} bytes", data.element_size);
    println!(
        "  Stride:       {} bytes{}",
        data.stride,
        if data.is_packed() { "" } else { " (interleaved)" }
    );
    println!("  Byte span:    {} bytes", data.bytes.len());
    if let Some(buffer_view) = accessor.buffer_view {
        println!("  Buffer view:  {buffer_view} (offset {})", accessor.byte_offset);
    }
    if let (Some(min), Some(max)) = (&accessor.min, &accessor.max) {
        println!("  Min:          {min:?}");
        println!("  Max:          {max:?}");
    }

    Ok(())
}
