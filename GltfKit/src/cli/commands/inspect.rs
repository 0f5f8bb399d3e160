//! Inspect CLI command

use std::path::Path;

use crate::formats::gltf::{Document, load_document};
use crate::resolve::{is_data_uri, resolve_accessor, resolve_buffer, resolve_image};

/// Print a summary of a glTF asset and try to resolve all of its resources.
///
/// Resolution failures are reported per index; the command itself only
/// fails if the file cannot be loaded.
pub fn execute(path: &Path) -> anyhow::Result<()> {
    let doc = load_document(path)?;

    println!("glTF Asset: {}", path.display());
    println!("===========");
    println!("Version:      {}", doc.asset.version);
    if let Some(generator) = &doc.asset.generator {
        println!("Generator:    {generator}");
    }
    println!("Binary chunk: {} bytes", doc.bin.len());
    println!();
    println!("Scenes:       {}", doc.scenes.len());
    println!("Nodes:        {}", doc.nodes.len());
    println!("Meshes:       {}", doc.meshes.len());
    println!("Materials:    {}", doc.materials.len());
    println!("Textures:     {}", doc.textures.len());
    println!("Animations:   {}", doc.animations.len());
    if !doc.extensions_used.is_empty() {
        println!("Extensions:   {}", doc.extensions_used.join(", "));
    }

    let failures = print_buffers(&doc) + print_accessors(&doc) + print_images(&doc);

    println!();
    if failures == 0 {
        println!("All resources resolved");
    } else {
        println!("{failures} resource(s) failed to resolve");
    }
    Ok(())
}

fn print_buffers(doc: &Document) -> usize {
    println!();
    println!("Buffers ({}):", doc.buffers.len());
    let mut failures = 0;
    for (i, buffer) in doc.buffers.iter().enumerate() {
        let source = match buffer.uri.as_deref() {
            None | Some("") => "binary chunk",
            Some(uri) if is_data_uri(uri) => "data URI",
            Some(uri) => uri,
        };
        match resolve_buffer(doc, i) {
            Ok(bytes) => println!("  [{i:3}] {:>10} bytes  {source}", bytes.len()),
            Err(e) => {
                failures += 1;
                println!("  [{i:3}] ERROR {e}");
            }
        }
    }
    failures
}

fn print_accessors(doc: &Document) -> usize {
    println!();
    println!("Accessors ({}):", doc.accessors.len());
    let mut failures = 0;
    for (i, accessor) in doc.accessors.iter().enumerate() {
        match resolve_accessor(doc, i) {
            Ok(data) => println!(
                "  [{i:3}] {:>6} x {:6} {:14} stride {:3}",
                accessor.count, accessor.accessor_type, accessor.component_type, data.stride
            ),
            Err(e) => {
                failures += 1;
                println!("  [{i:3}] ERROR {e}");
            }
        }
    }
    failures
}

fn print_images(doc: &Document) -> usize {
    println!();
    println!("Images ({}):", doc.images.len());
    let mut failures = 0;
    for i in 0..doc.images.len() {
        match resolve_image(doc, i) {
            Ok(image) => {
                let mime = if image.mime.is_empty() { "unknown" } else { image.mime.as_str() };
                println!("  [{i:3}] {:>10} bytes  {mime}", image.bytes.len());
            }
            Err(e) => {
                failures += 1;
                println!("  [{i:3}] ERROR {e}");
            }
        }
    }
    failures
}
