//! GLB container CLI commands
//!
//! Only the chunk framing is touched; the JSON is copied byte for byte.

use std::path::Path;

use crate::formats::glb::{read_glb_file, write_glb_file};

/// Split a GLB into `<output>` (JSON) and `<output>.bin` (binary chunk).
pub fn unpack(source: &Path, output: &Path) -> anyhow::Result<()> {
    println!("Unpacking GLB: {}", source.display());

    let chunks = read_glb_file(source)?;
    std::fs::write(output, &chunks.json)?;
    println!("  JSON: {} ({} bytes)", output.display(), chunks.json.len());

    if chunks.has_bin() {
        let bin_path = output.with_extension("bin");
        std::fs::write(&bin_path, &chunks.bin)?;
        println!("  BIN:  {} ({} bytes)", bin_path.display(), chunks.bin.len());
    } else {
        println!("  BIN:  none");
    }

    Ok(())
}

/// Pack a JSON file and an optional binary file into a GLB.
pub fn pack(source: &Path, bin: Option<&Path>, output: &Path) -> anyhow::Result<()> {
    let json = std::fs::read(source)?;
    if serde_json::from_slice::<serde_json::Value>(&json).is_err() {
        anyhow::bail!("{} is not a JSON document", source.display());
    }

    let bin = match bin {
        Some(path) => std::fs::read(path)?,
        None => Vec::new(),
    };

    write_glb_file(output, &json, &bin)?;
    println!(
        "Packed {} ({} bytes JSON, {} bytes BIN) into {}",
        source.display(),
        json.len(),
        bin.len(),
        output.display()
    );

    Ok(())
}
