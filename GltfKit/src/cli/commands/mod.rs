use clap::Subcommand;
use std::path::PathBuf;

pub mod accessor;
pub mod container;
mod execute;
pub mod image;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Show asset info and check that every buffer, accessor and image resolves
    Inspect {
        /// Source .gltf or .glb file
        file: PathBuf,
    },

    /// Split a GLB into its JSON and binary chunks
    Unpack {
        /// Source .glb file
        source: PathBuf,

        /// Output .gltf file (the binary chunk goes next to it as .bin)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Pack a JSON document and an optional binary blob into a GLB
    Pack {
        /// Source .gltf file
        source: PathBuf,

        /// Binary chunk to embed
        #[arg(long)]
        bin: Option<PathBuf>,

        /// Output .glb file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the encoded bytes of one image
    Image {
        /// Source .gltf or .glb file
        file: PathBuf,

        /// Image index
        index: usize,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show the layout of one accessor
    Accessor {
        /// Source .gltf or .glb file
        file: PathBuf,

        /// Accessor index
        index: usize,
    },
}
