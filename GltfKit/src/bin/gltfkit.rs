//! `gltfkit` command-line binary

fn main() -> anyhow::Result<()> {
    gltfkit::cli::run_cli()
}
