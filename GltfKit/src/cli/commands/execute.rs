//! Command execution implementations

use super::Commands;
use super::{accessor, container, image, inspect};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { file } => inspect::execute(file),
            Commands::Unpack { source, output } => container::unpack(source, output),
            Commands::Pack { source, bin, output } => {
                container::pack(source, bin.as_deref(), output)
            }
            Commands::Image { file, index, output } => image::execute(file, *index, output),
            Commands::Accessor { file, index } => accessor::execute(file, *index),
        }
    }
}
