mod build;

/// Subcommands for wordloom
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Build a vocabulary and embedding matrix from pretrained vectors.
    Build(build::BuildArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Build(cmd) => cmd.run(),
        }
    }
}
