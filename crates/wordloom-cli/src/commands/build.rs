use wordloom::{
    pipeline::{EmbeddingBuildOptions, build_embedding_path, write_embedding_artifacts},
    synthesis::DEFAULT_SYNTHESIS_SEED,
};

use crate::logging::LogArgs;

/// Args for the build command.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Base-vocabulary files; every token in them lands in the output.
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Pretrained vector dump (`GloVe`/`fastText` text format).
    #[arg(long)]
    emb_file: String,

    /// Target vocabulary size; 0 admits every qualifying pretrained token.
    #[arg(long, default_value = "0")]
    vocab_size: usize,

    /// Seed for deferred-vector synthesis.
    #[arg(long, default_value_t = DEFAULT_SYNTHESIS_SEED)]
    seed: u64,

    /// Output path prefix for the matrix and vocabulary artifacts.
    #[arg(long)]
    output: String,
}

impl BuildArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging()?;

        let options = EmbeddingBuildOptions::default()
            .with_target_size(self.vocab_size)
            .with_seed(self.seed);

        log::info!("reading vectors: {}", self.emb_file);
        for (idx, path) in self.files.iter().enumerate() {
            log::info!("vocab {idx}: {path}");
        }

        let (vocab, matrix) = build_embedding_path(&self.emb_file, &self.files, &options)?;

        log::info!("output: {}", self.output);
        write_embedding_artifacts(&self.output, &vocab, &matrix)?;

        Ok(())
    }
}
