//! # Build Pipeline
//!
//! One-call orchestration of the full build: parse the store, resolve
//! specials, read the base vocabulary, assemble, synthesize deferred
//! rows, finalize. Artifact writing is a separate explicit step, so no
//! failure path leaves partial output on disk.

use std::path::Path;

use crate::{
    assembly::{AssemblyOptions, assemble_vocabulary},
    errors::WLResult,
    io::{
        tensor_io::save_embedding_tensor_path,
        vocab_io::{load_base_vocab_paths, save_vocab_index_path},
    },
    matrix::{EmbeddingMatrix, finalize_matrix},
    specials::SpecialTokenVectors,
    store::PretrainedStore,
    synthesis::{DEFAULT_SYNTHESIS_SEED, DeferredSynthesizer},
    types::TokenIndexMap,
};

/// Options for [`build_embedding_path`].
#[derive(Debug, Clone)]
pub struct EmbeddingBuildOptions {
    /// Target vocabulary size; 0 means unbounded.
    pub target_size: usize,

    /// Seed for deferred-vector synthesis.
    pub seed: u64,
}

impl Default for EmbeddingBuildOptions {
    fn default() -> Self {
        Self {
            target_size: 0,
            seed: DEFAULT_SYNTHESIS_SEED,
        }
    }
}

impl EmbeddingBuildOptions {
    /// Sets the target vocabulary size.
    pub fn with_target_size(
        self,
        target_size: usize,
    ) -> Self {
        Self {
            target_size,
            ..self
        }
    }

    /// Sets the synthesis seed.
    pub fn with_seed(
        self,
        seed: u64,
    ) -> Self {
        Self { seed, ..self }
    }
}

/// Run the full pipeline from input paths to a finalized matrix.
///
/// The stages consume the token pool strictly in order — special
/// extraction, base consumption, filtered fill — so each token lands in
/// exactly one row.
///
/// ## Arguments
/// * `vector_path` - the pretrained vector dump.
/// * `vocab_paths` - zero or more base-vocabulary sources.
/// * `options` - size bound and synthesis seed.
///
/// ## Returns
/// The vocabulary index map and the finalized matrix. Nothing is
/// written; pair with [`write_embedding_artifacts`].
pub fn build_embedding_path<P, Q>(
    vector_path: P,
    vocab_paths: &[Q],
    options: &EmbeddingBuildOptions,
) -> WLResult<(TokenIndexMap, EmbeddingMatrix)>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut store = PretrainedStore::load_path(vector_path)?;
    log::info!("parsed {} pretrained vectors ({}d)", store.len(), store.dim());

    let specials = SpecialTokenVectors::resolve(&mut store);
    log::debug!("resolved {} special tokens", specials.len());

    let base_tokens = load_base_vocab_paths(vocab_paths)?;
    log::debug!("base vocabulary: {} tokens", base_tokens.len());

    let mut assembly = assemble_vocabulary(
        store,
        &specials,
        &base_tokens,
        &AssemblyOptions::new(options.target_size),
    )?;
    log::debug!("synthesizing {} deferred tokens", assembly.deferred.len());

    DeferredSynthesizer::with_seed(options.seed).synthesize_into(&mut assembly);

    let (vocab, matrix) = finalize_matrix(assembly);
    log::info!("final vocabulary size: {}", vocab.len());

    Ok((vocab, matrix))
}

/// Persist both artifacts under an output prefix.
///
/// Writes `<prefix>.safetensors` and `<prefix>.vocab.json`. Call only
/// with a finalized matrix.
///
/// ## Arguments
/// * `prefix` - the output path prefix.
/// * `vocab` - the token → row-index map.
/// * `matrix` - the finalized matrix.
pub fn write_embedding_artifacts(
    prefix: &str,
    vocab: &TokenIndexMap,
    matrix: &EmbeddingMatrix,
) -> WLResult<()> {
    save_embedding_tensor_path(matrix, format!("{prefix}.safetensors"))?;
    save_vocab_index_path(vocab, format!("{prefix}.vocab.json"))?;
    Ok(())
}
