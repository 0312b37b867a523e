//! # `wordloom` Embedding Vocabulary Builder
//!
//! Builds a fixed-size vocabulary and its dense embedding matrix from a
//! pretrained word-vector dump (`GloVe`/`fastText`-style text files), for
//! consumption by a downstream sequence model.
//!
//! Every token the model will see at inference gets a concrete vector:
//! * the reserved sequence tokens `<pad>`, `<bos>`, `<eos>`, `<unk>`;
//! * a caller-supplied "must include" base vocabulary;
//! * a size-bounded slice of the remaining pretrained tokens.
//!
//! Base tokens missing from the store are synthesized from a seeded
//! random sample-mean rather than dropped, so the whole build is
//! deterministic for identical inputs and seed.
//!
//! See:
//! * [`store`] to parse the pretrained vector dump.
//! * [`specials`] to resolve reserved sequence tokens.
//! * [`assembly`] for the merge-and-size-bound core.
//! * [`synthesis`] for deferred-vector initialization.
//! * [`matrix`] for finalization and the half-precision downcast.
//! * [`io`] for the base-vocabulary reader and artifact writers.
//! * [`pipeline`] for one-call orchestration of all of the above.
#![warn(missing_docs, unused)]

pub mod assembly;
pub mod errors;
pub mod io;
pub mod matrix;
pub mod pipeline;
pub mod specials;
pub mod store;
pub mod synthesis;
pub mod types;

#[doc(inline)]
pub use assembly::{AssemblyOptions, VocabAssembly, assemble_vocabulary};
#[doc(inline)]
pub use errors::{WLResult, WordloomError};
#[doc(inline)]
pub use matrix::{EmbeddingMatrix, finalize_matrix};
#[doc(inline)]
pub use pipeline::{EmbeddingBuildOptions, build_embedding_path, write_embedding_artifacts};
#[doc(inline)]
pub use specials::SpecialTokenVectors;
#[doc(inline)]
pub use store::PretrainedStore;
#[doc(inline)]
pub use synthesis::DeferredSynthesizer;
#[doc(inline)]
pub use types::{TokenIndexMap, TokenSet};
