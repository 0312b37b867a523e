//! # Artifact IO
//!
//! Readers for the base-vocabulary sources and writers for the two
//! output artifacts: the tensor container and the vocabulary index.

pub mod tensor_io;
pub mod vocab_io;
