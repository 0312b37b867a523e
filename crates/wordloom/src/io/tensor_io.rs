//! # Tensor Artifact IO
//!
//! Writes the finalized matrix as a single-tensor safetensors container,
//! and reads it back for verification.

use std::{collections::HashMap, fs, path::Path};

use half::f16;
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use crate::{errors::WLResult, matrix::EmbeddingMatrix};

/// Name of the embedding tensor inside the container.
pub const EMBEDDING_TENSOR_NAME: &str = "embedding";

/// Write the matrix to a safetensors file.
///
/// One `F16` tensor named [`EMBEDDING_TENSOR_NAME`], shape
/// `[vocab_size, dim]`, row-major little-endian.
///
/// ## Arguments
/// * `matrix` - the finalized matrix.
/// * `path` - the output path.
pub fn save_embedding_tensor_path<P: AsRef<Path>>(
    matrix: &EmbeddingMatrix,
    path: P,
) -> WLResult<()> {
    let bytes = matrix.to_le_bytes();
    let view = TensorView::new(Dtype::F16, vec![matrix.rows(), matrix.dim()], &bytes)?;

    safetensors::tensor::serialize_to_file(
        [(EMBEDDING_TENSOR_NAME, view)],
        &None::<HashMap<String, String>>,
        path.as_ref(),
    )?;

    Ok(())
}

/// Read an embedding tensor back, widened to f32.
///
/// ## Returns
/// `(rows, dim, row_major_values)`.
pub fn load_embedding_tensor_path<P: AsRef<Path>>(
    path: P
) -> WLResult<(usize, usize, Vec<f32>)> {
    let buffer = fs::read(path)?;
    let tensors = SafeTensors::deserialize(&buffer)?;
    let tensor = tensors.tensor(EMBEDDING_TENSOR_NAME)?;

    let rows = tensor.shape()[0];
    let dim = tensor.shape()[1];
    let values = tensor
        .data()
        .chunks_exact(2)
        .map(|pair| f16::from_le_bytes([pair[0], pair[1]]).to_f32())
        .collect();

    Ok((rows, dim, values))
}
