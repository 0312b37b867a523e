//! # Embedding Matrix Finalization
//!
//! Concatenation is already implicit in the assembly row order; this
//! module rewrites the `<unk>` row with the global mean, downcasts to
//! half precision, and freezes the result.

use half::f16;

use crate::{
    assembly::{UNK_ROW, VocabAssembly},
    types::TokenIndexMap,
};

/// The finalized half-precision embedding matrix.
///
/// Row-major, shape `[rows, dim]`; immutable once built. The downcast is
/// a deliberate space/precision trade-off, and consumers must tolerate
/// the precision loss.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    data: Vec<f16>,
    rows: usize,
    dim: usize,
}

impl EmbeddingMatrix {
    /// The number of rows (the vocabulary size).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns (the vector width).
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The row-major half-precision values.
    pub fn data(&self) -> &[f16] {
        &self.data
    }

    /// Row `index`, widened back to f32.
    pub fn row_f32(
        &self,
        index: usize,
    ) -> Vec<f32> {
        self.data[index * self.dim..(index + 1) * self.dim]
            .iter()
            .map(|value| value.to_f32())
            .collect()
    }

    /// The little-endian byte image of the matrix.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|value| value.to_le_bytes())
            .collect()
    }
}

/// Finalize an assembly into the vocabulary map and matrix.
///
/// The `<unk>` row is overwritten with the arithmetic mean of every row
/// — deferred rows included, the placeholder `<unk>` row counted as
/// zeros — and every value is then downcast to f16.
///
/// ## Arguments
/// * `assembly` - a fully synthesized assembly (no deferred tokens left).
///
/// ## Returns
/// The token → row-index map and the finalized matrix.
pub fn finalize_matrix(mut assembly: VocabAssembly) -> (TokenIndexMap, EmbeddingMatrix) {
    debug_assert!(
        assembly.deferred.is_empty(),
        "deferred tokens not yet synthesized"
    );

    let rows = assembly.rows.len();
    let dim = assembly.dim;

    let mut mean = vec![0.0f32; dim];
    for row in &assembly.rows {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in &mut mean {
        *m /= rows as f32;
    }
    assembly.rows[UNK_ROW] = mean;

    let data: Vec<f16> = assembly
        .rows
        .iter()
        .flat_map(|row| row.iter().map(|&value| f16::from_f32(value)))
        .collect();

    let vocab: TokenIndexMap = assembly
        .tokens
        .into_iter()
        .enumerate()
        .map(|(index, token)| (token, index))
        .collect();

    (vocab, EmbeddingMatrix { data, rows, dim })
}
