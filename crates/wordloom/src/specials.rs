//! # Special Token Resolution
//!
//! Extracts reserved sequence tokens from the pretrained store,
//! tolerating case variants, and removes them from the general pool.

use indexmap::IndexMap;

use crate::store::PretrainedStore;

/// Reserved surface forms probed in the pretrained store, in resolution
/// order: sentence boundaries, unknown word, out-of-vocabulary marker,
/// and sequence boundaries.
pub const SPECIAL_TOKEN_FORMS: &[&str] = &["<s>", "</s>", "<unk>", "<oov>", "<bos>", "<eos>"];

/// Vectors resolved from the store for reserved sequence tokens.
///
/// Resolution is a capability probe: forms absent from the store are
/// simply absent here, and the assembler decides which ones it cannot
/// live without.
#[derive(Debug, Clone, Default)]
pub struct SpecialTokenVectors {
    resolved: IndexMap<&'static str, Vec<f32>>,
}

impl SpecialTokenVectors {
    /// Probe the store for every reserved surface form.
    ///
    /// Each form is tried by its exact lowercase spelling, then by its
    /// uppercase spelling. Hits are removed from the pool and recorded
    /// under the canonical lowercase form.
    ///
    /// ## Arguments
    /// * `store` - the pool to extract from.
    ///
    /// ## Returns
    /// The resolved vectors.
    pub fn resolve(store: &mut PretrainedStore) -> Self {
        let mut resolved = IndexMap::new();
        for &form in SPECIAL_TOKEN_FORMS {
            let vector = store
                .take(form)
                .or_else(|| store.take(&form.to_uppercase()));
            if let Some(vector) = vector {
                resolved.insert(form, vector);
            }
        }
        Self { resolved }
    }

    /// Look up a resolved form by its canonical lowercase spelling.
    pub fn get(
        &self,
        form: &str,
    ) -> Option<&[f32]> {
        self.resolved.get(form).map(Vec::as_slice)
    }

    /// The sequence-start vector, from `<s>` or `<bos>`.
    pub fn sequence_start(&self) -> Option<&[f32]> {
        self.get("<s>").or_else(|| self.get("<bos>"))
    }

    /// The sequence-end vector, from `</s>` or `<eos>`.
    pub fn sequence_end(&self) -> Option<&[f32]> {
        self.get("</s>").or_else(|| self.get("<eos>"))
    }

    /// The number of resolved forms.
    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    /// Check if no forms resolved.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}
