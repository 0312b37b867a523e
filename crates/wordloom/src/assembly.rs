//! # Vocabulary Assembly
//!
//! The merge core: special tokens, base tokens, and a size-bounded slice
//! of the remaining alphabetic pretrained tokens become one ordered
//! vocabulary with one embedding row per token.

use crate::{
    errors::{WLResult, WordloomError},
    specials::SpecialTokenVectors,
    store::PretrainedStore,
    types::TokenSet,
};

/// The padding token, always row 0.
pub const PAD_TOKEN: &str = "<pad>";

/// The sequence-start token, always row 1.
pub const BOS_TOKEN: &str = "<bos>";

/// The sequence-end token, always row 2.
pub const EOS_TOKEN: &str = "<eos>";

/// The unknown-word token, always row 3.
pub const UNK_TOKEN: &str = "<unk>";

/// Row index of the `<unk>` vector.
pub const UNK_ROW: usize = 3;

/// The escaped-hyphen surface form some tokenized corpora emit; aliased
/// to the plain hyphen's vector when the store only knows the plain form.
const ESCAPED_HYPHEN: &str = "\\-";

/// Options for [`assemble_vocabulary`].
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Target vocabulary size; 0 admits every qualifying pretrained token.
    pub target_size: usize,
}

impl AssemblyOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `target_size` - the target vocabulary size; 0 means unbounded.
    pub fn new(target_size: usize) -> Self {
        Self { target_size }
    }

    /// Sets the target vocabulary size.
    pub fn with_target_size(
        self,
        target_size: usize,
    ) -> Self {
        Self { target_size }
    }
}

/// An assembled vocabulary and its embedding rows.
///
/// Row `i` is the vector for token `i`. Deferred tokens have no row yet;
/// they are appended by the synthesizer, 1:1 with their rows.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabAssembly {
    /// Tokens in row order.
    pub tokens: Vec<String>,

    /// One embedding row per token, same order.
    pub rows: Vec<Vec<f32>>,

    /// Base tokens with no pretrained vector, in encounter order.
    pub deferred: Vec<String>,

    /// The shared vector width.
    pub dim: usize,
}

impl VocabAssembly {
    /// The number of tokens with an assigned row.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if no tokens are assembled.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn push(
        &mut self,
        token: &str,
        row: Vec<f32>,
    ) {
        self.tokens.push(token.to_owned());
        self.rows.push(row);
    }
}

/// Merge special, base, and pretrained tokens into one ordered vocabulary.
///
/// The store is taken by value: assembly is its final consumer, and the
/// hand-off makes the strict stage ordering explicit.
///
/// Order of the result: `<pad>`, `<bos>`, `<eos>`, `<unk>`, resolved base
/// tokens in set order, then admitted pretrained tokens in pool order.
/// Base tokens absent from the pool land in `deferred` instead.
///
/// ## Arguments
/// * `store` - the remaining pool, after special-token extraction.
/// * `specials` - the resolved special-token vectors.
/// * `base_tokens` - tokens that must appear in the output.
/// * `options` - the size bound.
///
/// ## Returns
/// The assembly, or [`WordloomError::MissingSpecialToken`] when the store
/// provides no sequence-boundary vectors — there is no synthesis path for
/// those.
pub fn assemble_vocabulary(
    mut store: PretrainedStore,
    specials: &SpecialTokenVectors,
    base_tokens: &TokenSet,
    options: &AssemblyOptions,
) -> WLResult<VocabAssembly> {
    let dim = store.dim();

    let bos = specials
        .sequence_start()
        .ok_or(WordloomError::MissingSpecialToken { token: BOS_TOKEN })?
        .to_vec();
    let eos = specials
        .sequence_end()
        .ok_or(WordloomError::MissingSpecialToken { token: EOS_TOKEN })?
        .to_vec();

    let mut assembly = VocabAssembly {
        tokens: vec![],
        rows: vec![],
        deferred: vec![],
        dim,
    };

    // The <pad> and <unk> rows are placeholders: <pad> stays inert, and
    // <unk> is rewritten with the global mean at finalization.
    assembly.push(PAD_TOKEN, vec![0.0; dim]);
    assembly.push(BOS_TOKEN, bos);
    assembly.push(EOS_TOKEN, eos);
    assembly.push(UNK_TOKEN, vec![0.0; dim]);

    store.alias_token(ESCAPED_HYPHEN, "-");

    for token in base_tokens {
        match store.take(token) {
            Some(row) => assembly.push(token, row),
            None => assembly.deferred.push(token.clone()),
        }
    }

    let budget = fill_budget(
        options.target_size,
        assembly.len(),
        assembly.deferred.len(),
    );
    let admitted: Vec<String> = store
        .live_tokens()
        .filter(|(token, _)| is_plain_lowercase(token))
        .map(|(token, _)| token.to_owned())
        .take(budget)
        .collect();
    for token in admitted {
        if let Some(row) = store.take(&token) {
            assembly.push(&token, row);
        }
    }

    Ok(assembly)
}

/// The fill budget saturates at zero: a target below the mandatory count
/// means "admit nothing", never a negative-length selection.
fn fill_budget(
    target_size: usize,
    assembled: usize,
    deferred: usize,
) -> usize {
    if target_size == 0 {
        usize::MAX
    } else {
        target_size.saturating_sub(assembled + deferred)
    }
}

/// Strictly lowercase ASCII alphabetic; excludes numerals, punctuation,
/// and proper-noun-cased forms from the auto-filled tail.
fn is_plain_lowercase(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_lowercase())
}
