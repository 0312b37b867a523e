//! # Vocabulary IO
//!
//! The base-vocabulary reader and the vocabulary-index artifact writer.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::WLResult,
    types::{TokenIndexMap, TokenSet},
};

/// Reserved names owned by the vocabulary-source format; these never
/// become base tokens.
pub const RESERVED_BASE_TOKENS: &[&str] = &[
    "<pad>", "<bos>", "<eos>", "<unk>", "<s>", "</s>", "<blank>", "<oov>",
];

/// Read one base-vocabulary source into `base`.
///
/// The token is the first whitespace field of each line; trailing fields
/// (frequency counts) are ignored, as are blank lines and reserved
/// names. Duplicates collapse silently.
///
/// ## Arguments
/// * `reader` - the line reader over the source.
/// * `base` - the set to extend.
pub fn read_base_vocab<R: BufRead>(
    reader: R,
    base: &mut TokenSet,
) -> WLResult<()> {
    for line in reader.lines() {
        let line = line?;
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };
        if RESERVED_BASE_TOKENS.contains(&token) {
            continue;
        }
        base.insert(token.to_owned());
    }
    Ok(())
}

/// Read the union of zero or more base-vocabulary files.
///
/// ## Arguments
/// * `paths` - the source paths, merged in order.
pub fn load_base_vocab_paths<P: AsRef<Path>>(paths: &[P]) -> WLResult<TokenSet> {
    let mut base = TokenSet::default();
    for path in paths {
        let reader = BufReader::new(File::open(path)?);
        read_base_vocab(reader, &mut base)?;
    }
    Ok(base)
}

/// Write the token → row-index mapping as a JSON object.
///
/// Key order is insertion order (row order); non-ASCII tokens are
/// written unescaped.
pub fn write_vocab_index<W: Write>(
    vocab: &TokenIndexMap,
    writer: &mut W,
) -> WLResult<()> {
    serde_json::to_writer(&mut *writer, vocab)?;
    writer.flush()?;
    Ok(())
}

/// Write the vocabulary mapping to a file.
pub fn save_vocab_index_path<P: AsRef<Path>>(
    vocab: &TokenIndexMap,
    path: P,
) -> WLResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_vocab_index(vocab, &mut writer)
}
