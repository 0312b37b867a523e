//! # Pretrained Vector Store
//!
//! Parses `GloVe`/`fastText`-style text dumps (`token v_1 v_2 … v_D` per
//! line) into an insertion-ordered token → vector pool.
//!
//! The pool is consumed destructively by the later pipeline stages:
//! special-token extraction, base-token consumption, then the filtered
//! fill. Each token is assigned to exactly one destination.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indexmap::IndexMap;

use crate::errors::{WLResult, WordloomError};

/// One pool entry; spent entries are tombstoned in place so consumption
/// never disturbs the order of the remaining pool.
type PoolSlot = Option<Vec<f32>>;

/// The parsed pretrained token → vector pool.
///
/// All vectors share one dimensionality, fixed at parse time. Iteration
/// order is load order.
#[derive(Debug, Clone, Default)]
pub struct PretrainedStore {
    pool: IndexMap<String, PoolSlot>,
    live: usize,
    dim: usize,
}

impl PretrainedStore {
    /// Parse a pretrained vector dump from a line reader.
    ///
    /// The first vector line establishes the dimensionality `D`; any
    /// later line with a different value count, or with a field that does
    /// not parse as a float, is a malformed-input error. A
    /// `fastText`-style leading header line of exactly two integer fields
    /// is skipped, so both `GloVe` and `.vec` dumps parse.
    ///
    /// ## Arguments
    /// * `reader` - the line reader over the dump.
    ///
    /// ## Returns
    /// The parsed store.
    pub fn from_reader<R: BufRead>(reader: R) -> WLResult<Self> {
        let mut store = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;

            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                return Err(WordloomError::MalformedVectorLine {
                    line: number,
                    expected: store.dim.max(1),
                    found: 0,
                });
            };
            let fields: Vec<&str> = fields.collect();

            if index == 0 && fields.len() == 1 && is_header_line(token, fields[0]) {
                continue;
            }

            let mut vector = Vec::with_capacity(fields.len());
            for field in &fields {
                let value: f32 =
                    field
                        .parse()
                        .map_err(|_| WordloomError::MalformedVectorValue {
                            line: number,
                            value: (*field).to_owned(),
                        })?;
                vector.push(value);
            }

            if store.dim == 0 {
                if vector.is_empty() {
                    return Err(WordloomError::MalformedVectorLine {
                        line: number,
                        expected: 1,
                        found: 0,
                    });
                }
                store.dim = vector.len();
            } else if vector.len() != store.dim {
                return Err(WordloomError::MalformedVectorLine {
                    line: number,
                    expected: store.dim,
                    found: vector.len(),
                });
            }

            // Duplicates keep their first position; the last value wins.
            if store.pool.insert(token.to_owned(), Some(vector)).is_none() {
                store.live += 1;
            }
        }

        Ok(store)
    }

    /// Parse a pretrained vector dump from a file.
    ///
    /// ## Arguments
    /// * `path` - the path to the dump.
    pub fn load_path<P: AsRef<Path>>(path: P) -> WLResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The shared vector dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The number of unconsumed tokens in the pool.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Check if the pool has been fully consumed.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Look at a live token's vector without consuming it.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<&[f32]> {
        self.pool.get(token).and_then(|slot| slot.as_deref())
    }

    /// Check whether a token is live in the pool.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.get(token).is_some()
    }

    /// Consume a token, transferring ownership of its vector out of the
    /// pool. A second `take` of the same token returns `None`.
    pub fn take(
        &mut self,
        token: &str,
    ) -> Option<Vec<f32>> {
        let taken = self.pool.get_mut(token)?.take();
        if taken.is_some() {
            self.live -= 1;
        }
        taken
    }

    /// Insert `alias` with a copy of `source`'s vector.
    ///
    /// A no-op when the alias already has a pool entry (live or spent) or
    /// when the source is not live.
    ///
    /// ## Returns
    /// `true` if the alias was inserted.
    pub fn alias_token(
        &mut self,
        alias: &str,
        source: &str,
    ) -> bool {
        if self.pool.contains_key(alias) {
            return false;
        }
        let Some(vector) = self.get(source).map(<[f32]>::to_vec) else {
            return false;
        };
        self.pool.insert(alias.to_owned(), Some(vector));
        self.live += 1;
        true
    }

    /// Iterate the live tokens in pool order.
    pub fn live_tokens(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.pool
            .iter()
            .filter_map(|(token, slot)| slot.as_deref().map(|vector| (token.as_str(), vector)))
    }
}

/// A `fastText` `.vec` header is `count dim`: exactly two integer fields.
fn is_header_line(
    first: &str,
    second: &str,
) -> bool {
    first.parse::<usize>().is_ok() && second.parse::<usize>().is_ok()
}
