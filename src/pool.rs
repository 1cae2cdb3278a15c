//! The set of characters a password is sampled from.

use std::collections::HashMap;
use std::fmt;

pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";

/// An optional group of symbols that can be mixed into the pool.
///
/// Most options add a single character; the bracket-like ones add both halves of the pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SymbolOption {
    label: &'static str,
}

impl SymbolOption {
    const fn new(label: &'static str) -> SymbolOption {
        SymbolOption { label }
    }

    /// The label the option is selected by. Also the characters it contributes.
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn chars(&self) -> impl Iterator<Item = char> {
        self.label.chars()
    }
}

impl fmt::Display for SymbolOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

/// Every symbol option, in display order.
pub static SYMBOL_OPTIONS: [SymbolOption; 21] = [
    SymbolOption::new("`"),
    SymbolOption::new("~"),
    SymbolOption::new("!"),
    SymbolOption::new("@"),
    SymbolOption::new("#"),
    SymbolOption::new("$"),
    SymbolOption::new("%"),
    SymbolOption::new("^"),
    SymbolOption::new("&"),
    SymbolOption::new("*"),
    SymbolOption::new("+"),
    SymbolOption::new("-"),
    SymbolOption::new("="),
    SymbolOption::new("_"),
    SymbolOption::new(":"),
    SymbolOption::new("."),
    SymbolOption::new(","),
    SymbolOption::new("\\/"),
    SymbolOption::new("[]"),
    SymbolOption::new("()"),
    SymbolOption::new("{}"),
];

#[derive(Debug, thiserror::Error)]
#[error("no symbol option is labelled {0:?}; run `passgen symbols` to list them")]
pub struct UnknownSymbolError(String);

impl UnknownSymbolError {
    pub fn label(&self) -> &str {
        &self.0
    }
}

/// Resolve symbol option labels into the characters they contribute.
///
/// The result follows the order of [`SYMBOL_OPTIONS`], not the order of `labels`, and a label
/// given twice is only counted once.
pub fn symbols_for<S: AsRef<str>>(labels: &[S]) -> Result<Vec<char>, UnknownSymbolError> {
    let mut selected = [false; SYMBOL_OPTIONS.len()];
    for label in labels {
        let label = label.as_ref();
        let idx = SYMBOL_OPTIONS
            .iter()
            .position(|opt| opt.label == label)
            .ok_or_else(|| UnknownSymbolError(label.to_owned()))?;
        selected[idx] = true;
    }
    Ok(SYMBOL_OPTIONS
        .iter()
        .zip(selected)
        .filter(|(_, selected)| *selected)
        .flat_map(|(opt, _)| opt.chars())
        .collect())
}

/// The characters a single password is drawn from.
///
/// Always starts with the 62 alphanumerics, followed by whatever extra symbols were asked for.
/// Duplicates are kept, so a symbol supplied twice is twice as likely to be picked.
#[derive(Clone, Debug)]
pub struct CharacterPool {
    chars: Vec<char>,
}

impl CharacterPool {
    pub fn new(extra_symbols: &[char]) -> CharacterPool {
        let mut chars = Vec::with_capacity(62 + extra_symbols.len());
        chars.extend(LOWERCASE.chars());
        chars.extend(UPPERCASE.chars());
        chars.extend(DIGITS.chars());
        chars.extend_from_slice(extra_symbols);
        CharacterPool { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    // Never true, the alphanumerics are always there.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [char] {
        &mut self.chars
    }

    /// Entropy, in bits, of a password of `length` characters sampled from this pool.
    ///
    /// Each position is a uniform pick over the pool, so a character that appears `k` times has
    /// probability `k / len()`. The per-character figure is the Shannon entropy over the distinct
    /// characters; with no duplicates it is just `log2(len())`.
    pub fn entropy_bits(&self, length: usize) -> f64 {
        let mut counts: HashMap<char, usize> = HashMap::new();
        for &ch in &self.chars {
            *counts.entry(ch).or_default() += 1;
        }
        let total = self.chars.len() as f64;
        let per_char: f64 = counts
            .values()
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum();
        length as f64 * per_char
    }
}

/// A rough verdict on how guessable a password is, from its entropy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strength {
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_entropy_bits(bits: f64) -> Strength {
        if bits < 45.0 {
            Strength::Weak
        } else if bits < 60.0 {
            Strength::Fair
        } else if bits < 80.0 {
            Strength::Strong
        } else {
            Strength::VeryStrong
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strength::Weak => "weak",
            Strength::Fair => "fair",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very strong",
        })
    }
}
