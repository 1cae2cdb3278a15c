use serde::{Serialize, Serializer};
use zeroize::Zeroize;

pub mod password_generation;
mod pool;
mod request;

pub use password_generation::{generate, generate_for, generate_with_rng};
pub use pool::{
    symbols_for, CharacterPool, Strength, SymbolOption, UnknownSymbolError, DIGITS, LOWERCASE,
    SYMBOL_OPTIONS, UPPERCASE,
};
pub use request::{GenerationRequest, InvalidLengthError, InvalidLengthKind, MAX_LENGTH};

/// A generated password.
///
/// The contents never show up in `Debug` output, and the backing memory is zeroed when the value
/// is dropped.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of characters (not bytes) in the secret.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Serialize for Secret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
