use std::num::{IntErrorKind, NonZeroUsize};

/// The longest password that will be generated, in characters.
pub const MAX_LENGTH: usize = 1 << 20;

/// Everything needed to generate one password. The length has already been validated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationRequest {
    length: NonZeroUsize,
    extra_symbols: Vec<char>,
}

impl GenerationRequest {
    pub fn new(length: i64, extra_symbols: Vec<char>) -> Result<Self, InvalidLengthError> {
        if length < 0 {
            return Err(InvalidLengthRepr::Negative.into());
        }
        let length = match usize::try_from(length) {
            Ok(length) if length <= MAX_LENGTH => length,
            _ => return Err(InvalidLengthRepr::TooLong.into()),
        };
        let length = NonZeroUsize::new(length).ok_or(InvalidLengthRepr::Zero)?;
        Ok(GenerationRequest {
            length,
            extra_symbols,
        })
    }

    /// Build a request from user-entered length text.
    pub fn parse(length: &str, extra_symbols: Vec<char>) -> Result<Self, InvalidLengthError> {
        let length = length.trim();
        if length.is_empty() {
            return Err(InvalidLengthRepr::Missing.into());
        }
        let length = length.parse::<i64>().map_err(|err| match err.kind() {
            IntErrorKind::NegOverflow => InvalidLengthRepr::Negative,
            IntErrorKind::PosOverflow => InvalidLengthRepr::TooLong,
            _ => InvalidLengthRepr::NotANumber,
        })?;
        Self::new(length, extra_symbols)
    }

    pub fn length(&self) -> usize {
        self.length.get()
    }

    pub fn extra_symbols(&self) -> &[char] {
        &self.extra_symbols
    }
}

/// The requested password length was unusable, so nothing was generated.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct InvalidLengthError(InvalidLengthRepr);

impl InvalidLengthError {
    pub fn kind(&self) -> InvalidLengthKind {
        match self.0 {
            InvalidLengthRepr::Missing => InvalidLengthKind::Missing,
            InvalidLengthRepr::NotANumber => InvalidLengthKind::NotANumber,
            InvalidLengthRepr::Zero => InvalidLengthKind::Zero,
            InvalidLengthRepr::Negative => InvalidLengthKind::Negative,
            InvalidLengthRepr::TooLong => InvalidLengthKind::TooLong,
        }
    }
}

impl From<InvalidLengthRepr> for InvalidLengthError {
    fn from(err: InvalidLengthRepr) -> InvalidLengthError {
        InvalidLengthError(err)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvalidLengthKind {
    Missing,
    NotANumber,
    Zero,
    Negative,
    TooLong,
}

#[derive(Debug, thiserror::Error)]
enum InvalidLengthRepr {
    #[error("no length was given")]
    Missing,
    #[error("the length must be a whole number")]
    NotANumber,
    #[error("the length must be at least 1, not 0")]
    Zero,
    #[error("the length must be at least 1, not negative")]
    Negative,
    #[error("the length must be at most {}", MAX_LENGTH)]
    TooLong,
}
