//! Utilities for generating passwords.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng, SeedableRng};

use crate::{CharacterPool, GenerationRequest, InvalidLengthError, Secret};

/// Generate a password of `length` characters from the alphanumerics plus `extra_symbols`.
///
/// The length is checked before anything else happens; a length of zero or less, or one past
/// [`MAX_LENGTH`](crate::MAX_LENGTH), produces no password at all.
pub fn generate(length: i64, extra_symbols: &[char]) -> Result<Secret, InvalidLengthError> {
    let request = GenerationRequest::new(length, extra_symbols.to_vec())?;
    Ok(generate_for(&request))
}

/// Generate a password for an already validated request.
///
/// Each call seeds a fresh generator from the operating system's entropy source.
pub fn generate_for(request: &GenerationRequest) -> Secret {
    let mut rng = StdRng::from_entropy();
    generate_with_rng(&mut rng, request)
}

pub fn generate_with_rng<R>(rng: &mut R, request: &GenerationRequest) -> Secret
where
    R: Rng + CryptoRng,
{
    let mut pool = CharacterPool::new(request.extra_symbols());
    tracing::debug!(
        pool_size = pool.len(),
        length = request.length(),
        "generating password"
    );
    generate_random_password(rng, &mut pool, request.length())
}

/// Generate a simple, impossible-to-guess password by shuffling the pool and then randomly
/// sampling it, with replacement, `len` times.
///
/// The shuffle doesn't change the distribution of the output; every position is still an
/// independent uniform pick over the pool.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate_random_password<R>(rng: &mut R, pool: &mut CharacterPool, len: usize) -> Secret
where
    R: Rng + CryptoRng,
{
    pool.as_mut_slice().shuffle(rng);
    let chars = pool.as_slice();
    let mut secret = String::with_capacity(len);
    for _ in 0..len {
        secret.push(chars[rng.gen_range(0..chars.len())]);
    }
    Secret::from(secret)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn output_has_the_requested_length() {
        for len in [1, 8, 12, 64, 257] {
            let pw = generate(len, &['#']).unwrap();
            assert_eq!(pw.char_count(), len as usize);
        }
    }

    #[test]
    fn every_character_comes_from_the_pool() {
        let pool = CharacterPool::new(&['!', '@']);
        let pw = generate(12, &['!', '@']).unwrap();
        assert_eq!(pw.char_count(), 12);
        assert_eq!(pool.len(), 64);
        for ch in pw.as_str().chars() {
            assert!(pool.contains(ch), "{ch:?} is not in the pool");
        }
    }

    #[test]
    fn invalid_lengths_produce_nothing() {
        assert!(generate(0, &[]).is_err());
        assert!(generate(-5, &['!']).is_err());
        assert!(generate(i64::MAX, &[]).is_err());
        assert!(generate(2_147_483_648, &[]).is_err());
    }

    #[test]
    fn length_is_not_limited_by_pool_size() {
        let pw = generate(10_000, &[]).unwrap();
        assert_eq!(pw.char_count(), 10_000);
        assert!(pw.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_calls_differ() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let pw = generate(16, &[]).unwrap();
            assert!(seen.insert(pw.as_str().to_owned()), "repeated password");
        }
    }

    #[test]
    fn non_ascii_symbols_are_whole_characters() {
        let request = GenerationRequest::new(200, vec!['\u{e9}', '\u{2603}']).unwrap();
        let pw = generate_for(&request);
        assert_eq!(pw.char_count(), 200);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let request = GenerationRequest::new(20, vec!['!']).unwrap();
        let a = generate_with_rng(&mut StdRng::seed_from_u64(7), &request);
        let b = generate_with_rng(&mut StdRng::seed_from_u64(7), &request);
        let c = generate_with_rng(&mut StdRng::seed_from_u64(8), &request);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn a_symbol_only_pool_region_gets_sampled() {
        // With 2000 draws over 63 characters, '!' not showing up at all is vanishingly unlikely.
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = CharacterPool::new(&['!']);
        let pw = generate_random_password(&mut rng, &mut pool, 2000);
        assert!(pw.as_str().contains('!'));
    }
}
