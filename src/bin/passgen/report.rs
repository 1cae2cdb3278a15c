//! Status output on stderr: the strength summary and the length rejection indicator.

use console::style;
use serde::Serialize;

use passgen::{InvalidLengthError, Secret, Strength};

#[derive(Serialize)]
pub(crate) struct PasswordReport<'a> {
    pub password: &'a Secret,
    pub length: usize,
    pub pool_size: usize,
    pub entropy_bits: f64,
    pub strength: Strength,
}

pub(crate) fn strength(pool_size: usize, entropy_bits: f64, strength: Strength) {
    let verdict = match strength {
        Strength::Weak => style(strength).red(),
        Strength::Fair => style(strength).yellow(),
        Strength::Strong | Strength::VeryStrong => style(strength).green(),
    };
    eprintln!(
        "{} {:.1} bits ({}), {} characters in the pool",
        style("Entropy:").dim(),
        entropy_bits,
        verdict,
        pool_size
    );
}

pub(crate) fn rejected_length(err: &InvalidLengthError) {
    eprintln!("{} {}", style("Invalid length:").red().bold(), err);
}

pub(crate) fn accepted_length(length: usize) {
    eprintln!("{} {}", style("Length:").green().bold(), length);
}
