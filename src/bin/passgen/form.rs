//! The interactive form: pick symbols, enter a length, generate, and maybe copy.

use anyhow::Context;
use dialoguer::theme::ColorfulTheme;

use crate::{clipboard, report, ProgError};

pub(crate) fn run_form() -> Result<(), ProgError> {
    let theme = ColorfulTheme::default();
    let labels = passgen::SYMBOL_OPTIONS
        .iter()
        .map(|opt| opt.label())
        .collect::<Vec<_>>();

    loop {
        let selected = dialoguer::MultiSelect::with_theme(&theme)
            .with_prompt("Optional characters to use (space toggles, enter accepts)")
            .items(&labels)
            .interact_opt()
            .context("failed to query your selection")?
            .ok_or(ProgError::FormCancelled)?;

        let request = loop {
            let length = dialoguer::Input::<String>::with_theme(&theme)
                .with_prompt("Password length")
                .allow_empty(true)
                .interact_text()
                .context("failed to read the password length")?;
            match request_from_form(&length, &selected) {
                Ok(request) => break request,
                Err(err) => report::rejected_length(&err),
            }
        };
        report::accepted_length(request.length());

        let password = passgen::generate_for(&request);
        println!("{}", password.as_str());
        let pool = passgen::CharacterPool::new(request.extra_symbols());
        let entropy_bits = pool.entropy_bits(request.length());
        report::strength(
            pool.len(),
            entropy_bits,
            passgen::Strength::from_entropy_bits(entropy_bits),
        );

        let copy = dialoguer::Confirm::with_theme(&theme)
            .with_prompt("Copy to the clipboard?")
            .default(true)
            .interact()
            .context("failed to prompt you, somehow")?;
        if copy {
            clipboard::copy(&password)?;
        }

        let again = dialoguer::Confirm::with_theme(&theme)
            .with_prompt("Generate another?")
            .default(false)
            .interact()
            .context("failed to prompt you, somehow")?;
        if !again {
            return Ok(());
        }
    }
}

/// Turn the form's current values into a request. `selected` holds indices into
/// [`passgen::SYMBOL_OPTIONS`].
fn request_from_form(
    length: &str,
    selected: &[usize],
) -> Result<passgen::GenerationRequest, passgen::InvalidLengthError> {
    let extra_symbols = selected
        .iter()
        .filter_map(|&idx| passgen::SYMBOL_OPTIONS.get(idx))
        .flat_map(|opt| opt.chars())
        .collect();
    passgen::GenerationRequest::parse(length, extra_symbols)
}

#[cfg(test)]
mod tests {
    use passgen::InvalidLengthKind;

    use super::*;

    #[test]
    fn selected_toggles_become_extra_symbols() {
        // 2 is `!`, 18 is `[]`.
        let request = request_from_form("10", &[2, 18]).unwrap();
        assert_eq!(request.length(), 10);
        assert_eq!(request.extra_symbols(), &['!', '[', ']']);
    }

    #[test]
    fn invalid_length_is_rejected_whatever_the_symbols() {
        let err = request_from_form("0", &[2]).unwrap_err();
        assert_eq!(err.kind(), InvalidLengthKind::Zero);
        let err = request_from_form("", &[]).unwrap_err();
        assert_eq!(err.kind(), InvalidLengthKind::Missing);
    }
}
