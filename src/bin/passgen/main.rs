use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod clipboard;
mod form;
mod report;
mod table;

#[derive(Parser)]
#[command(version, about = "Generate random passwords from letters, digits and chosen symbols.")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
    #[command(flatten)]
    generate: GenerateArgs,
    /// Log more; repeat for even more.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand)]
enum Command {
    /// List the symbol options that can be passed to `--symbol`.
    Symbols,
    /// Fill in the length and symbols interactively, then optionally copy the result.
    Form,
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Password length.
    #[arg(short, long, env = "PASSGEN_LENGTH", default_value = "16")]
    length: String,
    /// Add a symbol option to the pool, by label (e.g. `!` or `[]`). May be repeated.
    #[arg(short, long = "symbol", value_name = "LABEL")]
    symbols: Vec<String>,
    /// Add every symbol option to the pool.
    #[arg(long, conflicts_with = "symbols")]
    all_symbols: bool,
    /// Extra characters to add to the pool, as-is.
    #[arg(long, value_name = "CHARS")]
    extra: Option<String>,
    /// How many passwords to generate.
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,
    /// Copy the generated password(s) to the clipboard.
    #[arg(short, long)]
    copy: bool,
    /// Print each password as a JSON object with its strength details.
    #[arg(long)]
    json: bool,
    /// Don't print the strength report.
    #[arg(short, long)]
    quiet: bool,
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Some(Command::Symbols) => list_symbols()?,
        Some(Command::Form) => form::run_form()?,
        None => generate_passwords(args.generate, io::stdout().lock())?,
    }

    Ok(())
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(ProgError::InvalidLength(err)) => {
            report::rejected_length(&err);
            process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn generate_passwords(args: GenerateArgs, mut output: impl Write) -> Result<(), ProgError> {
    let mut extra_symbols = if args.all_symbols {
        passgen::SYMBOL_OPTIONS
            .iter()
            .flat_map(|opt| opt.chars())
            .collect()
    } else {
        passgen::symbols_for(&args.symbols)?
    };
    if let Some(extra) = &args.extra {
        extra_symbols.extend(extra.chars());
    }

    let request = passgen::GenerationRequest::parse(&args.length, extra_symbols)?;
    tracing::info!(
        length = request.length(),
        extra_symbols = request.extra_symbols().len(),
        count = args.count,
        "length accepted"
    );

    let pool = passgen::CharacterPool::new(request.extra_symbols());
    let entropy_bits = pool.entropy_bits(request.length());
    let strength = passgen::Strength::from_entropy_bits(entropy_bits);

    let mut copied = Vec::new();
    for _ in 0..args.count {
        let password = passgen::generate_for(&request);
        if args.json {
            let line = report::PasswordReport {
                password: &password,
                length: request.length(),
                pool_size: pool.len(),
                entropy_bits,
                strength,
            };
            serde_json::to_writer(&mut output, &line)
                .context("failed to write password as JSON")?;
            writeln!(output).context("failed to write password")?;
        } else {
            writeln!(output, "{}", password.as_str()).context("failed to write password")?;
        }
        if args.copy {
            copied.push(password);
        }
    }
    output.flush().context("failed to flush output")?;

    if !args.quiet && !args.json {
        report::strength(pool.len(), entropy_bits, strength);
    }

    if args.copy {
        let text = copied
            .iter()
            .map(|pw| pw.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let text = passgen::Secret::from(text);
        clipboard::copy(&text)?;
    }
    Ok(())
}

fn list_symbols() -> Result<(), ProgError> {
    struct SymbolRow {
        label: &'static str,
        chars: String,
    }

    impl crate::table::TableDisplay for SymbolRow {
        fn columns() -> usize {
            2
        }

        fn column_name(column_index: usize) -> &'static str {
            match column_index {
                0 => "Label",
                1 => "Adds",
                _ => unreachable!(),
            }
        }

        fn item(&self, column_index: usize) -> &str {
            match column_index {
                0 => self.label,
                1 => self.chars.as_str(),
                _ => unreachable!(),
            }
        }
    }

    let rows = passgen::SYMBOL_OPTIONS
        .iter()
        .map(|opt| SymbolRow {
            label: opt.label(),
            chars: opt
                .chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" "),
        })
        .collect::<Vec<_>>();
    crate::table::display_table(&rows, io::stdout()).context("failed to output table")?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Invalid length: {0}")]
    InvalidLength(#[from] passgen::InvalidLengthError),
    #[error(transparent)]
    UnknownSymbol(#[from] passgen::UnknownSymbolError),
    #[error("No password to copy.")]
    NothingToCopy,
    #[error("Form cancelled; exiting.")]
    FormCancelled,
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn repeated_symbol_flags_are_collected() {
        let args = Args::try_parse_from(["passgen", "-l", "12", "-s", "!", "-s", "[]"]).unwrap();
        assert_eq!(args.generate.length, "12");
        assert_eq!(args.generate.symbols, vec!["!", "[]"]);
        assert!(args.command.is_none());
    }

    #[test]
    fn count_of_zero_is_rejected() {
        assert!(Args::try_parse_from(["passgen", "-n", "0"]).is_err());
    }

    #[test]
    fn negative_length_reaches_validation() {
        let args = Args::try_parse_from(["passgen", "--length=-5"]).unwrap();
        let mut out = Vec::<u8>::new();
        let err = generate_passwords(args.generate, &mut out).unwrap_err();
        assert!(matches!(err, ProgError::InvalidLength(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_symbol_is_reported() {
        let args = Args::try_parse_from(["passgen", "-s", "<>"]).unwrap();
        let err = generate_passwords(args.generate, Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, ProgError::UnknownSymbol(_)));
    }

    fn generate_output(argv: &[&str]) -> String {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        generate_passwords(args.generate, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn count_prints_one_password_per_line() {
        let out = generate_output(&["passgen", "-q", "-l", "10", "-n", "3"]);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        for line in lines {
            assert_eq!(line.chars().count(), 10);
            assert!(line.chars().all(|c| c.is_ascii_alphanumeric()), "{line}");
        }
    }

    #[test]
    fn json_output_carries_the_strength_details() {
        let out = generate_output(&["passgen", "--json", "-l", "16", "-n", "2"]);
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            let object = value.as_object().unwrap();
            let mut keys = object.keys().map(String::as_str).collect::<Vec<_>>();
            keys.sort_unstable();
            assert_eq!(
                keys,
                ["entropy_bits", "length", "password", "pool_size", "strength"]
            );
            assert_eq!(value["password"].as_str().unwrap().chars().count(), 16);
            assert_eq!(value["length"], 16);
            assert_eq!(value["pool_size"], 62);
            assert_eq!(value["strength"], "very-strong");
            let bits = value["entropy_bits"].as_f64().unwrap();
            assert!((bits - 95.27).abs() < 0.01, "{bits}");
        }
    }

    #[test]
    fn all_symbols_and_extra_grow_the_pool() {
        let out = generate_output(&["passgen", "--json", "--all-symbols", "--extra", "<>"]);
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["pool_size"], 62 + 25 + 2);
    }

    #[test]
    fn extra_characters_can_appear_in_the_output() {
        // A single extra symbol repeated many times dominates the pool.
        let extra = "~".repeat(5000);
        let out = generate_output(&["passgen", "-q", "-l", "64", "--extra", extra.as_str()]);
        assert!(out.contains('~'), "{out}");
    }
}
