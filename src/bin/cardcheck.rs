//! CLI tool for checking card numbers locally before they are sent to Stripe.
//!
//! # Usage
//!
//! ```bash
//! # Full validation: format, length, Luhn and network
//! cardcheck validate 4242424242424242
//! cardcheck validate "3782 822463 10005" --output json
//!
//! # Luhn checksum only
//! cardcheck luhn 79927398713
//!
//! # Network from the prefix
//! cardcheck detect 6011111111111117
//!
//! # Masking and display formatting
//! cardcheck mask 4242424242424242 --with-bin
//! cardcheck format 378282246310005 --separator -
//! ```
//!
//! Set `RUST_LOG` (or pass `-v`) to see log output on stderr.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stripe_lite::{
    classify_card_network, format, is_luhn_valid, mask, validate_any, CardNetwork,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cardcheck")]
#[command(author, version, about = "Offline card number checks for Stripe payments")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card number (spaces, dashes and dots allowed)
    Validate {
        /// Card number to validate
        card_number: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a card number passes the Luhn algorithm
    Luhn {
        /// Card number to check
        card_number: String,
    },

    /// Detect the card network from the number's prefix
    Detect {
        /// Card number (or partial number)
        card_number: String,
    },

    /// Mask a card number for display
    Mask {
        /// Card number to mask
        card_number: String,

        /// Keep the BIN (first 6 digits) visible
        #[arg(short, long)]
        with_bin: bool,
    },

    /// Group a card number the way it is printed on the card
    Format {
        /// Card number to format
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Report {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<CardNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_four: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ok = match cli.command {
        Commands::Validate {
            card_number,
            output,
        } => cmd_validate(&card_number, output),
        Commands::Luhn { card_number } => cmd_luhn(&card_number),
        Commands::Detect { card_number } => cmd_detect(&card_number),
        Commands::Mask {
            card_number,
            with_bin,
        } => cmd_mask(&card_number, with_bin),
        Commands::Format {
            card_number,
            separator,
        } => cmd_format(&card_number, &separator),
    };

    std::process::exit(if ok { 0 } else { 1 });
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "stripe_lite=debug,cardcheck=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Drops the separators `validate` also accepts, keeping anything else for
/// the strict checks to reject.
fn without_separators(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.'))
        .collect()
}

fn cmd_validate(card_number: &str, output: OutputFormat) -> bool {
    let report = match validate_any(card_number) {
        Ok(card) => Report {
            valid: true,
            network: Some(card.network()),
            last_four: Some(card.last_four()),
            masked: Some(card.masked()),
            error: None,
        },
        Err(e) => {
            tracing::debug!(card = %mask::mask_string(card_number), error = %e, "validation failed");
            Report {
                valid: false,
                network: None,
                last_four: None,
                masked: None,
                error: Some(e.to_string()),
            }
        }
    };

    match output {
        OutputFormat::Text => {
            println!("Valid: {}", if report.valid { "yes" } else { "no" });
            if let Some(network) = report.network {
                println!("Network: {network}");
            }
            if let Some(last_four) = &report.last_four {
                println!("Last Four: {last_four}");
            }
            if let Some(masked) = &report.masked {
                println!("Masked: {masked}");
            }
            if let Some(error) = &report.error {
                println!("Error: {error}");
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return false;
            }
        },
    }
    report.valid
}

fn cmd_luhn(card_number: &str) -> bool {
    match is_luhn_valid(&without_separators(card_number)) {
        Ok(true) => {
            println!("Luhn check: PASS");
            true
        }
        Ok(false) => {
            println!("Luhn check: FAIL");
            false
        }
        Err(e) => {
            eprintln!("Error: {e}");
            false
        }
    }
}

fn cmd_detect(card_number: &str) -> bool {
    let digits = without_separators(card_number);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        eprintln!("Error: expected digits, got {card_number:?}");
        return false;
    }

    let network = classify_card_network(&digits);
    println!("Detected Network: {network}");
    if network.is_known() {
        let lengths: Vec<String> = network
            .valid_lengths()
            .iter()
            .map(u8::to_string)
            .collect();
        println!("Valid Lengths: {}", lengths.join(", "));
    }
    true
}

fn cmd_mask(card_number: &str, with_bin: bool) -> bool {
    if with_bin {
        match validate_any(card_number) {
            Ok(card) => {
                println!("{}", card.masked_with_bin());
                true
            }
            Err(e) => {
                eprintln!("Error: {e}");
                false
            }
        }
    } else {
        println!("{}", mask::mask_string(card_number));
        true
    }
}

fn cmd_format(card_number: &str, separator: &str) -> bool {
    println!("{}", format::format_with_separator(card_number, separator));
    true
}
