//! Command-line interface for the wire mapper.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use roxmltree::Document;
use serde::Serialize;

use crate::classify::classify;
use crate::entities::EntityKind;
use crate::error::Result;
use crate::error_handler::check;
use crate::mapper::Form;
use crate::render::render;
use crate::response::GatewayResponse;
use crate::structure::Structure;

/// anet-wire - Inspect Authorize.Net XML payloads.
#[derive(Parser)]
#[command(name = "anet-wire")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an XML file into an entity and print it.
    Parse {
        /// Entity type (credit-card, address, payment-profile, customer-profile, transaction)
        entity: String,

        /// XML file to read
        file: PathBuf,

        /// Print the wire form instead of the canonical form
        #[arg(long)]
        wire: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },

    /// Render a YAML structure as XML.
    Render {
        /// YAML file to read
        file: PathBuf,

        /// Wrap the output in this element
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Classify a gateway error code and text.
    Classify {
        /// Error or message code (e.g., 6, E00027)
        code: String,

        /// Error text returned by the gateway
        text: Option<String>,
    },

    /// Check a gateway response file for errors.
    Check {
        /// Response XML file to read
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The inspected response reports a gateway failure.
    GatewayFault,
}

/// Run the CLI.
pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            entity,
            file,
            wire,
            format,
        } => parse_command(&entity, &file, wire, format),
        Commands::Render { file, tag } => render_command(&file, tag.as_deref()),
        Commands::Classify { code, text } => classify_command(&code, text.as_deref()),
        Commands::Check { file } => check_command(&file),
    }
}

/// Execute the parse command.
fn parse_command(entity: &str, file: &Path, wire: bool, format: OutputFormat) -> Result<Outcome> {
    let kind: EntityKind = entity.parse()?;
    let xml = std::fs::read_to_string(file)?;
    let doc = Document::parse(&xml)?;

    let form = if wire {
        Form::Wire {
            include_absent: false,
        }
    } else {
        Form::Canonical
    };
    let fields = kind.parse_and_project(&doc, form).unwrap_or_default();

    print!("{}", to_output(&fields, format)?);
    Ok(Outcome::Success)
}

/// Execute the render command.
fn render_command(file: &Path, tag: Option<&str>) -> Result<Outcome> {
    let yaml = std::fs::read_to_string(file)?;
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(&yaml)?;

    println!("{}", render(&Structure::from(value), tag));
    Ok(Outcome::Success)
}

/// Execute the classify command.
fn classify_command(code: &str, text: Option<&str>) -> Result<Outcome> {
    let error = classify(Some(code), text);

    println!(
        "{} {}",
        style("Category:").bold(),
        error
            .category
            .map_or_else(|| style("unknown").dim().to_string(), |c| style(c).cyan().to_string())
    );
    println!(
        "{} {}",
        style("Field:").bold(),
        error
            .field
            .map_or_else(|| style("unknown").dim().to_string(), |f| style(f).cyan().to_string())
    );
    Ok(Outcome::Success)
}

/// Execute the check command.
fn check_command(file: &Path) -> Result<Outcome> {
    let xml = std::fs::read_to_string(file)?;
    let response = GatewayResponse::parse(&xml)?;

    println!(
        "{} {}",
        style("Result:").bold(),
        response.result.as_deref().unwrap_or("(none)")
    );

    match check(&response) {
        Ok(()) => {
            println!("{}", style("OK").green().bold());
            Ok(Outcome::Success)
        }
        Err(fault) => {
            println!("{} {}", style("Gateway error:").red().bold(), fault.message);
            for error in &fault.errors {
                println!(
                    "  [{}] {} {}",
                    error.code.as_deref().unwrap_or("-"),
                    error.category.map_or("-", |c| c.as_str()),
                    error.field.as_ref().map_or("-", |f| f.as_str()),
                );
            }
            Ok(Outcome::GatewayFault)
        }
    }
}

fn to_output<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml_ng::to_string(value)?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
    }
}

impl From<Outcome> for std::process::ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::SUCCESS,
            Outcome::GatewayFault => Self::FAILURE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WireError;

    #[test]
    fn test_cli_parse_parse() {
        let cli = Cli::parse_from(["anet-wire", "parse", "transaction", "details.xml"]);

        let Commands::Parse {
            entity,
            file,
            wire,
            format,
        } = cli.command
        else {
            panic!("expected parse command");
        };
        assert_eq!(entity, "transaction");
        assert_eq!(file, PathBuf::from("details.xml"));
        assert!(!wire);
        assert_eq!(format, OutputFormat::Yaml);
    }

    #[test]
    fn test_cli_parse_parse_wire_json() {
        let cli = Cli::parse_from([
            "anet-wire",
            "parse",
            "credit-card",
            "card.xml",
            "--wire",
            "--format",
            "json",
        ]);

        let Commands::Parse { wire, format, .. } = cli.command else {
            panic!("expected parse command");
        };
        assert!(wire);
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_parse_classify() {
        let cli = Cli::parse_from(["anet-wire", "classify", "E00027"]);

        let Commands::Classify { code, text } = cli.command else {
            panic!("expected classify command");
        };
        assert_eq!(code, "E00027");
        assert!(text.is_none());
    }

    #[test]
    fn test_cli_parse_render_with_tag() {
        let cli = Cli::parse_from(["anet-wire", "render", "body.yaml", "--tag", "XML"]);

        let Commands::Render { tag, .. } = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(tag.as_deref(), Some("XML"));
    }

    #[test]
    fn test_to_output_json() {
        let value = Structure::map([("cardNumber", "XXXX1111")]);
        assert_eq!(
            to_output(&value, OutputFormat::Json).unwrap(),
            "{\n  \"cardNumber\": \"XXXX1111\"\n}\n"
        );
    }

    #[test]
    fn test_unknown_entity_is_error() {
        let err = parse_command("invoice", Path::new("missing.xml"), false, OutputFormat::Yaml)
            .unwrap_err();
        assert!(matches!(err, WireError::UnknownEntity(_)));
    }
}
