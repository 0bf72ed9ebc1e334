//! xast CLI
//!
//! Parses an XML document and prints its xast tree, either as JSON or as an
//! indented outline with source positions.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use owo_colors::OwoColorize;
use xast_dom::{DomTree, outline};
use xast_xml::{ParseError, from_bytes, from_xml};

/// Print the xast tree of an XML document
#[derive(Parser, Debug)]
#[command(name = "xast")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"EXAMPLES:
    # Print a file as xast JSON
    xast note.xml

    # Print an outline with positions
    xast --format tree note.xml

    # Parse inline XML
    xast --xml '<note>hi</note>'
")]
struct Cli {
    /// Path to the XML file
    #[arg(value_name = "FILE", required_unless_present = "xml")]
    path: Option<PathBuf>,

    /// Parse an XML string instead of a file
    #[arg(long, value_name = "XML", conflicts_with = "path")]
    xml: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// xast JSON
    Json,
    /// Indented outline with positions
    Tree,
}

/// What a run produces: the rendered tree, or the error report.
#[derive(Debug, PartialEq, Eq)]
enum Output {
    /// Printed to stdout.
    Tree(String),
    /// Printed to stderr.
    Rejected(String),
}

impl Output {
    const fn exit_code(&self) -> u8 {
        match self {
            Self::Tree(_) => 0,
            Self::Rejected(_) => 1,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let output = run(&cli)?;
    match &output {
        Output::Tree(text) => print!("{text}"),
        Output::Rejected(report) => eprintln!("{report}"),
    }
    Ok(ExitCode::from(output.exit_code()))
}

fn run(cli: &Cli) -> Result<Output> {
    let (source, parsed) = if let Some(ref xml) = cli.xml {
        ("<input>".to_string(), from_xml(xml))
    } else if let Some(ref path) = cli.path {
        let bytes =
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        (path.display().to_string(), from_bytes(&bytes))
    } else {
        anyhow::bail!("a file path or --xml is required")
    };

    match parsed {
        Ok(tree) => Ok(Output::Tree(render_tree(&tree, cli)?)),
        Err(error) => Ok(Output::Rejected(format_report(
            &source,
            &error,
            !cli.no_color,
        ))),
    }
}

fn render_tree(tree: &DomTree, cli: &Cli) -> Result<String> {
    match cli.format {
        Format::Json => {
            let json = if cli.compact {
                serde_json::to_string(tree)
            } else {
                serde_json::to_string_pretty(tree)
            }
            .context("failed to serialize tree")?;
            Ok(format!("{json}\n"))
        }
        Format::Tree => Ok(outline(tree, tree.root())),
    }
}

/// `file:line:column: reason [rule]`.
fn format_report(source: &str, error: &ParseError, color: bool) -> String {
    let place = format!("{source}:{}:{}", error.place.line, error.place.column);
    let rule = format!("[{}]", error.rule_id());
    if color {
        format!("{}: {} {}", place.bold(), error.reason.red(), rule.dimmed())
    } else {
        format!("{place}: {} {rule}", error.reason)
    }
}
