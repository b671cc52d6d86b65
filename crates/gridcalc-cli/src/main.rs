//! gridcalc CLI - inspect and edit spreadsheet documents

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gridcalc::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet inspection and editing tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every non-empty cell with its contents and value
    Show {
        /// Spreadsheet document (JSON)
        input: PathBuf,
    },

    /// Set one cell, print the recalculated cells and save
    Set {
        /// Spreadsheet document (JSON); created if it does not exist
        file: PathBuf,

        /// Cell name, e.g. A1
        cell: String,

        /// New contents: a number, text, "=formula", or "" to empty the cell
        content: String,

        /// Write compact JSON instead of indented
        #[arg(long)]
        compact: bool,
    },

    /// Evaluate a standalone formula
    Eval {
        /// Formula, with or without a leading '='
        formula: String,

        /// Variable value as NAME=VALUE (repeatable)
        #[arg(short, long = "var", value_parser = parse_var)]
        vars: Vec<(String, f64)>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Show { input } => show(&input),
        Commands::Set {
            file,
            cell,
            content,
            compact,
        } => set(&file, &cell, &content, compact),
        Commands::Eval { formula, vars } => eval(&formula, vars),
    }
}

fn show(input: &Path) -> Result<()> {
    let sheet =
        Spreadsheet::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    if sheet.is_empty() {
        eprintln!("Warning: Spreadsheet is empty");
        return Ok(());
    }

    for (name, cell) in sheet.cells() {
        if cell.contents().is_formula() {
            println!("{}\t{}\t{}", name, cell.contents(), cell.value());
        } else {
            println!("{}\t{}", name, cell.contents());
        }
    }

    Ok(())
}

fn set(file: &Path, cell: &str, content: &str, compact: bool) -> Result<()> {
    let options = SpreadsheetOptions {
        pretty_json: !compact,
        ..Default::default()
    };

    let mut sheet = if file.exists() {
        Spreadsheet::open_with_options(file, options)
            .with_context(|| format!("Failed to open '{}'", file.display()))?
    } else {
        Spreadsheet::with_options(options)
    };

    let recalculated = sheet
        .set_contents_of_cell(cell, content)
        .with_context(|| format!("Failed to set {} to '{}'", cell, content))?;

    for name in &recalculated {
        let value = sheet.cell_value(name.as_str())?;
        println!("{}\t{}", name, value);
    }

    sheet
        .save(file)
        .with_context(|| format!("Failed to write '{}'", file.display()))?;
    eprintln!("Saved {} cell(s) to '{}'", sheet.len(), file.display());

    Ok(())
}

fn eval(formula: &str, vars: Vec<(String, f64)>) -> Result<()> {
    let text = formula.strip_prefix('=').unwrap_or(formula);
    let formula = Formula::new(text).with_context(|| format!("Invalid formula '{}'", formula))?;

    let values: HashMap<String, f64> = vars.into_iter().collect();
    let lookup = |name: &str| values.get(name).copied();

    let value = formula
        .evaluate(&lookup)
        .map_err(|e| anyhow!("Failed to evaluate '{}': {}", formula, e))?;
    println!("{}", value);

    Ok(())
}

/// Parse a `NAME=VALUE` argument, normalizing the name
fn parse_var(arg: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", arg))?;
    let name = CellName::parse(name.trim()).map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value '{}': {}", value, e))?;
    Ok((name.into_string(), value))
}
