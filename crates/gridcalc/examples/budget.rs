//! Build a small budget, change an input and watch the totals follow
//!
//! Run with: cargo run --example budget -p gridcalc

use gridcalc::prelude::*;

fn main() -> Result<()> {
    let mut sheet = Spreadsheet::with_name("budget");

    sheet.set_contents_of_cell("A1", "Rent")?;
    sheet.set_contents_of_cell("B1", "1200")?;
    sheet.set_contents_of_cell("A2", "Food")?;
    sheet.set_contents_of_cell("B2", "450")?;
    sheet.set_contents_of_cell("A3", "Transit")?;
    sheet.set_contents_of_cell("B3", "90")?;
    sheet.set_contents_of_cell("B4", "=B1 + B2 + B3")?;
    sheet.set_contents_of_cell("B5", "=B4 * 12")?;
    sheet.set_contents_of_cell("B6", "=B2 / B4")?;

    print_sheet(&sheet);

    println!("\nRaising rent...");
    let recalculated = sheet.set_contents_of_cell("B1", "1350")?;
    for name in &recalculated {
        println!("  {} = {}", name, sheet.cell_value(name.as_str())?);
    }

    println!("\nTrying a circular total...");
    if let Err(e) = sheet.set_contents_of_cell("B1", "=B4 - B2") {
        println!("  rejected: {}", e);
    }

    println!("\nAs JSON:\n{}", sheet.to_json()?);
    Ok(())
}

fn print_sheet(sheet: &Spreadsheet) {
    for (name, cell) in sheet.cells() {
        println!("{:>4}  {:<16} {}", name.to_string(), cell.contents().to_string(), cell.value());
    }
}
