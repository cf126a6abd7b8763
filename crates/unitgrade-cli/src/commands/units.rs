//! The `unitgrade units` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use unitgrade_core::Registry;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Family", "Units"]);
    for family in Registry::standard().families() {
        table.add_row(vec![
            Cell::new(family.name()),
            Cell::new(family.units().join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}
