//! The `unitgrade convert` command.

use anyhow::Result;

use unitgrade_core::{convert, format_number};

pub fn execute(value: f64, from: String, to: String) -> Result<()> {
    anyhow::ensure!(value.is_finite(), "value must be a finite number");
    let converted = convert(&from, &to, value)?;
    println!("{}", format_number(converted));
    Ok(())
}
