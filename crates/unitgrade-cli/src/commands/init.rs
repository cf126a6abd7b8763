//! The `unitgrade init` command.

use std::path::Path;

use anyhow::{Context, Result};

use unitgrade_io::config::CONFIG_FILE;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new(CONFIG_FILE), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("worksheet.csv"), SAMPLE_WORKSHEET)?;
    write_if_missing(Path::new("responses.csv"), SAMPLE_RESPONSES)?;

    println!("\nNext steps:");
    println!("  1. Run: unitgrade key --worksheet worksheet.csv");
    println!(
        "  2. Run: unitgrade grade --worksheet worksheet.csv --responses responses.csv --output results.csv"
    );

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# unitgrade configuration

# Submissions graded concurrently (1 = sequential)
parallelism = 1

# Output format when --output has no .csv, .json, .md or .xlsx extension
default_format = "csv"
"#;

const SAMPLE_WORKSHEET: &str = "\
84.2,fahrenheit,rankine
1.1,liters,cups
25.6,cups,liters
317.33,kelvin,fahrenheit
6.5,fahrenheit,liters
";

const SAMPLE_RESPONSES: &str = "\
Ann,543.9,4.6,6.1,111.5,
Bob,543.87,4.7,6,111.5,1
";
