use anyhow::Result;
use serde::Serialize;

/// Prints a command's result as pretty JSON on stdout, logs go to stderr
pub fn show<T: Serialize>(output: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
