use anyhow::{Context as _, Result};
use std::io::BufRead;

/// Reads one value per line from `reader`.
pub fn read_values<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for line in reader.lines() {
        values.push(line.with_context(|| "read input line")?);
    }
    Ok(values)
}
