//! JSON output formatting

use std::io;

use crate::aggregate::AggregatedEntry;

/// Serialize just the module names, in report order, as a compact JSON array.
pub fn module_names_json(entries: &[AggregatedEntry]) -> serde_json::Result<String> {
    let names: Vec<&str> = entries.iter().map(|e| e.module_name.as_str()).collect();
    serde_json::to_string(&names)
}

/// Print the aggregated entries as pretty-printed JSON to stdout.
pub fn print_json(entries: &[AggregatedEntry]) -> io::Result<()> {
    let json = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
