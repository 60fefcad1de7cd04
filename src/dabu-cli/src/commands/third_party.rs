//! Third-party assembly filtering

use anyhow::{Context, Result};
use dabu::{BlobReader, FrameworkFilter};
use std::io::Write;
use std::path::Path;

use super::list::load;
use super::print_usage;

/// Build the framework filter from configured and command-line patterns
pub fn build_filter(configured: &[String], extra: &[String]) -> Result<FrameworkFilter> {
    let patterns: Vec<&str> = configured
        .iter()
        .chain(extra)
        .map(String::as_str)
        .collect();

    FrameworkFilter::with_patterns(patterns.as_slice()).context("Invalid exclusion pattern")
}

/// `filter-third-party` entry: usage when no path, otherwise the filtered listing
///
/// `filter` is only built once a path is given, so a broken config cannot
/// keep the usage line from printing.
pub fn run_or_usage<R, W, F>(
    reader: &R,
    filter: F,
    program: &str,
    blob: Option<&Path>,
    out: &mut W,
) -> Result<()>
where
    R: BlobReader,
    W: Write,
    F: FnOnce() -> Result<FrameworkFilter>,
{
    match blob {
        Some(blob) => run(reader, &filter()?, blob, out),
        None => Ok(print_usage(program, out)?),
    }
}

/// Print the non-framework assemblies as a JSON list
///
/// Nothing is printed when the blob contains no assemblies.
pub fn run<R: BlobReader, W: Write>(
    reader: &R,
    filter: &FrameworkFilter,
    blob: &Path,
    out: &mut W,
) -> Result<()> {
    let assemblies = load(reader, blob)?;

    if !assemblies.is_empty() {
        let third_party = filter.third_party(&assemblies);
        writeln!(out, "{}", serde_json::to_string(&third_party)?)?;
    }

    Ok(())
}
