//! Assembly extraction

use anyhow::{Context, Result};
use dabu::{AssemblyBlobReader, BlobReader, DumpMode};
use std::io::Write;
use std::path::Path;

/// Decompress every assembly in `blob` and report what was written
pub fn run<W: Write>(reader: &AssemblyBlobReader, blob: &Path, out: &mut W) -> Result<()> {
    let dir = reader.extraction_dir(blob);

    let assemblies = reader
        .dump(blob, DumpMode::Extract)
        .with_context(|| format!("Failed to extract {}", blob.display()))?;

    for asm in &assemblies {
        writeln!(out, "  {asm}")?;
    }
    writeln!(
        out,
        "Extracted {} assemblies to {}",
        assemblies.len(),
        dir.display()
    )?;

    Ok(())
}
