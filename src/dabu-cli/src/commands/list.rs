//! Assembly listing

use anyhow::{Context, Result};
use dabu::{AssemblyDescriptor, BlobReader, DumpMode};
use std::io::Write;
use std::path::Path;

use super::print_usage;

/// `list-assemblies` entry: usage when no path, otherwise the JSON listing
pub fn run_or_usage<R: BlobReader, W: Write>(
    reader: &R,
    program: &str,
    blob: Option<&Path>,
    out: &mut W,
) -> Result<()> {
    match blob {
        Some(blob) => run(reader, blob, out),
        None => Ok(print_usage(program, out)?),
    }
}

/// Print all assemblies as a JSON list followed by their count
pub fn run<R: BlobReader, W: Write>(reader: &R, blob: &Path, out: &mut W) -> Result<()> {
    let assemblies = load(reader, blob)?;

    writeln!(out, "{}", serde_json::to_string(&assemblies)?)?;
    writeln!(out, "{}", assemblies.len())?;

    Ok(())
}

/// Print all assemblies as an aligned table
pub fn run_table<R: BlobReader, W: Write>(reader: &R, blob: &Path, out: &mut W) -> Result<()> {
    let assemblies = load(reader, blob)?;
    write_table(&assemblies, out)?;
    writeln!(out, "{} assemblies", assemblies.len())?;
    Ok(())
}

pub(crate) fn load<R: BlobReader>(reader: &R, blob: &Path) -> Result<Vec<AssemblyDescriptor>> {
    reader
        .dump(blob, DumpMode::List)
        .with_context(|| format!("Failed to read assembly store {}", blob.display()))
}

pub(crate) fn write_table<W: Write>(assemblies: &[AssemblyDescriptor], out: &mut W) -> Result<()> {
    let width = assemblies
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    writeln!(out, "{:<width$}  {:>10}", "NAME", "SIZE", width = width)?;
    for asm in assemblies {
        writeln!(out, "{:<width$}  {:>10}", asm.name, asm.size, width = width)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock::{FailingReader, MockReader};

    fn output<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_usage_without_path() {
        let reader = MockReader::new(&["A.dll"]);
        let text = output(|out| run_or_usage(&reader, "list-assemblies", None, out));

        assert_eq!(text, "list-assemblies <blob path>\n");
        assert!(reader.calls.borrow().is_empty());
    }

    #[test]
    fn test_list_then_count() {
        let reader = MockReader::new(&["System.Core.dll", "MyApp.dll", "Xamarin.Forms.dll"]);
        let text = output(|out| run_or_usage(&reader, "x", Some(Path::new("a.blob")), out));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let listed: Vec<AssemblyDescriptor> = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(listed, reader.assemblies);
        assert_eq!(lines[1], "3");
    }

    #[test]
    fn test_extra_arguments_ignored() {
        use crate::cli::BlobArgs;
        use clap::Parser;

        let args = BlobArgs::try_parse_from(["list-assemblies", "a.blob", "extra"]).unwrap();
        let reader = MockReader::new(&["MyApp.dll"]);
        let text = output(|out| run_or_usage(&reader, "list-assemblies", args.blob.as_deref(), out));

        assert!(text.ends_with("\n1\n"));
        let calls = reader.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Path::new("a.blob"));
    }

    #[test]
    fn test_dump_called_in_list_mode() {
        let reader = MockReader::new(&[]);
        let text = output(|out| run(&reader, Path::new("assemblies.blob"), out));

        assert_eq!(text, "[]\n0\n");
        let calls = reader.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Path::new("assemblies.blob"));
        assert_eq!(calls[0].1, DumpMode::List);
    }

    #[test]
    fn test_table_output() {
        let reader = MockReader::new(&["MyApp.dll", "Lib.dll"]);
        let text = output(|out| run_table(&reader, Path::new("a.blob"), out));

        assert!(text.starts_with("NAME"));
        assert!(text.contains("MyApp.dll"));
        assert!(text.contains("200"));
        assert!(text.trim_end().ends_with("2 assemblies"));
    }

    #[test]
    fn test_failure_propagates() {
        let mut out = Vec::new();
        let err = run(&FailingReader, Path::new("bad.blob"), &mut out).unwrap_err();

        assert!(err.to_string().contains("bad.blob"));
        assert!(out.is_empty());
    }
}
