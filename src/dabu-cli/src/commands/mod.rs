//! Command implementations
//!
//! Listing commands take any [`dabu::BlobReader`] and an output sink so they
//! can run against a stub reader in tests.

pub mod configure;
pub mod extract;
pub mod list;
pub mod third_party;

use std::io::{self, Write};

/// Name the process was invoked as, falling back to `default`
pub fn program_name(default: &str) -> String {
    std::env::args()
        .next()
        .unwrap_or_else(|| default.to_string())
}

/// Print the single-line usage of the blob tools
pub fn print_usage<W: Write>(program: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "{} <blob path>", program)
}

#[cfg(test)]
pub(crate) mod mock {
    use dabu::{AssemblyDescriptor, BlobReader, DumpMode};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Reader returning a fixed list and recording its calls
    pub struct MockReader {
        pub assemblies: Vec<AssemblyDescriptor>,
        pub calls: RefCell<Vec<(PathBuf, DumpMode)>>,
    }

    impl MockReader {
        pub fn new(names: &[&str]) -> Self {
            Self {
                assemblies: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| AssemblyDescriptor::new(*name, (i + 1) * 100))
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl BlobReader for MockReader {
        fn dump(&self, path: &Path, mode: DumpMode) -> dabu::Result<Vec<AssemblyDescriptor>> {
            self.calls.borrow_mut().push((path.to_path_buf(), mode));
            Ok(self.assemblies.clone())
        }
    }

    /// Reader that always fails
    pub struct FailingReader;

    impl BlobReader for FailingReader {
        fn dump(&self, _path: &Path, _mode: DumpMode) -> dabu::Result<Vec<AssemblyDescriptor>> {
            Err(dabu::Error::InvalidMagic(0))
        }
    }
}
