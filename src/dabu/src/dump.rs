//! The `dump` entry point and its injectable reader trait

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::manifest::Manifest;
use crate::store::AssemblyStore;
use crate::{AssemblyDescriptor, Result};

/// Manifest name shared by all per-architecture blobs of an APK
const SHARED_MANIFEST: &str = "assemblies.manifest";

/// What a dump does besides listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpMode {
    /// Only report the assemblies
    #[default]
    List,
    /// Also write each decompressed assembly to disk
    Extract,
}

impl From<bool> for DumpMode {
    fn from(extract: bool) -> Self {
        if extract {
            Self::Extract
        } else {
            Self::List
        }
    }
}

/// Source of assembly listings for a blob path
pub trait BlobReader {
    /// Read the blob at `path` and return its assemblies in index order
    fn dump(&self, path: &Path, mode: DumpMode) -> Result<Vec<AssemblyDescriptor>>;
}

/// Reader backed by the on-disk assembly store format
#[derive(Debug, Clone, Default)]
pub struct AssemblyBlobReader {
    /// Where extracted assemblies go; defaults to the blob's directory
    pub output_dir: Option<PathBuf>,
}

impl AssemblyBlobReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
        }
    }

    /// Directory extracted assemblies are written to for `blob`
    pub fn extraction_dir(&self, blob: &Path) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| parent_dir(blob))
    }
}

impl BlobReader for AssemblyBlobReader {
    fn dump(&self, path: &Path, mode: DumpMode) -> Result<Vec<AssemblyDescriptor>> {
        dump_to(path, mode, &self.extraction_dir(path))
    }
}

/// Read the blob at `path`, extracting next to it in [`DumpMode::Extract`]
pub fn dump(path: &Path, mode: DumpMode) -> Result<Vec<AssemblyDescriptor>> {
    AssemblyBlobReader::new().dump(path, mode)
}

/// Read the blob at `path`, extracting into `output_dir` in [`DumpMode::Extract`]
pub fn dump_to(path: &Path, mode: DumpMode, output_dir: &Path) -> Result<Vec<AssemblyDescriptor>> {
    let data = fs::read(path)?;
    let store = AssemblyStore::parse(&data)?;

    let manifest = load_manifest(path);
    let entries = store.entries(manifest.as_ref());

    if mode == DumpMode::Extract {
        fs::create_dir_all(output_dir)?;
        for entry in &entries {
            let image = entry.payload.decompress()?;
            let out = output_dir.join(&entry.name);
            fs::write(&out, &image)?;
            info!(path = %out.display(), size = image.len(), "extracted assembly");
        }
    }

    Ok(entries.iter().map(|e| e.descriptor_record()).collect())
}

/// Load the manifest for `blob`, or `None` so entries get hash names
fn load_manifest(blob: &Path) -> Option<Manifest> {
    let Some(path) = manifest_path(blob) else {
        warn!(blob = %blob.display(), "no manifest found, using hashes as names");
        return None;
    };

    match Manifest::load(&path) {
        Ok(manifest) if manifest.is_empty() => {
            warn!(path = %path.display(), "manifest has no entries, using hashes as names");
            None
        }
        Ok(manifest) => {
            debug!(path = %path.display(), entries = manifest.len(), "loaded manifest");
            Some(manifest)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable manifest, using hashes as names");
            None
        }
    }
}

/// Locate the manifest that names the entries of `blob`
///
/// Tries the blob path with a `.manifest` extension, then
/// `assemblies.manifest` in the same directory.
pub fn manifest_path(blob: &Path) -> Option<PathBuf> {
    let sibling = blob
        .extension()
        .is_some()
        .then(|| blob.with_extension("manifest"));
    let shared = parent_dir(blob).join(SHARED_MANIFEST);

    sibling
        .into_iter()
        .chain(std::iter::once(shared))
        .find(|candidate| candidate.is_file())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{build_store, fake_image, TestAssembly};

    fn write_blob(dir: &Path, name: &str, assemblies: &[TestAssembly]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, build_store(assemblies)).unwrap();
        path
    }

    fn sample() -> Vec<TestAssembly> {
        vec![
            TestAssembly { hash32: 0x10, image: fake_image(300, 1), compress: true },
            TestAssembly { hash32: 0x20, image: fake_image(500, 2), compress: true },
        ]
    }

    const MANIFEST: &str = "\
Hash 32     Hash 64             Blob ID  Blob idx  Name
0x00000010  0x0000000000000001  000      0000      System.Runtime
0x00000020  0x0000000000000002  000      0001      MyApp
";

    #[test]
    fn test_dump_mode_from_bool() {
        assert_eq!(DumpMode::from(false), DumpMode::List);
        assert_eq!(DumpMode::from(true), DumpMode::Extract);
    }

    #[test]
    fn test_dump_lists_with_manifest() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let blob = write_blob(dir.path(), "assemblies.blob", &sample());
        fs::write(dir.path().join("assemblies.manifest"), MANIFEST)?;

        let list = dump(&blob, DumpMode::List)?;
        assert_eq!(
            list,
            vec![
                AssemblyDescriptor::new("System.Runtime.dll", 300),
                AssemblyDescriptor::new("MyApp.dll", 500),
            ]
        );

        // Listing writes nothing
        assert!(!dir.path().join("MyApp.dll").exists());
        Ok(())
    }

    #[test]
    fn test_dump_without_manifest() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let blob = write_blob(dir.path(), "assemblies.blob", &sample());

        let list = dump(&blob, false.into())?;
        assert_eq!(list[0].name, "0x10.dll");
        assert_eq!(list[1].name, "0x20.dll");
        Ok(())
    }

    #[test]
    fn test_dump_extracts_next_to_blob() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let assemblies = sample();
        let blob = write_blob(dir.path(), "assemblies.blob", &assemblies);
        fs::write(dir.path().join("assemblies.manifest"), MANIFEST)?;

        dump(&blob, DumpMode::Extract)?;

        assert_eq!(fs::read(dir.path().join("System.Runtime.dll"))?, assemblies[0].image);
        assert_eq!(fs::read(dir.path().join("MyApp.dll"))?, assemblies[1].image);
        Ok(())
    }

    #[test]
    fn test_reader_with_output_dir() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let blob = write_blob(dir.path(), "assemblies.blob", &sample());
        let out = dir.path().join("out");

        let reader = AssemblyBlobReader::with_output_dir(&out);
        let list = reader.dump(&blob, DumpMode::Extract)?;

        assert_eq!(list.len(), 2);
        assert!(out.join("0x10.dll").is_file());
        assert!(out.join("0x20.dll").is_file());
        Ok(())
    }

    #[test]
    fn test_manifest_path_candidates() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let arch_blob = dir.path().join("assemblies.arm64_v8a.blob");

        assert_eq!(manifest_path(&arch_blob), None);

        let shared = dir.path().join("assemblies.manifest");
        fs::write(&shared, MANIFEST)?;
        assert_eq!(manifest_path(&arch_blob), Some(shared));

        let specific = dir.path().join("assemblies.arm64_v8a.manifest");
        fs::write(&specific, MANIFEST)?;
        assert_eq!(manifest_path(&arch_blob), Some(specific));
        Ok(())
    }

    #[test]
    fn test_unusable_manifest_falls_back_to_hashes() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let blob = write_blob(dir.path(), "assemblies.blob", &sample());
        fs::write(dir.path().join("assemblies.manifest"), [0xffu8, 0xfe, 0x00, 0x01])?;

        let list = dump(&blob, DumpMode::List)?;
        assert_eq!(list[0].name, "0x10.dll");
        assert_eq!(list[1].name, "0x20.dll");

        assert!(load_manifest(&dir.path().join("missing").join("assemblies.blob")).is_none());
        Ok(())
    }

    #[test]
    fn test_path_like_manifest_name_not_extracted() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let root = dir.path().join("apk");
        fs::create_dir_all(&root)?;
        let blob = write_blob(&root, "assemblies.blob", &sample());
        fs::write(
            root.join("assemblies.manifest"),
            "0x00000010  0x0000000000000001  000  0000  ../../escaped\n\
             0x00000020  0x0000000000000002  000  0001  MyApp\n",
        )?;

        let out = root.join("out");
        let list = AssemblyBlobReader::with_output_dir(&out).dump(&blob, DumpMode::Extract)?;

        assert_eq!(list, vec![AssemblyDescriptor::new("MyApp.dll", 500)]);
        assert!(out.join("MyApp.dll").is_file());
        assert!(!root.join(".._escaped.dll").exists());
        assert!(!dir.path().join(".._escaped.dll").exists());
        assert_eq!(fs::read_dir(&out)?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_corrupt_block_lists_but_fails_extraction() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut data = build_store(&[TestAssembly {
            hash32: 0x10,
            image: fake_image(300, 1),
            compress: true,
        }]);
        // Header + one descriptor + two hash entries, then the 12-byte XALZ header
        let block = 20 + 24 + 2 * 20 + 12;
        data[block..block + 8].fill(0xff);
        let blob = dir.path().join("assemblies.blob");
        fs::write(&blob, &data)?;

        // Listing reads sizes from the XALZ headers and never decompresses
        let list = dump(&blob, DumpMode::List)?;
        assert_eq!(list, vec![AssemblyDescriptor::new("0x10.dll", 300)]);

        let err = dump(&blob, DumpMode::Extract).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Decompression(_) | crate::Error::DecompressionSize { .. }
        ));
        Ok(())
    }

    #[test]
    fn test_dump_missing_file() {
        let err = dump(Path::new("/nonexistent/assemblies.blob"), DumpMode::List).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }

    #[test]
    fn test_dump_rejects_non_store() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("not-a-store.blob");
        fs::write(&path, [0u8; 64])?;

        let err = dump(&path, DumpMode::List).unwrap_err();
        assert!(matches!(err, crate::Error::InvalidMagic(0)));
        Ok(())
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("assemblies.blob")), PathBuf::from("."));
        assert_eq!(parent_dir(Path::new("a/b.blob")), PathBuf::from("a"));
    }
}
