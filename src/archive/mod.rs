//! ZIP packaging of rendered page documents
//!
//! Every artifact becomes one Deflate-compressed entry named after its page
//! URL (`{host}_{path}.pdf`). Entries are written in URL order so the same
//! crawl always yields the same archive layout.

use crate::url::{entry_name, normalize_url};
use crate::ArchiveError;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A rendered page waiting to be archived
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// URL of the page the document was rendered from
    pub url: String,

    /// Location of the rendered document on disk
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }
}

/// Creates a ZIP archive at `output_path` containing every artifact
///
/// # Arguments
///
/// * `output_path` - Where to write the archive (replaced if present)
/// * `artifacts` - The rendered pages to include
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The entry names, in archive order
/// * `Err(ArchiveError)` - No artifacts were given, or reading or writing
///   failed; any existing file at `output_path` is left untouched
pub fn create_archive(
    output_path: &Path,
    artifacts: &[Artifact],
) -> Result<Vec<String>, ArchiveError> {
    if artifacts.is_empty() {
        return Err(ArchiveError::Empty);
    }

    let mut ordered: Vec<&Artifact> = artifacts.iter().collect();
    ordered.sort_by(|a, b| a.url.cmp(&b.url));
    let names = assign_entry_names(&ordered)?;

    // Built beside the target and renamed over it only once complete
    let staging = NamedTempFile::new_in(parent_dir(output_path))?;
    let mut archive = ZipWriter::new(BufWriter::new(staging));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (artifact, name) in ordered.iter().zip(&names) {
        let mut source = File::open(&artifact.path).map_err(|source| ArchiveError::OpenArtifact {
            path: artifact.path.clone(),
            source,
        })?;

        archive.start_file(name.as_str(), options)?;
        std::io::copy(&mut source, &mut archive)?;
        tracing::debug!("Archived {} as {}", artifact.url, name);
    }

    let staging = archive
        .finish()?
        .into_inner()
        .map_err(|e| ArchiveError::Io(e.into_error()))?;
    staging.as_file().sync_all()?;
    staging
        .persist(output_path)
        .map_err(|e| ArchiveError::Io(e.error))?;

    Ok(names)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Derives entry names, suffixing `-2`, `-3`, ... when two URLs collide
fn assign_entry_names(artifacts: &[&Artifact]) -> Result<Vec<String>, ArchiveError> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let url = normalize_url(&artifact.url).map_err(|source| ArchiveError::InvalidUrl {
            url: artifact.url.clone(),
            source,
        })?;
        let base = entry_name(&url);

        let count = seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            names.push(base);
        } else {
            let stem = base.strip_suffix(".pdf").unwrap_or(&base);
            names.push(format!("{}-{}.pdf", stem, count));
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::{tempdir, TempDir};

    fn write_artifact(dir: &TempDir, file_name: &str, url: &str) -> Artifact {
        let path = dir.path().join(file_name);
        std::fs::write(&path, format!("%PDF-fake for {}", url)).unwrap();
        Artifact::new(url, path)
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn test_empty_artifacts_rejected() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("site.zip");

        let result = create_archive(&output, &[]);
        assert!(matches!(result, Err(ArchiveError::Empty)));
        assert!(!output.exists());
    }

    #[test]
    fn test_one_entry_per_artifact() {
        let dir = tempdir().unwrap();
        let artifacts = vec![
            write_artifact(&dir, "0.pdf", "https://example.com/"),
            write_artifact(&dir, "1.pdf", "https://example.com/docs/intro/"),
            write_artifact(&dir, "2.pdf", "https://example.com/about"),
        ];
        let output = dir.path().join("example.com.zip");

        let names = create_archive(&output, &artifacts).unwrap();
        assert_eq!(names.len(), 3);

        assert_eq!(
            entry_names(&output),
            vec![
                "example.com_about.pdf",
                "example.com_docs_intro.pdf",
                "example.com_index.pdf",
            ]
        );
    }

    #[test]
    fn test_entry_content_copied() {
        let dir = tempdir().unwrap();
        let artifacts = vec![write_artifact(&dir, "0.pdf", "https://example.com/a")];
        let output = dir.path().join("out.zip");

        create_archive(&output, &artifacts).unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut entry = archive.by_name("example.com_a.pdf").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "%PDF-fake for https://example.com/a");
    }

    #[test]
    fn test_colliding_names_disambiguated() {
        let dir = tempdir().unwrap();
        let artifacts = vec![
            write_artifact(&dir, "0.pdf", "https://example.com/list?page=2"),
            write_artifact(&dir, "1.pdf", "https://example.com/list?page=1"),
            write_artifact(&dir, "2.pdf", "https://example.com/list"),
        ];
        let output = dir.path().join("out.zip");

        let names = create_archive(&output, &artifacts).unwrap();
        assert_eq!(
            names,
            vec![
                "example.com_list.pdf",
                "example.com_list-2.pdf",
                "example.com_list-3.pdf",
            ]
        );
        assert_eq!(entry_names(&output).len(), 3);
    }

    #[test]
    fn test_missing_artifact_aborts() {
        let dir = tempdir().unwrap();
        let artifacts = vec![Artifact::new(
            "https://example.com/gone",
            dir.path().join("gone.pdf"),
        )];
        let output = dir.path().join("out.zip");

        let result = create_archive(&output, &artifacts);
        assert!(matches!(result, Err(ArchiveError::OpenArtifact { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn test_failed_archive_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("site.zip");
        std::fs::write(&output, b"previous archive").unwrap();

        let artifacts = vec![
            write_artifact(&dir, "0.pdf", "https://example.com/"),
            Artifact::new("https://example.com/gone", dir.path().join("gone.pdf")),
        ];

        let result = create_archive(&output, &artifacts);
        assert!(matches!(result, Err(ArchiveError::OpenArtifact { .. })));
        assert_eq!(std::fs::read(&output).unwrap(), b"previous archive");

        // No staging files are left behind
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 2);
    }

    #[test]
    fn test_existing_archive_replaced_on_success() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("site.zip");
        std::fs::write(&output, b"stale").unwrap();

        let artifacts = vec![write_artifact(&dir, "0.pdf", "https://example.com/")];
        create_archive(&output, &artifacts).unwrap();

        assert_eq!(entry_names(&output), vec!["example.com_index.pdf"]);
    }

    #[test]
    fn test_invalid_artifact_url() {
        let dir = tempdir().unwrap();
        let artifacts = vec![write_artifact(&dir, "0.pdf", "not a url")];
        let output = dir.path().join("out.zip");

        let result = create_archive(&output, &artifacts);
        assert!(matches!(result, Err(ArchiveError::InvalidUrl { .. })));
    }
}
