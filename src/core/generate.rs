use crate::config::GenerateArgs;
use crate::domain::model::{SdkArchive, SdkRequest};
use crate::domain::ports::{SdkApi, Storage, Workflow};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::{Cursor, Read};
use std::path::{Component, Path};
use tar::Archive;

const DEFAULT_ARCHIVE_NAME: &str = "sdk.tar.gz";

pub struct GeneratePipeline<A: SdkApi, S: Storage> {
    api: A,
    storage: S,
    args: GenerateArgs,
}

impl<A: SdkApi, S: Storage> GeneratePipeline<A, S> {
    pub fn new(api: A, storage: S, args: GenerateArgs) -> Self {
        Self { api, storage, args }
    }
}

#[async_trait]
impl<A: SdkApi, S: Storage> Workflow for GeneratePipeline<A, S> {
    async fn prepare(&self) -> Result<SdkRequest> {
        tracing::debug!("Reading specification: {}", self.args.spec);
        let spec_content = std::fs::read(&self.args.spec)?;

        Ok(SdkRequest {
            name: self.args.display_name(),
            language: self.args.language,
            extension: self.args.spec_extension(),
            spec_filename: self.args.spec_filename(),
            spec_content,
        })
    }

    async fn submit(&self, request: SdkRequest) -> Result<SdkArchive> {
        tracing::debug!(
            "Submitting {} ({} bytes) for {} generation",
            request.name,
            request.spec_content.len(),
            request.language
        );
        let archive = self.api.generate(&request).await?;

        if archive.content.is_empty() {
            return Err(CliError::processing(
                "The API returned an empty archive, no SDK was generated",
            ));
        }

        Ok(archive)
    }

    async fn deliver(&self, archive: SdkArchive) -> Result<String> {
        if self.args.archive_only {
            let filename = safe_archive_filename(archive.filename.as_deref());
            self.storage.write_file(&filename, &archive.content).await?;
            return Ok(Path::new(&self.args.output)
                .join(&filename)
                .display()
                .to_string());
        }

        let files = unpack_entries(&archive.content)?;
        tracing::debug!(
            "Unpacking {} files into {}",
            files.len(),
            self.args.output
        );

        for (path, data) in &files {
            self.storage.write_file(path, data).await?;
        }

        let mut dest = Path::new(&self.args.output).to_path_buf();
        if let Some(root) = archive.root_dir() {
            dest = dest.join(root);
        }
        Ok(dest.display().to_string())
    }
}

/// The advertised archive filename is server-controlled and untrusted: keep
/// only the final path component so it can never leave the output directory
fn safe_archive_filename(advertised: Option<&str>) -> String {
    advertised
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .map(String::from)
        .unwrap_or_else(|| DEFAULT_ARCHIVE_NAME.to_string())
}

/// Decodes the gzipped tarball into (relative path, contents) pairs,
/// rejecting entries that would escape the delivery directory
fn unpack_entries(content: &[u8]) -> Result<Vec<(String, Vec<u8>)>> {
    let decoder = GzDecoder::new(Cursor::new(content));
    let mut archive = Archive::new(decoder);

    let mut files = Vec::new();
    let entries = archive
        .entries()
        .map_err(|e| CliError::archive(format!("Not a valid gzipped tarball: {e}")))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| CliError::archive(format!("Corrupt archive entry: {e}")))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry
            .path()
            .map_err(|e| CliError::archive(format!("Ill-formed entry path: {e}")))?
            .into_owned();
        let rel_path = sanitize_entry_path(&path)?;

        let mut data = Vec::new();
        entry
            .read_to_end(&mut data)
            .map_err(|e| CliError::archive(format!("Failed reading entry {rel_path}: {e}")))?;
        files.push((rel_path, data));
    }

    if files.is_empty() {
        return Err(CliError::archive("Archive contained no files"));
    }

    Ok(files)
}

/// Entry paths must be strictly relative: no `..`, no absolute components
fn sanitize_entry_path(path: &Path) -> Result<String> {
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => {}
            _ => {
                return Err(CliError::archive(format!(
                    "Archive entry escapes the output directory: {}",
                    path.display()
                )))
            }
        }
    }

    let rel = path.to_string_lossy().to_string();
    if rel.is_empty() {
        return Err(CliError::archive("Archive entry has an empty path"));
    }
    Ok(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::path::PathBuf;

    fn build_tar_gz(files: &[(&str, &[u8])]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_unpack_entries() {
        let archive = build_tar_gz(&[
            ("my_sdk/README.md", b"# My SDK".as_slice()),
            ("my_sdk/src/client.py", b"class Client: ...".as_slice()),
        ]);

        let files = unpack_entries(&archive).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].0, "my_sdk/README.md");
        assert_eq!(files[0].1, b"# My SDK");
    }

    #[test]
    fn test_unpack_rejects_garbage() {
        assert!(unpack_entries(b"definitely not a tarball").is_err());
    }

    #[test]
    fn test_unpack_rejects_empty_archive() {
        let archive = build_tar_gz(&[]);
        assert!(unpack_entries(&archive).is_err());
    }

    #[test]
    fn test_safe_archive_filename_strips_traversal() {
        assert_eq!(
            safe_archive_filename(Some("../escaped.tar.gz")),
            "escaped.tar.gz"
        );
        assert_eq!(safe_archive_filename(Some("/etc/passwd")), "passwd");
        assert_eq!(
            safe_archive_filename(Some("nested/dir/sdk.tar.gz")),
            "sdk.tar.gz"
        );
        assert_eq!(safe_archive_filename(Some("my_sdk.tar.gz")), "my_sdk.tar.gz");
        assert_eq!(safe_archive_filename(Some("..")), DEFAULT_ARCHIVE_NAME);
        assert_eq!(safe_archive_filename(None), DEFAULT_ARCHIVE_NAME);
    }

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_entry_path(&PathBuf::from("../outside.txt")).is_err());
        assert!(sanitize_entry_path(&PathBuf::from("/etc/passwd")).is_err());
        assert!(sanitize_entry_path(&PathBuf::from("sdk/../../outside.txt")).is_err());
        assert!(sanitize_entry_path(&PathBuf::from("sdk/lib.rs")).is_ok());
    }
}
