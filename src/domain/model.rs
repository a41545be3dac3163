use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target languages supported by the generation API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SdkLanguage {
    Python,
    Ruby,
    Go,
    Typescript,
    Rust,
}

impl SdkLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            SdkLanguage::Python => "python",
            SdkLanguage::Ruby => "ruby",
            SdkLanguage::Go => "go",
            SdkLanguage::Typescript => "typescript",
            SdkLanguage::Rust => "rust",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            SdkLanguage::Python => "🐍",
            SdkLanguage::Ruby => "💎",
            SdkLanguage::Go => "🐹",
            SdkLanguage::Typescript => "🟦",
            SdkLanguage::Rust => "🦀",
        }
    }
}

impl fmt::Display for SdkLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prepared upload: everything the generation endpoint needs
#[derive(Debug, Clone)]
pub struct SdkRequest {
    /// Display name for the specification
    pub name: String,
    pub language: SdkLanguage,
    /// Spec file extension without the dot, e.g. `json`
    pub extension: String,
    /// Original filename of the spec, sent with the multipart file part
    pub spec_filename: String,
    pub spec_content: Vec<u8>,
}

/// Generated SDK as returned by the API: a gzipped tarball
#[derive(Debug, Clone)]
pub struct SdkArchive {
    pub content: Vec<u8>,
    /// Filename advertised via Content-Disposition, when present
    pub filename: Option<String>,
}

impl SdkArchive {
    /// Directory name the archive unpacks into, derived from the advertised
    /// filename with the `.tar.gz` suffix stripped
    pub fn root_dir(&self) -> Option<&str> {
        let name = self.filename.as_deref()?;
        Some(name.strip_suffix(".tar.gz").unwrap_or(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_round_trip() {
        for lang in [
            SdkLanguage::Python,
            SdkLanguage::Ruby,
            SdkLanguage::Go,
            SdkLanguage::Typescript,
            SdkLanguage::Rust,
        ] {
            let parsed = SdkLanguage::from_str(lang.as_str(), true).unwrap();
            assert_eq!(parsed, lang);
        }
    }

    #[test]
    fn test_archive_root_dir() {
        let archive = SdkArchive {
            content: vec![],
            filename: Some("my_api_python.tar.gz".to_string()),
        };
        assert_eq!(archive.root_dir(), Some("my_api_python"));

        let bare = SdkArchive {
            content: vec![],
            filename: None,
        };
        assert_eq!(bare.root_dir(), None);
    }
}
