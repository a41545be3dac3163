use crate::utils::error::{CliError, Result};
use std::path::Path;
use url::Url;

pub const SPEC_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CliError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Validates the path points at an existing specification file with an
/// allowed extension (json/yaml/yml)
pub fn validate_spec_file(field_name: &str, path: &str) -> Result<()> {
    let p = Path::new(path);
    if !p.is_file() {
        return Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be an existing file".to_string(),
        });
    }

    match p.extension().and_then(|ext| ext.to_str()) {
        Some(extension) if SPEC_EXTENSIONS.contains(&extension) => Ok(()),
        Some(extension) => Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                SPEC_EXTENSIONS.join(", ")
            ),
        }),
        None => Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

/// Validates the path is a directory or does not exist yet
pub fn validate_output_dir(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    let p = Path::new(path);
    if p.exists() && !p.is_dir() {
        return Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must be a directory or a non-existent path".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CliError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://api.sideko.dev/v1").is_ok());
        assert!(validate_url("base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_spec_file() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.yaml");
        let mut f = std::fs::File::create(&spec_path).unwrap();
        writeln!(f, "openapi: 3.0.0").unwrap();

        assert!(validate_spec_file("spec", spec_path.to_str().unwrap()).is_ok());
        assert!(validate_spec_file("spec", dir.path().join("missing.json").to_str().unwrap())
            .is_err());

        let txt_path = dir.path().join("notes.txt");
        std::fs::File::create(&txt_path).unwrap();
        assert!(validate_spec_file("spec", txt_path.to_str().unwrap()).is_err());
    }

    #[test]
    fn test_validate_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_output_dir("output", dir.path().to_str().unwrap()).is_ok());
        assert!(
            validate_output_dir("output", dir.path().join("not-yet").to_str().unwrap()).is_ok()
        );

        let file_path = dir.path().join("a-file");
        std::fs::File::create(&file_path).unwrap();
        assert!(validate_output_dir("output", file_path.to_str().unwrap()).is_err());
        assert!(validate_output_dir("output", "").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("name", "my-api").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
