pub mod settings;
pub mod storage;

use crate::domain::model::SdkLanguage;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_output_dir, validate_spec_file, validate_url, Validate,
};
use clap::{Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Parser)]
#[command(name = "sideko")]
#[command(about = "Generate typed API SDKs from OpenAPI specifications", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate an SDK from an OpenAPI specification
    Generate(GenerateArgs),
    /// Store an API key for later runs
    Login(LoginArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Path to the OpenAPI specification (.json, .yaml, .yml)
    pub spec: String,

    /// Programming language to generate
    pub language: SdkLanguage,

    /// Directory to deliver the SDK into, created if absent
    #[arg(default_value = "./")]
    pub output: String,

    /// Display name for the specification, defaults to the spec file stem
    #[arg(long)]
    pub name: Option<String>,

    /// API base URL override
    #[arg(long)]
    pub base_url: Option<String>,

    /// API key override
    #[arg(long)]
    pub api_key: Option<String>,

    /// Save the returned .tar.gz instead of unpacking it
    #[arg(long)]
    pub archive_only: bool,

    /// Report process CPU/memory statistics after the run
    #[arg(long)]
    pub monitor: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LoginArgs {
    /// API key to persist into the sideko config file
    #[arg(long)]
    pub api_key: String,
}

impl GenerateArgs {
    /// Spec file extension without the dot, as sent in the multipart form
    pub fn spec_extension(&self) -> String {
        Path::new(&self.spec)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string()
    }

    pub fn spec_filename(&self) -> String {
        Path::new(&self.spec)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("openapi.json")
            .to_string()
    }

    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        Path::new(&self.spec)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("api")
            .to_string()
    }

    /// Flag > environment/config file > production default
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(settings::get_base_url)
    }

    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(settings::get_api_key)
    }
}

impl Validate for GenerateArgs {
    fn validate(&self) -> Result<()> {
        validate_spec_file("spec", &self.spec)?;
        validate_output_dir("output", &self.output)?;
        if let Some(name) = &self.name {
            validate_non_empty_string("name", name)?;
        }
        // the base URL may come from the flag, the environment, or the
        // config file, so the resolved value is what gets checked
        validate_url("base_url", &self.resolved_base_url())?;
        Ok(())
    }
}

impl Validate for LoginArgs {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api_key", &self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // validate() reads SIDEKO_BASE_URL, so tests touching the environment
    // serialize through this lock
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn args_for(spec: &str, output: &str) -> GenerateArgs {
        GenerateArgs {
            spec: spec.to_string(),
            language: SdkLanguage::Python,
            output: output.to_string(),
            name: None,
            base_url: None,
            api_key: None,
            archive_only: false,
            monitor: false,
        }
    }

    #[test]
    fn test_spec_extension_and_name_defaults() {
        let args = args_for("/tmp/petstore.yaml", "./out");
        assert_eq!(args.spec_extension(), "yaml");
        assert_eq!(args.spec_filename(), "petstore.yaml");
        assert_eq!(args.display_name(), "petstore");
    }

    #[test]
    fn test_explicit_name_wins() {
        let mut args = args_for("/tmp/petstore.json", "./out");
        args.name = Some("Pet Store".to_string());
        assert_eq!(args.display_name(), "Pet Store");
    }

    #[test]
    fn test_validate_rejects_missing_spec() {
        let dir = tempfile::tempdir().unwrap();
        let args = args_for(
            dir.path().join("missing.json").to_str().unwrap(),
            dir.path().to_str().unwrap(),
        );
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_existing_spec() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("SIDEKO_BASE_URL");

        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.json");
        let mut f = std::fs::File::create(&spec_path).unwrap();
        writeln!(f, "{{}}").unwrap();

        let args = args_for(
            spec_path.to_str().unwrap(),
            dir.path().join("out").to_str().unwrap(),
        );
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_base_url_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.json");
        std::fs::write(&spec_path, "{}").unwrap();

        let args = args_for(
            spec_path.to_str().unwrap(),
            dir.path().join("out").to_str().unwrap(),
        );

        std::env::set_var("SIDEKO_BASE_URL", "not-a-url");
        let result = args.validate();
        std::env::remove_var("SIDEKO_BASE_URL");

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let spec_path = dir.path().join("openapi.json");
        std::fs::write(&spec_path, "{}").unwrap();

        let mut args = args_for(spec_path.to_str().unwrap(), dir.path().to_str().unwrap());
        args.base_url = Some("ftp://nope".to_string());
        assert!(args.validate().is_err());
    }
}
