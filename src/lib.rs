pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::storage::LocalStorage;
pub use config::{Cli, Command, GenerateArgs, LoginArgs};
pub use core::api::SidekoClient;
pub use core::engine::Engine;
pub use core::generate::GeneratePipeline;
pub use domain::model::SdkLanguage;
pub use utils::error::{CliError, Result};
