pub mod api;
pub mod engine;
pub mod generate;

pub use crate::domain::model::{SdkArchive, SdkLanguage, SdkRequest};
pub use crate::domain::ports::{SdkApi, Storage, Workflow};
pub use crate::utils::error::Result;
