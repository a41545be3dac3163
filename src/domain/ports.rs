use crate::domain::model::{SdkArchive, SdkRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Client for the hosted SDK generation service
#[async_trait]
pub trait SdkApi: Send + Sync {
    async fn generate(&self, request: &SdkRequest) -> Result<SdkArchive>;
}

/// A generation run, split into its three observable stages
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Read and validate local inputs into an upload-ready request
    async fn prepare(&self) -> Result<SdkRequest>;
    /// Submit the request to the API
    async fn submit(&self, request: SdkRequest) -> Result<SdkArchive>;
    /// Deliver the archive to the local filesystem, returning the
    /// user-facing destination path
    async fn deliver(&self, archive: SdkArchive) -> Result<String>;
}
