use crate::domain::ports::Workflow;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a workflow through its stages with progress reporting
pub struct Engine<W: Workflow> {
    workflow: W,
    monitor: SystemMonitor,
}

impl<W: Workflow> Engine<W> {
    pub fn new(workflow: W) -> Self {
        Self::new_with_monitoring(workflow, false)
    }

    pub fn new_with_monitoring(workflow: W, monitor_enabled: bool) -> Self {
        Self {
            workflow,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        let start = chrono::Utc::now();

        tracing::info!("📋 Preparing specification...");
        let request = self.workflow.prepare().await?;

        tracing::info!(
            "🪄  Generating {} {} SDK for `{}`...",
            request.language.emoji(),
            request.language,
            request.name
        );
        let archive = self.workflow.submit(request).await?;

        tracing::info!("📦 Delivering SDK...");
        let dest = self.workflow.deliver(archive).await?;

        tracing::debug!(
            "Generation took {}s",
            (chrono::Utc::now() - start).num_seconds()
        );
        self.monitor.log_summary();

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SdkArchive, SdkLanguage, SdkRequest};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StageCounter {
        stages: AtomicUsize,
    }

    #[async_trait]
    impl Workflow for StageCounter {
        async fn prepare(&self) -> Result<SdkRequest> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            Ok(SdkRequest {
                name: "petstore".to_string(),
                language: SdkLanguage::Rust,
                extension: "json".to_string(),
                spec_filename: "petstore.json".to_string(),
                spec_content: b"{}".to_vec(),
            })
        }

        async fn submit(&self, _request: SdkRequest) -> Result<SdkArchive> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            Ok(SdkArchive {
                content: vec![1, 2, 3],
                filename: None,
            })
        }

        async fn deliver(&self, _archive: SdkArchive) -> Result<String> {
            self.stages.fetch_add(1, Ordering::SeqCst);
            Ok("./out".to_string())
        }
    }

    #[tokio::test]
    async fn test_engine_runs_all_stages_in_order() {
        let engine = Engine::new(StageCounter {
            stages: AtomicUsize::new(0),
        });
        let dest = engine.run().await.unwrap();
        assert_eq!(dest, "./out");
        assert_eq!(engine.workflow.stages.load(Ordering::SeqCst), 3);
    }
}
