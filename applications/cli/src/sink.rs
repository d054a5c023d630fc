//! Dry-run playback sink

use async_trait::async_trait;
use tonebox_core::{PlaybackSink, ResolvedSource, SinkError, SinkNotifier, SourceDescriptor};
use tracing::info;

/// Sink that logs what it would play and reports ready at once
#[derive(Debug, Default)]
pub struct LoggingSink {
    bound: Option<SourceDescriptor>,
}

#[async_trait]
impl PlaybackSink for LoggingSink {
    async fn open(&mut self, source: &ResolvedSource) -> Result<(), SinkError> {
        info!(strategy = %source.strategy(), descriptor = ?source.descriptor(), "Sink bound");
        self.bound = Some(source.descriptor().clone());
        Ok(())
    }

    fn prepare(&mut self, notifier: SinkNotifier) -> Result<(), SinkError> {
        if self.bound.is_none() {
            return Err(SinkError::Prepare("no source bound".into()));
        }
        tokio::spawn(async move { notifier.ready().await });
        Ok(())
    }

    fn start(&mut self) -> Result<(), SinkError> {
        info!(descriptor = ?self.bound, "Sink started");
        Ok(())
    }

    fn release(&mut self) {
        if let Some(descriptor) = self.bound.take() {
            info!(descriptor = ?descriptor, "Sink released");
        }
    }
}
