//! Action executors: whatever turns a selected payload into motion or sound.
//!
//! The brain's job ends at handing the payload over. A failing executor is
//! logged and otherwise ignored.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::mpsc;

#[async_trait]
pub trait ActionExecutor<P>: Send + Sync {
    async fn execute(&self, payload: &P) -> anyhow::Result<()>;
}

/// Logs every payload at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogExecutor;

#[async_trait]
impl<P: Debug + Send + Sync> ActionExecutor<P> for LogExecutor {
    async fn execute(&self, payload: &P) -> anyhow::Result<()> {
        tracing::info!("Performing action: {:?}", payload);
        Ok(())
    }
}

/// Forwards payloads to a channel, for an actuator running in its own task.
#[derive(Debug, Clone)]
pub struct ChannelExecutor<P> {
    tx: mpsc::UnboundedSender<P>,
}

impl<P> ChannelExecutor<P> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<P>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl<P: Clone + Send + Sync> ActionExecutor<P> for ChannelExecutor<P> {
    async fn execute(&self, payload: &P) -> anyhow::Result<()> {
        self.tx
            .send(payload.clone())
            .map_err(|_| anyhow::anyhow!("Action receiver dropped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_executor_forwards() {
        let (executor, mut rx) = ChannelExecutor::new();
        executor.execute(&"wag tail".to_string()).await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("wag tail"));
    }

    #[tokio::test]
    async fn test_channel_executor_errors_when_receiver_gone() {
        let (executor, rx) = ChannelExecutor::<u32>::new();
        drop(rx);
        assert!(executor.execute(&1).await.is_err());
    }

    #[tokio::test]
    async fn test_log_executor_never_fails() {
        assert!(LogExecutor.execute(&"blink").await.is_ok());
    }
}
