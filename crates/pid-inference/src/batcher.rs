//! Inference Batcher

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use track_features::ModelInput;
use tracing::{debug, info};

use crate::engine::Classifier;
use crate::result::PidResult;
use crate::InferenceError;

/// A queued classification request
struct PidRequest {
    input: ModelInput,
    respond_to: oneshot::Sender<Result<PidResult, InferenceError>>,
}

/// Sender side of a [`PidBatcher`]
#[derive(Clone)]
pub struct PidBatcherHandle {
    sender: mpsc::Sender<PidRequest>,
}

impl PidBatcherHandle {
    /// Queue an input and wait for its result
    pub async fn classify(&self, input: ModelInput) -> Result<PidResult, InferenceError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(PidRequest { input, respond_to })
            .await
            .map_err(|_| InferenceError::BatcherClosed)?;
        response.await.map_err(|_| InferenceError::BatcherClosed)?
    }
}

/// Groups classification requests so the classifier runs once per batch
pub struct PidBatcher {
    /// Channel receiver for incoming requests
    receiver: mpsc::Receiver<PidRequest>,
    /// Batch size threshold
    batch_size: usize,
    /// Timeout for batch collection (ms)
    timeout_ms: u64,
}

impl PidBatcher {
    /// Create a batcher and the handle used to submit to it
    pub fn channel(batch_size: usize, timeout_ms: u64) -> (PidBatcherHandle, Self) {
        let batch_size = batch_size.max(1);
        info!("Creating PID batcher: batch_size={}, timeout={}ms", batch_size, timeout_ms);
        let (sender, receiver) = mpsc::channel(batch_size * 2);
        (
            PidBatcherHandle { sender },
            Self {
                receiver,
                batch_size,
                timeout_ms,
            },
        )
    }

    /// Run until every handle has been dropped
    pub async fn run<C>(&mut self, classifier: Arc<C>)
    where
        C: Classifier + ?Sized,
    {
        info!("Starting PID batcher");

        loop {
            let mut batch = Vec::with_capacity(self.batch_size);
            let timeout_duration = Duration::from_millis(self.timeout_ms);

            // Wait for first item
            match self.receiver.recv().await {
                Some(request) => batch.push(request),
                None => {
                    debug!("Batcher channel closed");
                    break;
                }
            }

            // Try to collect more until batch is full or timeout
            while batch.len() < self.batch_size {
                match timeout(timeout_duration, self.receiver.recv()).await {
                    Ok(Some(request)) => batch.push(request),
                    Ok(None) => break,
                    Err(_) => break,
                }
            }

            debug!("Processing batch of {} inputs", batch.len());

            let (inputs, senders): (Vec<_>, Vec<_>) =
                batch.into_iter().map(|r| (r.input, r.respond_to)).unzip();
            let results = classifier.classify_batch(&inputs);
            for (sender, result) in senders.into_iter().zip(results) {
                if sender.send(result).is_err() {
                    debug!("Requester dropped before result was delivered");
                }
            }
        }

        info!("PID batcher stopped");
    }
}
