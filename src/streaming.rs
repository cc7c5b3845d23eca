//! Bounded hand-off between a model stream and the single task assembling its reply.
use eyre::{Result, eyre};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Producer side of the queue. Cloneable; the queue closes when every clone is gone.
#[derive(Clone)]
pub struct ChunkSender {
    tx: mpsc::Sender<String>,
    dropped: Arc<AtomicUsize>,
}

impl ChunkSender {
    /// Enqueue without waiting. A full queue drops the chunk rather than
    /// stalling the producer. Returns whether the chunk was accepted.
    pub fn offer(&self, chunk: String) -> bool {
        match self.tx.try_send(chunk) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(chunk)) => {
                let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!(len = chunk.len(), total, "stream: queue full, chunk dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }

    /// Enqueue, waiting for room. For sources that must not lose data.
    pub async fn send(&self, chunk: String) -> bool {
        self.tx.send(chunk).await.is_ok()
    }
}

/// The fully assembled reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub text: String,
    /// Chunks lost to a full queue.
    pub dropped: usize,
}

/// Consumer side: a task concatenating chunks in arrival order.
pub struct Assembly {
    task: JoinHandle<String>,
    cancel: Option<oneshot::Sender<()>>,
    dropped: Arc<AtomicUsize>,
}

impl Assembly {
    /// Stop accepting chunks. Whatever is already queued is still consumed.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    /// Wait until the queue is closed and drained, and return the reply.
    /// Producers must have been dropped (or the assembly cancelled) for this to finish.
    pub async fn finish(self) -> Result<Assembled> {
        let text = self.task.await.map_err(|e| eyre!(e))?;
        Ok(Assembled {
            text,
            dropped: self.dropped.load(Ordering::Relaxed),
        })
    }
}

/// Spawn the consumer. `on_chunk` sees each chunk as it is taken off the queue.
pub fn assemble<F>(capacity: usize, mut on_chunk: F) -> (ChunkSender, Assembly)
where
    F: FnMut(&str) + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<String>(capacity.max(1));
    let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
    let dropped = Arc::new(AtomicUsize::new(0));

    let task = tokio::spawn(async move {
        let mut text = String::new();
        let mut cancelled = false;
        loop {
            let next = if cancelled {
                rx.recv().await
            } else {
                tokio::select! {
                    chunk = rx.recv() => chunk,
                    _ = &mut cancel_rx => {
                        cancelled = true;
                        rx.close();
                        continue;
                    }
                }
            };
            let Some(chunk) = next else { break };
            on_chunk(&chunk);
            text.push_str(&chunk);
        }
        text
    });

    let sender = ChunkSender {
        tx,
        dropped: dropped.clone(),
    };
    let assembly = Assembly {
        task,
        cancel: Some(cancel_tx),
        dropped,
    };
    (sender, assembly)
}
