//! JSONL snapshot log
//!
//! Every published snapshot is appended as one JSON object per line. Writing
//! happens on its own task so the engine never waits on the file system.

use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::core::GameSnapshot;

#[derive(Serialize)]
struct SnapshotRecord<'a> {
    seq: u64,
    #[serde(flatten)]
    snapshot: &'a GameSnapshot,
}

/// Writer task plus the channel feeding it
pub struct SnapshotLog {
    tx: mpsc::UnboundedSender<GameSnapshot>,
    task: JoinHandle<()>,
}

impl SnapshotLog {
    /// Open (append) `path` and start the writer task.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(path: String) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<GameSnapshot>();
        let task = tokio::spawn(async move {
            let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    warn!(%path, error = %e, "snapshot log unavailable");
                    return;
                }
            };

            let mut buf: Vec<u8> = Vec::with_capacity(4096);
            let mut seq: u64 = 0;

            while let Some(snapshot) = rx.recv().await {
                seq += 1;
                buf.clear();
                let record = SnapshotRecord {
                    seq,
                    snapshot: &snapshot,
                };
                if let Err(e) = serde_json::to_writer(&mut buf, &record) {
                    warn!(seq, error = %e, "snapshot record not serializable");
                    continue;
                }
                buf.push(b'\n');
                if let Err(e) = file.write_all(&buf).await {
                    warn!(%path, error = %e, "snapshot log write failed");
                    break;
                }
            }

            if let Err(e) = file.flush().await {
                warn!(%path, error = %e, "snapshot log flush failed");
            }
        });

        Self { tx, task }
    }

    pub fn record(&self, snapshot: GameSnapshot) {
        let _ = self.tx.send(snapshot);
    }

    /// Close the channel and wait until everything queued is on disk.
    pub async fn close(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}
