use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    core::store::LogFile,
    parser::{LogParser, ParseOptions},
};

use super::events::{Generation, LogEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("re-parse loop is gone")]
    ChannelClosed,
    #[error("parse task failed: {0}")]
    Join(String),
}

#[derive(Debug, Clone)]
pub struct ReparseConfig {
    pub command_queue_bound: usize,
    pub event_queue_bound: usize,
    pub parse: ParseOptions,
}

impl Default for ReparseConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 64,
            event_queue_bound: 256,
            parse: ParseOptions::default(),
        }
    }
}

pub struct ReparseHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<LogEvent>,
}

impl Clone for ReparseHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

type Reply = oneshot::Sender<Result<Arc<LogFile>, RuntimeError>>;

enum Command {
    Submit { lines: Vec<String>, resp: Reply },
    Latest { resp: oneshot::Sender<Option<Arc<LogFile>>> },
    Shutdown { resp: oneshot::Sender<()> },
}

/// Starts the re-parse loop on the current tokio runtime.
///
/// Text snapshots are parsed one at a time off the async threads. When
/// several snapshots are waiting, only the newest is parsed and every
/// waiting caller receives that result.
pub fn spawn_reparser(config: ReparseConfig) -> ReparseHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<LogEvent>(config.event_queue_bound.max(1));
    let events_tx_loop = events_tx.clone();
    let parser = LogParser::new(config.parse);

    tokio::spawn(async move {
        let mut latest: Option<Arc<LogFile>> = None;
        let mut generation: Generation = 0;
        let mut deferred: Option<Command> = None;

        loop {
            let cmd = match deferred.take() {
                Some(cmd) => cmd,
                None => match cmd_rx.recv().await {
                    Some(cmd) => cmd,
                    None => break,
                },
            };

            match cmd {
                Command::Submit { lines, resp } => {
                    generation += 1;
                    let mut waiting = vec![resp];
                    let mut lines = lines;

                    // Fold every queued submit into the newest one.
                    while let Ok(next) = cmd_rx.try_recv() {
                        match next {
                            Command::Submit { lines: newer, resp } => {
                                let _ = events_tx_loop.send(LogEvent::Coalesced { generation });
                                generation += 1;
                                lines = newer;
                                waiting.push(resp);
                            }
                            other => {
                                deferred = Some(other);
                                break;
                            }
                        }
                    }

                    let parser = parser.clone();
                    let result = tokio::task::spawn_blocking(move || parser.parse(lines))
                        .await
                        .map(Arc::new)
                        .map_err(|e| RuntimeError::Join(e.to_string()));

                    match result {
                        Ok(log) => {
                            debug!(generation, rows = log.len(), "snapshot parsed");
                            let _ = events_tx_loop.send(LogEvent::Parsed {
                                generation,
                                rows: log.len(),
                                diagnostics: log.diagnostics().len(),
                            });
                            latest = Some(Arc::clone(&log));
                            for resp in waiting {
                                let _ = resp.send(Ok(Arc::clone(&log)));
                            }
                        }
                        Err(err) => {
                            for resp in waiting {
                                let _ = resp.send(Err(err.clone()));
                            }
                        }
                    }
                }
                Command::Latest { resp } => {
                    let _ = resp.send(latest.clone());
                }
                Command::Shutdown { resp } => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });

    ReparseHandle { cmd_tx, events_tx }
}

impl ReparseHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.events_tx.subscribe()
    }

    pub async fn submit<I, S>(&self, lines: I) -> Result<Arc<LogFile>, RuntimeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines.into_iter().map(Into::into).collect();
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Submit { lines, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    pub async fn latest(&self) -> Result<Option<Arc<LogFile>>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Latest { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}
