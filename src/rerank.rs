use serde::Serialize;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RerankError {
    #[error("reranker failed: {0}")]
    Failed(String),

    #[error("reranker timed out after {0:?}")]
    Timeout(Duration),

    #[error("reranker worker disconnected")]
    Disconnected,
}

/// An optional scorer that may reorder or replace the resolver's output.
///
/// Implementations may be slow or unreliable; callers go through
/// [`GuardedReranker`], which bounds latency and falls back on failure.
pub trait Reranker: Send + Sync {
    fn rerank(&self, candidates: &[String], context: &[String]) -> Result<Vec<String>, RerankError>;

    /// Like `rerank`, but work still running at `deadline` should be torn
    /// down. The default ignores the deadline.
    fn rerank_until(
        &self,
        candidates: &[String],
        context: &[String],
        deadline: Instant,
    ) -> Result<Vec<String>, RerankError> {
        let _ = deadline;
        self.rerank(candidates, context)
    }
}

/// Runs a [`Reranker`] on a worker thread with a deadline.
///
/// The resolver's list is always the answer of last resort: errors, timeouts
/// and empty replies all return it unchanged. A late reply is discarded.
#[derive(Clone)]
pub struct GuardedReranker {
    inner: Arc<dyn Reranker>,
    timeout: Duration,
    top_k: usize,
}

impl GuardedReranker {
    pub fn new(inner: Arc<dyn Reranker>, timeout: Duration, top_k: usize) -> Self {
        Self {
            inner,
            timeout,
            top_k,
        }
    }

    pub fn try_rerank(
        &self,
        candidates: &[String],
        context: &[String],
    ) -> Result<Vec<String>, RerankError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let candidates = candidates.to_vec();
        let context = context.to_vec();
        let deadline = Instant::now() + self.timeout;

        thread::spawn(move || {
            // Receiver may be gone after a timeout; nothing to do then.
            let _ = tx.send(inner.rerank_until(&candidates, &context, deadline));
        });

        let reply = match rx.recv_timeout(self.timeout) {
            Ok(reply) => reply?,
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(RerankError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => return Err(RerankError::Disconnected),
        };

        let mut seen = HashSet::new();
        Ok(reply
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty() && seen.insert(w.clone()))
            .take(self.top_k)
            .collect())
    }

    pub fn apply(&self, candidates: Vec<String>, context: &[String]) -> Vec<String> {
        if candidates.is_empty() {
            return candidates;
        }
        match self.try_rerank(&candidates, context) {
            Ok(reranked) if !reranked.is_empty() => reranked,
            Ok(_) => {
                debug!("Reranker returned nothing; keeping resolver order");
                candidates
            }
            Err(e) => {
                warn!("{}; keeping resolver order", e);
                candidates
            }
        }
    }
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    candidates: &'a [String],
    context: &'a [String],
}

/// Pipes `{"candidates": [...], "context": [...]}` to an external program and
/// reads a JSON array of words back from its stdout.
#[derive(Debug, Clone)]
pub struct CommandReranker {
    program: String,
    args: Vec<String>,
}

impl CommandReranker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace; `None` for a blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(5);

impl CommandReranker {
    fn failed(&self, e: &dyn std::fmt::Display) -> RerankError {
        RerankError::Failed(format!("{}: {}", self.program, e))
    }

    fn spawn(&self) -> Result<Child, RerankError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.failed(&e))
    }

    fn parse_reply(&self, stdout: &[u8]) -> Result<Vec<String>, RerankError> {
        serde_json::from_slice(stdout).map_err(|e| self.failed(&e))
    }
}

fn kill(child: &mut Child) {
    // Already exited is fine; reap it either way.
    let _ = child.kill();
    let _ = child.wait();
}

impl Reranker for CommandReranker {
    fn rerank(&self, candidates: &[String], context: &[String]) -> Result<Vec<String>, RerankError> {
        let mut child = self.spawn()?;
        let request = serde_json::to_vec(&RerankRequest {
            candidates,
            context,
        })
        .map_err(|e| self.failed(&e))?;
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(&request).and_then(|_| stdin.flush()) {
                kill(&mut child);
                return Err(self.failed(&e));
            }
        }

        let output = child.wait_with_output().map_err(|e| self.failed(&e))?;
        if !output.status.success() {
            return Err(self.failed(&output.status));
        }
        self.parse_reply(&output.stdout)
    }

    /// Pipes run on helper threads so a child that stops reading or writing
    /// cannot hold the caller past `deadline`. The child is killed and reaped
    /// once the deadline passes.
    fn rerank_until(
        &self,
        candidates: &[String],
        context: &[String],
        deadline: Instant,
    ) -> Result<Vec<String>, RerankError> {
        let started = Instant::now();
        let request = serde_json::to_vec(&RerankRequest {
            candidates,
            context,
        })
        .map_err(|e| self.failed(&e))?;
        let mut child = self.spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            thread::spawn(move || {
                // A child that exits without reading closes the pipe early.
                let _ = stdin.write_all(&request).and_then(|_| stdin.flush());
            });
        }
        let (out_tx, out_rx) = mpsc::channel();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = out_tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
            });
        }

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    kill(&mut child);
                    debug!("Killed reranker '{}' at its deadline", self.program);
                    return Err(RerankError::Timeout(deadline.saturating_duration_since(started)));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    kill(&mut child);
                    return Err(self.failed(&e));
                }
            }
        };
        if !status.success() {
            return Err(self.failed(&status));
        }

        // The child has exited, but a grandchild may still hold stdout open.
        let remaining = deadline.saturating_duration_since(Instant::now());
        match out_rx.recv_timeout(remaining) {
            Ok(Ok(stdout)) => self.parse_reply(&stdout),
            Ok(Err(e)) => Err(self.failed(&e)),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Err(RerankError::Timeout(deadline.saturating_duration_since(started)))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(RerankError::Disconnected),
        }
    }
}
