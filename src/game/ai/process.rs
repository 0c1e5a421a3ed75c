//! UCI engine child process
//!
//! [`UciProcess`] runs the search engine as a separate OS process, the only
//! real parallelism in the system. Two tokio tasks bridge it to the event
//! loop:
//!
//! - a writer task drains queued [`Directive`]s to the child's stdin, so
//!   posting never blocks the controller
//! - a reader task forwards every stdout line into an unbounded channel, the
//!   engine's message channel consumed by the session loop
//!
//! The engine processes directives in the order sent and answers each `go`
//! with exactly one `bestmove`, so ordering alone correlates requests and
//! responses.

use super::protocol::Directive;
use super::SearchEngine;
use crate::game::error::{GameError, GameResult};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Receiving end of the engine's message channel
pub type EngineLines = mpsc::UnboundedReceiver<String>;

/// Handle to a running UCI engine
#[derive(Debug)]
pub struct UciProcess {
    directives: mpsc::UnboundedSender<Directive>,
    child: Option<Child>,
}

impl UciProcess {
    /// Launch the engine binary and wire up its channels
    ///
    /// Must be called from within a tokio runtime. The child is killed if the
    /// handle is dropped without [`SearchEngine::terminate`].
    pub fn spawn(path: &Path) -> GameResult<(Self, EngineLines)> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| GameError::EngineSpawn {
                path: path.display().to_string(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(GameError::EngineChannelClosed)?;
        let stdout = child.stdout.take().ok_or(GameError::EngineChannelClosed)?;

        let (line_tx, line_rx) = mpsc::unbounded_channel();
        tokio::spawn(read_lines(stdout, line_tx));

        let (directive_tx, directive_rx) = mpsc::unbounded_channel();
        tokio::spawn(write_directives(stdin, directive_rx));

        info!("[ENGINE] Started {} (pid {:?})", path.display(), child.id());

        Ok((
            Self {
                directives: directive_tx,
                child: Some(child),
            },
            line_rx,
        ))
    }
}

impl SearchEngine for UciProcess {
    fn post(&mut self, directive: Directive) -> GameResult<()> {
        self.directives
            .send(directive)
            .map_err(|_| GameError::EngineChannelClosed)
    }

    fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        match child.start_kill() {
            Ok(()) => info!("[ENGINE] Terminated engine process"),
            // Already exited on its own after `quit`
            Err(e) => debug!("[ENGINE] Kill after exit: {}", e),
        }
    }
}

async fn read_lines(stdout: ChildStdout, lines: mpsc::UnboundedSender<String>) {
    let mut reader = BufReader::new(stdout).lines();
    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                debug!("[ENGINE] << {}", line);
                if lines.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => {
                info!("[ENGINE] Engine closed its output");
                break;
            }
            Err(e) => {
                warn!("[ENGINE] Failed to read engine output: {}", e);
                break;
            }
        }
    }
}

async fn write_directives(mut stdin: ChildStdin, mut directives: mpsc::UnboundedReceiver<Directive>) {
    while let Some(directive) = directives.recv().await {
        debug!("[ENGINE] >> {}", directive);
        let line = format!("{directive}\n");
        if let Err(e) = stdin.write_all(line.as_bytes()).await {
            warn!("[ENGINE] Failed to write '{}': {}", directive, e);
            break;
        }
        if let Err(e) = stdin.flush().await {
            warn!("[ENGINE] Failed to flush engine input: {}", e);
            break;
        }
    }
}
