//! Session event loop
//!
//! A single cooperative loop drives the controller. It multiplexes three
//! sources with `tokio::select!`:
//!
//! - UI events (drag hooks and lifecycle buttons)
//! - lines from the search engine's message channel
//! - think-delay timers that have expired
//!
//! All controller calls happen on this loop, one at a time, so the position
//! has exactly one writer. The think-delay timer is a spawned
//! `tokio::time::sleep` that posts its [`ComputerTurn`] back into the loop;
//! it cannot be cancelled, which is why the controller checks the turn's
//! generation when it fires.

use crate::game::ai::{EngineLines, SearchEngine};
use crate::game::controller::{Controller, DropOutcome};
use crate::game::resources::ComputerTurn;
use crate::game::rules::RulesEngine;
use crate::game::types::PieceCode;
use crate::game::view::BoardView;
use shakmaty::Square;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Input from the user interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Widget drag-start hook
    DragStart { origin: Square, piece: PieceCode },
    /// Widget drop hook
    Drop { origin: Square, destination: Square },
    /// Widget post-animation hook
    SnapEnd,
    /// A whole drag gesture from a front end without drag hooks
    ///
    /// The session looks up the dragged piece in the position, then runs
    /// drag start, drop and snap end in order. A gesture the gate refuses
    /// is reported to the view as a snapback.
    Move { origin: Square, destination: Square },
    /// Start button
    Start,
    /// Clear button
    Clear,
    /// Undo button
    Undo,
    /// Difficulty selector
    SetDifficulty(i64),
    /// Page unload
    Quit,
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user quit or the UI went away
    UserQuit,
    /// The engine's message channel closed
    EngineClosed,
}

/// One game session: the controller plus its event sources
pub struct Session<R, V, E> {
    controller: Controller<R, V, E>,
    ui_events: mpsc::UnboundedReceiver<UiEvent>,
    engine_lines: EngineLines,
    timers_tx: mpsc::UnboundedSender<ComputerTurn>,
    timers_rx: mpsc::UnboundedReceiver<ComputerTurn>,
    /// Origin of the drag the gate accepted, if one is in progress
    dragging: Option<Square>,
}

impl<R: RulesEngine, V: BoardView, E: SearchEngine> Session<R, V, E> {
    pub fn new(
        controller: Controller<R, V, E>,
        ui_events: mpsc::UnboundedReceiver<UiEvent>,
        engine_lines: EngineLines,
    ) -> Self {
        let (timers_tx, timers_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            ui_events,
            engine_lines,
            timers_tx,
            timers_rx,
            dragging: None,
        }
    }

    /// Run until the user quits or the engine goes away
    ///
    /// Tears the controller down (terminating the engine) before returning
    /// it, so callers can inspect the final state.
    pub async fn run(mut self) -> (Controller<R, V, E>, SessionEnd) {
        info!("[SESSION] Event loop started");

        let end = loop {
            tokio::select! {
                event = self.ui_events.recv() => match event {
                    Some(UiEvent::Quit) | None => break SessionEnd::UserQuit,
                    Some(event) => self.dispatch(event),
                },
                line = self.engine_lines.recv() => match line {
                    Some(line) => self.controller.on_engine_message(&line),
                    None => {
                        warn!("[SESSION] Engine message channel closed");
                        break SessionEnd::EngineClosed;
                    }
                },
                Some(turn) = self.timers_rx.recv() => self.controller.request_computer_move(turn),
            }
        };

        info!("[SESSION] Event loop stopped: {:?}", end);
        self.controller.teardown();
        (self.controller, end)
    }

    fn dispatch(&mut self, event: UiEvent) {
        debug!("[SESSION] {:?}", event);
        match event {
            UiEvent::DragStart { origin, piece } => self.drag_start(origin, piece),
            UiEvent::Drop {
                origin,
                destination,
            } => self.drop_piece(origin, destination),
            UiEvent::SnapEnd => self.controller.on_snap_end(),
            UiEvent::Move {
                origin,
                destination,
            } => {
                let Some(piece) = self.controller.rules().piece_at(origin) else {
                    info!("[SESSION] No piece on {}", origin);
                    self.controller.view_mut().snapback(origin, destination);
                    return;
                };
                self.drag_start(origin, piece);
                if self.dragging.is_some() {
                    self.drop_piece(origin, destination);
                    self.controller.on_snap_end();
                } else {
                    // No drag animation to undo, so tell the user directly
                    self.controller.view_mut().snapback(origin, destination);
                }
            }
            UiEvent::Start => self.controller.start(),
            UiEvent::Clear => self.controller.clear(),
            UiEvent::Undo => {
                self.controller.undo();
            }
            UiEvent::SetDifficulty(level) => self.controller.set_difficulty(level),
            UiEvent::Quit => {}
        }
    }

    fn drag_start(&mut self, origin: Square, piece: PieceCode) {
        self.dragging = self.controller.on_drag_start(origin, piece).then_some(origin);
    }

    fn drop_piece(&mut self, origin: Square, destination: Square) {
        // The widget only reports drops for drags the gate let start
        if self.dragging.take() != Some(origin) {
            debug!("[SESSION] Ignoring drop without an accepted drag from {}", origin);
            return;
        }

        if let DropOutcome::Accepted {
            computer_turn: Some(turn),
        } = self.controller.on_drop(origin, destination)
        {
            self.schedule(turn);
        }
    }

    fn schedule(&self, turn: ComputerTurn) {
        let delay = self.controller.think_delay();
        let timers = self.timers_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session already ended
            let _ = timers.send(turn);
        });
    }
}
