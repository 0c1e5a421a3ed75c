//! Game controller - game-state and turn coordination
//!
//! The [`Controller`] owns the three collaborators for one game session and
//! reconciles them into one consistent view after every change:
//!
//! - the [`RulesEngine`] holds the authoritative position
//! - the [`BoardView`] shows it, plus the status readout
//! - the [`SearchEngine`] picks the computer's moves
//!
//! # Turn Flow
//!
//! ```text
//! drag start ──gate──▶ drop ──rules──▶ accepted ──▶ status, schedule turn
//!                         └──▶ snapback                  │ (think delay)
//!                                                        ▼
//!        status ◀── apply ◀── bestmove ◀── position fen / go depth
//! ```
//!
//! Every method runs on the single event loop; nothing here blocks or locks.
//! The computer turn is split in two halves: [`Controller::on_drop`] hands a
//! [`ComputerTurn`] token back to the loop, which calls
//! [`Controller::request_computer_move`] once the think delay has elapsed.
//! The reply later arrives through [`Controller::on_engine_message`].
//!
//! # Stale Replies
//!
//! Start, clear and undo supersede any pending computer turn (see
//! [`TurnLedger`]). A reply to a superseded search is discarded, never
//! applied to the new position.

use crate::core::error_handling::{guard_panic, log_absorbed};
use crate::core::GameSettings;
use crate::game::ai::{AIDifficulty, Directive, EngineMessage, SearchEngine};
use crate::game::error::GameResult;
use crate::game::resources::{ComputerTurn, ReplyFate, TurnLedger, TurnStart};
use crate::game::rules::RulesEngine;
use crate::game::status::{derive_status, THINKING_STATUS};
use crate::game::types::{MoveRequest, PieceCode, Side, Termination};
use crate::game::view::BoardView;
use shakmaty::Square;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Side the human plays; the search engine plays the other
pub const HUMAN_SIDE: Side = Side::White;

/// Per-session tuning handed to [`Controller::new`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub difficulty: AIDifficulty,
    /// UCI `Skill Level` sent once at start-up
    pub skill_level: u8,
    /// Pause between an accepted human move and the search request
    pub think_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&GameSettings::default())
    }
}

impl From<&GameSettings> for ControllerOptions {
    fn from(settings: &GameSettings) -> Self {
        Self {
            difficulty: settings.difficulty(),
            skill_level: settings.skill_level,
            think_delay: settings.think_delay(),
        }
    }
}

/// What the display widget should do with a dropped piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Illegal: return the piece to its origin, nothing changed
    Snapback,
    /// Applied; when a turn token is present, the event loop must call
    /// [`Controller::request_computer_move`] after the think delay
    Accepted { computer_turn: Option<ComputerTurn> },
}

/// Turn & legality gate
///
/// A drag may start only while the game is running and the piece belongs to
/// the side to move.
pub fn drag_permitted(termination: Termination, side_to_move: Side, piece: PieceCode) -> bool {
    !termination.is_over() && piece.side == side_to_move
}

/// Coordinates rules engine, display widget and search engine
pub struct Controller<R, V, E> {
    rules: R,
    view: V,
    engine: E,
    difficulty: AIDifficulty,
    think_delay: Duration,
    ledger: TurnLedger,
    terminated: bool,
}

impl<R: RulesEngine, V: BoardView, E: SearchEngine> Controller<R, V, E> {
    /// Bind the collaborators and bring the engine and display up
    ///
    /// Puts the engine into UCI mode, sets its skill level, pings it, draws the
    /// current position and publishes the status. Does not trigger a
    /// computer move.
    pub fn new(rules: R, view: V, mut engine: E, options: ControllerOptions) -> GameResult<Self> {
        engine.post(Directive::Uci)?;
        engine.post(Directive::set_option("Skill Level", options.skill_level))?;
        engine.post(Directive::IsReady)?;

        let mut controller = Self {
            rules,
            view,
            engine,
            difficulty: options.difficulty,
            think_delay: options.think_delay,
            ledger: TurnLedger::default(),
            terminated: false,
        };
        controller.sync_view();

        info!(
            "[GAME] Controller ready | Difficulty: {} | Skill: {} | Delay: {:?}",
            controller.difficulty, options.skill_level, controller.think_delay
        );
        Ok(controller)
    }

    /// Drag-start hook: may this piece be picked up?
    pub fn on_drag_start(&self, origin: Square, piece: PieceCode) -> bool {
        if self.ledger.is_busy() {
            debug!("[GAME] Drag from {} refused: computer to move", origin);
            return false;
        }

        let permitted = drag_permitted(self.rules.termination(), self.rules.side_to_move(), piece);
        if !permitted {
            debug!("[GAME] Drag of {} from {} refused", piece, origin);
        }
        permitted
    }

    /// Drop hook: apply the human move, promoting to a queen when needed
    pub fn on_drop(&mut self, origin: Square, destination: Square) -> DropOutcome {
        // The session never delivers a drop the gate refused; library callers may
        if self.ledger.is_busy() {
            self.view.snapback(origin, destination);
            return DropOutcome::Snapback;
        }

        let request = MoveRequest::new(origin, destination).promoting_to_queen();
        let rules = &mut self.rules;
        let applied = match guard_panic("human move application", || rules.apply_move(&request)) {
            Some(Ok(applied)) => applied,
            Some(Err(e)) => {
                info!("[GAME] Rejected {}: {}", request, e);
                self.view.snapback(origin, destination);
                return DropOutcome::Snapback;
            }
            None => {
                self.view.snapback(origin, destination);
                return DropOutcome::Snapback;
            }
        };

        info!("[GAME] {} plays {}", applied.side, applied.san);
        self.sync_view();

        if self.rules.is_game_over() {
            info!("[GAME] {}", self.status());
            return DropOutcome::Accepted {
                computer_turn: None,
            };
        }

        let computer_turn = self.ledger.schedule();
        if computer_turn.is_some() {
            self.view.set_status(THINKING_STATUS);
        }
        DropOutcome::Accepted { computer_turn }
    }

    /// Snap-end hook: make the display match the position again
    ///
    /// Covers moves whose drop square does not tell the whole story
    /// (castling, en passant, promotion).
    pub fn on_snap_end(&mut self) {
        let fen = self.rules.to_position_string();
        self.view.position(&fen);
    }

    /// The think delay for `turn` elapsed: ask the engine for a move
    pub fn request_computer_move(&mut self, turn: ComputerTurn) {
        match self.ledger.begin(turn) {
            TurnStart::Issue => self.issue_search(),
            TurnStart::Defer => info!("[AI] Waiting for a superseded search to finish"),
            TurnStart::Discard => debug!(
                "[AI] Dropping computer turn from generation {}",
                turn.generation()
            ),
        }
    }

    /// Handle one line from the engine's message channel
    pub fn on_engine_message(&mut self, line: &str) {
        match EngineMessage::parse(line) {
            EngineMessage::BestMove {
                origin,
                destination,
                promotion,
            } => {
                if self.accept_reply(line) {
                    let mut request = MoveRequest::new(origin, destination);
                    if promotion {
                        request = request.promoting_to_queen();
                    }
                    self.apply_computer_move(request);
                }
            }
            EngineMessage::NoMove => {
                if self.accept_reply(line) {
                    info!("[AI] Engine found no move");
                    self.publish_status();
                }
            }
            EngineMessage::UciOk | EngineMessage::ReadyOk => debug!("[ENGINE] {}", line.trim()),
            EngineMessage::Id { key, value } => info!("[ENGINE] {} {}", key, value),
            EngineMessage::Info(text) => trace!("[ENGINE] {}", text),
            EngineMessage::Unknown(text) => debug!("[ENGINE] Ignoring '{}'", text),
        }
    }

    /// Change the difficulty used by the next search
    pub fn set_difficulty(&mut self, level: i64) {
        self.difficulty = AIDifficulty::from_level(level);
        info!("[GAME] Difficulty set to {}", self.difficulty);
    }

    /// Start/reset: standard starting arrangement, no computer move
    pub fn start(&mut self) {
        self.supersede_pending();
        self.rules.reset();
        self.post_quietly(Directive::NewGame);
        self.sync_view();
        info!("[GAME] New game");
    }

    /// Clear: empty board
    pub fn clear(&mut self) {
        self.supersede_pending();
        self.rules.clear_board();
        self.view.clear();
        self.publish_status();
        info!("[GAME] Board cleared");
    }

    /// Undo one full round: the computer's reply and the human move before it
    ///
    /// Reverts until the human is to move again or history runs out. Returns
    /// the number of half-moves reverted; zero is a no-op.
    pub fn undo(&mut self) -> usize {
        let mut reverted = 0;
        while self.rules.undo_last_move() {
            reverted += 1;
            if self.rules.side_to_move() == HUMAN_SIDE {
                break;
            }
        }

        if reverted == 0 {
            debug!("[GAME] Nothing to undo");
            return 0;
        }

        self.supersede_pending();
        self.sync_view();
        info!("[GAME] Undid {} half-move(s)", reverted);
        reverted
    }

    /// Session end: stop the engine process
    pub fn teardown(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.ledger.invalidate();
        self.post_quietly(Directive::Quit);
        self.engine.terminate();
        info!("[GAME] Session ended");
    }

    /// Current status text, derived from the position
    pub fn status(&self) -> String {
        derive_status(&self.rules)
    }

    pub fn position_string(&self) -> String {
        self.rules.to_position_string()
    }

    /// A computer turn is scheduled or searching
    pub fn is_computer_turn_pending(&self) -> bool {
        self.ledger.is_busy()
    }

    pub fn difficulty(&self) -> AIDifficulty {
        self.difficulty
    }

    pub fn think_delay(&self) -> Duration {
        self.think_delay
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Post `position` then `go depth`; the ledger already counts this search
    fn issue_search(&mut self) {
        if self.rules.is_game_over() {
            self.ledger.abandon();
            self.publish_status();
            return;
        }

        let fen = self.rules.to_position_string();
        let depth = self.difficulty.search_depth();
        info!("[AI] Requesting move | Depth: {} | Position: {}", depth, fen);

        let posted = self
            .engine
            .post(Directive::Position { fen })
            .and_then(|()| self.engine.post(Directive::GoDepth(depth)));
        if let Err(e) = posted {
            log_absorbed("computer turn", &e);
            self.ledger.abandon();
            self.publish_status();
        }
    }

    /// Match a `bestmove` to the oldest outstanding search
    fn accept_reply(&mut self, line: &str) -> bool {
        match self.ledger.complete() {
            ReplyFate::Current => true,
            ReplyFate::Stale => {
                warn!("[AI] Discarding reply to superseded search: '{}'", line.trim());
                if self.ledger.resume().is_some() {
                    self.issue_search();
                }
                false
            }
            ReplyFate::Unsolicited => {
                warn!("[AI] Discarding unsolicited reply: '{}'", line.trim());
                false
            }
        }
    }

    fn apply_computer_move(&mut self, request: MoveRequest) {
        // The engine must only ever move the computer's pieces
        if self.rules.side_to_move() == HUMAN_SIDE {
            warn!("[AI] Ignoring {}: it is the human's turn", request);
            self.publish_status();
            return;
        }

        let rules = &mut self.rules;
        match guard_panic("computer move application", || rules.apply_move(&request)) {
            Some(Ok(applied)) => info!("[AI] {} plays {}", applied.side, applied.san),
            Some(Err(e)) => warn!("[AI] Engine move {} rejected: {}", request, e),
            None => {}
        }
        self.sync_view();
    }

    fn supersede_pending(&mut self) {
        if self.ledger.invalidate() {
            debug!("[AI] Stopping {} superseded search(es)", self.ledger.outstanding());
            self.post_quietly(Directive::Stop);
        }
    }

    fn post_quietly(&mut self, directive: Directive) {
        if let Err(e) = self.engine.post(directive) {
            log_absorbed("engine directive", &e);
        }
    }

    fn sync_view(&mut self) {
        let fen = self.rules.to_position_string();
        self.view.position(&fen);
        self.publish_status();
    }

    fn publish_status(&mut self) {
        let status = derive_status(&self.rules);
        self.view.set_status(&status);
    }
}
