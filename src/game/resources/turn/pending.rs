//! Computer-turn ledger
//!
//! Search requests and `bestmove` replies carry no identifiers; the engine
//! answers in the order it was asked. [`TurnLedger`] turns that implicit
//! contract into bookkeeping:
//!
//! - every Position-replacing lifecycle operation bumps a generation
//! - a scheduled turn remembers the generation it was scheduled in, and is
//!   dropped when its delay elapses in a later generation
//! - each issued search is queued with its generation; each reply pops the
//!   queue front, so replies to superseded searches are recognised as stale
//! - a turn that becomes due while a stale search is still running is
//!   deferred until that search's reply has been consumed, so at most one
//!   search is ever outstanding

use std::collections::VecDeque;

/// Token for a computer turn scheduled after an accepted human move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    generation: u64,
}

impl ComputerTurn {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What to do with a turn whose delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStart {
    /// Post the search now
    Issue,
    /// A superseded search is still running; wait for its reply
    Defer,
    /// Superseded by a reset, clear or undo
    Discard,
}

/// Which request a reply answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFate {
    /// The search of the current generation
    Current,
    /// A search issued before the last reset, clear or undo
    Stale,
    /// No search was outstanding
    Unsolicited,
}

#[derive(Debug, Default)]
pub struct TurnLedger {
    generation: u64,
    scheduled: Option<u64>,
    deferred: Option<u64>,
    in_flight: VecDeque<u64>,
}

impl TurnLedger {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A computer turn is scheduled, deferred or searching in this generation
    pub fn is_busy(&self) -> bool {
        self.scheduled.is_some() || self.deferred.is_some() || self.in_flight.contains(&self.generation)
    }

    /// Searches the engine still owes a reply for, stale ones included
    pub fn outstanding(&self) -> usize {
        self.in_flight.len()
    }

    /// Schedule a computer turn; `None` when one is already pending
    pub fn schedule(&mut self) -> Option<ComputerTurn> {
        if self.is_busy() {
            return None;
        }
        self.scheduled = Some(self.generation);
        Some(ComputerTurn {
            generation: self.generation,
        })
    }

    /// The turn's delay elapsed
    pub fn begin(&mut self, turn: ComputerTurn) -> TurnStart {
        if turn.generation != self.generation || self.scheduled != Some(turn.generation) {
            return TurnStart::Discard;
        }
        self.scheduled = None;

        if self.in_flight.is_empty() {
            self.in_flight.push_back(turn.generation);
            TurnStart::Issue
        } else {
            self.deferred = Some(turn.generation);
            TurnStart::Defer
        }
    }

    /// A deferred turn may go out once the engine has drained
    pub fn resume(&mut self) -> Option<ComputerTurn> {
        if !self.in_flight.is_empty() {
            return None;
        }
        let generation = self.deferred.take()?;
        if generation != self.generation {
            return None;
        }
        self.in_flight.push_back(generation);
        Some(ComputerTurn { generation })
    }

    /// The last issued search never reached the engine
    pub fn abandon(&mut self) {
        self.in_flight.pop_back();
    }

    /// A reply arrived; match it to the oldest outstanding search
    pub fn complete(&mut self) -> ReplyFate {
        match self.in_flight.pop_front() {
            Some(generation) if generation == self.generation => ReplyFate::Current,
            Some(_) => ReplyFate::Stale,
            None => ReplyFate::Unsolicited,
        }
    }

    /// Supersede everything pending; returns true when stale searches remain
    pub fn invalidate(&mut self) -> bool {
        self.generation += 1;
        self.scheduled = None;
        self.deferred = None;
        !self.in_flight.is_empty()
    }
}
