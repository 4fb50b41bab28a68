use alloc::collections::BTreeSet;
use core::num::Saturating;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No unresolved card is showing.
    Idle,
    OneFlipped,
    /// Two cards are up and a resolution is pending.
    Resolving,
    Complete,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Complete)
    }

    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::Idle | Self::OneFlipped)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    Flipped,
    /// Second card of a pair went up, resolve with this ticket once the flip duration passed.
    PairPending(ResolutionTicket),
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    Stale,
    Matched,
    Mismatched,
    Won,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        use ResolveOutcome::*;
        match self {
            Stale => false,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Clock {
    Idle,
    Running,
    Stopped,
}

/// Turn state machine of a memory game.
#[derive(Debug)]
pub struct MemoryGame<O, S> {
    board: Board,
    flipped: SmallVec<[CardIndex; 2]>,
    matched: BTreeSet<CardIndex>,
    move_count: Saturating<u32>,
    elapsed_secs: Saturating<u32>,
    clock: Clock,
    flip_duration: FlipDuration,
    pending: Option<ResolutionTicket>,
    next_ticket: u64,
    rng: SmallRng,
    observer: O,
    scheduler: S,
}

impl<O: GameObserver, S: Scheduler> MemoryGame<O, S> {
    /// Sets up a freshly shuffled, face-down board.
    ///
    /// An out-of-range or non-numeric flip duration is replaced with [`FlipDuration::MIN`] and reported to the
    /// observer as a [`GameEvent::Warning`].
    pub fn new(board: Board, config: GameConfig, mut observer: O, scheduler: S) -> Self {
        let flip_duration =
            FlipDuration::try_from_millis(config.flip_duration_ms).unwrap_or_else(|err| {
                log::warn!("{}", err);
                observer.notify(GameEvent::Warning(err));
                FlipDuration::MIN
            });

        let mut game = Self {
            board,
            flipped: SmallVec::new(),
            matched: BTreeSet::new(),
            move_count: Saturating(0),
            elapsed_secs: Saturating(0),
            clock: Clock::Idle,
            flip_duration,
            pending: None,
            next_ticket: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            observer,
            scheduler,
        };
        game.deal();
        game
    }

    pub fn state(&self) -> EngineState {
        if self.matched.len() == self.board.len() {
            return EngineState::Complete;
        }

        match self.flipped.len() {
            0 => EngineState::Idle,
            1 => EngineState::OneFlipped,
            _ => EngineState::Resolving,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn move_count(&self) -> u32 {
        self.move_count.0
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs.0
    }

    pub fn is_clock_running(&self) -> bool {
        matches!(self.clock, Clock::Running)
    }

    pub fn flip_duration(&self) -> FlipDuration {
        self.flip_duration
    }

    /// Cards currently face up and waiting for resolution, in the order they were flipped.
    pub fn flipped(&self) -> &[CardIndex] {
        &self.flipped
    }

    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    pub fn is_matched(&self, index: CardIndex) -> bool {
        self.matched.contains(&index)
    }

    pub fn pending_ticket(&self) -> Option<ResolutionTicket> {
        self.pending
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            elapsed_secs: self.elapsed_secs.0,
            moves: self.move_count.0,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn handle_card_click(&mut self, index: CardIndex) -> Result<ClickOutcome> {
        let card = self.board.card(index).ok_or(GameError::InvalidCard(index))?;

        if self.flipped.len() >= 2 || card.is_face_up() || self.matched.contains(&index) {
            log::trace!("ignoring click on card {} ({:?})", index, self.state());
            return Ok(ClickOutcome::Ignored);
        }

        if matches!(self.clock, Clock::Idle) {
            self.clock = Clock::Running;
            self.scheduler.start_ticker();
        }

        self.flip(index);
        self.flipped.push(index);
        self.move_count += 1;
        self.observer
            .notify(GameEvent::MovesChanged(self.move_count.0));

        if self.flipped.len() < 2 {
            return Ok(ClickOutcome::Flipped);
        }

        let ticket = ResolutionTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.pending = Some(ticket);
        log::debug!(
            "pair {:?} up, resolving in {}ms ({:?})",
            self.flipped,
            self.flip_duration.as_millis(),
            ticket
        );
        self.scheduler
            .schedule_resolution(self.flip_duration.as_duration(), ticket);
        Ok(ClickOutcome::PairPending(ticket))
    }

    /// Decides the pending pair: keeps it up as matched or turns both cards back down.
    pub fn resolve(&mut self, ticket: ResolutionTicket) -> ResolveOutcome {
        if self.pending != Some(ticket) {
            log::debug!("ignoring stale resolution {:?}", ticket);
            return ResolveOutcome::Stale;
        }
        self.pending = None;

        let &[first, second] = self.flipped.as_slice() else {
            log::error!("resolution without a pair up: {:?}", self.flipped);
            self.flipped.clear();
            return ResolveOutcome::Stale;
        };
        self.flipped.clear();

        let is_match = match (self.board.card(first), self.board.card(second)) {
            (Some(a), Some(b)) => a.matches(b),
            _ => false,
        };

        if !is_match {
            log::debug!("cards {} and {} differ", first, second);
            self.flip(first);
            self.flip(second);
            return ResolveOutcome::Mismatched;
        }

        log::debug!("cards {} and {} match", first, second);
        self.matched.insert(first);
        self.matched.insert(second);

        if self.matched.len() == self.board.len() {
            self.finish();
            ResolveOutcome::Won
        } else {
            ResolveOutcome::Matched
        }
    }

    /// One elapsed second, only counted while the clock runs.
    pub fn tick(&mut self) -> bool {
        if !self.is_clock_running() {
            return false;
        }

        self.elapsed_secs += 1;
        self.observer
            .notify(GameEvent::TimeChanged(self.elapsed_secs.0));
        true
    }

    pub fn reset_game(&mut self) {
        self.flipped.clear();
        self.matched.clear();
        if let Some(ticket) = self.pending.take() {
            log::debug!("dropping pending resolution {:?}", ticket);
        }

        self.move_count = Saturating(0);
        self.observer.notify(GameEvent::MovesChanged(0));

        self.scheduler.stop_ticker();
        self.clock = Clock::Idle;
        self.elapsed_secs = Saturating(0);
        self.observer.notify(GameEvent::TimeChanged(0));

        self.deal();
    }

    fn deal(&mut self) {
        let layout = self.board.reset(&mut self.rng);
        self.observer.notify(GameEvent::LayoutChanged(layout));
    }

    fn flip(&mut self, index: CardIndex) {
        if let Some(card) = self.board.card_mut(index) {
            card.toggle_flip();
            let face_up = card.is_face_up();
            self.observer
                .notify(GameEvent::CardFlipped { index, face_up });
        }
    }

    fn finish(&mut self) {
        self.clock = Clock::Stopped;
        self.scheduler.stop_ticker();

        let summary = self.summary();
        log::info!("{}", summary);
        self.observer.notify(GameEvent::Completed(summary));
    }
}
