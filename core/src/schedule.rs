use alloc::collections::VecDeque;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Ties a scheduled resolution to the pair it was scheduled for.
///
/// Only the ticket handed out for the currently pending pair is honoured by [`crate::MemoryGame::resolve`], so a
/// resolution that fires after a reset is simply dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResolutionTicket(u64);

impl ResolutionTicket {
    pub(crate) const fn new(serial: u64) -> Self {
        Self(serial)
    }

    pub const fn serial(self) -> u64 {
        self.0
    }
}

/// Timer primitives the host environment provides.
///
/// The game never waits by itself: after `schedule_resolution` the host must call back
/// [`crate::MemoryGame::resolve`] with the ticket once `delay` has passed, and while the ticker runs it must call
/// [`crate::MemoryGame::tick`] once per second.
pub trait Scheduler {
    fn schedule_resolution(&mut self, delay: Duration, ticket: ResolutionTicket);
    fn start_ticker(&mut self);
    fn stop_ticker(&mut self);
}

/// Scheduler that only records requests, for hosts that drive time themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    pending: VecDeque<(Duration, ResolutionTicket)>,
    ticking: bool,
    ticker_starts: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn ticker_starts(&self) -> u32 {
        self.ticker_starts
    }

    pub fn pending(&self) -> impl Iterator<Item = &(Duration, ResolutionTicket)> {
        self.pending.iter()
    }

    /// Oldest resolution still waiting to be delivered.
    pub fn pop_resolution(&mut self) -> Option<ResolutionTicket> {
        self.pending.pop_front().map(|(_, ticket)| ticket)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_resolution(&mut self, delay: Duration, ticket: ResolutionTicket) {
        self.pending.push_back((delay, ticket));
    }

    fn start_ticker(&mut self) {
        self.ticking = true;
        self.ticker_starts += 1;
    }

    fn stop_ticker(&mut self) {
        self.ticking = false;
    }
}
