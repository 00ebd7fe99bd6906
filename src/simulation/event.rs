#![allow(clippy::non_canonical_partial_ord_impl)]

use std::cmp::Reverse;

use smallvec::SmallVec;

use crate::time::Time;

use super::Command;

// Most handlers will not yield very many events
pub(crate) type EventList = SmallVec<[Event; 4]>;

/// A pending command. Events compare by time first and by scheduling order second, so the
/// max-heap pops the earliest event, oldest first among equal times.
#[derive(Debug, derivative::Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Event {
    time: Reverse<Time>,
    seq: Reverse<u64>,
    #[derivative(PartialEq = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    pub(crate) cmd: Command,
}

impl Event {
    pub(crate) fn new(time: Time, cmd: impl Into<Command>) -> Self {
        Self {
            time: Reverse(time),
            seq: Reverse(0),
            cmd: cmd.into(),
        }
    }

    pub(crate) fn time(&self) -> Time {
        self.time.0
    }

    pub(crate) fn with_seq(self, seq: u64) -> Self {
        Self {
            seq: Reverse(seq),
            ..self
        }
    }
}
