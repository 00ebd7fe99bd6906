use std::collections::BinaryHeap;

use delegate::delegate;

use super::event::Event;

#[derive(Debug, Default)]
pub(crate) struct Schedule {
    inner: BinaryHeap<Event>,
    next_seq: u64,
}

impl Schedule {
    delegate! {
        to self.inner {
            pub(crate) fn pop(&mut self) -> Option<Event>;
            pub(crate) fn is_empty(&self) -> bool;
            pub(crate) fn len(&self) -> usize;
        }
    }

    /// Events with equal times pop in the order they were pushed.
    pub(crate) fn push(&mut self, ev: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.push(ev.with_seq(seq));
    }
}

#[cfg(test)]
mod tests {
    use crate::{ident::StationId, simulation::Command, time::Time};

    use super::*;

    #[test]
    fn earliest_first() {
        let mut schedule = Schedule::default();
        for t in [3.0, 1.0, 2.0] {
            schedule.push(Event::new(Time::new(t), Command::Arrival));
        }
        assert_eq!(schedule.len(), 3);
        let times = std::iter::from_fn(|| schedule.pop().map(|ev| ev.time().into_f64()))
            .collect::<Vec<_>>();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert!(schedule.is_empty());
    }

    #[test]
    fn fifo_among_equal_times() {
        let mut schedule = Schedule::default();
        for i in 0..5 {
            schedule.push(Event::new(
                Time::ONE,
                Command::Departure(StationId::new(i)),
            ));
        }
        for i in 0..5 {
            let ev = schedule.pop().unwrap();
            assert!(matches!(ev.cmd, Command::Departure(id) if id == StationId::new(i)));
        }
    }
}
