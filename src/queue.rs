use std::collections::VecDeque;

use crate::time::Time;

/// A bounded FIFO of arrival timestamps. The packet in service is not counted.
#[derive(Debug, Clone, derive_new::new)]
pub(crate) struct WaitingRoom {
    capacity: usize,
    #[new(default)]
    inner: VecDeque<Time>,
    #[new(default)]
    high_water: usize,
}

impl WaitingRoom {
    delegate::delegate! {
        to self.inner {
            #[call(pop_front)]
            pub(crate) fn dequeue(&mut self) -> Option<Time>;

            pub(crate) fn len(&self) -> usize;
        }
    }

    pub(crate) fn enqueue(&mut self, arrived: Time) {
        assert!(!self.is_full(), "enqueue into a full waiting room");
        self.inner.push_back(arrived);
        self.high_water = self.high_water.max(self.inner.len());
    }

    pub(crate) fn is_full(&self) -> bool {
        self.inner.len() >= self.capacity
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// The longest the waiting room has ever been.
    pub(crate) fn high_water(&self) -> usize {
        self.high_water
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let mut q = WaitingRoom::new(3);
        q.enqueue(Time::new(1.0));
        q.enqueue(Time::new(2.0));
        assert_eq!(q.dequeue(), Some(Time::new(1.0)));
        q.enqueue(Time::new(3.0));
        assert_eq!(q.dequeue(), Some(Time::new(2.0)));
        assert_eq!(q.dequeue(), Some(Time::new(3.0)));
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.high_water(), 2);
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let q = WaitingRoom::new(0);
        assert!(q.is_full());
        assert_eq!(q.len(), 0);
        assert_eq!(q.capacity(), 0);
    }

    #[test]
    #[should_panic]
    fn enqueue_past_capacity() {
        let mut q = WaitingRoom::new(1);
        q.enqueue(Time::ZERO);
        assert!(q.is_full());
        q.enqueue(Time::ONE);
    }
}
