use tracing::{debug, trace};

use crate::{
    data::StationStats,
    ident::StationId,
    queue::WaitingRoom,
    simulation::{event::EventList, Command, Context},
    time::Delta,
    variate::Rate,
};

/// A single server with a bounded waiting room.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub(crate) struct Station {
    pub(crate) id: StationId,
    service_rate: Rate,
    #[builder(setter(transform = |capacity: usize| WaitingRoom::new(capacity)))]
    waiting_room: WaitingRoom,
    #[builder(default, setter(skip))]
    status: Status,

    // Cumulative counters, never decremented
    #[builder(default, setter(skip))]
    served: u64,
    #[builder(default, setter(skip))]
    dropped: u64,
    #[builder(default, setter(skip))]
    total_wait: Delta,
    #[builder(default, setter(skip))]
    total_service: Delta,
}

impl Station {
    /// Handles an arrival routed to this station. The arrival is dropped iff the station is busy
    /// and its waiting room is full.
    #[must_use]
    pub(crate) fn receive(&mut self, mut ctx: Context<'_>) -> EventList {
        match self.status {
            Status::Idle => {
                self.status = Status::new_busy();
                self.start_service(Delta::ZERO, &mut ctx);
            }
            Status::Busy if self.waiting_room.is_full() => {
                self.dropped += 1;
                debug!(
                    station = %self.id,
                    time = %ctx.cur_time,
                    capacity = self.waiting_room.capacity(),
                    "packet dropped"
                );
            }
            Status::Busy => self.waiting_room.enqueue(ctx.cur_time),
        }
        ctx.into_events()
    }

    /// Handles the completion of the packet in service.
    #[must_use]
    pub(crate) fn depart(&mut self, mut ctx: Context<'_>) -> EventList {
        assert!(self.status == Status::Busy, "departure from an idle station");
        self.served += 1;
        match self.waiting_room.dequeue() {
            Some(arrived) => {
                let wait = ctx.cur_time - arrived;
                self.start_service(wait, &mut ctx);
            }
            None => {
                self.status = Status::new_idle();
            }
        }
        ctx.into_events()
    }

    fn start_service(&mut self, wait: Delta, ctx: &mut Context<'_>) {
        let service = ctx.exponential(&self.service_rate);
        self.total_wait += wait;
        self.total_service += service;
        trace!(station = %self.id, %wait, %service, "service started");
        ctx.schedule(service, Command::Departure(self.id));
    }

    pub(crate) fn queue_len(&self) -> usize {
        self.waiting_room.len()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.waiting_room.capacity()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.status == Status::Busy
    }

    pub(crate) fn stats(&self) -> StationStats {
        StationStats {
            id: self.id,
            capacity: self.waiting_room.capacity(),
            service_rate: self.service_rate.into_f64(),
            served: self.served,
            dropped: self.dropped,
            total_wait: self.total_wait.into_f64(),
            total_service: self.total_service.into_f64(),
            max_queue_len: self.waiting_room.high_water(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, derive_new::new, derivative::Derivative)]
#[derivative(Default)]
enum Status {
    #[derivative(Default)]
    Idle,
    Busy,
}
