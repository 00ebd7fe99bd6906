use tracing::trace;

use crate::{
    simulation::{event::EventList, Command, Context},
    time::Time,
    variate::Rate,
};

/// The Poisson arrival process. Each arrival schedules the next one, and no arrival is scheduled
/// past the horizon.
#[derive(Debug, Clone, typed_builder::TypedBuilder)]
pub(crate) struct Arrivals {
    rate: Rate,
    horizon: Time,
    #[builder(default, setter(skip))]
    pub(crate) generated: u64,
}

impl Arrivals {
    /// Schedules the next arrival after an exponential gap from the current time, unless it would
    /// land past the horizon.
    #[must_use]
    pub(crate) fn step(&mut self, mut ctx: Context<'_>) -> EventList {
        let gap = ctx.exponential(&self.rate);
        let next = ctx.cur_time + gap;
        if next <= self.horizon {
            trace!(time = %next, "next arrival");
            ctx.schedule_at(next, Command::Arrival);
        }
        ctx.into_events()
    }

    /// Counts an arrival that has just fired.
    pub(crate) fn record(&mut self) {
        self.generated += 1;
    }
}
