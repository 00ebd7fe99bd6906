pub(crate) mod event;
mod schedule;

use tracing::trace;

use crate::{
    data::{Report, Summary},
    entities::{arrivals::Arrivals, station::Station},
    ident::StationId,
    routing::Router,
    time::{Delta, Time},
    variate::{Rate, VariateSource},
};

use self::{
    event::{Event, EventList},
    schedule::Schedule,
};

#[derive(Debug, typed_builder::TypedBuilder)]
pub(crate) struct Simulation {
    // Run-time
    #[builder(default, setter(skip))]
    cur_time: Time,
    #[builder(default, setter(skip))]
    schedule: Schedule,
    #[builder(default, setter(skip))]
    nr_events: u64,
    variates: VariateSource,

    // Entities
    arrivals: Arrivals,
    router: Router,
    stations: Vec<Station>,
}

impl Simulation {
    pub(crate) fn run(mut self) -> Report {
        // Kick off the simulation with the first arrival
        self.start();
        // Run until every admitted packet has departed
        while !self.should_stop() {
            self.step();
        }
        self.finish()
    }

    fn should_stop(&self) -> bool {
        self.schedule.is_empty()
    }

    fn start(&mut self) {
        let ctx = Context::new(self.cur_time, &mut self.variates);
        let events = self.arrivals.step(ctx);
        self.push_all(events);
    }

    /// Handles the earliest pending event and returns its time, or `None` once the schedule is
    /// drained.
    fn step(&mut self) -> Option<Time> {
        let next = self.schedule.pop()?;

        let (time, cmd) = (next.time(), next.cmd);
        assert!(self.cur_time <= time);
        self.cur_time = time;
        self.nr_events += 1;
        trace!(%time, ?cmd, pending = self.schedule.len(), "dispatch");

        let events = self.apply(cmd);
        self.push_all(events);
        Some(time)
    }

    fn push_all(&mut self, events: EventList) {
        for ev in events.into_iter() {
            self.schedule.push(ev);
        }
    }

    /// The time of the last handled event.
    fn last_event_time(&self) -> Time {
        self.cur_time
    }

    fn finish(self) -> Report {
        debug_assert!(self
            .stations
            .iter()
            .all(|s| !s.is_busy() && s.queue_len() == 0));
        let stations = self.stations.iter().map(Station::stats).collect::<Vec<_>>();
        let summary = Summary::aggregate(&stations, self.last_event_time());
        Report {
            summary,
            stations,
            seed: self.variates.seed(),
            arrivals: self.arrivals.generated,
            events: self.nr_events,
        }
    }
}

// Command handlers
impl Simulation {
    fn apply(&mut self, cmd: Command) -> EventList {
        match cmd {
            Command::Arrival => self.apply_arrival(),
            Command::Departure(id) => self.apply_departure(id),
        }
    }

    fn apply_arrival(&mut self) -> EventList {
        self.arrivals.record();
        // The arrival process sustains itself regardless of where this packet goes
        let mut events = self
            .arrivals
            .step(Context::new(self.cur_time, &mut self.variates));
        let id = self.router.route(self.variates.uniform());
        let station = self
            .stations
            .get_mut(id.into_usize())
            .expect("invalid station ID");
        events.extend(station.receive(Context::new(self.cur_time, &mut self.variates)));
        events
    }

    fn apply_departure(&mut self, id: StationId) -> EventList {
        let ctx = Context::new(self.cur_time, &mut self.variates);
        let station = self
            .stations
            .get_mut(id.into_usize())
            .expect("invalid station ID");
        station.depart(ctx)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Command {
    Arrival,
    Departure(StationId),
}

/// What a handler sees while it runs: the clock, the random stream and the events it produces.
#[derive(Debug)]
pub(crate) struct Context<'a> {
    pub(crate) cur_time: Time,
    events: EventList,
    variates: &'a mut VariateSource,
}

impl<'a> Context<'a> {
    pub(crate) fn new(cur_time: Time, variates: &'a mut VariateSource) -> Self {
        Self {
            cur_time,
            events: EventList::new(),
            variates,
        }
    }

    pub(crate) fn schedule(&mut self, delta: Delta, cmd: impl Into<Command>) {
        let time = self.cur_time + delta;
        self.schedule_at(time, cmd);
    }

    pub(crate) fn schedule_at(&mut self, time: Time, cmd: impl Into<Command>) {
        self.events.push(Event::new(time, cmd.into()));
    }

    pub(crate) fn exponential(&mut self, rate: &Rate) -> Delta {
        self.variates.exponential(rate)
    }

    pub(crate) fn into_events(self) -> EventList {
        self.events
    }
}
