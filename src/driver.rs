use std::{path::Path, str::FromStr};

use tracing::info;

use crate::{
    data::Report,
    entities::{arrivals::Arrivals, station::Station},
    ident::StationId,
    routing::Router,
    simulation::Simulation,
    time::Time,
    variate::{Rate, VariateSource},
};

/// Positional argument layout accepted by [`Config::from_positional`].
pub const USAGE: &str = "<Time> <M> <P1..PM> <Lambda> <Q1..QM> <Mu1..MuM>";

#[derive(
    Debug, Clone, PartialEq, typed_builder::TypedBuilder, serde::Serialize, serde::Deserialize,
)]
pub struct Config {
    /// No arrival is generated after this time.
    pub horizon: f64,
    /// Routing probability of each station, in station order.
    pub probabilities: Vec<f64>,
    pub arrival_rate: f64,
    pub stations: Vec<StationDesc>,

    /// Seed of the random stream. A fresh one is drawn when absent.
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, derive_new::new, serde::Serialize, serde::Deserialize)]
pub struct StationDesc {
    pub capacity: usize,
    pub service_rate: f64,
}

impl Config {
    /// Parses `Time M P1..PM Lambda Q1..QM Mu1..MuM`, which is `3 + 3M` values.
    pub fn from_positional<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args = args
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .collect::<Vec<String>>();
        if args.len() < 2 {
            return Err(Error::ArgCount {
                expected: 6,
                found: args.len(),
            });
        }

        let horizon = parse::<f64>("Time", &args[0])?;
        let m = parse::<usize>("M", &args[1])?;
        if m == 0 {
            return Err(Error::NoStations);
        }
        let expected = m.saturating_mul(3).saturating_add(3);
        if args.len() != expected {
            return Err(Error::ArgCount {
                expected,
                found: args.len(),
            });
        }

        let (probabilities, rest) = args[2..].split_at(m);
        let (lambda, rest) = rest.split_at(1);
        let (capacities, service_rates) = rest.split_at(m);

        let probabilities = probabilities
            .iter()
            .enumerate()
            .map(|(i, v)| parse::<f64>(&format!("P{}", i + 1), v))
            .collect::<Result<Vec<_>, _>>()?;
        let arrival_rate = parse::<f64>("Lambda", &lambda[0])?;
        let stations = capacities
            .iter()
            .zip(service_rates)
            .enumerate()
            .map(|(i, (q, mu))| {
                let capacity = parse::<usize>(&format!("Q{}", i + 1), q)?;
                let service_rate = parse::<f64>(&format!("Mu{}", i + 1), mu)?;
                Ok(StationDesc::new(capacity, service_rate))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Self {
            horizon,
            probabilities,
            arrival_rate,
            stations,
            seed: None,
        })
    }

    /// Rejects configurations that cannot be simulated. Routing probabilities are deliberately
    /// left alone: any vector routes somewhere.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(Error::InvalidHorizon(self.horizon));
        }
        if self.stations.is_empty() {
            return Err(Error::NoStations);
        }
        if self.probabilities.len() != self.stations.len() {
            return Err(Error::ProbabilityCount {
                stations: self.stations.len(),
                probabilities: self.probabilities.len(),
            });
        }
        if Rate::new(self.arrival_rate).is_none() {
            return Err(Error::InvalidArrivalRate(self.arrival_rate));
        }
        for (i, desc) in self.stations.iter().enumerate() {
            if Rate::new(desc.service_rate).is_none() || desc.service_rate == 0.0 {
                return Err(Error::InvalidServiceRate {
                    station: StationId::new(i),
                    rate: desc.service_rate,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn into_simulation(self) -> Result<Simulation, Error> {
        self.validate()?;
        let variates = match self.seed {
            Some(seed) => VariateSource::new(seed),
            None => VariateSource::from_entropy(),
        };
        let arrival_rate =
            Rate::new(self.arrival_rate).ok_or(Error::InvalidArrivalRate(self.arrival_rate))?;
        let arrivals = Arrivals::builder()
            .rate(arrival_rate)
            .horizon(Time::new(self.horizon))
            .build();
        let stations = self
            .stations
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let id = StationId::new(i);
                let rate = Rate::new(desc.service_rate).ok_or(Error::InvalidServiceRate {
                    station: id,
                    rate: desc.service_rate,
                })?;
                Ok(Station::builder()
                    .id(id)
                    .service_rate(rate)
                    .waiting_room(desc.capacity)
                    .build())
            })
            .collect::<Result<Vec<_>, Error>>()?;
        info!(
            horizon = self.horizon,
            stations = stations.len(),
            arrival_rate = self.arrival_rate,
            seed = variates.seed(),
            "starting simulation"
        );
        Ok(Simulation::builder()
            .variates(variates)
            .arrivals(arrivals)
            .router(Router::new(&self.probabilities))
            .stations(stations)
            .build())
    }
}

/// Runs one simulation to completion.
pub fn run(cfg: Config) -> Result<Report, Error> {
    let report = cfg.into_simulation()?.run();
    info!(
        summary = %report.summary,
        arrivals = report.arrivals,
        events = report.events,
        "simulation finished"
    );
    Ok(report)
}

pub fn read_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T, Error> {
    value.trim().parse().map_err(|_| Error::Parse {
        name: name.to_owned(),
        value: value.to_owned(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} arguments, found {found}")]
    ArgCount { expected: usize, found: usize },

    #[error("invalid value for {name}: {value:?}")]
    Parse { name: String, value: String },

    #[error("at least one station is required")]
    NoStations,

    #[error("{stations} stations but {probabilities} routing probabilities")]
    ProbabilityCount {
        stations: usize,
        probabilities: usize,
    },

    #[error("horizon must be finite and non-negative, got {0}")]
    InvalidHorizon(f64),

    #[error("arrival rate must be finite and non-negative, got {0}")]
    InvalidArrivalRate(f64),

    #[error("service rate of station {station} must be finite and positive, got {rate}")]
    InvalidServiceRate { station: StationId, rate: f64 },

    #[error("serde error")]
    Serde(#[from] serde_json::Error),

    #[error("IO error")]
    Io(#[from] std::io::Error),
}
