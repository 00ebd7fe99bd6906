use std::fmt;

use crate::{ident::StationId, time::Time};

/// Final counters of one station.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StationStats {
    pub id: StationId,
    /// Waiting room size, excluding the packet in service.
    pub capacity: usize,
    pub service_rate: f64,
    pub served: u64,
    pub dropped: u64,
    /// Total time admitted packets spent in the waiting room.
    pub total_wait: f64,
    pub total_service: f64,
    /// The longest the waiting room ever was.
    pub max_queue_len: usize,
}

/// Aggregate throughput and latency of a run.
///
/// Displays as the five space-separated fields `served dropped last_event_time avg_wait
/// avg_service`, with the reals in fixed-point notation with four decimals.
#[derive(Debug, Default, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub served: u64,
    pub dropped: u64,
    /// Time of the last handled event. Zero if nothing ever happened.
    pub last_event_time: f64,
    /// Average wait over served packets, zero if none were served.
    pub avg_wait: f64,
    /// Average service time over served packets, zero if none were served.
    pub avg_service: f64,
}

impl Summary {
    /// Reduces per-station counters to global totals. Dropped packets count toward neither
    /// average.
    pub fn aggregate(stations: &[StationStats], last_event_time: Time) -> Self {
        let served = stations.iter().map(|s| s.served).sum::<u64>();
        let dropped = stations.iter().map(|s| s.dropped).sum::<u64>();
        let total_wait = stations.iter().map(|s| s.total_wait).sum::<f64>();
        let total_service = stations.iter().map(|s| s.total_service).sum::<f64>();
        let average = |total: f64| {
            if served == 0 {
                0.0
            } else {
                total / served as f64
            }
        };
        Self {
            served,
            dropped,
            last_event_time: last_event_time.into_f64(),
            avg_wait: average(total_wait),
            avg_service: average(total_service),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:.4} {:.4} {:.4}",
            self.served, self.dropped, self.last_event_time, self.avg_wait, self.avg_service
        )
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let average = |total: f64| {
            if self.served == 0 {
                0.0
            } else {
                total / self.served as f64
            }
        };
        write!(
            f,
            "station {}: served={} dropped={} avg_wait={:.4} avg_service={:.4} max_queue={}/{}",
            self.id,
            self.served,
            self.dropped,
            average(self.total_wait),
            average(self.total_service),
            self.max_queue_len,
            self.capacity
        )
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub stations: Vec<StationStats>,
    /// The seed of the random stream, for replaying the run.
    pub seed: u64,
    /// Number of arrivals generated, served or dropped.
    pub arrivals: u64,
    /// Number of events handled.
    pub events: u64,
}
