use crate::ident::StationId;

/// Maps a uniform draw onto a station using cumulative routing probabilities.
///
/// The probabilities are not required to sum to exactly one. A draw that exceeds the last
/// cumulative bucket falls back to the last station, so every draw resolves to some station.
#[derive(Debug, Clone)]
pub struct Router {
    cumulative: Vec<f64>,
}

impl Router {
    /// # Panics
    ///
    /// Panics if `probabilities` is empty.
    pub fn new(probabilities: &[f64]) -> Self {
        assert!(!probabilities.is_empty(), "router needs at least one station");
        let cumulative = probabilities
            .iter()
            .scan(0.0, |acc, &p| {
                *acc += p;
                Some(*acc)
            })
            .collect();
        Self { cumulative }
    }

    /// Returns the smallest index whose cumulative probability is at least `r`.
    pub fn route(&self, r: f64) -> StationId {
        let idx = self
            .cumulative
            .iter()
            .position(|&c| r <= c)
            .unwrap_or(self.cumulative.len() - 1);
        StationId::new(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_by_cumulative_probability() {
        let router = Router::new(&[0.3, 0.7]);
        assert_eq!(router.route(0.2), StationId::new(0));
        assert_eq!(router.route(0.3), StationId::new(0));
        assert_eq!(router.route(0.5), StationId::new(1));
        assert_eq!(router.route(1.0), StationId::new(1));
    }

    #[test]
    fn short_sum_falls_back_to_last() {
        let router = Router::new(&[0.2, 0.2, 0.2]);
        assert_eq!(router.route(0.1), StationId::new(0));
        assert_eq!(router.route(0.5), StationId::new(2));
        assert_eq!(router.route(0.99), StationId::new(2));
    }

    #[test]
    fn drifted_sum() {
        // 0.1 * 10 sums to slightly less than one in binary floating point
        let router = Router::new(&[0.1; 10]);
        assert_eq!(router.route(0.999_999_999_999_999_9), StationId::new(9));
        assert_eq!(router.route(0.05), StationId::ZERO);
    }

    #[test]
    fn zero_probability_skipped() {
        let router = Router::new(&[0.0, 1.0]);
        assert_eq!(router.route(0.01), StationId::new(1));
    }
}
