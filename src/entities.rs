pub(crate) mod arrivals;
pub(crate) mod station;
