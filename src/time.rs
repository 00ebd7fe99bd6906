use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Sub},
};

// Simulated time is continuous. Both units are totally ordered through `f64::total_cmp` so they
// can key a `BinaryHeap`.
macro_rules! time_unit {
    ($name: ident) => {
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            derive_more::Display,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(f64);

        impl $name {
            pub const ZERO: $name = Self::new(0.0);
            pub const ONE: $name = Self::new(1.0);
            pub const INFINITY: $name = Self::new(f64::INFINITY);

            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn into_f64(self) -> f64 {
                self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other) == Ordering::Equal
            }
        }

        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }
    };
}

time_unit!(Time);
time_unit!(Delta);

impl AddAssign<Delta> for Delta {
    fn add_assign(&mut self, rhs: Delta) {
        *self = Self(self.0 + rhs.0)
    }
}

impl Add<Delta> for Time {
    type Output = Time;

    fn add(self, rhs: Delta) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub<Time> for Time {
    type Output = Delta;

    fn sub(self, rhs: Time) -> Self::Output {
        Delta::new(self.0 - rhs.0)
    }
}

impl AddAssign<Delta> for Time {
    fn add_assign(&mut self, rhs: Delta) {
        *self = Self(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_order() {
        assert!(Time::ZERO < Time::ONE);
        assert!(Time::ONE < Time::INFINITY);
        assert_eq!(Time::new(0.5).max(Time::new(0.25)), Time::new(0.5));
    }

    #[test]
    fn arithmetic() {
        let mut t = Time::ONE + Delta::new(0.5);
        assert_eq!(t, Time::new(1.5));
        t += Delta::ONE;
        assert_eq!(t - Time::ONE, Delta::new(1.5));
        assert!(!(Time::ZERO + Delta::INFINITY).into_f64().is_finite());
    }
}
