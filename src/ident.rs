macro_rules! identifier {
    ($name: ident) => {
        #[derive(
            Debug,
            Default,
            Copy,
            Clone,
            PartialOrd,
            Ord,
            PartialEq,
            Eq,
            Hash,
            derive_more::Display,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(usize);

        impl $name {
            pub const ZERO: $name = Self::new(0);

            pub const fn new(value: usize) -> Self {
                Self(value)
            }

            pub const fn into_usize(self) -> usize {
                self.0
            }
        }
    };
}

identifier!(StationId);
