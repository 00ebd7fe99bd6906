pub mod driver;
pub mod routing;
pub mod time;
pub mod variate;

pub(crate) mod data;
pub(crate) mod entities;
pub(crate) mod ident;
pub(crate) mod queue;
pub(crate) mod simulation;

pub use data::{Report, StationStats, Summary};
pub use driver::{read_config, run, Config, Error, StationDesc};
pub use ident::StationId;
