//! Ancillary record decoders: raw measurements, receiver configuration,
//! dilution of precision, clock solution and satellite visibility.

mod clock;
mod dop;
mod nav5;
mod rawxm;
mod svsi;

pub use clock::ClockSolution;
pub use dop::DilutionOfPrecision;
pub use nav5::NavConfig;
pub use rawxm::{RawMeasurement, Rawxm};
pub use svsi::{SvSight, SvVisibility};
