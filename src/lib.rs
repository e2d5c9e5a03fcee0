#![doc = include_str!("../README.md")]

/*
 * UBX2FIX: U-Blox navigation stream decoder and ephemeris position solver.
 * Shipped under Mozilla Public V2 license.
 */

pub mod codec;
pub mod decoder;
pub mod ephemeris;
pub mod errors;
pub mod frame;
pub mod ionosphere;
pub mod orbit;
pub mod records;
pub mod ubx;

pub use crate::{
    decoder::{Collection, Decoder, Record},
    ephemeris::EphemerisRecord,
    errors::Error,
    ionosphere::IonosphereRecord,
    orbit::{resolve, PositionFix},
};

pub mod prelude {
    pub use crate::{
        decoder::{Collection, Decoder, Record},
        ephemeris::{EphemerisRecord, FitInterval, L2Code, SvHealth},
        errors::Error,
        ionosphere::IonosphereRecord,
        orbit::{resolve, PositionFix},
        records::{
            ClockSolution, DilutionOfPrecision, NavConfig, RawMeasurement, Rawxm, SvSight,
            SvVisibility,
        },
    };

    pub use gnss_rs::prelude::{Constellation, SV};
    pub use hifitime::prelude::{Epoch, TimeScale};
}
