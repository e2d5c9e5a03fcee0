//! RXM-SVSI: satellite status in view.

use gnss_rs::prelude::{Constellation, SV};

use serde::Serialize;

use crate::{
    codec::{le_uint, signed},
    errors::Error,
    ubx::min_len,
};

/// One sighted satellite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SvSight {
    pub sv: SV,
    /// Azimuth [deg].
    pub azimuth: i16,
    /// Elevation [deg].
    pub elevation: i8,
    /// Age of the almanac (low nibble) and ephemeris (high nibble).
    pub age: u8,
}

/// Satellite visibility status for one epoch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvVisibility {
    /// GPS time of week [ms].
    pub itow: u32,
    pub week: u16,
    /// Number of visible satellites.
    pub num_visible: u8,
    pub sights: Vec<SvSight>,
}

impl SvVisibility {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::SV_VISIBILITY_HEADER {
            return Err(Error::MalformedField {
                wanted: min_len::SV_VISIBILITY_HEADER,
                found: line.len(),
            });
        }

        let itow = le_uint(line, 12, 4)? as u32;
        let week = le_uint(line, 20, 2)? as u16;
        let num_visible = le_uint(line, 24, 1)? as u8;
        let numsv = le_uint(line, 26, 1)? as usize;

        let mut sights = Vec::with_capacity(numsv);

        for k in 0..numsv {
            let base = min_len::SV_VISIBILITY_HEADER + min_len::SV_VISIBILITY_PER_SV * k;

            let prn = le_uint(line, base, 1)? as u8;
            let azimuth = signed(le_uint(line, base + 4, 2)?, 16) as i16;
            let elevation = signed(le_uint(line, base + 8, 1)?, 8) as i8;
            let age = le_uint(line, base + 10, 1)? as u8;

            sights.push(SvSight {
                sv: SV::new(Constellation::GPS, prn),
                azimuth,
                elevation,
                age,
            });
        }

        Ok(Self {
            itow,
            week,
            num_visible,
            sights,
        })
    }
}
