//! AID-HUI decoding: Klobuchar ionospheric model coefficients and the GPS
//! to UTC correlation parameters, one record per poll.

use hifitime::prelude::{Epoch, TimeScale};

use serde::Serialize;

use crate::{
    codec::{le_f32, le_f64, le_uint},
    errors::Error,
    ubx::min_len,
};

/// Klobuchar / UTC parameter set. The coefficients travel as IEEE-754
/// floats on the wire, not as scaled integers like the LNAV subframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IonosphereRecord {
    /// Health bitmask, one bit per GPS SV (1-32), set when healthy.
    pub health_mask: u32,
    /// UTC correlation parameter A0 [s].
    pub utc_a0: f64,
    /// UTC correlation parameter A1 [s/s].
    pub utc_a1: f64,
    /// Reference time of week [s].
    pub utc_tow: u32,
    /// Reference week number.
    pub utc_week: u16,
    /// Current leap second count [s].
    pub utc_ls: u16,
    /// Week number of the next leap second event.
    pub utc_week_f: u16,
    /// Day of week of the next leap second event.
    pub utc_dn: u16,
    /// Leap second count after the event [s].
    pub utc_lsf: u16,
    /// Klobuchar alpha terms [s, s/sc, s/sc², s/sc³].
    pub alpha: [f32; 4],
    /// Klobuchar beta terms [s, s/sc, s/sc², s/sc³].
    pub beta: [f32; 4],
}

impl IonosphereRecord {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::IONOSPHERE {
            return Err(Error::MalformedField {
                wanted: min_len::IONOSPHERE,
                found: line.len(),
            });
        }

        let health_mask = le_uint(line, 12, 4)? as u32;
        let utc_a0 = le_f64(line, 20)?;
        let utc_a1 = le_f64(line, 36)?;
        let utc_tow = le_uint(line, 52, 4)? as u32;
        let utc_week = le_uint(line, 60, 2)? as u16;
        let utc_ls = le_uint(line, 64, 2)? as u16;
        let utc_week_f = le_uint(line, 68, 2)? as u16;
        let utc_dn = le_uint(line, 72, 2)? as u16;
        let utc_lsf = le_uint(line, 76, 2)? as u16;

        let mut alpha = [0.0f32; 4];
        let mut beta = [0.0f32; 4];

        for k in 0..4 {
            alpha[k] = le_f32(line, 84 + 8 * k)?;
            beta[k] = le_f32(line, 116 + 8 * k)?;
        }

        Ok(Self {
            health_mask,
            utc_a0,
            utc_a1,
            utc_tow,
            utc_week,
            utc_ls,
            utc_week_f,
            utc_dn,
            utc_lsf,
            alpha,
            beta,
        })
    }

    /// True when this SV is marked healthy in the almanac bitmask.
    pub fn sv_healthy(&self, prn: u8) -> bool {
        (1..=32).contains(&prn) && self.health_mask & (1 << (prn - 1)) != 0
    }

    /// Reference time as an [Epoch], GPST.
    pub fn reference_epoch(&self) -> Epoch {
        Epoch::from_time_of_week(
            self.utc_week as u32,
            self.utc_tow as u64 * 1_000_000_000,
            TimeScale::GPST,
        )
    }
}
