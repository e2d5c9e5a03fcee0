//! CFG-NAV5: navigation engine settings.

use serde::Serialize;

use crate::{
    codec::{le_uint, signed},
    errors::Error,
    ubx::min_len,
};

/// Navigation engine configuration as reported by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavConfig {
    /// Dynamic platform model.
    pub dyn_model: u8,
    /// Position fixing mode.
    pub fix_mode: u8,
    /// Fixed altitude for 2D mode [m].
    pub fixed_alt: f64,
    /// Fixed altitude variance for 2D mode [m²].
    pub fixed_alt_var: f64,
    /// Minimum SV elevation for a fix [deg].
    pub min_elev: i8,
    /// Position DOP mask.
    pub pdop: f64,
    /// Time DOP mask.
    pub tdop: f64,
    /// Position accuracy mask [m].
    pub pacc: u16,
    /// Time accuracy mask [m].
    pub tacc: u16,
    /// Static hold threshold [cm/s].
    pub static_hold_thresh: u8,
    /// DGPS timeout [s].
    pub dgps_timeout: u8,
    /// Number of satellites required above the C/N0 threshold.
    pub cno_thresh_num_sv: u8,
    /// C/N0 threshold [dB-Hz].
    pub cno_thresh: u8,
}

impl NavConfig {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::NAV_CONFIG {
            return Err(Error::MalformedField {
                wanted: min_len::NAV_CONFIG,
                found: line.len(),
            });
        }

        Ok(Self {
            dyn_model: le_uint(line, 16, 1)? as u8,
            fix_mode: le_uint(line, 18, 1)? as u8,
            fixed_alt: signed(le_uint(line, 20, 4)?, 32) as f64 * 0.01,
            fixed_alt_var: le_uint(line, 28, 4)? as f64 * 0.0001,
            min_elev: signed(le_uint(line, 36, 1)?, 8) as i8,
            pdop: le_uint(line, 40, 2)? as f64 * 0.1,
            tdop: le_uint(line, 44, 2)? as f64 * 0.1,
            pacc: le_uint(line, 48, 2)? as u16,
            tacc: le_uint(line, 52, 2)? as u16,
            static_hold_thresh: le_uint(line, 56, 1)? as u8,
            dgps_timeout: le_uint(line, 58, 1)? as u8,
            cno_thresh_num_sv: le_uint(line, 60, 1)? as u8,
            cno_thresh: le_uint(line, 62, 1)? as u8,
        })
    }
}
