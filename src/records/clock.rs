//! NAV-CLOCK: receiver clock solution.

use serde::Serialize;

use crate::{
    codec::{le_uint, signed},
    errors::Error,
    ubx::min_len,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockSolution {
    /// GPS time of week of the navigation epoch [ms].
    pub itow: u32,
    /// Clock bias [ns].
    pub bias_ns: i32,
    /// Clock drift [ns/s].
    pub drift_ns: i32,
    /// Time accuracy estimate [ns].
    pub accuracy_ns: u32,
}

impl ClockSolution {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::CLOCK {
            return Err(Error::MalformedField {
                wanted: min_len::CLOCK,
                found: line.len(),
            });
        }

        Ok(Self {
            itow: le_uint(line, 12, 4)? as u32,
            bias_ns: signed(le_uint(line, 20, 4)?, 32) as i32,
            drift_ns: signed(le_uint(line, 28, 4)?, 32) as i32,
            accuracy_ns: le_uint(line, 36, 4)? as u32,
        })
    }
}
