//! NAV-DOP: dilution of precision.

use serde::Serialize;

use crate::{codec::le_uint, errors::Error, ubx::min_len};

/// Dilution of precision figures, all dimensionless (scaled by 0.01
/// on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DilutionOfPrecision {
    /// GPS time of week [ms].
    pub itow: u32,
    pub gdop: f64,
    pub pdop: f64,
    pub tdop: f64,
    pub vdop: f64,
    pub hdop: f64,
    pub ndop: f64,
    pub edop: f64,
}

impl DilutionOfPrecision {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::DOP {
            return Err(Error::MalformedField {
                wanted: min_len::DOP,
                found: line.len(),
            });
        }

        let itow = le_uint(line, 12, 4)? as u32;

        let mut dops = [0.0f64; 7];
        for (k, dop) in dops.iter_mut().enumerate() {
            *dop = le_uint(line, 20 + 4 * k, 2)? as f64 / 100.0;
        }

        Ok(Self {
            itow,
            gdop: dops[0],
            pdop: dops[1],
            tdop: dops[2],
            vdop: dops[3],
            hdop: dops[4],
            ndop: dops[5],
            edop: dops[6],
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// Builds one NAV-DOP line.
    pub fn record_line() -> String {
        let mut line = String::from("b56201041200");

        for value in [417935000u32] {
            for byte in value.to_le_bytes() {
                line.push_str(&format!("{:02x}", byte));
            }
        }

        for value in [182u16, 161, 85, 123, 104, 89, 54] {
            for byte in value.to_le_bytes() {
                line.push_str(&format!("{:02x}", byte));
            }
        }

        line
    }

    #[test]
    fn decoding() {
        let dop = DilutionOfPrecision::decode(&record_line()).unwrap();

        assert_eq!(dop.itow, 417935000);
        assert_eq!(dop.gdop, 1.82);
        assert_eq!(dop.pdop, 1.61);
        assert_eq!(dop.tdop, 0.85);
        assert_eq!(dop.vdop, 1.23);
        assert_eq!(dop.hdop, 1.04);
        assert_eq!(dop.ndop, 0.89);
        assert_eq!(dop.edop, 0.54);
    }
}
