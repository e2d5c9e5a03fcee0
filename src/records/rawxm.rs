//! RXM-RAW: raw carrier phase, pseudo range and doppler measurements.

use gnss_rs::prelude::{Constellation, SV};

use serde::Serialize;

use crate::{
    codec::{le_f32, le_f64, le_uint, signed},
    errors::Error,
    ubx::min_len,
};

/// One satellite's raw measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rawxm {
    pub sv: SV,
    /// Carrier phase [L1 cycles].
    pub cp: f64,
    /// Pseudo range [m].
    pub pr: f64,
    /// Doppler shift, positive for approaching satellites [Hz].
    pub dop: f32,
    /// Measurement quality indicator. 4 and above means PR+DO are valid,
    /// 5 and above PR+DO+CP, below 6 carrier lock was likely lost.
    pub quality: i8,
    /// Carrier to noise density ratio [dB-Hz].
    pub cno: i8,
    /// Loss of lock indicator.
    pub lli: u8,
}

impl std::fmt::Display for Rawxm {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} cp={:.3} pr={:.3} dop={:.3} cno={}",
            self.sv, self.cp, self.pr, self.dop, self.cno
        )
    }
}

/// One RXM-RAW epoch: receiver time and the per-satellite measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMeasurement {
    /// Measurement time of week, receiver local time [ms].
    pub rcv_tow: u32,
    /// Measurement week number, receiver local time.
    pub week: u16,
    pub measurements: Vec<Rawxm>,
}

impl RawMeasurement {
    pub fn decode(line: &str) -> Result<Self, Error> {
        if line.len() < min_len::RAW_HEADER {
            return Err(Error::MalformedField {
                wanted: min_len::RAW_HEADER,
                found: line.len(),
            });
        }

        let rcv_tow = le_uint(line, 12, 4)? as u32;
        let week = le_uint(line, 20, 2)? as u16;
        let numsv = le_uint(line, 24, 1)? as usize;

        let mut measurements = Vec::with_capacity(numsv);

        for k in 0..numsv {
            let base = min_len::RAW_HEADER + min_len::RAW_PER_SV * k;

            let cp = le_f64(line, base)?;
            let pr = le_f64(line, base + 16)?;
            let dop = le_f32(line, base + 32)?;
            let prn = le_uint(line, base + 40, 1)? as u8;
            let quality = signed(le_uint(line, base + 42, 1)?, 8) as i8;
            let cno = signed(le_uint(line, base + 44, 1)?, 8) as i8;
            let lli = le_uint(line, base + 46, 1)? as u8;

            measurements.push(Rawxm {
                sv: SV::new(Constellation::GPS, prn),
                cp,
                pr,
                dop,
                quality,
                cno,
                lli,
            });
        }

        Ok(Self {
            rcv_tow,
            week,
            measurements,
        })
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    fn push_le(line: &mut String, bytes: &[u8]) {
        for byte in bytes {
            line.push_str(&format!("{:02x}", byte));
        }
    }

    /// Builds one RXM-RAW line carrying two satellites.
    pub fn record_line() -> String {
        let mut line = String::from("b5620210");
        line.push_str("3000"); // length, unused by the decoder

        push_le(&mut line, &417935000u32.to_le_bytes()); // rcvtow ms
        push_le(&mut line, &1324u16.to_le_bytes());
        line.push_str("02"); // numsv
        line.push_str("00"); // reserved

        for (prn, pr) in [(7u8, 21_119_284.35f64), (11, 23_947_102.11)] {
            push_le(&mut line, &(118_327_551.234f64).to_le_bytes()); // cp
            push_le(&mut line, &pr.to_le_bytes());
            push_le(&mut line, &(-1821.5f32).to_le_bytes()); // doppler
            push_le(&mut line, &[prn, 6, 45, 0]); // sv, quality, cno, lli
        }

        line
    }

    #[test]
    fn decoding() {
        let epoch = RawMeasurement::decode(&record_line()).unwrap();

        assert_eq!(epoch.rcv_tow, 417935000);
        assert_eq!(epoch.week, 1324);
        assert_eq!(epoch.measurements.len(), 2);

        let first = &epoch.measurements[0];
        assert_eq!(first.sv, SV::new(Constellation::GPS, 7));
        assert_eq!(first.cp, 118_327_551.234);
        assert_eq!(first.pr, 21_119_284.35);
        assert_eq!(first.dop, -1821.5);
        assert_eq!(first.quality, 6);
        assert_eq!(first.cno, 45);
        assert_eq!(first.lli, 0);

        assert_eq!(epoch.measurements[1].pr, 23_947_102.11);
    }

    #[test]
    fn truncated_satellite_block() {
        let line = record_line();
        let short = &line[..line.len() - 20];

        assert!(matches!(
            RawMeasurement::decode(short),
            Err(Error::MalformedField { .. }),
        ));
    }
}
