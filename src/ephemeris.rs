//! GPS LNAV ephemeris: subframe word decoding and per-satellite assembly.
//!
//! Each satellite broadcasts its ephemeris over three subframes. They reach
//! us as three separate records (start / continue / end) whose payloads carry
//! eight 24-bit parameter words each. A [PendingEphemeris] gathers the three
//! decoded halves, and [PendingEphemeris::validate] releases a complete
//! [EphemerisRecord] once all of them are present.

use hifitime::prelude::{Epoch, TimeScale};

use gnss_rs::prelude::{Constellation, SV};

use serde::Serialize;

use crate::{
    codec::{bits, le_uint, scaled, scaled_unsigned, semicircles, signed},
    errors::Error,
    ubx::min_len,
};

/// L2 channel code indication, subframe 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum L2Code {
    Reserved,
    PCode,
    CaCode,
    Unknown,
}

impl From<u32> for L2Code {
    fn from(raw: u32) -> Self {
        match raw {
            0b00 => Self::Reserved,
            0b01 => Self::PCode,
            0b10 => Self::CaCode,
            _ => Self::Unknown,
        }
    }
}

/// SV health word, subframe 1. The MSB summarizes the navigation data
/// status, the remaining five bits carry the signal component code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SvHealth {
    Ok,
    /// Some or all navigation data is bad. Carries the 6-bit health code.
    Faulted(u8),
}

impl From<u32> for SvHealth {
    fn from(raw: u32) -> Self {
        if raw & 0x20 == 0 {
            Self::Ok
        } else {
            Self::Faulted(raw as u8)
        }
    }
}

/// Curve fit interval flag, subframe 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitInterval {
    FourHours,
    BeyondFourHours,
}

impl From<u32> for FitInterval {
    fn from(raw: u32) -> Self {
        if raw == 0 {
            Self::FourHours
        } else {
            Self::BeyondFourHours
        }
    }
}

/// URA index to nominal accuracy in meters. Indices 15 and above mean the
/// satellite advertises no accuracy at all.
pub fn ura_meters(index: u32) -> Option<f64> {
    match index {
        1 => Some(2.8),
        3 => Some(5.7),
        5 => Some(11.3),
        i if i <= 6 => Some(2.0f64.powf(1.0 + i as f64 / 2.0)),
        i if i < 15 => Some(2.0f64.powi(i as i32 - 2)),
        _ => None,
    }
}

/// Subframe 1: clock correction polynomial and data set identification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockTerms {
    /// Transmission week number, modulo 1024.
    pub week: u32,
    /// Codes on the L2 channel.
    pub l2_code: L2Code,
    /// User range accuracy index.
    pub ura_index: u32,
    /// SV health summary.
    pub health: SvHealth,
    /// Issue of data, clock (10 bits).
    pub iodc: u16,
    /// Group delay differential [s].
    pub tgd: f64,
    /// Clock data reference time of week [s].
    pub toc: f64,
    /// Clock drift rate [s/s²].
    pub af2: f64,
    /// Clock drift [s/s].
    pub af1: f64,
    /// Clock bias [s].
    pub af0: f64,
}

/// Subframe 2: orbit shape terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitTerms {
    /// Issue of data, ephemeris.
    pub iode: u8,
    /// Sine correction to orbit radius [m].
    pub crs: f64,
    /// Mean motion difference [rad/s].
    pub deltan: f64,
    /// Mean anomaly at reference time [rad].
    pub m0: f64,
    /// Cosine correction to argument of latitude [rad].
    pub cuc: f64,
    /// Eccentricity.
    pub e: f64,
    /// Sine correction to argument of latitude [rad].
    pub cus: f64,
    /// Square root of semi-major axis [m^1/2].
    pub sqrta: f64,
    /// Ephemeris reference time of week [s].
    pub toe: f64,
    /// Curve fit interval flag.
    pub fit_interval: FitInterval,
    /// Age of data offset [s].
    pub aodo: u32,
}

/// Subframe 3: orbital plane orientation terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneTerms {
    /// Cosine correction to inclination [rad].
    pub cic: f64,
    /// Longitude of ascending node at weekly epoch [rad].
    pub omega0: f64,
    /// Sine correction to inclination [rad].
    pub cis: f64,
    /// Inclination at reference time [rad].
    pub i0: f64,
    /// Cosine correction to orbit radius [m].
    pub crc: f64,
    /// Argument of perigee [rad].
    pub omega: f64,
    /// Rate of right ascension [rad/s].
    pub omegadot: f64,
    /// Rate of inclination [rad/s].
    pub idot: f64,
    /// Issue of data, ephemeris.
    pub iode: u8,
}

/// Complete broadcast ephemeris for one satellite, one data set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EphemerisRecord {
    pub sv: SV,
    pub clock: ClockTerms,
    pub orbit: OrbitTerms,
    pub plane: PlaneTerms,
}

impl EphemerisRecord {
    /// Nominal accuracy in meters, None when the SV advertises none.
    pub fn accuracy_meters(&self) -> Option<f64> {
        ura_meters(self.clock.ura_index)
    }

    /// Clock data reference time as an [Epoch], GPST.
    pub fn toc_epoch(&self) -> Epoch {
        Epoch::from_time_of_week(self.clock.week, (self.clock.toc * 1.0E9) as u64, TimeScale::GPST)
    }

    /// Ephemeris reference time as an [Epoch], GPST.
    pub fn toe_epoch(&self) -> Epoch {
        Epoch::from_time_of_week(self.clock.week, (self.orbit.toe * 1.0E9) as u64, TimeScale::GPST)
    }
}

/// One satellite's subframes gathered so far. The set only releases a
/// record once all three subframes of the cycle have been latched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingEphemeris {
    pub clock: Option<ClockTerms>,
    pub orbit: Option<OrbitTerms>,
    pub plane: Option<PlaneTerms>,
}

impl PendingEphemeris {
    /// Releases the [EphemerisRecord] if the triple is complete.
    pub fn validate(&self, sv: SV) -> Option<EphemerisRecord> {
        let clock = self.clock?;
        let orbit = self.orbit?;
        let plane = self.plane?;

        if orbit.iode != plane.iode || orbit.iode as u16 != clock.iodc & 0xFF {
            log::warn!(
                "{} - issue of data mismatch (iodc {}, iode {}/{})",
                sv,
                clock.iodc,
                orbit.iode,
                plane.iode,
            );
        }

        Some(EphemerisRecord {
            sv,
            clock,
            orbit,
            plane,
        })
    }
}

/// Splits an ephemeris record line into its satellite and the eight
/// 24-bit parameter words (each stored as a 4-byte little-endian group,
/// upper byte unused).
pub fn decode_words(line: &str) -> Result<(SV, [u32; 8]), Error> {
    if line.len() < min_len::EPHEMERIS {
        return Err(Error::MalformedField {
            wanted: min_len::EPHEMERIS,
            found: line.len(),
        });
    }

    let svid = le_uint(line, 14, 4)?;
    let sv = SV::new(Constellation::GPS, svid as u8);

    let mut words = [0u32; 8];

    for (k, word) in words.iter_mut().enumerate() {
        *word = le_uint(line, 22 + 8 * k, 3)? as u32;
    }

    Ok((sv, words))
}

/// Decodes subframe 1. Returns None when the group delay is exactly zero,
/// the receiver's data-not-yet-valid convention: such a cycle never emits.
pub fn decode_subframe1(words: &[u32; 8]) -> Option<ClockTerms> {
    let d0 = words[0];
    let week = bits(d0, 0, 10);
    let l2_code = L2Code::from(bits(d0, 10, 2));
    let ura_index = bits(d0, 12, 4);
    let health = SvHealth::from(bits(d0, 16, 6));
    let iodc_msb = bits(d0, 22, 2) as u16;

    let tgd_raw = signed(bits(words[4], 16, 8) as u64, 8);

    if tgd_raw == 0 {
        return None;
    }

    let d5 = words[5];
    let iodc = (iodc_msb << 8) | bits(d5, 0, 8) as u16;
    let toc = scaled_unsigned(bits(d5, 8, 16) as u64, 4);

    let d6 = words[6];
    let af2 = scaled(signed(bits(d6, 0, 8) as u64, 8), -55);
    let af1 = scaled(signed(bits(d6, 8, 16) as u64, 16), -43);

    let af0 = scaled(signed(bits(words[7], 0, 22) as u64, 22), -31);

    Some(ClockTerms {
        week,
        l2_code,
        ura_index,
        health,
        iodc,
        tgd: scaled(tgd_raw, -31),
        toc,
        af2,
        af1,
        af0,
    })
}

/// Decodes subframe 2.
pub fn decode_subframe2(words: &[u32; 8]) -> OrbitTerms {
    let d0 = words[0];
    let iode = bits(d0, 0, 8) as u8;
    let crs = scaled(signed(bits(d0, 8, 16) as u64, 16), -5);

    let d1 = words[1];
    let deltan = semicircles(signed(bits(d1, 0, 16) as u64, 16), -43);
    let m0_msb = bits(d1, 16, 8) as u64;

    // 32-bit terms span a word boundary: 8 MSBs then a full 24-bit word
    let m0 = semicircles(signed((m0_msb << 24) | words[2] as u64, 32), -31);

    let d3 = words[3];
    let cuc = scaled(signed(bits(d3, 0, 16) as u64, 16), -29);
    let e_msb = bits(d3, 16, 8) as u64;

    let e = scaled_unsigned((e_msb << 24) | words[4] as u64, -33);

    let d5 = words[5];
    let cus = scaled(signed(bits(d5, 0, 16) as u64, 16), -29);
    let sqrta_msb = bits(d5, 16, 8) as u64;

    let sqrta = scaled_unsigned((sqrta_msb << 24) | words[6] as u64, -19);

    let d7 = words[7];
    let toe = scaled_unsigned(bits(d7, 0, 16) as u64, 4);
    let fit_interval = FitInterval::from(bits(d7, 17, 1));
    let aodo = bits(d7, 18, 5) * 900;

    OrbitTerms {
        iode,
        crs,
        deltan,
        m0,
        cuc,
        e,
        cus,
        sqrta,
        toe,
        fit_interval,
        aodo,
    }
}

/// Decodes subframe 3.
pub fn decode_subframe3(words: &[u32; 8]) -> PlaneTerms {
    let d0 = words[0];
    let cic = scaled(signed(bits(d0, 0, 16) as u64, 16), -29);
    let omega0_msb = bits(d0, 16, 8) as u64;

    let omega0 = semicircles(signed((omega0_msb << 24) | words[1] as u64, 32), -31);

    let d2 = words[2];
    let cis = scaled(signed(bits(d2, 0, 16) as u64, 16), -29);
    let i0_msb = bits(d2, 16, 8) as u64;

    let i0 = semicircles(signed((i0_msb << 24) | words[3] as u64, 32), -31);

    let d4 = words[4];
    let crc = scaled(signed(bits(d4, 0, 16) as u64, 16), -5);
    let omega_msb = bits(d4, 16, 8) as u64;

    let omega = semicircles(signed((omega_msb << 24) | words[5] as u64, 32), -31);

    let omegadot = semicircles(signed(words[6] as u64, 24), -43);

    let d7 = words[7];
    let iode = bits(d7, 0, 8) as u8;
    let idot = semicircles(signed(bits(d7, 8, 14) as u64, 14), -43);

    PlaneTerms {
        cic,
        omega0,
        cis,
        i0,
        crc,
        omega,
        omegadot,
        idot,
        iode,
    }
}
