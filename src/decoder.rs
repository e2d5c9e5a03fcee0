//! Stream decoding: dispatches each capture line to its record decoder,
//! drives the per-satellite subframe state, and accumulates typed tables.

use std::collections::HashMap;

use itertools::Itertools;

use log::{debug, trace, warn};

use gnss_rs::prelude::SV;

use serde::Serialize;

use crate::{
    ephemeris::{
        decode_subframe1, decode_subframe2, decode_subframe3, decode_words, EphemerisRecord,
        PendingEphemeris,
    },
    errors::Error,
    frame::{classify, RecordClass, SubframePosition},
    ionosphere::IonosphereRecord,
    records::{ClockSolution, DilutionOfPrecision, NavConfig, RawMeasurement, SvVisibility},
};

/// One fully decoded record, any class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Record {
    Ephemeris(EphemerisRecord),
    Ionosphere(IonosphereRecord),
    RawMeasurement(RawMeasurement),
    NavConfig(NavConfig),
    Dop(DilutionOfPrecision),
    Clock(ClockSolution),
    Visibility(SvVisibility),
}

/// Line-by-line capture decoder.
///
/// Holds the per-satellite [PendingEphemeris] state between lines. A
/// decoding error never disturbs that state: the offending line is
/// dropped and the stream continues.
#[derive(Debug, Default)]
pub struct Decoder {
    pending: HashMap<SV, PendingEphemeris>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of satellites with an open subframe set.
    pub fn pending_satellites(&self) -> usize {
        self.pending.len()
    }

    /// Decodes one capture line. Returns Ok(None) for unrecognized
    /// content and for ephemeris subframes that do not yet complete a
    /// satellite's triple.
    pub fn decode(&mut self, line: &str) -> Result<Option<Record>, Error> {
        let line = line.trim();

        match classify(line) {
            None => {
                trace!("skipped: {}", line);
                Ok(None)
            },
            Some(RecordClass::Ephemeris(position)) => self.latch_subframe(line, position),
            Some(RecordClass::Ionosphere) => {
                let record = IonosphereRecord::decode(line)?;
                debug!("new ionosphere record, tow {}", record.utc_tow);
                Ok(Some(Record::Ionosphere(record)))
            },
            Some(RecordClass::RawMeasurement) => {
                let record = RawMeasurement::decode(line)?;
                debug!(
                    "new raw measurement, tow {} ms ({} sv)",
                    record.rcv_tow,
                    record.measurements.len()
                );
                Ok(Some(Record::RawMeasurement(record)))
            },
            Some(RecordClass::NavConfig) => {
                Ok(Some(Record::NavConfig(NavConfig::decode(line)?)))
            },
            Some(RecordClass::Dop) => Ok(Some(Record::Dop(DilutionOfPrecision::decode(line)?))),
            Some(RecordClass::Clock) => Ok(Some(Record::Clock(ClockSolution::decode(line)?))),
            Some(RecordClass::SvVisibility) => {
                Ok(Some(Record::Visibility(SvVisibility::decode(line)?)))
            },
        }
    }

    fn latch_subframe(
        &mut self,
        line: &str,
        position: SubframePosition,
    ) -> Result<Option<Record>, Error> {
        let (sv, words) = decode_words(line)?;

        match position {
            SubframePosition::Start => {
                if self.pending.remove(&sv).is_some() {
                    warn!("{} - incomplete subframe set dropped", sv);
                }

                match decode_subframe1(&words) {
                    Some(clock) => {
                        debug!("{} - subframe cycle opened (iodc {})", sv, clock.iodc);

                        self.pending.insert(
                            sv,
                            PendingEphemeris {
                                clock: Some(clock),
                                ..Default::default()
                            },
                        );
                    },
                    None => {
                        // data not yet valid for this cycle
                        debug!("{} - null group delay, cycle discarded", sv);
                    },
                }

                Ok(None)
            },
            SubframePosition::Continue => {
                match self.pending.get_mut(&sv) {
                    Some(pending) => {
                        pending.orbit = Some(decode_subframe2(&words));
                    },
                    None => {
                        debug!("{} - subframe 2 without an open cycle", sv);
                    },
                }

                Ok(None)
            },
            SubframePosition::End => match self.pending.remove(&sv) {
                Some(mut pending) => {
                    pending.plane = Some(decode_subframe3(&words));

                    match pending.validate(sv) {
                        Some(record) => {
                            debug!("{} - ephemeris complete (toe {})", sv, record.orbit.toe);
                            Ok(Some(Record::Ephemeris(record)))
                        },
                        None => {
                            debug!("{} - incomplete subframe set, not released", sv);
                            Ok(None)
                        },
                    }
                },
                None => {
                    debug!("{} - subframe 3 without an open cycle", sv);
                    Ok(None)
                },
            },
        }
    }
}

/// Ephemeris table entry: the n-th complete record decoded from the
/// stream, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EphemerisEntry {
    pub sequence: u32,
    pub record: EphemerisRecord,
}

/// Ionosphere table entry, in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IonosphereEntry {
    pub sequence: u32,
    pub record: IonosphereRecord,
}

/// Typed output tables for one decoded capture.
///
/// Sequence counters run per record class and follow arrival order, so a
/// replay of the same capture produces identical tables.
#[derive(Debug, Default, Clone, Serialize)]
pub struct Collection {
    pub ephemerides: Vec<EphemerisEntry>,
    pub ionospheres: Vec<IonosphereEntry>,
    pub measurements: Vec<RawMeasurement>,
    pub nav_configs: Vec<NavConfig>,
    pub dops: Vec<DilutionOfPrecision>,
    pub clocks: Vec<ClockSolution>,
    pub visibilities: Vec<SvVisibility>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files one decoded record into its table.
    pub fn latch(&mut self, record: Record) {
        match record {
            Record::Ephemeris(record) => {
                let sequence = self.ephemerides.len() as u32;
                self.ephemerides.push(EphemerisEntry { sequence, record });
            },
            Record::Ionosphere(record) => {
                let sequence = self.ionospheres.len() as u32;
                self.ionospheres.push(IonosphereEntry { sequence, record });
            },
            Record::RawMeasurement(record) => self.measurements.push(record),
            Record::NavConfig(record) => self.nav_configs.push(record),
            Record::Dop(record) => self.dops.push(record),
            Record::Clock(record) => self.clocks.push(record),
            Record::Visibility(record) => self.visibilities.push(record),
        }
    }

    /// Ephemeris record at `sequence` for `sv`, if that satellite
    /// completed a cycle there.
    pub fn ephemeris(&self, sequence: u32, sv: SV) -> Option<&EphemerisRecord> {
        self.ephemerides
            .iter()
            .filter(|entry| entry.sequence == sequence && entry.record.sv == sv)
            .map(|entry| &entry.record)
            .next()
    }

    /// Satellites with a complete ephemeris, sorted, duplicates removed.
    pub fn satellites(&self) -> Vec<SV> {
        self.ephemerides
            .iter()
            .map(|entry| entry.record.sv)
            .unique()
            .sorted()
            .collect()
    }

    /// Reference time of week to propagate the ephemeris at `sequence`:
    /// the matching ionosphere record's, falling back to the last one
    /// decoded.
    pub fn reference_tow(&self, sequence: u32) -> Option<f64> {
        self.ionospheres
            .iter()
            .find(|entry| entry.sequence == sequence)
            .or_else(|| self.ionospheres.last())
            .map(|entry| entry.record.utc_tow as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.ephemerides.is_empty()
            && self.ionospheres.is_empty()
            && self.measurements.is_empty()
            && self.nav_configs.is_empty()
            && self.dops.is_empty()
            && self.clocks.is_empty()
            && self.visibilities.is_empty()
    }
}
