//! Record framing: classify a raw hex line by its UBX class/id prefix.

use crate::ubx::{self, prefix};

/// Position of an ephemeris record within a satellite's subframe cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubframePosition {
    /// Subframe 1: clock correction terms, opens a cycle.
    Start,
    /// Subframe 2: orbit shape terms.
    Continue,
    /// Subframe 3: orbital plane terms, closes a cycle.
    End,
}

/// Record class recognized on the wire. Anything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    Ionosphere,
    Ephemeris(SubframePosition),
    RawMeasurement,
    NavConfig,
    Dop,
    Clock,
    SvVisibility,
}

/// Classifies one hex line. Returns None for unrecognized prefixes,
/// empty lines and non-UBX content.
pub fn classify(line: &str) -> Option<RecordClass> {
    if !line.starts_with(ubx::SYNC) {
        return None;
    }

    if line.starts_with(prefix::EPHEMERIS) {
        let at = ubx::EPHEMERIS_MARKER_OFFSET;
        let marker = line.get(at..at + 2)?;

        let position = match marker {
            ubx::MARKER_START => SubframePosition::Start,
            ubx::MARKER_END => SubframePosition::End,
            _ => SubframePosition::Continue,
        };

        Some(RecordClass::Ephemeris(position))
    } else if line.starts_with(prefix::IONOSPHERE) {
        Some(RecordClass::Ionosphere)
    } else if line.starts_with(prefix::RAW_MEASUREMENT) {
        Some(RecordClass::RawMeasurement)
    } else if line.starts_with(prefix::NAV_CONFIG) {
        Some(RecordClass::NavConfig)
    } else if line.starts_with(prefix::DOP) {
        Some(RecordClass::Dop)
    } else if line.starts_with(prefix::CLOCK) {
        Some(RecordClass::Clock)
    } else if line.starts_with(prefix::SV_VISIBILITY) {
        Some(RecordClass::SvVisibility)
    } else {
        None
    }
}
