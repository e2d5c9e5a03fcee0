use thiserror::Error;

/// Decoding and propagation failures.
///
/// None of these is fatal to a capture decode: a malformed record is
/// discarded by the caller and the stream continues. Unrecognized record
/// prefixes are not errors at all, they are silently skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The record is too short for the field being extracted.
    /// The framing upstream was wrong: discard this record.
    #[error("malformed field: record holds {found} hex digits, expected at least {wanted}")]
    MalformedField { wanted: usize, found: usize },

    /// The record contains non hex-digit characters where a field was expected.
    #[error("malformed field: invalid hex digits at offset {offset}")]
    InvalidHex { offset: usize },

    /// Physically impossible orbital elements, no position can be computed.
    #[error("invalid ephemeris: {0}")]
    InvalidEphemeris(&'static str),

    /// Kepler iteration failed to converge within the iteration cap.
    #[error("Kepler solver did not converge within {0} iterations")]
    DivergentSolution(usize),
}
