//! UBX protocol constants: record prefixes as they appear in hex-line
//! captures, and the fixed receiver command frames (checksums precomputed).

/// UBX frame synchronization bytes, hex form.
pub const SYNC: &str = "b562";

/// Record prefixes, as hex-digit line prefixes (sync + class/id, and for
/// fixed-length records the length bytes too).
pub mod prefix {
    /// AID-HUI: ionosphere / UTC parameters, 72-byte payload.
    pub const IONOSPHERE: &str = "b5620b024800";

    /// AID-EPH: one ephemeris subframe group, 104-byte payload.
    pub const EPHEMERIS: &str = "b5620b316800";

    /// RXM-RAW: raw pseudo-range measurements, variable length.
    pub const RAW_MEASUREMENT: &str = "b5620210";

    /// CFG-NAV5: navigation engine settings, 36-byte payload.
    pub const NAV_CONFIG: &str = "b56206242400";

    /// NAV-DOP: dilution of precision, 18-byte payload.
    pub const DOP: &str = "b56201041200";

    /// NAV-CLOCK: receiver clock solution, variable length.
    pub const CLOCK: &str = "b5620122";

    /// RXM-SVSI: satellite status in view, variable length.
    pub const SV_VISIBILITY: &str = "b5620220";

    /// ACK-ACK response to a configuration frame.
    pub const ACK: &str = "b5620501";

    /// ACK-NAK response to a configuration frame.
    pub const NAK: &str = "b5620500";
}

/// Minimum hex-digit line lengths per record class.
pub mod min_len {
    pub const IONOSPHERE: usize = 148;
    pub const EPHEMERIS: usize = 86;
    pub const RAW_HEADER: usize = 28;
    pub const RAW_PER_SV: usize = 48;
    pub const NAV_CONFIG: usize = 64;
    pub const DOP: usize = 48;
    pub const CLOCK: usize = 44;
    pub const SV_VISIBILITY_HEADER: usize = 28;
    pub const SV_VISIBILITY_PER_SV: usize = 12;
}

/// Hex-digit offset of the subframe position marker in an ephemeris record.
pub const EPHEMERIS_MARKER_OFFSET: usize = 12;

/// Marker value opening a subframe cycle (subframe 1).
pub const MARKER_START: &str = "01";

/// Marker value closing a subframe cycle (subframe 3).
pub const MARKER_END: &str = "20";

/// Fixed receiver command frames. These are complete UBX frames including
/// sync and Fletcher checksum, ready to write to a device.
pub mod command {
    /// CFG-RST cold start: clear all stored navigation data.
    pub const COLD_RESET: &[u8] = &[
        0xB5, 0x62, 0x06, 0x04, 0x04, 0x00, 0xFF, 0xA1, 0x02, 0x00, 0xB0, 0x47,
    ];

    /// CFG-RST warm start: clear ephemerides only.
    pub const WARM_RESET: &[u8] = &[
        0xB5, 0x62, 0x06, 0x04, 0x04, 0x00, 0x01, 0x00, 0x02, 0x00, 0x11, 0x6C,
    ];

    /// CFG-RST hot start: keep all stored navigation data.
    pub const HOT_RESET: &[u8] = &[
        0xB5, 0x62, 0x06, 0x04, 0x04, 0x00, 0x00, 0x00, 0x02, 0x00, 0x10, 0x68,
    ];

    /// CFG-MSG: enable periodic AID-EPH output.
    pub const ENABLE_EPHEMERIS: &[u8] = &[
        0xB5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x0B, 0x31, 0x01, 0x47, 0xC3,
    ];

    /// CFG-MSG: enable periodic AID-HUI output.
    pub const ENABLE_IONOSPHERE: &[u8] = &[
        0xB5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x0B, 0x02, 0x01, 0x18, 0x65,
    ];

    /// CFG-MSG: enable periodic RXM-RAW output.
    pub const ENABLE_RAW: &[u8] = &[
        0xB5, 0x62, 0x06, 0x01, 0x03, 0x00, 0x02, 0x10, 0x01, 0x1D, 0x66,
    ];

    /// CFG-MSG: enable periodic NMEA GGA output.
    pub const ENABLE_GGA: &[u8] = &[
        0xB5, 0x62, 0x06, 0x01, 0x03, 0x00, 0xF0, 0x00, 0x01, 0xFB, 0x10,
    ];

    /// Poll one AID-EPH round (all satellites).
    pub const POLL_EPHEMERIS: &[u8] = &[0xB5, 0x62, 0x0B, 0x31, 0x00, 0x00, 0x3C, 0xBF];

    /// Poll AID-HUI.
    pub const POLL_IONOSPHERE: &[u8] = &[0xB5, 0x62, 0x0B, 0x02, 0x00, 0x00, 0x0D, 0x32];

    /// Poll RXM-RAW.
    pub const POLL_RAW: &[u8] = &[0xB5, 0x62, 0x02, 0x10, 0x00, 0x00, 0x12, 0x38];

    /// Poll CFG-NAV5, NAV-DOP and RXM-SVSI in one burst.
    pub const POLL_STATUS: &[u8] = &[
        0xB5, 0x62, 0x06, 0x24, 0x00, 0x00, 0x2A, 0x84, // CFG-NAV5
        0xB5, 0x62, 0x01, 0x04, 0x00, 0x00, 0x05, 0x10, // NAV-DOP
        0xB5, 0x62, 0x02, 0x20, 0x00, 0x00, 0x22, 0x68, // RXM-SVSI
    ];
}
