//! End to end: hex capture lines in, position fixes out.

use ubx2fix::prelude::*;

/// Packs an MSB-first bit field into a 24-bit parameter word.
fn pack(word: &mut u32, msb_offset: u32, width: u32, value: u32) {
    *word |= (value & ((1 << width) - 1)) << (24 - msb_offset - width);
}

fn record_line(marker: &str, prn: u8, words: [u32; 8]) -> String {
    let mut line = String::from("b5620b316800");
    line.push_str(marker);

    for byte in (prn as u32).to_le_bytes() {
        line.push_str(&format!("{:02x}", byte));
    }

    for word in words {
        for byte in word.to_le_bytes() {
            line.push_str(&format!("{:02x}", byte));
        }
    }

    line
}

/// One satellite's full subframe cycle: realistic clock and orbital
/// elements (nominal semi-major axis, e = 0.005, 55 degree inclination,
/// toe = 529920 s).
fn subframe_cycle(prn: u8) -> [String; 3] {
    let mut sf1 = [0u32; 8];
    pack(&mut sf1[0], 0, 10, 300); // week
    pack(&mut sf1[0], 10, 2, 0b10); // C/A on L2
    pack(&mut sf1[0], 12, 4, 1); // ura
    pack(&mut sf1[4], 16, 8, (-12i32 as u32) & 0xFF); // tgd
    pack(&mut sf1[5], 0, 8, 145); // iodc
    pack(&mut sf1[5], 8, 16, 33120); // toc
    pack(&mut sf1[6], 8, 16, (-50i32 as u32) & 0xFFFF); // af1
    pack(&mut sf1[7], 0, 22, 100_000); // af0

    let mut sf2 = [0u32; 8];
    pack(&mut sf2[0], 0, 8, 145); // iode
    pack(&mut sf2[0], 8, 16, (-87i32 as u32) & 0xFFFF); // crs
    pack(&mut sf2[1], 0, 16, 13000); // deltan

    let m0_raw = 858_993_459u64; // 0.4 semicircles
    pack(&mut sf2[1], 16, 8, (m0_raw >> 24) as u32);
    sf2[2] = (m0_raw & 0xFF_FFFF) as u32;

    pack(&mut sf2[3], 0, 16, (-180i32 as u32) & 0xFFFF); // cuc

    let e_raw = 42_949_673u64; // 0.005
    pack(&mut sf2[3], 16, 8, (e_raw >> 24) as u32);
    sf2[4] = (e_raw & 0xFF_FFFF) as u32;

    pack(&mut sf2[5], 0, 16, 120); // cus

    let sqrta_raw = 2_702_262_989u64; // 5153.7 m^1/2
    pack(&mut sf2[5], 16, 8, (sqrta_raw >> 24) as u32);
    sf2[6] = (sqrta_raw & 0xFF_FFFF) as u32;

    pack(&mut sf2[7], 0, 16, 33120); // toe

    let mut sf3 = [0u32; 8];
    pack(&mut sf3[0], 0, 16, 20); // cic

    let omega0_raw = (-601_295_421i64 as u64) & 0xFFFF_FFFF;
    pack(&mut sf3[0], 16, 8, (omega0_raw >> 24) as u32);
    sf3[1] = (omega0_raw & 0xFF_FFFF) as u32;

    pack(&mut sf3[2], 0, 16, (-15i32 as u32) & 0xFFFF); // cis

    let i0_raw = 656_206_499u64; // 55 degrees
    pack(&mut sf3[2], 16, 8, (i0_raw >> 24) as u32);
    sf3[3] = (i0_raw & 0xFF_FFFF) as u32;

    pack(&mut sf3[4], 0, 16, 7000); // crc

    let omega_raw = 1_417_339_208u64;
    pack(&mut sf3[4], 16, 8, (omega_raw >> 24) as u32);
    sf3[5] = (omega_raw & 0xFF_FFFF) as u32;

    sf3[6] = (-22690i32 as u32) & 0xFF_FFFF; // omegadot
    pack(&mut sf3[7], 0, 8, 145); // iode
    pack(&mut sf3[7], 8, 14, (-280i32 as u32) & 0x3FFF); // idot

    [
        record_line("01", prn, sf1),
        record_line("10", prn, sf2),
        record_line("20", prn, sf3),
    ]
}

fn ionosphere_line(tow: u32) -> String {
    let mut line = String::from("b5620b024800");

    let push = |line: &mut String, bytes: &[u8]| {
        for byte in bytes {
            line.push_str(&format!("{:02x}", byte));
        }
    };

    push(&mut line, &u32::MAX.to_le_bytes()); // health
    push(&mut line, &(-3.2596e-9f64).to_le_bytes());
    push(&mut line, &(1.5987e-12f64).to_le_bytes());
    push(&mut line, &tow.to_le_bytes());
    push(&mut line, &1324u16.to_le_bytes());
    push(&mut line, &18u16.to_le_bytes());
    push(&mut line, &1929u16.to_le_bytes());
    push(&mut line, &7u16.to_le_bytes());
    push(&mut line, &18u16.to_le_bytes());
    push(&mut line, &0u16.to_le_bytes());

    for value in [4.6566e-9f32, 1.4901e-8, -5.9605e-8, -5.9605e-8] {
        push(&mut line, &value.to_le_bytes());
    }
    for value in [79872.0f32, 65536.0, -65536.0, -393216.0] {
        push(&mut line, &value.to_le_bytes());
    }

    line
}

fn capture() -> Vec<String> {
    let mut lines = Vec::new();

    // interleaved poll round: iono first, then two satellites, with
    // noise the decoder must skip
    lines.push("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9".to_string());
    lines.push(ionosphere_line(529920 + 3600));
    lines.extend(subframe_cycle(7));
    lines.push(String::new());
    lines.extend(subframe_cycle(11));
    lines.push("b562ffff0000".to_string());

    lines
}

fn decode(lines: &[String]) -> Collection {
    let mut decoder = Decoder::new();
    let mut collection = Collection::new();

    for line in lines {
        match decoder.decode(line) {
            Ok(Some(record)) => collection.latch(record),
            Ok(None) => {},
            Err(e) => panic!("unexpected decoding failure: {}", e),
        }
    }

    collection
}

#[test]
fn capture_to_position_fixes() {
    let collection = decode(&capture());

    assert_eq!(collection.ionospheres.len(), 1);
    assert_eq!(collection.ephemerides.len(), 2);
    assert_eq!(
        collection.satellites(),
        vec![
            SV::new(Constellation::GPS, 7),
            SV::new(Constellation::GPS, 11),
        ],
    );

    for entry in collection.ephemerides.iter() {
        let t = collection.reference_tow(entry.sequence).unwrap();
        assert_eq!(t, 533520.0);

        let fix = resolve(&entry.record, t).unwrap();

        // nominal GPS orbital radius band
        let radius = fix.radius_m();
        assert!(
            (25_500.0E3..27_500.0E3).contains(&radius),
            "{} radius {} m out of band",
            fix.sv,
            radius,
        );
    }
}

#[test]
fn replay_produces_identical_tables() {
    let lines = capture();

    let first = decode(&lines);
    let second = decode(&lines);

    assert_eq!(first.ephemerides, second.ephemerides);
    assert_eq!(first.ionospheres, second.ionospheres);
}

#[test]
fn tables_serialize_to_json() {
    let collection = decode(&capture());

    let dump = serde_json::to_string_pretty(&collection).unwrap();
    assert!(dump.contains("ephemerides"));
    assert!(dump.contains("ionospheres"));

    let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
    assert_eq!(value["ephemerides"].as_array().unwrap().len(), 2);
}

#[test]
fn truncated_records_do_not_poison_the_stream() {
    let mut lines = capture();

    // a truncated ionosphere record somewhere in the middle
    lines.insert(3, ionosphere_line(529920)[..80].to_string());

    let mut decoder = Decoder::new();
    let mut collection = Collection::new();
    let mut failures = 0usize;

    for line in &lines {
        match decoder.decode(line) {
            Ok(Some(record)) => collection.latch(record),
            Ok(None) => {},
            Err(_) => failures += 1,
        }
    }

    assert_eq!(failures, 1);
    assert_eq!(collection.ephemerides.len(), 2);
    assert_eq!(collection.ionospheres.len(), 1);
}
