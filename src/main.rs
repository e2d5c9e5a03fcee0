/*
 * UBX2FIX: U-Blox navigation stream decoder and ephemeris position solver.
 * Shipped under Mozilla Public V2 license.
 */

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
};

use env_logger::{Builder, Target};

use flate2::read::GzDecoder;

use log::{debug, error, info, warn};

use ubx2fix::prelude::{Collection, Decoder};

mod cli;

use crate::cli::Cli;

/// Opens one capture, transparently inflating gzip content.
fn open_capture(path: &str) -> std::io::Result<Box<dyn Read>> {
    let fd = File::open(path)?;

    if path.ends_with(".gz") {
        Ok(Box::new(GzDecoder::new(fd)))
    } else {
        Ok(Box::new(fd))
    }
}

fn consume_capture(path: &str, decoder: &mut Decoder, collection: &mut Collection) {
    let reader = match open_capture(path) {
        Ok(reader) => BufReader::new(reader),
        Err(e) => {
            error!("failed to open {}: {}", path, e);
            return;
        },
    };

    let mut lines = 0usize;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("{}: read error: {}", path, e);
                break;
            },
        };

        lines += 1;

        // decoding errors are not fatal, the stream continues
        match decoder.decode(&line) {
            Ok(Some(record)) => collection.latch(record),
            Ok(None) => {},
            Err(e) => warn!("{}:{}: {}", path, lines, e),
        }
    }

    debug!("{}: {} lines consumed", path, lines);
}

fn main() {
    let mut builder = Builder::from_default_env();

    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();

    let mut decoder = Decoder::new();
    let mut collection = Collection::new();

    for path in cli.filepaths() {
        consume_capture(path, &mut decoder, &mut collection);
    }

    if decoder.pending_satellites() > 0 {
        debug!(
            "{} satellite(s) left with an incomplete subframe set",
            decoder.pending_satellites()
        );
    }

    info!(
        "decoded {} ephemerides, {} ionosphere records, {} raw epochs",
        collection.ephemerides.len(),
        collection.ionospheres.len(),
        collection.measurements.len(),
    );

    if collection.is_empty() {
        warn!("nothing decoded, check your capture files");
    }

    if cli.json() {
        match serde_json::to_string_pretty(&collection) {
            Ok(dump) => println!("{}", dump),
            Err(e) => error!("failed to format tables: {}", e),
        }
    }

    if cli.fixes() {
        for entry in collection.ephemerides.iter() {
            let t = match collection.reference_tow(entry.sequence) {
                Some(t) => t,
                None => {
                    warn!(
                        "{} - no reference time for sequence {}, skipped",
                        entry.record.sv, entry.sequence
                    );
                    continue;
                },
            };

            match ubx2fix::resolve(&entry.record, t) {
                Ok(fix) => println!("{}", fix),
                Err(e) => error!("{} - propagation failed: {}", entry.record.sv, e),
            }
        }
    }
}
