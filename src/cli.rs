use clap::{Arg, ArgAction, ArgMatches, ColorChoice, Command};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("ubx2fix")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("U-Blox navigation stream decoder and ephemeris position solver")
                    .color(ColorChoice::Always)
                    .arg_required_else_help(true)
                    .next_help_heading("Input captures")
                    .arg(
                        Arg::new("file")
                            .long("file")
                            .short('f')
                            .value_name("FILENAME")
                            .action(ArgAction::Append)
                            .required(true)
                            .help("Load a single capture (one hex record per line). Use as many as needed.
Each file is consumed one after the other, in the order given.
Gzip files are supported but they must be terminated with '.gz'"),
                    )
                    .next_help_heading("Outputs")
                    .arg(
                        Arg::new("fixes")
                            .long("fixes")
                            .action(ArgAction::SetTrue)
                            .help("Resolve an ECEF position for every complete ephemeris,
propagated at the reference time of the paired ionosphere record."),
                    )
                    .arg(
                        Arg::new("json")
                            .long("json")
                            .action(ArgAction::SetTrue)
                            .help("Dump all decoded tables as JSON on stdout."),
                    )
                    .get_matches()
            },
        }
    }

    /// Input file paths
    pub fn filepaths(&self) -> Vec<&String> {
        if let Some(fp) = self.matches.get_many::<String>("file") {
            fp.collect()
        } else {
            Vec::new()
        }
    }

    pub fn fixes(&self) -> bool {
        self.matches.get_flag("fixes")
    }

    pub fn json(&self) -> bool {
        self.matches.get_flag("json")
    }
}
