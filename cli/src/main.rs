//! Tools for inspecting J2735 MAP messages stored as JSON files.

#[macro_use]
extern crate log;

mod geojson;
mod lanes;

use anyhow::Result;
use structopt::StructOpt;

use intersection::{DecodeOptions, DecodedIntersection};

#[derive(StructOpt)]
#[structopt(name = "mapcli", about = "Decodes the lane geometry of J2735 MAP messages")]
enum Command {
    /// Decodes a MAP message and writes the reference point, lanes, and lane points as one GeoJSON
    /// FeatureCollection.
    #[structopt(name = "geojson")]
    GeoJSON {
        /// The path to a MAP message in JSON
        #[structopt(long)]
        input: String,
        /// The path to write. Defaults to the input's name with a .geojson extension, in the
        /// current directory.
        #[structopt(long)]
        output: Option<String>,
        #[structopt(flatten)]
        args: DecodeArgs,
    },
    /// Prints metadata about the intersection as JSON
    Summary {
        /// The path to a MAP message in JSON
        #[structopt()]
        input: String,
        #[structopt(flatten)]
        args: DecodeArgs,
    },
    /// Prints what happened to every lane, including the ones that were dropped or broken
    Lanes {
        /// The path to a MAP message in JSON
        #[structopt()]
        input: String,
        #[structopt(flatten)]
        args: DecodeArgs,
    },
}

#[derive(StructOpt)]
struct DecodeArgs {
    /// A JSON file overriding lane colors, like `{"ingress": "#00FF00"}`
    #[structopt(long)]
    palette: Option<String>,
    #[structopt(flatten)]
    opts: DecodeOptions,
}

impl DecodeArgs {
    fn decode(self, input: &str) -> Result<DecodedIntersection> {
        let mut opts = self.opts;
        if let Some(path) = self.palette {
            opts.palette = util::read_json(path)?;
        }
        let message: serde_json::Value = util::read_json(input)?;
        intersection::decode(&message, &util::file_name(input), &opts)
    }
}

fn main() -> Result<()> {
    let cmd = Command::from_args();

    // Summary output is meant to be piped elsewhere
    if !matches!(cmd, Command::Summary { .. }) {
        util::logger::setup();
    }

    match cmd {
        Command::GeoJSON {
            input,
            output,
            args,
        } => {
            let decoded = args.decode(&input)?;
            geojson::run(&decoded, output.unwrap_or_else(|| geojson::default_output(&input)))?;
        }
        Command::Summary { input, args } => {
            let decoded = args.decode(&input)?;
            println!("{}", util::to_json(&decoded.summary)?);
        }
        Command::Lanes { input, args } => {
            let decoded = args.decode(&input)?;
            lanes::run(&decoded);
        }
    }
    Ok(())
}
