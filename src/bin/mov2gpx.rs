//! Writes a GPX file for each dashcam MOV file given.
//!
//! ```sh
//! mov2gpx -v -O gpx/ 2019_0504_120309_001.MOV 2019_0504_120409_002.MOV
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use rayon::prelude::*;

use movgps::{
    GpxOptions, GpxVersion, GpxWriter, MovError, MovGps, Options, OutputTarget,
};

#[derive(Parser, Debug)]
#[command(name = "mov2gpx", version, about = "Extract GPS logs from dashcam MOV files as GPX", long_about = None)]
struct Opt {
    /// Overwrite any existing gpx file
    #[arg(short = 'w', long)]
    overwrite: bool,

    /// Report format and comment (model, firmware), if present
    #[arg(short, long)]
    verbose: bool,

    /// Tracing to stderr
    #[arg(long)]
    debug: bool,

    /// Destination directory for gpx file(s) or '-' for stdout.
    /// Default: MOV file directory
    #[arg(short = 'O', long = "outdir")]
    out_dir: Option<PathBuf>,

    /// GPX version: 0 or 1 for 1.0 or 1.1
    #[arg(short = 'g', long = "gpx", default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    gpx_version: u8,

    /// Do not use NMEA GGA records
    #[arg(short = 'x', long = "no-nmea")]
    no_nmea: bool,

    /// Remove dubious points at sea with lat/long = 0/0
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    clean: bool,

    /// MOV file(s)
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

impl Opt {
    fn gpx_options(&self) -> GpxOptions {
        GpxOptions {
            version: GpxVersion::from_minor(self.gpx_version),
            use_nmea: !self.no_nmea,
            clean: self.clean,
        }
    }
}

fn main() {
    let opt = Opt::parse();

    let level = match opt.debug {
        true => "debug",
        false => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(err) = run(&opt) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

/// Processes all files in parallel. GPX destined for stdout
/// is buffered and written in input order.
fn run(opt: &Opt) -> Result<(), MovError> {
    let buffers = opt.paths.par_iter()
        .map(|path| process(path, opt))
        .collect::<Result<Vec<_>, MovError>>()?;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    for buf in buffers.into_iter().flatten() {
        lock.write_all(&buf)?;
    }
    lock.flush()?;

    Ok(())
}

/// Returns the GPX as bytes if the target is stdout.
fn process(mov_path: &Path, opt: &Opt) -> Result<Option<Vec<u8>>, MovError> {
    let target = OutputTarget::new(mov_path, opt.out_dir.as_deref())?;
    if !opt.overwrite {
        target.check_overwrite()?;
    }

    let options = Options::default().with_trace(opt.debug);
    let extraction = MovGps::open(mov_path, options)?.gps_logs()?;

    if opt.verbose || opt.debug {
        log::info!(
            "{}\n\t{}",
            mov_path.display(),
            extraction.user_data,
        );
    }

    match target {
        OutputTarget::Stdout => {
            let mut buf = Vec::new();
            GpxWriter::new(&mut buf, opt.gpx_options()).write_track(&extraction.logs)?;
            Ok(Some(buf))
        }
        OutputTarget::File(gpx_path) => {
            if opt.verbose && opt.out_dir.is_some() {
                log::info!("Writing to {}", gpx_path.display());
            }
            let writer = BufWriter::new(File::create(&gpx_path)?);
            let count = GpxWriter::new(writer, opt.gpx_options()).write_track(&extraction.logs)?;
            log::debug!("{}: {} of {} points written", gpx_path.display(), count, extraction.logs.len());
            Ok(None)
        }
    }
}
