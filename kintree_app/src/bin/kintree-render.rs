// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a family record as an SVG document on stdout.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use kintree_app::{App, AppConfig, demo_record, load_record};
use kintree_record::BirthDate;
use kurbo::Size;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Family record (JSON). The bundled demo record when omitted.
    record: Option<PathBuf>,
    /// View width in pixels.
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// View height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// Date ages are computed on, as M/D/YYYY or YYYY-MM-DD. Defaults to today (UTC).
    #[arg(long)]
    today: Option<BirthDate>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    match render(&args) {
        Ok(svg) => {
            println!("{svg}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn render(args: &Args) -> Result<String, Box<dyn Error>> {
    let record = match &args.record {
        Some(path) => load_record(&std::fs::read_to_string(path)?)?,
        None => demo_record()?,
    };
    let today = match args.today {
        Some(date) => date,
        None => today_utc().ok_or("system clock is out of range")?,
    };
    let size = Size::new(f64::from(args.width), f64::from(args.height));
    let app = App::new(record, &AppConfig::default(), size, today);
    Ok(app.to_svg())
}

fn today_utc() -> Option<BirthDate> {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
    BirthDate::from_days_since_epoch(i64::try_from(secs / 86_400).ok()?)
}
