use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use firstream::signal_processing::{DesignMethod, DesignRequest, design};

#[derive(Parser, Debug)]
#[command(name = "design_taps")]
#[command(about = "Print FIR coefficients for a window design", long_about = None)]
struct Args {
    /// Design method: moving-average, bartlett, hamming, hann
    #[arg(short, long, value_enum, default_value = "hamming")]
    method: DesignMethod,

    /// Number of filter taps
    #[arg(short, long, default_value_t = 63)]
    taps: usize,

    /// Normalized bandwidth (0.5 = half the sample rate)
    #[arg(short, long, default_value_t = 0.25)]
    bandwidth: f64,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: TapFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TapFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Serialize)]
struct TapReport {
    method: DesignMethod,
    bandwidth: f64,
    group_delay_samples: usize,
    dc_gain: f64,
    coefficients: Vec<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let request = match args.method {
        DesignMethod::MovingAverage => DesignRequest::moving_average(args.taps),
        method => DesignRequest::windowed_sinc(method, args.taps, args.bandwidth),
    };
    let coefficients = design(&request)?.into_numerator();

    let report = TapReport {
        method: args.method,
        bandwidth: args.bandwidth,
        group_delay_samples: (coefficients.len() - 1) / 2,
        dc_gain: coefficients.iter().sum(),
        coefficients,
    };

    match args.format {
        TapFormat::Text => print_text(&report),
        TapFormat::Csv => print_csv(&report),
        TapFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &TapReport) {
    println!(
        "{} design, {} taps, bandwidth {}",
        report.method,
        report.coefficients.len(),
        report.bandwidth
    );
    println!("Group delay: {} samples", report.group_delay_samples);
    println!("DC gain: {:.12}", report.dc_gain);
    println!();
    for (i, tap) in report.coefficients.iter().enumerate() {
        println!("{:>5} {:>+.12e}", i, tap);
    }
}

fn print_csv(report: &TapReport) {
    println!("index,coefficient");
    for (i, tap) in report.coefficients.iter().enumerate() {
        println!("{},{:.17e}", i, tap);
    }
}
