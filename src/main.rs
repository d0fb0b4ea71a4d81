use anyhow::{Context, Result};
use clap::Parser;
use hound::{WavReader, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use firstream::config::FirstreamConfig;
use firstream::output::{ChannelSummary, OutputFormat, create_formatter};
use firstream::signal_processing::{
    Convolver, DesignMethod, DesignRequest, DirectConvolver, ParallelConvolver, StreamingFilter,
};

#[derive(Parser, Debug)]
#[command(name = "firstream")]
#[command(about = "Filter a WAV file block by block with a windowed FIR", long_about = None)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file (32-bit float)
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Design method: moving-average, bartlett, hamming, hann
    #[arg(short, long, value_enum)]
    method: Option<DesignMethod>,

    /// Number of filter taps
    #[arg(short, long)]
    taps: Option<usize>,

    /// Normalized bandwidth (0.5 = half the sample rate)
    #[arg(short, long)]
    bandwidth: Option<f64>,

    /// Samples per processing block
    #[arg(long)]
    block_size: Option<usize>,

    /// Convolve on a worker pool
    #[arg(short, long)]
    parallel: bool,

    /// Worker threads for the pool (implies --parallel)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Summary format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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

    let config = build_config(&args)?;
    let request = DesignRequest::try_from(&config.design)?;

    let (spec, channels) = read_channels(&args.input)?;
    log::info!(
        "Read {} channels of {} samples at {} Hz from {}",
        channels.len(),
        channels.first().map_or(0, Vec::len),
        spec.sample_rate,
        args.input.display()
    );

    let filtered = if config.parallel.enabled {
        let pool = Arc::new(ParallelConvolver::with_config(&config.parallel)?);
        log::info!("Convolving on {} worker threads", pool.workers());
        filter_channels(&channels, &request, config.stream.block_size, || {
            Arc::clone(&pool)
        })?
    } else {
        filter_channels(&channels, &request, config.stream.block_size, || {
            DirectConvolver
        })?
    };

    write_channels(&args.output, spec.sample_rate, &filtered)?;

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    for (channel, samples) in filtered.iter().enumerate() {
        println!(
            "{}",
            formatter.format(&ChannelSummary::from_samples(channel, samples))
        );
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<FirstreamConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => FirstreamConfig::default(),
    };

    if let Some(method) = args.method {
        config.design.method = method;
    }
    if let Some(taps) = args.taps {
        config.design.taps = i64::try_from(taps).context("Tap count too large")?;
    }
    if let Some(bandwidth) = args.bandwidth {
        config.design.bandwidth = bandwidth;
    }
    if let Some(block_size) = args.block_size {
        config.stream.block_size = block_size;
    }
    if args.parallel {
        config.parallel.enabled = true;
    }
    if let Some(workers) = args.workers {
        config.parallel.enabled = true;
        config.parallel.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<FirstreamConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    FirstreamConfig::from_toml_str(&content).context("Failed to parse config file")
}

/// One filter per channel, so channels never share history
fn filter_channels<C, F>(
    channels: &[Vec<f32>],
    request: &DesignRequest,
    block_size: usize,
    mut make_convolver: F,
) -> Result<Vec<Vec<f32>>>
where
    C: Convolver<f64>,
    F: FnMut() -> C,
{
    channels
        .iter()
        .map(|samples| -> Result<Vec<f32>> {
            let mut filter = StreamingFilter::with_convolver(1, make_convolver())?;
            filter.design_from_request(request)?;

            let mut output = samples.clone();
            for block in output.chunks_mut(block_size) {
                filter.process_buffer(block)?;
            }
            Ok(output)
        })
        .collect()
}

fn read_channels(path: &Path) -> Result<(WavSpec, Vec<Vec<f32>>)> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = int_sample_scale(spec.bits_per_sample);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let num_channels = spec.channels.max(1) as usize;
    let mut channels = vec![Vec::with_capacity(interleaved.len() / num_channels); num_channels];
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok((spec, channels))
}

/// Full-scale magnitude of a signed integer sample with `bits_per_sample` bits
fn int_sample_scale(bits_per_sample: u16) -> f32 {
    (1i64 << (bits_per_sample.clamp(1, 32) - 1)) as f32
}

fn write_channels(path: &Path, sample_rate: u32, channels: &[Vec<f32>]) -> Result<()> {
    let spec = WavSpec {
        channels: channels.len() as u16,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
    for i in 0..frames {
        for channel in channels {
            writer.write_sample(channel[i])?;
        }
    }

    writer.finalize()?;
    Ok(())
}
