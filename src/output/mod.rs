mod csv;
mod json;
mod text;

use rolling_stats::Stats;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// Level statistics of one filtered channel
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChannelSummary {
    pub channel: usize,
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub rms: f64,
}

impl ChannelSummary {
    pub fn from_samples(channel: usize, samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self {
                channel,
                samples: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                rms: 0.0,
            };
        }

        let mut stats: Stats<f64> = Stats::new();
        let mut energy = 0.0f64;
        for &sample in samples {
            let value = sample as f64;
            stats.update(value);
            energy += value * value;
        }

        Self {
            channel,
            samples: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
            rms: (energy / samples.len() as f64).sqrt(),
        }
    }
}

pub trait Formatter: Send {
    fn format(&self, summary: &ChannelSummary) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
