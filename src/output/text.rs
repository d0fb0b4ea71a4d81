use super::{ChannelSummary, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, summary: &ChannelSummary) -> String {
        if self.verbose {
            format!(
                "Channel {}: {} samples, rms {:.4} [mean: {:>8.4}, std: {:.4}, min: {:>8.4}, max: {:>8.4}]",
                summary.channel,
                summary.samples,
                summary.rms,
                summary.mean,
                summary.std_dev,
                summary.min,
                summary.max
            )
        } else {
            format!(
                "Channel {}: {} samples, rms {:.4}",
                summary.channel, summary.samples, summary.rms
            )
        }
    }
}
