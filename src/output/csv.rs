use super::{ChannelSummary, Formatter};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, summary: &ChannelSummary) -> String {
        format!(
            "{},{},{:.6},{:.6},{:.6},{:.6},{:.6}",
            summary.channel,
            summary.samples,
            summary.mean,
            summary.std_dev,
            summary.min,
            summary.max,
            summary.rms
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("channel,samples,mean,std_dev,min,max,rms")
    }
}
