use super::{ChannelSummary, Formatter};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, summary: &ChannelSummary) -> String {
        // Plain numbers and a derived Serialize impl cannot fail to encode
        serde_json::to_string(summary).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
