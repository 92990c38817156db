//! Helpers for rendering generation results for the terminal

use crate::generate::GenerateReport;
use serde_json::{Map, Value, json};

/// Combined structured and human-readable representation of a report
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// Structured JSON representation suitable for scripts
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Render a report into both JSON and human-readable forms.
///
/// Human lines are the generation notices followed by the two status lines.
pub fn render_report(report: &GenerateReport) -> RenderedReport {
    let mut human = report.notices.clone();
    human.push(format!("QR code created: {}", report.output.display()));
    human.push(format!("URL: {}", report.text));

    RenderedReport {
        json: report_value(report),
        human,
    }
}

/// Produce a structured JSON representation of the report.
pub fn report_value(report: &GenerateReport) -> Value {
    let mut root = Map::new();
    root.insert(
        "output".to_string(),
        Value::String(report.output.display().to_string()),
    );
    root.insert("text".to_string(), Value::String(report.text.clone()));
    root.insert("version".to_string(), Value::from(report.version));
    root.insert("modules".to_string(), Value::from(report.width_modules));
    root.insert(
        "image".to_string(),
        json!({
            "width": report.image_width,
            "height": report.image_height,
        }),
    );
    root.insert(
        "logo".to_string(),
        json!({
            "status": report.logo.label(),
            "path": report.logo.path().map(|p| p.display().to_string()),
        }),
    );
    root.insert("notices".to_string(), json!(report.notices));

    Value::Object(root)
}
