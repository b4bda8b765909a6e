//! Output formatting for centroid results.

use anyhow::Result;
use clap::ValueEnum;
use cog_core::{CentroidResult, Mesh};
use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundsReport {
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub max_dimension: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub center: [f64; 3],
    pub total_volume: f64,
    pub signed_volume: f64,
    pub triangle_count: usize,
    pub degenerate: bool,
    pub inside_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsReport>,
}

impl Report {
    pub fn new(result: &CentroidResult, mesh: &Mesh) -> Self {
        let bounds = mesh.bounds().map(|b| BoundsReport {
            min: b.min.into(),
            max: b.max.into(),
            max_dimension: b.max_dimension(),
        });

        Self {
            center: result.center.into(),
            total_volume: result.total_volume,
            signed_volume: result.signed_volume,
            triangle_count: result.triangle_count,
            degenerate: result.is_degenerate(),
            inside_out: result.is_inside_out(),
            bounds,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("{}", "Center of Mass".bold().underline()),
            format!("  {}: {}", "Triangles".cyan(), self.triangle_count),
            format!(
                "  {}: ({:.6}, {:.6}, {:.6})",
                "Center".cyan(),
                self.center[0],
                self.center[1],
                self.center[2]
            ),
            format!("  {}: {:.6}", "Volume".cyan(), self.total_volume),
        ];

        if let Some(ref b) = self.bounds {
            lines.push(format!(
                "  {}: {:.6}",
                "Max dimension".cyan(),
                b.max_dimension
            ));
        }
        if self.degenerate {
            lines.push(format!(
                "  {}: volume is negligible, center left at origin",
                "Warning".yellow()
            ));
        } else if self.inside_out {
            lines.push(format!(
                "  {}: facets are wound inward",
                "Note".yellow()
            ));
        }

        lines.join("\n")
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => self.to_json(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cog_core::compute_centroid;

    #[test]
    fn test_json_report() {
        let mesh = Mesh::cube(2.0);
        let report = Report::new(&compute_centroid(&mesh).unwrap(), &mesh);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["triangle_count"], 12);
        assert_eq!(json["degenerate"], false);
        assert!((json["total_volume"].as_f64().unwrap() - 8.0).abs() < 1e-9);
        assert!((json["bounds"]["max_dimension"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report_omits_bounds() {
        let mesh = Mesh::new();
        let report = Report::new(&compute_centroid(&mesh).unwrap(), &mesh);
        assert!(report.degenerate);

        let json = report.render(OutputFormat::Json).unwrap();
        assert!(!json.contains("bounds"));
        assert!(report.to_text().contains("negligible"));
    }
}
