//! Output formatting for interval summaries
//!
//! Human output lists each group's statistics with two decimals followed by a
//! text histogram. JSON and YAML carry the same numbers plus histogram bins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::histogram::Histogram;
use crate::analysis::{AnalysisOutcome, GroupReport, Summary};
use crate::error::{AnalysisError, ErrorCode, ErrorExt, Result};
use crate::ingest::LogSchema;

/// Width of histogram bars in human output
pub const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(AnalysisError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                format!("Unsupported output format '{}'. Use human, json or yaml", other),
                None,
            )),
        }
    }
}

/// Where the analysed data came from
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub source: String,
    pub schema: LogSchema,
}

/// Rendering options shared by every format
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub bins: usize,
    pub show_histogram: bool,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    source: &'a str,
    schema: &'static str,
    event_count: usize,
    interval_count: usize,
    groups: Vec<ReportEntry<'a>>,
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    label: Option<&'a str>,
    title: &'a str,
    summary: &'a Summary,
    histogram: Histogram,
}

/// Render an analysis outcome in the requested format
pub fn render(
    outcome: &AnalysisOutcome,
    context: &ReportContext,
    options: &RenderOptions,
) -> Result<String> {
    match options.format {
        OutputFormat::Human => Ok(format_outcome_human(
            outcome,
            options.bins,
            options.show_histogram,
        )),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&document(outcome, context, options.bins))
                .to_render_error("Failed to serialize report as JSON")
        }
        OutputFormat::Yaml => serde_yaml::to_string(&document(outcome, context, options.bins))
            .to_render_error("Failed to serialize report as YAML"),
    }
}

fn document<'a>(
    outcome: &'a AnalysisOutcome,
    context: &'a ReportContext,
    bins: usize,
) -> ReportDocument<'a> {
    ReportDocument {
        source: &context.source,
        schema: context.schema.name(),
        event_count: outcome.event_count,
        interval_count: outcome.interval_count,
        groups: outcome
            .groups
            .iter()
            .map(|group| ReportEntry {
                label: group.label.as_deref(),
                title: &group.title,
                summary: &group.summary,
                histogram: Histogram::from_values(&group.values, bins),
            })
            .collect(),
    }
}

/// Human-readable report for all groups
pub fn format_outcome_human(outcome: &AnalysisOutcome, bins: usize, show_histogram: bool) -> String {
    if outcome.is_empty() {
        return "No intervals found.\n".to_string();
    }

    outcome
        .groups
        .iter()
        .map(|group| {
            let histogram = show_histogram.then(|| Histogram::from_values(&group.values, bins));
            format_group_human(group, histogram.as_ref())
        })
        .collect()
}

/// Human-readable summary of one group
pub fn format_group_human(group: &GroupReport, histogram: Option<&Histogram>) -> String {
    let s = &group.summary;
    let mut output = match &group.label {
        Some(label) => format!("\nTransition: {}\n", label),
        None => "\nAll intervals\n".to_string(),
    };

    output.push_str(&format!("  Number of intervals: {}\n", s.count));
    output.push_str(&format!(
        "  Mean: {}, Std: {}\n",
        seconds(s.mean),
        seconds(s.std_dev)
    ));
    output.push_str(&format!(
        "  95% CI: [{}, {}] seconds\n",
        number(s.confidence_interval.low),
        number(s.confidence_interval.high)
    ));
    output.push_str(&format!(
        "  2.5th-97.5th percentile range: [{}, {}] seconds\n",
        number(s.percentile_range.low),
        number(s.percentile_range.high)
    ));

    if let Some(histogram) = histogram {
        output.push_str(&format!("  {}\n", group.title));
        output.push_str(&histogram.render_text(BAR_WIDTH));
    }
    output
}

fn number(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}", value)
    }
}

fn seconds(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.2}s", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::summarize;

    fn group(label: Option<&str>, values: Vec<f64>) -> GroupReport {
        GroupReport {
            label: label.map(str::to_string),
            title: match label {
                Some(l) => format!("{} interval distribution", l),
                None => "Distribution of operation intervals".to_string(),
            },
            summary: summarize(&values).unwrap(),
            values,
        }
    }

    fn outcome(groups: Vec<GroupReport>) -> AnalysisOutcome {
        let interval_count = groups.iter().map(|g| g.values.len()).sum();
        AnalysisOutcome {
            event_count: interval_count + 1,
            interval_count,
            groups,
        }
    }

    fn context() -> ReportContext {
        ReportContext {
            source: "events.csv".to_string(),
            schema: LogSchema::VisitorLog,
        }
    }

    #[test]
    fn test_format_group_human() {
        let text = format_group_human(&group(Some("READ->READ"), vec![10.0, 20.0]), None);
        assert!(text.contains("Transition: READ->READ"));
        assert!(text.contains("Number of intervals: 2"));
        assert!(text.contains("Mean: 15.00s, Std: 7.07s"));
        assert!(text.contains("95% CI: [5.20, 24.80] seconds"));
        assert!(text.contains("2.5th-97.5th percentile range: [10.25, 19.75] seconds"));
    }

    #[test]
    fn test_format_single_value_group() {
        let text = format_group_human(&group(Some("READ->COMMIT"), vec![20.0]), None);
        assert!(text.contains("Mean: 20.00s, Std: n/a"));
        assert!(text.contains("95% CI: [n/a, n/a] seconds"));
        assert!(text.contains("[20.00, 20.00] seconds"));
    }

    #[test]
    fn test_format_overall_group_with_histogram() {
        let g = group(None, vec![1.0, 2.0, 3.0]);
        let hist = Histogram::from_values(&g.values, 3);
        let text = format_group_human(&g, Some(&hist));
        assert!(text.contains("All intervals"));
        assert!(text.contains("Distribution of operation intervals"));
        assert_eq!(text.matches('|').count(), 3);
    }

    #[test]
    fn test_empty_outcome_human() {
        let text = format_outcome_human(&outcome(vec![]), 30, true);
        assert_eq!(text, "No intervals found.\n");
    }

    #[test]
    fn test_render_json() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            bins: 4,
            show_histogram: true,
        };
        let out = outcome(vec![group(Some("READ->READ"), vec![10.0, 20.0])]);
        let json = render(&out, &context(), &options).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schema"], "visitor");
        assert_eq!(value["interval_count"], 2);
        assert_eq!(value["groups"][0]["label"], "READ->READ");
        assert_eq!(value["groups"][0]["summary"]["mean"], 15.0);
        assert_eq!(value["groups"][0]["histogram"]["bins"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_render_json_nan_as_null() {
        let options = RenderOptions {
            format: OutputFormat::Json,
            bins: 2,
            show_histogram: false,
        };
        let out = outcome(vec![group(None, vec![5.0])]);
        let json = render(&out, &context(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["groups"][0]["summary"]["std_dev"].is_null());
        assert!(value["groups"][0]["label"].is_null());
    }

    #[test]
    fn test_render_yaml() {
        let options = RenderOptions {
            format: OutputFormat::Yaml,
            bins: 2,
            show_histogram: false,
        };
        let out = outcome(vec![group(Some("READ->COMMIT"), vec![1.0, 3.0])]);
        let yaml = render(&out, &context(), &options).unwrap();
        assert!(yaml.contains("label: READ->COMMIT"));
        assert!(yaml.contains("source: events.csv"));
    }

    #[test]
    fn test_render_yaml_nan_as_null() {
        let options = RenderOptions {
            format: OutputFormat::Yaml,
            bins: 2,
            show_histogram: false,
        };
        let out = outcome(vec![group(None, vec![5.0])]);
        let yaml = render(&out, &context(), &options).unwrap();
        assert!(yaml.contains("std_dev: null"));
        assert!(!yaml.contains(".nan"));

        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let ci = &value["groups"][0]["summary"]["confidence_interval"];
        assert!(ci["low"].is_null());
        assert!(ci["high"].is_null());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "human");
    }
}
