//! Text and JSON rendering for the `score-leads` harness
//!
//! Rendering is kept apart from printing so the output can be checked in
//! tests. Only [`results_json`] and [`lead_scores_json`] are machine-readable;
//! the rest is for people.

use std::fmt::Write;

use crate::models::{CompositeResult, LeadScore};

/// Characters of each message shown in the summary
pub const SUMMARY_PREVIEW_CHARS: usize = 50;

/// Detailed report for one scored message
pub fn lead_report(result: &CompositeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Lead Analysis ===");
    let _ = writeln!(out, "Original Message: {}", result.message);
    let _ = writeln!(
        out,
        "Sentiment Analysis: {} (Compound Score: {:.2})",
        result.sentiment.label, result.sentiment.compound
    );
    let _ = writeln!(out, "AI Analysis Score: {}/100", result.ai_analysis.score);
    let _ = writeln!(out, "Final Composite Score: {}/100", result.composite_score);
    let _ = writeln!(out, "\nAI Justification:");
    let _ = writeln!(out, "{}", result.ai_analysis.justification);
    let _ = writeln!(out, "{}", "=".repeat(50));
    out
}

/// One-block-per-message summary with a truncated message preview
pub fn summary(results: &[CompositeResult]) -> String {
    let mut out = String::from("\n=== Summary of All Results ===\n");
    for (i, result) in results.iter().enumerate() {
        let preview: String = result.message.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        let _ = writeln!(out, "\nResult {}:", i + 1);
        let _ = writeln!(out, "Message: {}...", preview);
        let _ = writeln!(out, "Sentiment: {}", result.sentiment.label);
        let _ = writeln!(out, "AI Score: {}/100", result.ai_analysis.score);
        let _ = writeln!(out, "Composite Score: {}/100", result.composite_score);
    }
    out
}

/// Single-attempt record followed by its raw JSON
pub fn single_report(lead_score: &LeadScore) -> serde_json::Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Lead Analysis Result ===");
    let _ = writeln!(out, "Score: {}/100", lead_score.score);
    let _ = writeln!(out, "Justification: {}", lead_score.justification);
    let _ = writeln!(out, "\n=== Raw JSON ===");
    out.push_str(&serde_json::to_string_pretty(lead_score)?);
    Ok(out)
}

/// Pretty JSON array of composite results
pub fn results_json(results: &[CompositeResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Pretty JSON array of LLM records
pub fn lead_scores_json(records: &[LeadScore]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
