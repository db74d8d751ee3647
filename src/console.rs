//! Text front-end: report rendering, the interactive prompt loop and
//! one-shot analysis.
//!
//! Kept free of terminal specifics so the loop can be driven from any
//! `BufRead`/`Write` pair.

use std::io::{self, BufRead, Write};

use crate::analyzer::ToneAnalyzer;
use crate::types::ToneReport;
use crate::TrollGuardError;

/// Typing this (any case) leaves the interactive loop.
pub const EXIT_COMMAND: &str = "exit";

/// Shown for blank input.
pub const EMPTY_INPUT_WARNING: &str = "⚠️ Please enter some text.";

const SEPARATOR_WIDTH: usize = 60;

/// Write the five result fields of a report, plus the raw sentiment.
pub fn render_report<W: Write>(out: &mut W, report: &ToneReport) -> io::Result<()> {
    let signals = &report.signals;
    let result = &report.result;

    writeln!(out, "\n--- Analyzing Text ---")?;
    writeln!(out, "📝 Input: {}\n", report.input.as_str())?;
    writeln!(out, "🔹 Toxicity: {:.2}", signals.toxic_score)?;
    writeln!(
        out,
        "🔹 Emotion: {} - {:.2}",
        signals.top_emotion.label.capitalized(),
        signals.top_emotion.score
    )?;
    writeln!(
        out,
        "🔹 Sarcasm: {}",
        if signals.sarcasm_detected { "Yes" } else { "No" }
    )?;
    writeln!(out, "🔹 Sentiment (VADER): {}", signals.sentiment_compound)?;
    writeln!(
        out,
        "\n🧠 Final Classification: {} {}",
        result.classification.badge(),
        result.classification
    )?;
    writeln!(out, "🔒 Confidence: {:.1}%", result.confidence)?;
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Run the prompt loop until `exit` or end of input.
///
/// Blank lines get a warning and no analysis. A failed analysis is reported
/// and the loop carries on with the next line.
pub async fn run_interactive<R, W>(analyzer: &ToneAnalyzer, mut input: R, mut out: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "\n🤖 Welcome to TrollGuard – Hybrid NLP Tone Analyzer")?;
    writeln!(out, "Type text to analyze (type '{EXIT_COMMAND}' to quit)\n")?;

    loop {
        write!(out, "Enter text: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let text = line.trim();
        if text.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if text.is_empty() {
            writeln!(out, "{EMPTY_INPUT_WARNING}")?;
            continue;
        }

        match analyzer.analyze(text).await {
            Ok(report) => render_report(&mut out, &report)?,
            Err(TrollGuardError::InvalidInput(_)) => writeln!(out, "{EMPTY_INPUT_WARNING}")?,
            Err(e) => report_failure(&mut out, &e)?,
        }
    }

    writeln!(out, "\n👋 Exiting TrollGuard. Stay kind online!")?;
    out.flush()
}

/// Analyze one text and write the report to `out`, as JSON if asked.
///
/// Warnings and failures go to `err`. Returns whether a report was written.
pub async fn analyze_once<W, E>(
    analyzer: &ToneAnalyzer,
    text: &str,
    json: bool,
    mut out: W,
    mut err: E,
) -> io::Result<bool>
where
    W: Write,
    E: Write,
{
    let report = match analyzer.analyze(text).await {
        Ok(report) => report,
        Err(TrollGuardError::InvalidInput(_)) => {
            writeln!(err, "{EMPTY_INPUT_WARNING}")?;
            return Ok(false);
        }
        Err(e) => {
            report_failure(&mut err, &e)?;
            return Ok(false);
        }
    };

    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render_report(&mut out, &report)?;
    }
    out.flush()?;
    Ok(true)
}

fn report_failure<W: Write>(out: &mut W, error: &TrollGuardError) -> io::Result<()> {
    writeln!(out, "❌ Analysis failed: {error}")
}
