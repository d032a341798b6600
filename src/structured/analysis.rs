use serde_json::{Map, Value};

use crate::types::AnalysisResult;
use crate::{Error, Result};

/// Only this many characters of the input are sent for analysis.
pub const ANALYSIS_PREFIX_CHARS: usize = 1000;

/// Build the single-shot analysis prompt from the first
/// [`ANALYSIS_PREFIX_CHARS`] characters of `text`.
pub fn analysis_prompt(text: &str) -> String {
    let prefix: String = text.chars().take(ANALYSIS_PREFIX_CHARS).collect();
    format!(
        "Analyze the following text for a \"usefulness\" score (0-100), \"fluff\" percentage (0-100), \
         and \"AI writing likelihood\" (0-100). Also provide a 1 sentence summary. \
         Return ONLY a JSON object with keys: score, fluff, ai, summary. Text: \"{}...\"",
        prefix
    )
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker, then trim.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

pub fn parse_analysis(raw: &str) -> Result<AnalysisResult> {
    let cleaned = strip_code_fences(raw);
    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| Error::parse(format!("invalid JSON: {}", e), raw))?;
    let obj = value
        .as_object()
        .ok_or_else(|| Error::parse("expected a JSON object", raw))?;

    let score = percentage(obj, "score", raw)?;
    let fluff = percentage(obj, "fluff", raw)?;
    let ai = percentage(obj, "ai", raw)?;
    let summary = obj
        .get("summary")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| Error::parse("missing string field `summary`", raw))?;

    Ok(AnalysisResult {
        score,
        fluff,
        ai,
        summary,
    })
}

// Models sometimes answer "45%" or 72.5; both are accepted and rounded.
fn percentage(obj: &Map<String, Value>, key: &str, raw: &str) -> Result<u8> {
    let n = match obj.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::parse(format!("missing numeric field `{}`", key), raw))?;

    if !n.is_finite() || !(0.0..=100.0).contains(&n) {
        return Err(Error::parse(
            format!("field `{}` out of range 0-100: {}", key, n),
            raw,
        ));
    }
    Ok(n.round() as u8)
}
