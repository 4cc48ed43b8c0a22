use std::sync::LazyLock;

use regex::Regex;

use crate::strategies::StrategyOutcome;
use crate::types::RepairOptions;

const DESCRIPTION: &str = "Extracted JSON candidate from surrounding text";

static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*`{1,3}(?:json)?[ \t]*\r?\n?").expect("fence pattern must compile")
});
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?\s*`{1,3}\s*$").expect("fence pattern must compile"));

pub fn extract_candidate(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.extract_from_text {
        return StrategyOutcome::unchanged(text);
    }

    if text.contains('`') {
        let mut fixed = FENCE_OPEN.replace(text, "").into_owned();
        fixed = FENCE_CLOSE.replace(&fixed, "").into_owned();
        if fixed != text {
            return StrategyOutcome::rewrite(text, fixed.trim().to_string(), DESCRIPTION);
        }
    }

    if let Some(span) = balanced_span(text) {
        if span != text {
            return StrategyOutcome::rewrite(text, span.to_string(), DESCRIPTION);
        }
    }

    StrategyOutcome::unchanged(text)
}

// First '{' or '[' to its balanced closer (string-aware), or to end of input
// when the payload is truncated.
fn balanced_span(text: &str) -> Option<&str> {
    let start = match (text.find('{'), text.find('[')) {
        (None, None) => return None,
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (Some(a), Some(b)) => a.min(b),
    };

    let bytes = text.as_bytes();
    let mut in_string = false;
    let mut escape = false;
    let mut depth_brace: i64 = 0;
    let mut depth_bracket: i64 = 0;
    let mut end = bytes.len();

    let mut i = start;
    while i < bytes.len() {
        let ch = bytes[i];
        if in_string {
            if escape {
                escape = false;
            } else if ch == b'\\' {
                escape = true;
            } else if ch == b'"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if ch == b'"' {
            in_string = true;
            i += 1;
            continue;
        }
        match ch {
            b'{' => depth_brace += 1,
            b'}' => depth_brace -= 1,
            b'[' => depth_bracket += 1,
            b']' => depth_bracket -= 1,
            _ => {}
        }
        if depth_brace == 0 && depth_bracket == 0 {
            end = i + 1;
            break;
        }
        i += 1;
    }

    Some(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_span_cuts_prose_on_both_sides() {
        let span = balanced_span("Sure! {\"a\": 1} hope this helps").unwrap();
        assert_eq!(span, "{\"a\": 1}");
    }

    #[test]
    fn balanced_span_ignores_brackets_inside_strings() {
        let span = balanced_span("{\"a\": \"}\"} tail").unwrap();
        assert_eq!(span, "{\"a\": \"}\"}");
    }

    #[test]
    fn balanced_span_runs_to_end_when_truncated() {
        let span = balanced_span("noise {\"a\": [1, 2").unwrap();
        assert_eq!(span, "{\"a\": [1, 2");
    }
}
