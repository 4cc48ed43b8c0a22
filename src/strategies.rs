use std::sync::LazyLock;

use regex::Regex;

use crate::types::RepairOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutcome {
    pub result: String,
    /// Computed by string inequality; a transform that returns its input
    /// unchanged is a no-op even if it logically ran.
    pub modified: bool,
    pub description: &'static str,
}

impl StrategyOutcome {
    pub(crate) fn rewrite(original: &str, result: String, description: &'static str) -> Self {
        let modified = result != original;
        Self {
            result,
            modified,
            description,
        }
    }

    pub(crate) fn unchanged(text: &str) -> Self {
        Self {
            result: text.to_string(),
            modified: false,
            description: "",
        }
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("strategy pattern must compile")
}

static TRAILING_COMMA: LazyLock<Regex> = LazyLock::new(|| re(r",(\s*[}\]])"));

static NEXT_LINE_STRUCTURAL: LazyLock<Regex> = LazyLock::new(|| re(r"^\s*[},\]]"));
static LINE_END_STRUCTURAL: LazyLock<Regex> = LazyLock::new(|| re(r"(\s*[},\]]\s*)$"));
static OPEN_STRING_NEWLINE: LazyLock<Regex> = LazyLock::new(|| re(r#"("([^"\\]|\\.)*)\n"#));
static OPEN_STRING_STRUCTURAL: LazyLock<Regex> =
    LazyLock::new(|| re(r#"("([^"\\]|\\.)*)\s*([},\]])"#));
static OPEN_STRING_EOF: LazyLock<Regex> = LazyLock::new(|| re(r#"("([^"\\]|\\.)*)$"#));

static KEY_AFTER_BRACE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:"));
static KEY_AFTER_COMMA: LazyLock<Regex> =
    LazyLock::new(|| re(r",\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:"));
static KEY_AFTER_NESTED_BRACE: LazyLock<Regex> =
    LazyLock::new(|| re(r":\s*\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*:"));

static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| re(r"'([^'\\]*(\\.[^'\\]*)*)'"));
static ESCAPED_SINGLE_QUOTE: LazyLock<Regex> = LazyLock::new(|| re(r"\\'"));

static COMMA_AFTER_STRING: LazyLock<Regex> = LazyLock::new(|| re(r#"(":\s*"[^"]*")\s+""#));
static COMMA_AFTER_NUMBER: LazyLock<Regex> = LazyLock::new(|| re(r#"(":\s*\d+)\s+""#));
static COMMA_AFTER_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| re(r#"(":\s*(?:true|false|null))\s+""#));
static COMMA_AFTER_OBJECT: LazyLock<Regex> = LazyLock::new(|| re(r#"(":\s*\{[^}]*\})\s+""#));
static COMMA_AFTER_ARRAY: LazyLock<Regex> = LazyLock::new(|| re(r#"(":\s*\[[^\]]*\])\s+""#));
static COMMA_BARE_KEY_STRING: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"([A-Za-z_$][A-Za-z0-9_$]*\s*:\s*"[^"]*")\s+([A-Za-z_$][A-Za-z0-9_$]*\s*:)"#)
});
static COMMA_BARE_KEY_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"([A-Za-z_$][A-Za-z0-9_$]*\s*:\s*\d+)\s+([A-Za-z_$][A-Za-z0-9_$]*\s*:)")
});
static COMMA_BARE_KEY_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"([A-Za-z_$][A-Za-z0-9_$]*\s*:\s*(?:true|false|null))\s+([A-Za-z_$][A-Za-z0-9_$]*\s*:)")
});

static ESCAPED_QUOTE: LazyLock<Regex> = LazyLock::new(|| re(r#"\\""#));
static QUOTE_QUAD: LazyLock<Regex> = LazyLock::new(|| re(r#""([^"]*)"([^"]*)"([^"]*)""#));

static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| re(r"[\x00-\x1F\x7F]"));

static EXCESS_BRACE: LazyLock<Regex> = LazyLock::new(|| re(r"\}\s*$"));
static EXCESS_BRACKET: LazyLock<Regex> = LazyLock::new(|| re(r"\]\s*$"));

pub fn remove_trailing_commas(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.remove_trailing_commas {
        return StrategyOutcome::unchanged(text);
    }
    let fixed = TRAILING_COMMA.replace_all(text, "$1").into_owned();
    StrategyOutcome::rewrite(text, fixed, "Removed trailing commas")
}

// Line-oriented scan tracking in-string and escape state; a line that ends
// inside an open quote gets a closing quote when it is the last line or the
// next line opens with a structural token.
pub fn fix_unterminated_strings(text: &str) -> StrategyOutcome {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut repaired_lines: Vec<String> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let mut in_string = false;
        let mut escaped = false;
        for ch in line.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            if ch == '\\' {
                escaped = true;
                continue;
            }
            if ch == '"' {
                in_string = !in_string;
            }
        }

        if in_string {
            let next_line_structural = lines
                .get(i + 1)
                .map(|next| NEXT_LINE_STRUCTURAL.is_match(next))
                .unwrap_or(false);
            if next_line_structural || i == lines.len() - 1 {
                // Close before any trailing structural characters.
                repaired_lines.push(LINE_END_STRUCTURAL.replace(line, "\"${1}").into_owned());
                continue;
            }
        }
        repaired_lines.push((*line).to_string());
    }

    let mut fixed = repaired_lines.join("\n");

    // The line pass missed; fall back to pattern-based closing-quote insertion.
    if fixed == text {
        fixed = OPEN_STRING_NEWLINE.replace_all(&fixed, "${1}\"\n").into_owned();
        fixed = OPEN_STRING_STRUCTURAL
            .replace_all(&fixed, "${1}\"${3}")
            .into_owned();
        fixed = OPEN_STRING_EOF.replace_all(&fixed, "${1}\"").into_owned();
    }

    StrategyOutcome::rewrite(
        text,
        fixed,
        "Fixed unterminated strings by adding missing quotes",
    )
}

pub fn fix_unquoted_keys(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.fix_unquoted_keys {
        return StrategyOutcome::unchanged(text);
    }
    let mut fixed = KEY_AFTER_BRACE.replace_all(text, "{\"${1}\":").into_owned();
    fixed = KEY_AFTER_COMMA.replace_all(&fixed, ", \"${1}\":").into_owned();
    fixed = KEY_AFTER_NESTED_BRACE
        .replace_all(&fixed, ": {\"${1}\":")
        .into_owned();
    StrategyOutcome::rewrite(text, fixed, "Added quotes around unquoted object keys")
}

pub fn fix_single_quotes(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.fix_single_quotes {
        return StrategyOutcome::unchanged(text);
    }
    let mut fixed = SINGLE_QUOTED.replace_all(text, "\"${1}\"").into_owned();
    // Escaped single quotes are redundant once the delimiters are double quotes.
    fixed = ESCAPED_SINGLE_QUOTE.replace_all(&fixed, "'").into_owned();
    StrategyOutcome::rewrite(text, fixed, "Converted single quotes to double quotes")
}

pub fn fix_missing_commas(text: &str) -> StrategyOutcome {
    let mut fixed = COMMA_AFTER_STRING.replace_all(text, "${1}, \"").into_owned();
    fixed = COMMA_AFTER_NUMBER.replace_all(&fixed, "${1}, \"").into_owned();
    fixed = COMMA_AFTER_LITERAL.replace_all(&fixed, "${1}, \"").into_owned();
    fixed = COMMA_AFTER_OBJECT.replace_all(&fixed, "${1}, \"").into_owned();
    fixed = COMMA_AFTER_ARRAY.replace_all(&fixed, "${1}, \"").into_owned();

    fixed = COMMA_BARE_KEY_STRING
        .replace_all(&fixed, "${1}, ${2}")
        .into_owned();
    fixed = COMMA_BARE_KEY_NUMBER
        .replace_all(&fixed, "${1}, ${2}")
        .into_owned();
    fixed = COMMA_BARE_KEY_LITERAL
        .replace_all(&fixed, "${1}, ${2}")
        .into_owned();

    StrategyOutcome::rewrite(text, fixed, "Added missing commas between object properties")
}

pub fn fix_escaped_quotes(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.fix_escaped_quotes {
        return StrategyOutcome::unchanged(text);
    }
    let stripped = ESCAPED_QUOTE.replace_all(text, "\"").into_owned();
    // Re-escape quotes that sit strictly inside what reads as a single string
    // value; a middle segment holding ':' or ',' likely spans JSON elements.
    let fixed = QUOTE_QUAD
        .replace_all(&stripped, |caps: &regex::Captures<'_>| {
            let middle = &caps[2];
            if middle.contains(':') || middle.contains(',') {
                caps[0].to_string()
            } else {
                format!("\"{}\\\"{}\\\"{}\"", &caps[1], middle, &caps[3])
            }
        })
        .into_owned();
    StrategyOutcome::rewrite(text, fixed, "Fixed escaped quotes")
}

pub fn remove_invalid_characters(text: &str) -> StrategyOutcome {
    let mut fixed = CONTROL_CHARS.replace_all(text, "").into_owned();
    fixed = TRAILING_COMMA.replace_all(&fixed, "$1").into_owned();
    StrategyOutcome::rewrite(text, fixed, "Removed invalid characters")
}

// Counts are raw character counts; quotes are not honored here, matching the
// heuristic nature of the pass.
pub fn balance_brackets(text: &str, options: &RepairOptions) -> StrategyOutcome {
    if !options.balance_brackets {
        return StrategyOutcome::unchanged(text);
    }

    let open_braces = text.matches('{').count();
    let close_braces = text.matches('}').count();
    let open_brackets = text.matches('[').count();
    let close_brackets = text.matches(']').count();

    let mut fixed = text.to_string();
    if open_braces > close_braces {
        fixed.push_str(&"}".repeat(open_braces - close_braces));
    }
    if open_brackets > close_brackets {
        fixed.push_str(&"]".repeat(open_brackets - close_brackets));
    }

    if close_braces > open_braces {
        for _ in 0..close_braces - open_braces {
            fixed = EXCESS_BRACE.replace(&fixed, "").into_owned();
        }
    }
    if close_brackets > open_brackets {
        for _ in 0..close_brackets - open_brackets {
            fixed = EXCESS_BRACKET.replace(&fixed, "").into_owned();
        }
    }

    StrategyOutcome::rewrite(
        text,
        fixed,
        "Balanced braces and brackets for object structure",
    )
}

pub fn general_fixes(text: &str) -> StrategyOutcome {
    let mut fixed = text.trim().to_string();
    if !fixed.starts_with('{') {
        fixed.insert(0, '{');
    }
    if !fixed.ends_with('}') {
        fixed.push('}');
    }
    StrategyOutcome::rewrite(
        text,
        fixed,
        "Applied general fixes (ensured object structure)",
    )
}
