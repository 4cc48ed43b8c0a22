use serde_json::Value;
use tracing::debug;

use crate::classify::{classify, FailureClass};
use crate::error::RepairError;
use crate::extract::extract_candidate;
use crate::normalize::{to_candidate, RepairInput};
use crate::strategies::{self, StrategyOutcome};
use crate::types::{RepairOptions, RepairResult};

#[derive(Debug, Clone)]
pub struct JsonRepairer {
    options: RepairOptions,
}

impl Default for JsonRepairer {
    fn default() -> Self {
        Self::new(RepairOptions::default())
    }
}

impl JsonRepairer {
    pub fn new(options: RepairOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RepairOptions {
        &self.options
    }

    pub fn repair(&self, input: impl Into<RepairInput>) -> RepairResult {
        let mut current = to_candidate(input.into());
        let mut repairs: Vec<String> = Vec::new();
        let mut attempts = 0;

        while attempts < self.options.max_attempts {
            let err = match serde_json::from_str::<Value>(&current) {
                Ok(_) => {
                    return RepairResult {
                        repaired: current,
                        success: true,
                        repairs,
                        error: None,
                    }
                }
                Err(err) => err,
            };

            let outcome = self.attempt_repair(&current, &err);
            if !outcome.modified {
                debug!(%err, attempts, "no strategy produced a change");
                return RepairResult {
                    repaired: current,
                    success: false,
                    repairs,
                    error: Some(RepairError::Unrepairable(err)),
                };
            }

            debug!(strategy = outcome.description, attempt = attempts, "applied repair");
            current = outcome.result;
            repairs.push(outcome.description.to_string());
            attempts += 1;
        }

        RepairResult {
            repaired: current,
            success: false,
            repairs,
            error: Some(RepairError::AttemptsExhausted {
                limit: self.options.max_attempts,
            }),
        }
    }

    fn attempt_repair(&self, text: &str, err: &serde_json::Error) -> StrategyOutcome {
        let opt = &self.options;
        match classify(err) {
            FailureClass::TrailingComma => strategies::remove_trailing_commas(text, opt),
            FailureClass::UnterminatedString => strategies::fix_unterminated_strings(text),
            FailureClass::UnexpectedToken => first_modification(
                text,
                vec![
                    Box::new(|| extract_candidate(text, opt)),
                    Box::new(|| strategies::fix_unquoted_keys(text, opt)),
                    Box::new(|| strategies::fix_single_quotes(text, opt)),
                    Box::new(|| strategies::fix_missing_commas(text)),
                    Box::new(|| strategies::fix_escaped_quotes(text, opt)),
                    Box::new(|| strategies::remove_invalid_characters(text)),
                ],
            ),
            FailureClass::UnexpectedEnd => strategies::balance_brackets(text, opt),
            FailureClass::Other => first_modification(
                text,
                vec![
                    Box::new(|| extract_candidate(text, opt)),
                    Box::new(|| strategies::general_fixes(text)),
                ],
            ),
        }
    }
}

type Strategy<'a> = Box<dyn Fn() -> StrategyOutcome + 'a>;

fn first_modification(text: &str, chain: Vec<Strategy<'_>>) -> StrategyOutcome {
    for strategy in &chain {
        let outcome = strategy();
        if outcome.modified {
            return outcome;
        }
    }
    StrategyOutcome::unchanged(text)
}

pub fn repair_json(input: impl Into<RepairInput>, options: Option<&RepairOptions>) -> RepairResult {
    let options = options.cloned().unwrap_or_default();
    JsonRepairer::new(options).repair(input)
}

/// Repair a reply that carries one JSON document per line, as some upstream
/// generators emit. Blank lines are skipped; results keep line order.
pub fn repair_lines(input: &str, options: Option<&RepairOptions>) -> Vec<RepairResult> {
    let options = options.cloned().unwrap_or_default();
    let engine = JsonRepairer::new(options);
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| engine.repair(line.trim()))
        .collect()
}
