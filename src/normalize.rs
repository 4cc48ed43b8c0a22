use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum RepairInput {
    Text(String),
    Value(Value),
}

impl From<&str> for RepairInput {
    fn from(s: &str) -> Self {
        RepairInput::Text(s.to_string())
    }
}

impl From<String> for RepairInput {
    fn from(s: String) -> Self {
        RepairInput::Text(s)
    }
}

impl From<Value> for RepairInput {
    fn from(v: Value) -> Self {
        RepairInput::Value(v)
    }
}

impl From<&Value> for RepairInput {
    fn from(v: &Value) -> Self {
        RepairInput::Value(v.clone())
    }
}

/// Total: every input yields a candidate string, never an error.
pub fn to_candidate(input: RepairInput) -> String {
    match input {
        // A string is assumed to already be a (possibly malformed) JSON document.
        RepairInput::Text(s) => s.trim().to_string(),
        RepairInput::Value(v) => serde_json::to_string(&v).unwrap_or_else(|_| render_value(&v)),
    }
}

// Fallback renderer for values the serializer rejects. String contents are
// emitted without escaping; quotes inside them land in the candidate raw and
// are left to the repair strategies.
pub(crate) fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let pairs: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("\"{k}\": {}", render_value(v)))
                .collect();
            format!("{{{}}}", pairs.join(", "))
        }
    }
}
