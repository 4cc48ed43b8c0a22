use serde_json::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    TrailingComma,
    UnterminatedString,
    UnexpectedToken,
    UnexpectedEnd,
    Other,
}

// Ordered case-insensitive substring match over the parser's message. The
// unterminated-string test must precede the generic end-of-input test: its
// message ("EOF while parsing a string") contains the generic prefix.
pub fn classify(err: &Error) -> FailureClass {
    let msg = err.to_string().to_ascii_lowercase();
    if msg.contains("trailing comma") {
        FailureClass::TrailingComma
    } else if msg.contains("eof while parsing a string") {
        FailureClass::UnterminatedString
    } else if msg.contains("key must be a string")
        || msg.contains("expected")
        || msg.contains("invalid")
        || msg.contains("control character")
    {
        FailureClass::UnexpectedToken
    } else if msg.contains("eof while parsing") {
        FailureClass::UnexpectedEnd
    } else {
        FailureClass::Other
    }
}
