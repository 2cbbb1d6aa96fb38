use serde::Serialize;
use serde_json::Value;

/// An exception-like value: a human-readable message plus an optional trace.
///
/// The trace of a wrapped `std::error::Error` is its source chain; a
/// sourceless error has no trace and falls back to its message wherever a
/// trace is expected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl ErrorInfo {
    /// Creates an exception value with no trace.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    /// Creates an exception value carrying a trace.
    pub fn with_trace(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: Some(trace.into()),
        }
    }

    /// Captures an error's message and source chain.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut trace = String::new();
        let mut source = err.source();
        while let Some(cause) = source {
            if !trace.is_empty() {
                trace.push('\n');
            }
            trace.push_str("caused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            trace: (!trace.is_empty()).then_some(trace),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// One argument of a console call.
///
/// The closed variant set drives the formatting rules: text passes through
/// verbatim, exception-like values additionally feed an entry's `details`,
/// and everything else renders as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleValue {
    /// Plain text, rendered verbatim.
    Text(String),
    /// Exception-like value.
    Error(ErrorInfo),
    /// Any other structured value.
    Data(Value),
}

impl ConsoleValue {
    /// Wraps an error, capturing its message and source chain.
    pub fn error(err: &(dyn std::error::Error + 'static)) -> Self {
        Self::Error(ErrorInfo::from_error(err))
    }

    /// Wraps any serializable value as structured data.
    ///
    /// Values that cannot be represented as JSON degrade to their debug
    /// text instead of failing.
    pub fn data<T: Serialize + std::fmt::Debug>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::Data(v),
            Err(_) => Self::Text(format!("{value:?}")),
        }
    }
}

impl From<&str> for ConsoleValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ConsoleValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for ConsoleValue {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

impl From<ErrorInfo> for ConsoleValue {
    fn from(info: ErrorInfo) -> Self {
        Self::Error(info)
    }
}

/// Builds a `[ConsoleValue; N]` argument list for a console call.
///
/// Strings pass through as text; `serde_json::Value` and [`ErrorInfo`]
/// arguments become structured and exception values.
#[macro_export]
macro_rules! console_args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::ConsoleValue::from($arg)),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer failed")]
    struct Outer {
        #[source]
        inner: Inner,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("inner broke")]
    struct Inner;

    #[test]
    fn from_error_captures_source_chain() {
        let err = Outer { inner: Inner };
        let info = ErrorInfo::from_error(&err);

        assert_eq!(info.message, "outer failed");
        assert_eq!(info.trace.as_deref(), Some("caused by: inner broke"));
    }

    #[test]
    fn from_error_without_source_has_no_trace() {
        let info = ErrorInfo::from_error(&Inner);

        assert_eq!(info.message, "inner broke");
        assert!(info.trace.is_none());
    }

    #[test]
    fn data_wraps_serializable_values() {
        let value = ConsoleValue::data(&serde_json::json!({"a": 1}));
        assert!(matches!(value, ConsoleValue::Data(_)));
    }

    #[test]
    fn data_falls_back_to_debug_text_when_unserializable() {
        #[derive(Debug)]
        struct Opaque;

        impl Serialize for Opaque {
            fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("not representable"))
            }
        }

        let value = ConsoleValue::data(&Opaque);
        assert_eq!(value, ConsoleValue::Text("Opaque".into()));
    }

    #[test]
    fn console_args_converts_mixed_arguments() {
        let args = console_args!["hello", serde_json::json!(42), ErrorInfo::new("oops")];

        assert_eq!(args[0], ConsoleValue::Text("hello".into()));
        assert_eq!(args[1], ConsoleValue::Data(serde_json::json!(42)));
        assert!(matches!(&args[2], ConsoleValue::Error(e) if e.message == "oops"));
    }
}
