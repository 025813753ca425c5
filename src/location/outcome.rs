use std::fmt;

/// Value returned by operations that degrade instead of failing.
///
/// The value is always complete and usable. `fallback` is set when a
/// degraded path was taken, so callers and tests can tell the difference
/// without inspecting the value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub fallback: Option<Fallback>,
}

/// Which degraded path produced an [`Outcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Percent-decoding failed; the raw input was used instead.
    MalformedEncoding { input: String, reason: String },
    /// The override could not be persisted or cleared.
    StorageUnavailable { reason: String },
    /// A persisted override could not be parsed and was ignored.
    CorruptOverride { reason: String },
}

impl<T> Outcome<T> {
    pub fn clean(value: T) -> Self {
        Self { value, fallback: None }
    }

    pub fn degraded(value: T, fallback: Fallback) -> Self {
        Self {
            value,
            fallback: Some(fallback),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            fallback: self.fallback,
        }
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::MalformedEncoding { input, reason } => {
                write!(f, "could not decode '{}': {}", input, reason)
            }
            Fallback::StorageUnavailable { reason } => write!(f, "override storage unavailable: {}", reason),
            Fallback::CorruptOverride { reason } => write!(f, "ignored corrupt override: {}", reason),
        }
    }
}
