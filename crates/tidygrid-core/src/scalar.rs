//! Scalar cell values

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Represents the value carried by a single grid cell
///
/// Workbook-level richness (formulas, cached results, merged spans, dates)
/// is resolved by whatever produced the input; a grid only ever holds these
/// four kinds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Scalar {
    /// Empty cell (no value; never stored inside a [`Grid`](crate::Grid))
    Empty,

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Text value
    Text(SharedString),
}

impl Scalar {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Scalar::Text(SharedString::new(s.into()))
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Empty)
    }

    /// Check if the value is text
    pub fn is_text(&self) -> bool {
        matches!(self, Scalar::Text(_))
    }

    /// Check if the value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Number(_))
    }

    /// Check if the value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, Scalar::Boolean(_))
    }

    /// Try to get the value as a number
    ///
    /// Booleans coerce to 1.0/0.0; text never does, even when it looks
    /// numeric. Callers that want parsing must do it themselves.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Boolean(true) => Some(1.0),
            Scalar::Boolean(false) => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            Scalar::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Try to get the value as a text slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Empty => "empty",
            Scalar::Boolean(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "text",
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Empty
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Empty => write!(f, ""),
            Scalar::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s.as_str()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::text(s)
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::text(s)
    }
}

impl From<SharedString> for Scalar {
    fn from(s: SharedString) -> Self {
        Scalar::Text(s)
    }
}

/// Interned string for memory efficiency
///
/// Strings repeat heavily across header cells (month names, category
/// labels). Using Arc<str> allows sharing the same string data across every
/// output row that carries the label.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    /// Create a new shared string
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    /// Get the string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the length of the string
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the string is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SharedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SharedString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SharedString::new(s))
    }
}

/// String pool for deduplicating strings
///
/// Messy report sheets repeat the same labels over and over. The pool
/// ensures each unique string is stored only once in memory, no matter how
/// many cells carry it.
#[derive(Debug, Default)]
pub struct StringPool {
    strings: HashMap<Arc<str>, SharedString>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a shared string
    ///
    /// If the string already exists in the pool, returns a clone of the existing SharedString.
    /// Otherwise, creates a new SharedString and adds it to the pool.
    pub fn intern<S: AsRef<str>>(&mut self, s: S) -> SharedString {
        let s = s.as_ref();
        if let Some(shared) = self.strings.get(s) {
            shared.clone()
        } else {
            let arc: Arc<str> = Arc::from(s);
            let shared = SharedString(arc.clone());
            self.strings.insert(arc, shared.clone());
            shared
        }
    }

    /// Rebuild a scalar so any text it carries is pooled
    ///
    /// Non-text scalars pass through unchanged.
    pub fn intern_scalar(&mut self, scalar: Scalar) -> Scalar {
        match scalar {
            Scalar::Text(s) => Scalar::Text(self.intern(s.as_str())),
            other => other,
        }
    }

    /// Get the number of unique strings in the pool
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Clear all strings from the pool
    pub fn clear(&mut self) {
        self.strings.clear();
    }
}
