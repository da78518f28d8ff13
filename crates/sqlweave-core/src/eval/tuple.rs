//! Named rows of values.

use core::fmt;
use std::collections::HashMap;

/// A tuple value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Value {
    /// Reads `text` as a number when it is finite numeric text, as text
    /// otherwise. Words such as `nan` or `inf` stay text.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let numeric = text.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
        match text.parse::<f64>() {
            Ok(n) if numeric && n.is_finite() => Self::Number(n),
            _ => Self::Text(String::from(text)),
        }
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// An ordered set of named attributes, each holding a value or nothing.
///
/// Lookup by index and by name always agree: the attribute at
/// `index_of(name)` is `name`.
///
/// ```
/// use sqlweave_core::eval::{Tuple, Value};
///
/// let mut tuple = Tuple::from_header("id, name, city");
/// tuple.set_row("7, Lee");
/// assert_eq!(tuple.get("id"), Some(&Value::Number(7.0)));
/// assert_eq!(tuple.to_string(), "[id = 7, name = Lee, city = (null)]");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tuple {
    names: Vec<String>,
    values: Vec<Option<Value>>,
    index: HashMap<String, usize>,
}

impl Tuple {
    /// Creates an empty tuple.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tuple with the comma-separated attribute names of `header`,
    /// all unset. Blank names are skipped.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        let mut tuple = Self::new();
        for name in fields(header) {
            tuple.declare(name);
        }
        tuple
    }

    /// Sets attribute values by position from comma-separated `row`. Fields
    /// that parse as numbers are stored as numbers. An empty field leaves its
    /// attribute unset. Fields past the last attribute are ignored.
    pub fn set_row(&mut self, row: &str) {
        for (slot, field) in self.values.iter_mut().zip(row.split(',').map(str::trim)) {
            *slot = (!field.is_empty()).then(|| Value::parse(field));
        }
    }

    /// Sets attribute values by position. Values past the last attribute are
    /// ignored.
    pub fn set_values(&mut self, values: impl IntoIterator<Item = Value>) {
        for (slot, value) in self.values.iter_mut().zip(values) {
            *slot = Some(value);
        }
    }

    /// Sets the value of `name`, appending the attribute if it is new.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let i = self.declare(name);
        self.values[i] = Some(value.into());
    }

    fn declare(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(String::from(name));
        self.values.push(None);
        self.index.insert(String::from(name), i);
        i
    }

    /// Returns the value of `name`, or `None` if it is absent or unset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.index_of(name).and_then(|i| self.get_index(i))
    }

    /// Returns the value at `index`, or `None` if it is out of range or unset.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Returns the attribute name at `index`.
    #[must_use]
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns the position of `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns true if `name` is an attribute, set or not.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the tuple has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim).filter(|field| !field.is_empty())
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, value)) in self.names.iter().zip(&self.values).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(value) => write!(f, "{name} = {value}")?,
                None => write!(f, "{name} = (null)")?,
            }
        }
        f.write_str("]")
    }
}
