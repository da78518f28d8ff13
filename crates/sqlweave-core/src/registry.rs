//! Function and aggregate registry.
//!
//! The parser consults the registry to decide whether `name(` starts a
//! function call and how many arguments it takes; the formatter consults it
//! to render calls as `NAME(a,b)`. A registry is shared between them through
//! an [`Arc`](std::sync::Arc) and can be extended while both hold it.

use core::fmt;
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::debug;

/// Aggregates every registry starts with.
pub const BUILTIN_AGGREGATES: [&str; 5] = ["SUM", "AVG", "MIN", "MAX", "COUNT"];

static SEEDED: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Number of arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arity {
    /// Exactly this many arguments.
    Fixed(usize),
    /// Any number of arguments.
    Variadic,
}

impl Arity {
    /// Converts a signed arity; negative values mean one argument.
    #[must_use]
    pub fn from_signed(arity: i32) -> Self {
        Self::Fixed(usize::try_from(arity).unwrap_or(1))
    }

    /// Returns true if a call with `count` arguments is valid.
    #[must_use]
    pub const fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Fixed(n) => *n == count,
            Self::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Variadic => f.write_str("any number of"),
        }
    }
}

/// A function to register, as read from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionSpec {
    /// Function name; matched case-insensitively.
    pub name: String,
    /// Accepted argument count.
    pub arity: Arity,
}

impl FunctionSpec {
    /// Creates a fixed-arity function spec. Negative arities mean one argument.
    #[must_use]
    pub fn new(name: impl Into<String>, arity: i32) -> Self {
        Self {
            name: name.into(),
            arity: Arity::from_signed(arity),
        }
    }

    /// Creates a spec for a function taking any number of arguments.
    #[must_use]
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: Arity::Variadic,
        }
    }
}

/// Map of function names to arities.
///
/// Names are stored uppercased. A new registry holds the built-in aggregates
/// `SUM`, `AVG`, `MIN`, `MAX` and `COUNT`, each taking one argument.
#[derive(Debug)]
pub struct Registry {
    functions: RwLock<HashMap<String, Arity>>,
}

impl Registry {
    /// Creates a registry holding the built-in aggregates.
    #[must_use]
    pub fn new() -> Self {
        let functions = BUILTIN_AGGREGATES
            .iter()
            .map(|name| (String::from(*name), Arity::Fixed(1)))
            .collect();
        Self {
            functions: RwLock::new(functions),
        }
    }

    /// Creates a registry holding the built-in aggregates plus `specs`.
    #[must_use]
    pub fn from_specs(specs: impl IntoIterator<Item = FunctionSpec>) -> Self {
        let registry = Self::new();
        for spec in specs {
            registry.insert(&spec.name, spec.arity);
        }
        registry
    }

    /// Returns the shared registry that holds only the built-in aggregates.
    /// `Display` implementations render with it.
    pub(crate) fn seeded() -> &'static Self {
        &SEEDED
    }

    /// Registers `name` with a fixed arity. Negative arities mean one
    /// argument. Registering an existing name replaces its arity.
    pub fn register(&self, name: &str, arity: i32) {
        self.insert(name, Arity::from_signed(arity));
    }

    /// Registers `name` as accepting any number of arguments.
    pub fn register_variadic(&self, name: &str) {
        self.insert(name, Arity::Variadic);
    }

    fn insert(&self, name: &str, arity: Arity) {
        let name = name.trim().to_ascii_uppercase();
        debug!(function = %name, ?arity, "registering function");
        self.functions.write().insert(name, arity);
    }

    /// Returns the arity of `name`, or `None` if it is not registered.
    #[must_use]
    pub fn arity(&self, name: &str) -> Option<Arity> {
        self.functions
            .read()
            .get(&name.trim().to_ascii_uppercase())
            .copied()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn is_function(&self, name: &str) -> bool {
        self.arity(name).is_some()
    }

    /// Returns true if `name` is one of the built-in aggregates.
    #[must_use]
    pub fn is_builtin_aggregate(name: &str) -> bool {
        let name = name.trim();
        BUILTIN_AGGREGATES
            .iter()
            .any(|builtin| builtin.eq_ignore_ascii_case(name))
    }

    /// Returns the function name that starts `text`, if `text` reads as a
    /// call to a registered function (`SUM(PRICE)` gives `SUM`).
    #[must_use]
    pub fn aggregate_call(&self, text: &str) -> Option<String> {
        let open = text.find('(').filter(|&pos| pos > 0)?;
        let call = text[..open].trim();
        self.is_function(call).then(|| String::from(call))
    }

    /// Returns the registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.functions.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.read().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Registry {
    fn clone(&self) -> Self {
        Self {
            functions: RwLock::new(self.functions.read().clone()),
        }
    }
}
