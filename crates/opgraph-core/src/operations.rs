//! Operation dictionary: named column reducers.
//!
//! A reducer folds one column into one value. Numeric reducers take `f64`
//! cells and produce a number; text reducers take string cells and produce
//! a string. Calling a reducer with the other kind of input is a
//! [`Error::TypeMismatch`].

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};

type NumericFn = Box<dyn Fn(&[f64]) -> Option<f64> + Send + Sync>;
type TextFn = Box<dyn Fn(&[String]) -> Option<String> + Send + Sync>;

/// Input kind a reducer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReducerKind {
    /// Numeric cells to a number.
    Numeric,
    /// Text cells to a string.
    Text,
}

impl ReducerKind {
    /// Returns the input kind as a word.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ReducerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Reducer {
    Numeric(NumericFn),
    Text(TextFn),
}

impl Reducer {
    fn kind(&self) -> ReducerKind {
        match self {
            Self::Numeric(_) => ReducerKind::Numeric,
            Self::Text(_) => ReducerKind::Text,
        }
    }
}

/// Registry of reducers by name.
///
/// Reducers return `None` when they are undefined on their input, which
/// surfaces as [`Error::EmptyColumn`].
#[derive(Default)]
pub struct OperationRegistry {
    reducers: IndexMap<String, Reducer>,
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl OperationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in reducers:
    /// `sum`, `average`, `min`, `max`, `count` and `concatenate`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_numeric("sum", |cells| Some(cells.iter().sum()));
        registry.register_numeric("average", |cells| {
            (!cells.is_empty()).then(|| cells.iter().sum::<f64>() / cells.len() as f64)
        });
        registry.register_numeric("min", |cells| cells.iter().copied().reduce(f64::min));
        registry.register_numeric("max", |cells| cells.iter().copied().reduce(f64::max));
        registry.register_numeric("count", |cells| Some(cells.len() as f64));
        registry.register_text("concatenate", |cells| Some(cells.concat()));
        registry
    }

    /// Registers (or replaces) a numeric reducer.
    pub fn register_numeric<F>(&mut self, name: impl Into<String>, reducer: F)
    where
        F: Fn(&[f64]) -> Option<f64> + Send + Sync + 'static,
    {
        self.reducers
            .insert(name.into(), Reducer::Numeric(Box::new(reducer)));
    }

    /// Registers (or replaces) a text reducer.
    pub fn register_text<F>(&mut self, name: impl Into<String>, reducer: F)
    where
        F: Fn(&[String]) -> Option<String> + Send + Sync + 'static,
    {
        self.reducers
            .insert(name.into(), Reducer::Text(Box::new(reducer)));
    }

    /// Returns true if a reducer with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.reducers.contains_key(name)
    }

    /// Returns the input kind of a registered reducer.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<ReducerKind> {
        self.reducers.get(name).map(Reducer::kind)
    }

    /// Returns reducer names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.reducers.keys().map(String::as_str).collect()
    }

    /// Applies a numeric reducer.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` for an unknown name, `TypeMismatch` when the
    /// reducer takes text, `EmptyColumn` when it is undefined on `cells`.
    pub fn invoke_numeric(&self, name: &str, cells: &[f64]) -> Result<f64> {
        match self.lookup(name)? {
            Reducer::Numeric(reducer) => {
                reducer(cells).ok_or_else(|| Error::EmptyColumn(name.to_string()))
            }
            Reducer::Text(_) => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: ReducerKind::Numeric.as_str(),
            }),
        }
    }

    /// Applies a text reducer.
    ///
    /// # Errors
    ///
    /// `OperationNotFound` for an unknown name, `TypeMismatch` when the
    /// reducer takes numbers, `EmptyColumn` when it is undefined on `cells`.
    pub fn invoke_text(&self, name: &str, cells: &[String]) -> Result<String> {
        match self.lookup(name)? {
            Reducer::Text(reducer) => {
                reducer(cells).ok_or_else(|| Error::EmptyColumn(name.to_string()))
            }
            Reducer::Numeric(_) => Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: ReducerKind::Text.as_str(),
            }),
        }
    }

    fn lookup(&self, name: &str) -> Result<&Reducer> {
        self.reducers
            .get(name)
            .ok_or_else(|| Error::OperationNotFound(name.to_string()))
    }
}
