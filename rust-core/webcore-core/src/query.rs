//! # Query Predicates
//!
//! The six-operator comparison language used by the record store.
//! A predicate names a field, an operator and a value; it is evaluated
//! against one record at a time.

use crate::value::{compare, Record, Value};
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// Comparison operator of a predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// Any other symbol; never matches
    Unsupported(String),
}

impl Operator {
    /// Parse an operator symbol
    ///
    /// Unknown symbols become `Operator::Unsupported` rather than an error.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "=" => Self::Eq,
            "!=" => Self::Ne,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            other => Self::Unsupported(other.to_string()),
        }
    }

    /// The symbol this operator was parsed from
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Unsupported(s) => s,
        }
    }

    /// Apply the operator to `(lhs, rhs)`
    ///
    /// Incomparable pairs only satisfy `!=`.
    #[must_use]
    pub fn apply(&self, lhs: &Value, rhs: &Value) -> bool {
        let ordering = compare(lhs, rhs);
        match self {
            Self::Eq => ordering == Some(Ordering::Equal),
            Self::Ne => ordering != Some(Ordering::Equal),
            Self::Gt => ordering == Some(Ordering::Greater),
            Self::Lt => ordering == Some(Ordering::Less),
            Self::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Self::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Self::Unsupported(_) => false,
        }
    }
}

impl From<&str> for Operator {
    fn from(symbol: &str) -> Self {
        Self::from_symbol(symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A `field operator value` filter
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    operator: Operator,
    value: Value,
}

impl Predicate {
    /// Create a predicate, e.g. `Predicate::new("id", ">", 1)`
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Self {
        let predicate = Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        };
        if let Operator::Unsupported(symbol) = &predicate.operator {
            warn!(
                field = %predicate.field,
                operator = %symbol,
                "Unsupported query operator, predicate will never match"
            );
        }
        predicate
    }

    /// Field the predicate inspects
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Operator of the predicate
    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Right-hand value of the predicate
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Evaluate against a record
    ///
    /// Returns `None` when the record lacks the field or holds `null` in
    /// it, so callers can tell "absent" apart from "present but not
    /// matching".
    #[must_use]
    pub fn evaluate(&self, record: &Record) -> Option<bool> {
        record
            .get(&self.field)
            .filter(|lhs| !lhs.is_null())
            .map(|lhs| self.operator.apply(lhs, &self.value))
    }

    /// True when the record has a non-null field and the operator holds
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.evaluate(record).unwrap_or(false)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}
