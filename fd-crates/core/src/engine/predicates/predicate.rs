use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::engine::variables::DomainId;

/// The relation a [`Predicate`] states between its domain and its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `[x >= v]`
    AtLeast,
    /// `[x <= v]`
    AtMost,
    /// `[x == v]`
    Equal,
    /// `[x != v]`
    NotEqual,
}

impl Comparison {
    fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
        }
    }
}

/// An atomic constraint over a single [`DomainId`].
///
/// Decisions and propagations both act on domains through predicates, so every trail entry is
/// labelled with one.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Predicate {
    domain: DomainId,
    comparison: Comparison,
    value: i32,
}

impl Predicate {
    pub fn new(domain: DomainId, comparison: Comparison, value: i32) -> Predicate {
        Predicate {
            domain,
            comparison,
            value,
        }
    }

    pub fn domain(&self) -> DomainId {
        self.domain
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Domain 0 is the constant fixed to one at the root, so `[d0 == 1]` always holds.
    pub fn always_true() -> Predicate {
        Predicate::new(DomainId::new(0), Comparison::Equal, 1)
    }

    pub fn always_false() -> Predicate {
        !Predicate::always_true()
    }
}

impl std::ops::Not for Predicate {
    type Output = Predicate;

    fn not(self) -> Self::Output {
        let (comparison, value) = match self.comparison {
            Comparison::AtLeast => (Comparison::AtMost, self.value - 1),
            Comparison::AtMost => (Comparison::AtLeast, self.value + 1),
            Comparison::Equal => (Comparison::NotEqual, self.value),
            Comparison::NotEqual => (Comparison::Equal, self.value),
        };
        Predicate::new(self.domain, comparison, value)
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if *self == Predicate::always_true() {
            return write!(f, "[True]");
        }
        if *self == Predicate::always_false() {
            return write!(f, "[False]");
        }
        write!(
            f,
            "[{} {} {}]",
            self.domain,
            self.comparison.symbol(),
            self.value
        )
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}
