//! Binary [`Relations`](Relation).

use crate::prelude::*;

/// A binary relation, i.e. a set of [`OrderedPairs`](OrderedPair).
///
/// Relations are built by [`Set::product`], or from a set already known to hold only pairs. The
/// constructor doesn't check this: elements that aren't pairs are simply skipped by the
/// relation-specific methods, though they still take part in equality.
///
/// Two relations are equal whenever their sets of pairs are.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Relation(Set);

impl AsRef<Set> for Relation {
    fn as_ref(&self) -> &Set {
        &self.0
    }
}

impl From<Relation> for Set {
    fn from(relation: Relation) -> Self {
        relation.0
    }
}

impl FromIterator<OrderedPair> for Relation {
    fn from_iter<I: IntoIterator<Item = OrderedPair>>(iter: I) -> Self {
        Self(iter.into_iter().map(Value::Pair).collect())
    }
}

impl Debug for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_tuple("Relation").field(&self.0).finish()
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl Relation {
    /// Wraps a set of pairs into a relation.
    #[must_use]
    pub const fn new(pairs: Set) -> Self {
        Self(pairs)
    }

    /// The underlying set of pairs.
    #[must_use]
    pub const fn as_set(&self) -> &Set {
        &self.0
    }

    /// Returns the underlying set of pairs.
    #[must_use]
    pub fn into_set(self) -> Set {
        self.0
    }

    /// The number of pairs.
    #[must_use]
    pub fn card(&self) -> usize {
        self.0.card()
    }

    /// Iterates over the pairs in the relation.
    pub fn pairs(&self) -> impl Iterator<Item = &OrderedPair> {
        self.0.iter().filter_map(Value::as_pair)
    }

    /// Whether x R y.
    #[must_use]
    pub fn contains_pair(&self, fst: &Value, snd: &Value) -> bool {
        self.pairs()
            .any(|pair| pair.first() == fst && pair.second() == snd)
    }

    /// The domain {x : ∃y, x R y}.
    #[must_use]
    pub fn domain(&self) -> Set {
        self.pairs().map(|pair| pair.first().clone()).collect()
    }

    /// The range {y : ∃x, x R y}.
    #[must_use]
    pub fn range(&self) -> Set {
        self.pairs().map(|pair| pair.second().clone()).collect()
    }

    /// The inverse relation {(y, x) : x R y}.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.pairs().map(OrderedPair::swap).collect()
    }

    /// The composition {(x, z) : ∃y, x R y ∧ y S z}, where R is `self` and S is `other`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        self.pairs()
            .flat_map(move |fst| {
                other
                    .pairs()
                    .filter(move |snd| fst.second() == snd.first())
                    .map(move |snd| OrderedPair::new(fst.first().clone(), snd.second().clone()))
            })
            .collect()
    }
}
