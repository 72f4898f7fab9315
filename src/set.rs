//! Finite sets [`Set`].

use crate::{prelude::*, utils::Elements, value::write_seq};
use derive_more::Display;
use std::ops::{BitAnd, BitOr, Sub};

/// Error in a set operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum SetError {
    /// An operation that builds a set was handed something other than a set.
    #[display(fmt = "Argument must be a Set")]
    InvalidOperand,
    /// An element was requested from an empty collection.
    #[display(fmt = "collection is empty")]
    EmptyCollection,
    /// A set was expected to be a Kuratowski pair {{a}, {a, b}}, but isn't.
    #[display(fmt = "set is not a Kuratowski pair")]
    NotAPair,
}

impl std::error::Error for SetError {}

/// A finite set of arbitrary [`Values`](Value).
///
/// Sets are immutable: every operation that "changes" a set returns a new one. The storage is
/// shared behind an [`Arc`], so cloning a set is cheap, and sets may be read from any number of
/// threads.
///
/// Elements are iterated in the order they were first inserted. This order is not part of
/// equality: two sets are equal whenever they have the same elements.
///
/// ## Invariants
///
/// Every two elements in a [`Set`] are distinct. This is upheld by the underlying [`Elements`].
#[derive(Clone, Default)]
pub struct Set(Arc<Elements>);

// -------------------- Basic traits -------------------- //

/// Two sets are equal when each is a subset of the other.
impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.card() == other.card()
                && self.0.digest() == other.0.digest()
                && self.subset_of(other))
    }
}

impl Eq for Set {}

impl PartialEq<Value> for Set {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

/// Hashes the cardinality and the cached digest, so that hashing nested sets takes constant time.
impl Hash for Set {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.card().hash(state);
        self.0.digest().hash(state);
    }
}

impl Debug for Set {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Displays a set in roster notation, in insertion order. The empty set is written as `∅`.
impl Display for Set {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_char('∅');
        }

        f.write_char('{')?;
        write_seq(f, self)?;
        f.write_char('}')
    }
}

/// Parses a set from roster notation, see [`Value::from_str`].
impl FromStr for Set {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s.parse::<Value>()? {
            Value::Set(set) => Ok(set),
            _ => Err(ParseError {
                pos: 0,
                expected: "set",
            }),
        }
    }
}

impl FromIterator<Value> for Set {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

impl From<Vec<Value>> for Set {
    fn from(vec: Vec<Value>) -> Self {
        vec.into_iter().collect()
    }
}

impl From<Set> for Vec<Value> {
    fn from(set: Set) -> Self {
        Arc::unwrap_or_clone(set.0).into_vec()
    }
}

impl IntoIterator for Set {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        Vec::from(self).into_iter()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -------------------- Basic methods -------------------- //

impl Set {
    /// The empty set ∅.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Singleton set {x}.
    pub fn singleton<V: Into<Value>>(value: V) -> Self {
        Self::new().insert(value)
    }

    /// Set pair {x, y}. This is a singleton when x = y.
    pub fn pair<V: Into<Value>, W: Into<Value>>(fst: V, snd: W) -> Self {
        Self::singleton(fst).insert(snd)
    }

    /// Set cardinality.
    #[must_use]
    pub fn card(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The elements as a slice, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        self.0.as_slice()
    }

    /// Copies the elements into a vector, in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Value> {
        self.as_slice().to_vec()
    }

    /// Iterate over the elements of the set, in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    /// Set membership ∈.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    /// [Chooses](https://en.wikipedia.org/wiki/Axiom_of_choice) an arbitrary element from the set.
    ///
    /// The choice is the first element in insertion order, so that asking the same set twice
    /// always gives back the same element.
    pub fn choose(&self) -> Result<&Value, SetError> {
        self.as_slice().first().ok_or(SetError::EmptyCollection)
    }

    /// Set insertion x ∪ {y}.
    #[must_use]
    pub fn insert<V: Into<Value>>(mut self, value: V) -> Self {
        let value = value.into();
        if !self.contains(&value) {
            Arc::make_mut(&mut self.0).push(value);
        }
        self
    }

    /// Set removal x - {y}.
    #[must_use]
    pub fn remove(self, value: &Value) -> Self {
        if self.contains(value) {
            self.iter().filter(|el| *el != value).cloned().collect()
        } else {
            self
        }
    }

    /// Set specification, i.e. the subset of elements satisfying a predicate.
    #[must_use]
    pub fn select<P: FnMut(&Value) -> bool>(&self, mut pred: P) -> Self {
        self.iter().filter(|el| pred(el)).cloned().collect()
    }
}

// -------------------- Algebra -------------------- //

impl Set {
    /// Union x ∪ y between sets.
    fn union_set(&self, other: &Self) -> Self {
        let mut union = Elements::clone(&self.0);
        union.extend(other.iter().cloned());
        Self(Arc::new(union))
    }

    /// Intersection x ∩ y between sets.
    fn inter_set(&self, other: &Self) -> Self {
        self.select(|el| other.contains(el))
    }

    /// Difference x - y between sets.
    fn difference_set(&self, other: &Self) -> Self {
        self.select(|el| !other.contains(el))
    }

    /// Union x ∪ y.
    ///
    /// Fails with [`SetError::InvalidOperand`] if `other` is not a set.
    pub fn union<O: Operand + ?Sized>(&self, other: &O) -> Result<Self, SetError> {
        Ok(self.union_set(other.try_operand()?))
    }

    /// Intersection x ∩ y.
    ///
    /// Fails with [`SetError::InvalidOperand`] if `other` is not a set.
    pub fn inter<O: Operand + ?Sized>(&self, other: &O) -> Result<Self, SetError> {
        Ok(self.inter_set(other.try_operand()?))
    }

    /// Difference x - y.
    ///
    /// Fails with [`SetError::InvalidOperand`] if `other` is not a set.
    pub fn difference<O: Operand + ?Sized>(&self, other: &O) -> Result<Self, SetError> {
        Ok(self.difference_set(other.try_operand()?))
    }

    /// Cartesian product x × y, as the relation of all pairs (a, b) with a ∈ x and b ∈ y.
    ///
    /// Pairs are ordered by the elements of `self` first, then by those of `other`. Fails with
    /// [`SetError::InvalidOperand`] if `other` is not a set.
    pub fn product<O: Operand + ?Sized>(&self, other: &O) -> Result<Relation, SetError> {
        let other = other.try_operand()?;
        tracing::trace!(
            fst = self.card(),
            snd = other.card(),
            "building cartesian product"
        );

        let pairs = self
            .iter()
            .flat_map(|a| {
                other
                    .iter()
                    .map(move |b| Value::Pair(OrderedPair::new(a.clone(), b.clone())))
            })
            .collect();
        Ok(Relation::new(pairs))
    }

    /// Validates a list of operands.
    fn operands<'a, O, I>(operands: I) -> Result<SmallVec<&'a Self>, SetError>
    where
        O: Operand + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        operands
            .into_iter()
            .map(|set| set.try_operand())
            .collect()
    }

    /// Union over an iterator ⋃{x, y, ...}. The union of nothing is the empty set.
    ///
    /// Every operand is checked before anything is built. Fails with [`SetError::InvalidOperand`]
    /// if any of them is not a set.
    pub fn big_union<'a, O, I>(operands: I) -> Result<Self, SetError>
    where
        O: Operand + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        let mut union = Elements::new();
        for set in Self::operands(operands)? {
            union.extend(set.iter().cloned());
        }
        Ok(Self(Arc::new(union)))
    }

    /// Intersection over an iterator ⋂{x, y, ...}.
    ///
    /// Every operand is checked before anything is built. Fails with [`SetError::InvalidOperand`]
    /// if any of them is not a set, and with [`SetError::EmptyCollection`] if there are no
    /// operands, as the intersection of nothing would be the universal class.
    pub fn big_inter<'a, O, I>(operands: I) -> Result<Self, SetError>
    where
        O: Operand + ?Sized + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        let sets = Self::operands(operands)?;
        let (fst, rest) = sets.split_first().ok_or(SetError::EmptyCollection)?;
        Ok(fst.select(|el| rest.iter().all(|set| set.contains(el))))
    }
}

impl BitOr for &Set {
    type Output = Set;

    fn bitor(self, rhs: Self) -> Set {
        self.union_set(rhs)
    }
}

impl BitAnd for &Set {
    type Output = Set;

    fn bitand(self, rhs: Self) -> Set {
        self.inter_set(rhs)
    }
}

impl Sub for &Set {
    type Output = Set;

    fn sub(self, rhs: Self) -> Set {
        self.difference_set(rhs)
    }
}

// -------------------- Relations -------------------- //

impl Set {
    /// Subset relation ⊆ between sets.
    fn subset_of(&self, other: &Self) -> bool {
        self.card() <= other.card() && self.iter().all(|el| other.contains(el))
    }

    /// Subset relation ⊆. Anything that isn't a set is not a superset of anything.
    pub fn subset<O: Operand + ?Sized>(&self, other: &O) -> bool {
        other.as_operand().is_some_and(|other| self.subset_of(other))
    }

    /// Strict subset relation ⊂.
    pub fn ssubset<O: Operand + ?Sized>(&self, other: &O) -> bool {
        other
            .as_operand()
            .is_some_and(|other| self.card() < other.card() && self.subset_of(other))
    }

    /// Superset relation ⊇.
    pub fn superset<O: Operand + ?Sized>(&self, other: &O) -> bool {
        other.as_operand().is_some_and(|other| other.subset_of(self))
    }

    /// Strict superset relation ⊃.
    pub fn ssuperset<O: Operand + ?Sized>(&self, other: &O) -> bool {
        other
            .as_operand()
            .is_some_and(|other| other.card() < self.card() && other.subset_of(self))
    }

    /// Extensional equality with an arbitrary operand. Anything that isn't a set is unequal to a
    /// set.
    pub fn equals<O: Operand + ?Sized>(&self, other: &O) -> bool {
        other.as_operand().is_some_and(|other| self == other)
    }
}

// -------------------- Constructions -------------------- //

impl Set {
    /// Powerset P(x).
    ///
    /// Each subset corresponds to a bitmask over the elements in insertion order, and subsets are
    /// listed by increasing mask. The output has 2ⁿ elements, so keep n small.
    ///
    /// # Panics
    ///
    /// Panics if the set has as many elements as a `usize` has bits.
    #[must_use]
    pub fn powerset(&self) -> Self {
        let n = self.card();
        assert!(
            n < usize::BITS as usize,
            "the powerset of a set with {n} elements can't be indexed"
        );
        tracing::trace!(card = n, "building powerset");

        let elements = self.as_slice();
        (0..(1_usize << n))
            .map(|mask| {
                let bits = mask.view_bits::<Lsb0>();
                let subset = elements
                    .iter()
                    .zip(bits.iter().by_vals())
                    .filter_map(|(el, bit)| bit.then(|| el.clone()))
                    .collect();
                Value::Set(subset)
            })
            .collect()
    }

    /// Splits a set by a predicate into {x, y}, where x holds the elements satisfying it and y holds
    /// the rest.
    ///
    /// When both halves are equal, which only happens for the empty set, the output is {∅}.
    #[must_use]
    pub fn partition<P: FnMut(&Value) -> bool>(&self, mut pred: P) -> Self {
        let (fst, snd): (Vec<_>, Vec<_>) = self.iter().cloned().partition(|el| pred(el));
        Self::pair(Self::from(fst), Self::from(snd))
    }
}
