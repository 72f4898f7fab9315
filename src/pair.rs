//! Ordered pairs [`OrderedPair`].
//!
//! Kuratowski's definition of ordered pairs (x, y) = {{x}, {x, y}} is pretty much universal within
//! foundational mathematics. Its defining property is that (a, b) = (c, d) if and only if a = c and
//! b = d, even though the encoding itself is an unordered set.

use crate::prelude::*;

/// An ordered pair (x, y), stored as the Kuratowski set {{x}, {x, y}}.
///
/// When x = y, both members collapse and the encoding is the set {{x}} with a single element. The
/// coordinates are never stored separately: [`first`](Self::first) and [`second`](Self::second)
/// recover them from the encoding.
///
/// ## Invariants
///
/// The inner set is always a valid Kuratowski pair, i.e. [`split`] succeeds on it.
#[derive(Clone)]
pub struct OrderedPair(Set);

/// Recovers the coordinates (x, y) of a Kuratowski pair {{x}, {x, y}}, if the set is one.
///
/// The first coordinate is the element common to both members, the second is the element of the
/// larger member that isn't the first. For the degenerate pair {{x}}, both coordinates are x.
fn split(set: &Set) -> Option<(&Value, &Value)> {
    match set.as_slice() {
        [fst] => match fst.as_operand()?.as_slice() {
            [a] => Some((a, a)),
            _ => None,
        },
        [fst, snd] => {
            let (fst, snd) = (fst.as_operand()?, snd.as_operand()?);
            let (small, large) = if fst.card() <= snd.card() {
                (fst, snd)
            } else {
                (snd, fst)
            };

            match (small.as_slice(), large.as_slice()) {
                ([a], [b, c]) if a == b => Some((a, c)),
                ([a], [b, c]) if a == c => Some((a, b)),
                _ => None,
            }
        }
        _ => None,
    }
}

impl OrderedPair {
    /// Builds the pair (x, y) = {{x}, {x, y}}.
    pub fn new<V: Into<Value>, W: Into<Value>>(fst: V, snd: W) -> Self {
        let fst = fst.into();
        Self(Set::pair(Set::singleton(fst.clone()), Set::pair(fst, snd)))
    }

    /// Both coordinates.
    fn coords(&self) -> (&Value, &Value) {
        split(&self.0).unwrap_or_else(|| unreachable!("ordered pair {:?} is malformed", self.0))
    }

    /// The first coordinate x of (x, y).
    #[must_use]
    pub fn first(&self) -> &Value {
        self.coords().0
    }

    /// The second coordinate y of (x, y).
    #[must_use]
    pub fn second(&self) -> &Value {
        self.coords().1
    }

    /// The Kuratowski set encoding the pair.
    #[must_use]
    pub const fn as_set(&self) -> &Set {
        &self.0
    }

    /// Returns the Kuratowski set encoding the pair.
    #[must_use]
    pub fn into_set(self) -> Set {
        self.0
    }

    /// The pair (y, x).
    #[must_use]
    pub fn swap(&self) -> Self {
        let (fst, snd) = self.coords();
        Self::new(snd.clone(), fst.clone())
    }
}

/// Two pairs are equal when their coordinates are.
impl PartialEq for OrderedPair {
    fn eq(&self, other: &Self) -> bool {
        self.coords() == other.coords()
    }
}

impl Eq for OrderedPair {}

impl PartialEq<Value> for OrderedPair {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl Hash for OrderedPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coords().hash(state);
    }
}

impl Debug for OrderedPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (fst, snd) = self.coords();
        f.debug_tuple("OrderedPair").field(fst).field(snd).finish()
    }
}

/// Displays a pair as `<x, y>`.
impl Display for OrderedPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (fst, snd) = self.coords();
        write!(f, "<{fst}, {snd}>")
    }
}

/// Reads a Kuratowski pair out of a set, failing with [`SetError::NotAPair`] if it isn't one.
impl TryFrom<Set> for OrderedPair {
    type Error = SetError;

    fn try_from(set: Set) -> Result<Self, SetError> {
        if split(&set).is_some() {
            Ok(Self(set))
        } else {
            Err(SetError::NotAPair)
        }
    }
}

/// Accepts both pairs and sets encoding them.
impl TryFrom<Value> for OrderedPair {
    type Error = SetError;

    fn try_from(value: Value) -> Result<Self, SetError> {
        match value {
            Value::Pair(pair) => Ok(pair),
            Value::Set(set) => set.try_into(),
            _ => Err(SetError::NotAPair),
        }
    }
}

/// Tests for [`OrderedPair`].
#[cfg(test)]
mod pair {
    use super::*;

    #[test]
    fn coords() {
        let pair = OrderedPair::new(1, 2);
        assert_eq!(pair.first(), &Value::from(1));
        assert_eq!(pair.second(), &Value::from(2));
        assert_eq!(pair.swap(), OrderedPair::new(2, 1));
    }

    #[test]
    fn encoding() {
        let pair = OrderedPair::new(1, 2);
        assert_eq!(
            pair.as_set().to_vec(),
            vec![Value::from(set![1]), Value::from(set![1, 2])]
        );
        assert_eq!(pair.as_set().to_string(), "{{1}, {1, 2}}");
    }

    #[test]
    fn degenerate() {
        let pair = OrderedPair::new(1, 1);
        assert_eq!(pair.as_set().card(), 1);
        assert_eq!(pair.as_set(), &set![set![1]]);
        assert_eq!(pair.first(), &Value::from(1));
        assert_eq!(pair.second(), &Value::from(1));
    }

    #[test]
    fn order_matters() {
        assert_ne!(OrderedPair::new(1, 2), OrderedPair::new(2, 1));
        assert_eq!(OrderedPair::new(1, 2), OrderedPair::new(1, 2));
        assert_ne!(OrderedPair::new(1, 1), OrderedPair::new(1, 2));
        assert_eq!(set![OrderedPair::new(1, 2), OrderedPair::new(1, 2)].card(), 1);
    }

    #[test]
    fn not_a_set() {
        let pair = OrderedPair::new(1, 2);
        assert_ne!(Value::from(pair.clone()), Value::from(pair.as_set().clone()));
        assert_ne!(pair, Value::from("hey"));
        assert!(!pair.as_set().equals(&pair));
        assert_eq!(Set::new().union(&pair), Err(SetError::InvalidOperand));
    }

    #[test]
    fn display() {
        assert_eq!(OrderedPair::new(1, 2).to_string(), "<1, 2>");
        assert_eq!(
            OrderedPair::new(set![], OrderedPair::new("a", 3)).to_string(),
            r#"<∅, <"a", 3>>"#
        );
    }

    /// Coordinates that are themselves sets, where the members of the encoding look alike.
    #[test]
    fn nested() {
        let empty = Set::new();
        let one = set![Set::new()];
        for (a, b) in [
            (empty.clone(), one.clone()),
            (one.clone(), empty.clone()),
            (one.clone(), set![Set::new(), set![Set::new()]]),
        ] {
            let pair = OrderedPair::new(a.clone(), b.clone());
            assert_eq!(pair.first(), &a);
            assert_eq!(pair.second(), &b);
        }
    }

    #[test]
    fn try_from() {
        let set: Set = "{{2, 1}, {1}}".parse().unwrap();
        let pair = OrderedPair::try_from(set).unwrap();
        assert_eq!(pair, OrderedPair::new(1, 2));

        for str in ["∅", "{1}", "{{1}, {2}}", "{{1, 2}, {3, 1}}", "{{}}", "{{1}, {1, 2}, {1, 3}}"] {
            let set: Set = str.parse().unwrap();
            assert_eq!(OrderedPair::try_from(set), Err(SetError::NotAPair), "{str}");
        }

        // Members of the encoding may be relations, which are sets too.
        let snd = OrderedPair::new(1, 1);
        let set = set![set![1], Relation::new(set![1, snd.clone()])];
        assert_eq!(set, OrderedPair::new(1, snd.clone()).into_set());
        assert_eq!(OrderedPair::try_from(set), Ok(OrderedPair::new(1, snd)));

        let value: Value = "<1, 2>".parse().unwrap();
        assert_eq!(OrderedPair::try_from(value), Ok(OrderedPair::new(1, 2)));
        assert_eq!(
            OrderedPair::try_from(Value::from(3)),
            Err(SetError::NotAPair)
        );
    }
}
