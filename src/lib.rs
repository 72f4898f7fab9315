//! # Finite sets
//!
//! An immutable [`Set`] of arbitrary [`Values`](Value), compared and hashed structurally, so that
//! sets may freely contain other sets. On top of it we build the [Kuratowski ordered
//! pair](OrderedPair) (a, b) = {{a}, {a, b}} and [relations](Relation), i.e. sets of such pairs.
//!
//! ```rust
//! use better_set::prelude::*;
//!
//! let a = set![1, 2];
//! let b = set![3, 4];
//! assert_eq!(a.product(&b).unwrap().card(), 4);
//! assert_eq!(set![1, 2, 3], set![3, 2, 1, 1]);
//! assert_eq!(Set::new().to_string(), "∅");
//! ```

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod pair;
pub mod prelude;
pub mod relation;
pub mod set;
pub mod utils;
pub mod value;


use prelude::*;

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 4]>;

/// Builds a [`Set`] out of a list of elements, each of which is converted into a [`Value`].
///
/// Repeated elements are silently discarded.
///
/// ```rust
/// # use better_set::prelude::*;
/// let set = set![1, "a", set![], 1];
/// assert_eq!(set.card(), 3);
/// assert_eq!(set.to_string(), r#"{1, "a", ∅}"#);
/// ```
#[macro_export]
macro_rules! set {
    ($($x: expr), *$(,)*) => ({
        let vec: ::std::vec::Vec<$crate::value::Value> =
            ::std::vec![$($crate::value::Value::from($x),)*];
        $crate::set::Set::from(vec)
    });
}

/// A seal for [`Operand`], avoiding foreign implementations.
trait Seal {}

/// Anything that can be handed to the set algebra as the other operand.
///
/// Only sets (and relations, which are sets of pairs) are valid operands. Everything else is "not a
/// set": the algebra fails with [`SetError::InvalidOperand`] on it, while the relational predicates
/// ([`Set::subset`] and friends) simply return `false`.
///
/// The trait is sealed so that the set of valid operands can't be extended.
#[allow(private_bounds)]
pub trait Operand: Seal {
    /// The operand as a set, if it is one.
    fn as_operand(&self) -> Option<&Set>;

    /// The operand as a set, or [`SetError::InvalidOperand`].
    fn try_operand(&self) -> Result<&Set, SetError> {
        self.as_operand().ok_or(SetError::InvalidOperand)
    }
}

/// Implements [`Operand`] for types that are never sets.
macro_rules! impl_not_operand {
    ($($t: ty),*) => {
        $(
            impl Seal for $t {}

            impl Operand for $t {
                fn as_operand(&self) -> Option<&Set> {
                    None
                }
            }
        )*
    };
}

impl_not_operand!(str, String, i64, OrderedPair);

impl Seal for Set {}

impl Operand for Set {
    fn as_operand(&self) -> Option<&Set> {
        Some(self)
    }
}

impl Seal for Relation {}

impl Operand for Relation {
    fn as_operand(&self) -> Option<&Set> {
        Some(self.as_set())
    }
}

impl Seal for Value {}

impl Operand for Value {
    fn as_operand(&self) -> Option<&Set> {
        match self {
            Value::Set(set) => Some(set),
            Value::Relation(relation) => Some(relation.as_set()),
            _ => None,
        }
    }
}

impl<T: Operand + ?Sized> Seal for &T {}

impl<T: Operand + ?Sized> Operand for &T {
    fn as_operand(&self) -> Option<&Set> {
        (**self).as_operand()
    }
}
