//! Crate prelude.

// The actual prelude.
pub use crate::{
    pair::OrderedPair,
    relation::Relation,
    set,
    set::{Set, SetError},
    value::{ParseError, Value},
    Operand,
};

// Convenient imports within the crate.
pub(crate) use crate::SmallVec;
pub(crate) use bitvec::prelude::*;
pub(crate) use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult, Write},
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};
