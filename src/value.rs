//! The [`Value`] type of set elements, and roster-notation parsing.

use crate::prelude::*;
use derive_more::{From, IsVariant};

/// Anything that can be stored within a [`Set`].
///
/// Values are compared and hashed structurally: two sets are equal whenever they have the same
/// elements, no matter how or in which order they were built. Since sets are immutable, a value
/// can never contain itself, and nesting depth is only bounded by the caller.
///
/// A [`Relation`] is a set, so it is equal to its set of pairs. Otherwise, values of different
/// variants are never equal. In particular, an [`OrderedPair`] is not equal to the Kuratowski set
/// encoding it.
#[derive(Clone, Debug, From, IsVariant)]
pub enum Value {
    /// An integer.
    Int(i64),
    /// A string.
    Str(String),
    /// An ordered list. Unlike a set, order and repetitions matter.
    List(Vec<Value>),
    /// A set.
    Set(Set),
    /// An ordered pair.
    Pair(OrderedPair),
    /// A relation.
    Relation(Relation),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Pair(a), Self::Pair(b)) => a == b,
            _ => match (self.as_operand(), other.as_operand()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

/// Sets and relations share a tag, so that equal values hash alike.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Int(n) => (0_u8, n).hash(state),
            Self::Str(str) => (1_u8, str).hash(state),
            Self::List(list) => (2_u8, list).hash(state),
            Self::Pair(pair) => (3_u8, pair).hash(state),
            Self::Set(set) => (4_u8, set).hash(state),
            Self::Relation(relation) => (4_u8, relation.as_set()).hash(state),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl Value {
    /// The value as an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(str) => Some(str),
            _ => None,
        }
    }

    /// The value as a set. Relations are not returned, see [`Operand::as_operand`] for that.
    #[must_use]
    pub const fn as_set(&self) -> Option<&Set> {
        match self {
            Self::Set(set) => Some(set),
            _ => None,
        }
    }

    /// The value as an ordered pair.
    #[must_use]
    pub const fn as_pair(&self) -> Option<&OrderedPair> {
        match self {
            Self::Pair(pair) => Some(pair),
            _ => None,
        }
    }
}

/// Writes a comma-separated sequence of values.
pub(crate) fn write_seq<'a, I: IntoIterator<Item = &'a Value>>(
    f: &mut Formatter<'_>,
    iter: I,
) -> FmtResult {
    let mut iter = iter.into_iter();
    if let Some(fst) = iter.next() {
        write!(f, "{fst}")?;
    }
    for value in iter {
        write!(f, ", {value}")?;
    }
    Ok(())
}

/// Displays a value in roster notation. Strings are quoted and escaped.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(str) => write!(f, "{str:?}"),
            Self::List(list) => {
                f.write_char('[')?;
                write_seq(f, list)?;
                f.write_char(']')
            }
            Self::Set(set) => write!(f, "{set}"),
            Self::Pair(pair) => write!(f, "{pair}"),
            Self::Relation(relation) => write!(f, "{relation}"),
        }
    }
}

impl PartialEq<Set> for Value {
    fn eq(&self, other: &Set) -> bool {
        self.as_operand() == Some(other)
    }
}

impl PartialEq<OrderedPair> for Value {
    fn eq(&self, other: &OrderedPair) -> bool {
        self.as_pair() == Some(other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

// -------------------- String parsing -------------------- //

/// Error in parsing a value from roster notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset at which parsing failed.
    pub pos: usize,
    /// What the parser was looking for.
    pub expected: &'static str,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "expected {} at byte {}", self.expected, self.pos)
    }
}

impl std::error::Error for ParseError {}

/// How deeply values may nest within parsed input.
pub const MAX_DEPTH: usize = 256;

/// A recursive descent parser for roster notation.
struct Parser<'a> {
    /// The full input.
    src: &'a str,
    /// Current byte offset.
    pos: usize,
    /// Number of values currently being parsed.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Initializes a parser at the start of the input.
    const fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    /// The unparsed input.
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Fails at the current position.
    fn error<T>(&self, expected: &'static str) -> Result<T, ParseError> {
        Err(ParseError {
            pos: self.pos,
            expected,
        })
    }

    /// Skips whitespace, then returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
        self.rest().chars().next()
    }

    /// Consumes `c` if it is the next non-whitespace character.
    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Parses a possibly empty sequence of values up to the closing delimiter.
    fn seq(&mut self, close: char) -> Result<Vec<Value>, ParseError> {
        let mut values = Vec::new();
        if self.eat(close) {
            return Ok(values);
        }

        loop {
            values.push(self.value()?);
            if self.eat(close) {
                return Ok(values);
            }
            if !self.eat(',') {
                return self.error("',' or closing bracket");
            }
        }
    }

    /// Parses an integer.
    fn int(&mut self) -> Result<Value, ParseError> {
        let rest = self.rest();
        let sign = usize::from(rest.starts_with('-'));
        let len = sign
            + rest[sign..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len() - sign);

        match rest[..len].parse() {
            Ok(n) => {
                self.pos += len;
                Ok(Value::Int(n))
            }
            Err(_) => self.error("integer"),
        }
    }

    /// Parses a double-quoted string, with the escapes that `Debug` writes for strings.
    fn string(&mut self) -> Result<Value, ParseError> {
        let rest = self.rest();
        let mut str = String::new();
        let mut iter = rest.char_indices().skip(1);
        while let Some((i, c)) = iter.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(Value::Str(str));
                }
                '\\' => match iter.next() {
                    Some((_, c @ ('"' | '\\' | '\''))) => str.push(c),
                    Some((_, 'n')) => str.push('\n'),
                    Some((_, 't')) => str.push('\t'),
                    Some((_, 'r')) => str.push('\r'),
                    Some((_, '0')) => str.push('\0'),
                    Some((j, 'u')) => {
                        let Some((c, len)) = unicode_escape(&rest[j + 1..]) else {
                            self.pos += i;
                            return self.error("escape sequence");
                        };
                        str.push(c);
                        iter.by_ref().take(len).for_each(drop);
                    }
                    _ => {
                        self.pos += i;
                        return self.error("escape sequence");
                    }
                },
                c => str.push(c),
            }
        }

        self.pos = self.src.len();
        self.error("closing '\"'")
    }

    /// Parses any value, failing once nesting exceeds [`MAX_DEPTH`].
    fn value(&mut self) -> Result<Value, ParseError> {
        if self.depth == MAX_DEPTH {
            return self.error("less nesting");
        }

        self.depth += 1;
        let value = self.term();
        self.depth -= 1;
        value
    }

    /// Parses a value, without checking its depth.
    fn term(&mut self) -> Result<Value, ParseError> {
        match self.peek() {
            Some('∅') => {
                self.pos += '∅'.len_utf8();
                Ok(Value::Set(Set::new()))
            }
            Some('{') => {
                self.pos += 1;
                Ok(Value::Set(self.seq('}')?.into()))
            }
            Some('[') => {
                self.pos += 1;
                Ok(Value::List(self.seq(']')?))
            }
            Some('<') => {
                self.pos += 1;
                let fst = self.value()?;
                if !self.eat(',') {
                    return self.error("','");
                }
                let snd = self.value()?;
                if !self.eat('>') {
                    return self.error("'>'");
                }
                Ok(Value::Pair(OrderedPair::new(fst, snd)))
            }
            Some('"') => self.string(),
            Some('-' | '0'..='9') => self.int(),
            _ => self.error("value"),
        }
    }

    /// Parses a value spanning the entire input.
    fn finish(mut self) -> Result<Value, ParseError> {
        let value = self.value()?;
        if self.peek().is_some() {
            return self.error("end of input");
        }
        Ok(value)
    }
}

/// Reads the `{XXXX}` part of a `\u{XXXX}` escape. Returns the character and the bytes read.
fn unicode_escape(src: &str) -> Option<(char, usize)> {
    let body = src.strip_prefix('{')?;
    let end = body.find('}')?;
    let hex = &body[..end];
    if !(1..=6).contains(&hex.len()) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let c = char::from_u32(u32::from_str_radix(hex, 16).ok()?)?;
    Some((c, end + 2))
}

/// Values are parsed from the same roster notation they're displayed in. The empty set may also be
/// written as `{}`.
impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        Parser::new(s).finish()
    }
}

/// Tests for [`Value`].
#[cfg(test)]
mod value {
    use super::*;

    /// Values that are displayed exactly as written.
    const SUITE: &[&str] = &[
        "0",
        "-17",
        r#""justine""#,
        r#""say \"hey\"""#,
        r#""a\rb\0\u{1}\t'c'""#,
        "[]",
        r#"[1, "hey"]"#,
        "∅",
        "{∅}",
        r#"{"justine", 4, [1, "hey"]}"#,
        "{{1}, {1, 2}}",
        "<1, 2>",
        "<{1, ∅}, [3]>",
    ];

    /// Verify round-trip conversion between value and string.
    fn roundtrip(str: &str) {
        let value: Value = str.parse().unwrap();
        assert_eq!(value.to_string(), str);
        assert_eq!(value, value.to_string().parse::<Value>().unwrap());
    }

    #[test]
    fn suite() {
        for str in SUITE {
            roundtrip(str);
        }
    }

    #[test]
    fn empty_braces() {
        let value: Value = "{ }".parse().unwrap();
        assert_eq!(value, Set::new());
        assert_eq!(value.to_string(), "∅");
    }

    #[test]
    fn whitespace() {
        let value: Value = " { 1 ,2,{ } } ".parse().unwrap();
        assert_eq!(value.to_string(), "{1, 2, ∅}");
    }

    #[test]
    fn dedup_on_parse() {
        let value: Value = "{1, 1, {}, ∅}".parse().unwrap();
        assert_eq!(value.to_string(), "{1, ∅}");
    }

    #[test]
    fn errors() {
        const BAD: &[(&str, usize)] = &[
            ("", 0),
            ("{1, 2", 5),
            ("{1 2}", 3),
            ("<1>", 2),
            ("\"open", 5),
            ("1 1", 2),
            ("-", 0),
            ("x", 0),
        ];

        for &(str, pos) in BAD {
            let err = str.parse::<Value>().unwrap_err();
            assert_eq!(err.pos, pos, "wrong error position for {str:?}: {err}");
        }
    }

    #[test]
    fn escapes() {
        for str in ["a\rb", "\0", "tab\there", "e\u{301}", "\u{7f}\u{200b}", "'", "∅"] {
            let value = Value::from(str);
            assert_eq!(value.to_string().parse::<Value>(), Ok(value), "{str:?}");
        }

        let value: Value = r#""\u{48}\u{10FFFF}""#.parse().unwrap();
        assert_eq!(value, Value::from("H\u{10FFFF}"));
        for str in [r#""\u{}""#, r#""\u{d800}""#, r#""\u{1234567}""#, r#""\u48""#, r#""\q""#] {
            let err = str.parse::<Value>().unwrap_err();
            assert_eq!(err.pos, 1, "{str}");
        }
    }

    #[test]
    fn nesting() {
        let depth = MAX_DEPTH - 1;
        let list = "[".repeat(depth) + &"]".repeat(depth);
        assert!(list.parse::<Value>().is_ok());

        let deep = "[".repeat(100_000);
        assert_eq!(
            deep.parse::<Value>(),
            Err(ParseError {
                pos: MAX_DEPTH,
                expected: "less nesting"
            })
        );
    }

    /// A relation is equal to its set of pairs, whichever way equality is asked.
    #[test]
    fn relation_is_set() {
        use crate::utils::fingerprint;

        let relation = set![1].product(&set![2]).unwrap();
        let pairs = relation.as_set().clone();
        let values = [
            Value::from(1),
            Value::from("a"),
            Value::List(vec![]),
            Value::from(Set::new()),
            Value::from(pairs.clone()),
            Value::from(OrderedPair::new(1, 2)),
            Value::from(relation.clone()),
        ];

        for value in &values {
            assert_eq!(pairs.equals(value), pairs == *value, "{value:?}");
        }
        assert_eq!(Value::from(relation.clone()), Value::from(pairs.clone()));
        assert_eq!(set![relation.clone()], set![pairs.clone()]);
        assert_eq!(
            fingerprint(&Value::from(relation)),
            fingerprint(&Value::from(pairs))
        );
    }

    #[test]
    fn variants_differ() {
        let pair = OrderedPair::new(1, 2);
        let set = pair.as_set().clone();
        assert_ne!(Value::from(pair), Value::from(set));
        assert_ne!(Value::from(1), Value::from("1"));
        assert_ne!(Value::List(vec![1.into(), 2.into()]), set![1, 2]);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::from(3).as_int(), Some(3));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert!(Value::from(set![]).is_set());
        assert!(Value::from(OrderedPair::new(1, 1)).as_pair().is_some());
        assert_eq!(Value::from("a").as_set(), None);
    }
}
