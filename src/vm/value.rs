//! Tagged dynamic values for the constant pool and the operand stack.

use std::rc::Rc;

/// A runtime value.
///
/// `Identifier` is the unresolved identifier-reference tag: it can travel
/// through the constant pool and the stack, but it has no printable form.
/// Popping one at `End` is an internal error.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(Rc<str>),
    Identifier(Rc<str>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Identifier(_) => "identifier",
        }
    }

    /// Tag without payload, for same-type checks.
    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Number(_) => ValueTag::Number,
            Value::Bool(_) => ValueTag::Bool,
            Value::Str(_) => ValueTag::Str,
            Value::Identifier(_) => ValueTag::Identifier,
        }
    }

    /// JS-like loose equality with cross-type coercion:
    /// bool↔number via 0/1, string↔number and bool↔string via an integer
    /// prefix parse of the string. Undefined cross-type pairs are unequal.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Identifier(a), Value::Identifier(b)) => a == b,

            (Value::Bool(b), Value::Number(n)) | (Value::Number(n), Value::Bool(b)) => {
                bool_to_number(*b) == *n
            }
            (Value::Str(s), Value::Number(n)) | (Value::Number(n), Value::Str(s)) => {
                parse_integer_prefix(s) as f64 == *n
            }
            (Value::Bool(b), Value::Str(s)) | (Value::Str(s), Value::Bool(b)) => {
                parse_integer_prefix(s) as f64 == bool_to_number(*b)
            }

            _ => false,
        }
    }

    /// Same-tag value equality, used by strict equality once tags match.
    pub fn strict_equals(&self, other: &Value) -> bool {
        if self.tag() != other.tag() {
            return false;
        }
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Identifier(a), Value::Identifier(b)) => a == b,
            _ => unreachable!("tags checked above"),
        }
    }
}

/// Value tag, payload-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTag {
    Number,
    Bool,
    Str,
    Identifier,
}

fn bool_to_number(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// C `atoi` semantics: leading whitespace, optional sign, then a digit prefix;
/// anything else (including the empty string) parses to 0.
pub fn parse_integer_prefix(s: &str) -> i64 {
    let s = s.trim_start();
    let mut chars = s.chars().peekable();
    let mut negative = false;

    if let Some(&c) = chars.peek() {
        if c == '+' || c == '-' {
            negative = c == '-';
            chars.next();
        }
    }

    let mut value: i64 = 0;
    for c in chars {
        match c.to_digit(10) {
            Some(d) => value = value.saturating_mul(10).saturating_add(d as i64),
            None => break,
        }
    }

    if negative {
        -value
    } else {
        value
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // %f formatting: numbers always render with six decimals even
            // though literal syntax is integer-friendly.
            Value::Number(n) => write!(f, "{:.6}", n),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Str(s) => write!(f, "{}", s),
            Value::Identifier(name) => write!(f, "<identifier {}>", name),
        }
    }
}
