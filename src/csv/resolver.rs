//! Adaptive per-column type inference
//!
//! Each column carries a resolver that starts `Unresolved` and locks to the
//! first scalar kind that accepts an informative value. Candidate parsers run
//! in fixed priority order: Integer, Float, Boolean, Text. Once locked, every
//! later cell is parsed only with the locked kind; a value the locked parser
//! rejects becomes null. The column never re-infers.
//!
//! Missing-value tokens (empty string, `na`/`null`/`none` case-insensitive)
//! resolve to null before any inference runs and never lock the column.

use crate::scalar::Scalar;

/// Scalar kind a column can lock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
    Boolean,
    /// Pass-through: the raw field string
    Text,
}

/// Per-column inference state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeResolver {
    /// No informative value seen yet
    Unresolved,
    /// Committed to one kind for the rest of the column
    Locked(ScalarKind),
}

/// Candidate kinds in inference priority order.
const CANDIDATES: [ScalarKind; 4] = [
    ScalarKind::Integer,
    ScalarKind::Float,
    ScalarKind::Boolean,
    ScalarKind::Text,
];

impl Default for TypeResolver {
    fn default() -> Self {
        TypeResolver::Unresolved
    }
}

impl TypeResolver {
    /// Converts one raw field, advancing the inference state.
    pub fn convert(&mut self, raw: &str) -> Scalar {
        if is_missing_token(raw) {
            return Scalar::Null;
        }

        match *self {
            TypeResolver::Locked(kind) => parse_as(kind, raw).unwrap_or(Scalar::Null),
            TypeResolver::Unresolved => {
                for kind in CANDIDATES {
                    if let Some(value) = parse_as(kind, raw) {
                        // Any value past the missing-token check is
                        // informative, so the first accepting kind locks.
                        *self = TypeResolver::Locked(kind);
                        return value;
                    }
                }
                // Unreachable: Text accepts everything
                *self = TypeResolver::Locked(ScalarKind::Text);
                Scalar::Text(raw.to_string())
            }
        }
    }

    /// The locked kind, if the column has one.
    pub fn locked_kind(&self) -> Option<ScalarKind> {
        match self {
            TypeResolver::Locked(kind) => Some(*kind),
            TypeResolver::Unresolved => None,
        }
    }
}

/// True for tokens that always mean "missing": empty/whitespace, or
/// `na`/`null`/`none` in any case.
fn is_missing_token(raw: &str) -> bool {
    let t = raw.trim();
    t.is_empty() || t.eq_ignore_ascii_case("na") || t.eq_ignore_ascii_case("null")
        || t.eq_ignore_ascii_case("none")
}

fn parse_as(kind: ScalarKind, raw: &str) -> Option<Scalar> {
    match kind {
        ScalarKind::Integer => parse_int(raw).map(Scalar::Int),
        ScalarKind::Float => parse_float(raw).map(Scalar::Float),
        ScalarKind::Boolean => parse_bool(raw).map(Scalar::Bool),
        ScalarKind::Text => Some(Scalar::Text(raw.to_string())),
    }
}

/// Integer: optional sign plus digits, after stripping `_`/`,` grouping.
fn parse_int(raw: &str) -> Option<i64> {
    let t = strip_grouping(raw);
    let digits = t.strip_prefix(['+', '-']).unwrap_or(&t);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse::<i64>().ok()
}

/// Float: must fail the integer test, then pass a standard f64 parse.
fn parse_float(raw: &str) -> Option<f64> {
    let t = strip_grouping(raw);
    if t.is_empty() || t == "+" || t == "-" {
        return None;
    }
    let digits = t.strip_prefix(['+', '-']).unwrap_or(&t);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        // Digit-only text belongs to the integer parser
        return None;
    }
    t.parse::<f64>().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn strip_grouping(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|&c| c != '_' && c != ',')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_locks_first() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("1"), Scalar::Int(1));
        assert_eq!(r.locked_kind(), Some(ScalarKind::Integer));
    }

    #[test]
    fn test_float_inference() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("1.5"), Scalar::Float(1.5));
        assert_eq!(r.locked_kind(), Some(ScalarKind::Float));
    }

    #[test]
    fn test_bool_inference() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("true"), Scalar::Bool(true));
        // "0" and "yes" parse under the locked boolean kind
        assert_eq!(r.convert("0"), Scalar::Bool(false));
        assert_eq!(r.convert("yes"), Scalar::Bool(true));
    }

    #[test]
    fn test_numeric_one_beats_boolean() {
        // "1" is an integer first: the integer parser outranks boolean
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("1"), Scalar::Int(1));
    }

    #[test]
    fn test_missing_tokens_are_null_and_do_not_lock() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert(""), Scalar::Null);
        assert_eq!(r.convert("NA"), Scalar::Null);
        assert_eq!(r.convert("null"), Scalar::Null);
        assert_eq!(r.convert("None"), Scalar::Null);
        assert_eq!(r.locked_kind(), None);
        // First informative value still infers freely
        assert_eq!(r.convert("2.5"), Scalar::Float(2.5));
    }

    #[test]
    fn test_locked_parser_mismatch_yields_null() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("3"), Scalar::Int(3));
        // Column is locked to integer; a later float resolves to null
        assert_eq!(r.convert("3.2"), Scalar::Null);
        // And never re-infers
        assert_eq!(r.convert("4"), Scalar::Int(4));
    }

    #[test]
    fn test_grouping_characters_stripped() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("1_000,000"), Scalar::Int(1_000_000));
    }

    #[test]
    fn test_signed_integers() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("-42"), Scalar::Int(-42));
        assert_eq!(r.convert("+7"), Scalar::Int(7));
    }

    #[test]
    fn test_exponent_float() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("1e3"), Scalar::Float(1000.0));
    }

    #[test]
    fn test_text_fallback() {
        let mut r = TypeResolver::default();
        assert_eq!(r.convert("Gold"), Scalar::Text("Gold".into()));
        assert_eq!(r.locked_kind(), Some(ScalarKind::Text));
        // Text accepts digits afterwards, as text
        assert_eq!(r.convert("123"), Scalar::Text("123".into()));
    }
}
