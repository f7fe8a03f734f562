use crate::value::Value;
use std::cmp::Ordering;

/// Equality between two runtime values.
///
/// Signed and unsigned integers compare numerically; entities compare by
/// identity key. Returns `None` when the comparison is not defined
/// (mismatched types, or `Null` on either side).
#[must_use]
pub fn compare_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => None,
        (Value::Bool(a), Value::Bool(b)) => Some(a == b),
        (Value::Text(a), Value::Text(b)) => Some(a == b),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a == b),
        (Value::Entity(a), Value::Entity(b)) => {
            if a.entity_name() != b.entity_name() {
                return Some(false);
            }
            Some(a == b)
        }
        (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => {
            if a.len() != b.len() {
                return Some(false);
            }
            for (left, right) in a.iter().zip(b) {
                if !compare_eq(left, right)? {
                    return Some(false);
                }
            }
            Some(true)
        }
        _ => compare_order(left, right).map(Ordering::is_eq),
    }
}

/// Strict ordering between orderable values of compatible types.
///
/// Returns `None` for mismatched or non-orderable variants.
#[must_use]
pub fn compare_order(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Uint(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Uint(a), Value::Int(b)) => Some(i128::from(*a).cmp(&i128::from(*b))),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Ulid(a), Value::Ulid(b)) => Some(a.cmp(b)),
        (Value::Entity(a), Value::Entity(b)) if a.entity_name() == b.entity_name() => {
            Some(a.key()?.cmp(&b.key()?))
        }
        _ => None,
    }
}

/// Case-sensitive substring test; `None` unless both sides are text.
#[must_use]
pub fn text_contains(haystack: &Value, needle: &Value) -> Option<bool> {
    match (haystack, needle) {
        (Value::Text(haystack), Value::Text(needle)) => Some(haystack.contains(needle.as_str())),
        _ => None,
    }
}

/// Total comparator used for result ordering.
///
/// Ordering rules:
/// 1. `Null` sorts first
/// 2. Orderable values of compatible types use [`compare_order`]
/// 3. Mixed variants fall back to a fixed variant rank
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    if let Some(ordering) = compare_order(left, right) {
        return ordering;
    }

    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::List(a), Value::List(b)) | (Value::Set(a), Value::Set(b)) => {
            canonical_cmp_list(a, b)
        }
        _ => Ordering::Equal,
    }
}

const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Uint(_) => 2,
        Value::Text(_) => 3,
        Value::Ulid(_) => 4,
        Value::Entity(_) => 5,
        Value::List(_) => 6,
        Value::Set(_) => 7,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}
