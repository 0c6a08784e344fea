use smallvec::SmallVec;

use crate::Value;

/// Structural comparison of [`Value`]s.
///
/// Traversal uses an explicit work-list, so nesting depth is bounded by heap,
/// not by the call stack. `max_depth` additionally caps how many composite
/// levels are expanded: a non-empty composite found at that depth compares
/// unequal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Comparator {
    pub max_depth: Option<usize>,
}

impl Comparator {
    pub const fn new() -> Self {
        Self { max_depth: None }
    }

    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn equal(&self, a: &Value, b: &Value) -> bool {
        let mut work: SmallVec<[(&Value, &Value, usize); 16]> = SmallVec::new();
        work.push((a, b, 0));

        while let Some((a, b, depth)) = work.pop() {
            if std::ptr::eq(a, b) {
                continue;
            }
            match (a, b) {
                (Value::Absent, Value::Absent) => {}
                (Value::Absent, _) | (_, Value::Absent) => return false,

                (Value::Bool(x), Value::Bool(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Value::Str(x), Value::Str(y)) => {
                    if x != y {
                        return false;
                    }
                }
                (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                    if !same_number(a, b) {
                        return false;
                    }
                }

                (Value::List(xs), Value::List(ys)) => {
                    if xs.len() != ys.len() {
                        return false;
                    }
                    if xs.is_empty() {
                        continue;
                    }
                    if self.too_deep(depth) {
                        return false;
                    }
                    work.extend(xs.iter().zip(ys).map(|(x, y)| (x, y, depth + 1)));
                }
                (Value::Record(xs), Value::Record(ys)) => {
                    if xs.len() != ys.len() {
                        return false;
                    }
                    if xs.is_empty() {
                        continue;
                    }
                    if self.too_deep(depth) {
                        return false;
                    }
                    for (name, x) in xs {
                        match ys.get(name) {
                            Some(y) => work.push((x, y, depth + 1)),
                            None => return false,
                        }
                    }
                }

                // Mixed kinds: primitive vs composite, list vs record, bool vs number...
                _ => return false,
            }
        }
        true
    }

    fn too_deep(&self, depth: usize) -> bool {
        match self.max_depth {
            Some(max) if depth >= max => {
                log::debug!("compare: depth bound {} reached; treating as changed", max);
                true
            }
            _ => false,
        }
    }
}

const I64_MIN: f64 = -9_223_372_036_854_775_808.0;
const I64_END: f64 = 9_223_372_036_854_775_808.0;

fn same_number(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
            (I64_MIN..I64_END).contains(f) && f.fract() == 0.0 && *f as i64 == *i
        }
        _ => false,
    }
}

/// `Comparator::default().equal(a, b)`
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    Comparator::new().equal(a, b)
}
