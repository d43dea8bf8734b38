use std::cmp::Ordering;

use serde_json::Value;

use json_transform_document::{compare, deep_equal};

use crate::types::{CmpOp, FilterExpr, JsonPath, Operand, Segment, Selector};

/// Evaluate a path against a document, returning matches in document order.
pub fn eval<'a>(path: &JsonPath, root: &'a Value) -> Vec<&'a Value> {
    let mut results = vec![root];
    for segment in &path.segments {
        let mut next = Vec::new();
        for value in results {
            if segment.recursive {
                eval_recursive(value, segment, root, &mut next);
            } else {
                eval_segment(value, segment, root, &mut next);
            }
        }
        results = next;
    }
    results
}

fn eval_segment<'a>(value: &'a Value, segment: &Segment, root: &'a Value, out: &mut Vec<&'a Value>) {
    for selector in &segment.selectors {
        eval_selector(value, selector, root, out);
    }
}

fn eval_recursive<'a>(
    value: &'a Value,
    segment: &Segment,
    root: &'a Value,
    out: &mut Vec<&'a Value>,
) {
    eval_segment(value, segment, root, out);
    match value {
        Value::Object(map) => {
            for child in map.values() {
                eval_recursive(child, segment, root, out);
            }
        }
        Value::Array(arr) => {
            for child in arr {
                eval_recursive(child, segment, root, out);
            }
        }
        _ => {}
    }
}

fn eval_selector<'a>(
    value: &'a Value,
    selector: &Selector,
    root: &'a Value,
    out: &mut Vec<&'a Value>,
) {
    match selector {
        Selector::Name(name) => {
            if let Value::Object(map) = value {
                if let Some(child) = map.get(name) {
                    out.push(child);
                }
            }
        }
        Selector::Index(index) => {
            if let Value::Array(arr) = value {
                if let Some(idx) = normalize_index(*index, arr.len()) {
                    if let Some(child) = arr.get(idx) {
                        out.push(child);
                    }
                }
            }
        }
        Selector::Wildcard => match value {
            Value::Object(map) => out.extend(map.values()),
            Value::Array(arr) => out.extend(arr.iter()),
            _ => {}
        },
        Selector::Slice { start, end, step } => {
            if let Value::Array(arr) = value {
                let len = arr.len();
                let start = clamp_index(*start, len).unwrap_or(0);
                let end = clamp_index(*end, len).unwrap_or(len).min(len);
                let step = step.unwrap_or(1);
                if step > 0 {
                    let mut i = start;
                    while i < end {
                        out.push(&arr[i]);
                        i += step as usize;
                    }
                }
            }
        }
        Selector::Filter(expr) => match value {
            Value::Object(map) => {
                out.extend(map.values().filter(|child| eval_filter(expr, child, root)));
            }
            Value::Array(arr) => {
                out.extend(arr.iter().filter(|child| eval_filter(expr, child, root)));
            }
            _ => {}
        },
    }
}

fn normalize_index(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        let back = len as isize + index;
        if back < 0 {
            return None;
        }
        Some(back as usize)
    } else {
        Some(index as usize)
    }
}

fn clamp_index(index: Option<isize>, len: usize) -> Option<usize> {
    index.map(|i| {
        if i < 0 {
            (len as isize + i).max(0) as usize
        } else {
            i as usize
        }
    })
}

fn eval_filter(expr: &FilterExpr, current: &Value, root: &Value) -> bool {
    match expr {
        FilterExpr::Exists(operand) => operand_value(operand, current, root).is_some(),
        FilterExpr::Compare { op, left, right } => {
            let left = operand_value(left, current, root);
            let right = operand_value(right, current, root);
            compare_operands(*op, left.as_ref(), right.as_ref())
        }
        FilterExpr::And(a, b) => eval_filter(a, current, root) && eval_filter(b, current, root),
        FilterExpr::Or(a, b) => eval_filter(a, current, root) || eval_filter(b, current, root),
        FilterExpr::Not(inner) => !eval_filter(inner, current, root),
    }
}

fn operand_value(operand: &Operand, current: &Value, root: &Value) -> Option<Value> {
    match operand {
        Operand::Current(path) => eval(path, current).first().map(|v| (*v).clone()),
        Operand::Root(path) => eval(path, root).first().map(|v| (*v).clone()),
        Operand::Literal(v) => Some(v.clone()),
    }
}

fn compare_operands(op: CmpOp, left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None, None) => matches!(op, CmpOp::Eq),
        (Some(l), Some(r)) => match op {
            // equality is structural (and numeric for numbers)
            CmpOp::Eq => deep_equal(l, r),
            CmpOp::Ne => !deep_equal(l, r),
            CmpOp::Lt => compare(l, r) == Some(Ordering::Less),
            CmpOp::Le => matches!(compare(l, r), Some(Ordering::Less | Ordering::Equal)),
            CmpOp::Gt => compare(l, r) == Some(Ordering::Greater),
            CmpOp::Ge => matches!(compare(l, r), Some(Ordering::Greater | Ordering::Equal)),
        },
        _ => matches!(op, CmpOp::Ne),
    }
}
