use std::collections::HashMap;
use crate::walker::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// Binding strength of infix operators. Higher levels bind tighter; tokens
/// missing from the table bind tighter than every listed operator and group
/// to the left, like plain application.
#[derive(Clone, Debug)]
pub struct Precedence {
    ops: HashMap<String, (u32, Assoc)>,
}

impl Default for Precedence {
    fn default() -> Self {
        Self::empty()
            .with("*", 6, Assoc::Left)
            .with("+", 5, Assoc::Left)
            .with(":", 4, Assoc::Right)
            .with(",", 3, Assoc::Left)
            .with("=", 2, Assoc::Right)
            .with("\\", 1, Assoc::Right)
            .with("|", 0, Assoc::Right)
            .with("->", 0, Assoc::Right)
    }
}

impl Precedence {
    pub fn empty() -> Self {
        Self {
            ops: HashMap::new(),
        }
    }

    pub fn with(mut self, op: impl Into<String>, level: u32, assoc: Assoc) -> Self {
        self.ops.insert(op.into(), (level, assoc));
        self
    }

    fn unlisted(&self) -> (u32, Assoc) {
        let top = self.ops.values().map(|(level, _)| *level).max();
        (top.map_or(0, |level| level + 1), Assoc::Left)
    }

    pub fn of(&self, op: &Value) -> (u32, Assoc) {
        op.as_name()
            .and_then(|name| self.ops.get(name.as_str()).copied())
            .unwrap_or_else(|| self.unlisted())
    }
}

fn combine(vals: &mut Vec<Value>, ops: &mut Vec<(Value, u32)>) {
    if let (Some((head, _)), Some(right), Some(left)) = (ops.pop(), vals.pop(), vals.pop()) {
        vals.push(Value::tree(left, head, right));
    }
}

/// Reduce an odd-length `[operand, op, operand, ...]` sequence into a tree.
pub fn reduce(items: Vec<Value>, precedence: &Precedence) -> Value {
    debug_assert!(items.len() % 2 == 1, "operator sequence must have odd length");

    let mut items = items.into_iter();
    let mut vals = Vec::new();
    let mut ops: Vec<(Value, u32)> = Vec::new();
    vals.extend(items.next());

    while let (Some(op), Some(val)) = (items.next(), items.next()) {
        let (level, assoc) = precedence.of(&op);
        while let Some((_, top)) = ops.last() {
            let pops = match assoc {
                Assoc::Left => *top >= level,
                Assoc::Right => *top > level,
            };
            if !pops {
                break;
            }
            combine(&mut vals, &mut ops);
        }
        ops.push((op, level));
        vals.push(val);
    }

    while !ops.is_empty() {
        combine(&mut vals, &mut ops);
    }

    vals.pop().unwrap_or(Value::Nil)
}
