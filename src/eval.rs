// SPDX-License-Identifier: Unlicense
use crate::ast::{self, NodeKind};
use crate::token::BinaryOperator;
use anyhow::{anyhow, bail, Context, Result};

pub struct Evaluator<'a> {
    arena: &'a ast::Arena,
    source: &'a [u8],
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a ast::Arena, source: &'a [u8]) -> Self {
        Self { arena, source }
    }

    fn literal(&self, offset: usize, length: usize) -> Result<i64> {
        let text = std::str::from_utf8(&self.source[offset..offset + length])?;
        text.parse()
            .with_context(|| format!("integer literal {} at offset {} out of range", text, offset))
    }

    fn apply(op: BinaryOperator, lhs: i64, rhs: i64) -> Result<i64> {
        let value = match op {
            BinaryOperator::Add => lhs.checked_add(rhs),
            BinaryOperator::Subtract => lhs.checked_sub(rhs),
            BinaryOperator::Multiply => lhs.checked_mul(rhs),
            BinaryOperator::Divide => {
                if rhs == 0 {
                    bail!("division by zero");
                }
                lhs.checked_div(rhs)
            }
            BinaryOperator::Greater => Some((lhs > rhs) as i64),
            BinaryOperator::Less => Some((lhs < rhs) as i64),
            BinaryOperator::Invalid => bail!("invalid operator in tree"),
        };
        value.ok_or(anyhow!("overflow evaluating {} {} {}", lhs, op.symbol(), rhs))
    }

    fn node(&self, id: ast::Id) -> Result<NodeKind> {
        Ok(self
            .arena
            .get(id)
            .ok_or(anyhow!("failed to get node from arena"))?
            .kind)
    }

    /// Post-order walk with an explicit stack; a left-deep chain of any
    /// length needs no call stack.
    pub fn evaluate(&self, root: ast::Id) -> Result<i64> {
        let mut pending = vec![(root, false)];
        let mut values: Vec<i64> = vec![];
        while let Some((id, children_done)) = pending.pop() {
            match self.node(id)? {
                NodeKind::Leaf(token) => values.push(self.literal(token.offset, token.length)?),
                NodeKind::BinaryOperator { token, left, right } => {
                    if children_done {
                        let rhs = values.pop().ok_or(anyhow!("missing right operand"))?;
                        let lhs = values.pop().ok_or(anyhow!("missing left operand"))?;
                        values.push(Self::apply(token.operator, lhs, rhs)?);
                    } else {
                        pending.push((id, true));
                        pending.push((right, false));
                        pending.push((left, false));
                    }
                }
                NodeKind::Sentinel => bail!("cannot evaluate an empty tree"),
            }
        }
        values.pop().ok_or(anyhow!("empty evaluation"))
    }
}

pub fn evaluate(arena: &ast::Arena, root: ast::Id, source: &[u8]) -> Result<i64> {
    Evaluator::new(arena, source).evaluate(root)
}
