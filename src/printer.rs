// SPDX-License-Identifier: Unlicense
use crate::ast::{self, NodeKind};

fn text(source: &[u8], offset: usize, length: usize) -> String {
    String::from_utf8_lossy(&source[offset..offset + length]).into_owned()
}

/// One node per line, children indented four spaces below their parent.
pub fn tree(arena: &ast::Arena, root: ast::Id, source: &[u8]) -> String {
    let mut out = String::new();
    let mut pending = vec![(root, 0usize)];
    while let Some((id, level)) = pending.pop() {
        let indent = 4 * level;
        match arena.get(id).map(|n| n.kind) {
            Some(NodeKind::Leaf(token)) => {
                let literal = text(source, token.offset, token.length);
                out.push_str(&format!("{:indent$}Leaf: {}\n", "", literal));
            }
            Some(NodeKind::BinaryOperator { token, left, right }) => {
                let symbol = text(source, token.offset, token.length);
                out.push_str(&format!("{:indent$}Binary Operator: {}\n", "", symbol));
                pending.push((right, level + 1));
                pending.push((left, level + 1));
            }
            Some(NodeKind::Sentinel) | None => out.push_str(&format!("{:indent$}<none>\n", "")),
        }
    }
    out
}

enum Step {
    Visit(ast::Id),
    Emit(&'static str),
    Operator(&'static str),
}

/// Fully parenthesized infix form, e.g. `((2 * 3) + 4)`.
pub fn infix(arena: &ast::Arena, root: ast::Id, source: &[u8]) -> String {
    let mut out = String::new();
    let mut steps = vec![Step::Visit(root)];
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(id) => match arena.get(id).map(|n| n.kind) {
                Some(NodeKind::Leaf(token)) => {
                    out.push_str(&text(source, token.offset, token.length));
                }
                Some(NodeKind::BinaryOperator { token, left, right }) => {
                    steps.push(Step::Emit(")"));
                    steps.push(Step::Visit(right));
                    steps.push(Step::Operator(token.operator.symbol()));
                    steps.push(Step::Visit(left));
                    steps.push(Step::Emit("("));
                }
                Some(NodeKind::Sentinel) | None => out.push_str("<none>"),
            },
            Step::Emit(s) => out.push_str(s),
            Step::Operator(symbol) => {
                out.push(' ');
                out.push_str(symbol);
                out.push(' ');
            }
        }
    }
    out
}
