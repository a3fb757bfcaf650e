// SPDX-License-Identifier: Unlicense
use crate::token::{BinaryOperator, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    /// Placeholder occupying index 0; never part of a parsed tree.
    #[default]
    Sentinel,
    Leaf(Token),
    BinaryOperator {
        token: Token,
        left: Id,
        right: Id,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub kind: NodeKind,
}

pub type Id = id_arena::Id<Node>;
pub type Arena = id_arena::Arena<Node>;

/// Index 0 stands for "no node".
pub fn is_null(id: Id) -> bool {
    id.index() == 0
}

impl Node {
    pub fn token(&self) -> Option<&Token> {
        match &self.kind {
            NodeKind::Sentinel => None,
            NodeKind::Leaf(token) | NodeKind::BinaryOperator { token, .. } => Some(token),
        }
    }

    /// Offset and length of the literal text of a leaf.
    pub fn span(&self) -> Option<(usize, usize)> {
        match &self.kind {
            NodeKind::Leaf(token) => Some((token.offset, token.length)),
            _ => None,
        }
    }

    pub fn operator(&self) -> Option<BinaryOperator> {
        match &self.kind {
            NodeKind::BinaryOperator { token, .. } => Some(token.operator),
            _ => None,
        }
    }

    pub fn children(&self) -> Option<(Id, Id)> {
        match self.kind {
            NodeKind::BinaryOperator { left, right, .. } => Some((left, right)),
            _ => None,
        }
    }
}
