//! Operator constructors
//!
//! An operator over `k` children reserves `k` identifiers: its own plus one
//! per fold step.

use super::{Node, OperatorKind, SceneBuilder};
use crate::expr::Scalar;

impl SceneBuilder {
    /// Operator of the given kind over `children`
    ///
    /// # Panics
    /// Panics if fewer than two children are given.
    #[must_use]
    pub fn operator(
        &mut self,
        kind: OperatorKind,
        children: Vec<Node>,
        smoothing: impl Into<Scalar>,
    ) -> Node {
        assert!(
            children.len() >= 2,
            "{} needs at least two children, got {}",
            kind.name(),
            children.len()
        );
        let count = u32::try_from(children.len()).expect("operator child count exceeds u32");
        Node::Operator {
            id: self.reserve(count),
            kind,
            smoothing: smoothing.into(),
            children,
        }
    }

    /// Smooth union of all children
    #[inline]
    #[must_use]
    pub fn union(&mut self, children: Vec<Node>, smoothing: impl Into<Scalar>) -> Node {
        self.operator(OperatorKind::Union, children, smoothing)
    }

    /// First child minus every later child
    #[inline]
    #[must_use]
    pub fn difference(&mut self, children: Vec<Node>, smoothing: impl Into<Scalar>) -> Node {
        self.operator(OperatorKind::Difference, children, smoothing)
    }

    /// Smooth intersection of all children
    #[inline]
    #[must_use]
    pub fn cut(&mut self, children: Vec<Node>, smoothing: impl Into<Scalar>) -> Node {
        self.operator(OperatorKind::Cut, children, smoothing)
    }
}
