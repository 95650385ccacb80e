//! Accumulated coordinate space
//!
//! A [`PointSpace`] maps positions written in a node's local space to world
//! space. Each transform on the path from the root adds one link; links are
//! borrowed from the enclosing call frames, so descending through a
//! transform never copies the chain.

use crate::types::Mapping;

/// Chain of mappings from a node's local space out to world space
#[derive(Debug, Clone, Copy, Default)]
pub struct PointSpace<'a> {
    mapping: Option<&'a Mapping>,
    outer: Option<&'a PointSpace<'a>>,
}

impl<'a> PointSpace<'a> {
    /// World space
    pub fn identity() -> Self {
        Self::default()
    }

    /// This space with `mapping` applied first
    pub fn push_inner<'b>(&'b self, mapping: &'b Mapping) -> PointSpace<'b> {
        PointSpace {
            mapping: Some(mapping),
            outer: Some(self),
        }
    }

    /// Map a local-space position expression into world space.
    ///
    /// The innermost mapping runs first, the outermost last.
    pub fn apply(&self, position: String) -> String {
        let mapped = match self.mapping {
            Some(mapping) => mapping.apply(&position),
            None => position,
        };
        match self.outer {
            Some(outer) => outer.apply(mapped),
            None => mapped,
        }
    }

    /// Number of mappings in the chain
    pub fn depth(&self) -> usize {
        usize::from(self.mapping.is_some()) + self.outer.map_or(0, |outer| outer.depth())
    }
}
