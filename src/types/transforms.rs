//! Spatial transform methods for Node

use super::{Mapping, Node};
use crate::expr::Vector;

impl Node {
    /// Translate by offset
    #[inline]
    #[must_use]
    pub fn translate(self, offset: impl Into<Vector>) -> Self {
        self.transform(Mapping::Translate(offset.into()))
    }

    /// Translate by components
    #[inline]
    #[must_use]
    pub fn translate_xyz(self, x: f32, y: f32, z: f32) -> Self {
        self.translate(Vector::new(x, y, z))
    }

    /// Wrap in an arbitrary mapping
    #[inline]
    #[must_use]
    pub fn transform(self, mapping: Mapping) -> Self {
        Node::Transform {
            mapping,
            child: Box::new(self),
        }
    }
}
