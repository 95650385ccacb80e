//! Leaf constructors and the scene builder
//!
//! Every node that declares variables reserves its identifiers here, at
//! construction time, from the builder's allocator.

use std::sync::Arc;

use super::{Node, Primitive};
use crate::expr::{Scalar, Vector};
use crate::ids::IdAllocator;
use crate::material::Material;

/// Builds scene nodes, allocating identifiers as it goes
///
/// Children are passed to operators already built, so a node's
/// identifiers are always higher than its descendants'. Blocks never
/// overlap, which is what keeps every declared name unique.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    ids: IdAllocator,
}

impl SceneBuilder {
    /// Builder with a fresh allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue allocating from an existing allocator
    pub fn with_allocator(ids: IdAllocator) -> Self {
        SceneBuilder { ids }
    }

    /// The allocator, e.g. to inspect the next free identifier
    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    /// Give the allocator back
    pub fn into_allocator(self) -> IdAllocator {
        self.ids
    }

    pub(super) fn reserve(&mut self, count: u32) -> u32 {
        self.ids.reserve(count)
    }

    // === Leaf constructors ===

    /// Shape with an explicit material
    #[must_use]
    pub fn shape(&mut self, primitive: Primitive, material: Arc<Material>) -> Node {
        Node::Shape {
            id: self.reserve(1),
            primitive,
            material,
        }
    }

    /// Sphere of the given radius at the origin, default material
    #[must_use]
    pub fn sphere(&mut self, radius: impl Into<Scalar>) -> Node {
        self.shape(
            Primitive::Sphere {
                radius: radius.into(),
            },
            Material::shared_default(),
        )
    }

    /// Two-sided plane through the origin
    #[must_use]
    pub fn plane(&mut self, normal: impl Into<Vector>) -> Node {
        self.shape(
            Primitive::Plane {
                normal: normal.into(),
            },
            Material::shared_default(),
        )
    }

    /// One-sided ground plane through the origin, facing +Y
    #[must_use]
    pub fn ground(&mut self) -> Node {
        self.ground_with_normal(Vector::new(0.0, 1.0, 0.0))
    }

    /// One-sided ground plane through the origin with the given normal
    #[must_use]
    pub fn ground_with_normal(&mut self, normal: impl Into<Vector>) -> Node {
        self.shape(
            Primitive::Ground {
                normal: normal.into(),
            },
            Material::shared_default(),
        )
    }

    /// Material-only leaf
    #[must_use]
    pub fn material(&mut self, material: impl Into<Arc<Material>>) -> Node {
        Node::Material {
            id: self.reserve(1),
            material: material.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Property;

    #[test]
    fn test_leaves_take_consecutive_ids() {
        let mut scene = SceneBuilder::new();
        let a = scene.sphere(1.0);
        let b = scene.plane([0.0, 0.0, 1.0]);
        let c = scene.ground();
        let d = scene.material(Material::rgb(0.0, 1.0, 0.0));
        let ids: Vec<u32> = [a, b, c, d]
            .iter()
            .map(|n| n.id_for(Property::Sdf))
            .collect();
        assert_eq!(ids, [0, 1, 2, 3]);
        assert_eq!(scene.allocator().peek(), 4);
    }

    #[test]
    fn test_builder_continues_allocator() {
        let mut ids = IdAllocator::new();
        ids.reserve(10);
        let mut scene = SceneBuilder::with_allocator(ids);
        assert_eq!(scene.sphere(1.0).id_for(Property::Sdf), 10);
    }

    #[test]
    fn test_default_material_is_shared() {
        let mut scene = SceneBuilder::new();
        match scene.sphere(1.0) {
            Node::Shape { material, .. } => assert!(Material::is_shared_default(&material)),
            other => panic!("expected shape, got {:?}", other),
        }
    }
}
