//! Scene graph types
//!
//! Defines the [`Node`] tree compiled into GLSL declarations. The tree is
//! built through a [`SceneBuilder`], which owns the identifier allocator;
//! after construction nodes are immutable.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::expr::{Scalar, Vector};
use crate::material::Material;
use crate::property::Property;

mod constructors;
mod operations;
mod transforms;

pub use constructors::SceneBuilder;

/// Category of a node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Leaf geometry (sphere, plane, ground)
    Shape,
    /// Material-only leaf
    Material,
    /// Coordinate-space decorator
    Transform,
    /// N-ary combinator
    Operator,
}

/// Leaf geometry. Every primitive sits at the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// Sphere around the origin
    Sphere {
        /// Sphere radius
        radius: Scalar,
    },
    /// Two-sided plane through the origin
    Plane {
        /// Plane normal
        normal: Vector,
    },
    /// One-sided half-space through the origin; negative below the surface
    Ground {
        /// Outward normal
        normal: Vector,
    },
}

impl Primitive {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Sphere { .. } => "sphere",
            Primitive::Plane { .. } => "plane",
            Primitive::Ground { .. } => "ground",
        }
    }
}

/// Local-to-parent mapping applied to positions by a transform node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mapping {
    /// `x + offset`
    Translate(Vector),
}

impl Mapping {
    /// Map a GLSL position expression from local space into parent space
    pub fn apply(&self, position: &str) -> String {
        match self {
            Mapping::Translate(offset) => format!("({} + {})", position, offset.render()),
        }
    }
}

/// N-ary combinator folding its children left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// Smooth union
    Union,
    /// Smooth subtraction of every later child from the first
    Difference,
    /// Smooth intersection
    Cut,
}

impl OperatorKind {
    /// Short name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Union => "union",
            OperatorKind::Difference => "difference",
            OperatorKind::Cut => "cut",
        }
    }
}

/// Scene graph node
///
/// A parent exclusively owns its children. Identifiers are assigned by the
/// [`SceneBuilder`] at construction and never change, so nodes are not
/// `Clone`: a copied subtree would declare the same variables twice.
#[derive(Debug, PartialEq)]
pub enum Node {
    /// Leaf geometry with a material
    Shape {
        /// Identifier base
        id: u32,
        /// Geometry
        primitive: Primitive,
        /// Surface material
        material: Arc<Material>,
    },

    /// Leaf that only provides a color
    Material {
        /// Identifier base
        id: u32,
        /// The material
        material: Arc<Material>,
    },

    /// Evaluates its child in a different coordinate space
    Transform {
        /// Local-to-parent mapping
        mapping: Mapping,
        /// Transformed subtree
        child: Box<Node>,
    },

    /// Smooth combination of two or more children
    Operator {
        /// Identifier base; `id + 1 ..= id + children.len() - 1` name the
        /// intermediate fold results
        id: u32,
        /// Combinator
        kind: OperatorKind,
        /// Smoothing factor passed to `smin` / `smax`
        smoothing: Scalar,
        /// Operands, at least two
        children: Vec<Node>,
    },
}

impl Node {
    /// Variant category
    pub fn category(&self) -> NodeCategory {
        match self {
            Node::Shape { .. } => NodeCategory::Shape,
            Node::Material { .. } => NodeCategory::Material,
            Node::Transform { .. } => NodeCategory::Transform,
            Node::Operator { .. } => NodeCategory::Operator,
        }
    }

    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Node::Shape { primitive, .. } => primitive.name(),
            Node::Material { .. } => "material",
            Node::Transform { mapping, .. } => match mapping {
                Mapping::Translate(_) => "translate",
            },
            Node::Operator { kind, .. } => kind.name(),
        }
    }

    /// Identifier whose `<tag><id>` variable holds `property` for this node.
    ///
    /// Transforms declare nothing and answer with their child's identifier.
    pub fn id_for(&self, property: Property) -> u32 {
        match self {
            Node::Shape { id, .. } | Node::Material { id, .. } | Node::Operator { id, .. } => *id,
            Node::Transform { child, .. } => child.id_for(property),
        }
    }

    /// Name of the variable holding `property` for this node
    pub fn var_for(&self, property: Property) -> String {
        property.var(self.id_for(property))
    }

    /// Total node count, transforms included
    pub fn node_count(&self) -> u32 {
        match self {
            Node::Shape { .. } | Node::Material { .. } => 1,
            Node::Transform { child, .. } => 1 + child.node_count(),
            Node::Operator { children, .. } => {
                1 + children.iter().map(Node::node_count).sum::<u32>()
            }
        }
    }

    /// Every variable a successful compile of `property` declares, in
    /// emission order
    pub fn declared_names(&self, property: Property) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_declared_names(property, &mut names);
        names
    }

    fn collect_declared_names(&self, property: Property, names: &mut Vec<String>) {
        match self {
            Node::Shape { id, .. } => names.push(property.var(*id)),
            Node::Material { id, .. } => {
                if property == Property::Color {
                    names.push(property.var(*id));
                }
            }
            Node::Transform { child, .. } => child.collect_declared_names(property, names),
            Node::Operator { id, children, .. } => {
                for child in children {
                    child.collect_declared_names(property, names);
                }
                for step in 1..children.len() as u32 {
                    names.push(property.var(id + step));
                }
                names.push(property.var(*id));
            }
        }
    }

    /// Replace the material of every shape and material leaf in this
    /// subtree. All leaves share one `Arc`.
    #[must_use]
    pub fn with_material(self, material: impl Into<Arc<Material>>) -> Self {
        self.paint(&material.into())
    }

    fn paint(self, material: &Arc<Material>) -> Self {
        match self {
            Node::Shape { id, primitive, .. } => Node::Shape {
                id,
                primitive,
                material: Arc::clone(material),
            },
            Node::Material { id, .. } => Node::Material {
                id,
                material: Arc::clone(material),
            },
            Node::Transform { mapping, child } => Node::Transform {
                mapping,
                child: Box::new(child.paint(material)),
            },
            Node::Operator {
                id,
                kind,
                smoothing,
                children,
            } => Node::Operator {
                id,
                kind,
                smoothing,
                children: children.into_iter().map(|c| c.paint(material)).collect(),
            },
        }
    }
}
