//! Scene description files
//!
//! A scene can be written down as JSON instead of being built in code.
//! The description carries no identifiers; [`SceneDesc::build`] allocates
//! them through a [`SceneBuilder`] in the same order the in-code builder
//! would, so a loaded scene compiles to exactly the same shader text.
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "root": {
//!     "type": "union",
//!     "smoothing": 0.2,
//!     "children": [
//!       { "type": "sphere", "radius": 0.5 },
//!       { "type": "translate", "offset": [1, 0, 0],
//!         "child": { "type": "sphere", "radius": 0.5, "material": { "color": [1, 0, 0] } } }
//!     ]
//!   }
//! }
//! ```

mod json;

pub use json::{from_json_string, load_scene, save_scene, to_json_string};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::expr::{Scalar, Vector};
use crate::material::Material;
use crate::types::{Mapping, Node, OperatorKind, Primitive, SceneBuilder};

/// Scene file errors
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Well-formed JSON describing an impossible scene
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
}

/// Scene file - top-level container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    /// Version of the crate that wrote the file
    pub version: String,
    /// Optional scene name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Root node
    pub root: SceneDesc,
}

impl SceneFile {
    /// Wrap a description
    pub fn new(root: SceneDesc) -> Self {
        SceneFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: None,
            root,
        }
    }

    /// Set the scene name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the root node
    pub fn build(&self, scene: &mut SceneBuilder) -> Result<Node, IoError> {
        self.root.build(scene)
    }
}

fn up() -> Vector {
    Vector::new(0.0, 1.0, 0.0)
}

/// Identifier-free description of a scene node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneDesc {
    /// Sphere at the origin
    Sphere {
        /// Radius
        radius: Scalar,
        /// Material; the shared default when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<Material>,
    },
    /// Two-sided plane through the origin
    Plane {
        /// Normal
        normal: Vector,
        /// Material; the shared default when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<Material>,
    },
    /// One-sided ground plane through the origin
    Ground {
        /// Normal, +Y when absent
        #[serde(default = "up")]
        normal: Vector,
        /// Material; the shared default when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<Material>,
    },
    /// Material-only leaf
    Material {
        /// Color
        color: Vector,
    },
    /// Translated subtree
    Translate {
        /// Offset
        offset: Vector,
        /// Subtree
        child: Box<SceneDesc>,
    },
    /// Smooth union
    Union {
        /// Smoothing factor
        smoothing: Scalar,
        /// Operands
        children: Vec<SceneDesc>,
    },
    /// Smooth difference
    Difference {
        /// Smoothing factor
        smoothing: Scalar,
        /// Operands
        children: Vec<SceneDesc>,
    },
    /// Smooth intersection
    Cut {
        /// Smoothing factor
        smoothing: Scalar,
        /// Operands
        children: Vec<SceneDesc>,
    },
}

impl SceneDesc {
    /// Build the described subtree, allocating identifiers from `scene`
    pub fn build(&self, scene: &mut SceneBuilder) -> Result<Node, IoError> {
        match self {
            SceneDesc::Sphere { radius, material } => Ok(scene.shape(
                Primitive::Sphere {
                    radius: radius.clone(),
                },
                material_arc(material),
            )),
            SceneDesc::Plane { normal, material } => Ok(scene.shape(
                Primitive::Plane {
                    normal: normal.clone(),
                },
                material_arc(material),
            )),
            SceneDesc::Ground { normal, material } => Ok(scene.shape(
                Primitive::Ground {
                    normal: normal.clone(),
                },
                material_arc(material),
            )),
            SceneDesc::Material { color } => Ok(scene.material(Material::new(color.clone()))),
            SceneDesc::Translate { offset, child } => {
                Ok(child.build(scene)?.translate(offset.clone()))
            }
            SceneDesc::Union {
                smoothing,
                children,
            } => build_operator(scene, OperatorKind::Union, smoothing, children),
            SceneDesc::Difference {
                smoothing,
                children,
            } => build_operator(scene, OperatorKind::Difference, smoothing, children),
            SceneDesc::Cut {
                smoothing,
                children,
            } => build_operator(scene, OperatorKind::Cut, smoothing, children),
        }
    }
}

fn material_arc(material: &Option<Material>) -> Arc<Material> {
    match material {
        Some(material) => Arc::new(material.clone()),
        None => Material::shared_default(),
    }
}

fn build_operator(
    scene: &mut SceneBuilder,
    kind: OperatorKind,
    smoothing: &Scalar,
    children: &[SceneDesc],
) -> Result<Node, IoError> {
    if children.len() < 2 {
        return Err(IoError::InvalidScene(format!(
            "{} needs at least two children, got {}",
            kind.name(),
            children.len()
        )));
    }
    let built = children
        .iter()
        .map(|child| child.build(scene))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(scene.operator(kind, built, smoothing.clone()))
}

impl Node {
    /// Describe this subtree, dropping identifiers
    pub fn to_desc(&self) -> SceneDesc {
        match self {
            Node::Shape {
                primitive,
                material,
                ..
            } => {
                let material = if Material::is_shared_default(material) {
                    None
                } else {
                    Some(Material::clone(material))
                };
                match primitive {
                    Primitive::Sphere { radius } => SceneDesc::Sphere {
                        radius: radius.clone(),
                        material,
                    },
                    Primitive::Plane { normal } => SceneDesc::Plane {
                        normal: normal.clone(),
                        material,
                    },
                    Primitive::Ground { normal } => SceneDesc::Ground {
                        normal: normal.clone(),
                        material,
                    },
                }
            }
            Node::Material { material, .. } => SceneDesc::Material {
                color: material.color.clone(),
            },
            Node::Transform { mapping, child } => match mapping {
                Mapping::Translate(offset) => SceneDesc::Translate {
                    offset: offset.clone(),
                    child: Box::new(child.to_desc()),
                },
            },
            Node::Operator {
                kind,
                smoothing,
                children,
                ..
            } => {
                let smoothing = smoothing.clone();
                let children = children.iter().map(Node::to_desc).collect();
                match kind {
                    OperatorKind::Union => SceneDesc::Union {
                        smoothing,
                        children,
                    },
                    OperatorKind::Difference => SceneDesc::Difference {
                        smoothing,
                        children,
                    },
                    OperatorKind::Cut => SceneDesc::Cut {
                        smoothing,
                        children,
                    },
                }
            }
        }
    }
}
