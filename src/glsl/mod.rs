//! GLSL code generation for scene graphs
//!
//! Compiling a node for a [`Property`] writes one declaration per variable
//! the node is responsible for, children first. The last line always
//! declares `<tag><id>` for the node itself (or, for a transform, for the
//! node it wraps).
//!
//! # Usage
//!
//! ```rust
//! use sdf_glsl::prelude::*;
//!
//! let mut scene = SceneBuilder::new();
//! let a = scene.sphere(0.5);
//! let b = scene.sphere(0.5).translate_xyz(0.6, 0.0, 0.0);
//! let root = scene.union(vec![a, b], 0.2);
//!
//! let lines = compile_property(&root, Property::Sdf).unwrap();
//! assert_eq!(lines.last().unwrap(), "float sdf = sdf2;");
//! ```

mod fold;
mod space;
mod transpiler;

pub use space::PointSpace;
pub use transpiler::POINT;

use thiserror::Error;

use crate::output::ShaderOutput;
use crate::property::Property;
use crate::types::Node;

/// Errors raised while compiling a property
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A node was asked for a property it cannot produce
    #[error("{node} does not support property '{property}'")]
    UnsupportedProperty {
        /// Node kind
        node: &'static str,
        /// Requested property
        property: Property,
    },

    /// A directive named something other than sdf, normal or color
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// An operator node with fewer than two children
    #[error("{kind} needs at least two operands, got {count}")]
    TooFewOperands {
        /// Operator kind
        kind: &'static str,
        /// Number of children found
        count: usize,
    },
}

/// `<type> <tag> = <tag><id>;`, binding the public name for `property`
pub fn alias_line(property: Property, id: u32) -> String {
    format!(
        "{} {} = {};",
        property.glsl_type(),
        property.tag(),
        property.var(id)
    )
}

/// Compile `property` for `root` in world space and append the public alias.
///
/// Lines are unindented. On error, nothing is returned; use
/// [`Node::compile`] directly to keep partial output.
pub fn compile_property(root: &Node, property: Property) -> Result<Vec<String>, CompileError> {
    let mut out = ShaderOutput::new();
    root.compile(&PointSpace::identity(), &mut out, property)?;
    out.write(alias_line(property, root.id_for(property)));
    Ok(out.into_lines())
}
