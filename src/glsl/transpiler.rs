//! Property dispatch: Node → GLSL declarations
//!
//! Shapes evaluate their formula against the accumulated point space,
//! transforms push their mapping and recurse, operators fold their
//! children (see `fold`).

use super::fold;
use super::{CompileError, PointSpace};
use crate::expr::Vector;
use crate::output::ShaderOutput;
use crate::property::Property;
use crate::types::{Node, Primitive};

/// Name of the world-space sample point in generated code
pub const POINT: &str = "point";

impl Node {
    /// Write the declarations for `property` under the accumulated `space`.
    ///
    /// The last line written on success declares [`Node::var_for`]. Lines
    /// written before an error are left in `out`.
    pub fn compile(
        &self,
        space: &PointSpace<'_>,
        out: &mut ShaderOutput,
        property: Property,
    ) -> Result<(), CompileError> {
        match self {
            Node::Shape {
                id,
                primitive,
                material,
            } => match property {
                Property::Color => material.compile(*id, out, property),
                Property::Sdf => {
                    out.write(property.declare(*id, &shape_sdf(primitive, space)));
                    Ok(())
                }
                Property::Normal => {
                    out.write(property.declare(*id, &shape_normal(primitive, space)));
                    Ok(())
                }
            },

            Node::Material { id, material } => material.compile(*id, out, property),

            Node::Transform { mapping, child } => {
                child.compile(&space.push_inner(mapping), out, property)
            }

            Node::Operator {
                id,
                kind,
                smoothing,
                children,
            } => fold::compile_operator(*id, *kind, smoothing, children, space, out, property),
        }
    }
}

/// World-space position of a shape's local origin
fn origin(space: &PointSpace<'_>) -> String {
    space.apply(Vector::zero().render())
}

fn shape_sdf(primitive: &Primitive, space: &PointSpace<'_>) -> String {
    let origin = origin(space);
    match primitive {
        Primitive::Sphere { radius } => {
            format!("length({} - {}) - {}", POINT, origin, radius)
        }
        Primitive::Plane { normal } => {
            format!("abs(dot({} - {}, {}))", POINT, origin, normal)
        }
        Primitive::Ground { normal } => {
            format!("dot({} - {}, {})", POINT, origin, normal)
        }
    }
}

fn shape_normal(primitive: &Primitive, space: &PointSpace<'_>) -> String {
    match primitive {
        Primitive::Sphere { .. } => format!("normalize({} - {})", POINT, origin(space)),
        Primitive::Plane { normal } | Primitive::Ground { normal } => {
            format!("normalize({})", normal)
        }
    }
}
