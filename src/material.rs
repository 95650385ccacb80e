//! Surface materials
//!
//! A material answers the `color` property for the shape that owns it.
//! Shapes hold their material behind an [`Arc`]; shapes built without one
//! all point at the same default (opaque white).

use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

use crate::expr::Vector;
use crate::glsl::CompileError;
use crate::output::ShaderOutput;
use crate::property::Property;

static DEFAULT_MATERIAL: LazyLock<Arc<Material>> =
    LazyLock::new(|| Arc::new(Material::new(Vector::new(1.0, 1.0, 1.0))));

/// Flat surface material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Surface color (linear RGB)
    pub color: Vector,
}

impl Material {
    /// Material with the given color expression
    pub fn new(color: impl Into<Vector>) -> Self {
        Material {
            color: color.into(),
        }
    }

    /// Material from RGB components
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Material::new(Vector::new(r, g, b))
    }

    /// The shared default material (opaque white)
    pub fn shared_default() -> Arc<Material> {
        Arc::clone(&*DEFAULT_MATERIAL)
    }

    /// Whether `material` is the shared default instance
    pub fn is_shared_default(material: &Arc<Material>) -> bool {
        Arc::ptr_eq(material, &*DEFAULT_MATERIAL)
    }

    /// Declare `property` under `id`. Only `color` is supported.
    pub fn compile(
        &self,
        id: u32,
        out: &mut ShaderOutput,
        property: Property,
    ) -> Result<(), CompileError> {
        match property {
            Property::Color => {
                out.write(property.declare(id, &self.color.render()));
                Ok(())
            }
            Property::Sdf | Property::Normal => Err(CompileError::UnsupportedProperty {
                node: "material",
                property,
            }),
        }
    }
}
