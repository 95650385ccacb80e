//! # sdf-glsl
//!
//! Compiles signed-distance-field scene graphs into GLSL.
//!
//! A scene is a tree of shapes (sphere, plane, ground), translations and
//! smooth combinators (union, difference, cut). For each of three
//! per-point properties (distance, normal, color) the compiler emits a
//! list of uniquely named declarations, and splices them into a shader
//! template wherever it finds an `#evaluate <property>` line.
//!
//! ## Example
//!
//! ```rust
//! use sdf_glsl::prelude::*;
//!
//! let mut scene = SceneBuilder::new();
//! let floor = scene.ground();
//! let ball = scene
//!     .sphere(0.5)
//!     .with_material(Material::rgb(1.0, 0.2, 0.2))
//!     .translate_xyz(0.0, 0.5, 0.0);
//! let root = scene.union(vec![floor, ball], 0.1);
//!
//! let template = "\
//! void scene(vec3 point, out float d, out vec3 n, out vec3 c) {
//! \t#evaluate sdf
//! \t#evaluate normal
//! \t#evaluate color
//! \td = sdf; n = normal; c = color;
//! }
//! ";
//! let shader = TemplateCompiler::new(&root).compile(template);
//! assert!(shader.is_clean());
//! assert!(shader.source.contains("\tfloat sdf = sdf2;"));
//! ```

#![warn(missing_docs)]

pub mod expr;
pub mod glsl;
pub mod ids;
pub mod io;
pub mod material;
pub mod output;
pub mod property;
pub mod template;
pub mod types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::expr::{GlslType, Scalar, Vector};
    pub use crate::glsl::{compile_property, CompileError, PointSpace};
    pub use crate::ids::IdAllocator;
    pub use crate::io::{load_scene, save_scene, IoError, SceneDesc, SceneFile};
    pub use crate::material::Material;
    pub use crate::output::ShaderOutput;
    pub use crate::property::Property;
    pub use crate::template::{CompiledTemplate, TemplateCompiler};
    pub use crate::types::{Mapping, Node, OperatorKind, Primitive, SceneBuilder};
    pub use glam::Vec3;
}

// Re-exports for convenience
pub use template::TemplateCompiler;
pub use types::{Node, SceneBuilder};
