//! GLSL expressions
//!
//! Values that render themselves as GLSL source text. An [`Expr`] is a
//! numeric literal, a 3-vector literal or a raw source fragment; the
//! [`Scalar`] and [`Vector`] wrappers pin the value domain so a
//! declaration can never be bound to an expression of the wrong type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GLSL value domain of an expression or declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlslType {
    /// `float`
    Float,
    /// `vec3`
    Vec3,
}

impl GlslType {
    /// GLSL keyword for this type
    pub fn keyword(self) -> &'static str {
        match self {
            GlslType::Float => "float",
            GlslType::Vec3 => "vec3",
        }
    }
}

impl fmt::Display for GlslType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A value that renders as GLSL source text
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal, always rendered as a float literal
    Number(f32),
    /// `vec3(x, y, z)` over three scalar expressions
    Vec3(Box<[Expr; 3]>),
    /// Arbitrary GLSL source, rendered inside parentheses
    Raw {
        /// The source fragment
        source: String,
        /// Declared domain of the fragment
        ty: GlslType,
    },
}

impl Expr {
    /// Value domain of this expression
    pub fn ty(&self) -> GlslType {
        match self {
            Expr::Number(_) => GlslType::Float,
            Expr::Vec3(_) => GlslType::Vec3,
            Expr::Raw { ty, .. } => *ty,
        }
    }

    /// Render as GLSL source
    pub fn render(&self) -> String {
        match self {
            Expr::Number(value) => render_number(*value),
            Expr::Vec3(components) => {
                let [x, y, z] = components.as_ref();
                format!("vec3({}, {}, {})", x.render(), y.render(), z.render())
            }
            Expr::Raw { source, .. } => format!("({})", source),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Format a number so GLSL always reads it as a float literal.
///
/// Rust's `Display` for floats never uses exponent notation, so the only
/// case to patch is an integral value, which prints without a fraction.
pub fn render_number(value: f32) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

// ============================================================================
// Typed wrappers
// ============================================================================

/// An expression in the `float` domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ScalarRepr", into = "ScalarRepr")]
pub struct Scalar(Expr);

impl Scalar {
    /// Raw GLSL fragment evaluating to a `float`
    pub fn raw(source: impl Into<String>) -> Self {
        Scalar(Expr::Raw {
            source: source.into(),
            ty: GlslType::Float,
        })
    }

    /// Underlying expression
    pub fn as_expr(&self) -> &Expr {
        &self.0
    }

    /// Render as GLSL source
    pub fn render(&self) -> String {
        self.0.render()
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar(Expr::Number(value))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An expression in the `vec3` domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VectorRepr", into = "VectorRepr")]
pub struct Vector(Expr);

impl Vector {
    /// `vec3(x, y, z)` over three scalar expressions
    pub fn new(x: impl Into<Scalar>, y: impl Into<Scalar>, z: impl Into<Scalar>) -> Self {
        Vector(Expr::Vec3(Box::new([x.into().0, y.into().0, z.into().0])))
    }

    /// `vec3(0.0, 0.0, 0.0)`
    pub fn zero() -> Self {
        Vector::new(0.0, 0.0, 0.0)
    }

    /// Raw GLSL fragment evaluating to a `vec3`
    pub fn raw(source: impl Into<String>) -> Self {
        Vector(Expr::Raw {
            source: source.into(),
            ty: GlslType::Vec3,
        })
    }

    /// Underlying expression
    pub fn as_expr(&self) -> &Expr {
        &self.0
    }

    /// Render as GLSL source
    pub fn render(&self) -> String {
        self.0.render()
    }
}

impl From<glam::Vec3> for Vector {
    fn from(v: glam::Vec3) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Vector {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vector::new(x, y, z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Serde representations
// ============================================================================

/// JSON form of a scalar: a number or a raw GLSL string
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Number(f32),
    Raw(String),
}

impl From<ScalarRepr> for Scalar {
    fn from(repr: ScalarRepr) -> Self {
        match repr {
            ScalarRepr::Number(value) => Scalar::from(value),
            ScalarRepr::Raw(source) => Scalar::raw(source),
        }
    }
}

impl From<Scalar> for ScalarRepr {
    fn from(scalar: Scalar) -> Self {
        match scalar.0 {
            Expr::Number(value) => ScalarRepr::Number(value),
            Expr::Raw { source, .. } => ScalarRepr::Raw(source),
            // Not constructible through the Scalar API
            Expr::Vec3(_) => ScalarRepr::Raw(scalar.0.render()),
        }
    }
}

/// JSON form of a vector: three scalars or a raw GLSL string
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum VectorRepr {
    Components([Scalar; 3]),
    Raw(String),
}

impl From<VectorRepr> for Vector {
    fn from(repr: VectorRepr) -> Self {
        match repr {
            VectorRepr::Components([x, y, z]) => Vector::new(x, y, z),
            VectorRepr::Raw(source) => Vector::raw(source),
        }
    }
}

impl From<Vector> for VectorRepr {
    fn from(vector: Vector) -> Self {
        match vector.0 {
            Expr::Vec3(components) => {
                let [x, y, z] = *components;
                VectorRepr::Components([Scalar(x), Scalar(y), Scalar(z)])
            }
            Expr::Raw { source, .. } => VectorRepr::Raw(source),
            Expr::Number(_) => VectorRepr::Raw(vector.0.render()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_number_gets_fraction() {
        assert_eq!(render_number(2.0), "2.0");
        assert_eq!(render_number(0.0), "0.0");
        assert_eq!(render_number(-3.0), "-3.0");
    }

    #[test]
    fn test_fractional_number_verbatim() {
        assert_eq!(render_number(2.5), "2.5");
        assert_eq!(render_number(0.2), "0.2");
        assert_eq!(render_number(-0.75), "-0.75");
    }

    #[test]
    fn test_render_is_idempotent() {
        let s = Scalar::from(2.0);
        assert_eq!(s.render(), s.render());
        assert_eq!(s.render(), "2.0");
    }

    #[test]
    fn test_vector_renders_constructor() {
        let v = Vector::new(1.0, 0.5, Scalar::raw("u_time * 2.0"));
        assert_eq!(v.render(), "vec3(1.0, 0.5, (u_time * 2.0))");
        assert_eq!(v.as_expr().ty(), GlslType::Vec3);
    }

    #[test]
    fn test_raw_is_parenthesised() {
        let s = Scalar::raw("a + b");
        assert_eq!(s.render(), "(a + b)");
        assert_eq!(s.as_expr().ty(), GlslType::Float);
        assert_eq!(Vector::raw("u_offset").render(), "(u_offset)");
    }

    #[test]
    fn test_glam_conversion() {
        let v = Vector::from(glam::Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(v.render(), "vec3(0.0, 1.0, 0.0)");
    }

    #[test]
    fn test_serde_forms() {
        let s: Scalar = serde_json::from_str("0.5").unwrap();
        assert_eq!(s, Scalar::from(0.5));
        let s: Scalar = serde_json::from_str("\"u_radius\"").unwrap();
        assert_eq!(s.render(), "(u_radius)");

        let v: Vector = serde_json::from_str("[1.0, \"u_y\", 0]").unwrap();
        assert_eq!(v.render(), "vec3(1.0, (u_y), 0.0)");
        let v: Vector = serde_json::from_str("\"u_offset\"").unwrap();
        assert_eq!(v.as_expr().ty(), GlslType::Vec3);
    }
}
