//! Per-point scene properties
//!
//! Every scene node can be asked for one of three properties. The tag
//! doubles as the prefix of every variable declared for it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expr::GlslType;
use crate::glsl::CompileError;

/// A property the generated shader evaluates at a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Signed distance to the surface
    Sdf,
    /// Surface normal
    Normal,
    /// Surface color
    Color,
}

impl Property {
    /// All properties, in the order a template usually evaluates them
    pub const ALL: [Property; 3] = [Property::Sdf, Property::Normal, Property::Color];

    /// Variable-name prefix and directive keyword
    pub fn tag(self) -> &'static str {
        match self {
            Property::Sdf => "sdf",
            Property::Normal => "normal",
            Property::Color => "color",
        }
    }

    /// Declared GLSL type of every variable holding this property
    pub fn glsl_type(self) -> GlslType {
        match self {
            Property::Sdf => GlslType::Float,
            Property::Normal | Property::Color => GlslType::Vec3,
        }
    }

    /// Variable name for this property under the given identifier
    #[inline]
    pub fn var(self, id: u32) -> String {
        format!("{}{}", self.tag(), id)
    }

    /// `<type> <tag><id> = <rhs>;`
    pub fn declare(self, id: u32, rhs: &str) -> String {
        format!("{} {} = {};", self.glsl_type(), self.var(id), rhs)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Property {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sdf" => Ok(Property::Sdf),
            "normal" => Ok(Property::Normal),
            "color" => Ok(Property::Color),
            other => Err(CompileError::UnknownProperty(other.to_string())),
        }
    }
}
