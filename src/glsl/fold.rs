//! Operator folding
//!
//! An operator over children `c0..cn` compiles every child, then folds
//! left to right: step `i` combines the running result with `ci` into the
//! intermediate variable `<tag><id + i>`. The operator's own variable
//! aliases the last step.
//!
//! Distances combine with `smin` / `smax`. Normals and colors are mixed by
//! how far each operand's distance is from the combined distance of the
//! same step, so they reference `sdf` variables declared by an earlier
//! `sdf` compile in the same GLSL scope. When both operands sit exactly on
//! the combined distance the weight is 0.5.

use super::{CompileError, PointSpace};
use crate::expr::Scalar;
use crate::output::ShaderOutput;
use crate::property::Property;
use crate::types::{Node, OperatorKind};

/// Running fold result
struct Operand {
    /// Variable holding the requested property
    value: String,
    /// Variable holding the matching distance
    sdf: String,
}

pub(super) fn compile_operator(
    id: u32,
    kind: OperatorKind,
    smoothing: &Scalar,
    children: &[Node],
    space: &PointSpace<'_>,
    out: &mut ShaderOutput,
    property: Property,
) -> Result<(), CompileError> {
    let (first, rest) = match children.split_first() {
        Some((first, rest)) if !rest.is_empty() => (first, rest),
        _ => {
            return Err(CompileError::TooFewOperands {
                kind: kind.name(),
                count: children.len(),
            })
        }
    };

    for child in children {
        child.compile(space, out, property)?;
    }

    let mut acc = Operand {
        value: first.var_for(property),
        sdf: first.var_for(Property::Sdf),
    };

    for (step, child) in (1u32..).zip(rest) {
        let step_id = id + step;
        let combined_sdf = Property::Sdf.var(step_id);
        let rhs = blend(kind, property, &acc, child, &combined_sdf, smoothing);
        out.write(property.declare(step_id, &rhs));
        acc = Operand {
            value: property.var(step_id),
            sdf: combined_sdf,
        };
    }

    out.write(property.declare(id, &acc.value));
    Ok(())
}

fn blend(
    kind: OperatorKind,
    property: Property,
    acc: &Operand,
    child: &Node,
    combined_sdf: &str,
    k: &Scalar,
) -> String {
    let value = child.var_for(property);
    let sdf = child.var_for(Property::Sdf);

    match (kind, property) {
        (OperatorKind::Union, Property::Sdf) => format!("smin({}, {}, {})", acc.value, value, k),
        (OperatorKind::Difference, Property::Sdf) => {
            format!("smax({}, -{}, {})", acc.value, value, k)
        }
        (OperatorKind::Cut, Property::Sdf) => format!("smax({}, {}, {})", acc.value, value, k),

        // The subtracted volume is inside-out, so its surface faces the other way
        (OperatorKind::Difference, Property::Normal) => mix(
            &acc.value,
            &format!("-{}", value),
            &acc.sdf,
            &format!("-{}", sdf),
            combined_sdf,
        ),
        (OperatorKind::Union | OperatorKind::Cut, Property::Normal)
        | (_, Property::Color) => mix(&acc.value, &value, &acc.sdf, &sdf, combined_sdf),
    }
}

/// `mix(a, b, w)` with `w = |da - c| / (|da - c| + |db - c|)`, so the operand
/// closer to the combined distance dominates; `w = 0.5` when the
/// denominator is zero
fn mix(a: &str, b: &str, dist_a: &str, dist_b: &str, combined: &str) -> String {
    let near = format!("abs({} - {})", dist_a, combined);
    let total = format!("{} + abs({} - {})", near, dist_b, combined);
    format!(
        "mix({}, {}, ({} > 0.0 ? {} / ({}) : 0.5))",
        a, b, total, near, total
    )
}
