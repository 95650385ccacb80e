//! Common test helpers for sdf-glsl integration tests

#![allow(dead_code)]

use sdf_glsl::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Standard test scenes
// ============================================================================

/// Single sphere of radius 0.5
pub fn test_sphere(scene: &mut SceneBuilder) -> Node {
    scene.sphere(0.5)
}

/// Two spheres in a smooth union
pub fn test_union(scene: &mut SceneBuilder) -> Node {
    let a = scene.sphere(0.5);
    let b = scene.sphere(0.5).translate_xyz(0.6, 0.0, 0.0);
    scene.union(vec![a, b], 0.2)
}

/// Nested operators, transforms at several depths, every primitive kind
pub fn test_complex_scene(scene: &mut SceneBuilder) -> Node {
    let floor = scene.ground().with_material(Material::rgb(0.5, 0.5, 0.5));
    let body = {
        let core = scene.sphere(1.0).with_material(Material::rgb(1.0, 0.0, 0.0));
        let slab = scene.plane([0.0, 0.0, 1.0]).translate_xyz(0.0, 0.0, 0.3);
        let bite = scene
            .sphere(0.4)
            .translate_xyz(0.5, 0.5, 0.0)
            .translate_xyz(0.1, 0.0, 0.0);
        scene.difference(vec![core, slab, bite], 0.05)
    };
    let halo = {
        let a = scene.sphere(0.2).translate_xyz(-1.0, 1.0, 0.0);
        let b = scene.sphere(0.2).translate_xyz(1.0, 1.0, 0.0);
        let c = scene.sphere(0.2).translate_xyz(0.0, 1.5, 0.0);
        let d = scene.sphere(0.2).translate_xyz(0.0, 1.0, 1.0);
        scene.cut(vec![a, b, c, d], 0.3)
    };
    let lifted = scene.union(vec![body, halo], 0.2).translate_xyz(0.0, 1.0, 0.0);
    scene.union(vec![floor, lifted], 0.1)
}

/// Template evaluating every property inside one function body
pub const SURFACE_TEMPLATE: &str = "\
float smin(float a, float b, float k);
float smax(float a, float b, float k);

void surface(vec3 point, out float d, out vec3 n, out vec3 c) {
\t#evaluate sdf
\t#evaluate normal
\t#evaluate color
\td = sdf;
\tn = normal;
\tc = color;
}
";

// ============================================================================
// Assertions
// ============================================================================

/// Variables declared on the left-hand side of `<type> <name> = ...;` lines
pub fn declared_variables(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim_start)
        .filter(|line| line.starts_with("float ") || line.starts_with("vec3 "))
        .filter(|line| line.contains(" = "))
        .filter_map(|line| line.split_whitespace().nth(1).map(str::to_string))
        .collect()
}

/// Assert no variable is declared twice
pub fn assert_unique(names: &[String], context: &str) {
    let mut seen = HashSet::new();
    for name in names {
        assert!(seen.insert(name), "{}: '{}' declared twice", context, name);
    }
}
