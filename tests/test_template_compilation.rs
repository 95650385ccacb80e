//! Integration tests: template compilation
//!
//! Verifies directive substitution, indentation, pass-through and
//! per-directive error recovery on whole documents.

mod common;

use common::*;
use sdf_glsl::prelude::*;

// ============================================================================
// Substitution
// ============================================================================

#[test]
fn single_sphere_sdf_scenario() {
    let mut scene = SceneBuilder::new();
    let root = test_sphere(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("#evaluate sdf\n");

    assert_eq!(
        compiled.source,
        "float sdf0 = length(point - vec3(0.0, 0.0, 0.0)) - 0.5;\nfloat sdf = sdf0;\n"
    );
}

#[test]
fn union_of_two_spheres_scenario() {
    let mut scene = SceneBuilder::new();
    let root = test_union(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("#evaluate sdf");
    let lines: Vec<&str> = compiled.source.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("float sdf0 = "));
    assert!(lines[1].starts_with("float sdf1 = "));
    assert_eq!(lines[2], "float sdf3 = smin(sdf0, sdf1, 0.2);");
    assert_eq!(lines[3], "float sdf2 = sdf3;");
    assert_eq!(lines[4], "float sdf = sdf2;");
    let intermediates = lines.iter().filter(|l| l.contains("smin(")).count();
    assert_eq!(intermediates, 1);
}

#[test]
fn surface_template_declares_every_property() {
    let mut scene = SceneBuilder::new();
    let root = test_complex_scene(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile(SURFACE_TEMPLATE);

    assert!(compiled.is_clean());
    assert_eq!(compiled.directive_count, 3);
    for property in Property::ALL {
        let alias = format!(
            "\t{} {} = {};",
            property.glsl_type(),
            property,
            root.var_for(property)
        );
        assert!(
            compiled.source.contains(&alias),
            "missing alias line {:?}",
            alias
        );
    }
    assert!(compiled.source.ends_with("\tc = color;\n}\n"));
}

#[test]
fn substituted_lines_follow_directive_indentation() {
    let mut scene = SceneBuilder::new();
    let root = test_union(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("{\n\t\t\t#evaluate normal\n}\n");

    let lines: Vec<&str> = compiled.source.lines().collect();
    assert_eq!(lines.first(), Some(&"{"));
    assert_eq!(lines.last(), Some(&"}"));
    for line in &lines[1..lines.len() - 1] {
        assert!(line.starts_with("\t\t\tvec3 normal"), "bad line {:?}", line);
        assert!(!line.starts_with("\t\t\t\t"));
    }
}

// ============================================================================
// Pass-through
// ============================================================================

#[test]
fn template_without_directives_is_unchanged() {
    let mut scene = SceneBuilder::new();
    let root = test_complex_scene(&mut scene);
    let template = "#version 330\n\n// #evaluate sdf in a comment\nvoid main() {\n    #evaluate sdf\n}\n";

    let compiled = TemplateCompiler::new(&root).compile(template);
    assert_eq!(compiled.source, template);
    assert_eq!(compiled.directive_count, 0);
}

#[test]
fn missing_trailing_newline_is_preserved() {
    let mut scene = SceneBuilder::new();
    let root = test_sphere(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("a\nb");
    assert_eq!(compiled.source, "a\nb");
}

#[test]
fn crlf_template_without_directives_is_unchanged() {
    let mut scene = SceneBuilder::new();
    let root = test_sphere(&mut scene);
    for template in ["void main() {\r\n}\r\n", "a\r\n\r\nb", "mixed\r\nendings\n"] {
        let compiled = TemplateCompiler::new(&root).compile(template);
        assert_eq!(compiled.source, template);
    }
}

#[test]
fn crlf_template_substitutes_with_crlf_lines() {
    let mut scene = SceneBuilder::new();
    let root = test_union(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("{\r\n\t#evaluate sdf\r\n}\r\n");

    assert!(compiled.is_clean());
    assert!(compiled.source.ends_with("\tfloat sdf = sdf2;\r\n}\r\n"));
    let bare_newlines = compiled.source.matches('\n').count();
    assert_eq!(bare_newlines, compiled.source.matches("\r\n").count());
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn unsupported_property_yields_one_comment_and_continues() {
    let mut scene = SceneBuilder::new();
    let root = scene.material(Material::rgb(0.1, 0.2, 0.3));
    let compiled =
        TemplateCompiler::new(&root).compile("before\n#evaluate sdf\nmiddle\n#evaluate color\nafter\n");

    let lines: Vec<&str> = compiled.source.lines().collect();
    assert_eq!(
        lines,
        [
            "before",
            "// #evaluate sdf: material does not support property 'sdf'",
            "middle",
            "vec3 color0 = vec3(0.1, 0.2, 0.3);",
            "vec3 color = color0;",
            "after",
        ]
    );
    assert_eq!(compiled.failures.len(), 1);
    assert_eq!(compiled.failures[0].line, 2);
    assert_eq!(compiled.failures[0].tag, "sdf");
}

#[test]
fn partial_declarations_stay_before_comment() {
    let mut scene = SceneBuilder::new();
    let shape = scene.sphere(1.0);
    let paint = scene.material(Material::rgb(1.0, 1.0, 0.0));
    let root = scene.union(vec![shape, paint], 0.1);

    let compiled = TemplateCompiler::new(&root).compile("\t#evaluate normal");
    let lines: Vec<&str> = compiled.source.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("\tvec3 normal0 = normalize("));
    assert_eq!(
        lines[1],
        "\t// #evaluate normal: material does not support property 'normal'"
    );
}

#[test]
fn unknown_property_is_commented_out() {
    let mut scene = SceneBuilder::new();
    let root = test_sphere(&mut scene);
    let compiled = TemplateCompiler::new(&root).compile("\t#evaluate roughness\n");

    assert_eq!(
        compiled.source,
        "\t// #evaluate roughness: unknown property 'roughness'\n"
    );
    assert!(matches!(
        compiled.failures[0].error,
        CompileError::UnknownProperty(ref tag) if tag == "roughness"
    ));
}
