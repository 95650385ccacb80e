//! Shader template compilation
//!
//! A template is ordinary shader text in which a line of the form
//!
//! ```text
//! <tabs>#evaluate <property>
//! ```
//!
//! is replaced by the declarations computing `<property>` for the scene,
//! followed by `<type> <property> = <tag><id>;`. The leading tabs set the
//! indentation of the inserted lines. Every other line is copied as is.
//!
//! A directive that fails (unknown property, or a node that cannot produce
//! the property) becomes a single `//` comment describing the error and the
//! rest of the template is still processed. Declarations written before
//! the failure stay in place; they are never referenced.

use regex::Regex;
use std::sync::LazyLock;

use crate::glsl::{alias_line, CompileError, PointSpace};
use crate::output::ShaderOutput;
use crate::property::Property;
use crate::types::Node;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\t*)#evaluate (\w+)$").expect("directive pattern is valid")
});

/// A recognised `#evaluate` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'t> {
    /// Number of leading tabs
    pub depth: usize,
    /// Property word as written
    pub tag: &'t str,
}

impl<'t> Directive<'t> {
    /// Recognise a directive line; trailing whitespace is ignored
    pub fn parse(line: &'t str) -> Option<Self> {
        let caps = DIRECTIVE.captures(line.trim_end())?;
        Some(Directive {
            depth: caps.get(1)?.as_str().len(),
            tag: caps.get(2)?.as_str(),
        })
    }
}

/// A directive that produced a comment instead of declarations
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveFailure {
    /// 1-based template line number
    pub line: usize,
    /// Property word as written
    pub tag: String,
    /// What went wrong
    pub error: CompileError,
}

/// Result of compiling a template
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    /// Generated shader source
    pub source: String,
    /// Number of directives encountered
    pub directive_count: usize,
    /// Directives that failed
    pub failures: Vec<DirectiveFailure>,
}

impl CompiledTemplate {
    /// Whether every directive was substituted
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Splices a scene's property declarations into shader templates
#[derive(Debug, Clone, Copy)]
pub struct TemplateCompiler<'a> {
    root: &'a Node,
    aliases: bool,
}

impl<'a> TemplateCompiler<'a> {
    /// Compiler for the scene rooted at `root`
    pub fn new(root: &'a Node) -> Self {
        TemplateCompiler {
            root,
            aliases: true,
        }
    }

    /// Whether to append the public `<type> <tag> = <tag><id>;` line after
    /// each substitution (default: true)
    #[must_use]
    pub fn with_aliases(mut self, aliases: bool) -> Self {
        self.aliases = aliases;
        self
    }

    /// Compile a template document.
    ///
    /// Lines are split on `\n` only. Non-directive lines are copied with
    /// any `\r` they carry, and generated lines take the directive line's
    /// terminator, so CRLF templates stay CRLF.
    pub fn compile(&self, template: &str) -> CompiledTemplate {
        let mut out = ShaderOutput::new();
        let mut directive_count = 0;
        let mut failures = Vec::new();
        let mut sdf_seen = false;

        let body = template.strip_suffix('\n').unwrap_or(template);
        for (index, raw) in body.split('\n').enumerate() {
            let (line, crlf) = match raw.strip_suffix('\r') {
                Some(line) => (line, true),
                None => (raw, false),
            };
            let Some(directive) = Directive::parse(line) else {
                out.write_verbatim(raw);
                continue;
            };
            directive_count += 1;

            let first_generated = out.len();
            out.push_indent(directive.depth);
            let result = directive
                .tag
                .parse::<Property>()
                .and_then(|property| {
                    if property != Property::Sdf && !sdf_seen {
                        log::warn!(
                            "line {}: '{}' evaluated before any 'sdf' directive; \
                             blend weights reference sdf variables",
                            index + 1,
                            property
                        );
                    }
                    sdf_seen |= property == Property::Sdf;
                    self.substitute(property, &mut out)
                });
            if let Err(error) = result {
                log::warn!("line {}: #evaluate {}: {}", index + 1, directive.tag, error);
                out.write(format!("// #evaluate {}: {}", directive.tag, error));
                failures.push(DirectiveFailure {
                    line: index + 1,
                    tag: directive.tag.to_string(),
                    error,
                });
            }
            out.pop_indent(directive.depth);
            if crlf {
                out.terminate_since(first_generated, "\r");
            }
        }

        let mut source = out.into_lines().join("\n");
        if template.ends_with('\n') {
            source.push('\n');
        }

        CompiledTemplate {
            source,
            directive_count,
            failures,
        }
    }

    fn substitute(&self, property: Property, out: &mut ShaderOutput) -> Result<(), CompileError> {
        let before = out.len();
        self.root
            .compile(&PointSpace::identity(), out, property)?;
        if self.aliases {
            out.write(alias_line(property, self.root.id_for(property)));
        }
        log::debug!(
            "#evaluate {}: {} line(s) for {} rooted at {}",
            property,
            out.len() - before,
            self.root.name(),
            self.root.var_for(property)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::types::SceneBuilder;

    #[test]
    fn test_parse_directive() {
        assert_eq!(
            Directive::parse("\t\t#evaluate sdf  "),
            Some(Directive {
                depth: 2,
                tag: "sdf"
            })
        );
        assert_eq!(
            Directive::parse("#evaluate bogus"),
            Some(Directive {
                depth: 0,
                tag: "bogus"
            })
        );
        assert_eq!(Directive::parse("  #evaluate sdf"), None);
        assert_eq!(Directive::parse("#evaluate sdf normal"), None);
        assert_eq!(Directive::parse("x = 1; #evaluate sdf"), None);
        assert_eq!(Directive::parse("#evaluate"), None);
    }

    #[test]
    fn test_no_directives_passes_through() {
        let mut scene = SceneBuilder::new();
        let root = scene.sphere(1.0);
        let template = "void main() {\n\tgl_FragColor = vec4(1.0);\n}\n";
        let compiled = TemplateCompiler::new(&root).compile(template);
        assert_eq!(compiled.source, template);
        assert_eq!(compiled.directive_count, 0);
    }

    #[test]
    fn test_substitution_is_indented() {
        let mut scene = SceneBuilder::new();
        let root = scene.sphere(0.5);
        let compiled = TemplateCompiler::new(&root).compile("{\n\t#evaluate sdf\n}");
        assert_eq!(
            compiled.source,
            "{\n\tfloat sdf0 = length(point - vec3(0.0, 0.0, 0.0)) - 0.5;\n\tfloat sdf = sdf0;\n}"
        );
        assert!(compiled.is_clean());
    }

    #[test]
    fn test_unknown_property_becomes_comment() {
        let mut scene = SceneBuilder::new();
        let root = scene.sphere(0.5);
        let compiled = TemplateCompiler::new(&root).compile("#evaluate albedo\n#evaluate sdf\n");
        let lines: Vec<&str> = compiled.source.lines().collect();
        assert_eq!(lines[0], "// #evaluate albedo: unknown property 'albedo'");
        assert_eq!(lines.len(), 3);
        assert_eq!(compiled.failures.len(), 1);
        assert_eq!(compiled.failures[0].line, 1);
    }

    #[test]
    fn test_unsupported_property_continues() {
        let mut scene = SceneBuilder::new();
        let root = scene.material(Material::rgb(0.0, 0.0, 1.0));
        let compiled = TemplateCompiler::new(&root).compile("\t#evaluate sdf\n\t#evaluate color\n");
        assert_eq!(
            compiled.source,
            "\t// #evaluate sdf: material does not support property 'sdf'\n\
             \tvec3 color0 = vec3(0.0, 0.0, 1.0);\n\
             \tvec3 color = color0;\n"
        );
        assert_eq!(compiled.directive_count, 2);
        assert_eq!(compiled.failures.len(), 1);
    }

    #[test]
    fn test_crlf_directive_keeps_terminator() {
        let mut scene = SceneBuilder::new();
        let root = scene.sphere(0.5);
        let compiled = TemplateCompiler::new(&root).compile("{\r\n\t#evaluate sdf\r\n}\r\n");
        assert_eq!(
            compiled.source,
            "{\r\n\tfloat sdf0 = length(point - vec3(0.0, 0.0, 0.0)) - 0.5;\r\n\
             \tfloat sdf = sdf0;\r\n}\r\n"
        );
        assert_eq!(compiled.directive_count, 1);
    }

    #[test]
    fn test_without_aliases() {
        let mut scene = SceneBuilder::new();
        let root = scene.sphere(0.5);
        let compiled = TemplateCompiler::new(&root)
            .with_aliases(false)
            .compile("#evaluate sdf");
        assert_eq!(
            compiled.source,
            "float sdf0 = length(point - vec3(0.0, 0.0, 0.0)) - 0.5;"
        );
    }
}
