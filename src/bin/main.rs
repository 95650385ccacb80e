//! sdf-glsl CLI
//!
//! Compiles a scene (JSON file or the builtin demo) into a shader template.

#![allow(clippy::needless_pass_by_value)]

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use log::LevelFilter;
#[cfg(feature = "cli")]
use sdf_glsl::io::{self, SceneFile};
#[cfg(feature = "cli")]
use sdf_glsl::prelude::*;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
const BUILTIN_TEMPLATE: &str = include_str!("../../templates/raymarch.frag");

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "sdf-glsl")]
#[command(version = sdf_glsl::VERSION)]
#[command(about = "Compile SDF scene graphs into GLSL shader templates", long_about = None)]
struct Cli {
    /// Log every substituted directive
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Splice a scene into a shader template
    Compile {
        /// Template file; the builtin raymarching template when omitted
        #[arg(short, long)]
        template: Option<PathBuf>,
        /// Scene file (.json); the builtin demo scene when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Exit with an error if any directive failed
        #[arg(long)]
        strict: bool,
    },

    /// Write the demo scene as JSON
    Demo {
        /// Output file
        #[arg(short, long, default_value = "demo.json")]
        output: PathBuf,
    },

    /// Write the builtin raymarching template
    Template {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module(
            "sdf_glsl",
            if cli.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        )
        .init();

    match cli.command {
        Commands::Compile {
            template,
            scene,
            output,
            strict,
        } => cmd_compile(template, scene, output, strict),
        Commands::Demo { output } => cmd_demo(output),
        Commands::Template { output } => write_or_print(output.as_deref(), BUILTIN_TEMPLATE),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

/// Ground plane with a red and a blue ball melted together, minus a notch
#[cfg(feature = "cli")]
fn demo_scene() -> SceneFile {
    let mut scene = SceneBuilder::new();
    let ground = scene
        .ground()
        .with_material(Material::rgb(0.6, 0.6, 0.6));
    let red = scene
        .sphere(0.5)
        .with_material(Material::rgb(0.9, 0.2, 0.2))
        .translate_xyz(-0.35, 0.5, 0.0);
    let blue = scene
        .sphere(0.4)
        .with_material(Material::rgb(0.2, 0.3, 0.9))
        .translate_xyz(0.35, 0.45, 0.0);
    let blob = scene.union(vec![red, blue], 0.25);
    let notch = scene.sphere(0.25).translate_xyz(0.0, 0.9, 0.3);
    let carved = scene.difference(vec![blob, notch], 0.05);
    let root = scene.union(vec![ground, carved], 0.1);
    SceneFile::new(root.to_desc()).with_name("demo")
}

#[cfg(feature = "cli")]
fn cmd_compile(template: Option<PathBuf>, scene: Option<PathBuf>, output: Option<PathBuf>, strict: bool) {
    let template_source = match &template {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => fail(format!("Template read error ({}): {}", path.display(), e)),
        },
        None => BUILTIN_TEMPLATE.to_string(),
    };

    let file = match &scene {
        Some(path) => match io::load_scene(path) {
            Ok(file) => file,
            Err(e) => fail(format!("Load error ({}): {}", path.display(), e)),
        },
        None => demo_scene(),
    };

    let root = match file.build(&mut SceneBuilder::new()) {
        Ok(root) => root,
        Err(e) => fail(format!("Scene error: {}", e)),
    };
    log::info!(
        "scene '{}': {} nodes",
        file.name.as_deref().unwrap_or("unnamed"),
        root.node_count()
    );

    let compiled = TemplateCompiler::new(&root).compile(&template_source);
    for failure in &compiled.failures {
        eprintln!(
            "line {}: #evaluate {}: {}",
            failure.line, failure.tag, failure.error
        );
    }

    write_or_print(output.as_deref(), &compiled.source);

    if strict && !compiled.is_clean() {
        std::process::exit(2);
    }
}

#[cfg(feature = "cli")]
fn cmd_demo(output: PathBuf) {
    match io::save_scene(&demo_scene(), &output) {
        Ok(()) => println!("Saved demo scene to {}", output.display()),
        Err(e) => fail(format!("Save error: {}", e)),
    }
}

#[cfg(feature = "cli")]
fn write_or_print(output: Option<&Path>, text: &str) {
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, text) {
                fail(format!("Write error ({}): {}", path.display(), e));
            }
        }
        None => print!("{}", text),
    }
}

#[cfg(feature = "cli")]
fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
