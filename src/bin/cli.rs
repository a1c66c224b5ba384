// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Paramesh CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use paramesh::cli::Reporter;
use paramesh::geometry::{analyze, check_mesh, Mesh};
use paramesh::{export_stl, export_stl_string, generate_batch, JobConfig, ShapeParameters};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "paramesh")]
#[command(about = "Paramesh - parametric shape generator with STL export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of styled text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a shape and export it as ASCII STL
    Generate {
        /// Built-in preset name
        #[arg(required_unless_present = "config")]
        preset: Option<String>,

        /// Job file (TOML)
        #[arg(short, long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Output STL file; STL goes to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Solid name written into the STL
        #[arg(long)]
        name: Option<String>,

        /// Extra uniform scale applied on export
        #[arg(long)]
        scale: Option<f64>,

        /// Run the mesh check and report findings
        #[arg(long)]
        check: bool,
    },

    /// Check a generated shape for degenerate triangles and non-manifold edges
    Check {
        /// Built-in preset name
        #[arg(required_unless_present = "config")]
        preset: Option<String>,

        /// Job file (TOML)
        #[arg(short, long, conflicts_with = "preset")]
        config: Option<PathBuf>,

        /// Exit with status 1 when any warning is found
        #[arg(long)]
        strict: bool,
    },

    /// List built-in presets and their parameters
    Presets,

    /// Export every preset into a directory
    Gallery {
        /// Output directory
        #[arg(short, long, default_value = "gallery")]
        out: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate {
            preset,
            config,
            output,
            name,
            scale,
            check,
        } => {
            let options = GenerateOptions {
                output: output.as_deref(),
                name: name.as_deref(),
                scale: *scale,
                check: *check,
            };
            load_job(preset.as_deref(), config.as_deref())
                .and_then(|job| generate_command(job, &options, cli.verbose, cli.json))
        }
        Commands::Check {
            preset,
            config,
            strict,
        } => load_job(preset.as_deref(), config.as_deref())
            .and_then(|job| check_command(&job, *strict, cli.verbose, cli.json)),
        Commands::Presets => presets_command(cli.json),
        Commands::Gallery { out } => gallery_command(out, cli.verbose, cli.json),
        Commands::Version => {
            println!("Paramesh v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

struct GenerateOptions<'a> {
    output: Option<&'a Path>,
    name: Option<&'a str>,
    scale: Option<f64>,
    check: bool,
}

fn load_job(preset: Option<&str>, config: Option<&Path>) -> Result<JobConfig> {
    match (preset, config) {
        (_, Some(path)) => JobConfig::load(path),
        (Some(name), None) => {
            let mut job = JobConfig::for_preset(name)?;
            job.apply_env_overrides();
            Ok(job)
        }
        (None, None) => bail!("either a preset name or --config is required"),
    }
}

fn build(job: &JobConfig, verbose: bool, json: bool) -> Result<(Mesh, std::time::Duration)> {
    if verbose && !json {
        Reporter::progress(&format!("Generating {} '{}'", job.shape.kind(), job.name));
    }
    let start = Instant::now();
    let mesh = job
        .shape
        .to_mesh()
        .with_context(|| format!("Failed to generate {}", job.shape.kind()))?;
    Ok((mesh, start.elapsed()))
}

fn generate_command(
    mut job: JobConfig,
    options: &GenerateOptions,
    verbose: bool,
    json: bool,
) -> Result<()> {
    if let Some(name) = options.name {
        job.name = name.to_string();
    }
    if let Some(scale) = options.scale {
        job.transform.scale *= scale;
    }
    if let Some(output) = options.output {
        job.output = Some(output.to_path_buf());
    }

    let (mesh, elapsed) = build(&job, verbose, json)?;
    let transform = job.transform.to_matrix();
    // Stats describe the mesh as written, after placement.
    let stats = match &transform {
        Some(matrix) => analyze(&mesh.transformed(matrix))?,
        None => analyze(&mesh)?,
    };
    let warnings = if options.check {
        Some(check_mesh(&mesh)?)
    } else {
        None
    };

    match &job.output {
        Some(path) => {
            let start = Instant::now();
            export_stl(&mesh, transform.as_ref(), &job.name, path)?;
            if json {
                let doc = json!({
                    "name": job.name,
                    "kind": job.shape.kind(),
                    "output": path,
                    "stats": stats,
                    "warnings": warnings,
                    "elapsed_us": elapsed.as_micros() as u64,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                Reporter::report_generated(&job.name, &stats, elapsed, verbose);
                if let Some(warnings) = &warnings {
                    Reporter::report_warnings(warnings, verbose);
                }
                Reporter::report_written(path, start.elapsed());
            }
        }
        None => {
            let stl = export_stl_string(&mesh, transform.as_ref(), &job.name)?;
            if json {
                let doc = json!({
                    "name": job.name,
                    "kind": job.shape.kind(),
                    "stats": stats,
                    "warnings": warnings,
                    "stl": stl,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", stl);
            }
        }
    }

    Ok(())
}

fn check_command(job: &JobConfig, strict: bool, verbose: bool, json: bool) -> Result<()> {
    let (mesh, elapsed) = build(job, verbose, json)?;
    let stats = analyze(&mesh)?;
    let warnings = check_mesh(&mesh)?;

    if json {
        let doc = json!({
            "name": job.name,
            "kind": job.shape.kind(),
            "stats": stats,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        Reporter::report_generated(&job.name, &stats, elapsed, verbose);
        Reporter::report_warnings(&warnings, verbose);
    }

    if strict && !warnings.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn presets_command(json: bool) -> Result<()> {
    let presets = ShapeParameters::preset_names()
        .iter()
        .map(|name| ShapeParameters::preset(name).map(|shape| (*name, shape)))
        .collect::<paramesh::Result<Vec<_>>>()?;

    if json {
        let doc: serde_json::Map<String, serde_json::Value> = presets
            .iter()
            .map(|(name, shape)| -> Result<(String, serde_json::Value)> {
                Ok((name.to_string(), serde_json::to_value(shape)?))
            })
            .collect::<Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    for (name, shape) in &presets {
        println!("{}", name.cyan().bold());
        let params = toml::to_string(shape).context("Failed to render preset parameters")?;
        for line in params.lines().filter(|line| !line.starts_with("kind")) {
            println!("  {}", line.bright_black());
        }
    }
    Ok(())
}

fn gallery_command(out: &Path, verbose: bool, json: bool) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let names = ShapeParameters::preset_names();
    let shapes = names
        .iter()
        .map(|name| ShapeParameters::preset(name))
        .collect::<paramesh::Result<Vec<_>>>()?;

    if verbose && !json {
        Reporter::progress(&format!("Generating {} presets in parallel", shapes.len()));
    }
    let start = Instant::now();
    let meshes = generate_batch(&shapes);
    let elapsed = start.elapsed();

    let mut written = Vec::with_capacity(names.len());
    for (name, mesh) in names.iter().zip(meshes) {
        let mesh = mesh.with_context(|| format!("Failed to generate preset {}", name))?;
        let path = out.join(format!("{}.stl", name));
        export_stl(&mesh, None, name, &path)?;
        written.push(json!({
            "name": name,
            "output": path,
            "triangles": mesh.triangle_count(),
        }));
        if !json {
            Reporter::report_info(&format!(
                "{} -> {} ({} triangles)",
                name,
                path.display(),
                mesh.triangle_count()
            ));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&written)?);
    } else {
        Reporter::success(&format!(
            "Exported {} presets (generated in {})",
            written.len(),
            Reporter::format_duration(elapsed)
        ));
    }
    Ok(())
}
