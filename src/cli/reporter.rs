// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::{MeshStats, ValidationWarning};
use colored::*;
use std::path::Path;
use std::time::Duration;

/// Warnings printed before the list is truncated
const MAX_LISTED_WARNINGS: usize = 20;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a generated mesh
    pub fn report_generated(name: &str, stats: &MeshStats, duration: Duration, verbose: bool) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Generated:".bold(), name.cyan());
        println!("{}", "━".repeat(80).bright_black());
        Self::print_field("Vertices", &stats.vertex_count.to_string());
        Self::print_field("Triangles", &stats.triangle_count.to_string());
        Self::print_field(
            "Size",
            &format!(
                "{:.3} x {:.3} x {:.3}",
                stats.size[0], stats.size[1], stats.size[2]
            ),
        );

        if verbose {
            Self::print_field(
                "Indexed",
                if stats.indexed { "yes" } else { "no" },
            );
            let center = stats.bbox.center();
            Self::print_field(
                "Center",
                &format!("{:.3}, {:.3}, {:.3}", center.x, center.y, center.z),
            );
            Self::print_field("Surface area", &format!("{:.5}", stats.surface_area));
            Self::print_field("Fingerprint", &stats.fingerprint);
        }

        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report validator findings
    pub fn report_warnings(warnings: &[ValidationWarning], verbose: bool) {
        if warnings.is_empty() {
            Self::success("Mesh check passed: no degenerate triangles or non-manifold edges");
            return;
        }

        let degenerate = warnings
            .iter()
            .filter(|w| matches!(w, ValidationWarning::DegenerateTriangle { .. }))
            .count();
        Self::report_warning(&format!(
            "{} issue(s): {} degenerate triangle(s), {} non-manifold edge(s)",
            warnings.len(),
            degenerate,
            warnings.len() - degenerate
        ));

        let limit = if verbose { warnings.len() } else { MAX_LISTED_WARNINGS };
        for warning in warnings.iter().take(limit) {
            println!("  {} {}", "•".yellow(), warning);
        }
        if warnings.len() > limit {
            println!(
                "  {}",
                format!("... {} more (use --verbose)", warnings.len() - limit).bright_black()
            );
        }
    }

    /// Report a written file
    pub fn report_written(path: &Path, duration: Duration) {
        println!(
            "{} {} {}",
            "✅".green(),
            path.display().to_string().green(),
            format!("({})", Self::format_duration(duration)).bright_black()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_field(name: &str, value: &str) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.cyan()
        );
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print progress line
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}
