//! xtask doc: rustdoc for the library crates of the media control stack.
//!
//! Only the crates in [`LIBRARY_CRATES`] are documented; `xtask` itself has
//! nothing worth reading. Docs are built with the `std` feature so the
//! `platform::mocks` module shows up. `--open` then opens [`ENTRY_CRATE`],
//! whose crate docs draw the layering and link down to the others.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

use crate::check::LIBRARY_CRATES;

/// Crate whose docs are opened first: the top of the stack.
const ENTRY_CRATE: &str = "bluetooth";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let start = Instant::now();

    let output = Command::new("cargo")
        .args(doc_args())
        .output()
        .context("Failed to build documentation")?;

    if !output.status.success() {
        eprintln!("{}", "✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Documentation build failed");
    }

    println!(
        "{}",
        format!(
            "✓ Documented {} in {:.2}s",
            LIBRARY_CRATES.join(", "),
            start.elapsed().as_secs_f64()
        )
        .green()
    );

    if open {
        // Everything is built already; this only opens the entry page.
        let status = Command::new("cargo")
            .args(["doc", "--no-deps", "-p", ENTRY_CRATE, "--open"])
            .status()
            .context("Failed to open documentation")?;
        if !status.success() {
            anyhow::bail!("Could not open {ENTRY_CRATE} documentation");
        }
    } else {
        println!();
        println!(
            "   {}",
            format!("Open target/doc/{ENTRY_CRATE}/index.html in your browser").dimmed()
        );
    }

    println!();

    Ok(())
}

/// Arguments for `cargo doc` over the library crates.
fn doc_args() -> Vec<String> {
    let mut args = vec!["doc".to_string(), "--no-deps".to_string()];
    for krate in LIBRARY_CRATES {
        args.push("-p".to_string());
        args.push((*krate).to_string());
    }
    args.push("--features".to_string());
    args.push("platform/std".to_string());
    args
}
