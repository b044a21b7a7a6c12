//! Build script for ffx-reconcile
//!
//! Stamps the binary with GIT_HASH, BUILD_TIMESTAMP and BUILD_PROFILE for the
//! startup log line. Reruns only when this script or the checked-out commit
//! changes, so BUILD_TIMESTAMP is the time of the last stamping build.

use std::process::Command;

/// Trimmed stdout of a successful `git` invocation
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

/// Ask Cargo to rerun when HEAD moves: the HEAD file itself (branch switch,
/// detached checkout), the branch ref it names, and packed-refs. Only
/// existing files are listed; Cargo treats a missing one as always stale.
fn watch_git_head() {
    let mut watched = vec!["HEAD".to_string(), "packed-refs".to_string()];
    if let Some(branch_ref) = git(&["symbolic-ref", "-q", "HEAD"]) {
        watched.push(branch_ref);
    }
    for name in watched {
        let path = git(&["rev-parse", "--git-path", &name]);
        if let Some(path) = path.filter(|p| std::path::Path::new(p).exists()) {
            println!("cargo:rerun-if-changed={}", path);
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    watch_git_head();

    let git_hash = git(&["rev-parse", "--short=8", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // YYYY-MM-DDTHH:MM:SS±HH:MM
    let build_timestamp = chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false);

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=BUILD_PROFILE={}", profile);
}
