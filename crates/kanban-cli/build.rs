use std::process::Command;

/// Short hash of the checked-out commit, if git is available.
fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_string()).filter(|h| !h.is_empty())
}

fn main() {
    println!("cargo::rerun-if-changed=../../.git/HEAD");
    println!("cargo::rerun-if-env-changed=GIT_COMMIT_HASH");

    let hash = match std::env::var("GIT_COMMIT_HASH") {
        Ok(hash) if !hash.is_empty() => hash,
        _ => git_short_hash().unwrap_or_else(|| "unknown".into()),
    };
    println!("cargo::rustc-env=GIT_COMMIT_HASH={}", hash);
}
