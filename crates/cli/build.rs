use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string())
}

fn main() {
    let sha = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
        .map(|status| !status.is_empty())
        .unwrap_or(false);

    // shown by `holderscan --version`
    let version = if dirty { format!("{sha}-dirty") } else { sha };
    println!("cargo:rustc-env=GIT_SHA={}", version);
    println!("cargo:rerun-if-changed=.git/HEAD");
}
