use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=SKYBOOK_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=SKYBOOK_TOKEN_KEY");
    println!("cargo:rerun-if-env-changed=SKYBOOK_LOG_LEVEL");

    let sha = git(&["rev-parse", "HEAD"])
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let dirty = git(&["status", "--porcelain"]).is_some_and(|status| !status.trim().is_empty());

    println!("cargo:rustc-env=SKYBOOK_WEB_GIT_SHA={sha}");
    println!("cargo:rustc-env=SKYBOOK_WEB_GIT_DIRTY={dirty}");
}
