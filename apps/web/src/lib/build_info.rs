/// Short git commit the bundle was built from, or `unknown`. A `-dirty`
/// suffix marks builds from a modified working tree.
pub fn git_commit_hash() -> String {
    let dirty = option_env!("SKYBOOK_WEB_GIT_DIRTY") == Some("true");
    match option_env!("SKYBOOK_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() && value != "unknown" => describe(value, dirty),
        _ => "unknown".to_string(),
    }
}

fn describe(sha: &str, dirty: bool) -> String {
    let short = sha.get(..7).unwrap_or(sha);
    if dirty {
        format!("{short}-dirty")
    } else {
        short.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::describe;

    #[test]
    fn describe_truncates_full_sha() {
        assert_eq!(
            describe("0123456789abcdef0123456789abcdef01234567", false),
            "0123456"
        );
    }

    #[test]
    fn describe_keeps_short_values_and_marks_dirty() {
        assert_eq!(describe("abc", false), "abc");
        assert_eq!(describe("abc", true), "abc-dirty");
    }
}
