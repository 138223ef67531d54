//! Remote URL predicate and `ls-remote` output parsing

/// Whether `remote` names a network remote rather than a local path.
pub fn is_git_remote(remote: &str) -> bool {
    const SCHEMES: [&str; 5] = ["http://", "https://", "git@", "ssh://", "git://"];
    SCHEMES.iter().any(|scheme| remote.starts_with(scheme))
}

/// Pick the commit hash for `branch` out of `ls-remote` output.
///
/// Only the line whose ref is exactly `refs/heads/<branch>` counts, so a tag
/// or a branch that merely ends in `<branch>` never resolves. Returns `None`
/// when no such line exists or its hash is not hex.
pub fn parse_remote_head(output: &str, branch: &str) -> Option<String> {
    let head_ref = format!("refs/heads/{}", branch);
    let hash = output.lines().find_map(|line| {
        let (hash, reference) = line.split_once('\t')?;
        (reference.trim() == head_ref).then(|| hash.trim())
    })?;

    let valid = !hash.is_empty() && hash.chars().all(|c| c.is_ascii_hexdigit());
    valid.then(|| hash.to_string())
}
