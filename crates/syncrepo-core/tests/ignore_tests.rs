//! Exclusion rule parsing and cascading evaluation.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use syncrepo_core::ignore::{self, IgnoreList, IgnoreRule};

fn list(content: &str) -> IgnoreList {
    IgnoreList::from_content(content)
}

#[test]
fn test_parse_skips_comments_and_blanks() {
    let rules = ignore::parse("# header\n\n*.log   # logs\n  \n!keep.log\nbuild/\r\n");

    assert_eq!(
        rules,
        vec![
            IgnoreRule::new("*.log", false, false),
            IgnoreRule::new("keep.log", true, false),
            IgnoreRule::new("build", false, true),
        ]
    );
}

#[test]
fn test_hash_inside_pattern_starts_a_comment() {
    let rules = ignore::parse("issue#12.txt");
    assert_eq!(rules, vec![IgnoreRule::new("issue", false, false)]);
}

#[test]
fn test_empty_rule_set_ignores_nothing() {
    let empty = IgnoreList::empty();
    assert!(empty.is_empty());
    assert!(!empty.is_ignored("anything.txt"));
    assert!(!list("# only comments\n").is_ignored("anything.txt"));
}

#[test]
fn test_negation_overrides_earlier_match() {
    let rules = list("*.log\n!keep.log\n");

    assert!(!rules.is_ignored("keep.log"));
    assert!(rules.is_ignored("debug.log"));
}

#[test]
fn test_last_match_wins_not_first() {
    let rules = list("!keep.log\n*.log\n");
    // The later positive rule re-ignores what the earlier negation allowed
    assert!(rules.is_ignored("keep.log"));

    let rules = list("*.log\n!keep.log\n*.log\n");
    assert!(rules.is_ignored("keep.log"));
}

#[rstest]
#[case("build/output.bin", true)]
#[case("build", true)]
#[case("nested/build/output.bin", true)]
#[case("rebuild/output.bin", false)]
#[case("build.rs", false)]
fn test_directory_rule(#[case] path: &str, #[case] ignored: bool) {
    assert_eq!(list("build/").is_ignored(path), ignored);
}

#[rstest]
#[case("/root.txt", "root.txt", true)]
#[case("/root.txt", "sub/root.txt", false)]
#[case("root.txt", "root.txt", true)]
#[case("root.txt", "sub/root.txt", true)]
#[case("root.txt", "a/b/c/root.txt", true)]
#[case("root.txt", "myroot.txt", false)]
#[case("root.txt", "root.txt.bak", false)]
fn test_anchoring(#[case] rule: &str, #[case] path: &str, #[case] ignored: bool) {
    assert_eq!(list(rule).is_ignored(path), ignored);
}

#[rstest]
#[case("*.log", "debug.log", true)]
#[case("*.log", "logs/debug.log", true)]
#[case("src/*.rs", "src/main.rs", true)]
#[case("src/*.rs", "src/bin/main.rs", false)]
#[case("src/**/*.rs", "src/bin/main.rs", true)]
#[case("src/**/*.rs", "src/main.rs", true)]
#[case("**/fixtures", "a/b/fixtures/data.json", true)]
#[case("**/fixtures", "fixtures/data.json", true)]
#[case("docs/**", "docs/guide/intro.md", true)]
#[case("file?.txt", "file1.txt", true)]
#[case("file?.txt", "file12.txt", false)]
#[case("file?.txt", "file/.txt", false)]
fn test_wildcards(#[case] rule: &str, #[case] path: &str, #[case] ignored: bool) {
    assert_eq!(list(rule).is_ignored(path), ignored);
}

#[test]
fn test_matching_is_case_sensitive() {
    let rules = list("README.md\n");
    assert!(rules.is_ignored("README.md"));
    assert!(!rules.is_ignored("readme.md"));
}

#[test]
fn test_secrets_directory_example() {
    let rules = list("secrets/\n");
    assert!(rules.is_ignored("secrets/key.pem"));
    assert!(!rules.is_ignored("docs/secrets.md"));
}

proptest! {
    #[test]
    fn test_evaluation_is_pure(path in "[a-z./]{0,24}", content in "[a-z*!/.#\n]{0,40}") {
        let rules = ignore::parse(&content);
        let first = ignore::is_ignored(&path, &rules);
        for _ in 0..3 {
            prop_assert_eq!(ignore::is_ignored(&path, &rules), first);
        }
        // Re-parsing the same content yields the same verdict
        prop_assert_eq!(ignore::is_ignored(&path, &ignore::parse(&content)), first);
    }
}
