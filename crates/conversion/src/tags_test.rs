//! Unit tests for the tag codec

use super::*;

#[test]
fn test_split_empty_string_is_empty() {
    let tags: Vec<String> = split_tags("");
    assert!(tags.is_empty(), "Empty input must not produce a single empty tag");
}

#[test]
fn test_split_preserves_order() {
    let tags: Vec<String> = split_tags("zeta,alpha,mid");
    assert_eq!(tags, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_split_drops_empty_segments() {
    let tags: Vec<String> = split_tags(",a,,b,");
    assert_eq!(tags, vec!["a", "b"]);
}

#[test]
fn test_join_empty_is_empty_string() {
    let tags: Vec<String> = Vec::new();
    assert_eq!(join_tags(&tags), "");
}

#[test]
fn test_round_trip_without_empty_segments() {
    for input in ["", "tag", "a,b", "k8s,cluster-1,owned"] {
        let tags: Vec<String> = split_tags(input);
        assert_eq!(join_tags(&tags), input, "Round trip should be exact for {input:?}");
    }
}

#[test]
fn test_round_trip_with_empty_segments_is_lossy() {
    let tags: Vec<String> = split_tags("a,,b");
    assert_eq!(join_tags(&tags), "a,b");
}

#[test]
fn test_tag_containing_comma_splits() {
    // The legacy form cannot tell a comma inside a tag from a separator
    let tags = vec!["foo,bar".to_string()];
    let joined = join_tags(&tags);
    let split: Vec<String> = split_tags(&joined);
    assert_eq!(split, vec!["foo", "bar"]);
}
