//! Origin pattern matching.
//!
//! Registry keys are either literal origins (`https://example.com`), the
//! bare wildcard `*`, or wildcard-subdomain patterns (`*.example.com`). The
//! matcher in this module handles the last kind: domain-suffix matching over
//! `.`-delimited segments, so one pattern covers the apex domain and any
//! depth of subdomains while rejecting suffix look-alikes such as
//! `example.com.vn`.

/// The wildcard token meaning "allow any value" for a given field.
pub const WILDCARD: &str = "*";

/// Check whether a registered wildcard pattern matches a candidate origin.
///
/// The pattern's leading wildcard segment stands for "any single leftmost
/// label, then these trailing segments". The candidate is walked left to
/// right until one of its segments appears in the pattern's remaining
/// segments; the accumulated prefix plus the pattern's remaining segments
/// must then reassemble to exactly the candidate string.
///
/// A candidate with only two segments is the apex domain (its first segment
/// still carries the scheme prefix, e.g. `https://example`), so the
/// pattern's own first domain label is dropped as well. This lets
/// `*.example.com` match both `https://example.com` and
/// `https://api.example.com` while `https://api.example.com.vn` reassembles
/// to a different string and is rejected.
///
/// Patterns without a leading wildcard segment only ever match by exact
/// string equality; the registry resolves those through direct key lookup
/// before falling back to this scan.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let mut pattern_segments: Vec<&str> = pattern.split('.').collect();

    match pattern_segments.first() {
        Some(&WILDCARD) => {
            pattern_segments.remove(0);
        }
        _ => return pattern == candidate,
    }

    let candidate_segments: Vec<&str> = candidate.split('.').collect();

    // Apex domain: no subdomain label to consume, so drop the pattern's
    // first domain label too.
    if candidate_segments.len() == 2 && !pattern_segments.is_empty() {
        pattern_segments.remove(0);
    }

    let mut prefix: Vec<&str> = Vec::new();
    for segment in &candidate_segments {
        if pattern_segments.contains(segment) {
            break;
        }
        prefix.push(segment);
    }

    let reassembled = prefix
        .into_iter()
        .chain(pattern_segments)
        .collect::<Vec<_>>()
        .join(".");

    reassembled == candidate
}

/// Split a comma-separated value into trimmed, non-empty tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check that every entry of `required` is present in `universe`.
///
/// `required` may itself be a comma-separated list, as carried by the
/// `Access-Control-Request-Headers` header. An empty `required` set is
/// always contained.
pub fn contains_all(universe: &[String], required: &str) -> bool {
    split_list(required)
        .iter()
        .all(|token| universe.iter().any(|entry| entry == token))
}
