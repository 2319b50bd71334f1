// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search hits and per-repository file name shortening.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Shared prefixes shorter than this are not worth stripping.
pub const MIN_SHARED_PREFIX: usize = 3;

/// One line-level match returned by the search service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub repo_namespace: String,
    pub repo_name: String,
    pub file_name: String,
    /// `file_name` with the prefix shared by all files of the same repository removed
    pub file_name_short: String,
    pub line_number: u32,
    pub before: String,
    pub line: String,
    pub after: String,
}

impl SearchHit {
    /// `namespace/repo`, or just `repo` when the namespace is empty.
    pub fn qualified_repo(&self) -> String {
        if self.repo_namespace.is_empty() {
            self.repo_name.clone()
        } else {
            format!("{}/{}", self.repo_namespace, self.repo_name)
        }
    }
}

/// Fill `file_name_short` on every hit.
///
/// Needs every hit of a repository at once: the stripped prefix is the
/// longest common leading substring of the lexicographically first and last
/// distinct file names in that repository.
pub fn shorten_file_names(hits: &mut [SearchHit]) {
    let mut groups: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
    for hit in hits.iter() {
        groups
            .entry((hit.repo_namespace.clone(), hit.repo_name.clone()))
            .or_default()
            .insert(hit.file_name.clone());
    }

    let prefixes: BTreeMap<(String, String), usize> = groups
        .into_iter()
        .map(|(key, names)| (key, shared_prefix_len(&names)))
        .collect();

    for hit in hits.iter_mut() {
        let key = (hit.repo_namespace.clone(), hit.repo_name.clone());
        let strip = prefixes.get(&key).copied().unwrap_or(0);
        hit.file_name_short = strip_prefix_chars(&hit.file_name, strip);
    }
}

fn shared_prefix_len(sorted_names: &BTreeSet<String>) -> usize {
    if sorted_names.len() < 2 {
        return 0;
    }
    let (Some(first), Some(last)) = (sorted_names.first(), sorted_names.last()) else {
        return 0;
    };
    let len = common_prefix_bytes(first, last);
    if first[..len].chars().count() < MIN_SHARED_PREFIX {
        0
    } else {
        len
    }
}

/// Byte length of the longest common prefix, always on a char boundary.
fn common_prefix_bytes(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map(|((idx, ca), _)| idx + ca.len_utf8())
        .unwrap_or(0)
}

fn strip_prefix_chars(name: &str, byte_len: usize) -> String {
    match name.get(byte_len..) {
        Some(rest) if !rest.is_empty() => rest.to_string(),
        _ => name.to_string(),
    }
}

#[cfg(test)]
pub(crate) fn hit(namespace: &str, repo: &str, file: &str, line_number: u32) -> SearchHit {
    SearchHit {
        repo_namespace: namespace.into(),
        repo_name: repo.into(),
        file_name: file.into(),
        file_name_short: file.into(),
        line_number,
        before: String::new(),
        line: String::new(),
        after: String::new(),
    }
}
