// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hit → local checkout resolution
//!
//! Maps a hit's repository name to a directory on disk: reuse a unique
//! checkout, let the user pick among several, or clone a missing one into a
//! configured root.

use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::HoundError;
use crate::hit::SearchHit;
use crate::process::ProcessRunner;
use crate::prompt::Prompter;
use crate::repos::{LocalRepo, RepoIndex};

pub const PLACEHOLDER_NAMESPACE: &str = "${namespace}";
pub const PLACEHOLDER_REPO: &str = "${repo}";

/// A hit pinned to a concrete checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub path: PathBuf,
    pub hit: SearchHit,
}

/// Settings that only matter when a checkout has to be cloned.
#[derive(Debug, Clone, Copy)]
pub struct CloneTarget<'a> {
    pub roots: &'a [PathBuf],
    /// Address template with `${namespace}` and `${repo}`
    pub pattern: &'a str,
}

pub fn clone_address(pattern: &str, hit: &SearchHit) -> String {
    pattern
        .replace(PLACEHOLDER_NAMESPACE, &hit.repo_namespace)
        .replace(PLACEHOLDER_REPO, &hit.repo_name)
}

/// Resolve `hit` to a checkout, cloning into `target` when none exists.
///
/// Local matching compares directory names only; the namespace plays no
/// part. Returns `None` when the user declines or cancels. A successful
/// clone is appended to `index`, so resolving the same hit again reuses it.
pub fn resolve(
    hit: &SearchHit,
    index: &mut RepoIndex,
    target: CloneTarget<'_>,
    runner: &dyn ProcessRunner,
    prompter: &dyn Prompter,
) -> Result<Option<Resolution>> {
    let candidates: Vec<LocalRepo> = index
        .find_by_name(&hit.repo_name)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(
        repo = %hit.qualified_repo(),
        candidates = candidates.len(),
        "resolving hit"
    );

    let path = match candidates.as_slice() {
        [] => match clone_missing(hit, index, target, runner, prompter)? {
            Some(path) => path,
            None => return Ok(None),
        },
        [only] => only.path.clone(),
        many => {
            let labels: Vec<String> = many.iter().map(candidate_label).collect();
            let prompt = format!("Several checkouts of '{}'", hit.qualified_repo());
            match prompter.choose_one(&prompt, &labels)? {
                Some(idx) if idx < many.len() => many[idx].path.clone(),
                _ => return Ok(None),
            }
        }
    };

    Ok(Some(Resolution {
        path,
        hit: hit.clone(),
    }))
}

fn clone_missing(
    hit: &SearchHit,
    index: &mut RepoIndex,
    target: CloneTarget<'_>,
    runner: &dyn ProcessRunner,
    prompter: &dyn Prompter,
) -> Result<Option<PathBuf>> {
    let address = clone_address(target.pattern, hit);

    let root: &Path = match target.roots {
        [] => return Err(HoundError::config_missing("local_repo_roots").into()),
        [only] => {
            let prompt = format!("Clone {} into {}?", address, only.display());
            if !prompter.confirm(&prompt)? {
                return Ok(None);
            }
            only.as_path()
        }
        many => {
            let labels: Vec<String> = many.iter().map(|p| p.display().to_string()).collect();
            let prompt = format!("Clone {address} into");
            match prompter.choose_one(&prompt, &labels)? {
                Some(idx) if idx < many.len() => many[idx].as_path(),
                _ => return Ok(None),
            }
        }
    };

    runner.clone_repo(root, &address, &hit.repo_name)?;

    let path = root.join(&hit.repo_name);
    index.push(LocalRepo {
        name: hit.repo_name.clone(),
        remote_url: address,
        path: path.clone(),
    });
    Ok(Some(path))
}

/// Disambiguation label: the path plus the remote, which carries the namespace.
fn candidate_label(repo: &LocalRepo) -> String {
    format!("{}  ({})", repo.path.display(), repo.remote_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::hit;
    use crate::process::recording::RecordingRunner;
    use crate::prompt::scripted::ScriptedPrompter;
    use tempfile::TempDir;

    const PATTERN: &str = "git@git.example.com:${namespace}/${repo}.git";

    fn local(name: &str, path: &str, url: &str) -> LocalRepo {
        LocalRepo {
            name: name.into(),
            remote_url: url.into(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn clone_address_substitutes_both_placeholders() {
        let h = hit("team", "widgets", "a", 1);
        assert_eq!(
            clone_address(PATTERN, &h),
            "git@git.example.com:team/widgets.git"
        );
    }

    #[test]
    fn single_match_resolves_without_interaction() {
        let mut index = RepoIndex::new(vec![
            local("widgets", "/work/widgets", "u1"),
            local("other", "/work/other", "u2"),
        ]);
        let prompter = ScriptedPrompter::default();
        let runner = RecordingRunner::default();
        let h = hit("team", "widgets", "a.go", 3);

        let resolved = resolve(
            &h,
            &mut index,
            CloneTarget { roots: &[], pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve")
        .expect("resolved");
        assert_eq!(resolved.path, PathBuf::from("/work/widgets"));
        assert_eq!(resolved.hit, h);
        assert_eq!(prompter.prompts(), 0);
        assert!(runner.clones.borrow().is_empty());
    }

    #[test]
    fn namespace_is_ignored_for_local_matching() {
        let mut index = RepoIndex::new(vec![local("widgets", "/work/widgets", "x/widgets.git")]);
        let prompter = ScriptedPrompter::default();
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("completely-different", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &[], pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve");
        assert_eq!(resolved.map(|r| r.path), Some(PathBuf::from("/work/widgets")));
    }

    #[test]
    fn multiple_matches_show_path_and_remote() {
        let mut index = RepoIndex::new(vec![
            local("widgets", "/a/widgets", "git@h:team-a/widgets.git"),
            local("widgets", "/b/widgets", "git@h:team-b/widgets.git"),
        ]);
        let prompter = ScriptedPrompter::default().choosing(Some(1));
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("team-b", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &[], pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve")
        .expect("chosen");
        assert_eq!(resolved.path, PathBuf::from("/b/widgets"));

        let shown = prompter.shown.borrow();
        assert!(shown[0].1[0].contains("/a/widgets"));
        assert!(shown[0].1[1].contains("team-b/widgets.git"));
    }

    #[test]
    fn multiple_matches_cancel_yields_none() {
        let mut index = RepoIndex::new(vec![
            local("widgets", "/a/widgets", "u1"),
            local("widgets", "/b/widgets", "u2"),
        ]);
        let prompter = ScriptedPrompter::default().choosing(None);
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("t", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &[], pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve");
        assert_eq!(resolved, None);
    }

    #[test]
    fn declined_clone_leaves_index_unchanged() {
        let root = TempDir::new().expect("tempdir");
        let roots = vec![root.path().to_path_buf()];
        let mut index = RepoIndex::default();
        let prompter = ScriptedPrompter::default().confirming(false);
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("team", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &roots, pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve");
        assert_eq!(resolved, None);
        assert!(index.is_empty());
        assert!(runner.clones.borrow().is_empty());
        assert!(prompter.shown.borrow()[0]
            .0
            .contains("git@git.example.com:team/widgets.git"));
    }

    #[test]
    fn clone_then_second_resolve_reuses_checkout() {
        let root = TempDir::new().expect("tempdir");
        let roots = vec![root.path().to_path_buf()];
        let mut index = RepoIndex::default();
        let prompter = ScriptedPrompter::default().confirming(true);
        let runner = RecordingRunner::default();
        let h = hit("team", "widgets", "a.go", 5);
        let target = CloneTarget { roots: &roots, pattern: PATTERN };

        let first = resolve(&h, &mut index, target, &runner, &prompter)
            .expect("resolve")
            .expect("cloned");
        assert_eq!(first.path, root.path().join("widgets"));
        assert_eq!(
            runner.clones.borrow().as_slice(),
            &[(
                root.path().to_path_buf(),
                "git@git.example.com:team/widgets.git".to_string(),
                "widgets".to_string()
            )]
        );
        assert_eq!(index.len(), 1);

        let second = resolve(&h, &mut index, target, &runner, &prompter)
            .expect("resolve")
            .expect("reused");
        assert_eq!(second.path, first.path);
        assert_eq!(runner.clones.borrow().len(), 1);
        assert_eq!(prompter.prompts(), 1);
    }

    #[test]
    fn several_roots_ask_for_destination() {
        let a = TempDir::new().expect("tempdir");
        let b = TempDir::new().expect("tempdir");
        let roots = vec![a.path().to_path_buf(), b.path().to_path_buf()];
        let mut index = RepoIndex::default();
        let prompter = ScriptedPrompter::default().choosing(Some(1));
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("team", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &roots, pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve")
        .expect("cloned");
        assert_eq!(resolved.path, b.path().join("widgets"));
    }

    #[test]
    fn cancelled_root_choice_does_not_clone() {
        let roots = vec![PathBuf::from("/a"), PathBuf::from("/b")];
        let mut index = RepoIndex::default();
        let prompter = ScriptedPrompter::default().choosing(None);
        let runner = RecordingRunner::default();

        let resolved = resolve(
            &hit("team", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &roots, pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect("resolve");
        assert_eq!(resolved, None);
        assert!(runner.clones.borrow().is_empty());
    }

    #[test]
    fn clone_failure_propagates_and_keeps_index() {
        let root = TempDir::new().expect("tempdir");
        let roots = vec![root.path().to_path_buf()];
        let mut index = RepoIndex::default();
        let prompter = ScriptedPrompter::default().confirming(true);
        let runner = RecordingRunner {
            fail_clone: true,
            ..Default::default()
        };

        let err = resolve(
            &hit("team", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &roots, pattern: PATTERN },
            &runner,
            &prompter,
        )
        .expect_err("clone fails");
        assert!(matches!(
            err.downcast_ref::<HoundError>(),
            Some(HoundError::CloneFailure { .. })
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn no_clone_roots_is_config_missing() {
        let mut index = RepoIndex::default();
        let err = resolve(
            &hit("team", "widgets", "a", 1),
            &mut index,
            CloneTarget { roots: &[], pattern: PATTERN },
            &RecordingRunner::default(),
            &ScriptedPrompter::default(),
        )
        .expect_err("no roots");
        assert!(matches!(
            err.downcast_ref::<HoundError>(),
            Some(HoundError::ConfigMissing { .. })
        ));
    }
}
