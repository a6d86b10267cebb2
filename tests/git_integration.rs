//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that the Git interface works correctly with actual git operations.

mod common;

use common::TestRepo;

use gitversioning::core::types::RefName;
use gitversioning::git::{ChangeKind, Git, GitError, TagTarget};

mod open {
    use super::*;

    #[test]
    fn open_valid_repo() {
        let repo = TestRepo::new();
        let git = repo.git();
        assert!(git.work_dir().is_ok());
        assert!(git.git_dir().ends_with(".git"));
    }

    #[test]
    fn open_non_repo_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Git::open(dir.path());
        assert!(matches!(result, Err(GitError::NotARepo { .. })));
    }

    #[test]
    fn open_bare_repo_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        common::run_git(dir.path(), &["init", "--bare"]);
        let result = Git::open(dir.path());
        assert!(matches!(result, Err(GitError::BareRepo)));
    }
}

mod head {
    use super::*;

    #[test]
    fn head_matches_git() {
        let repo = TestRepo::new();
        let git = repo.git();
        assert_eq!(git.try_head_oid().unwrap(), Some(repo.head()));
    }

    #[test]
    fn unborn_head_is_none() {
        let repo = TestRepo::empty();
        let git = repo.git();
        assert_eq!(git.try_head_oid().unwrap(), None);
    }
}

mod tags {
    use super::*;

    #[test]
    fn no_tags() {
        let repo = TestRepo::new();
        assert!(repo.git().list_tags().unwrap().is_empty());
    }

    #[test]
    fn lightweight_tag_targets_commit() {
        let repo = TestRepo::new();
        repo.tag("v1.0.0");

        let git = repo.git();
        let tags = git.list_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, RefName::for_tag("v1.0.0").unwrap());
        assert_eq!(tags[0].oid, repo.head());
        assert_eq!(
            git.tag_target(&tags[0].oid).unwrap(),
            TagTarget::Commit(repo.head())
        );
    }

    #[test]
    fn annotated_tag_is_not_peeled_when_listed() {
        let repo = TestRepo::new();
        repo.annotated_tag("v1.0.0");

        let git = repo.git();
        let tags = git.list_tags().unwrap();
        assert_eq!(tags.len(), 1);
        assert_ne!(tags[0].oid, repo.head());
        assert_eq!(
            git.tag_target(&tags[0].oid).unwrap(),
            TagTarget::AnnotatedTag(repo.head())
        );
    }

    #[test]
    fn tag_of_tag_is_other() {
        let repo = TestRepo::new();
        repo.annotated_tag("inner");
        common::run_git(repo.path(), &["tag", "-a", "outer", "inner", "-m", "nested"]);

        let git = repo.git();
        let outer = git
            .list_tags()
            .unwrap()
            .into_iter()
            .find(|t| t.name.tag_name() == Some("outer"))
            .unwrap();
        assert_eq!(git.tag_target(&outer.oid).unwrap(), TagTarget::Other);
    }

    #[test]
    fn tag_of_tree_is_other() {
        let repo = TestRepo::new();
        repo.tag_at("tree-tag", "HEAD^{tree}");

        let git = repo.git();
        let tags = git.list_tags().unwrap();
        assert_eq!(git.tag_target(&tags[0].oid).unwrap(), TagTarget::Other);
    }

    #[test]
    fn hierarchical_tag_names() {
        let repo = TestRepo::new();
        repo.tag("api/v1.0.0");

        let tags = repo.git().list_tags().unwrap();
        assert_eq!(tags[0].name.tag_name(), Some("api/v1.0.0"));
    }
}

mod ancestry {
    use super::*;

    #[test]
    fn walk_includes_head_and_ancestors() {
        let repo = TestRepo::new();
        let first = repo.head();
        let second = repo.commit_file("a.txt", "a", "Second");
        let third = repo.commit_file("b.txt", "b", "Third");

        let commits = repo.git().walk_ancestry(&third).unwrap();
        assert_eq!(commits.len(), 3);
        for oid in [&first, &second, &third] {
            assert!(commits.contains(oid));
        }
    }

    #[test]
    fn walk_excludes_other_branches() {
        let repo = TestRepo::new();
        let base = repo.head();
        repo.create_branch("side");
        repo.checkout("side");
        let side = repo.commit_file("side.txt", "s", "Side");
        repo.checkout("main");
        let main = repo.commit_file("main.txt", "m", "Main");

        let commits = repo.git().walk_ancestry(&main).unwrap();
        assert!(commits.contains(&base));
        assert!(!commits.contains(&side));
    }

    #[test]
    fn commit_count_between() {
        let repo = TestRepo::new();
        let base = repo.head();
        repo.commit_file("a.txt", "a", "Second");
        let tip = repo.commit_file("b.txt", "b", "Third");

        let git = repo.git();
        assert_eq!(git.commit_count(Some(&base), &tip).unwrap(), 2);
        assert_eq!(git.commit_count(Some(&tip), &tip).unwrap(), 0);
        assert_eq!(git.commit_count(None, &tip).unwrap(), 3);
    }

    #[test]
    fn commit_time_is_recent() {
        let repo = TestRepo::new();
        let time = repo.git().commit_time(&repo.head()).unwrap();
        let age = chrono::Utc::now() - time;
        assert!(age.num_minutes() < 10);
    }
}

mod status {
    use super::*;

    #[test]
    fn clean_tree_has_no_entries() {
        let repo = TestRepo::new();
        assert!(repo.git().status_entries().unwrap().is_empty());
    }

    #[test]
    fn categories_reported() {
        let repo = TestRepo::new();
        repo.commit_file("tracked.txt", "v1", "Add tracked");
        repo.commit_file("gone.txt", "bye", "Add gone");

        repo.write_file("tracked.txt", "v2");
        repo.write_file("untracked/deep/file.txt", "new");
        repo.write_file("staged.txt", "staged");
        repo.stage("staged.txt");
        std::fs::remove_file(repo.path().join("gone.txt")).unwrap();

        let entries = repo.git().status_entries().unwrap();
        let kinds_of = |path: &str| {
            entries
                .iter()
                .find(|e| e.path == path)
                .map(|e| e.kinds.clone())
                .unwrap_or_default()
        };

        assert!(kinds_of("tracked.txt").contains(&ChangeKind::Modified));
        assert!(kinds_of("untracked/deep/file.txt").contains(&ChangeKind::Untracked));
        assert!(kinds_of("staged.txt").contains(&ChangeKind::Added));
        assert!(kinds_of("gone.txt").contains(&ChangeKind::Missing));
    }
}
