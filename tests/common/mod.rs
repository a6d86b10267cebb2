//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use gitversioning::core::types::Oid;
use gitversioning::git::Git;

/// Test fixture that creates a real git repository.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new test repository with an initial commit on main.
    pub fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Create a repository without any commit.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        // Keep the host's signing setup out of the fixtures
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
        run_git(dir.path(), &["config", "tag.gpgsign", "false"]);

        Self { dir }
    }

    /// Get the path to the repository.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository.
    pub fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Write a file (creating parent directories) without staging it.
    pub fn write_file(&self, path: &str, content: &str) {
        let full = self.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    /// Create a file and commit it, returning the new commit OID.
    pub fn commit_file(&self, path: &str, content: &str, message: &str) -> Oid {
        self.write_file(path, content);
        run_git(self.path(), &["add", path]);
        run_git(self.path(), &["commit", "-m", message]);
        self.head()
    }

    /// Stage a path.
    pub fn stage(&self, path: &str) {
        run_git(self.path(), &["add", path]);
    }

    /// Create a lightweight tag at HEAD.
    pub fn tag(&self, name: &str) {
        run_git(self.path(), &["tag", name]);
    }

    /// Create an annotated tag at HEAD.
    pub fn annotated_tag(&self, name: &str) {
        run_git(self.path(), &["tag", "-a", name, "-m", &format!("Release {}", name)]);
    }

    /// Create a lightweight tag at an arbitrary revision.
    pub fn tag_at(&self, name: &str, revision: &str) {
        run_git(self.path(), &["tag", name, revision]);
    }

    /// Create a branch at the current HEAD.
    pub fn create_branch(&self, name: &str) {
        run_git(self.path(), &["branch", name]);
    }

    /// Checkout a branch.
    pub fn checkout(&self, name: &str) {
        run_git(self.path(), &["checkout", "-q", name]);
    }

    /// Delete the loose object file for `oid`, corrupting history.
    pub fn remove_object(&self, oid: &Oid) {
        let (dir, file) = oid.as_str().split_at(2);
        let path = self.path().join(".git/objects").join(dir).join(file);
        std::fs::remove_file(&path).expect("object is not loose");
    }

    /// HEAD as reported by git itself.
    pub fn head(&self) -> Oid {
        Oid::new(self.rev_parse("HEAD")).unwrap()
    }

    /// Resolve a revision using git directly.
    pub fn rev_parse(&self, revision: &str) -> String {
        let output = Command::new("git")
            .args(["rev-parse", revision])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

/// Run a git command in the given directory.
pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
