//! Git-backed state store.
//!
//! Uses the [`FilesystemStore`](super::FilesystemStore) layout, with the base
//! directory doubling as a git repository. Every write or delete is committed on
//! `HEAD`, so `git log -- <cluster>/cluster.state` is the history of a cluster.
//!
//! Reads and listings only look at the working tree. A write that leaves the tree
//! unchanged produces no commit and still succeeds. Once the working tree has been
//! updated, commit failures are logged and not reported to the caller: the new
//! snapshot is already durable on disk.
//!
//! After each commit the index is rebuilt from the committed tree. Anything
//! staged by hand in the state repository is discarded at that point.

use std::fs;
use std::path::{Path, PathBuf};

use gix::objs::tree::EntryKind;
use tracing::{debug, info, warn};

use super::{BoxError, ClusterStore, FilesystemStore, StoreError};
use crate::cluster::ClusterName;
use crate::config::BackendKind;
use crate::consts::{GIT_FALLBACK_EMAIL, GIT_FALLBACK_NAME};
use crate::snapshot::StateSnapshot;

#[derive(Debug, Clone)]
pub struct GitStore {
  files: FilesystemStore,
}

enum Change<'a> {
  Upsert(&'a [u8]),
  Remove,
}

impl GitStore {
  /// Create a store rooted at `base_path`. The repository is initialized on first write.
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      files: FilesystemStore::new(base_path),
    }
  }

  pub fn base_path(&self) -> &Path {
    self.files.base_path()
  }

  fn location(&self) -> String {
    self.base_path().display().to_string()
  }

  fn is_repo(&self) -> bool {
    self.base_path().join(".git").exists()
  }

  /// Open the repository at the base path, creating it if needed.
  fn open_or_init(&self) -> Result<gix::Repository, StoreError> {
    let base = self.base_path();

    let repo = if self.is_repo() {
      gix::open(base).map_err(|e| StoreError::unreachable("open repository", self.location(), e))?
    } else {
      info!(path = %base.display(), "initializing state repository");
      fs::create_dir_all(base).map_err(|e| StoreError::from_io("create", self.location(), e))?;
      gix::init(base).map_err(|e| StoreError::unreachable("initialize repository", self.location(), e))?
    };

    if repo.committer().is_some() && repo.author().is_some() {
      return Ok(repo);
    }

    debug!(
      name = GIT_FALLBACK_NAME,
      email = GIT_FALLBACK_EMAIL,
      "no git identity configured, using fallback"
    );
    let options = gix::open::Options::default().config_overrides([
      format!("user.name={}", GIT_FALLBACK_NAME),
      format!("user.email={}", GIT_FALLBACK_EMAIL),
    ]);
    gix::open_opts(base, options).map_err(|e| StoreError::unreachable("open repository", self.location(), e))
  }

  /// Record the working tree change for `name` as a commit, logging instead of failing.
  fn record(&self, repo: &gix::Repository, name: &ClusterName, change: Change<'_>, message: &str) {
    match self.commit(repo, name, change, message) {
      Ok(Some(id)) => debug!(cluster = %name, commit = %id, "committed state change"),
      Ok(None) => debug!(cluster = %name, "state unchanged, nothing to commit"),
      Err(e) => warn!(cluster = %name, path = %self.base_path().display(), error = %e, "failed to commit state change"),
    }
  }

  /// Apply `change` to HEAD's tree and commit it. Returns `None` if the tree did not change.
  fn commit(
    &self,
    repo: &gix::Repository,
    name: &ClusterName,
    change: Change<'_>,
    message: &str,
  ) -> Result<Option<gix::ObjectId>, BoxError> {
    let path = self.files.relative_state_path(name);

    let (parent, base_tree) = if repo.head()?.is_unborn() {
      (None, gix::ObjectId::empty_tree(repo.object_hash()))
    } else {
      let head = repo.head_commit()?;
      (Some(head.id), head.tree_id()?.detach())
    };

    let mut editor = repo.edit_tree(base_tree)?;
    match change {
      Change::Upsert(bytes) => {
        let blob = repo.write_blob(bytes)?.detach();
        editor.upsert(path.as_str(), EntryKind::Blob, blob)?;
      }
      Change::Remove => {
        editor.remove(path.as_str())?;
      }
    }
    let tree = editor.write()?.detach();
    if tree == base_tree {
      return Ok(None);
    }

    let commit = repo.commit("HEAD", message, tree, parent)?.detach();

    // Keep the index in step with HEAD so `git status` stays clean.
    let mut index = repo.index_from_tree(&tree)?;
    index.write(gix::index::write::Options::default())?;

    Ok(Some(commit))
  }

  /// Commits that changed the snapshot of `name`, newest first, as hex ids.
  ///
  /// Follows first parents from `HEAD`. Returns an empty list when the
  /// repository does not exist yet or has no commits.
  pub fn history(&self, name: &ClusterName) -> Result<Vec<String>, StoreError> {
    if !self.is_repo() {
      return Ok(Vec::new());
    }
    let repo =
      gix::open(self.base_path()).map_err(|e| StoreError::unreachable("open repository", self.location(), e))?;
    self
      .walk_history(&repo, name)
      .map_err(|e| StoreError::unreachable("read history of", self.location(), e))
  }

  fn walk_history(&self, repo: &gix::Repository, name: &ClusterName) -> Result<Vec<String>, BoxError> {
    if repo.head()?.is_unborn() {
      return Ok(Vec::new());
    }

    let path = self.files.relative_state_path(name);
    let mut versions = Vec::new();
    for info in repo.rev_walk([repo.head_id()?]).first_parent_only().all()? {
      let info = info?;
      let entry = info.object()?.tree()?.lookup_entry_by_path(&path)?.map(|e| e.object_id());
      versions.push((info.id, entry));
    }

    let touched = versions
      .iter()
      .enumerate()
      .filter(|(i, (_, entry))| {
        let previous = versions.get(i + 1).and_then(|(_, e)| *e);
        *entry != previous
      })
      .map(|(_, (commit, _))| commit.to_string())
      .collect();
    Ok(touched)
  }
}

impl ClusterStore for GitStore {
  fn kind(&self) -> BackendKind {
    BackendKind::Git
  }

  fn list(&self) -> Result<Vec<ClusterName>, StoreError> {
    self.files.list()
  }

  fn read(&self, name: &ClusterName) -> Result<StateSnapshot, StoreError> {
    self.files.read(name)
  }

  fn write(&self, name: &ClusterName, snapshot: &StateSnapshot) -> Result<(), StoreError> {
    let repo = self.open_or_init()?;
    self.files.write(name, snapshot)?;
    self.record(
      &repo,
      name,
      Change::Upsert(snapshot.as_bytes()),
      &format!("Update cluster {}", name),
    );
    Ok(())
  }

  fn delete(&self, name: &ClusterName) -> Result<(), StoreError> {
    if !self.files.exists(name)? {
      return Err(StoreError::NotFound(name.clone()));
    }
    let repo = self.open_or_init()?;
    self.files.delete(name)?;
    self.record(&repo, name, Change::Remove, &format!("Delete cluster {}", name));
    Ok(())
  }

  fn exists(&self, name: &ClusterName) -> Result<bool, StoreError> {
    self.files.exists(name)
  }
}
