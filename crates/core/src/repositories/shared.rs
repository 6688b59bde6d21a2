//! Shared repository utilities.
//!
//! Directory allocation and traversal for the sharded `<s1>/<s2>/<uuid>/` layout.

use crate::constants::MAX_ALLOCATION_ATTEMPTS;
use crate::error::{StoreError, StoreResult};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use studydef_ids::CanonicalUuid;

/// Creates a unique sharded directory within `base_dir`.
///
/// UUIDs are drawn from `uuid_source` until one maps to a directory that does not exist yet,
/// up to [`MAX_ALLOCATION_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if:
/// - parent directory creation fails,
/// - directory creation fails,
/// - no unused directory was found within the attempt limit.
pub(crate) fn create_uuid_and_shard_dir(
    base_dir: &Path,
    mut uuid_source: impl FnMut() -> CanonicalUuid,
) -> StoreResult<(CanonicalUuid, PathBuf)> {
    for _attempt in 0..MAX_ALLOCATION_ATTEMPTS {
        let uuid = uuid_source();
        let candidate = uuid.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((uuid, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(StoreError::Io(e)),
        }
    }

    Err(StoreError::Io(io::Error::new(
        ErrorKind::AlreadyExists,
        format!(
            "failed to allocate a unique document directory after {MAX_ALLOCATION_ATTEMPTS} attempts"
        ),
    )))
}

/// Returns the leaf `<uuid>` directories under `base_dir`.
///
/// A missing `base_dir` yields no directories. Unreadable shard levels are skipped.
pub(crate) fn sharded_leaf_dirs(base_dir: &Path) -> Vec<PathBuf> {
    let mut leaves = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return leaves,
    };
    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };

        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            leaves.extend(
                id_iter
                    .flatten()
                    .map(|id_ent| id_ent.path())
                    .filter(|id_path| id_path.is_dir()),
            );
        }
    }

    leaves.sort();
    leaves
}
