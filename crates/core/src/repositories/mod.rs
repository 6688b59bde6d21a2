//! Storage backends.
//!
//! This module contains the reference file-system implementation of the
//! [`ResourceStore`](crate::ResourceStore) collaborator.

pub mod file_store;
pub(crate) mod shared;
