// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared, thread-safe access to one dictionary.
//!
//! Record ids are positions, so a removal renumbers everything above it.
//! Readers must therefore never overlap a writer. `SharedDictionary` puts the
//! dictionary behind one `RwLock`: any number of concurrent searches, or one
//! mutation at a time. Ids handed out under one read guard are only valid
//! until the next write.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::search::SearchRequest;
use crate::types::WordMatch;

/// Cheaply clonable handle; clones share the same dictionary.
#[derive(Debug, Clone, Default)]
pub struct SharedDictionary {
    inner: Arc<RwLock<Dictionary>>,
}

impl SharedDictionary {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dictionary)),
        }
    }

    /// Shared access. Blocks while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Dictionary> {
        self.inner.read()
    }

    /// Exclusive access for mutation.
    pub fn write(&self) -> RwLockWriteGuard<'_, Dictionary> {
        self.inner.write()
    }

    /// Run one search under a read guard.
    pub fn search(&self, request: &SearchRequest<'_>) -> Result<Vec<WordMatch>> {
        self.inner.read().search(request)
    }

    /// Run `f` with exclusive access.
    pub fn update<T>(&self, f: impl FnOnce(&mut Dictionary) -> T) -> T {
        f(&mut self.inner.write())
    }
}

impl From<Dictionary> for SharedDictionary {
    fn from(dictionary: Dictionary) -> Self {
        Self::new(dictionary)
    }
}
