//! Optimistic local-cache mutations with rollback.
//!
//! The discipline is always apply → await → invert-on-failure, never
//! await-then-apply: the UI reads its own optimistic write immediately and
//! reconciles when the remote call resolves.

use std::collections::HashSet;
use std::hash::Hash;

/// An invertible mutation of a set-shaped cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetMutation<T> {
    Insert(T),
    Remove(T),
}

impl<T: Clone> SetMutation<T> {
    pub fn inverted(&self) -> Self {
        match self {
            Self::Insert(v) => Self::Remove(v.clone()),
            Self::Remove(v) => Self::Insert(v.clone()),
        }
    }
}

/// Set-shaped per-session cache (e.g. the ids of classes the user has
/// booked). Mutations report whether they changed anything, so a failed
/// remote call only rolls back mutations that actually took effect.
#[derive(Debug, Clone)]
pub struct OptimisticSet<T: Eq + Hash> {
    items: HashSet<T>,
}

impl<T: Eq + Hash> Default for OptimisticSet<T> {
    fn default() -> Self {
        Self {
            items: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> OptimisticSet<T> {
    pub fn new() -> Self {
        Self {
            items: HashSet::new(),
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the whole set with server truth (silent refresh).
    pub fn replace(&mut self, values: impl IntoIterator<Item = T>) {
        self.items = values.into_iter().collect();
    }

    pub fn snapshot(&self) -> HashSet<T> {
        self.items.clone()
    }

    /// Apply a mutation; returns `true` if the set changed.
    pub fn apply(&mut self, mutation: &SetMutation<T>) -> bool {
        match mutation {
            SetMutation::Insert(v) => self.items.insert(v.clone()),
            SetMutation::Remove(v) => self.items.remove(v),
        }
    }
}

/// Apply `mutation` locally, await the remote call, and invert the
/// mutation if the call fails. The error is returned unchanged.
///
/// If the mutation was a no-op (value already present/absent) nothing is
/// rolled back on failure.
pub async fn with_optimistic<T, Fut, E>(
    set: &mut OptimisticSet<T>,
    mutation: SetMutation<T>,
    remote: Fut,
) -> Result<(), E>
where
    T: Eq + Hash + Clone,
    Fut: Future<Output = Result<(), E>>,
{
    let changed = set.apply(&mutation);
    match remote.await {
        Ok(()) => Ok(()),
        Err(e) => {
            if changed {
                set.apply(&mutation.inverted());
            }
            Err(e)
        }
    }
}
