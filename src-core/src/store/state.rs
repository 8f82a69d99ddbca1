//! Collection State

use serde::{Deserialize, Serialize};

/// `Idle → Loading → {Ready, Error}`; every operation re-enters `Loading`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            total: 0,
            pages: 1,
        }
    }
}

impl Pagination {
    /// Single page covering an unpaginated list
    pub fn single_page(len: usize) -> Self {
        let defaults = Self::default();
        Self {
            page: 1,
            limit: defaults.limit.max(len as u32),
            total: len as u64,
            pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Snapshot handed to views and listeners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionState<T> {
    /// Most recent first after local inserts
    pub items: Vec<T>,
    pub phase: LoadPhase,
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            phase: LoadPhase::Idle,
            error: None,
            pagination: Pagination::default(),
        }
    }
}

impl<T> CollectionState<T> {
    pub fn loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
