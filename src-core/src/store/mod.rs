//! Collection Stores
//!
//! One generic store per record type. The store owns its list; callers
//! read snapshots and change it only through the async operations.

mod state;
mod query;
mod error;
mod schema;
mod collection;

#[cfg(test)]
mod tests;

pub use state::{CollectionState, LoadPhase, Pagination};
pub use query::FetchQuery;
pub use error::StoreError;
pub use schema::{CollectionSchema, GallerySchema, ProjectSchema};
pub use collection::{CollectionStore, GalleryStore, ProjectStore};
