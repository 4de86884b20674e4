//! HTTP clients for the aozora catalog and its metadata sidecar.
//!
//! `catalog` talks to the blog content API that hosts the catalog
//! itself; `jikan` talks to the public anime-metadata API. `cursor`
//! holds the pagination bookkeeping both listings run on.

pub mod catalog;
pub mod cursor;
pub mod jikan;
pub mod traits;
