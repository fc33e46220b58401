//! REST resource infrastructure for the OPP API.
//!
//! This module provides the pieces between typed records and the wire:
//!
//! - **[`filter_nulls`] / [`NullFilter`]**: strip null-valued keys from
//!   outbound bodies
//! - **[`RequestInput<T>`]**: a body given as a typed record or a raw map
//! - **[`build_path`]**: path templates with percent-encoded identifiers
//! - **[`ListParams`] / [`ListResponse<T>`]**: page parameters and the page
//!   envelope of list endpoints
//! - **[`resources`]**: the typed records and facades per API area
//!
//! # Example
//!
//! ```rust,ignore
//! use opp_api::rest::ListParams;
//!
//! let page = client
//!     .merchants()
//!     .list(ListParams::new().perpage(50).filter("status", "live"))
//!     .await?;
//!
//! for merchant in page.iter() {
//!     println!("{} {:?}", merchant.uid, merchant.name);
//! }
//! ```

pub(crate) mod input;
mod list;
mod path;
pub mod resources;
mod serializer;

pub use input::RequestInput;
pub use list::{ListParams, ListResponse, MAX_PER_PAGE};
pub use path::build_path;
pub use serializer::{filter_nulls, EmptyCollections, NullFilter};
