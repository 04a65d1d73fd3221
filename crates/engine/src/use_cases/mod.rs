//! Use cases: one user story each, orchestrating stores and ports.

pub mod cart;
pub mod catalog;
pub mod requests;
pub mod search;

pub use cart::{AddItem, CartError, SubmitCart};
pub use catalog::{RefreshCatalog, RefreshError};
pub use requests::{
    DenyRequest, FulfillRequest, PartialRequest, RequestError, SubmitRequest,
};
pub use search::{SearchItems, SearchOutcome};
