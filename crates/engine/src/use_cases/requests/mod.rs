//! Request lifecycle use cases: submit free text, then fulfill, deny, or
//! partially fill exactly once.

mod deny_request;
mod error;
mod fulfill_request;
mod partial_request;
mod submit_request;

pub use deny_request::DenyRequest;
pub use error::RequestError;
pub use fulfill_request::FulfillRequest;
pub use partial_request::PartialRequest;
pub use submit_request::SubmitRequest;
