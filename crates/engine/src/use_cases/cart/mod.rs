//! Cart use cases: add an item, submit the cart as a request.
//!
//! Clearing a cart is a plain [`crate::stores::CartStore`] operation with
//! no orchestration, exposed through the app.

mod add_item;
mod error;
mod submit_cart;

pub use add_item::AddItem;
pub use error::CartError;
pub use submit_cart::SubmitCart;
