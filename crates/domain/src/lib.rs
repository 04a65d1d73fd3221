//! Clockwork Banker domain library.
//!
//! Pure domain logic for the guild-bank request broker: the item catalog,
//! the name normalizer shared by catalog construction and queries, the
//! exact/partial/fuzzy matcher with confidence tiers, the spell/class
//! secondary matcher, per-user carts, and the request lifecycle state
//! machine.
//!
//! No I/O and no async here. Stores, ports, and orchestration live in the
//! engine crate.

pub mod cart;
pub mod catalog;
pub mod classes;
pub mod error;
pub mod ids;
pub mod matcher;
pub mod normalize;
pub mod quality;
pub mod request;

pub use cart::{Cart, CartEntry};
pub use catalog::{Catalog, CatalogBuilder, ItemRecord};
pub use classes::{parse_spell_query, resolve_spells, ClassConfig};
pub use error::DomainError;
pub use ids::{CharacterName, RequestId, UserId};
pub use matcher::{resolve, Candidate, MatchOutcome};
pub use normalize::normalize;
pub use quality::Quality;
pub use request::{
    classify_line, ConfirmedItem, LineDisposition, Request, RequestLine, RequestStatus,
    Resolution, ResolutionKind, SuggestedItem, UnverifiableItem,
};
