//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod character;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use character::{
    CharacterDetails, CharacterPage, CharacterSummary, InvalidUid, Locator, PageQuery, Uid,
};
pub use error::{AppError, FetchError};
pub use key_action::KeyAction;
