#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use sessions::{
    CardBack, CardFace, DeckPlan, DifficultyFilter, OrderMode, PlanParseError,
    SessionActionResult, SessionProgress, SessionRegistry, SessionService, SessionSnapshot,
};
