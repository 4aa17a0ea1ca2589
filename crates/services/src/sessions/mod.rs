mod plan;
mod progress;
mod registry;
mod service;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{DeckPlan, DifficultyFilter, OrderMode, PlanParseError};
pub use progress::SessionProgress;
pub use registry::{SessionActionResult, SessionRegistry};
pub use service::SessionService;
pub use view::{CardBack, CardFace, SessionSnapshot};
