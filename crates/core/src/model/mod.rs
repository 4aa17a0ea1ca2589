mod card;
mod guess;
mod ids;
mod session;

pub use card::{Card, CardError, Difficulty, Label};
pub use guess::GuessLog;
pub use ids::{CardId, ParseIdError, SessionId};
pub use session::{SessionSummary, SessionSummaryError};
