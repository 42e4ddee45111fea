pub mod candidates;
pub mod focus;
pub mod sort;

pub use candidates::{Candidate, CandidateList};
pub use focus::{FocusSession, FocusSnapshot, PanelToken, SessionState};
pub use sort::SortReassociationError;
