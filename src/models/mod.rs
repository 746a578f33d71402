pub mod investigation;

pub use investigation::{CorrectiveAction, Investigation, SearchField, Signatures};
