pub mod counter;
pub mod health;
pub mod investigations;
