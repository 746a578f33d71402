pub mod folio_counter;
pub mod investigations;
