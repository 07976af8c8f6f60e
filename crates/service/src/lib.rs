//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses entity definitions from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod db;
pub mod errors;
#[cfg(test)]
pub mod test_support;
