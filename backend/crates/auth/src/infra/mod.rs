//! Infrastructure Layer
//!
//! Repository implementations backing the domain traits.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
