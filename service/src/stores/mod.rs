//! Production repository implementations.

pub mod postgres;
