//! Wire-level primitives for a binary, schema-defined RPC protocol.
//!
//! This crate owns the pieces that sit below any particular transport or
//! runtime: the [`wide_int::WideInt`] exact 64-bit value type, the message
//! envelope reader/writer in [`envelope`], and small shared utilities.
//! Everything async (clients, servers, middleware, tracing) lives in the
//! extension crates built on top of this one.

pub mod constants;
pub mod envelope;
pub mod utils;
pub mod wide_int;
