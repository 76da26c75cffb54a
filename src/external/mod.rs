//! Clients for talking to systems outside the process.

pub mod client;
