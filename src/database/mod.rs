pub mod connection;
pub mod filter;
#[cfg(test)]
pub mod memory;
pub mod store;
