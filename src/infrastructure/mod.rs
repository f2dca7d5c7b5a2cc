//! Adapters behind the domain ports.

pub mod http;
pub mod in_memory;
pub mod mercado_pago;
pub mod order_client;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
