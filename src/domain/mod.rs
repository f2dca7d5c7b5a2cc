//! Domain layer: payment orders, the gateway projection and the ports the
//! application layer drives.

pub mod gateway;
pub mod payment;
pub mod ports;
