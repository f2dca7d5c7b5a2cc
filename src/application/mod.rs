//! Application layer containing the payment workflow orchestration.
//!
//! This module defines the `PaymentOrchestrator`, the only entry point the
//! HTTP layer calls. It owns step ordering across the gateway, the
//! repository and the order service; the adapters behind each port hold no
//! policy of their own.

pub mod orchestrator;
