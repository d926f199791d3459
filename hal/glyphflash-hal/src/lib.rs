//! glyphflash Hardware Abstraction Layer
//!
//! This crate defines the serial link traits the uploader is written
//! against. Host transports implement them, and tests substitute an
//! in-memory link.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Uploader (glyphflash-core::upload)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glyphflash-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ glyphflash-   │       │ scripted link │
//! │ hal-serialport│       │   (tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`uart::Uart`] - Both directions over one connection

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{DataBits, ErrorType, Parity, StopBits, Uart, UartConfig, UartRx, UartTx};
