//! Host serial port HAL for glyphflash
//!
//! This crate provides a `serialport`-backed implementation of the shared
//! `glyphflash-hal` link traits, plus host-specific functionality:
//!
//! - Opening a port from a [`UartConfig`](glyphflash_hal::UartConfig)
//! - Blocking reads that ride out the driver's internal polling timeout
//! - Port discovery for the command line

pub mod error;
pub mod link;
pub mod ports;

pub use error::SerialLinkError;
pub use link::SerialLink;
pub use ports::{available_ports, default_port_name, PortKind, PortSummary};

// Re-export shared traits from glyphflash-hal for convenience
pub use glyphflash_hal::{Uart, UartConfig, UartRx, UartTx};
