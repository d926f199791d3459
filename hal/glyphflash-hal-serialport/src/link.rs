//! Serial link over a host serial port
//!
//! The link owns the port for its whole lifetime; dropping it closes the
//! port.

use std::io::{self, Read, Write};
use std::time::Duration;

use glyphflash_hal::uart::{DataBits, ErrorType, Parity, StopBits, UartRx, UartTx};
use glyphflash_hal::UartConfig;
use serialport::SerialPort;
use tracing::{debug, trace};

use crate::error::SerialLinkError;

/// Driver-level poll interval used when reads should block indefinitely
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// An open serial port implementing the `glyphflash-hal` link traits
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
    /// `None` blocks until data arrives
    read_timeout: Option<Duration>,
}

impl SerialLink {
    /// Open `name` with the given framing
    ///
    /// With `read_timeout` set, a read that sees no data for that long fails
    /// with a timed-out I/O error. Without it, reads block until data
    /// arrives or the port reports an error.
    pub fn open(
        name: &str,
        config: &UartConfig,
        read_timeout: Option<Duration>,
    ) -> Result<Self, SerialLinkError> {
        debug!(port = name, baud = config.baudrate, "Opening serial port");

        let port = serialport::new(name, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .timeout(read_timeout.unwrap_or(POLL_INTERVAL))
            .open()
            .map_err(|source| SerialLinkError::Open {
                port: name.to_string(),
                source,
            })?;

        Ok(Self {
            port,
            name: name.to_string(),
            read_timeout,
        })
    }

    /// Port name this link was opened with
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for SerialLink {
    fn drop(&mut self) {
        debug!(port = %self.name, "Closing serial port");
    }
}

impl ErrorType for SerialLink {
    type Error = SerialLinkError;
}

impl UartTx for SerialLink {
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), SerialLinkError> {
        self.port.write_all(data)?;
        trace!(bytes = data.len(), "Wrote to serial port");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SerialLinkError> {
        self.port.flush()?;
        Ok(())
    }
}

impl UartRx for SerialLink {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, SerialLinkError> {
        loop {
            match self.port.read(buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::TimedOut && self.read_timeout.is_none() => {
                    continue
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn data_bits(bits: DataBits) -> serialport::DataBits {
    match bits {
        DataBits::Five => serialport::DataBits::Five,
        DataBits::Six => serialport::DataBits::Six,
        DataBits::Seven => serialport::DataBits::Seven,
        DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: Parity) -> serialport::Parity {
    match parity {
        Parity::None => serialport::Parity::None,
        Parity::Even => serialport::Parity::Even,
        Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: StopBits) -> serialport::StopBits {
    match bits {
        StopBits::One => serialport::StopBits::One,
        StopBits::Two => serialport::StopBits::Two,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_framing_maps_to_8n1() {
        let config = UartConfig::default();
        assert_eq!(data_bits(config.data_bits), serialport::DataBits::Eight);
        assert_eq!(parity(config.parity), serialport::Parity::None);
        assert_eq!(stop_bits(config.stop_bits), serialport::StopBits::One);
    }

    #[test]
    fn test_all_framing_variants_map() {
        assert_eq!(data_bits(DataBits::Seven), serialport::DataBits::Seven);
        assert_eq!(parity(Parity::Odd), serialport::Parity::Odd);
        assert_eq!(parity(Parity::Even), serialport::Parity::Even);
        assert_eq!(stop_bits(StopBits::Two), serialport::StopBits::Two);
    }

    #[test]
    fn test_open_missing_port_reports_name() {
        let err = SerialLink::open(
            "/dev/glyphflash-does-not-exist",
            &UartConfig::default(),
            None,
        )
        .err()
        .expect("opening a missing port must fail");
        assert!(err.to_string().contains("glyphflash-does-not-exist"));
    }
}
