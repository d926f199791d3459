//! UART serial communication abstractions
//!
//! Provides blocking traits for serial communication. Every call blocks
//! until it completes or the transport reports an error; the traits add no
//! timeout of their own.

/// Error type shared by both directions of a link
pub trait ErrorType {
    /// Error type for transmit and receive operations
    type Error;
}

/// UART transmitter
pub trait UartTx: ErrorType {
    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx: ErrorType {
    /// Read available data from the UART
    ///
    /// Blocks until at least one byte is available and returns the number
    /// of bytes read. `Ok(0)` means the stream has ended.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    ///
    /// Returns `Ok(None)` if the stream ended first.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        let n = self.read_blocking(&mut buf)?;
        Ok((n == 1).then_some(buf[0]))
    }
}

/// Combined UART interface
///
/// For links that provide both TX and RX on a single connection.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Default framing at a different baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Five,
    Six,
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShot(Option<u8>);

    impl ErrorType for OneShot {
        type Error = ();
    }

    impl UartRx for OneShot {
        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            match self.0.take() {
                Some(b) => {
                    buf[0] = b;
                    Ok(1)
                }
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_default_config_is_8n1_115200() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_with_baudrate_keeps_framing() {
        let config = UartConfig::with_baudrate(9600);
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
    }

    #[test]
    fn test_read_byte_reports_end_of_stream() {
        let mut rx = OneShot(Some(b'g'));
        assert_eq!(rx.read_byte(), Ok(Some(b'g')));
        assert_eq!(rx.read_byte(), Ok(None));
    }
}
