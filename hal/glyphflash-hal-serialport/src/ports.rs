//! Serial port discovery

use std::fmt;

use serialport::SerialPortType;

use crate::error::SerialLinkError;

/// Transport behind a port
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortKind {
    Usb {
        vid: u16,
        pid: u16,
        product: Option<String>,
    },
    Pci,
    Bluetooth,
    Unknown,
}

/// One available port, as shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    pub name: String,
    pub kind: PortKind,
}

impl From<serialport::SerialPortInfo> for PortSummary {
    fn from(info: serialport::SerialPortInfo) -> Self {
        let kind = match info.port_type {
            SerialPortType::UsbPort(usb) => PortKind::Usb {
                vid: usb.vid,
                pid: usb.pid,
                product: usb.product,
            },
            SerialPortType::PciPort => PortKind::Pci,
            SerialPortType::BluetoothPort => PortKind::Bluetooth,
            SerialPortType::Unknown => PortKind::Unknown,
        };
        Self {
            name: info.port_name,
            kind,
        }
    }
}

impl fmt::Display for PortSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PortKind::Usb { vid, pid, product } => {
                write!(f, "{} (USB {:04x}:{:04x}", self.name, vid, pid)?;
                if let Some(product) = product {
                    write!(f, " {}", product)?;
                }
                f.write_str(")")
            }
            PortKind::Pci => write!(f, "{} (PCI)", self.name),
            PortKind::Bluetooth => write!(f, "{} (Bluetooth)", self.name),
            PortKind::Unknown => f.write_str(&self.name),
        }
    }
}

/// List the serial ports present on this host, sorted by name
pub fn available_ports() -> Result<Vec<PortSummary>, SerialLinkError> {
    let mut ports: Vec<PortSummary> = serialport::available_ports()
        .map_err(SerialLinkError::Enumerate)?
        .into_iter()
        .map(PortSummary::from)
        .collect();
    ports.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(ports)
}

/// Port used when neither the config nor the command line names one
pub fn default_port_name() -> &'static str {
    if cfg!(windows) {
        "COM4"
    } else {
        "/dev/ttyACM0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_port_summary() {
        let summary = PortSummary::from(serialport::SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::Unknown,
        });
        assert_eq!(summary.kind, PortKind::Unknown);
        assert_eq!(summary.to_string(), "/dev/ttyS0");
    }

    #[test]
    fn test_usb_summary_display() {
        let summary = PortSummary {
            name: "COM4".to_string(),
            kind: PortKind::Usb {
                vid: 0x2341,
                pid: 0x0043,
                product: Some("Arduino Uno".to_string()),
            },
        };
        assert_eq!(summary.to_string(), "COM4 (USB 2341:0043 Arduino Uno)");
    }

    #[test]
    fn test_default_port_name_is_platform_specific() {
        let name = default_port_name();
        if cfg!(windows) {
            assert_eq!(name, "COM4");
        } else {
            assert!(name.starts_with("/dev/"));
        }
    }
}
