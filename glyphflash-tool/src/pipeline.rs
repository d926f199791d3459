//! Generate and upload stages
//!
//! ```text
//!  font ──► render_assets ──► emit_document ──► stdout / file
//!                  │
//!                  ├──► previews (best effort)
//!                  │
//!                  └──► upload_payload ──► serial upload ──► monitor
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use glyphflash_core::emit::emit_document;
use glyphflash_core::raster::FontFace;
use glyphflash_core::{
    render_assets, upload, upload_payload, MonitorEnd, RenderedAsset, UploadObserver, UploadReport,
};
use glyphflash_hal::UartConfig;
use glyphflash_hal_serialport::{available_ports, SerialLink, SerialLinkError};
use glyphflash_protocol::chunk_count;
use tracing::{debug, info, warn};

use crate::config::{OutputSettings, ToolConfig, UploadSettings};
use crate::font::RusttypeFace;
use crate::preview::write_previews;

/// Rendered assets and the source document built from them
#[derive(Debug)]
pub struct Generated {
    pub assets: Vec<RenderedAsset>,
    pub document: String,
}

/// Render and emit every configured asset with `face`
pub fn build_document<F: FontFace + ?Sized>(face: &F, config: &ToolConfig) -> Result<Generated> {
    let assets = render_assets(face, &config.generation)?;
    for asset in &assets {
        debug!(
            "{}: width {} byte width {} advance {}",
            asset.name,
            asset.bitmap.width(),
            asset.bitmap.byte_width(),
            asset.bitmap.advance()
        );
    }

    let document = emit_document(&config.generation, &assets);
    Ok(Generated { assets, document })
}

/// `generate` subcommand
pub fn generate(config: &ToolConfig) -> Result<()> {
    let face = RusttypeFace::open(&config.font.path, config.font.size)
        .with_context(|| format!("loading font {}", config.font.path.display()))?;
    info!(
        "Loaded font {} ({} glyphs) at {}px",
        config.font.path.display(),
        face.glyph_count(),
        face.size()
    );

    let generated = build_document(&face, config)?;
    info!("Rendered {} assets", generated.assets.len());

    if let Some(dir) = &config.output.preview_dir {
        let written = write_previews(dir, &generated.assets);
        info!("Wrote {} previews to {}", written, dir.display());
    }

    write_document(&config.output, &generated.document)?;

    if config.upload.enabled {
        let payload = upload_payload(&generated.assets, &config.upload.assets)?;
        upload_bytes(&config.upload, &payload)?;
    }
    Ok(())
}

/// `upload` subcommand
pub fn upload_file(path: &Path, settings: &UploadSettings) -> Result<()> {
    let payload = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    info!("Read {} bytes from {}", payload.len(), path.display());
    upload_bytes(settings, &payload)?;
    Ok(())
}

/// `ports` subcommand
pub fn list_ports() -> Result<()> {
    let ports = available_ports()?;
    if ports.is_empty() {
        info!("No serial ports found");
        return Ok(());
    }

    let mut out = io::stdout().lock();
    for port in ports {
        writeln!(out, "{}", port)?;
    }
    Ok(())
}

fn write_document(output: &OutputSettings, document: &str) -> Result<()> {
    match &output.path {
        Some(path) => {
            fs::write(path, document).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} bytes to {}", document.len(), path.display());
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(document.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Open the configured port and stream `payload` through it
pub fn upload_bytes(
    settings: &UploadSettings,
    payload: &[u8],
) -> Result<UploadReport<SerialLinkError>> {
    let uart = UartConfig::with_baudrate(settings.baud);
    let link = SerialLink::open(&settings.port, &uart, settings.read_timeout)?;

    let port = link.name().to_string();
    info!(
        "Uploading {} bytes in {} chunks to {}, waiting for device",
        payload.len(),
        chunk_count(payload.len()),
        port
    );

    let report =
        upload(link, payload, &mut LogObserver).with_context(|| format!("uploading to {}", port))?;

    info!(
        "Upload complete: {} bytes in {} chunks, {} lines from device",
        report.bytes, report.chunks, report.lines
    );
    match &report.monitor_end {
        MonitorEnd::Closed => info!("Device closed the connection"),
        MonitorEnd::Faulted(e) => warn!("Monitoring stopped: {}", e),
    }
    Ok(report)
}

/// Forwards upload progress to the log
struct LogObserver;

impl UploadObserver for LogObserver {
    fn ready(&mut self) {
        info!("Device ready, sending");
    }

    fn chunk_sent(&mut self, offset: usize, len: usize) {
        debug!("Sent chunk at {} ({} bytes)", offset, len);
    }

    fn chunk_acked(&mut self, acked: usize, total: usize) {
        debug!("Acknowledged {}/{} bytes", acked, total);
    }

    fn line(&mut self, line: &str) {
        info!("Serial: {}", line);
    }
}
