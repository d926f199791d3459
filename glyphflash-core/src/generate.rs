//! Rendering a whole asset set
//!
//! One face and one [`GenerationConfig`] produce every bitmap of a run. The
//! first failure aborts the run; there is no partial output.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::config::GenerationConfig;
use crate::raster::{Bitmap, FontFace, RasterConfig, RasterEncoder, RasterError};

/// A rendered asset, ready for emission or upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAsset {
    /// Symbol prefix
    pub name: String,
    /// Text that was rendered
    pub text: String,
    /// Packed bitmap
    pub bitmap: Bitmap,
}

/// Errors raised while rendering an asset set
#[derive(Debug, Clone, PartialEq)]
pub enum AssetError {
    /// Height or baseline cannot be used
    InvalidConfig(RasterError),
    /// One asset failed to render
    Render {
        name: String,
        text: String,
        source: RasterError,
    },
    /// An upload names an asset that was not rendered
    Unknown(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid raster settings: {}", e),
            Self::Render { name, text, source } => {
                write!(f, "failed to render {} ({:?}): {}", name, text, source)
            }
            Self::Unknown(name) => write!(f, "no rendered asset named {}", name),
        }
    }
}

impl core::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) | Self::Render { source: e, .. } => Some(e),
            Self::Unknown(_) => None,
        }
    }
}

/// Render every asset of `config` with `face`, in config order
pub fn render_assets<F: FontFace + ?Sized>(
    face: &F,
    config: &GenerationConfig,
) -> Result<Vec<RenderedAsset>, AssetError> {
    let raster = RasterConfig::new(config.height, config.baseline).map_err(AssetError::InvalidConfig)?;
    let encoder = RasterEncoder::new(face, raster);

    config
        .assets
        .iter()
        .map(|asset| {
            encoder
                .encode(&asset.text)
                .map(|bitmap| RenderedAsset {
                    name: asset.name.clone(),
                    text: asset.text.clone(),
                    bitmap,
                })
                .map_err(|source| AssetError::Render {
                    name: asset.name.clone(),
                    text: asset.text.clone(),
                    source,
                })
        })
        .collect()
}

/// Concatenate the packed data of the named assets, in the order named
pub fn upload_payload<S: AsRef<str>>(
    assets: &[RenderedAsset],
    names: &[S],
) -> Result<Vec<u8>, AssetError> {
    let mut payload = Vec::new();
    for name in names {
        let name = name.as_ref();
        let asset = assets
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| AssetError::Unknown(name.into()))?;
        payload.extend_from_slice(asset.bitmap.data());
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetSpec;
    use crate::raster::stencil::StencilFace;
    use alloc::vec;

    fn config(assets: Vec<AssetSpec>) -> GenerationConfig {
        GenerationConfig {
            height: 8,
            baseline: 6,
            assets,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_render_in_config_order() {
        let config = config(vec![
            AssetSpec::digit(1),
            AssetSpec::digit(0),
            AssetSpec::new("PAIR", "10"),
        ]);
        let assets = render_assets(&StencilFace::reference(), &config).unwrap();

        let names: Vec<&str> = assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["DIGIT_1", "DIGIT_0", "PAIR"]);
        assert_eq!(assets[2].text, "10");
        assert_eq!(assets[1].bitmap.data()[0], 0x70);
        assert_eq!(assets[2].bitmap.byte_width(), 2);
    }

    #[test]
    fn test_first_failure_aborts() {
        let config = config(vec![AssetSpec::digit(0), AssetSpec::digit(7), AssetSpec::digit(1)]);
        let err = render_assets(&StencilFace::reference(), &config).unwrap_err();
        assert_eq!(
            err,
            AssetError::Render {
                name: "DIGIT_7".into(),
                text: "7".into(),
                source: RasterError::MissingGlyph('7'),
            }
        );
    }

    #[test]
    fn test_zero_height_is_a_config_error() {
        let config = GenerationConfig {
            height: 0,
            ..config(vec![AssetSpec::digit(0)])
        };
        assert_eq!(
            render_assets(&StencilFace::reference(), &config),
            Err(AssetError::InvalidConfig(RasterError::ZeroHeight))
        );
    }

    #[test]
    fn test_upload_payload_concatenates_in_named_order() {
        let config = config(vec![AssetSpec::digit(0), AssetSpec::digit(1)]);
        let assets = render_assets(&StencilFace::reference(), &config).unwrap();

        let payload = upload_payload(&assets, &["DIGIT_1", "DIGIT_0"]).unwrap();
        let mut expected = assets[1].bitmap.data().to_vec();
        expected.extend_from_slice(assets[0].bitmap.data());
        assert_eq!(payload, expected);

        assert_eq!(
            upload_payload(&assets, &["DIGIT_9"]),
            Err(AssetError::Unknown("DIGIT_9".into()))
        );
    }
}
