//! QR codes for the back cover

use super::backend::RasterImage;
use crate::types::*;
use image::Luma;
use qrcode::QrCode;

/// Pixels per QR module in the generated raster
const MODULE_PIXELS: u32 = 8;

/// Encode `data` as a QR code raster with a quiet zone
pub fn qr_image(data: &str) -> Result<RasterImage> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| BookletError::Image(e.to_string()))?;

    let image = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    Ok(RasterImage {
        width: image.width() as usize,
        height: image.height() as usize,
        pixels: image.into_raw(),
    })
}
