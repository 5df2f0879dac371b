//! QR code rendering to SVG path data.

use std::fmt::Write;

use qrcode::{Color, EcLevel, QrCode};

use crate::error::GatewayError;

/// Quiet zone around the modules, in modules.
const MARGIN: usize = 1;

/// A QR code as an SVG-ready square: side length in modules (including the
/// quiet zone) and a path that fills every dark module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannableCode {
    pub size: usize,
    pub path: String,
}

impl ScannableCode {
    /// Encode `data` at error-correction level M.
    pub fn render(data: &str) -> Result<Self, GatewayError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
            .map_err(|e| GatewayError::Code(e.to_string()))?;

        let width = code.width();
        let mut path = String::new();
        for (i, color) in code.to_colors().into_iter().enumerate() {
            if color == Color::Dark {
                let x = i % width + MARGIN;
                let y = i / width + MARGIN;
                // Writing to a String cannot fail.
                let _ = write!(path, "M{x} {y}h1v1h-1z");
            }
        }

        Ok(Self {
            size: width + 2 * MARGIN,
            path,
        })
    }
}
