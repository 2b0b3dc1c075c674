//! Export options chosen by the user before a conversion

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel format the converter should encode the texture with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompressionFormat {
    /// BC1 / DXT1 (RGB, 1-bit alpha)
    #[default]
    Bc1,

    /// BC2 / DXT3 (explicit alpha)
    Bc2,

    /// BC3 / DXT5 (interpolated alpha)
    Bc3,

    /// BC4 (single red channel)
    Bc4,

    /// BC5 (red + green channels, normal maps)
    Bc5,

    /// BC7 (high quality RGBA)
    Bc7,

    /// R8G8B8A8, no block compression
    Uncompressed,
}

impl CompressionFormat {
    /// All formats in the order they are offered to the user
    pub const ALL: [CompressionFormat; 7] = [
        CompressionFormat::Bc1,
        CompressionFormat::Bc2,
        CompressionFormat::Bc3,
        CompressionFormat::Bc4,
        CompressionFormat::Bc5,
        CompressionFormat::Bc7,
        CompressionFormat::Uncompressed,
    ];

    /// Label shown in the format chooser
    pub fn display_name(&self) -> &'static str {
        match self {
            CompressionFormat::Bc1 => "BC1 / DXT1",
            CompressionFormat::Bc2 => "BC2 / DXT3",
            CompressionFormat::Bc3 => "BC3 / DXT5",
            CompressionFormat::Bc4 => "BC4 (R)",
            CompressionFormat::Bc5 => "BC5 (RG)",
            CompressionFormat::Bc7 => "BC7 (HQ)",
            CompressionFormat::Uncompressed => "R8G8B8A8 (Uncompressed)",
        }
    }

    /// DXGI format name passed to texconv's `-f` flag
    pub fn texconv_token(&self) -> &'static str {
        match self {
            CompressionFormat::Bc1 => "BC1_UNORM",
            CompressionFormat::Bc2 => "BC2_UNORM",
            CompressionFormat::Bc3 => "BC3_UNORM",
            CompressionFormat::Bc4 => "BC4_UNORM",
            CompressionFormat::Bc5 => "BC5_UNORM",
            CompressionFormat::Bc7 => "BC7_UNORM",
            CompressionFormat::Uncompressed => "R8G8B8A8_UNORM",
        }
    }

    /// Look up a format by its chooser label
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.display_name() == name)
    }

    /// Short command-line name (`bc1` .. `bc7`, `rgba8`)
    pub fn short_name(&self) -> &'static str {
        match self {
            CompressionFormat::Bc1 => "bc1",
            CompressionFormat::Bc2 => "bc2",
            CompressionFormat::Bc3 => "bc3",
            CompressionFormat::Bc4 => "bc4",
            CompressionFormat::Bc5 => "bc5",
            CompressionFormat::Bc7 => "bc7",
            CompressionFormat::Uncompressed => "rgba8",
        }
    }

    /// Parse a short name, a DXT alias or a texconv token (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| {
            value == f.short_name()
                || value == f.texconv_token().to_ascii_lowercase()
                || f.dxt_alias().is_some_and(|alias| value == alias)
        })
    }

    fn dxt_alias(&self) -> Option<&'static str> {
        match self {
            CompressionFormat::Bc1 => Some("dxt1"),
            CompressionFormat::Bc2 => Some("dxt3"),
            CompressionFormat::Bc3 => Some("dxt5"),
            _ => None,
        }
    }
}

impl fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Options for a single export, immutable once collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Target pixel format
    pub format: CompressionFormat,

    /// Generate the full mip chain (`-m 0`)
    pub generate_mipmaps: bool,

    /// Treat the image as sRGB (`-srgb`)
    pub use_srgb: bool,

    /// Let texconv overwrite an existing output file (`-y`)
    pub overwrite_existing: bool,
}

impl ExportOptions {
    /// Options with the given format and every toggle enabled
    pub fn new(format: CompressionFormat) -> Self {
        Self {
            format,
            generate_mipmaps: true,
            use_srgb: true,
            overwrite_existing: true,
        }
    }

    pub fn with_mipmaps(mut self, enable: bool) -> Self {
        self.generate_mipmaps = enable;
        self
    }

    pub fn with_srgb(mut self, enable: bool) -> Self {
        self.use_srgb = enable;
        self
    }

    pub fn with_overwrite(mut self, enable: bool) -> Self {
        self.overwrite_existing = enable;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(CompressionFormat::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_dialog() {
        let options = ExportOptions::default();
        assert_eq!(options.format, CompressionFormat::ALL[0]);
        assert!(options.generate_mipmaps);
        assert!(options.use_srgb);
        assert!(options.overwrite_existing);
    }

    #[test]
    fn test_format_table() {
        let expected = [
            ("BC1 / DXT1", "BC1_UNORM"),
            ("BC2 / DXT3", "BC2_UNORM"),
            ("BC3 / DXT5", "BC3_UNORM"),
            ("BC4 (R)", "BC4_UNORM"),
            ("BC5 (RG)", "BC5_UNORM"),
            ("BC7 (HQ)", "BC7_UNORM"),
            ("R8G8B8A8 (Uncompressed)", "R8G8B8A8_UNORM"),
        ];

        for (format, (label, token)) in CompressionFormat::ALL.iter().zip(expected) {
            assert_eq!(format.display_name(), label);
            assert_eq!(format.texconv_token(), token);
            assert_eq!(CompressionFormat::from_display_name(label), Some(*format));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(CompressionFormat::parse("bc7"), Some(CompressionFormat::Bc7));
        assert_eq!(CompressionFormat::parse("DXT5"), Some(CompressionFormat::Bc3));
        assert_eq!(
            CompressionFormat::parse("r8g8b8a8_unorm"),
            Some(CompressionFormat::Uncompressed)
        );
        assert_eq!(CompressionFormat::parse("rgba8"), Some(CompressionFormat::Uncompressed));
        assert_eq!(CompressionFormat::parse("bc6h"), None);
    }
}
