use platformer_common::SheetSize;
use std::path::{Path, PathBuf};

/// Where the desktop app looks for the sheet unless told otherwise.
pub const DEFAULT_SHEET_PATH: &str = "assets/spritesheet.png";

/// Errors from loading the sprite sheet.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to read sprite sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode sprite sheet: {0}")]
    Decode(#[from] image::ImageError),
    #[error("sprite sheet has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Decoded RGBA sprite sheet, ready for upload.
///
/// Rows are stored bottom to top, matching the bottom-left origin the
/// projector uses for texture V.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    size: SheetSize,
    pixels: Vec<u8>,
}

impl SpriteSheet {
    /// Read and decode the sheet at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SheetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let sheet = Self::from_bytes(&bytes)?;
        tracing::info!(
            "loaded sprite sheet {} ({}x{})",
            path.display(),
            sheet.size.width,
            sheet.size.height
        );
        Ok(sheet)
    }

    /// Decode an encoded image (PNG) held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SheetError> {
        let rgba = image::load_from_memory(bytes)?.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(SheetError::Empty { width, height });
        }
        Ok(Self {
            size: SheetSize::new(width, height),
            pixels: rgba.into_raw(),
        })
    }

    pub fn size(&self) -> SheetSize {
        self.size
    }

    /// Tightly packed RGBA8 pixels, bottom row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per pixel row.
    pub fn row_stride(&self) -> u32 {
        4 * self.size.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decode_reports_dimensions() {
        let img = RgbaImage::new(4, 2);
        let sheet = SpriteSheet::from_bytes(&encode_png(&img)).unwrap();
        assert_eq!(sheet.size(), SheetSize::new(4, 2));
        assert_eq!(sheet.pixels().len(), 4 * 2 * 4);
        assert_eq!(sheet.row_stride(), 16);
    }

    #[test]
    fn rows_are_flipped_bottom_first() {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        let sheet = SpriteSheet::from_bytes(&encode_png(&img)).unwrap();
        // first stored row is the image's bottom row
        assert_eq!(&sheet.pixels()[..4], &[0, 0, 255, 255]);
        assert_eq!(&sheet.pixels()[4..], &[255, 0, 0, 255]);
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        std::fs::write(&path, encode_png(&RgbaImage::new(3, 5))).unwrap();
        let sheet = SpriteSheet::load(&path).unwrap();
        assert_eq!(sheet.size(), SheetSize::new(3, 5));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SpriteSheet::load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = SpriteSheet::from_bytes(b"not a png").unwrap_err();
        assert!(matches!(err, SheetError::Decode(_)));
    }
}
