//! Image decode and PNG output.

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::error::{Result, TesseraError};

/// Decode any image format the `image` crate understands into RGBA.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(io) => TesseraError::Io {
            path: path.to_path_buf(),
            message: io.to_string(),
        },
        other => TesseraError::Decode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    Ok(img.to_rgba8())
}

/// Write an RGBA image as PNG, regardless of the path's extension.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| TesseraError::Encode {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Colour;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_load() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Colour::BLACK.into());
        img.put_pixel(1, 0, Colour::WHITE.into());
        img.put_pixel(1, 1, Colour::new(255, 0, 0, 128).into());

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        write_png(&img, &path).unwrap();
        assert!(path.exists());

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(loaded.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(loaded.get_pixel(0, 1).0, [0, 0, 0, 0]);
        assert_eq!(loaded.get_pixel(1, 1).0, [255, 0, 0, 128]);
    }

    #[test]
    fn test_write_png_ignores_extension() {
        let img = RgbaImage::from_pixel(1, 1, Colour::WHITE.into());
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.img");

        write_png(&img, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, TesseraError::Io { .. }));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            load_image(&path).unwrap_err(),
            TesseraError::Decode { .. }
        ));
    }

    #[test]
    fn test_write_into_missing_directory() {
        let dir = tempdir().unwrap();
        let img = RgbaImage::new(1, 1);
        let err = write_png(&img, &dir.path().join("nope").join("out.png")).unwrap_err();
        assert!(matches!(err, TesseraError::Encode { .. }));
    }
}
