use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image is empty ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// RGBA8 pixels for the ground plane, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl GroundImage {
    /// Decode an image file (PNG or JPEG) into RGBA8.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba: decoded.into_raw(),
        })
    }

    /// Two-tone checkerboard of `cells` x `cells` squares.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);
        let light = [235, 235, 235, 255];
        let dark = [150, 150, 150, 255];
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let texel = if (x / cell + y / cell) % 2 == 0 {
                    light
                } else {
                    dark
                };
                rgba.extend_from_slice(&texel);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    /// Load `path` if given, otherwise (or on failure) use the checkerboard.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(img) => {
                tracing::info!(
                    "ground texture {} ({}x{})",
                    path.display(),
                    img.width,
                    img.height
                );
                img
            }
            Err(e) => {
                tracing::warn!(
                    "ground texture {} unusable, using checkerboard: {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Upload as an sRGB texture and return its view.
    pub(crate) fn upload(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::TextureView {
        let size = wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ground_texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            size,
        );
        texture.create_view(&Default::default())
    }
}

impl Default for GroundImage {
    fn default() -> Self {
        Self::checkerboard(256, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let img = GroundImage::checkerboard(4, 2);
        assert_eq!(img.rgba.len(), 4 * 4 * 4);
        let texel = |x: usize, y: usize| img.rgba[(y * 4 + x) * 4];
        assert_eq!(texel(0, 0), texel(1, 1));
        assert_ne!(texel(0, 0), texel(2, 0));
        assert_ne!(texel(0, 0), texel(0, 2));
        assert_eq!(texel(0, 0), texel(2, 2));
    }

    #[test]
    fn checkerboard_tolerates_degenerate_sizes() {
        let img = GroundImage::checkerboard(0, 0);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.rgba.len(), 4);
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground.png");
        let mut src = image::RgbaImage::new(3, 2);
        src.put_pixel(2, 1, image::Rgba([10, 20, 30, 255]));
        src.save(&path).unwrap();

        let img = GroundImage::load(&path).unwrap();
        assert_eq!((img.width, img.height), (3, 2));
        assert_eq!(&img.rgba[(3 + 2) * 4..][..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GroundImage::load(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, TextureError::Io(_)));
    }

    #[test]
    fn garbage_is_decode_error_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(matches!(
            GroundImage::load(&path),
            Err(TextureError::Decode(_))
        ));
        assert_eq!(GroundImage::load_or_default(Some(path.as_path())), GroundImage::default());
        assert_eq!(GroundImage::load_or_default(None), GroundImage::default());
    }
}
