//! Image textures owned by the renderer

use std::borrow::Cow;

use tessera_paint::{ImageId, ImageSource};
use wgpu::util::DeviceExt;

/// A GPU image texture ready for sampling
pub struct GpuImage {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl GpuImage {
    /// Create a GPU image from tightly packed RGBA pixel data
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pixels: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let texture = device.create_texture_with_data(
            queue,
            &wgpu::TextureDescriptor {
                label,
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            pixels,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            width,
            height,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Write RGBA pixels into a sub-rect of this image, clipped to its bounds
    pub fn write_rgba_sub_rect(
        &self,
        queue: &wgpu::Queue,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) {
        let visible_width = width.min(self.width.saturating_sub(x));
        let visible_height = height.min(self.height.saturating_sub(y));
        if visible_width == 0 || visible_height == 0 {
            return;
        }

        let Some(data) = pad_rows(pixels, width, visible_width, visible_height) else {
            tracing::debug!(
                "write_rgba_sub_rect: {} bytes is short for {}x{}",
                pixels.len(),
                width,
                visible_height
            );
            return;
        };

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(padded_bytes_per_row(visible_width)),
                rows_per_image: Some(visible_height),
            },
            wgpu::Extent3d {
                width: visible_width,
                height: visible_height,
                depth_or_array_layers: 1,
            },
        );
    }
}

/// Renderer-issued handle to an uploaded image
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
}

impl ImageSource for ImageHandle {
    fn image_id(&self) -> Option<ImageId> {
        Some(self.id)
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Row pitch for RGBA8 copies, rounded up to the copy alignment
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Expand single-channel coverage into white RGBA carrying it as alpha
pub fn alpha_to_rgba(alpha: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(alpha.len() * 4);
    for &a in alpha {
        rgba.extend_from_slice(&[255, 255, 255, a]);
    }
    rgba
}

/// Copy the first `width` pixels of `height` RGBA rows into an aligned buffer
///
/// Source rows are `src_width` pixels apart. Returns `None` if `pixels` does
/// not hold `height` such rows or `width` exceeds `src_width`.
pub(crate) fn pad_rows(
    pixels: &[u8],
    src_width: u32,
    width: u32,
    height: u32,
) -> Option<Cow<'_, [u8]>> {
    if width > src_width {
        return None;
    }
    let src_row = (src_width as usize).checked_mul(4)?;
    let row_bytes = width as usize * 4;
    let required = src_row.checked_mul(height as usize)?;
    if pixels.len() < required {
        return None;
    }

    let padded_row = padded_bytes_per_row(width) as usize;
    if padded_row == row_bytes && src_row == row_bytes {
        return Some(Cow::Borrowed(&pixels[..required]));
    }

    let mut padded = vec![0u8; padded_row * height as usize];
    for (row, src) in pixels[..required].chunks_exact(src_row).enumerate() {
        let dst = row * padded_row;
        padded[dst..dst + row_bytes].copy_from_slice(&src[..row_bytes]);
    }
    Some(Cow::Owned(padded))
}

/// Strip row padding from a readback buffer, swizzling BGRA to RGBA
pub fn unpad_to_rgba(
    format: wgpu::TextureFormat,
    bytes: &[u8],
    width: u32,
    height: u32,
) -> Option<Vec<u8>> {
    let swap = match format {
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => true,
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => false,
        _ => return None,
    };

    let padded_row = padded_bytes_per_row(width) as usize;
    let row_bytes = width as usize * 4;
    if bytes.len() < padded_row.saturating_mul(height as usize) {
        return None;
    }

    let mut out = Vec::with_capacity(row_bytes * height as usize);
    for y in 0..height as usize {
        let row = &bytes[y * padded_row..y * padded_row + row_bytes];
        if swap {
            for px in row.chunks_exact(4) {
                out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
            }
        } else {
            out.extend_from_slice(row);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn test_alpha_to_rgba() {
        assert_eq!(
            alpha_to_rgba(&[0, 128]),
            vec![255, 255, 255, 0, 255, 255, 255, 128]
        );
    }

    #[test]
    fn test_pad_rows() {
        let pixels: Vec<u8> = (0..2 * 2 * 4).map(|v| v as u8).collect();
        let padded = pad_rows(&pixels, 2, 2, 2).unwrap();
        assert_eq!(padded.len(), 512);
        assert_eq!(&padded[0..8], &pixels[0..8]);
        assert_eq!(&padded[256..264], &pixels[8..16]);
        assert!(pad_rows(&pixels[..4], 2, 2, 2).is_none());

        let wide = vec![7u8; 64 * 4];
        assert!(matches!(pad_rows(&wide, 64, 64, 1), Some(Cow::Borrowed(_))));
    }

    #[test]
    fn test_pad_rows_keeps_source_stride_when_clipped() {
        // 3x2 source, only the first 2 columns are visible
        let pixels: Vec<u8> = (0..3 * 2 * 4).map(|v| v as u8).collect();
        let padded = pad_rows(&pixels, 3, 2, 2).unwrap();
        assert_eq!(padded.len(), 512);
        assert_eq!(&padded[0..8], &pixels[0..8]);
        assert_eq!(&padded[8..12], &[0, 0, 0, 0]);
        // second row starts at the source stride, not the clipped width
        assert_eq!(&padded[256..264], &pixels[12..20]);

        assert!(pad_rows(&pixels, 2, 3, 2).is_none());
        assert!(pad_rows(&pixels[..20], 3, 2, 2).is_none());
    }

    #[test]
    fn test_unpad_swizzles_bgra() {
        let mut bytes = vec![0u8; 256];
        bytes[0..4].copy_from_slice(&[10, 20, 30, 40]);
        let rgba = unpad_to_rgba(wgpu::TextureFormat::Bgra8UnormSrgb, &bytes, 1, 1).unwrap();
        assert_eq!(rgba, vec![30, 20, 10, 40]);

        let rgba = unpad_to_rgba(wgpu::TextureFormat::Rgba8Unorm, &bytes, 1, 1).unwrap();
        assert_eq!(rgba, vec![10, 20, 30, 40]);

        assert!(unpad_to_rgba(wgpu::TextureFormat::R8Unorm, &bytes, 1, 1).is_none());
        assert!(unpad_to_rgba(wgpu::TextureFormat::Rgba8Unorm, &bytes[..10], 1, 1).is_none());
    }

    #[test]
    fn test_handle_is_image_source() {
        let handle = ImageHandle {
            id: ImageId(3),
            width: 16,
            height: 8,
        };
        assert_eq!(handle.image_id(), Some(ImageId(3)));
        assert_eq!(ImageSource::width(&handle), 16);
        assert_eq!(ImageSource::height(&handle), 8);
    }
}
