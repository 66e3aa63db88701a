use super::helpers::{self, TEXEL_BYTES};
use wgpu;

/// Per-size GPU resources for one frame.
///
/// - `source_*` receives the uploaded source raster.
/// - `output_*` is the kernel's render target.
/// - `readback` is a mappable staging buffer with 256-byte aligned rows.
pub(crate) struct FrameTargets {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) source_tex: wgpu::Texture,
    pub(crate) source_view: wgpu::TextureView,
    pub(crate) output_tex: wgpu::Texture,
    pub(crate) output_view: wgpu::TextureView,
    pub(crate) readback: wgpu::Buffer,
    pub(crate) padded_row: u32,
}

impl FrameTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let (source_tex, source_view) = helpers::create_kernel_texture(
            device,
            "source_tex",
            size,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        let (output_tex, output_view) = helpers::create_kernel_texture(
            device,
            "output_tex",
            size,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        );
        let padded_row = helpers::padded_bytes_per_row(width * TEXEL_BYTES);
        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback"),
            size: padded_row as u64 * height as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            width,
            height,
            source_tex,
            source_view,
            output_tex,
            output_view,
            readback,
            padded_row,
        }
    }

    #[inline]
    pub(crate) fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    #[inline]
    pub(crate) fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}
