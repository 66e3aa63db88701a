use super::helpers::{self, TEXEL_BYTES};
use super::targets::FrameTargets;
use anyhow::Context;
use smear_core::{
    check_size, Color4, DistortionBackend, EffectConfig, Raster, RenderError, RippleUniforms,
    ShaderParams, SmearUniforms, RIPPLE_WGSL, SMEAR_WGSL,
};
use wgpu;

struct KernelPass {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
}

impl KernelPass {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        label: &str,
        source: &str,
        frag_entry: &str,
        uniform_size: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });
        let pipeline = helpers::make_kernel_pipeline(device, layout, &shader, frag_entry);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: uniform_size as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            pipeline,
            uniform_buffer,
        }
    }
}

/// Runs the WGSL kernels on a headless wgpu device and reads the frame back.
pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    bgl: wgpu::BindGroupLayout,
    smear: KernelPass,
    ripple: KernelPass,
    targets: Option<FrameTargets>,
    config: EffectConfig,
    adapter_name: String,
    max_dim: u32,
}

impl GpuBackend {
    /// Blocking constructor; fails when no adapter or device is available.
    pub fn new(config: &EffectConfig) -> anyhow::Result<Self> {
        pollster::block_on(Self::new_async(config))
    }

    pub async fn new_async(config: &EffectConfig) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let info = adapter.get_info();
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("smear_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .context("request_device")?;
        let max_dim = device.limits().max_texture_dimension_2d;

        let bgl = helpers::create_kernel_bgl(&device);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kernel_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let smear = KernelPass::new(
            &device,
            &layout,
            "smear",
            SMEAR_WGSL,
            "fs_smear",
            std::mem::size_of::<SmearUniforms>(),
        );
        let ripple = KernelPass::new(
            &device,
            &layout,
            "ripple",
            RIPPLE_WGSL,
            "fs_ripple",
            std::mem::size_of::<RippleUniforms>(),
        );

        log::info!(
            "[gpu] adapter '{}' ({:?}, {:?}), max texture {}",
            info.name,
            info.device_type,
            info.backend,
            max_dim
        );
        Ok(Self {
            device,
            queue,
            bgl,
            smear,
            ripple,
            targets: None,
            config: *config,
            adapter_name: info.name,
            max_dim,
        })
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    fn ensure_targets(&mut self, width: u32, height: u32) {
        if !matches!(&self.targets, Some(t) if t.matches(width, height)) {
            log::debug!("[gpu] (re)creating targets {}x{}", width, height);
            self.targets = Some(FrameTargets::new(&self.device, width, height));
        }
    }

    fn render_frame(
        &mut self,
        source: &Raster,
        params: &ShaderParams,
        out: &mut Raster,
    ) -> anyhow::Result<()> {
        let (width, height) = (source.width(), source.height());
        anyhow::ensure!(
            width <= self.max_dim && height <= self.max_dim,
            "frame {}x{} exceeds device limit {}",
            width,
            height,
            self.max_dim
        );

        self.ensure_targets(width, height);
        let Some(targets) = self.targets.as_ref() else {
            anyhow::bail!("frame targets missing");
        };
        let extent = targets.extent();

        let pass = match params {
            ShaderParams::Smear(p) => {
                let u = SmearUniforms::new(p, &self.config);
                self.queue
                    .write_buffer(&self.smear.uniform_buffer, 0, bytemuck::bytes_of(&u));
                &self.smear
            }
            ShaderParams::Ripple(p) => {
                let u = RippleUniforms::new(p, &self.config);
                self.queue
                    .write_buffer(&self.ripple.uniform_buffer, 0, bytemuck::bytes_of(&u));
                &self.ripple
            }
        };
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kernel_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.source_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: pass.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &targets.source_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(source.pixels()),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * TEXEL_BYTES),
                rows_per_image: Some(height),
            },
            extent,
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("kernel_encoder"),
            });
        {
            let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("kernel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &targets.output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            r.set_pipeline(&pass.pipeline);
            r.set_bind_group(0, &bind_group, &[]);
            r.draw(0..3, 0..1);
        }
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &targets.output_tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &targets.readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(targets.padded_row),
                    rows_per_image: Some(height),
                },
            },
            extent,
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = targets.readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .context("readback channel closed")?
            .context("readback map failed")?;

        {
            let mapped = slice.get_mapped_range();
            let row_bytes = (width * TEXEL_BYTES) as usize;
            let w = width as usize;
            for (y, row_out) in out.pixels_mut().chunks_exact_mut(w).enumerate() {
                let start = y * targets.padded_row as usize;
                let dst: &mut [u8] = bytemuck::cast_slice_mut::<Color4, u8>(row_out);
                dst.copy_from_slice(&mapped[start..start + row_bytes]);
            }
        }
        targets.readback.unmap();
        Ok(())
    }
}

impl DistortionBackend for GpuBackend {
    fn name(&self) -> &'static str {
        "gpu"
    }

    fn render(
        &mut self,
        source: &Raster,
        params: &ShaderParams,
        out: &mut Raster,
    ) -> Result<(), RenderError> {
        check_size(source, out)?;
        if params.is_idle() {
            out.copy_from(source);
            return Ok(());
        }
        self.render_frame(source, params, out)
            .map_err(|e| RenderError::Backend {
                backend: "gpu",
                message: format!("{e:#}"),
            })
    }
}
