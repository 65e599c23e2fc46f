//! Blits the per-eye output images into their window viewports.

use super::wgpu_backend::WgpuBackend;
use crate::camera::Eye;
use crate::engine::layout::{PixelRect, ViewportLayout};
use crate::error::GasketError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, BLIT_SOURCE};

/// Screen-space pipeline drawing one textured quad per visible eye.
pub struct Presenter {
    pipeline: wgpu::RenderPipeline,
    layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl Presenter {
    /// Build the blit pipeline for the surface format.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::KernelCompile`] if the blit shader fails to
    /// compose.
    pub fn new(context: &RenderContext) -> Result<Self, GasketError> {
        let device = &context.device;
        let mut composer = ShaderComposer::new()?;
        let shader =
            composer.compose(device, "Blit Shader", BLIT_SOURCE, "screen/blit.wgsl")?;

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Blit Layout"),
                entries: &[
                    texture_2d(0, wgpu::ShaderStages::FRAGMENT),
                    filtering_sampler(1),
                ],
            });
        let pipeline = create_screen_space_pipeline(
            device,
            "Blit",
            &shader,
            context.format(),
            &[&layout],
        );
        let sampler = linear_sampler(device, "Blit Sampler");

        Ok(Self {
            pipeline,
            layout,
            sampler,
        })
    }

    /// Draw the eyes `layout` shows and present the frame.
    ///
    /// # Errors
    ///
    /// Returns the surface error if no swapchain texture could be
    /// acquired; the caller reconfigures on `Lost`/`Outdated`.
    pub fn present(
        &self,
        context: &RenderContext,
        backend: &WgpuBackend,
        layout: &ViewportLayout,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let eyes: Vec<(PixelRect, wgpu::BindGroup)> = layout
            .eyes()
            .filter_map(|(eye, rect)| {
                self.bind_eye(context, backend, eye).map(|group| (rect, group))
            })
            .collect();

        let mut encoder = context.create_encoder("Blit Encoder");
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Blit Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &target,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            pass.set_pipeline(&self.pipeline);
            let (surface_w, surface_h) = context.size();
            for (rect, group) in &eyes {
                let Some(rect) = rect.clipped(surface_w, surface_h) else {
                    continue;
                };
                pass.set_viewport(
                    rect.x as f32,
                    rect.y as f32,
                    rect.width as f32,
                    rect.height as f32,
                    0.0,
                    1.0,
                );
                pass.set_bind_group(0, group, &[]);
                pass.draw(0..3, 0..1);
            }
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn bind_eye(
        &self,
        context: &RenderContext,
        backend: &WgpuBackend,
        eye: Eye,
    ) -> Option<wgpu::BindGroup> {
        let output = backend.output(eye)?;
        Some(context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Blit Bind Group"),
            layout: &self.layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&output.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        }))
    }
}
