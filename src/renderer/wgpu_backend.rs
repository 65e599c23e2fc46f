//! wgpu implementation of [`ComputeBackend`].

use std::iter;

use super::dispatcher::ComputeBackend;
use super::grid::{DispatchGrid, WorkgroupSize};
use crate::camera::Eye;
use crate::control::{ControlState, CONTROL_SIZE};
use crate::error::GasketError;
use crate::gpu::pipeline_helpers::{
    create_compute_pipeline, storage_texture_2d, texture_2d, uniform_buffer,
};
use crate::gpu::shader_composer::{
    ShaderComposer, RAY_MARCH_ENTRY, RAY_MARCH_SOURCE,
};
use crate::gpu::texture::{ColoringTexture, OutputImage, OUTPUT_FORMAT};

/// Compute pipeline, per-eye output images, the coloring texture and the
/// parameter buffer.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    layout: wgpu::BindGroupLayout,
    workgroup: WorkgroupSize,
    params: wgpu::Buffer,
    coloring: ColoringTexture,
    outputs: Option<[OutputImage; 2]>,
    bind_groups: Option<[wgpu::BindGroup; 2]>,
}

impl WgpuBackend {
    /// Compose and compile the kernel and allocate the parameter buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::KernelCompile`] if the kernel fails to
    /// compose, lacks its entry point, or is rejected by the device.
    pub async fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
    ) -> Result<Self, GasketError> {
        let mut composer = ShaderComposer::new()?;
        let module =
            composer.compose_naga(RAY_MARCH_SOURCE, "compute/ray_march.wgsl")?;
        let workgroup = WorkgroupSize::from_kernel(&module, RAY_MARCH_ENTRY)
            .ok_or_else(|| {
                GasketError::KernelCompile(format!(
                    "entry point '{RAY_MARCH_ENTRY}' not found"
                ))
            })?;

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Ray March Layout"),
                entries: &[
                    storage_texture_2d(0, OUTPUT_FORMAT),
                    texture_2d(1, wgpu::ShaderStages::COMPUTE),
                    uniform_buffer(
                        2,
                        wgpu::ShaderStages::COMPUTE,
                        CONTROL_SIZE as u64,
                    ),
                ],
            });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader =
            ShaderComposer::create_module(&device, "Ray March Shader", module);
        let pipeline = create_compute_pipeline(
            &device,
            "Ray March",
            &shader,
            RAY_MARCH_ENTRY,
            &[&layout],
        );
        if let Some(error) = device.pop_error_scope().await {
            return Err(GasketError::KernelCompile(error.to_string()));
        }

        let params = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Control Params"),
            size: CONTROL_SIZE as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let coloring = ColoringTexture::placeholder(&device, &queue);

        Ok(Self {
            device,
            queue,
            pipeline,
            layout,
            workgroup,
            params,
            coloring,
            outputs: None,
            bind_groups: None,
        })
    }

    /// Output image for `eye`, once targets exist.
    #[must_use]
    pub fn output(&self, eye: Eye) -> Option<&OutputImage> {
        self.outputs.as_ref().map(|outputs| &outputs[eye.index()])
    }

    fn rebuild_bind_groups(&mut self) {
        let Some(outputs) = &self.outputs else {
            return;
        };
        let make = |output: &OutputImage, label: &str| {
            self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &self.layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            &output.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            &self.coloring.view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: self.params.as_entire_binding(),
                    },
                ],
            })
        };
        self.bind_groups = Some([
            make(&outputs[0], "Ray March Left"),
            make(&outputs[1], "Ray March Right"),
        ]);
    }
}

impl ComputeBackend for WgpuBackend {
    fn workgroup_size(&self) -> WorkgroupSize {
        self.workgroup
    }

    fn resize_targets(&mut self, width: u32, height: u32) {
        self.outputs = Some([
            OutputImage::new(&self.device, "Left Eye", width, height),
            OutputImage::new(&self.device, "Right Eye", width, height),
        ]);
        self.rebuild_bind_groups();
    }

    fn max_texture_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    fn set_coloring_image(&mut self, image: &image::RgbaImage) {
        self.coloring =
            ColoringTexture::from_image(&self.device, &self.queue, image);
        log::info!(
            "coloring texture {}x{}",
            self.coloring.size.0,
            self.coloring.size.1
        );
        self.rebuild_bind_groups();
    }

    fn dispatch_eye(
        &self,
        eye: Eye,
        params: &ControlState,
        grid: DispatchGrid,
    ) -> Result<(), GasketError> {
        let Some(bind_groups) = &self.bind_groups else {
            return Err(GasketError::Dispatch("no output images".into()));
        };

        self.queue.write_buffer(&self.params, 0, params.to_bytes());

        let mut encoder =
            self.device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Ray March Encoder"),
                });
        {
            let mut pass =
                encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: Some("Ray March Pass"),
                    timestamp_writes: None,
                });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_groups[eye.index()], &[]);
            pass.dispatch_workgroups(grid.x, grid.y, grid.z);
        }

        let submission = self.queue.submit(iter::once(encoder.finish()));
        let _ = self
            .device
            .poll(wgpu::PollType::WaitForSubmissionIndex(submission))
            .map_err(|e| GasketError::Dispatch(e.to_string()))?;
        Ok(())
    }
}
