use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::GasketError;

/// Ray-march kernel source.
pub const RAY_MARCH_SOURCE: &str =
    include_str!("../../assets/shaders/compute/ray_march.wgsl");
/// Kernel entry point name.
pub const RAY_MARCH_ENTRY: &str = "rayMarchShader";
/// Screen blit source.
pub const BLIT_SOURCE: &str =
    include_str!("../../assets/shaders/screen/blit.wgsl");

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming
/// shaders use `#import gasket::module_name` to pull in shared code. The
/// composer produces `naga::Module` IR directly, which is also what the
/// kernel's declared workgroup size is read from.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

impl ShaderComposer {
    /// Register the shared modules.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::KernelCompile`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, GasketError> {
        let mut composer = Composer::default();

        let modules: &[ModuleDef] = &[
            ModuleDef {
                source: include_str!(
                    "../../assets/shaders/modules/fullscreen.wgsl"
                ),
                file_path: "modules/fullscreen.wgsl",
            },
            ModuleDef {
                source: include_str!("../../assets/shaders/modules/control.wgsl"),
                file_path: "modules/control.wgsl",
            },
        ];

        for m in modules {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    GasketError::KernelCompile(format!(
                        "shader module '{}': {e}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::KernelCompile`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, GasketError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(Self::create_module(device, label, naga_module))
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module.
    ///
    /// # Errors
    ///
    /// Returns [`GasketError::KernelCompile`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GasketError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                GasketError::KernelCompile(format!("shader '{file_path}': {e}"))
            })
    }

    /// Hand already-composed IR to the device.
    pub fn create_module(
        device: &wgpu::Device,
        label: &str,
        module: naga::Module,
    ) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::mem::offset_of;

    use naga::TypeInner;

    use super::*;
    use crate::control::{ControlState, CONTROL_SIZE};
    use crate::renderer::grid::WorkgroupSize;

    fn kernel() -> naga::Module {
        ShaderComposer::new()
            .unwrap()
            .compose_naga(RAY_MARCH_SOURCE, "compute/ray_march.wgsl")
            .unwrap()
    }

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in [
            (RAY_MARCH_SOURCE, "compute/ray_march.wgsl"),
            (BLIT_SOURCE, "screen/blit.wgsl"),
        ] {
            composer
                .compose_naga(source, file_path)
                .unwrap_or_else(|e| panic!("{file_path} failed: {e}"));
        }
    }

    #[test]
    fn kernel_control_layout_matches_host_record() {
        let module = kernel();
        let (members, span) = module
            .types
            .iter()
            .find_map(|(_, ty)| {
                let name = ty.name.as_deref()?;
                match &ty.inner {
                    TypeInner::Struct { members, span }
                        if name.starts_with("Control") =>
                    {
                        Some((members.clone(), *span))
                    }
                    _ => None,
                }
            })
            .expect("Control struct in kernel IR");

        assert_eq!(span as usize, CONTROL_SIZE);

        let offset = |name: &str| {
            members
                .iter()
                .find(|m| m.name.as_deref() == Some(name))
                .map(|m| m.offset as usize)
                .unwrap_or_else(|| panic!("member {name} missing"))
        };
        assert_eq!(offset("camera"), offset_of!(ControlState, camera));
        assert_eq!(offset("version"), offset_of!(ControlState, version));
        assert_eq!(offset("focus"), offset_of!(ControlState, focus));
        assert_eq!(offset("light"), offset_of!(ControlState, light));
        assert_eq!(
            offset("view_vector"),
            offset_of!(ControlState, view_vector)
        );
        assert_eq!(offset("top_vector"), offset_of!(ControlState, top_vector));
        assert_eq!(
            offset("side_vector"),
            offset_of!(ControlState, side_vector)
        );
        assert_eq!(offset("txt_center"), offset_of!(ControlState, txt_center));
        assert_eq!(offset("txt_size"), offset_of!(ControlState, txt_size));
        assert_eq!(offset("x_size"), offset_of!(ControlState, x_size));
        assert_eq!(offset("fog"), offset_of!(ControlState, fog));
        assert_eq!(offset("parallax"), offset_of!(ControlState, parallax));
        assert_eq!(offset("style"), offset_of!(ControlState, style));
        assert_eq!(offset("txt_on_off"), offset_of!(ControlState, txt_on_off));
        assert_eq!(offset("lighting"), offset_of!(ControlState, lighting));
    }

    #[test]
    fn kernel_declares_expected_workgroup() {
        let module = kernel();
        let group = WorkgroupSize::from_kernel(&module, RAY_MARCH_ENTRY)
            .expect("kernel entry point");
        assert_eq!(group, WorkgroupSize::new(32, 256));
        assert_eq!(group.height, 8);
    }

    #[test]
    fn broken_source_is_a_compile_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer
            .compose_naga("fn broken( {", "broken.wgsl")
            .unwrap_err();
        assert!(matches!(err, GasketError::KernelCompile(_)));
    }
}
