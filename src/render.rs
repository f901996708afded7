use crate::constants::*;
use crate::mesh::{self, Mesh};
use flame_core::FlameOutputs;
use glam::{Mat4, Vec3};
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
use helpers::{MeshPipelineDesc, ADDITIVE_BLEND};

// ===================== WebGPU state =====================

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    light_pos: [f32; 4],   // w = intensity
    light_color: [f32; 4], // w = range
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ModelUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    flame: [f32; 4], // time, blow strength, flame size, unused
    gravity: [f32; 4],
}

impl ModelUniforms {
    fn solid(model: Mat4, color: [f32; 3]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
            flame: [0.0; 4],
            gravity: [0.0; 4],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuMesh {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
        mesh: &Mesh,
        uniforms: ModelUniforms,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    fn draw<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Everything the renderer needs for one frame.
pub struct SceneFrame {
    pub view_proj: Mat4,
    pub eye: Vec3,
    pub flame: FlameOutputs,
}

#[inline]
pub fn flame_model_matrix(scale: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, FLAME_CENTER_Y, 0.0))
        * Mat4::from_scale(Vec3::splat(scale.max(0.0)))
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    lit_pipeline: wgpu::RenderPipeline,
    flame_pipeline: wgpu::RenderPipeline,

    floor: GpuMesh,
    body: GpuMesh,
    wick: GpuMesh,
    flame: GpuMesh,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("candle_shader"),
            source: wgpu::ShaderSource::Wgsl(flame_core::CANDLE_WGSL.into()),
        });
        let scene_bgl = helpers::uniform_bind_group_layout(
            &device,
            "scene_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let model_bgl = helpers::uniform_bind_group_layout(
            &device,
            "model_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("candle_pl"),
            bind_group_layouts: &[&scene_bgl, &model_bgl],
            push_constant_ranges: &[],
        });
        let lit_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl,
            &shader,
            format,
            MeshPipelineDesc {
                label: "lit_pipeline",
                vs_entry: "vs_lit",
                fs_entry: "fs_lit",
                blend: None,
                depth_write: true,
            },
        );
        let flame_pipeline = helpers::make_mesh_pipeline(
            &device,
            &pl,
            &shader,
            format,
            MeshPipelineDesc {
                label: "flame_pipeline",
                vs_entry: "vs_flame",
                fs_entry: "fs_flame",
                blend: Some(ADDITIVE_BLEND),
                depth_write: false,
            },
        );

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let floor = GpuMesh::new(
            &device,
            &model_bgl,
            "floor",
            &mesh::floor_plane(FLOOR_SIZE),
            ModelUniforms::solid(
                Mat4::from_translation(Vec3::new(0.0, FLOOR_Y, 0.0)),
                FLOOR_COLOR,
            ),
        );
        let body = GpuMesh::new(
            &device,
            &model_bgl,
            "candle_body",
            &mesh::cylinder(CANDLE_RADIUS, CANDLE_HEIGHT, CANDLE_SEGMENTS),
            ModelUniforms::solid(
                Mat4::from_translation(Vec3::new(0.0, CANDLE_CENTER_Y, 0.0)),
                CANDLE_COLOR,
            ),
        );
        let wick = GpuMesh::new(
            &device,
            &model_bgl,
            "wick",
            &mesh::cylinder(WICK_RADIUS, WICK_HEIGHT, WICK_SEGMENTS),
            ModelUniforms::solid(
                Mat4::from_translation(Vec3::new(0.0, WICK_CENTER_Y, 0.0)),
                WICK_COLOR,
            ),
        );
        let flame = GpuMesh::new(
            &device,
            &model_bgl,
            "flame",
            &mesh::uv_sphere(flame_core::FLAME_RADIUS, FLAME_SEGMENTS),
            ModelUniforms::solid(flame_model_matrix(1.0), [1.0, 1.0, 1.0]),
        );

        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_tex,
            depth_view,
            scene_buffer,
            scene_bind_group,
            lit_pipeline,
            flame_pipeline,
            floor,
            body,
            wick,
            flame,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            (self.depth_tex, self.depth_view) =
                helpers::create_depth_texture(&self.device, width, height);
        }
    }

    pub fn render(&mut self, frame: &SceneFrame) -> Result<(), wgpu::SurfaceError> {
        let out = &frame.flame;
        let scene = SceneUniforms {
            view_proj: frame.view_proj.to_cols_array_2d(),
            eye: frame.eye.extend(1.0).to_array(),
            light_pos: [
                LIGHT_POSITION[0],
                LIGHT_POSITION[1],
                LIGHT_POSITION[2],
                out.light_intensity,
            ],
            light_color: [
                LIGHT_COLOR[0],
                LIGHT_COLOR[1],
                LIGHT_COLOR[2],
                out.light_distance,
            ],
        };
        self.queue
            .write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene));
        let flame = ModelUniforms {
            model: flame_model_matrix(out.scale).to_cols_array_2d(),
            color: [1.0; 4],
            flame: [
                out.bend.elapsed_time,
                out.bend.blow_strength,
                out.bend.flame_size,
                0.0,
            ],
            gravity: out.bend.gravity.extend(0.0).to_array(),
        };
        self.queue
            .write_buffer(&self.flame.uniform_buffer, 0, bytemuck::bytes_of(&flame));

        let surface_tex = self.surface.get_current_texture()?;
        let view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_pipeline(&self.lit_pipeline);
            self.floor.draw(&mut rpass);
            self.body.draw(&mut rpass);
            self.wick.draw(&mut rpass);
            if out.visible && out.scale > 0.0 {
                rpass.set_pipeline(&self.flame_pipeline);
                self.flame.draw(&mut rpass);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        Ok(())
    }
}
