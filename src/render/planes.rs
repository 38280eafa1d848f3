use super::helpers;
use scrollgl_core::{PlaneGeometry, PlaneUniforms};
use wgpu;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
}

/// Shared pipeline state for every media plane.
pub(crate) struct PlaneResources {
    pub(crate) pipeline: wgpu::RenderPipeline,
    pub(crate) plane_bgl: wgpu::BindGroupLayout,
    pub(crate) camera_buffer: wgpu::Buffer,
    pub(crate) camera_bind_group: wgpu::BindGroup,
    pub(crate) sampler: wgpu::Sampler,
}

/// GPU side of one media plane. `positions` is rewritten on every layout
/// change; uvs and indices come from the template and never change.
pub(crate) struct PlaneMesh {
    pub(crate) positions: wgpu::Buffer,
    pub(crate) uvs: wgpu::Buffer,
    pub(crate) indices: wgpu::Buffer,
    pub(crate) index_count: u32,
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl PlaneMesh {
    pub(crate) fn destroy(&self) {
        self.positions.destroy();
        self.uvs.destroy();
        self.indices.destroy();
        self.uniform_buffer.destroy();
        self.texture.destroy();
    }
}

pub(crate) fn create_plane_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> PlaneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("media_shader"),
        source: wgpu::ShaderSource::Wgsl(super::MEDIA_WGSL.into()),
    });
    let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("media_camera_bgl"),
        entries: &[helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX)],
    });
    let plane_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("media_plane_bgl"),
        entries: &[
            helpers::uniform_entry(0, wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT),
            helpers::texture_entry(1),
            helpers::sampler_entry(2),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("media_pl"),
        bind_group_layouts: &[&camera_bgl, &plane_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("media_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_media"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 1,
                    }],
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_media"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let camera_buffer = helpers::uniform_buffer(
        device,
        "media_camera",
        std::mem::size_of::<CameraUniforms>(),
    );
    let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("media_camera_bg"),
        layout: &camera_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: camera_buffer.as_entire_binding(),
        }],
    });
    let sampler = helpers::create_linear_sampler(device, "media_sampler");

    PlaneResources {
        pipeline,
        plane_bgl,
        camera_buffer,
        camera_bind_group,
        sampler,
    }
}

pub(crate) fn create_plane_mesh(
    device: &wgpu::Device,
    res: &PlaneResources,
    geometry: &PlaneGeometry,
    texture: wgpu::Texture,
) -> PlaneMesh {
    let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("media_positions"),
        contents: bytemuck::cast_slice(geometry.template()),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let uvs = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("media_uvs"),
        contents: bytemuck::cast_slice(geometry.uvs()),
        usage: wgpu::BufferUsages::VERTEX,
    });
    // Six u16 indices per quad keep the buffer 4-byte aligned.
    let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("media_indices"),
        contents: bytemuck::cast_slice(geometry.indices()),
        usage: wgpu::BufferUsages::INDEX,
    });
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "media_plane_uniforms",
        std::mem::size_of::<PlaneUniforms>(),
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("media_plane_bg"),
        layout: &res.plane_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&res.sampler),
            },
        ],
    });
    PlaneMesh {
        positions,
        uvs,
        indices,
        index_count: geometry.indices().len() as u32,
        uniform_buffer,
        texture,
        bind_group,
    }
}
