use std::mem;

use glam::{vec3, IVec3, Vec3};
use wgpu::util::DeviceExt;

use cheeseworld_game::world::{block::Color, Grid};

use crate::{ray_casting::GROUND_HEIGHT, texture};

const GROUND_COLOR: Color = Color::from_hex(0xFDE047);
const GROUND_SIZE: f32 = 100.0;
const GROUND_THICKNESS: f32 = 0.1;
const HOVER_SCALE: f32 = 1.05;

#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Vertex {
    position: Vec3,
    normal: Vec3,
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

const fn vertex(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex {
        position: Vec3::from_array(position),
        normal: Vec3::from_array(normal),
    }
}

/// A unit cube centred on the origin, four vertices per face, wound counter-clockwise as seen
/// from outside.
const CUBE_VERTICES: [Vertex; 24] = [
    // +x
    vertex([0.5, -0.5, 0.5], [1.0, 0.0, 0.0]),
    vertex([0.5, -0.5, -0.5], [1.0, 0.0, 0.0]),
    vertex([0.5, 0.5, -0.5], [1.0, 0.0, 0.0]),
    vertex([0.5, 0.5, 0.5], [1.0, 0.0, 0.0]),
    // -x
    vertex([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0]),
    vertex([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0]),
    vertex([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0]),
    // +y
    vertex([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0]),
    vertex([0.5, 0.5, 0.5], [0.0, 1.0, 0.0]),
    vertex([0.5, 0.5, -0.5], [0.0, 1.0, 0.0]),
    vertex([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0]),
    // -y
    vertex([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    vertex([0.5, -0.5, -0.5], [0.0, -1.0, 0.0]),
    vertex([0.5, -0.5, 0.5], [0.0, -1.0, 0.0]),
    vertex([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0]),
    // +z
    vertex([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0]),
    vertex([0.5, -0.5, 0.5], [0.0, 0.0, 1.0]),
    vertex([0.5, 0.5, 0.5], [0.0, 0.0, 1.0]),
    vertex([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0]),
    // -z
    vertex([0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    vertex([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0]),
    vertex([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0]),
    vertex([0.5, 0.5, -0.5], [0.0, 0.0, -1.0]),
];

const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7, 8, 9, 10, 8, 10, 11, 12, 13, 14, 12, 14, 15, 16, 17, 18,
    16, 18, 19, 20, 21, 22, 20, 22, 23,
];

#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Instance {
    offset: Vec3,
    scale: Vec3,
    color: Vec3,
}

impl Instance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32x3, 4 => Float32x3];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }

    fn ground() -> Self {
        Self {
            offset: vec3(0.0, GROUND_HEIGHT - GROUND_THICKNESS / 2.0, 0.0),
            scale: vec3(GROUND_SIZE, GROUND_THICKNESS, GROUND_SIZE),
            color: GROUND_COLOR.to_linear(),
        }
    }
}

pub struct VoxelRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: Option<wgpu::Buffer>,
    num_instances: u32,
    hovered: Option<IVec3>,
}

impl VoxelRenderer {
    pub fn new(
        device: &wgpu::Device,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        color_target_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("voxel_shader.wgsl"));

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Voxel Render Pipeline Layout"),
                bind_group_layouts: &[camera_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Voxel Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), Instance::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: texture::Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Index Buffer"),
            contents: bytemuck::cast_slice(&CUBE_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer: None,
            num_instances: 0,
            hovered: None,
        }
    }

    /// Re-uploads the block instances when the grid or the hovered block changed.
    pub fn update(&mut self, device: &wgpu::Device, grid: &mut Grid, hovered: Option<IVec3>) {
        if self.instance_buffer.is_some() && !grid.is_dirty() && hovered == self.hovered {
            return;
        }

        let instances = instances(grid, hovered);
        log::trace!("Uploading {} voxel instances", instances.len());

        self.instance_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Voxel Instance Buffer"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.num_instances = instances.len() as u32;
        self.hovered = hovered;
        grid.mark_clean();
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass, camera_bind_group: &wgpu::BindGroup) {
        let Some(instance_buffer) = &self.instance_buffer else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..CUBE_INDICES.len() as u32, 0, 0..self.num_instances);
    }
}

/// The ground slab first, then one cube per block.
fn instances(grid: &Grid, hovered: Option<IVec3>) -> Vec<Instance> {
    let mut instances = Vec::with_capacity(grid.len() + 1);
    instances.push(Instance::ground());
    instances.extend(grid.iter().map(|block| {
        let scale = if Some(block.position) == hovered {
            HOVER_SCALE
        } else {
            1.0
        };
        Instance {
            offset: block.position.as_vec3(),
            scale: Vec3::splat(scale),
            color: block.color.to_linear(),
        }
    }));
    instances
}
