use std::mem;

use glam::{vec2, Vec2};
use wgpu::util::DeviceExt;

use crate::{
    input::{JoystickZone, JOYSTICK_BASE_RADIUS},
    texture,
};

const KNOB_RADIUS: f32 = 24.0;
const BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
const KNOB_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.6];

#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Vertex {
    corner: Vec2,
}

const QUAD_VERTICES: [Vertex; 6] = [
    Vertex {
        corner: vec2(-1.0, -1.0),
    },
    Vertex {
        corner: vec2(1.0, -1.0),
    },
    Vertex {
        corner: vec2(1.0, 1.0),
    },
    Vertex {
        corner: vec2(-1.0, -1.0),
    },
    Vertex {
        corner: vec2(1.0, 1.0),
    },
    Vertex {
        corner: vec2(-1.0, 1.0),
    },
];

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// A filled circle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct Disc {
    center: Vec2,
    radius: f32,
    color: [f32; 4],
}

impl Disc {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32, 3 => Float32x4];

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
struct ScreenUniform {
    size: Vec2,
    _padding: Vec2,
}

/// Draws the on-screen stick over the scene: the base at the zone centre and the knob following
/// the drag.
pub struct JoystickRenderer {
    render_pipeline: wgpu::RenderPipeline,
    screen_buffer: wgpu::Buffer,
    screen_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    disc_buffer: wgpu::Buffer,
}

impl JoystickRenderer {
    pub fn new(device: &wgpu::Device, color_target_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::include_wgsl!("joystick_shader.wgsl"));

        let screen_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Joystick Screen Buffer"),
            contents: bytemuck::cast_slice(&[ScreenUniform {
                size: Vec2::ONE,
                _padding: Vec2::ZERO,
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let screen_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("screen_bind_group_layout"),
            });

        let screen_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &screen_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: screen_buffer.as_entire_binding(),
            }],
            label: Some("screen_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Joystick Render Pipeline Layout"),
                bind_group_layouts: &[&screen_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Joystick Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), Disc::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            // Shares the scene pass, so it needs a matching depth state but ignores depth.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: texture::Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
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
            label: Some("Joystick Vertex Buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let disc_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Joystick Disc Buffer"),
            contents: bytemuck::cast_slice(&discs(JoystickZone { center: Vec2::ZERO }, Vec2::ZERO)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            render_pipeline,
            screen_buffer,
            screen_bind_group,
            vertex_buffer,
            disc_buffer,
        }
    }

    pub fn resize(&self, queue: &wgpu::Queue, size: winit::dpi::PhysicalSize<u32>) {
        let uniform = ScreenUniform {
            size: vec2(size.width.max(1) as f32, size.height.max(1) as f32),
            _padding: Vec2::ZERO,
        };
        queue.write_buffer(&self.screen_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub fn update(&self, queue: &wgpu::Queue, zone: JoystickZone, knob_offset: Vec2) {
        queue.write_buffer(
            &self.disc_buffer,
            0,
            bytemuck::cast_slice(&discs(zone, knob_offset)),
        );
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.screen_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.disc_buffer.slice(..));
        render_pass.draw(0..QUAD_VERTICES.len() as u32, 0..2);
    }
}

/// Base first so the knob is drawn on top.
fn discs(zone: JoystickZone, knob_offset: Vec2) -> [Disc; 2] {
    [
        Disc {
            center: zone.center,
            radius: JOYSTICK_BASE_RADIUS,
            color: BASE_COLOR,
        },
        Disc {
            center: zone.center + knob_offset,
            radius: KNOB_RADIUS,
            color: KNOB_COLOR,
        },
    ]
}
