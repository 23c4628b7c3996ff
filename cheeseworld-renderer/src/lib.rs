use anyhow::Context;
use glam::{vec2, IVec3, Vec3};
use wgpu::util::DeviceExt;
use winit::{
    error::EventLoopError,
    event::{DeviceEvent, ElementState, Event, KeyEvent, MouseButton, TouchPhase, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window},
};

use cheeseworld_game::{
    clock::{Clock, FrameTicker},
    control_scheme::ControlScheme,
    interaction::PickTarget,
    settings::Settings,
    Game,
};

use crate::input::{
    key_action, Click, JoystickZone, KeyAction, PointerLock, TouchAction, TouchRouter,
};

pub mod camera;
pub mod input;
pub mod ray_casting;

mod joystick_renderer;
mod texture;
mod voxel_renderer;

const SKY_BLUE: wgpu::Color = wgpu::Color {
    r: 0.24,
    g: 0.62,
    b: 0.83,
    a: 1.0,
};

pub struct State<'a, C: Clock> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    pub manual_size: bool,
    window: &'a Window,
    camera: camera::Camera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    depth_texture: texture::Texture,
    voxel_renderer: voxel_renderer::VoxelRenderer,
    joystick_renderer: Option<joystick_renderer::JoystickRenderer>,
    game: Game,
    ticker: FrameTicker<C>,
    pointer: PointerLock,
    touches: TouchRouter,
}

impl<'a, C: Clock> State<'a, C> {
    pub async fn new(
        window: &'a Window,
        backends: wgpu::Backends,
        clock: C,
        settings: Settings,
        control_scheme: ControlScheme,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("Couldn't create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No graphics adapter can present to the window")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: adapter.limits(),
                    label: None,
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("Couldn't open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = camera::Camera::new(config.width as f32 / config.height.max(1) as f32);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.build_view_projection_matrix()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
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
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let depth_texture =
            texture::Texture::create_depth_texture(&device, &config, "depth_texture");

        let voxel_renderer =
            voxel_renderer::VoxelRenderer::new(&device, &camera_bind_group_layout, config.format);

        let joystick_renderer = control_scheme
            .uses_joystick()
            .then(|| joystick_renderer::JoystickRenderer::new(&device, config.format));

        let game = Game::new(settings);

        log::info!("Using {control_scheme:?} controls");
        for hint in control_scheme.hints() {
            log::info!("  {hint}");
        }
        for (index, block_type) in game.palette.types().iter().enumerate() {
            log::info!("  {}: {}", index + 1, block_type.name);
        }

        let mut state = Self {
            surface,
            device,
            queue,
            config,
            size,
            manual_size: false,
            window,
            camera,
            camera_buffer,
            camera_bind_group,
            depth_texture,
            voxel_renderer,
            joystick_renderer,
            game,
            ticker: FrameTicker::new(clock),
            pointer: PointerLock::default(),
            touches: TouchRouter::new(control_scheme.uses_joystick()),
        };
        state.resize(size);

        Ok(state)
    }

    pub fn run(&mut self, event_loop: EventLoop<()>) -> Result<(), EventLoopError> {
        event_loop.run(move |event, control_flow| match event {
            Event::DeviceEvent { ref event, .. } => {
                self.device_input(event);
            }
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == self.window.id() => {
                if !self.input(event) {
                    match event {
                        WindowEvent::CloseRequested => control_flow.exit(),
                        WindowEvent::Resized(physical_size) => {
                            if !self.manual_size {
                                self.resize(*physical_size);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            self.window.request_redraw();

                            self.update();
                            match self.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    self.resize(self.size);
                                }
                                Err(
                                    wgpu::SurfaceError::OutOfMemory | wgpu::SurfaceError::Other,
                                ) => {
                                    log::error!("OutOfMemory");
                                    control_flow.exit();
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    log::warn!("Surface timeout")
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
            _ => {}
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, &self.config, "depth_texture");

        self.camera.aspect = new_size.width as f32 / new_size.height as f32;
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_view_projection_matrix()]),
        );

        if let Some(joystick_renderer) = &self.joystick_renderer {
            joystick_renderer.resize(&self.queue, new_size);
        }
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                match self.pointer.click() {
                    Click::Grab => self.grab_cursor(),
                    Click::Pick => self.pick(self.camera.direction()),
                }
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                self.release_cursor();
                true
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        ..
                    },
                ..
            } => match key_action(*key) {
                Some(action) => {
                    self.key_action(action, *state == ElementState::Pressed);
                    true
                }
                None => false,
            },
            WindowEvent::Focused(false) => {
                self.release_cursor();
                self.touches.reset();
                false
            }
            WindowEvent::Touch(touch) => {
                let point = vec2(touch.location.x as f32, touch.location.y as f32);
                let zone = JoystickZone::for_window(self.size);
                let action = match touch.phase {
                    TouchPhase::Started => self.touches.started(touch.id, point, zone),
                    TouchPhase::Moved => self.touches.moved(touch.id, point, zone),
                    TouchPhase::Ended => self.touches.ended(touch.id, point, true),
                    TouchPhase::Cancelled => self.touches.ended(touch.id, point, false),
                };
                if let Some(action) = action {
                    self.touch_action(action);
                }
                true
            }
            _ => false,
        }
    }

    pub fn device_input(&mut self, event: &DeviceEvent) -> bool {
        match event {
            DeviceEvent::MouseMotion { delta } => match self.pointer.look_delta(*delta) {
                Some(delta) => {
                    self.game.look(delta);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn key_action(&mut self, action: KeyAction, pressed: bool) {
        match action {
            KeyAction::Move(direction) if pressed => self.game.input.press(direction),
            KeyAction::Move(direction) => self.game.input.release(direction),
            KeyAction::Jump => self.game.input.set_jump(pressed),
            KeyAction::SelectBlock(index) if pressed => {
                self.game.palette.select(index);
            }
            KeyAction::SelectBlock(_) => {}
        }
    }

    fn touch_action(&mut self, action: TouchAction) {
        match action {
            TouchAction::Joystick(delta) => {
                let joystick = self.game.input.joystick_mut();
                joystick.engage();
                joystick.drag(delta);
            }
            TouchAction::JoystickReleased => self.game.input.joystick_mut().release(),
            TouchAction::Look(delta) => self.game.look(delta),
            TouchAction::Pick(point) => {
                let direction = self.camera.ray_through(point, self.size);
                self.pick(direction);
            }
        }
    }

    fn grab_cursor(&mut self) {
        let grabbed = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
        match grabbed {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.pointer.grab();
            }
            Err(err) => log::warn!("Couldn't grab the cursor: {err}"),
        }
    }

    fn release_cursor(&mut self) {
        if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::warn!("Couldn't release the cursor: {err}");
        }
        self.window.set_cursor_visible(true);
        self.pointer.release();
        self.game.release_input();
    }

    fn pick(&mut self, direction: Vec3) {
        let Some(target) = self.target(direction) else {
            return;
        };
        if let Some(intent) = self.game.pick(target) {
            log::info!("{intent:?}, {} blocks in the world", self.game.grid.len());
        }
    }

    fn target(&self, direction: Vec3) -> Option<PickTarget> {
        ray_casting::ray_cast(
            self.camera.eye(),
            direction,
            &self.game.grid,
            self.game.settings().reach,
        )
    }

    fn hovered_block(&self) -> Option<IVec3> {
        if !self.pointer.is_grabbed() {
            return None;
        }
        match self.target(self.camera.direction()) {
            Some(PickTarget::Block(position)) => Some(position),
            _ => None,
        }
    }

    fn update(&mut self) {
        let delta_time = self.ticker.tick();

        self.game.update(delta_time);

        self.camera.update(&self.game.player);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_view_projection_matrix()]),
        );

        let hovered = self.hovered_block();
        self.voxel_renderer
            .update(&self.device, &mut self.game.grid, hovered);

        if let Some(joystick_renderer) = &self.joystick_renderer {
            joystick_renderer.update(
                &self.queue,
                JoystickZone::for_window(self.size),
                self.game.input.joystick().knob_offset(),
            );
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.size.width == 0 || self.size.height == 0 {
            return Ok(());
        }

        let output = self.surface.get_current_texture()?;

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY_BLUE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.voxel_renderer
                .render(&mut render_pass, &self.camera_bind_group);
            if let Some(joystick_renderer) = &self.joystick_renderer {
                joystick_renderer.render(&mut render_pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
