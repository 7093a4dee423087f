use std::time::Instant;
use wgpu::util::DeviceExt;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use glam::Vec2;
use museum_core::constants::{BACKGROUND_RGB, DRAG_CLICK_THRESHOLD_PX, WHEEL_LINE_PX};
use museum_core::{
    aspect_ratio, pixel_to_ndc, DetectionSource, FrameView, Gallery, QuadInstance, SceneUniforms,
    TrackingError, Viewer, ViewerSettings, QUAD_CORNERS,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The desktop build has no camera backend; tracking always falls back to the mouse.
struct NoCamera;

impl DetectionSource for NoCamera {
    fn start(&mut self) -> Result<(), TrackingError> {
        Err(TrackingError::Unavailable(
            "no camera backend in the desktop build".into(),
        ))
    }

    fn stop(&mut self) {}
}

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_capacity: usize,
    bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(museum_core::SCENE_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_capacity = 32;
        let instance_vb = create_instance_buffer(&device, instance_capacity);
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let vertex_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &[wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 0,
                    shader_location: 0,
                }],
            },
            // slot 1: model matrix columns + color
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<QuadInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 0,
                        shader_location: 1,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 16,
                        shader_location: 2,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 32,
                        shader_location: 3,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 48,
                        shader_location: 4,
                    },
                    wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x4,
                        offset: 64,
                        shader_location: 5,
                    },
                ],
            },
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            quad_vb,
            instance_vb,
            instance_capacity,
            bind_group,
            depth_view,
            width,
            height,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.width = new_size.width;
        self.height = new_size.height;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.width, self.height);
    }

    fn render(
        &mut self,
        frame_view: &FrameView,
        instances: &[QuadInstance],
    ) -> Result<(), wgpu::SurfaceError> {
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_vb = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&frame_view.uniforms()),
        );
        self.queue
            .write_buffer(&self.instance_vb, 0, bytemuck::cast_slice(instances));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = BACKGROUND_RGB;

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..instances.len() as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_vb"),
        size: (std::mem::size_of::<QuadInstance>() * capacity) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

// ---------------- Input ----------------

/// Mouse state between winit events.
#[derive(Default)]
struct MouseInput {
    cursor: Option<Vec2>,
    press_origin: Option<Vec2>,
    travelled: bool,
    ctrl: bool,
}

impl MouseInput {
    fn ndc(&self, size: PhysicalSize<u32>) -> Option<Vec2> {
        let c = self.cursor?;
        (size.width > 0 && size.height > 0)
            .then(|| pixel_to_ndc(c, size.width as f32, size.height as f32))
    }
}

fn on_cursor_moved(
    viewer: &mut Viewer,
    mouse: &mut MouseInput,
    pos: PhysicalPosition<f64>,
    size: PhysicalSize<u32>,
    scale_factor: f64,
) {
    let p = Vec2::new(pos.x as f32, pos.y as f32);
    let prev = mouse.cursor.replace(p);
    if size.width > 0 && size.height > 0 {
        viewer.pointer_moved(p.x / size.width as f32, p.y / size.height as f32);
    }
    match (mouse.press_origin, prev) {
        (Some(origin), Some(prev)) => {
            if p.distance(origin) > DRAG_CLICK_THRESHOLD_PX * scale_factor as f32 {
                mouse.travelled = true;
            }
            let d = p - prev;
            viewer.drag(d.x, d.y, size.height as f32);
        }
        _ => viewer.hover(mouse.ndc(size)),
    }
}

fn on_mouse_button(
    viewer: &mut Viewer,
    mouse: &mut MouseInput,
    state: ElementState,
    size: PhysicalSize<u32>,
) {
    match state {
        ElementState::Pressed => {
            mouse.press_origin = mouse.cursor;
            mouse.travelled = false;
            viewer.begin_drag();
        }
        ElementState::Released => {
            viewer.end_drag();
            if mouse.press_origin.take().is_some() && !mouse.travelled {
                if let Some(hit) = mouse.ndc(size).and_then(|p| viewer.pick(p)) {
                    viewer.select(Some(hit));
                }
            }
        }
    }
}

fn on_wheel(viewer: &mut Viewer, mouse: &MouseInput, delta: MouseScrollDelta) {
    // winit reports scroll-up as positive; the viewer expects DOM deltaY
    let delta_y = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
        MouseScrollDelta::PixelDelta(p) => -p.y as f32,
    };
    if mouse.ctrl {
        viewer.dolly_wheel(delta_y);
    } else {
        viewer.focus_wheel(delta_y);
    }
}

fn on_key(viewer: &mut Viewer, key: &Key) {
    match key {
        Key::Named(NamedKey::ArrowLeft) => {
            viewer.focus_prev();
        }
        Key::Named(NamedKey::ArrowRight) => {
            viewer.focus_next();
        }
        Key::Named(NamedKey::Escape) => viewer.close_exhibit(),
        Key::Character(c) => match c.as_str() {
            "c" | "C" => {
                viewer.calibrate();
                log::info!("[keys] calibrated");
            }
            "t" | "T" => viewer.toggle_tracking(),
            _ => {}
        },
        _ => {}
    }
}

fn window_title(viewer: &Viewer) -> String {
    let hud = viewer.hud();
    let mut title = format!(
        "Museum Window · {}/{} · {} · {}",
        hud.focus_index + 1,
        hud.focus_total,
        hud.tracking_label,
        hud.head.message
    );
    if let Some(e) = hud.selected {
        title.push_str(&format!(" · {} ({})", e.title, e.artist));
    }
    title
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Museum Window (native)")
        .with_inner_size(PhysicalSize::new(1280u32, 800u32))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut viewer = Viewer::new(
        Gallery::default(),
        Box::new(NoCamera),
        ViewerSettings::default(),
    );
    let mut mouse = MouseInput::default();
    let mut last_frame = Instant::now();
    let mut title = String::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::ModifiersChanged(m) => mouse.ctrl = m.state().control_key(),
            WindowEvent::CursorMoved { position, .. } => on_cursor_moved(
                &mut viewer,
                &mut mouse,
                position,
                state.window.inner_size(),
                state.window.scale_factor(),
            ),
            WindowEvent::CursorLeft { .. } => {
                mouse.cursor = None;
                viewer.hover(None);
            }
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => on_mouse_button(
                &mut viewer,
                &mut mouse,
                button_state,
                state.window.inner_size(),
            ),
            WindowEvent::MouseWheel { delta, .. } => on_wheel(&mut viewer, &mouse, delta),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => on_key(&mut viewer, &logical_key),
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = now - last_frame;
            last_frame = now;

            let frame_view = viewer.frame(dt, aspect_ratio(state.width, state.height));
            let next_title = window_title(&viewer);
            if next_title != title {
                state.window.set_title(&next_title);
                title = next_title;
            }
            match state.render(&frame_view, &viewer.instances()) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    elwt.exit()
                }
                Err(e) => log::warn!("render error: {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
