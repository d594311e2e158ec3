use std::collections::HashMap;
use std::ops::Range;

use bytemuck::Pod;
use crate::backend::{
    BufferHandle, BufferKind, BufferUsage, ColorStep, DrawCall, GpuBackend, ShaderProgram, TextureHandle,
    TextureUnit, Topology, UniformValue,
};
use crate::render::{RenderCtx, RenderTarget};
use crate::sprite::SpriteVertex;

use super::common::{
    sprite_vertex_layout, straight_alpha_blend, ShapeVertex, ViewportUniform, FIRST_TEXTURE_BINDING,
    INVALID_TEXTURE_RGBA,
};

const UNIT_SLOTS: usize = TextureUnit::COUNT as usize;

/// Texture bound to each sampler slot at the time of a sprite draw.
type UnitBindings = [Option<TextureHandle>; UNIT_SLOTS];

/// [`GpuBackend`] on top of wgpu.
///
/// Buffers live CPU-side. Every `draw` snapshots the data it reads into this
/// frame's vertex arenas, so later uploads to the same buffer do not affect
/// earlier draws. [`encode`](Self::encode) uploads the arenas and replays all
/// draws, in submission order, into one render pass that loads the existing
/// target contents.
///
/// Limitations:
/// - points are always 1px; other sizes are logged once and ignored
/// - per-instance colours are expanded to every vertex
#[derive(Default)]
pub struct WgpuBackend {
    buffers: HashMap<BufferHandle, ShadowBuffer>,
    textures: HashMap<TextureHandle, TextureSlot>,
    units: UnitBindings,
    program: Option<ShaderProgram>,
    shape_viewport: Option<[f32; 2]>,
    sprite_viewport: Option<[f32; 2]>,
    next_buffer: u32,
    next_texture: u32,

    // frame arenas
    shape_vertices: Vec<ShapeVertex>,
    sprite_vertices: Vec<SpriteVertex>,
    sprite_indices: Vec<u32>,
    replays: Vec<Replay>,

    gpu: Option<GpuState>,

    warned_point_size: bool,
}

struct ShadowBuffer {
    kind: BufferKind,
    bytes: Vec<u8>,
}

struct TextureSlot {
    width: u32,
    height: u32,
    /// Pixels not yet uploaded; taken on the next `encode`.
    pending: Option<Vec<u8>>,
    view: Option<wgpu::TextureView>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum ShapeTopology {
    Triangles,
    Lines,
    LineStrip,
    Points,
}

impl ShapeTopology {
    const ALL: [ShapeTopology; 4] = [Self::Triangles, Self::Lines, Self::LineStrip, Self::Points];

    fn primitive(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Self::Lines => wgpu::PrimitiveTopology::LineList,
            Self::LineStrip => wgpu::PrimitiveTopology::LineStrip,
            Self::Points => wgpu::PrimitiveTopology::PointList,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Replay {
    Shape { topology: ShapeTopology, vertices: Range<u32> },
    Sprite { units: UnitBindings, indices: Range<u32>, base_vertex: i32 },
}

/// Device objects, built on the first `encode` and rebuilt when the target
/// format changes.
struct GpuState {
    format: wgpu::TextureFormat,
    shape_pipelines: HashMap<ShapeTopology, wgpu::RenderPipeline>,
    sprite_pipeline: wgpu::RenderPipeline,
    sprite_bgl: wgpu::BindGroupLayout,
    shape_bind_group: wgpu::BindGroup,
    shape_ubo: wgpu::Buffer,
    sprite_ubo: wgpu::Buffer,
    sampler: wgpu::Sampler,
    fallback_view: wgpu::TextureView,

    shape_vbo: Option<wgpu::Buffer>,
    shape_vbo_capacity: usize,
    sprite_vbo: Option<wgpu::Buffer>,
    sprite_vbo_capacity: usize,
    sprite_ibo: Option<wgpu::Buffer>,
    sprite_ibo_capacity: usize,
}

impl WgpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws recorded since the last [`encode`](Self::encode).
    pub fn pending_draws(&self) -> usize {
        self.replays.len()
    }

    /// Replays this frame's draws into `target` and starts a new frame.
    pub fn encode(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_gpu(ctx);
        self.upload_pending_textures(ctx);

        if !self.replays.is_empty() {
            self.write_uniforms(ctx);
            self.write_arenas(ctx);
            self.replay(ctx, target);
        }

        self.shape_vertices.clear();
        self.sprite_vertices.clear();
        self.sprite_indices.clear();
        self.replays.clear();
    }

    // ── draw snapshots ────────────────────────────────────────────────────

    fn read<T: Pod>(&self, handle: BufferHandle) -> Option<Vec<T>> {
        let buf = self.buffers.get(&handle)?;
        let whole = buf.bytes.len() / size_of::<T>() * size_of::<T>();
        Some(bytemuck::pod_collect_to_vec(&buf.bytes[..whole]))
    }

    fn record_shape(&mut self, call: &DrawCall) {
        let count = call.count as usize;
        let Some(positions) = self.read::<[f32; 2]>(call.vertices) else {
            log::error!("shape draw from unknown buffer {:?}", call.vertices);
            return;
        };
        if positions.len() < count {
            log::error!("shape draw of {count} vertices, buffer holds {}", positions.len());
            return;
        }

        let (colors, step) = match call.colors {
            Some(src) => (self.read::<[f32; 3]>(src.buffer).unwrap_or_default(), src.step),
            None => (Vec::new(), ColorStep::PerInstance),
        };
        let color_at = |i: usize| {
            let c = match step {
                ColorStep::PerInstance => colors.first(),
                ColorStep::PerVertex => colors.get(i),
            };
            c.copied().unwrap_or([1.0; 3])
        };

        let topology = match call.topology {
            Topology::Triangles => ShapeTopology::Triangles,
            Topology::Lines => ShapeTopology::Lines,
            Topology::LineLoop => ShapeTopology::LineStrip,
            Topology::Points => {
                if call.point_size.is_some_and(|s| s != 1.0) && !self.warned_point_size {
                    log::warn!("point sizes other than 1px are not supported; drawing 1px points");
                    self.warned_point_size = true;
                }
                ShapeTopology::Points
            }
        };

        let first = self.shape_vertices.len() as u32;
        self.shape_vertices.extend(
            positions[..count]
                .iter()
                .enumerate()
                .map(|(i, &position)| ShapeVertex { position, color: color_at(i) }),
        );
        if call.topology == Topology::LineLoop && count > 1 {
            self.shape_vertices.push(ShapeVertex { position: positions[0], color: color_at(0) });
        }
        let last = self.shape_vertices.len() as u32;

        self.replays.push(Replay::Shape { topology, vertices: first..last });
    }

    fn record_sprites(&mut self, call: &DrawCall) {
        let Some(index_buffer) = call.indices else {
            log::error!("sprite draws must be indexed");
            return;
        };
        let count = call.count as usize;
        let (Some(indices), Some(vertices)) =
            (self.read::<u32>(index_buffer), self.read::<SpriteVertex>(call.vertices))
        else {
            log::error!("sprite draw from unknown buffers");
            return;
        };
        if indices.len() < count {
            log::error!("sprite draw of {count} indices, buffer holds {}", indices.len());
            return;
        }
        let indices = &indices[..count];
        let (Some(&lo), Some(&hi)) = (indices.iter().min(), indices.iter().max()) else {
            return;
        };
        if hi as usize >= vertices.len() {
            log::error!("sprite index {hi} past {} vertices", vertices.len());
            return;
        }

        // Only the referenced vertex range is copied; base_vertex re-aims the
        // indices at it.
        let base_vertex = self.sprite_vertices.len() as i32 - lo as i32;
        self.sprite_vertices.extend_from_slice(&vertices[lo as usize..=hi as usize]);

        let first = self.sprite_indices.len() as u32;
        self.sprite_indices.extend_from_slice(indices);

        self.replays.push(Replay::Sprite {
            units: self.units,
            indices: first..first + count as u32,
            base_vertex,
        });
    }

    // ── gpu state ─────────────────────────────────────────────────────────

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) {
        if self.gpu.as_ref().is_some_and(|g| g.format == ctx.target_format) {
            return;
        }
        self.gpu = Some(GpuState::new(ctx));
    }

    fn upload_pending_textures(&mut self, ctx: &RenderCtx<'_>) {
        for slot in self.textures.values_mut() {
            let Some(rgba) = slot.pending.take() else { continue };
            slot.view = Some(create_rgba_view(ctx, slot.width, slot.height, &rgba, "tessera atlas texture"));
        }
    }

    fn write_uniforms(&self, ctx: &RenderCtx<'_>) {
        let Some(gpu) = self.gpu.as_ref() else { return };
        let fallback = ctx.viewport.to_array();
        for (ubo, value) in [(&gpu.shape_ubo, self.shape_viewport), (&gpu.sprite_ubo, self.sprite_viewport)] {
            let viewport = value.unwrap_or(fallback);
            ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform { viewport, _pad: [0.0; 2] }));
        }
    }

    fn write_arenas(&mut self, ctx: &RenderCtx<'_>) {
        let Some(gpu) = self.gpu.as_mut() else { return };

        let arenas: [(&[u8], &mut Option<wgpu::Buffer>, &mut usize, wgpu::BufferUsages, &str); 3] = [
            (
                bytemuck::cast_slice(&self.shape_vertices),
                &mut gpu.shape_vbo,
                &mut gpu.shape_vbo_capacity,
                wgpu::BufferUsages::VERTEX,
                "tessera shape vbo",
            ),
            (
                bytemuck::cast_slice(&self.sprite_vertices),
                &mut gpu.sprite_vbo,
                &mut gpu.sprite_vbo_capacity,
                wgpu::BufferUsages::VERTEX,
                "tessera sprite vbo",
            ),
            (
                bytemuck::cast_slice(&self.sprite_indices),
                &mut gpu.sprite_ibo,
                &mut gpu.sprite_ibo_capacity,
                wgpu::BufferUsages::INDEX,
                "tessera sprite ibo",
            ),
        ];

        for (bytes, buffer, capacity, usage, label) in arenas {
            if bytes.is_empty() {
                continue;
            }
            ensure_buffer_capacity(ctx, buffer, capacity, bytes.len(), usage, label);
            if let Some(buffer) = buffer.as_ref() {
                ctx.queue.write_buffer(buffer, 0, bytes);
            }
        }
    }

    fn replay(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        let Some(gpu) = self.gpu.as_ref() else { return };

        let mut bind_groups: HashMap<UnitBindings, wgpu::BindGroup> = HashMap::new();
        for replay in &self.replays {
            if let Replay::Sprite { units, .. } = replay {
                bind_groups
                    .entry(*units)
                    .or_insert_with(|| gpu.sprite_bind_group(ctx, &self.textures, units));
            }
        }

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessera pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for replay in &self.replays {
            match replay {
                Replay::Shape { topology, vertices } => {
                    if vertices.is_empty() {
                        continue;
                    }
                    let Some(pipeline) = gpu.shape_pipelines.get(topology) else { continue };
                    let Some(vbo) = gpu.shape_vbo.as_ref() else { continue };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, &gpu.shape_bind_group, &[]);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.draw(vertices.clone(), 0..1);
                }
                Replay::Sprite { units, indices, base_vertex } => {
                    if indices.is_empty() {
                        continue;
                    }
                    let Some(bind_group) = bind_groups.get(units) else { continue };
                    let Some(vbo) = gpu.sprite_vbo.as_ref() else { continue };
                    let Some(ibo) = gpu.sprite_ibo.as_ref() else { continue };
                    rpass.set_pipeline(&gpu.sprite_pipeline);
                    rpass.set_bind_group(0, bind_group, &[]);
                    rpass.set_vertex_buffer(0, vbo.slice(..));
                    rpass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(indices.clone(), *base_vertex, 0..1);
                }
            }
        }
    }
}

impl GpuBackend for WgpuBackend {
    fn create_buffer(&mut self, kind: BufferKind, _usage: BufferUsage) -> BufferHandle {
        self.next_buffer += 1;
        let handle = BufferHandle(self.next_buffer);
        self.buffers.insert(handle, ShadowBuffer { kind, bytes: Vec::new() });
        handle
    }

    fn allocate(&mut self, handle: BufferHandle, byte_len: usize) {
        if let Some(buf) = self.buffers.get_mut(&handle) {
            buf.bytes.clear();
            buf.bytes.resize(byte_len, 0);
        }
    }

    fn upload_full(&mut self, handle: BufferHandle, bytes: &[u8]) {
        if let Some(buf) = self.buffers.get_mut(&handle) {
            buf.bytes.clear();
            buf.bytes.extend_from_slice(bytes);
        }
    }

    fn upload_range(&mut self, handle: BufferHandle, offset: usize, bytes: &[u8]) {
        let Some(buf) = self.buffers.get_mut(&handle) else { return };
        let end = offset + bytes.len();
        let Some(dst) = buf.bytes.get_mut(offset..end) else {
            log::error!(
                "upload_range {offset}..{end} out of bounds for {:?} {handle:?} ({} bytes)",
                buf.kind,
                buf.bytes.len()
            );
            return;
        };
        dst.copy_from_slice(bytes);
    }

    fn buffer_byte_size(&self, handle: BufferHandle) -> usize {
        self.buffers.get(&handle).map_or(0, |b| b.bytes.len())
    }

    fn destroy_buffer(&mut self, handle: BufferHandle) {
        self.buffers.remove(&handle);
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> TextureHandle {
        self.next_texture += 1;
        let handle = TextureHandle(self.next_texture);

        let width = width.max(1);
        let height = height.max(1);
        let expected = width as usize * height as usize * 4;
        let pixels = if rgba.len() == expected {
            rgba.to_vec()
        } else {
            log::error!("texture {handle:?}: expected {expected} bytes of RGBA, got {}", rgba.len());
            INVALID_TEXTURE_RGBA.repeat(expected / 4)
        };

        self.textures.insert(handle, TextureSlot { width, height, pending: Some(pixels), view: None });
        handle
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: TextureHandle) {
        match self.units.get_mut(unit.index() as usize) {
            Some(slot) => *slot = Some(texture),
            None => log::debug!("bind to {unit:?} ignored; it samples as invalid"),
        }
    }

    fn destroy_texture(&mut self, texture: TextureHandle) {
        self.textures.remove(&texture);
        for slot in &mut self.units {
            if *slot == Some(texture) {
                *slot = None;
            }
        }
    }

    fn bind_program(&mut self, program: ShaderProgram) {
        self.program = Some(program);
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        match (name, value, self.program) {
            ("u_viewport", UniformValue::Vec2(v), Some(ShaderProgram::Shape)) => self.shape_viewport = Some(v),
            ("u_viewport", UniformValue::Vec2(v), Some(ShaderProgram::Sprite)) => self.sprite_viewport = Some(v),
            // Sampler slots are fixed: binding 2 + unit.
            ("u_textures", UniformValue::IntArray(_), _) => {}
            (name, value, program) => {
                log::debug!("uniform `{name}` = {value:?} ignored (program {program:?})");
            }
        }
    }

    fn draw(&mut self, call: &DrawCall) {
        if call.count == 0 {
            return;
        }
        match self.program {
            Some(ShaderProgram::Shape) => self.record_shape(call),
            Some(ShaderProgram::Sprite) => self.record_sprites(call),
            None => log::error!("draw with no program bound"),
        }
    }
}

// ── gpu construction ──────────────────────────────────────────────────────

impl GpuState {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;
        let viewport_entry = wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(size_of::<ViewportUniform>() as u64),
            },
            count: None,
        };

        // ── shape ─────────────────────────────────────────────────────────
        let shape_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });
        let shape_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera shape bgl"),
            entries: &[viewport_entry],
        });
        let shape_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera shape pipeline layout"),
            bind_group_layouts: &[&shape_bgl],
            immediate_size: 0,
        });
        let shape_pipelines = ShapeTopology::ALL
            .into_iter()
            .map(|t| {
                let pipeline = create_pipeline(
                    ctx,
                    "tessera shape pipeline",
                    &shape_layout,
                    &shape_shader,
                    ShapeVertex::layout(),
                    t.primitive(),
                );
                (t, pipeline)
            })
            .collect();

        // ── sprite ────────────────────────────────────────────────────────
        let sprite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tessera sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });
        let mut sprite_entries = vec![
            viewport_entry,
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ];
        sprite_entries.extend((0..UNIT_SLOTS as u32).map(|unit| wgpu::BindGroupLayoutEntry {
            binding: FIRST_TEXTURE_BINDING + unit,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        }));
        let sprite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tessera sprite bgl"),
            entries: &sprite_entries,
        });
        let sprite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tessera sprite pipeline layout"),
            bind_group_layouts: &[&sprite_bgl],
            immediate_size: 0,
        });
        let sprite_pipeline = create_pipeline(
            ctx,
            "tessera sprite pipeline",
            &sprite_layout,
            &sprite_shader,
            sprite_vertex_layout(),
            wgpu::PrimitiveTopology::TriangleList,
        );

        // ── bindings ──────────────────────────────────────────────────────
        let shape_ubo = create_viewport_ubo(ctx, "tessera shape viewport ubo");
        let sprite_ubo = create_viewport_ubo(ctx, "tessera sprite viewport ubo");
        let shape_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera shape bind group"),
            layout: &shape_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: shape_ubo.as_entire_binding(),
            }],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tessera sprite sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let fallback_view = create_rgba_view(ctx, 1, 1, &INVALID_TEXTURE_RGBA, "tessera invalid texture");

        log::debug!("wgpu backend pipelines built for {:?}", ctx.target_format);

        Self {
            format: ctx.target_format,
            shape_pipelines,
            sprite_pipeline,
            sprite_bgl,
            shape_bind_group,
            shape_ubo,
            sprite_ubo,
            sampler,
            fallback_view,
            shape_vbo: None,
            shape_vbo_capacity: 0,
            sprite_vbo: None,
            sprite_vbo_capacity: 0,
            sprite_ibo: None,
            sprite_ibo_capacity: 0,
        }
    }

    fn sprite_bind_group(
        &self,
        ctx: &RenderCtx<'_>,
        textures: &HashMap<TextureHandle, TextureSlot>,
        units: &UnitBindings,
    ) -> wgpu::BindGroup {
        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: self.sprite_ubo.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&self.sampler),
            },
        ];
        for (unit, bound) in units.iter().enumerate() {
            let view = bound
                .and_then(|h| textures.get(&h))
                .and_then(|slot| slot.view.as_ref())
                .unwrap_or(&self.fallback_view);
            entries.push(wgpu::BindGroupEntry {
                binding: FIRST_TEXTURE_BINDING + unit as u32,
                resource: wgpu::BindingResource::TextureView(view),
            });
        }

        ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessera sprite bind group"),
            layout: &self.sprite_bgl,
            entries: &entries,
        })
    }
}

fn create_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[vertex_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.target_format,
                blend: Some(straight_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size_of::<ViewportUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_rgba_view(ctx: &RenderCtx<'_>, width: u32, height: u32, rgba: &[u8], label: &str) -> wgpu::TextureView {
    let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        size,
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn ensure_buffer_capacity(
    ctx: &RenderCtx<'_>,
    buffer: &mut Option<wgpu::Buffer>,
    capacity: &mut usize,
    required: usize,
    usage: wgpu::BufferUsages,
    label: &str,
) {
    if required <= *capacity && buffer.is_some() {
        return;
    }
    let new_cap = required.next_power_of_two().max(1024);
    *buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: new_cap as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
    *capacity = new_cap;
}
