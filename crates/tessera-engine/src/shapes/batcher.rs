use crate::backend::{ColorSource, ColorStep, DrawCall, GpuBackend, ShaderProgram, Topology};
use crate::batch::{BatchLayout, GrowableBatch};
use crate::config::GraphicsConfig;
use crate::coords::{Rect, Rotation, Vec2};
use crate::geometry;
use crate::paint::Color;

use super::ShapeBuffers;

/// Filled interior or outline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeMode {
    Fill,
    Line,
}

/// Which batch, if any, is accumulating.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BatchMode {
    #[default]
    Idle,
    Lines,
    Points,
}

impl BatchMode {
    #[inline]
    pub fn is_batched(self) -> bool {
        self != BatchMode::Idle
    }
}

/// Immediate polygon drawing plus line and point batching.
///
/// Polygons, rectangles and circles are drawn as soon as they are submitted.
/// Lines and points go through a push/pop batch that issues one draw on pop.
/// All of them share one [`ShapeBuffers`] pair.
#[derive(Debug)]
pub struct ShapeBatcher {
    buffers: ShapeBuffers,
    lines: GrowableBatch<[Vec2; 2], Color>,
    points: GrowableBatch<Vec2, Color>,
    mode: BatchMode,
}

impl ShapeBatcher {
    pub fn new(backend: &mut dyn GpuBackend, config: &GraphicsConfig) -> Self {
        let buffers = ShapeBuffers::create(backend);
        Self {
            buffers,
            lines: GrowableBatch::new(
                BatchLayout::new(1, 1, config.line_growth),
                buffers.positions,
                buffers.colors,
            ),
            points: GrowableBatch::new(
                BatchLayout::new(1, 1, config.point_growth),
                buffers.positions,
                buffers.colors,
            ),
            mode: BatchMode::Idle,
        }
    }

    #[inline]
    pub fn buffers(&self) -> ShapeBuffers {
        self.buffers
    }

    #[inline]
    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    #[inline]
    pub fn is_batched(&self) -> bool {
        self.mode.is_batched()
    }

    #[inline]
    pub fn line_batch(&self) -> &GrowableBatch<[Vec2; 2], Color> {
        &self.lines
    }

    #[inline]
    pub fn point_batch(&self) -> &GrowableBatch<Vec2, Color> {
        &self.points
    }

    // ── immediate shapes ──────────────────────────────────────────────────

    /// Draws a convex polygon.
    ///
    /// `Fill` fan-triangulates and issues one triangle-list draw; `Line` issues
    /// one closed outline. Empty input, and fills with fewer than 3 vertices,
    /// draw nothing.
    pub fn polygon(&mut self, backend: &mut dyn GpuBackend, mode: ShapeMode, vertices: &[Vec2], color: Color) {
        if vertices.is_empty() {
            log::trace!("polygon: no vertices, skipped");
            return;
        }
        match mode {
            ShapeMode::Fill => {
                let triangles = geometry::triangulate_convex(vertices);
                if triangles.is_empty() {
                    log::trace!("polygon: {} vertices cannot be filled, skipped", vertices.len());
                    return;
                }
                self.draw_immediate(backend, Topology::Triangles, triangles.as_flattened(), color, None);
            }
            ShapeMode::Line => {
                self.draw_immediate(backend, Topology::LineLoop, vertices, color, None);
            }
        }
    }

    /// Axis-aligned rectangle from its top-left corner, optionally rotated
    /// about `rect.origin + rotation.offset`.
    pub fn rectangle(
        &mut self,
        backend: &mut dyn GpuBackend,
        mode: ShapeMode,
        rect: Rect,
        rotation: Rotation,
        color: Color,
    ) {
        let mut corners = rect.corners();
        if !rotation.is_identity() {
            geometry::rotate_points(&mut corners, rect.origin + rotation.offset, rotation.angle);
        }
        self.polygon(backend, mode, &corners, color);
    }

    /// Circle approximated by `precision` points.
    pub fn circle(
        &mut self,
        backend: &mut dyn GpuBackend,
        mode: ShapeMode,
        center: Vec2,
        radius: f32,
        color: Color,
        precision: u32,
    ) {
        let points = geometry::circle_points(center, radius, precision);
        self.polygon(backend, mode, &points, color);
    }

    fn draw_immediate(
        &mut self,
        backend: &mut dyn GpuBackend,
        topology: Topology,
        vertices: &[Vec2],
        color: Color,
        point_size: Option<f32>,
    ) {
        backend.upload_full(self.buffers.positions, bytemuck::cast_slice(vertices));
        backend.upload_full(self.buffers.colors, bytemuck::bytes_of(&color));
        self.issue(backend, topology, vertices.len(), ColorStep::PerInstance, point_size);
    }

    fn issue(
        &self,
        backend: &mut dyn GpuBackend,
        topology: Topology,
        count: usize,
        step: ColorStep,
        point_size: Option<f32>,
    ) {
        backend.bind_program(ShaderProgram::Shape);
        backend.draw(&DrawCall {
            topology,
            vertices: self.buffers.positions,
            colors: Some(ColorSource { buffer: self.buffers.colors, step }),
            indices: None,
            count: count as u32,
            point_size,
        });
    }

    // ── lines ─────────────────────────────────────────────────────────────

    /// Starts accumulating lines. The batch is emptied first.
    pub fn batch_lines_push(&mut self, backend: &mut dyn GpuBackend) {
        if self.lines.capacity() == 0 {
            self.lines.ensure_capacity(backend);
        }
        self.lines.reset();
        self.mode = BatchMode::Lines;
    }

    /// Appends a line to the open line batch, or draws it immediately.
    pub fn line(&mut self, backend: &mut dyn GpuBackend, from: Vec2, to: Vec2, color: Color) {
        if self.mode == BatchMode::Lines {
            self.lines.push(backend, &[[from, to]], &[color]);
        } else {
            self.draw_immediate(backend, Topology::Lines, &[from, to], color, None);
        }
    }

    /// Uploads the accumulated lines and draws them in one call.
    ///
    /// The whole batch is drawn in the colour of its first line.
    ///
    /// # Panics
    /// If no line batch is open.
    pub fn batch_lines_pop(&mut self, backend: &mut dyn GpuBackend) {
        assert!(
            self.mode == BatchMode::Lines,
            "batch_lines_pop without a matching batch_lines_push (batch mode: {:?})",
            self.mode
        );
        self.lines.upload(backend);
        self.issue(backend, Topology::Lines, self.lines.len() * 2, ColorStep::PerInstance, None);
        self.mode = BatchMode::Idle;
    }

    // ── points ────────────────────────────────────────────────────────────

    /// Starts accumulating points. The batch is emptied first.
    pub fn batch_points_push(&mut self, backend: &mut dyn GpuBackend) {
        if self.points.capacity() == 0 {
            self.points.ensure_capacity(backend);
        }
        self.points.reset();
        self.mode = BatchMode::Points;
    }

    /// Appends a point to the open point batch, or draws it immediately at
    /// `size` pixels.
    pub fn point(&mut self, backend: &mut dyn GpuBackend, at: Vec2, color: Color, size: f32) {
        if self.mode == BatchMode::Points {
            self.points.push(backend, &[at], &[color]);
        } else {
            self.draw_immediate(backend, Topology::Points, &[at], color, Some(size));
        }
    }

    /// Uploads the accumulated points and draws them at `point_size`, each
    /// in its own colour.
    ///
    /// # Panics
    /// If no point batch is open.
    pub fn batch_points_pop(&mut self, backend: &mut dyn GpuBackend, point_size: f32) {
        assert!(
            self.mode == BatchMode::Points,
            "batch_points_pop without a matching batch_points_push (batch mode: {:?})",
            self.mode
        );
        self.points.upload(backend);
        self.issue(backend, Topology::Points, self.points.len(), ColorStep::PerVertex, Some(point_size));
        self.mode = BatchMode::Idle;
    }

    /// Releases the shared buffers.
    pub fn destroy(&self, backend: &mut dyn GpuBackend) {
        self.buffers.destroy(backend);
    }
}
