//! Renders one frame of shapes, sprites and text into an offscreen target.
//!
//! `RUST_LOG=tessera_engine=debug cargo run --bin tessera-demo`

use anyhow::Result;

use tessera_engine::atlas::AtlasImage;
use tessera_engine::coords::{Rect, Rotation, Vec2, Viewport};
use tessera_engine::device::{Gpu, GpuInit};
use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::paint::Color;
use tessera_engine::render::{RenderCtx, RenderTarget, WgpuBackend};
use tessera_engine::shapes::ShapeMode;
use tessera_engine::sprite::Sprite;
use tessera_engine::text::{FontMetrics, TextStyle};
use tessera_engine::{Graphics, GraphicsConfig};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

/// Two 32px tiles side by side: a checkerboard and a solid block.
fn tile_pixels() -> Vec<u8> {
    let (w, h) = (64u32, 32u32);
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .flat_map(|(x, y)| {
            let on = x >= 32 || ((x / 8) + (y / 8)) % 2 == 0;
            if on { [255, 255, 255, 255] } else { [40, 40, 40, 255] }
        })
        .collect()
}

/// 16x6 grid of 8px cells starting at ' ', each glyph a hollow box.
fn font_pixels() -> (FontMetrics, Vec<u8>) {
    let metrics = FontMetrics::monospace(8, 8, b' ', 128, 48);
    let pixels = (0..48u32)
        .flat_map(|y| (0..128u32).map(move |x| (x % 8, y % 8)))
        .flat_map(|(cx, cy)| {
            let edge = (1..=6).contains(&cx) && (1..=6).contains(&cy) && (cx == 1 || cx == 6 || cy == 1 || cy == 6);
            if edge { [255, 255, 255, 255] } else { [0, 0, 0, 0] }
        })
        .collect();
    (metrics, pixels)
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let gpu = Gpu::new_headless_blocking(GpuInit::default())?;
    let target = gpu.create_offscreen(WIDTH, HEIGHT)?;
    let viewport = Viewport::new(WIDTH as f32, HEIGHT as f32);

    let mut gfx = Graphics::new(WgpuBackend::new(), GraphicsConfig::default());
    gfx.set_viewport(viewport);

    let tiles = tile_pixels();
    let atlas = gfx.create_atlas_checked(AtlasImage::new(64, 32, &tiles), 2, 1)?;
    let (metrics, glyphs) = font_pixels();
    gfx.load_font(metrics, &glyphs);

    // ── shapes ────────────────────────────────────────────────────────────
    gfx.rectangle(
        ShapeMode::Fill,
        Rect::new(20.0, 20.0, 120.0, 60.0),
        Rotation::new(0.2).around(Vec2::new(60.0, 30.0)),
        Color::rgb(0.9, 0.3, 0.2),
    );
    gfx.circle(ShapeMode::Line, Vec2::new(220.0, 60.0), 40.0, Color::rgb(0.2, 0.8, 0.4));
    gfx.polygon(
        ShapeMode::Fill,
        &[Vec2::new(300.0, 20.0), Vec2::new(380.0, 40.0), Vec2::new(360.0, 100.0), Vec2::new(300.0, 90.0)],
        Color::rgb(0.3, 0.4, 0.9),
    );

    gfx.batch_lines_push();
    for i in 0..10 {
        let x = 420.0 + i as f32 * 20.0;
        gfx.line(Vec2::new(x, 20.0), Vec2::new(x + 10.0, 100.0), Color::from_rgb_u8(240, 200, 40));
    }
    gfx.batch_lines_pop();

    gfx.batch_points_push();
    for i in 0..64 {
        let t = i as f32 / 64.0 * std::f32::consts::TAU;
        gfx.point(Vec2::new(320.0 + t.cos() * 140.0, 230.0 + t.sin() * 80.0), Color::white(), 1.0);
    }
    gfx.batch_points_pop(1.0);

    // ── sprites ───────────────────────────────────────────────────────────
    let mut floor = gfx.static_container();
    for i in 0..12u32 {
        let sprite = Sprite::new(Vec2::new(40.0 + i as f32 * 48.0, 330.0), Vec2::new(32.0, 32.0));
        Graphics::<WgpuBackend>::compile_static(&mut floor, &atlas, i % 2, &sprite);
    }
    gfx.load_static_data(&floor);

    for i in 0..5u32 {
        let sprite = Sprite::new(Vec2::new(100.0 + i as f32 * 60.0, 160.0), Vec2::new(40.0, 40.0))
            .rotated(Rotation::new(i as f32 * 0.3))
            .tinted(Color::rgb(1.0, 1.0 - i as f32 * 0.15, 0.6));
        gfx.draw(&atlas, 0u32, &sprite);
    }

    gfx.print("tessera", Vec2::new(20.0, 260.0), &TextStyle { scale: 2.0, ..TextStyle::default() });
    gfx.print(
        std::f64::consts::PI,
        Vec2::new(20.0, 290.0),
        &TextStyle { digits: Some(3), color: Color::rgb(0.5, 0.9, 1.0), ..TextStyle::default() },
    );
    gfx.render();

    // ── submit ────────────────────────────────────────────────────────────
    let draws = gfx.backend().pending_draws();
    let mut encoder = gpu.create_encoder();
    let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.format(), viewport);
    gfx.backend_mut().encode(&ctx, &mut RenderTarget::new(&mut encoder, &target.view));
    gpu.submit(encoder);

    log::info!("rendered {draws} draws into a {}x{} target", target.width, target.height);
    Ok(())
}
