//! Headless Canvas Demo
//!
//! Draws a clipped gradient scene offscreen and prints a few pixels.
//!
//! Run with:
//! `cargo run -p tessera_gpu --example headless --features desktop`

use tessera_gpu::{CanvasRenderer, RendererConfig};
use tessera_paint::{Canvas, Color};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (width, height) = (256, 256);
    let mut renderer = pollster::block_on(CanvasRenderer::headless(RendererConfig {
        texture_format: Some(wgpu::TextureFormat::Rgba8Unorm),
        ..Default::default()
    }))?;

    let checker: Vec<u8> = (0..16 * 16)
        .flat_map(|i| {
            let on = (i % 16 + i / 16) % 2 == 0;
            if on {
                [255, 200, 0, 255]
            } else {
                [40, 40, 40, 255]
            }
        })
        .collect();
    let image = renderer.create_image(&checker, 16, 16)?;

    let mut canvas = Canvas::new(width, height);
    canvas.clear(Color::rgb(0.1, 0.1, 0.12));

    let mut gradient = canvas.create_linear_gradient(0.0, 0.0, 256.0, 0.0);
    gradient.add_color_stop(0.0, Color::RED);
    gradient.add_color_stop(1.0, Color::BLUE);
    canvas.set_fill_gradient(gradient);
    canvas.fill_rect(16.0, 16.0, 224.0, 64.0);

    canvas.save();
    canvas.begin_path();
    canvas.arc(128.0, 160.0, 64.0, 0.0, std::f32::consts::TAU, false);
    canvas.clip();
    canvas.set_fill_color(Color::GREEN);
    canvas.fill_rect(0.0, 96.0, 256.0, 160.0);
    canvas.draw_image_sized(&image, 96.0, 128.0, 64.0, 64.0);
    canvas.restore();

    canvas.set_stroke_color(Color::WHITE);
    canvas.set_line_width(4.0);
    canvas.stroke_circle(128.0, 160.0, 64.0);

    let frame = canvas.take_frame();
    tracing::info!(
        "frame: {} commands, {} vertices",
        frame.commands.len(),
        frame.total_vertices()
    );

    let target = renderer.create_target_texture(width, height);
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    renderer.render(&frame, &view);

    let pixels = renderer.read_texture_rgba(&target)?;
    for (x, y) in [(20, 20), (236, 20), (128, 160), (4, 250)] {
        let i = ((y * width + x) * 4) as usize;
        println!("pixel ({x}, {y}) = {:?}", &pixels[i..i + 4]);
    }

    Ok(())
}
