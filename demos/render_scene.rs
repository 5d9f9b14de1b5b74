#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Scene Rendering Example
//!
//! Draws points, lines, a flat triangle, a color-interpolated triangle and a
//! mipmapped checkerboard quad, then writes one PNG per sample rate so the
//! antialiasing difference is visible side by side.
//!
//! Run with: `cargo run --example render_scene [config.yaml]`

use trueno_raster::prelude::*;

const WIDTH: usize = 320;
const HEIGHT: usize = 240;

fn checkerboard(size: usize, cell: usize) -> MipmappedTexture {
    let texels = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if (x / cell + y / cell) % 2 == 0 {
                Rgba::rgb(40, 40, 120)
            } else {
                Rgba::rgb(240, 200, 60)
            }
        })
        .collect();
    MipmappedTexture::new(size, size, texels).expect("Failed to build texture")
}

fn draw_scene(raster: &mut Rasterizer<'_>, texture: &MipmappedTexture) {
    // Textured quad, minified so the mip chain is exercised.
    let quad = [
        (Point::new(190.0, 20.0), Point::new(0.0, 0.0)),
        (Point::new(310.0, 40.0), Point::new(1.0, 0.0)),
        (Point::new(300.0, 140.0), Point::new(1.0, 1.0)),
        (Point::new(180.0, 120.0), Point::new(0.0, 1.0)),
    ];
    for [a, b, c] in [[0, 1, 2], [0, 2, 3]] {
        raster.rasterize_textured_triangle(
            quad[a].0, quad[a].1, quad[b].0, quad[b].1, quad[c].0, quad[c].1, texture,
        );
    }

    raster.rasterize_interpolated_color_triangle(
        Point::new(20.0, 220.0),
        Color::RED,
        Point::new(90.0, 120.0),
        Color::GREEN,
        Point::new(160.0, 230.0),
        Color::BLUE,
    );

    Triangle::new(
        Point::new(30.0, 20.0),
        Point::new(150.0, 35.0),
        Point::new(60.0, 100.0),
    )
    .draw(raster, Color::new(0.1, 0.6, 0.3));

    for i in 0..12 {
        let t = i as f32 / 12.0;
        Line::from_coords(170.0, 230.0, 170.0 + 140.0 * t.cos(), 230.0 - 80.0 * t.sin())
            .draw(raster, Color::BLACK);
    }

    for i in 0..40 {
        let x = 10.0 + 7.5 * i as f32;
        Point::new(x, 8.0).draw(raster, Color::new(0.8, 0.1, 0.5));
    }
}

fn main() {
    env_logger::init();

    let config = std::env::args()
        .nth(1)
        .map(RasterizerConfig::load_or_default)
        .unwrap_or_else(|| RasterizerConfig {
            width: WIDTH,
            height: HEIGHT,
            level_sampling: LevelSampleMethod::Linear,
            pixel_sampling: PixelSampleMethod::Bilinear,
            ..RasterizerConfig::default()
        });
    config.validate().expect("Invalid configuration");

    println!("Scene Rendering Example");
    println!("=======================\n");

    let texture = checkerboard(256, 16);
    println!("Texture: 256x256, {} mip levels\n", texture.level_count());

    let mut pixels = vec![0u8; 3 * config.width * config.height];
    let mut raster = Rasterizer::from_config(&config).expect("Failed to create rasterizer");
    raster.set_framebuffer_target(
        FramebufferView::new(&mut pixels, config.width, config.height)
            .expect("Failed to bind framebuffer"),
    );

    let out_dir = std::env::temp_dir();
    for rate in [1, 4, 16] {
        raster.set_sample_rate(rate).expect("Invalid sample rate");
        draw_scene(&mut raster, &texture);
        raster
            .resolve_to_framebuffer()
            .expect("Failed to resolve samples");

        let path = out_dir.join(format!("trueno_raster_scene_{rate}x.png"));
        let fb = raster.framebuffer().expect("Framebuffer not bound");
        PngEncoder::write_to_file(fb, &path).expect("Failed to write PNG");
        println!("   Saved: {} (sample rate {rate})", path.display());
    }
}
