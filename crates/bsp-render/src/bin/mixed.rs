//! Mixed scene demo: spheres hovering over a two-triangle floor. The
//! floor crosses many regions, which makes shared leaf listings and
//! shadow rays easy to eyeball.

use bsp_render::{mixed_scene, render_scene, OrbitCamera};
use bsp_trace::TreeStats;
use macroquad::prelude::*;

const RENDER_WIDTH: u16 = 320;
const RENDER_HEIGHT: u16 = 240;

const SPHERE_COUNT: usize = 48;

#[macroquad::main("BSP Ray Tracing - Mixed Scene")]
async fn main() {
    let mut seed = 3;
    let mut scene = mixed_scene(seed, SPHERE_COUNT);
    let mut stats = TreeStats::collect(scene.tree());
    println!(
        "Mixed scene: {} objects, {} nodes ({} leaves), {} primitive refs",
        scene.objects().len(),
        stats.nodes,
        stats.leaves,
        stats.primitive_refs
    );

    let mut camera = OrbitCamera::new(55.0, 0.5, 0.45).with_zoom(4.0, 15.0, 150.0);

    let mut image = Image::gen_image_color(RENDER_WIDTH, RENDER_HEIGHT, BLACK);
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);

    let mut dirty = true;
    loop {
        if camera.update() {
            dirty = true;
        }

        if is_key_pressed(KeyCode::R) {
            seed += 1;
            scene = mixed_scene(seed, SPHERE_COUNT);
            stats = TreeStats::collect(scene.tree());
            dirty = true;
        }

        if dirty {
            let aspect = RENDER_WIDTH as f32 / RENDER_HEIGHT as f32;
            let view = camera.view(aspect);
            render_scene(&scene, &view, &mut image);
            texture.update(&image);
            dirty = false;
        }

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        draw_text(
            &format!("Mixed scene - {} objects", scene.objects().len()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Tree: {} nodes, {} leaves, depth {}, {} refs",
                stats.nodes, stats.leaves, stats.max_depth, stats.primitive_refs
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text(
            "Drag mouse / arrows to orbit, scroll to zoom, [R] new scene",
            10.0,
            65.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 85.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
