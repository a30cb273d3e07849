//! Dense sphere field demo. Renders a few hundred spheres and prints how
//! long a full trace of the image takes.

use bsp_render::{random_sphere_scene, render_scene, OrbitCamera};
use bsp_trace::TreeStats;
use macroquad::prelude::*;

const RENDER_WIDTH: u16 = 320;
const RENDER_HEIGHT: u16 = 240;

const SPHERE_COUNT: usize = 256;

#[macroquad::main("BSP Ray Tracing - Sphere Field")]
async fn main() {
    let mut seed = 7;
    let mut scene = random_sphere_scene(seed, SPHERE_COUNT);
    let mut stats = TreeStats::collect(scene.tree());
    println!(
        "Sphere field: {} spheres, {} nodes ({} leaves), depth {}",
        scene.objects().len(),
        stats.nodes,
        stats.leaves,
        stats.max_depth
    );

    let mut camera = OrbitCamera::new(70.0, 0.8, 0.25).with_zoom(5.0, 20.0, 180.0);

    let mut image = Image::gen_image_color(RENDER_WIDTH, RENDER_HEIGHT, BLACK);
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);

    let mut reported = false;
    let mut dirty = true;
    loop {
        if camera.update() {
            dirty = true;
        }

        if is_key_pressed(KeyCode::R) {
            seed += 1;
            scene = random_sphere_scene(seed, SPHERE_COUNT);
            stats = TreeStats::collect(scene.tree());
            reported = false;
            dirty = true;
        }

        if dirty {
            let aspect = RENDER_WIDTH as f32 / RENDER_HEIGHT as f32;
            let view = camera.view(aspect);
            let start = get_time();
            render_scene(&scene, &view, &mut image);
            if !reported {
                println!(
                    "Traced {}x{} pixels in {:.1} ms",
                    RENDER_WIDTH,
                    RENDER_HEIGHT,
                    (get_time() - start) * 1000.0
                );
                reported = true;
            }
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
            &format!("Sphere field - {} spheres", scene.objects().len()),
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
