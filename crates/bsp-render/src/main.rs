use bsp_render::{draw_split_planes, random_sphere_scene, render_scene, OrbitCamera};
use bsp_trace::TreeStats;
use macroquad::prelude::*;

/// Traced image resolution; the texture is stretched to the window.
const RENDER_WIDTH: u16 = 320;
const RENDER_HEIGHT: u16 = 240;

const SPHERE_COUNT: usize = 64;

#[macroquad::main("BSP Ray Tracing")]
async fn main() {
    let mut seed = 42;
    let mut scene = random_sphere_scene(seed, SPHERE_COUNT);
    let mut stats = TreeStats::collect(scene.tree());
    println!(
        "Scene ready: {} objects, {} nodes ({} leaves), depth {}",
        scene.objects().len(),
        stats.nodes,
        stats.leaves,
        stats.max_depth
    );

    let mut camera = OrbitCamera::new(60.0, 0.6, 0.35).with_zoom(4.0, 15.0, 150.0);

    let mut image = Image::gen_image_color(RENDER_WIDTH, RENDER_HEIGHT, BLACK);
    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);

    let aspect = RENDER_WIDTH as f32 / RENDER_HEIGHT as f32;
    let mut show_planes = false;
    let mut dirty = true;
    loop {
        if camera.update() {
            dirty = true;
        }

        if is_key_pressed(KeyCode::P) {
            show_planes = !show_planes;
        }

        if is_key_pressed(KeyCode::R) {
            seed += 1;
            scene = random_sphere_scene(seed, SPHERE_COUNT);
            stats = TreeStats::collect(scene.tree());
            println!(
                "Scene {}: {} nodes ({} leaves), depth {}, {} primitive refs",
                seed, stats.nodes, stats.leaves, stats.max_depth, stats.primitive_refs
            );
            dirty = true;
        }

        if dirty {
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

        if show_planes {
            draw_split_planes(&scene, &camera.view(aspect), 4);
        }

        draw_text(
            &format!("BSP Ray Tracing - {} objects", scene.objects().len()),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "Tree: {} nodes, {} leaves, depth {}",
                stats.nodes, stats.leaves, stats.max_depth
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );
        draw_text(
            "Drag mouse / arrows to orbit, scroll to zoom, [R] new scene, [P] planes",
            10.0,
            65.0,
            16.0,
            DARKGRAY,
        );
        draw_text(
            &format!("FPS: {}", get_fps()),
            10.0,
            85.0,
            16.0,
            DARKGRAY,
        );

        next_frame().await
    }
}
