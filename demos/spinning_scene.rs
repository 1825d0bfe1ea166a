//! Spinning Scene Example
//!
//! Headless frame loop: an orbiting camera, a light, a row of cubes that
//! spin, and a sprite, all under linear fog. Each frame advances the scene
//! and rebuilds the draw lists; the list sizes are logged. Halfway through a
//! scripted mouse drag swings the camera around.
//!
//! Run with `RUST_LOG=debug cargo run --example spinning_scene`.

use std::sync::Arc;
use std::time::Duration;

use glam::{Vec2, Vec3, Vec4};

use canopy::scene::event::{Event, Key, KeyboardEvent, MouseButton, MouseEvent};
use canopy::scene::light::Light;
use canopy::scene::transform::Axis;
use canopy::{
    Camera, Fog, FrameClock, Material, Mesh, NodeBehavior, NodeContext, OrbitControls, RenderLists,
    Scene, create_box,
};

const FRAMES: u64 = 8;

/// Spins the node about Y; Space reverses direction.
struct Spin {
    speed: f32,
}

impl NodeBehavior for Spin {
    fn on_update(&mut self, ctx: &mut NodeContext<'_>, delta: f32) {
        if let Some(transform) = ctx.transform_mut() {
            transform.rotate(Axis::Y, self.speed * delta);
        }
    }

    fn on_keyboard_event(&mut self, _ctx: &mut NodeContext<'_>, event: &mut KeyboardEvent) {
        if event.key == Key::Space {
            self.speed = -self.speed;
        }
    }

    fn on_attached(&mut self, ctx: &mut NodeContext<'_>) {
        log::info!("Spinner attached at {}", ctx.world_transform().w_axis.truncate());
    }
}

fn main() {
    env_logger::init();

    let mut scene = Scene::new();

    scene.set_fog(Fog::linear(Vec3::splat(0.27), 8.0, 30.0));

    let camera = scene.create_camera(Camera::new_perspective(60.0, 16.0 / 9.0, 0.1, 100.0));
    scene.add_to_root(camera);
    let controls = OrbitControls::new(camera, Vec3::ZERO, 10.0).with_angles(1.27, 0.0);
    scene.set_behavior(camera, controls);

    let sun = scene.create_light(Light::new_directional(Vec3::ONE, 2.0));
    scene.add_to_root(sun);

    let cube_geometry = Arc::new(create_box(1.0, 1.0, 1.0));
    let red = Arc::new(Material::phong(Vec4::new(0.9, 0.2, 0.2, 1.0)));
    let glass = Arc::new(Material::unlit(Vec4::new(0.6, 0.8, 1.0, 0.4)).with_transparent(true));

    let row = scene.create_node_with_name("Row");
    scene.add_to_root(row);
    for i in 0..5 {
        let material = if i % 2 == 0 { red.clone() } else { glass.clone() };
        let cube = scene.create_mesh(Mesh::new(cube_geometry.clone(), material));
        scene
            .get_node_mut(cube)
            .unwrap()
            .transform
            .set_position(Vec3::new((i as f32 - 2.0) * 2.0, 0.0, -(i as f32)));
        scene.set_behavior(cube, Spin { speed: 1.0 + i as f32 });
        scene.add(row, cube);
    }

    let marker = scene.create_sprite(Some(Arc::new(Material::sprite(Vec4::ONE))));
    scene.get_node_mut(marker).unwrap().transform.set_position(Vec3::new(0.0, 2.0, 0.0));
    scene.add_to_root(marker);

    let mut lists = RenderLists::new();
    let mut clock = FrameClock::new();

    for _ in 0..FRAMES {
        std::thread::sleep(Duration::from_millis(16));
        let time = clock.tick();

        if time.frame_index == FRAMES / 2 {
            let mut event = Event::from(KeyboardEvent::pressed(Key::Space));
            scene.handle_input_event(&mut event);

            for mouse in [
                MouseEvent::button_pressed(MouseButton::Left, Vec2::new(640.0, 360.0)),
                MouseEvent::moved(Vec2::new(760.0, 340.0)),
                MouseEvent::button_released(MouseButton::Left, Vec2::new(760.0, 340.0)),
            ] {
                scene.handle_input_event(&mut Event::Mouse(mouse));
            }
        }

        scene.advance(time.dt);
        lists.process_scene(&mut scene, camera);

        log::info!(
            "frame {} (dt {:.4}s): {} opaque, {} transparent, {} sprites, {} lights",
            time.frame_index,
            time.dt,
            lists.opaque().len(),
            lists.transparent().len(),
            lists.sprites().len(),
            lists.lights().len()
        );
    }

    log::info!("camera ended at {}", scene.world_position(camera));
    log::info!(
        "{} nodes, membership rebuilt {} time(s)",
        scene.node_count(),
        lists.rebuild_count()
    );
}
