use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::scene::NodeHandle;
use crate::scene::behavior::{NodeBehavior, NodeContext};
use crate::scene::camera::Projection;
use crate::scene::event::{MouseButton, MouseEvent, MouseEventKind};

const PHI_EPS: f32 = 0.0001;

/// Orbits a camera node around a target point.
///
/// Installed as the behavior of any attached node (the camera node itself
/// works). Drag distance is accumulated per button as mouse events arrive
/// and applied on the next `on_update`:
///
/// - left drag rotates around `center`
/// - right drag pans `center` in the view plane
/// - vertical scroll zooms; positive scroll moves closer
///
/// The camera sits at `center` plus the spherical offset
/// `(radius, theta, phi)`, where `phi` is measured from +Y and `theta`
/// around Y starting at +Z.
pub struct OrbitControls {
    pub camera: NodeHandle,

    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Window height in pixels; one full height of drag turns the camera
    /// one full revolution.
    pub viewport_height: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,

    pointer: Vec2,
    orbit_pixels: Vec2,
    pan_pixels: Vec2,
    button: MouseButton,
    scroll: f32,
}

impl OrbitControls {
    #[must_use]
    pub fn new(camera: NodeHandle, center: Vec3, radius: f32) -> Self {
        Self {
            camera,

            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: false,
            min_distance: 0.1,
            max_distance: 1000.0,
            viewport_height: 720.0,

            center,
            radius,
            theta: 0.0,
            phi: PI / 2.0,

            rotate_delta: Vec2::ZERO,

            pointer: Vec2::ZERO,
            orbit_pixels: Vec2::ZERO,
            pan_pixels: Vec2::ZERO,
            button: MouseButton::None,
            scroll: 0.0,
        }
    }

    /// Starting angles in radians: `pitch` is measured from +Y, `yaw` around
    /// Y from +Z.
    #[must_use]
    pub fn with_angles(mut self, pitch: f32, yaw: f32) -> Self {
        self.phi = pitch.clamp(PHI_EPS, PI - PHI_EPS);
        self.theta = yaw;
        self
    }

    /// Button currently dragging, [`MouseButton::None`] when idle.
    #[inline]
    #[must_use]
    pub fn active_button(&self) -> MouseButton {
        self.button
    }

    /// Camera position for the current spherical coordinates.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.center + self.radius * self.direction()
    }

    fn direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    fn apply_rotation(&mut self, delta: f32) {
        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(delta * target_fps);
            let applied = self.rotate_delta * (1.0 - retention);

            self.theta += applied.x;
            self.phi += applied.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }
        self.phi = self.phi.clamp(PHI_EPS, PI - PHI_EPS);
    }

    fn apply_zoom(&mut self) {
        if self.scroll == 0.0 {
            return;
        }
        let scale = (1.0 - self.zoom_speed).powf(self.scroll.abs());
        if self.scroll > 0.0 {
            self.radius *= scale;
        } else {
            self.radius /= scale;
        }
        self.radius = self.radius.clamp(self.min_distance, self.max_distance);
    }

    /// Moves `center` so the drag follows the cursor at the target's depth.
    fn apply_pan(&mut self, projection: Option<Projection>, screen_height: f32) {
        let world_height = match projection {
            Some(Projection::Perspective { fov, .. }) => {
                2.0 * self.radius * (fov.to_radians() / 2.0).tan()
            }
            Some(Projection::Orthographic { bottom, top, .. }) => top - bottom,
            None => return,
        };
        let pixels_to_world = world_height / screen_height;

        let forward = -self.direction();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward).normalize();

        let pan = right * -self.pan_pixels.x + up * self.pan_pixels.y;
        self.center += pan * pixels_to_world * self.pan_speed;
    }
}

impl NodeBehavior for OrbitControls {
    fn on_update(&mut self, ctx: &mut NodeContext<'_>, delta: f32) {
        let screen_height = self.viewport_height.max(1.0);

        let rotate_per_pixel = TAU / screen_height;
        self.rotate_delta -= self.orbit_pixels * rotate_per_pixel * self.rotate_speed;
        self.apply_rotation(delta);
        self.apply_zoom();

        if self.pan_pixels != Vec2::ZERO {
            let projection = ctx
                .scene
                .get_node(self.camera)
                .and_then(|node| node.camera())
                .map(|camera| camera.projection());
            self.apply_pan(projection, screen_height);
        }

        self.orbit_pixels = Vec2::ZERO;
        self.pan_pixels = Vec2::ZERO;
        self.scroll = 0.0;

        let eye = self.eye();
        let Some(node) = ctx.scene.get_node_mut(self.camera) else {
            log::warn!("Orbit controls lost their camera node");
            return;
        };
        node.transform.set_position(eye);
        ctx.scene.look_at(self.camera, self.center);
    }

    fn on_mouse_event(&mut self, _ctx: &mut NodeContext<'_>, event: &mut MouseEvent) {
        match event.kind {
            MouseEventKind::Moved => {
                let moved = event.position - self.pointer;
                match self.button {
                    MouseButton::Left => self.orbit_pixels += moved,
                    MouseButton::Right => self.pan_pixels += moved,
                    _ => {}
                }
            }
            MouseEventKind::ButtonPressed => {
                if self.button == MouseButton::None {
                    self.button = event.button;
                }
            }
            MouseEventKind::ButtonReleased => {
                if event.button == self.button {
                    self.button = MouseButton::None;
                }
            }
            MouseEventKind::Scrolled => self.scroll += event.scroll.y,
        }
        self.pointer = event.position;
    }
}
