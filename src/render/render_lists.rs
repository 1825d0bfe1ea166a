use glam::Vec3;

use crate::render::renderable::{
    can_render, has_live_content, in_frustum, is_renderable, material_of,
};
use crate::render::settings::{RenderSettings, Revalidation};
use crate::scene::node::{Node, NodeKind};
use crate::scene::{Camera, NodeHandle, Scene};

/// Per-frame draw lists of a scene as seen from one camera.
///
/// Membership (which nodes are renderables or lights) is cached and only
/// re-walked when the scene reports that its hierarchy was touched. The
/// cached entries are then validated, culled and sorted every frame.
#[derive(Debug, Default)]
pub struct RenderLists {
    settings: RenderSettings,

    candidates: Vec<NodeHandle>,
    lights: Vec<NodeHandle>,

    opaque: Vec<NodeHandle>,
    transparent: Vec<NodeHandle>,
    sprites: Vec<NodeHandle>,

    rebuild_count: u64,
}

impl RenderLists {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Takes effect on the next membership rebuild for
    /// [`Revalidation`] changes, immediately for everything else.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Opaque meshes, front to back.
    #[inline]
    #[must_use]
    pub fn opaque(&self) -> &[NodeHandle] {
        &self.opaque
    }

    /// Transparent meshes, back to front.
    #[inline]
    #[must_use]
    pub fn transparent(&self) -> &[NodeHandle] {
        &self.transparent
    }

    /// Sprites, back to front.
    #[inline]
    #[must_use]
    pub fn sprites(&self) -> &[NodeHandle] {
        &self.sprites
    }

    /// Every light reachable from the scene root.
    #[inline]
    #[must_use]
    pub fn lights(&self) -> &[NodeHandle] {
        &self.lights
    }

    /// How many times membership has been re-walked.
    #[inline]
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    fn reset(&mut self) {
        self.opaque.clear();
        self.transparent.clear();
        self.sprites.clear();
    }

    fn rebuild(&mut self, scene: &Scene) {
        self.candidates.clear();
        self.lights.clear();

        for handle in scene.subtree(scene.root()) {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            if matches!(node.kind, NodeKind::Light(_)) {
                self.lights.push(handle);
            } else if is_renderable(node) {
                let keep = match self.settings.revalidation {
                    Revalidation::EveryFrame => true,
                    Revalidation::OnRebuild => can_render(node),
                };
                if keep {
                    self.candidates.push(handle);
                }
            }
        }

        self.rebuild_count += 1;
        log::debug!(
            "Render lists rebuilt for scene {}: {} renderables, {} lights",
            scene.id(),
            self.candidates.len(),
            self.lights.len()
        );
    }

    /// Refreshes world transforms, rebuilds membership if the scene was
    /// touched, then fills the sorted lists for `camera`.
    ///
    /// A handle that is not a live camera leaves every list empty.
    pub fn process_scene(&mut self, scene: &mut Scene, camera: NodeHandle) {
        self.reset();

        scene.update_world_transforms();

        if scene.take_touched() {
            self.rebuild(scene);
        }

        let Some(frustum) = scene.frustum(camera) else {
            log::warn!("process_scene: {camera:?} is not a camera node");
            return;
        };
        let camera_position = scene.world_position(camera);
        let forward = scene
            .get_node(camera)
            .and_then(Node::camera)
            .map_or(Vec3::NEG_Z, Camera::view_forward);

        let mut opaque = Vec::new();
        let mut transparent = Vec::new();
        let mut sprites = Vec::new();

        for &handle in &self.candidates {
            let Some(node) = scene.get_node(handle) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            let valid = match self.settings.revalidation {
                Revalidation::EveryFrame => can_render(node),
                Revalidation::OnRebuild => has_live_content(node),
            };
            if !valid {
                continue;
            }
            let Some(material) = material_of(node) else {
                continue;
            };
            if !material.visible {
                continue;
            }
            if self.settings.frustum_culling && !in_frustum(node, &frustum) {
                continue;
            }

            let position = node.cached_world_transform().w_axis.truncate();
            let depth = (position - camera_position).dot(forward);

            if matches!(node.kind, NodeKind::Sprite(_)) {
                sprites.push((handle, depth));
            } else if material.transparent {
                transparent.push((handle, depth));
            } else {
                opaque.push((handle, depth));
            }
        }

        if self.settings.sort_opaque {
            opaque.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        if self.settings.sort_transparent {
            transparent.sort_by(|a, b| b.1.total_cmp(&a.1));
            sprites.sort_by(|a, b| b.1.total_cmp(&a.1));
        }

        self.opaque.extend(opaque.into_iter().map(|(h, _)| h));
        self.transparent.extend(transparent.into_iter().map(|(h, _)| h));
        self.sprites.extend(sprites.into_iter().map(|(h, _)| h));
    }
}
