use crate::camera::CameraPose;
use crate::scene::{Light, Material, PrimitiveId, RenderPrimitive};
use crate::select::HighlightPattern;

/// The injected 3D rendering capability.
///
/// The core issues primitive, material, light, and camera commands and asks
/// ray-pick queries; it never draws anything itself. The highlight animation
/// runs on the renderer's clock — the core only starts and stops it.
pub trait Renderer {
    fn add_primitive(&mut self, primitive: &RenderPrimitive);
    fn remove_primitive(&mut self, id: PrimitiveId);
    /// Remove every primitive and light.
    fn clear(&mut self);
    fn set_material(&mut self, id: PrimitiveId, material: Material);
    fn add_light(&mut self, light: &Light);
    fn set_camera(&mut self, pose: &CameraPose);
    /// Adjust the camera so all current geometry is visible. Authoritative
    /// over any analytic pose set beforehand.
    fn zoom_to_extents(&mut self);
    /// Primitives crossed by the pick ray at the given pointer position,
    /// nearest first. Tie-breaking among equidistant hits is the renderer's
    /// business.
    fn hit_test(&self, x: f64, y: f64) -> Vec<PrimitiveId>;
    fn start_highlight(&mut self, id: PrimitiveId, pattern: &HighlightPattern);
    fn stop_highlight(&mut self, id: PrimitiveId);
}
