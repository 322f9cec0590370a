use serde::Serialize;

use crate::color::{self, Color};
use crate::model::Component;
use crate::renderer::Renderer;
use crate::scene::{Material, PrimitiveId, Scene, COMPONENT_SPECULAR};

/// Shown in every panel field while nothing is selected.
pub const PLACEHOLDER: &str = "--";

const HIGHLIGHT_PERIOD_MS: u32 = 800;

/// Applied on highlight stop when no original material is recorded.
pub const FALLBACK_MATERIAL: Material = Material {
    color: color::FALLBACK,
    specular_power: COMPONENT_SPECULAR,
};

/// Pulsing overlay composited over a primitive's recorded base material
/// while it is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightPattern {
    pub base: Material,
    pub overlay_from: Color,
    pub overlay_to: Color,
    pub period_ms: u32,
    pub auto_reverse: bool,
}

impl HighlightPattern {
    /// Fully transparent to half-opaque white over 800ms, reversing and
    /// repeating until stopped. Purely cosmetic; `base` stays untouched
    /// underneath the overlay.
    pub fn pulse(base: Material) -> Self {
        Self {
            base,
            overlay_from: Color::argb(0, 255, 255, 255),
            overlay_to: Color::argb(128, 255, 255, 255),
            period_ms: HIGHLIGHT_PERIOD_MS,
            auto_reverse: true,
        }
    }
}

/// Display-ready fields for the component info panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelFields {
    pub location: String,
    pub kind: String,
    pub position: String,
    pub face: String,
    pub kdtec_pn: String,
    pub customer_pn: String,
    pub maker_pn: String,
    pub description: String,
    pub maker_name: String,
    pub process: String,
    pub dimensions: String,
}

impl PanelFields {
    pub fn placeholder() -> Self {
        let p = || PLACEHOLDER.to_string();
        Self {
            location: p(),
            kind: p(),
            position: p(),
            face: p(),
            kdtec_pn: p(),
            customer_pn: p(),
            maker_pn: p(),
            description: p(),
            maker_name: p(),
            process: p(),
            dimensions: p(),
        }
    }

    pub fn from_component(c: &Component) -> Self {
        Self {
            location: c.location.clone(),
            kind: c.kind.clone(),
            position: format!("X={}, Y={}, Z={}, Rotation={}", c.x, c.y, c.z, c.rotation),
            face: c.face.clone(),
            kdtec_pn: c.kdtec_pn.clone(),
            customer_pn: c.customer_pn.clone(),
            maker_pn: c.maker_pn.clone(),
            description: c.description.clone(),
            maker_name: c.maker_name.clone(),
            process: c.process.clone(),
            dimensions: format!(
                "{}x{}x{}",
                c.dimensions.width, c.dimensions.height, c.dimensions.thickness
            ),
        }
    }
}

/// Receives selection metadata for display. The core never renders text.
pub trait InfoPanel {
    fn show(&mut self, fields: &PanelFields);
    /// Reset every field to the placeholder.
    fn clear(&mut self);
}

/// Single-selection state machine: Idle, or Selected(one primitive).
///
/// At most one primitive is highlighted at any time. When the selection
/// switches, the old highlight is stopped (and the original material
/// restored) strictly before the new one starts.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<PrimitiveId>,
}

impl Selection {
    pub fn selected(&self) -> Option<PrimitiveId> {
        self.current
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Handle a pointer event already resolved through the registry filter.
    /// `hit` of None is a miss and clears the selection.
    pub fn on_pick<R, P>(
        &mut self,
        hit: Option<PrimitiveId>,
        scene: &Scene,
        renderer: &mut R,
        panel: &mut P,
    ) where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let Some(id) = hit else {
            self.deselect(scene, renderer, panel);
            return;
        };

        if self.current == Some(id) {
            // Re-pick of the current selection: refresh the panel and leave
            // the running highlight alone.
            if let Some(snapshot) = scene.registry().get(id) {
                panel.show(&PanelFields::from_component(snapshot));
            }
            return;
        }

        let Some(snapshot) = scene.registry().get(id) else {
            // Unregistered ids never reach the machine via resolve_hits.
            self.deselect(scene, renderer, panel);
            return;
        };

        if let Some(previous) = self.current.take() {
            stop_highlight(previous, scene, renderer);
        }

        let base = scene.material_of(id).unwrap_or(FALLBACK_MATERIAL);
        renderer.start_highlight(id, &HighlightPattern::pulse(base));
        panel.show(&PanelFields::from_component(snapshot));
        self.current = Some(id);
        log::debug!("selected {:?} ({})", id, snapshot.location);
    }

    /// Explicit reset, and the miss transition. Stops any running highlight
    /// and clears the panel to placeholders.
    pub fn deselect<R, P>(&mut self, scene: &Scene, renderer: &mut R, panel: &mut P)
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        if let Some(previous) = self.current.take() {
            stop_highlight(previous, scene, renderer);
            log::debug!("selection cleared");
        }
        panel.clear();
    }

    /// Drop the selection without renderer teardown. Used when the whole
    /// scene is about to be cleared anyway.
    pub fn reset<P: InfoPanel + ?Sized>(&mut self, panel: &mut P) {
        self.current = None;
        panel.clear();
    }
}

fn stop_highlight<R: Renderer + ?Sized>(id: PrimitiveId, scene: &Scene, renderer: &mut R) {
    renderer.stop_highlight(id);
    let original = scene.material_of(id).unwrap_or(FALLBACK_MATERIAL);
    renderer.set_material(id, original);
}
