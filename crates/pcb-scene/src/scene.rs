use serde::Serialize;

use crate::color::{self, Color};
use crate::model::{Board, Component};
use crate::registry::Registry;

pub const BOARD_SPECULAR: f64 = 300.0;
pub const COMPONENT_SPECULAR: f64 = 200.0;

const AXIS_LENGTH: f64 = 100.0;
const AXIS_RADIUS: f64 = 1.0;

/// Opaque identity of a primitive in the scene arena.
///
/// Ids are allocated monotonically within a session and never reused, so a
/// removed primitive's id cannot alias a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PrimitiveId(u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Box {
        center: [f64; 3],
        size: [f64; 3],
    },
    Cylinder {
        start: [f64; 3],
        end: [f64; 3],
        radius: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    pub color: Color,
    pub specular_power: f64,
}

/// A renderable shape placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPrimitive {
    pub id: PrimitiveId,
    pub shape: Shape,
    pub material: Material,
    /// Index of the originating component in the board's component list.
    /// None for the board slab and scenery.
    pub component: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Light {
    Ambient { color: Color },
    Directional { color: Color, direction: [f64; 3] },
}

/// Fixed light rig: gray ambient plus two opposed white directionals.
pub fn lights() -> Vec<Light> {
    let white = Color::rgb(0xFF, 0xFF, 0xFF);
    vec![
        Light::Ambient {
            color: Color::rgb(0x80, 0x80, 0x80),
        },
        Light::Directional {
            color: white,
            direction: [-1.0, -1.0, -1.0],
        },
        Light::Directional {
            color: white,
            direction: [1.0, 1.0, 1.0],
        },
    ]
}

/// Bulk positional shift applied during re-layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Offset {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    /// Free-text offset fields. An axis that does not parse as a number
    /// moves by zero.
    pub fn from_text(x: &str, y: &str, z: &str) -> Self {
        fn axis(s: &str) -> f64 {
            s.trim().parse().unwrap_or(0.0)
        }
        Self {
            dx: axis(x),
            dy: axis(y),
            dz: axis(z),
        }
    }
}

/// The built scene: board and component primitives, axis scenery, and the
/// identity -> metadata registry.
///
/// The primitive list always holds exactly one slab plus one box per
/// component; the axis cylinders live in a separate scenery list and never
/// enter the registry.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<RenderPrimitive>,
    scenery: Vec<RenderPrimitive>,
    registry: Registry,
    slab: Option<PrimitiveId>,
    next_id: u64,
}

impl Scene {
    /// Builds the full scene for a board. The input is not mutated; the same
    /// board yields the same primitive set (ids aside).
    pub fn build(board: &Board) -> Self {
        let mut scene = Scene::default();
        scene.add_axes();

        let dims = board.dimensions;
        let slab_id = scene.alloc();
        scene.primitives.push(RenderPrimitive {
            id: slab_id,
            shape: Shape::Box {
                center: [dims.width / 2.0, dims.height / 2.0, dims.thickness / 2.0],
                size: [dims.width, dims.height, dims.thickness],
            },
            material: Material {
                color: color::BOARD,
                specular_power: BOARD_SPECULAR,
            },
            component: None,
        });
        scene.slab = Some(slab_id);

        for (index, component) in board.components.iter().enumerate() {
            scene.add_component(index, component, Offset::default());
        }

        log::debug!(
            "built scene for '{}': {} primitives, {} registered",
            board.name,
            scene.primitives.len(),
            scene.registry.len()
        );
        scene
    }

    /// Regenerates component primitives at shifted positions.
    ///
    /// Exactly the primitives with registry entries are removed; the slab and
    /// scenery keep their identities. New registry snapshots carry the
    /// offset-adjusted coordinates. Returns the removed ids so the renderer
    /// can drop them.
    pub fn apply_offset(&mut self, components: &[Component], offset: Offset) -> Vec<PrimitiveId> {
        let registry = &self.registry;
        let removed: Vec<PrimitiveId> = self
            .primitives
            .iter()
            .map(|p| p.id)
            .filter(|id| registry.contains(*id))
            .collect();
        self.primitives.retain(|p| !registry.contains(p.id));
        self.registry.clear();

        for (index, component) in components.iter().enumerate() {
            self.add_component(index, component, offset);
        }

        log::info!(
            "re-layout: {} component primitives rebuilt at offset ({}, {}, {})",
            components.len(),
            offset.dx,
            offset.dy,
            offset.dz
        );
        removed
    }

    pub fn primitives(&self) -> &[RenderPrimitive] {
        &self.primitives
    }

    pub fn scenery(&self) -> &[RenderPrimitive] {
        &self.scenery
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn slab_id(&self) -> Option<PrimitiveId> {
        self.slab
    }

    /// Primitives that have a registry entry, i.e. the selectable ones.
    pub fn component_primitives(&self) -> impl Iterator<Item = &RenderPrimitive> {
        self.primitives
            .iter()
            .filter(|p| self.registry.contains(p.id))
    }

    /// Original material recorded for a primitive at build time.
    pub fn material_of(&self, id: PrimitiveId) -> Option<Material> {
        self.primitives
            .iter()
            .chain(self.scenery.iter())
            .find(|p| p.id == id)
            .map(|p| p.material)
    }

    fn alloc(&mut self) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        id
    }

    fn add_component(&mut self, index: usize, component: &Component, offset: Offset) {
        let id = self.alloc();

        let mut snapshot = component.clone();
        snapshot.x += offset.dx;
        snapshot.y += offset.dy;
        snapshot.z += offset.dz;

        let d = snapshot.dimensions;
        self.primitives.push(RenderPrimitive {
            id,
            shape: Shape::Box {
                center: [snapshot.x, snapshot.y, component.face_sign() * snapshot.z],
                size: [d.width, d.height, d.thickness],
            },
            material: Material {
                color: color::color_for_kind(&component.kind),
                specular_power: COMPONENT_SPECULAR,
            },
            component: Some(index),
        });
        self.registry.insert(id, snapshot);
    }

    fn add_axes(&mut self) {
        let axes = [
            ([AXIS_LENGTH, 0.0, 0.0], color::AXIS_X),
            ([0.0, AXIS_LENGTH, 0.0], color::AXIS_Y),
            ([0.0, 0.0, AXIS_LENGTH], color::AXIS_Z),
        ];
        for (end, axis_color) in axes {
            let id = self.alloc();
            self.scenery.push(RenderPrimitive {
                id,
                shape: Shape::Cylinder {
                    start: [0.0, 0.0, 0.0],
                    end,
                    radius: AXIS_RADIUS,
                },
                material: Material {
                    color: axis_color,
                    specular_power: COMPONENT_SPECULAR,
                },
                component: None,
            });
        }
    }
}
