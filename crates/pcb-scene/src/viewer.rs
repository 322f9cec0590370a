use crate::camera;
use crate::error::SceneError;
use crate::model::Board;
use crate::pick;
use crate::renderer::Renderer;
use crate::scene::{self, Offset, Scene};
use crate::select::{InfoPanel, Selection};

/// Interactive scene session.
///
/// Owns the loaded board, the built scene, and the selection, and turns
/// discrete external events (document loaded, pointer clicked, offset
/// submitted) into renderer commands. Everything runs synchronously on the
/// caller's event thread; the only ongoing activity is the highlight
/// animation, which the renderer drives.
#[derive(Debug, Default)]
pub struct Viewer {
    board: Option<Board>,
    scene: Scene,
    selection: Selection,
}

impl Viewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Parse and load a JSON board document.
    ///
    /// The document is parsed in full before any state changes, so a
    /// malformed document returns the failure and leaves the previous scene
    /// displayed.
    pub fn load_json<R, P>(
        &mut self,
        text: &str,
        renderer: &mut R,
        panel: &mut P,
    ) -> Result<(), SceneError>
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let board: Board = serde_json::from_str(text)?;
        self.load_board(board, renderer, panel);
        Ok(())
    }

    /// Replace the current scene with one built from `board`.
    ///
    /// Resets the selection, repopulates the renderer (lights, axes, slab,
    /// components), and frames the camera: analytic seed pose first, then the
    /// renderer's fit-to-extents, which is authoritative.
    pub fn load_board<R, P>(&mut self, board: Board, renderer: &mut R, panel: &mut P)
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let scene = Scene::build(&board);
        self.selection.reset(panel);

        renderer.clear();
        for light in scene::lights() {
            renderer.add_light(&light);
        }
        for primitive in scene.scenery() {
            renderer.add_primitive(primitive);
        }
        for primitive in scene.primitives() {
            renderer.add_primitive(primitive);
        }
        renderer.set_camera(&camera::frame_board(&board.dimensions));
        renderer.zoom_to_extents();

        log::info!(
            "loaded board '{}': {} components, {} primitives",
            board.name,
            board.components.len(),
            scene.primitives().len()
        );
        self.scene = scene;
        self.board = Some(board);
    }

    /// Resolve a pointer position to a component and drive the selection.
    pub fn pointer_click<R, P>(&mut self, x: f64, y: f64, renderer: &mut R, panel: &mut P)
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let hit = pick::resolve_hits(renderer.hit_test(x, y), self.scene.registry());
        self.selection.on_pick(hit, &self.scene, renderer, panel);
    }

    /// Explicitly clear the selection (highlight stopped, panel placeholders).
    pub fn reset_selection<R, P>(&mut self, renderer: &mut R, panel: &mut P)
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        self.selection.deselect(&self.scene, renderer, panel);
    }

    /// Re-layout every component primitive at its position plus `offset`.
    ///
    /// Component identities change, so the selection drops to Idle before
    /// any primitive is replaced; the slab and scenery stay put. A no-op
    /// until a board is loaded.
    pub fn apply_offset<R, P>(&mut self, offset: Offset, renderer: &mut R, panel: &mut P)
    where
        R: Renderer + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let Some(board) = &self.board else { return };

        self.selection.deselect(&self.scene, renderer, panel);
        let removed = self.scene.apply_offset(&board.components, offset);
        for id in removed {
            renderer.remove_primitive(id);
        }
        for primitive in self.scene.component_primitives() {
            renderer.add_primitive(primitive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;
    use crate::renderer::testing::{Command, RecordingRenderer};
    use crate::select::PanelFields;
    use approx::assert_relative_eq;

    #[derive(Debug, Default)]
    struct TestPanel {
        shown: Vec<PanelFields>,
    }

    impl InfoPanel for TestPanel {
        fn show(&mut self, fields: &PanelFields) {
            self.shown.push(fields.clone());
        }

        fn clear(&mut self) {
            self.shown.push(PanelFields::placeholder());
        }
    }

    const DOC: &str = r#"{
        "name": "e2e",
        "dimensions": {"width": 50.0, "height": 30.0, "thickness": 1.0},
        "components": [{
            "location": "C1",
            "type": "Capacitor",
            "x": 10.0, "y": 10.0, "z": 0.5,
            "rotation": 0,
            "face": "Top",
            "dimensions": {"width": 1.0, "height": 1.0, "thickness": 1.0}
        }]
    }"#;

    fn loaded() -> (Viewer, RecordingRenderer, TestPanel) {
        let mut viewer = Viewer::new();
        let mut renderer = RecordingRenderer::new();
        let mut panel = TestPanel::default();
        viewer.load_json(DOC, &mut renderer, &mut panel).unwrap();
        (viewer, renderer, panel)
    }

    #[test]
    fn test_load_builds_scene_and_frames_camera() {
        let (viewer, renderer, _panel) = loaded();

        // Slab plus one component.
        assert_eq!(viewer.scene().primitives().len(), 2);
        let c1 = &viewer.scene().primitives()[1];
        assert_eq!(c1.material.color, color::color_for_kind("Capacitor"));
        let snapshot = viewer.scene().registry().get(c1.id).unwrap();
        assert_eq!(snapshot.location, "C1");
        assert_relative_eq!(snapshot.z, 0.5);

        // Renderer was cleared, lit, populated, then framed.
        assert_eq!(renderer.commands[0], Command::Clear);
        let lights = renderer
            .commands
            .iter()
            .filter(|c| matches!(c, Command::AddLight))
            .count();
        assert_eq!(lights, 3);
        let adds = renderer
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Add(_)))
            .count();
        assert_eq!(adds, 5); // 3 axes + slab + C1

        let camera_at = renderer
            .commands
            .iter()
            .position(|c| matches!(c, Command::SetCamera(_)))
            .unwrap();
        let zoom_at = renderer.position_of(&Command::ZoomToExtents).unwrap();
        assert!(camera_at < zoom_at);
        if let Command::SetCamera(pose) = &renderer.commands[camera_at] {
            assert_relative_eq!(pose.look[2], -100.0); // max(50, 30) * 2
        }
    }

    #[test]
    fn test_malformed_document_leaves_scene_untouched() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let ids: Vec<_> = viewer.scene().primitives().iter().map(|p| p.id).collect();
        renderer.clear_log();

        let result = viewer.load_json("{ not json", &mut renderer, &mut panel);

        assert!(matches!(result, Err(SceneError::Json(_))));
        let after: Vec<_> = viewer.scene().primitives().iter().map(|p| p.id).collect();
        assert_eq!(after, ids);
        assert!(renderer.commands.is_empty());
    }

    #[test]
    fn test_click_selects_and_miss_clears() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let c1 = viewer.scene().primitives()[1].id;

        renderer.next_hits = vec![c1];
        viewer.pointer_click(120.0, 80.0, &mut renderer, &mut panel);
        assert_eq!(viewer.selection().selected(), Some(c1));
        assert_eq!(panel.shown.last().unwrap().location, "C1");

        renderer.next_hits = vec![];
        viewer.pointer_click(5.0, 5.0, &mut renderer, &mut panel);
        assert!(viewer.selection().is_idle());
        assert_eq!(panel.shown.last().unwrap(), &PanelFields::placeholder());
    }

    #[test]
    fn test_click_through_scenery_selects_component_behind() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let axis = viewer.scene().scenery()[0].id;
        let slab = viewer.scene().slab_id().unwrap();
        let c1 = viewer.scene().primitives()[1].id;

        renderer.next_hits = vec![axis, c1, slab];
        viewer.pointer_click(0.0, 0.0, &mut renderer, &mut panel);
        assert_eq!(viewer.selection().selected(), Some(c1));
    }

    #[test]
    fn test_slab_only_hit_is_a_miss() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let slab = viewer.scene().slab_id().unwrap();
        let c1 = viewer.scene().primitives()[1].id;

        renderer.next_hits = vec![c1];
        viewer.pointer_click(0.0, 0.0, &mut renderer, &mut panel);
        renderer.next_hits = vec![slab];
        viewer.pointer_click(0.0, 0.0, &mut renderer, &mut panel);

        assert!(viewer.selection().is_idle());
    }

    #[test]
    fn test_offset_resets_selection_and_swaps_primitives() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let slab = viewer.scene().slab_id().unwrap();
        let old_c1 = viewer.scene().primitives()[1].id;

        renderer.next_hits = vec![old_c1];
        viewer.pointer_click(0.0, 0.0, &mut renderer, &mut panel);
        renderer.clear_log();

        viewer.apply_offset(Offset::new(2.0, 0.0, 0.0), &mut renderer, &mut panel);

        assert!(viewer.selection().is_idle());
        assert_eq!(viewer.scene().slab_id(), Some(slab));
        assert_eq!(viewer.scene().registry().len(), 1);
        assert_eq!(panel.shown.last().unwrap(), &PanelFields::placeholder());

        // Highlight teardown happens before the primitive is replaced.
        let stop_at = renderer.position_of(&Command::StopHighlight(old_c1)).unwrap();
        let remove_at = renderer.position_of(&Command::Remove(old_c1)).unwrap();
        assert!(stop_at < remove_at);

        let new_c1 = viewer.scene().primitives()[1].id;
        assert_ne!(new_c1, old_c1);
        assert!(renderer.commands.contains(&Command::Add(new_c1)));
        let snapshot = viewer.scene().registry().get(new_c1).unwrap();
        assert_relative_eq!(snapshot.x, 12.0);
    }

    #[test]
    fn test_offset_without_board_is_a_no_op() {
        let mut viewer = Viewer::new();
        let mut renderer = RecordingRenderer::new();
        let mut panel = TestPanel::default();

        viewer.apply_offset(Offset::new(1.0, 1.0, 1.0), &mut renderer, &mut panel);

        assert!(renderer.commands.is_empty());
        assert!(panel.shown.is_empty());
    }

    #[test]
    fn test_reload_resets_selection() {
        let (mut viewer, mut renderer, mut panel) = loaded();
        let c1 = viewer.scene().primitives()[1].id;
        renderer.next_hits = vec![c1];
        viewer.pointer_click(0.0, 0.0, &mut renderer, &mut panel);

        viewer.load_json(DOC, &mut renderer, &mut panel).unwrap();

        assert!(viewer.selection().is_idle());
        assert_eq!(panel.shown.last().unwrap(), &PanelFields::placeholder());
    }
}
