//! Application state for a visualizer session
//!
//! [`App`] owns everything a user interacts with: the tree, its undo history,
//! the traversal playback, the viewport and the theme. Every user action is a
//! method; the caller drives time through [`App::tick`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use bst_canvas::{
    highlight, rasterize, save_png, NodeHighlight, Scene, ThemeMode, TreeLayout, Viewport,
};
use bst_tree::{
    AnimationOptions, Bst, History, InsertOutcome, RunId, Speed, TraversalEvent,
    TraversalOrder, TraversalRun, TraversalState,
};
use kurbo::{Size, Vec2};
use log::{debug, info, trace};
use rand::Rng;

use crate::config::VisualizerConfig;
use crate::export;
use crate::input::parse_value;
use crate::random;

/// State of one visualizer session
pub struct App {
    /// Settings the session was created with
    config: VisualizerConfig,

    /// The tree on display
    tree: Bst,

    /// Snapshots taken after each mutation
    history: History<Bst>,

    /// Pan/zoom over the diagram
    viewport: Viewport,

    /// Current appearance
    theme: ThemeMode,

    /// Playback speed multiplier
    speed: Speed,

    /// The traversal being played back, if any
    run: Option<TraversalRun>,

    /// Highlight state on display; outlives the run that produced it
    traversal: TraversalState,

    /// Identifier given to the next run
    next_run: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(VisualizerConfig::default())
    }
}

impl App {
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            tree: Bst::new(),
            history: History::new(),
            viewport: Viewport::new(config.viewport.clone()),
            theme: config.theme,
            speed: config.animation.speed,
            run: None,
            traversal: TraversalState::new(),
            next_run: 1,
            config,
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn tree(&self) -> &Bst {
        &self.tree
    }

    pub fn history(&self) -> &History<Bst> {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access for drag gestures
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Highlight state currently on display
    pub fn traversal_state(&self) -> &TraversalState {
        &self.traversal
    }

    /// The traversal still playing back, if any
    pub fn active_run(&self) -> Option<&TraversalRun> {
        self.run.as_ref()
    }

    pub fn is_traversing(&self) -> bool {
        self.run.is_some()
    }

    // Tree mutations

    /// Insert the value typed by the user.
    ///
    /// Input without a leading integer is dropped and `None` is returned.
    pub fn insert_input(&mut self, input: &str) -> Option<InsertOutcome> {
        let Some(value) = parse_value(input) else {
            debug!("Ignoring non-numeric input {input:?}");
            return None;
        };
        Some(self.insert_value(value))
    }

    /// Insert `value` and record the new tree in the history.
    ///
    /// A duplicate leaves the tree, the history and any running traversal
    /// untouched.
    pub fn insert_value(&mut self, value: i64) -> InsertOutcome {
        let outcome = self.tree.insert(value);
        match outcome {
            InsertOutcome::Inserted => {
                info!("Inserted {value}, {} nodes", self.tree.len());
                self.cancel_traversal();
                self.history.commit(self.tree.clone());
            }
            InsertOutcome::Duplicate => debug!("Ignoring duplicate {value}"),
        }
        outcome
    }

    /// Replace the tree with a random one and record it in the history
    pub fn random_tree<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Bst {
        self.cancel_traversal();
        self.tree = random::random_tree(rng);
        info!("Generated random tree with {} nodes", self.tree.len());
        self.history.commit(self.tree.clone());
        &self.tree
    }

    /// Go back one snapshot. Returns false at the start of the history.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            trace!("Nothing to undo");
            return false;
        };
        self.cancel_traversal();
        self.tree = snapshot;
        true
    }

    /// Go forward one snapshot. Returns false at the end of the history.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            trace!("Nothing to redo");
            return false;
        };
        self.cancel_traversal();
        self.tree = snapshot;
        true
    }

    // Traversal playback

    fn step_delay(&self) -> Duration {
        AnimationOptions {
            speed: self.speed,
            ..self.config.animation
        }
        .step_delay()
    }

    /// Start playing back a traversal of the current tree.
    ///
    /// Any run in flight is cancelled and the highlight cleared first. The
    /// first node is recorded right away; on an empty tree the run finishes
    /// immediately.
    pub fn start_traversal(&mut self, order: TraversalOrder) -> RunId {
        self.cancel_traversal();

        let id = RunId(self.next_run);
        self.next_run += 1;
        info!("Starting {order} traversal ({id})");

        self.run = Some(TraversalRun::new(id, &self.tree, order, self.step_delay()));
        self.tick(Duration::ZERO);
        id
    }

    /// Let `dt` pass on the traversal clock
    pub fn tick(&mut self, dt: Duration) -> Vec<TraversalEvent> {
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let events = run.advance(dt);
        self.sync_run();
        events
    }

    /// Record the next node without waiting
    pub fn step_traversal(&mut self) -> Option<TraversalEvent> {
        let event = self.run.as_mut()?.step();
        self.sync_run();
        event
    }

    /// Record every remaining node and finish
    pub fn finish_traversal(&mut self) -> Vec<TraversalEvent> {
        let Some(run) = self.run.as_mut() else {
            return Vec::new();
        };
        let events = run.finish();
        self.sync_run();
        events
    }

    /// Stop any running traversal and clear the highlight
    pub fn cancel_traversal(&mut self) -> Option<TraversalEvent> {
        let event = self.run.take().and_then(|mut run| run.cancel());
        self.traversal.reset();
        event
    }

    // Copy the run's state for display and drop it once done
    fn sync_run(&mut self) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        self.traversal.clone_from(run.state());
        if run.is_done() {
            self.run = None;
        }
    }

    /// Change the playback speed, clamped to [`Speed::MIN`]..=[`Speed::MAX`].
    ///
    /// A running traversal uses the new delay after its next step; the pause
    /// already under way keeps its length.
    pub fn set_speed(&mut self, multiplier: f64) -> Speed {
        self.speed = Speed::new(multiplier);
        let delay = self.step_delay();
        if let Some(run) = self.run.as_mut() {
            run.set_delay(delay);
        }
        debug!("Speed set to {}x", self.speed.get());
        self.speed
    }

    // View

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme.toggle();
        debug!("Theme switched to {}", self.theme);
        self.theme
    }

    /// Pan by a pointer movement of `delta` pixels over a `rendered` surface
    pub fn pan(&mut self, delta: Vec2, rendered: Size) {
        self.viewport.pan(delta, rendered);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset_view();
    }

    /// Positions for the current tree
    pub fn layout(&self) -> TreeLayout {
        TreeLayout::compute(&self.tree, &self.config.layout)
    }

    /// Highlight of the node holding `value`
    pub fn node_highlight(&self, value: i64) -> NodeHighlight {
        highlight(&self.traversal, value)
    }

    /// Everything to draw for the current frame
    pub fn scene(&self) -> Scene {
        Scene::with_traversal(&self.layout(), &self.theme.palette(), &self.traversal)
    }

    // Export

    /// The tree as pretty-printed JSON, `None` when empty
    pub fn export_json(&self) -> Result<Option<String>> {
        export::tree_json(&self.tree)
    }

    /// The diagram as seen through the viewport, as SVG. `None` when empty.
    pub fn export_svg(&self) -> Option<String> {
        let scene = self.scene();
        if scene.is_empty() {
            return None;
        }
        let size = Size::new(
            f64::from(self.config.export.png_width),
            f64::from(self.config.export.png_height),
        );
        Some(scene.to_svg(&self.viewport.view_box(), size))
    }

    /// The diagram as seen through the viewport, as PNG. `None` when empty.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>> {
        export::scene_png(&self.scene(), &self.viewport.view_box(), &self.config.export)
    }

    /// Write the JSON export into `dir`
    pub fn save_json(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let Some(json) = self.export_json()? else {
            info!("Tree is empty, nothing to export");
            return Ok(None);
        };
        let path = export::write_export(dir, &self.config.export.json_file_name, json.as_bytes())?;
        Ok(Some(path))
    }

    /// Write the PNG export into `dir`
    pub fn save_png(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let scene = self.scene();
        if scene.is_empty() {
            info!("Tree is empty, nothing to export");
            return Ok(None);
        }
        let options = &self.config.export;
        let image = rasterize(
            &scene,
            &self.viewport.view_box(),
            options.png_width,
            options.png_height,
        );
        let path = dir.join(&options.png_file_name);
        save_png(&image, &path)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_ignored() {
        let mut app = App::default();
        assert_eq!(app.insert_input("abc"), None);
        assert!(app.tree().is_empty());
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_duplicate_does_not_commit() {
        let mut app = App::default();
        app.insert_value(5);
        assert_eq!(app.insert_value(5), InsertOutcome::Duplicate);
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_cancel_without_run() {
        let mut app = App::default();
        assert_eq!(app.cancel_traversal(), None);
        assert!(!app.is_traversing());
    }
}
