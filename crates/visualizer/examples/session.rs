// Scripted visualizer session
//
// Usage: cargo run -p bst-visualizer --example session [OUT_DIR] [CONFIG]
//
// Builds a tree, plays back each traversal, exercises undo/redo and the view
// controls, then writes the JSON and PNG exports into OUT_DIR (default: the
// current directory). Set RUST_LOG=debug to follow the state transitions.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use bst_tree::{TraversalEvent, TraversalOrder};
use bst_visualizer::{App, VisualizerConfig};
use kurbo::{Size, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let out_dir = args.get(1).map_or_else(|| PathBuf::from("."), PathBuf::from);
    let config = match args.get(2) {
        Some(path) => VisualizerConfig::load(Path::new(path))?,
        None => VisualizerConfig::default(),
    };

    let mut app = App::new(config);
    for input in ["50", "30", "70", "20", "40", "60", "80", "40", "oops"] {
        match app.insert_input(input) {
            Some(outcome) => println!("insert {input:>4}: {outcome:?}"),
            None => println!("insert {input:>4}: ignored"),
        }
    }

    for order in TraversalOrder::ALL {
        app.start_traversal(order);
        let mut elapsed = Duration::ZERO;
        while app.is_traversing() {
            elapsed += FRAME;
            for event in app.tick(FRAME) {
                if let TraversalEvent::Visited { value, index } = event {
                    println!("  {order} #{index}: {value} at {elapsed:?}");
                }
            }
        }
        println!("{order}: {:?}", app.traversal_state().results);
    }

    app.undo();
    app.undo();
    println!("after two undos: {} nodes", app.tree().len());
    app.redo();
    println!("after redo: {} nodes", app.tree().len());

    // Seeded so repeated runs export the same tree
    let mut rng = StdRng::seed_from_u64(42);
    app.random_tree(&mut rng);
    println!("random tree: {} nodes, height {}", app.tree().len(), app.tree().height());

    app.set_speed(0.5);
    app.start_traversal(TraversalOrder::Inorder);
    app.finish_traversal();
    println!("inorder: {:?}", app.traversal_state().results);

    app.toggle_theme();
    app.zoom_in();
    app.pan(Vec2::new(-40.0, 0.0), Size::new(800.0, 600.0));

    if let Some(path) = app.save_json(&out_dir)? {
        println!("wrote {}", path.display());
    }
    if let Some(path) = app.save_png(&out_dir)? {
        println!("wrote {}", path.display());
    }
    Ok(())
}
