//! Depth-first traversals and their paced, cancellable playback
//!
//! A traversal is split in two parts:
//!
//! - [`Traversal`] walks a tree with an explicit stack and yields nodes in
//!   inorder, preorder or postorder.
//! - [`TraversalRun`] captures that visit order from a snapshot and replays it
//!   one node per step delay on a caller-driven clock, maintaining the
//!   [`TraversalState`] shown to the user.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use derive_more::Display;
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{Bst, TreeNode};

/// Depth-first traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree
    #[display(fmt = "inorder")]
    Inorder,

    /// Node, left subtree, right subtree
    #[display(fmt = "preorder")]
    Preorder,

    /// Left subtree, right subtree, node
    #[display(fmt = "postorder")]
    Postorder,
}

impl TraversalOrder {
    /// All orders, in the order they are usually presented
    pub const ALL: [TraversalOrder; 3] = [
        TraversalOrder::Inorder,
        TraversalOrder::Preorder,
        TraversalOrder::Postorder,
    ];
}

impl FromStr for TraversalOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inorder" | "in" => Ok(TraversalOrder::Inorder),
            "preorder" | "pre" => Ok(TraversalOrder::Preorder),
            "postorder" | "post" => Ok(TraversalOrder::Postorder),
            other => Err(anyhow!("unknown traversal order: {other:?}")),
        }
    }
}

enum Frame<'a> {
    /// Expand this subtree according to the traversal order
    Enter(&'a TreeNode),
    /// Yield this node
    Emit(&'a TreeNode),
}

/// Iterator over the nodes of a tree in a depth-first order
pub struct Traversal<'a> {
    order: TraversalOrder,
    stack: Vec<Frame<'a>>,
}

impl<'a> Traversal<'a> {
    /// Start a traversal at `root`
    pub fn new(root: Option<&'a TreeNode>, order: TraversalOrder) -> Self {
        Self {
            order,
            stack: root.map(Frame::Enter).into_iter().collect(),
        }
    }

    /// Traverse a whole tree
    pub fn of(tree: &'a Bst, order: TraversalOrder) -> Self {
        Self::new(tree.root(), order)
    }

    /// The order this traversal follows
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    fn push_child(&mut self, child: Option<&'a TreeNode>) {
        if let Some(child) = child {
            self.stack.push(Frame::Enter(child));
        }
    }
}

impl<'a> Iterator for Traversal<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            let node = match frame {
                Frame::Emit(node) => return Some(node),
                Frame::Enter(node) => node,
            };

            // Pushed in reverse so they pop in visit order
            match self.order {
                TraversalOrder::Inorder => {
                    self.push_child(node.right.as_deref());
                    self.stack.push(Frame::Emit(node));
                    self.push_child(node.left.as_deref());
                }
                TraversalOrder::Preorder => {
                    self.push_child(node.right.as_deref());
                    self.push_child(node.left.as_deref());
                    self.stack.push(Frame::Emit(node));
                }
                TraversalOrder::Postorder => {
                    self.stack.push(Frame::Emit(node));
                    self.push_child(node.right.as_deref());
                    self.push_child(node.left.as_deref());
                }
            }
        }
        None
    }
}

/// Collect the values of `tree` in the given order
pub fn visit_order(tree: &Bst, order: TraversalOrder) -> Vec<i64> {
    Traversal::of(tree, order).map(|n| n.value).collect()
}

/// Highlight state shown while a traversal plays back.
///
/// Reset to empty whenever a new traversal starts. After a run completes the
/// visited set and results stay in place with no current node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraversalState {
    /// Value of the node being visited right now
    pub current: Option<i64>,

    /// Values visited so far
    pub visited: BTreeSet<i64>,

    /// Values in the order they were visited
    pub results: Vec<i64>,
}

impl TraversalState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything
    pub fn reset(&mut self) {
        self.current = None;
        self.visited.clear();
        self.results.clear();
    }

    /// Mark `value` as the current node and append it to the results
    pub fn record(&mut self, value: i64) {
        self.current = Some(value);
        self.visited.insert(value);
        self.results.push(value);
    }

    /// Returns true if `value` is the node under visit
    pub fn is_current(&self, value: i64) -> bool {
        self.current == Some(value)
    }

    /// Returns true if `value` has been visited
    pub fn is_visited(&self, value: i64) -> bool {
        self.visited.contains(&value)
    }
}

/// Lifecycle of a traversal run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TraversalStatus {
    /// Created but no node recorded yet
    #[display(fmt = "Idle")]
    Idle,

    /// Recording nodes
    #[display(fmt = "Visiting")]
    Visiting,

    /// All nodes recorded and the final delay elapsed, or cancelled
    #[display(fmt = "Done")]
    Done,
}

/// Playback speed multiplier applied to the base step delay.
///
/// Always within [`Speed::MIN`]..=[`Speed::MAX`]. Larger values mean a longer
/// pause between nodes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "f64", into = "f64"))]
pub struct Speed(f64);

impl Speed {
    /// Lowest accepted multiplier
    pub const MIN: f64 = 0.5;
    /// Highest accepted multiplier
    pub const MAX: f64 = 2.0;

    /// Create a speed, clamping into the accepted range.
    ///
    /// NaN falls back to 1.0.
    pub fn new(multiplier: f64) -> Self {
        if multiplier.is_nan() {
            return Self::default();
        }
        Self(multiplier.clamp(Self::MIN, Self::MAX))
    }

    /// The multiplier
    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f64> for Speed {
    fn from(multiplier: f64) -> Self {
        Self::new(multiplier)
    }
}

impl From<Speed> for f64 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

/// Pacing of traversal playback
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationOptions {
    /// Pause after each recorded node at speed 1.0, in milliseconds
    pub base_delay_ms: u64,

    /// Multiplier applied to `base_delay_ms`
    pub speed: Speed,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            base_delay_ms: 500,
            speed: Speed::default(),
        }
    }
}

impl AnimationOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base delay
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the speed multiplier
    pub fn speed(mut self, speed: impl Into<Speed>) -> Self {
        self.speed = speed.into();
        self
    }

    /// Delay between two recorded nodes
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms).mul_f64(self.speed.get())
    }
}

/// Something that happened while advancing a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalEvent {
    /// A node was recorded; `index` is its position in the results
    Visited {
        /// The recorded value
        value: i64,
        /// Zero-based position in the visit order
        index: usize,
    },

    /// The final delay elapsed and the current node was cleared
    Finished,

    /// The run was stopped before finishing
    Cancelled,
}

/// Identifier distinguishing successive runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "run#{}", _0)]
pub struct RunId(pub u64);

/// A traversal being played back one node per step delay.
///
/// The visit order is captured when the run is created, so later edits to the
/// tree never change what an in-flight run records. The run does not own a
/// timer: callers feed elapsed time through [`TraversalRun::advance`].
///
/// Each step schedules the next one a full delay later, using the delay in
/// effect at that moment. A pause already under way keeps its length when
/// the delay changes.
#[derive(Debug, Clone)]
pub struct TraversalRun {
    id: RunId,
    order: TraversalOrder,
    plan: Vec<i64>,
    next: usize,
    delay: Duration,
    elapsed: Duration,
    due: Duration,
    status: TraversalStatus,
    state: TraversalState,
}

impl TraversalRun {
    /// Capture the visit order of `tree` and prepare a run
    pub fn new(id: RunId, tree: &Bst, order: TraversalOrder, delay: Duration) -> Self {
        let plan = visit_order(tree, order);
        debug!(
            "{id}: {order} traversal over {} nodes, step {delay:?}",
            plan.len()
        );
        Self {
            id,
            order,
            plan,
            next: 0,
            delay,
            elapsed: Duration::ZERO,
            due: Duration::ZERO,
            status: TraversalStatus::Idle,
            state: TraversalState::new(),
        }
    }

    /// This run's identifier
    pub fn id(&self) -> RunId {
        self.id
    }

    /// The traversal order
    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Current lifecycle status
    pub fn status(&self) -> TraversalStatus {
        self.status
    }

    /// Returns true once the run has finished or been cancelled
    pub fn is_done(&self) -> bool {
        self.status == TraversalStatus::Done
    }

    /// Highlight state produced so far
    pub fn state(&self) -> &TraversalState {
        &self.state
    }

    /// The full visit order captured at creation
    pub fn plan(&self) -> &[i64] {
        &self.plan
    }

    /// Delay between recorded nodes
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the delay scheduled after each following step
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Perform the next step regardless of the clock.
    ///
    /// The step after it comes due one delay from now.
    pub fn step(&mut self) -> Option<TraversalEvent> {
        self.step_at(self.elapsed)
    }

    fn step_at(&mut self, at: Duration) -> Option<TraversalEvent> {
        if self.is_done() {
            return None;
        }
        self.due = at + self.delay;

        match self.plan.get(self.next).copied() {
            Some(value) => {
                let index = self.next;
                self.status = TraversalStatus::Visiting;
                self.state.record(value);
                self.next += 1;
                trace!("{}: visit {value} (#{index})", self.id);
                Some(TraversalEvent::Visited { value, index })
            }
            None => {
                self.state.current = None;
                self.status = TraversalStatus::Done;
                debug!("{}: {} traversal finished", self.id, self.order);
                Some(TraversalEvent::Finished)
            }
        }
    }

    /// Let `dt` pass and perform every step that came due.
    ///
    /// With a constant delay, node `k` is recorded at `k * delay` and the
    /// run finishes at `plan.len() * delay`, one full delay after the last
    /// node.
    pub fn advance(&mut self, dt: Duration) -> Vec<TraversalEvent> {
        let mut events = Vec::new();
        if self.is_done() {
            return events;
        }

        self.elapsed += dt;
        while !self.is_done() && self.elapsed >= self.due {
            events.extend(self.step_at(self.due));
        }
        events
    }

    /// Time left until the next step, `None` once done
    pub fn time_to_next_step(&self) -> Option<Duration> {
        if self.is_done() {
            return None;
        }
        Some(self.due.saturating_sub(self.elapsed))
    }

    /// Record every remaining node and finish immediately
    pub fn finish(&mut self) -> Vec<TraversalEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.step() {
            events.push(event);
        }
        events
    }

    /// Stop the run, clearing the current node
    pub fn cancel(&mut self) -> Option<TraversalEvent> {
        if self.is_done() {
            return None;
        }
        self.state.current = None;
        self.status = TraversalStatus::Done;
        debug!(
            "{}: cancelled after {} of {} nodes",
            self.id,
            self.next,
            self.plan.len()
        );
        Some(TraversalEvent::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bst {
        Bst::from_values([5, 3, 8, 1, 4])
    }

    #[test]
    fn test_orders() {
        let tree = sample();
        assert_eq!(
            visit_order(&tree, TraversalOrder::Inorder),
            vec![1, 3, 4, 5, 8]
        );
        assert_eq!(
            visit_order(&tree, TraversalOrder::Preorder),
            vec![5, 3, 1, 4, 8]
        );
        assert_eq!(
            visit_order(&tree, TraversalOrder::Postorder),
            vec![1, 4, 3, 8, 5]
        );
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree = Bst::new();
        for order in TraversalOrder::ALL {
            assert_eq!(Traversal::of(&tree, order).count(), 0);
        }
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!(
            "Inorder".parse::<TraversalOrder>().unwrap(),
            TraversalOrder::Inorder
        );
        assert_eq!(
            "post".parse::<TraversalOrder>().unwrap(),
            TraversalOrder::Postorder
        );
        assert!("levelorder".parse::<TraversalOrder>().is_err());
        assert_eq!(TraversalOrder::Preorder.to_string(), "preorder");
    }

    #[test]
    fn test_speed_clamping() {
        assert_eq!(Speed::new(3.0).get(), 2.0);
        assert_eq!(Speed::new(0.1).get(), 0.5);
        assert_eq!(Speed::new(f64::NAN).get(), 1.0);
    }

    #[test]
    fn test_step_delay_scales_with_speed() {
        let options = AnimationOptions::new().speed(2.0);
        assert_eq!(options.step_delay(), Duration::from_millis(1000));

        let options = AnimationOptions::new().speed(0.5);
        assert_eq!(options.step_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_first_node_recorded_immediately() {
        let delay = Duration::from_millis(100);
        let mut run = TraversalRun::new(RunId(1), &sample(), TraversalOrder::Preorder, delay);
        assert_eq!(run.status(), TraversalStatus::Idle);

        let events = run.advance(Duration::ZERO);
        assert_eq!(events, vec![TraversalEvent::Visited { value: 5, index: 0 }]);
        assert_eq!(run.status(), TraversalStatus::Visiting);
        assert_eq!(run.state().current, Some(5));
    }

    #[test]
    fn test_shorter_delay_mid_run_does_not_burst() {
        let mut run = TraversalRun::new(
            RunId(1),
            &sample(),
            TraversalOrder::Inorder,
            Duration::from_millis(1000),
        );
        run.advance(Duration::from_millis(1500));
        assert_eq!(run.state().results, vec![1, 3]);

        run.set_delay(Duration::from_millis(250));
        assert_eq!(run.advance(Duration::from_millis(16)), vec![]);
        assert_eq!(run.time_to_next_step(), Some(Duration::from_millis(484)));

        // The pending pause keeps its length, later pauses use the new delay
        assert_eq!(
            run.advance(Duration::from_millis(484)),
            vec![TraversalEvent::Visited { value: 4, index: 2 }]
        );
        assert_eq!(run.advance(Duration::from_millis(249)), vec![]);
        assert_eq!(
            run.advance(Duration::from_millis(1)),
            vec![TraversalEvent::Visited { value: 5, index: 3 }]
        );
    }

    #[test]
    fn test_longer_delay_mid_run_does_not_stall() {
        let mut run = TraversalRun::new(
            RunId(1),
            &sample(),
            TraversalOrder::Inorder,
            Duration::from_millis(250),
        );
        run.advance(Duration::from_millis(300));
        assert_eq!(run.state().results, vec![1, 3]);

        run.set_delay(Duration::from_millis(1000));
        assert_eq!(
            run.advance(Duration::from_millis(200)),
            vec![TraversalEvent::Visited { value: 4, index: 2 }]
        );
        assert_eq!(run.time_to_next_step(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_manual_step_reschedules_from_now() {
        let delay = Duration::from_millis(100);
        let mut run = TraversalRun::new(RunId(1), &sample(), TraversalOrder::Inorder, delay);
        run.advance(Duration::from_millis(50));
        run.step();
        assert_eq!(run.state().results, vec![1, 3]);
        assert_eq!(run.time_to_next_step(), Some(delay));
    }

    #[test]
    fn test_cancel_clears_current() {
        let delay = Duration::from_millis(100);
        let mut run = TraversalRun::new(RunId(1), &sample(), TraversalOrder::Inorder, delay);
        run.step();
        assert_eq!(run.cancel(), Some(TraversalEvent::Cancelled));
        assert!(run.is_done());
        assert_eq!(run.state().current, None);
        assert_eq!(run.state().results, vec![1]);
        assert_eq!(run.cancel(), None);
    }
}
