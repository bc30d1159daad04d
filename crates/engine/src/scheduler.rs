//! Recomputes layouts when their inputs change, one frame later.
//!
//! The host owns the frame loop: it feeds inputs to a [`LayoutScheduler`]
//! whenever they change and calls [`LayoutScheduler::run_frame`] once per
//! rendered frame. Every trigger is stamped with a version; a queued
//! computation that has been superseded by the time its frame comes is
//! dropped instead of being published.

use crate::{
    apply_layout, connected_nodes, Edge, LayoutConfig, LayoutResult, Node, Partition,
};
use crossbeam::channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use tracing::debug;

/// How the scheduler turns inputs into a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    /// Run the configured strategy on the whole graph
    #[default]
    Direct,
    /// Lay out connected nodes with the configured strategy and park the
    /// isolated ones in a grid on the right
    SeparateUnconnected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// A layout is waiting for the next frame
    Computing,
}

/// A published layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub version: u64,
    pub result: Arc<LayoutResult>,
}

#[derive(Debug)]
struct PendingLayout {
    version: u64,
    nodes: Arc<[Node]>,
    edges: Arc<[Edge]>,
    config: LayoutConfig,
    partition: Option<Partition>,
}

#[derive(Debug)]
pub struct LayoutScheduler {
    composition: Composition,
    nodes: Arc<[Node]>,
    edges: Arc<[Edge]>,
    config: LayoutConfig,
    enabled: bool,
    partition: Partition,

    version: u64,
    frame_tx: Sender<PendingLayout>,
    frame_rx: Receiver<PendingLayout>,

    published: LayoutSnapshot,
    subscribers: Vec<Sender<LayoutSnapshot>>,
}

impl Default for LayoutScheduler {
    fn default() -> Self {
        Self::new(Composition::default())
    }
}

impl LayoutScheduler {
    pub fn new(composition: Composition) -> Self {
        let (frame_tx, frame_rx) = unbounded();
        Self {
            composition,
            nodes: Arc::from(Vec::new()),
            edges: Arc::from(Vec::new()),
            config: LayoutConfig::default(),
            enabled: true,
            partition: Partition::default(),
            version: 0,
            frame_tx,
            frame_rx,
            published: LayoutSnapshot {
                version: 0,
                result: Arc::default(),
            },
            subscribers: Vec::new(),
        }
    }

    /// Replace all inputs at once, triggering a single layout if any of them
    /// changed. Node and edge sets are compared by identity, the config by
    /// value.
    pub fn set_inputs(
        &mut self,
        nodes: impl Into<Arc<[Node]>>,
        edges: impl Into<Arc<[Edge]>>,
        config: LayoutConfig,
    ) {
        let changed = self.replace_nodes(nodes.into())
            | self.replace_edges(edges.into())
            | self.replace_config(config);
        if changed {
            self.trigger();
        }
    }

    pub fn set_nodes(&mut self, nodes: impl Into<Arc<[Node]>>) {
        if self.replace_nodes(nodes.into()) {
            self.trigger();
        }
    }

    pub fn set_edges(&mut self, edges: impl Into<Arc<[Edge]>>) {
        if self.replace_edges(edges.into()) {
            self.trigger();
        }
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        if self.replace_config(config) {
            self.trigger();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.trigger();
        }
    }

    /// Schedule a layout of the current inputs, even if none changed
    pub fn recalculate(&mut self) {
        self.trigger();
    }

    /// Run the layouts deferred to this frame, returns whether a new layout
    /// got published
    pub fn run_frame(&mut self) -> bool {
        let pending: Vec<_> = self.frame_rx.try_iter().collect();
        let mut published = false;

        for job in pending {
            if job.version != self.version {
                debug!(
                    "Discarding stale layout v{} (latest is v{})",
                    job.version, self.version
                );
                continue;
            }

            let result = match (self.composition, job.partition) {
                (Composition::SeparateUnconnected, Some(partition)) => {
                    partition.compose(&job.edges, &job.config)
                }
                _ => apply_layout(&job.nodes, &job.edges, &job.config),
            };
            self.publish(job.version, result);
            published = true;
        }

        published
    }

    pub fn state(&self) -> SchedulerState {
        if self.published.version == self.version {
            SchedulerState::Idle
        } else {
            SchedulerState::Computing
        }
    }

    pub fn is_layouting(&self) -> bool {
        self.state() == SchedulerState::Computing
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Latest published layout
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.published
    }

    pub fn layout_nodes(&self) -> &[Node] {
        &self.published.result.nodes
    }

    pub fn layout_edges(&self) -> &[Edge] {
        &self.published.result.edges
    }

    /// Current split of the input nodes, only maintained when composing
    /// with [`Composition::SeparateUnconnected`]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Receive every layout published from now on
    pub fn subscribe(&mut self) -> Receiver<LayoutSnapshot> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    fn replace_nodes(&mut self, nodes: Arc<[Node]>) -> bool {
        let changed = !Arc::ptr_eq(&self.nodes, &nodes);
        self.nodes = nodes;
        changed
    }

    fn replace_edges(&mut self, edges: Arc<[Edge]>) -> bool {
        let changed = !Arc::ptr_eq(&self.edges, &edges);
        self.edges = edges;
        changed
    }

    fn replace_config(&mut self, config: LayoutConfig) -> bool {
        let changed = self.config != config;
        self.config = config;
        changed
    }

    fn trigger(&mut self) {
        self.version += 1;

        if self.composition == Composition::SeparateUnconnected {
            self.partition = connected_nodes(&self.nodes, &self.edges);
        }

        // Nothing to compute, publish the inputs right away
        if !self.enabled || self.nodes.is_empty() {
            debug!("Layout v{} passes inputs through", self.version);
            let result = LayoutResult::new(self.nodes.to_vec(), self.edges.to_vec());
            self.publish(self.version, result);
            return;
        }

        debug!("Layout v{} scheduled for next frame", self.version);
        let job = PendingLayout {
            version: self.version,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            config: self.config.clone(),
            partition: (self.composition == Composition::SeparateUnconnected)
                .then(|| self.partition.clone()),
        };
        // Both ends live in self, the send can't fail
        let _ = self.frame_tx.send(job);
    }

    fn publish(&mut self, version: u64, result: LayoutResult) {
        self.published = LayoutSnapshot {
            version,
            result: Arc::new(result),
        };
        let snapshot = &self.published;
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }
}
