//! Supply-chain graph traversal.
//!
//! Walks input-material links from a root purchase order and produces one
//! [`Path`] per branch. All three strategies share one explicit-frontier loop;
//! only the frontier container differs (stack, FIFO queue, max-heap).
//!
//! Paths live in an arena while the walk is in progress. A record holds node
//! indices plus per-position degradation, so forking a branch copies an index
//! range instead of cloning nodes. Independent [`Node`] clones are only
//! materialised once the walk is finished.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    CyclePolicy, EngineConfig, Node, Path, PurchaseOrder, SourceReference, TraversalMode,
};
use crate::domain::ports::PoDetailProvider;

/// Knobs for a single traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalSettings {
    pub max_depth: u32,
    pub mode: TraversalMode,
    pub cycle_policy: CyclePolicy,
    pub degradation_rate: f64,
    pub degradation_floor: f64,
    pub max_paths: usize,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for TraversalSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            mode: config.traversal_mode,
            cycle_policy: config.cycle_policy,
            degradation_rate: config.degradation_rate,
            degradation_floor: config.degradation_floor,
            max_paths: config.max_paths,
        }
    }
}

/// Paths plus the anomalies met while producing them.
#[derive(Debug, Clone, Default)]
pub struct TraversalOutcome {
    /// Paths in creation order; the first one starts at the root.
    pub paths: Vec<Path>,
    /// POs the provider could not resolve, in encounter order.
    pub unresolved_po_ids: Vec<Uuid>,
    /// `(po_id, raw source id)` for input materials with unparsable sources.
    pub malformed_sources: Vec<(Uuid, String)>,
    /// Branches skipped because the path ceiling was reached.
    pub truncated_branches: usize,
    /// Number of times cycle handling was triggered.
    pub cycle_events: usize,
    /// Nodes built during the walk; a prefix shared by forked paths counts once.
    pub nodes_built: usize,
}

type PathId = usize;
type ForkId = usize;

#[derive(Debug, Clone, Default)]
struct PathRecord {
    node_ids: Vec<usize>,
    degradation: Vec<f64>,
    circular: Vec<bool>,
    weights: Vec<f64>,
    has_cycles: bool,
    break_points: Vec<Uuid>,
}

/// Where a frame's node is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    /// Sole input of its parent: extends the parent's path.
    Continue(PathId),
    /// One of several inputs sharing a fork point.
    Sibling(ForkId),
}

/// Prefix shared by the inputs of a multi-input PO.
///
/// The first sibling that yields a node or a cycle extends `base`; every
/// later one starts from `snapshot`, taken when the siblings were queued.
/// Abandoned siblings claim nothing, so a PO whose inputs all fail ends
/// its own path.
#[derive(Debug)]
struct ForkPoint {
    base: PathId,
    claimed: bool,
    snapshot: PathRecord,
}

#[derive(Debug, Default)]
struct PathArena {
    nodes: Vec<Node>,
    records: Vec<PathRecord>,
    forks: Vec<ForkPoint>,
}

impl PathArena {
    fn with_root_path() -> Self {
        Self {
            records: vec![PathRecord::default()],
            ..Default::default()
        }
    }

    /// Node indices of the prefix a branch grows from.
    fn prefix(&self, branch: Branch) -> &[usize] {
        match branch {
            Branch::Continue(path) => &self.records[path].node_ids,
            Branch::Sibling(fork) => &self.forks[fork].snapshot.node_ids,
        }
    }

    /// Position of `po_id` within the branch's prefix.
    fn position_in_prefix(&self, branch: Branch, po_id: Uuid) -> Option<usize> {
        self.prefix(branch)
            .iter()
            .position(|&n| self.nodes[n].po_id == po_id)
    }

    /// Record the current state of `base` as a fork point for its inputs.
    fn fork_point(&mut self, base: PathId) -> ForkId {
        self.forks.push(ForkPoint {
            base,
            claimed: false,
            snapshot: self.records[base].clone(),
        });
        self.forks.len() - 1
    }

    /// Path the branch writes to, forking if needed. `None` when the ceiling is hit.
    fn resolve(&mut self, branch: Branch, max_paths: usize) -> Option<PathId> {
        match branch {
            Branch::Continue(path) => Some(path),
            Branch::Sibling(fork) => {
                let point = &mut self.forks[fork];
                if !point.claimed {
                    point.claimed = true;
                    return Some(point.base);
                }
                if self.records.len() >= max_paths {
                    return None;
                }
                let record = self.forks[fork].snapshot.clone();
                self.records.push(record);
                Some(self.records.len() - 1)
            }
        }
    }

    fn append(&mut self, path: PathId, node: Node, weight: f64) {
        self.nodes.push(node);
        let record = &mut self.records[path];
        record.node_ids.push(self.nodes.len() - 1);
        record.degradation.push(1.0);
        record.circular.push(false);
        record.weights.push(weight);
    }

    /// Apply cycle bookkeeping for a repeat of the node at `position`.
    fn register_cycle(
        &mut self,
        path: PathId,
        position: usize,
        po_id: Uuid,
        settings: &TraversalSettings,
    ) {
        let record = &mut self.records[path];
        record.has_cycles = true;
        record.break_points.push(po_id);

        if !settings.cycle_policy.degrades() {
            return;
        }
        let degrade_from = match settings.cycle_policy {
            CyclePolicy::WeightedAverage => position,
            _ => 0,
        };

        for factor in &mut record.degradation[degrade_from..] {
            *factor = (*factor * settings.degradation_rate).max(settings.degradation_floor);
        }
        for flag in &mut record.circular[position..] {
            *flag = true;
        }
    }

    fn into_paths(self, accumulate_weight: bool) -> Vec<Path> {
        let nodes = self.nodes;
        self.records
            .into_iter()
            .filter(|r| !r.node_ids.is_empty())
            .map(|record| {
                let path_nodes = record
                    .node_ids
                    .iter()
                    .zip(&record.degradation)
                    .zip(&record.circular)
                    .map(|((&n, &factor), &circular)| {
                        let mut node = nodes[n].clone();
                        node.degradation_factor = factor;
                        node.is_circular = circular;
                        node
                    })
                    .collect();

                Path {
                    nodes: path_nodes,
                    has_cycles: record.has_cycles,
                    cycle_break_points: record.break_points,
                    total_weight: if accumulate_weight {
                        record.weights.iter().sum()
                    } else {
                        0.0
                    },
                    ..Default::default()
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Frame {
    po_id: Uuid,
    depth: u32,
    branch: Branch,
    /// Normalised contribution of the edge that led here.
    weight: f64,
    /// Product of edge weights from the root.
    cumulative: f64,
    seq: u64,
}

/// Heap order: highest cumulative weight first, then discovery order.
impl Ord for Frame {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cumulative
            .total_cmp(&other.cumulative)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frame {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frame {}

enum Frontier {
    Stack(Vec<Frame>),
    Queue(VecDeque<Frame>),
    Heap(BinaryHeap<Frame>),
}

impl Frontier {
    fn for_mode(mode: TraversalMode) -> Self {
        match mode {
            TraversalMode::DepthFirst => Self::Stack(Vec::new()),
            TraversalMode::BreadthFirst => Self::Queue(VecDeque::new()),
            TraversalMode::Weighted => Self::Heap(BinaryHeap::new()),
        }
    }

    fn pop(&mut self) -> Option<Frame> {
        match self {
            Self::Stack(s) => s.pop(),
            Self::Queue(q) => q.pop_front(),
            Self::Heap(h) => h.pop(),
        }
    }

    /// Enqueue children so the first child is processed first.
    fn push_children(&mut self, children: Vec<Frame>) {
        match self {
            Self::Stack(s) => s.extend(children.into_iter().rev()),
            Self::Queue(q) => q.extend(children),
            Self::Heap(h) => h.extend(children),
        }
    }
}

/// Service that walks the supply chain from a root purchase order.
///
/// Stateless between calls: every call owns its arena and frontier.
#[derive(Debug, Clone, Default)]
pub struct GraphTraversal {
    settings: TraversalSettings,
}

impl GraphTraversal {
    pub fn new(settings: TraversalSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TraversalSettings {
        &self.settings
    }

    /// Walk from `root`, building nodes with `build_node(po, depth)`.
    ///
    /// A PO with one input extends the current path. The inputs of a PO with
    /// several share a fork point: the first one to produce a node or a cycle
    /// extends the current path and the others copy the prefix as it stood
    /// when they were queued, so the path set does not depend on declaration
    /// order or on when a sibling is reached. Provider errors abort the walk
    /// and are returned unchanged.
    #[instrument(skip(self, build_node, provider), fields(mode = %self.settings.mode))]
    pub fn traverse<P, F>(&self, root: Uuid, build_node: F, provider: &P) -> DomainResult<TraversalOutcome>
    where
        P: PoDetailProvider + ?Sized,
        F: Fn(&PurchaseOrder, u32) -> Node,
    {
        let settings = &self.settings;
        let mut arena = PathArena::with_root_path();
        let mut outcome = TraversalOutcome::default();
        let mut frontier = Frontier::for_mode(settings.mode);
        let mut seq: u64 = 0;

        frontier.push_children(vec![Frame {
            po_id: root,
            depth: 0,
            branch: Branch::Continue(0),
            weight: 1.0,
            cumulative: 1.0,
            seq,
        }]);

        while let Some(frame) = frontier.pop() {
            if frame.depth > settings.max_depth {
                debug!(po_id = %frame.po_id, depth = frame.depth, "max depth reached, stopping branch");
                continue;
            }

            if let Some(position) = arena.position_in_prefix(frame.branch, frame.po_id) {
                outcome.cycle_events += 1;
                match arena.resolve(frame.branch, settings.max_paths) {
                    Some(path) => {
                        debug!(po_id = %frame.po_id, policy = %settings.cycle_policy, "cycle detected, breaking branch");
                        arena.register_cycle(path, position, frame.po_id, settings);
                    }
                    None => outcome.truncated_branches += 1,
                }
                continue;
            }

            let Some(po) = provider.get_po_details(frame.po_id)? else {
                warn!(po_id = %frame.po_id, depth = frame.depth, "purchase order not found, abandoning branch");
                outcome.unresolved_po_ids.push(frame.po_id);
                continue;
            };

            let Some(path) = arena.resolve(frame.branch, settings.max_paths) else {
                warn!(po_id = %frame.po_id, max_paths = settings.max_paths, "path ceiling reached, skipping branch");
                outcome.truncated_branches += 1;
                continue;
            };

            debug!(po_id = %po.id, depth = frame.depth, path, "visiting purchase order");
            let node = build_node(&po, frame.depth);
            arena.append(path, node, frame.weight);

            let sources = self.ordered_sources(&po, &mut outcome);
            let branch = if sources.len() > 1 {
                Branch::Sibling(arena.fork_point(path))
            } else {
                Branch::Continue(path)
            };
            let children = sources
                .into_iter()
                .map(|(source, weight)| {
                    seq += 1;
                    Frame {
                        po_id: source,
                        depth: frame.depth + 1,
                        branch,
                        weight,
                        cumulative: frame.cumulative * weight,
                        seq,
                    }
                })
                .collect();
            frontier.push_children(children);
        }

        outcome.nodes_built = arena.nodes.len();
        outcome.paths = arena.into_paths(settings.mode == TraversalMode::Weighted);
        debug!(
            paths = outcome.paths.len(),
            unresolved = outcome.unresolved_po_ids.len(),
            truncated = outcome.truncated_branches,
            "traversal finished"
        );
        Ok(outcome)
    }

    /// Linked sources of `po` with their normalised contribution weights.
    ///
    /// Declaration order, except in weighted mode where the heaviest input
    /// comes first (stable on ties).
    fn ordered_sources(&self, po: &PurchaseOrder, outcome: &mut TraversalOutcome) -> Vec<(Uuid, f64)> {
        let materials = po.input_materials();
        let mut linked = Vec::with_capacity(materials.len());

        for material in materials {
            match material.source_reference() {
                SourceReference::Linked(id) => linked.push((id, material.percentage_contribution)),
                SourceReference::Malformed(raw) => {
                    warn!(po_id = %po.id, source = %raw, "skipping malformed source purchase order id");
                    outcome.malformed_sources.push((po.id, raw));
                }
                SourceReference::Missing => {
                    debug!(po_id = %po.id, "input material without source purchase order");
                }
            }
        }

        let even_share = if linked.is_empty() {
            0.0
        } else {
            1.0 / linked.len() as f64
        };
        let mut weighted: Vec<(Uuid, f64)> = linked
            .into_iter()
            .map(|(id, pct)| {
                let weight = pct.map_or(even_share, |p| (p / 100.0).clamp(0.0, 1.0));
                (id, weight)
            })
            .collect();

        if self.settings.mode == TraversalMode::Weighted {
            weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
        }
        weighted
    }
}
