//! Lane assignment for drawing history as parallel tracks.
//!
//! The walk takes commits children-first and keeps an ordered list of
//! slots. An open slot waits for one commit (the next commit down its
//! line); a vacant slot waits for nothing and may be reused by a new
//! branch tip. Slots are never removed during a walk, so a position keeps
//! its meaning from one row to the next.
//!
//! Every row gets a copy of all slots as [`Lane`]s. In that copy
//! `from_lane_indices` lists the positions in the *previous* row whose
//! lines arrive at the lane, which is all a renderer needs to draw the
//! straight and diagonal connectors between two rows.

use std::collections::{BTreeSet, HashMap, HashSet};

use refgraph_git::{CommitEntry, CommitId, CommitKind};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::palette::{Color, ColorPalette};

/// Flags describing a lane at one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneTag {
    /// The lane begins at this row; nothing arrives from above.
    Start,
    /// Nothing leaves the lane below this row.
    End,
    /// Vacant slot past the last occupied one; not part of the width.
    HiddenTrailing,
    /// The row is a stash entry.
    SignStash,
    /// The row is the staged-changes pseudo commit.
    SignStaged,
    /// The row is the unstaged-changes pseudo commit.
    SignUnstaged,
}

impl LaneTag {
    /// Sign tag for a row kind; regular commits carry none.
    #[must_use]
    pub const fn sign_for(kind: CommitKind) -> Option<Self> {
        match kind {
            CommitKind::Commit => None,
            CommitKind::Stash => Some(Self::SignStash),
            CommitKind::Staged => Some(Self::SignStaged),
            CommitKind::Unstaged => Some(Self::SignUnstaged),
        }
    }
}

/// One vertical track at one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    /// Position in the row.
    pub index: usize,

    /// Color fixed when the lane was opened.
    pub color: Color,

    /// Positions in the previous row whose lines arrive here.
    pub from_lane_indices: Vec<usize>,

    /// Row-level flags.
    pub tags: BTreeSet<LaneTag>,

    /// Set on the row where the lane runs into a history boundary
    /// (shallow clone or truncated walk).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_commit_id: Option<CommitId>,
}

impl Lane {
    fn open(color: Color) -> Self {
        Self {
            index: 0,
            color,
            from_lane_indices: Vec::new(),
            tags: BTreeSet::new(),
            boundary_commit_id: None,
        }
    }

    /// Whether the lane carries `tag`.
    #[must_use]
    pub fn has(&self, tag: LaneTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether the lane is excluded from layout.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.has(LaneTag::HiddenTrailing)
    }

    /// Whether nothing is drawn in this slot at this row.
    #[must_use]
    pub fn is_vacant(&self) -> bool {
        self.has(LaneTag::End) && !self.has(LaneTag::Start) && self.from_lane_indices.is_empty()
    }

    fn add_source(&mut self, position: usize) {
        if !self.from_lane_indices.contains(&position) {
            self.from_lane_indices.push(position);
            self.from_lane_indices.sort_unstable();
        }
    }
}

/// Lane layout of one history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitGraphNode {
    /// The row's commit.
    pub commit_id: CommitId,

    /// Parents as listed by the feed.
    pub parent_ids: Vec<CommitId>,

    /// What the row represents.
    pub kind: CommitKind,

    /// Position of the commit's own lane in the snapshot.
    pub own_lane_index: usize,

    #[serde(rename = "lanes")]
    lane_snapshot: Vec<Lane>,

    /// Parents that are not part of the walked history.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub boundary_parents: Vec<CommitId>,
}

impl CommitGraphNode {
    /// All lanes at this row, including vacant and hidden ones.
    #[must_use]
    pub fn lane_snapshot(&self) -> &[Lane] {
        &self.lane_snapshot
    }

    /// The lane holding the commit.
    #[must_use]
    pub fn own_lane(&self) -> &Lane {
        &self.lane_snapshot[self.own_lane_index]
    }

    /// Tags of the commit's own lane.
    #[must_use]
    pub fn tags(&self) -> &BTreeSet<LaneTag> {
        &self.own_lane().tags
    }

    /// Number of lanes that take part in layout.
    #[must_use]
    pub fn width(&self) -> usize {
        self.lane_snapshot.iter().filter(|l| !l.is_hidden()).count()
    }
}

/// Lane layout of a whole history, one node per input commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitGraph {
    nodes: Vec<CommitGraphNode>,
    #[serde(skip)]
    index: HashMap<CommitId, usize>,
}

impl CommitGraph {
    fn new(nodes: Vec<CommitGraphNode>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(row, node)| (node.commit_id.clone(), row))
            .collect();
        Self { nodes, index }
    }

    /// Rows in input order.
    #[must_use]
    pub fn nodes(&self) -> &[CommitGraphNode] {
        &self.nodes
    }

    /// Look up a row by commit id.
    #[must_use]
    pub fn node(&self, commit_id: &str) -> Option<&CommitGraphNode> {
        self.index.get(commit_id).map(|&row| &self.nodes[row])
    }

    /// Widest row, in lanes.
    #[must_use]
    pub fn width(&self) -> usize {
        self.nodes
            .iter()
            .map(CommitGraphNode::width)
            .max()
            .unwrap_or(0)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Assigns lanes and colors to a history.
///
/// Owns the palette for its builds; every build starts by resetting it,
/// so identical input always yields identical colors.
#[derive(Debug, Clone, Default)]
pub struct LaneAllocator {
    palette: ColorPalette,
}

impl LaneAllocator {
    /// Create an allocator drawing colors from `palette`.
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// Start a row-by-row walk over `commits`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInputOrdering`] if a commit id is listed twice.
    pub fn begin(&mut self, commits: &[CommitEntry]) -> Result<LaneWalk<'_>> {
        self.palette.reset();

        let mut known = HashSet::with_capacity(commits.len());
        for commit in commits {
            if !known.insert(commit.id.clone()) {
                return Err(Error::InvalidInputOrdering {
                    commit: commit.id.clone(),
                    detail: "listed more than once".to_string(),
                });
            }
        }

        Ok(LaneWalk {
            palette: &mut self.palette,
            known,
            seen: HashSet::new(),
            slots: Vec::new(),
        })
    }

    /// Lay out a full history, newest first.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInputOrdering`] if a parent is listed before
    /// one of its children or a commit id is listed twice.
    pub fn build(&mut self, commits: &[CommitEntry]) -> Result<CommitGraph> {
        let mut walk = self.begin(commits)?;
        let nodes = commits
            .iter()
            .map(|commit| walk.step(commit))
            .collect::<Result<Vec<_>>>()?;

        let graph = CommitGraph::new(nodes);
        debug!(rows = graph.len(), width = graph.width(), "assigned lanes");
        Ok(graph)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    lane: Lane,
    awaiting: Option<CommitId>,
}

/// Where the commit's own line goes below its row.
enum Continuation {
    /// Down to the first parent in the same slot.
    Follow(CommitId),
    /// Into another slot already waiting for the first parent.
    Join(usize),
    /// Nowhere: root commit or first parent outside the walk.
    Stop,
}

/// An in-progress lane walk; see [`LaneAllocator::begin`].
#[derive(Debug)]
pub struct LaneWalk<'a> {
    palette: &'a mut ColorPalette,
    known: HashSet<CommitId>,
    seen: HashSet<CommitId>,
    slots: Vec<Slot>,
}

impl LaneWalk<'_> {
    /// Lay out the next row.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInputOrdering`] if one of the commit's
    /// parents was already laid out, or the commit is its own parent.
    pub fn step(&mut self, commit: &CommitEntry) -> Result<CommitGraphNode> {
        self.check_order(commit)?;

        let own = self.claim(&commit.id);
        let boundary_parents: Vec<CommitId> = commit
            .parent_ids
            .iter()
            .filter(|parent| !self.known.contains(*parent))
            .cloned()
            .collect();

        let continuation = match commit.parent_ids.first() {
            Some(first) if self.known.contains(first) => match self.awaiting(first) {
                Some(position) => Continuation::Join(position),
                None => Continuation::Follow(first.clone()),
            },
            Some(_) | None => Continuation::Stop,
        };

        let lane = &mut self.slots[own].lane;
        if let Some(sign) = LaneTag::sign_for(commit.kind) {
            lane.tags.insert(sign);
        }
        if !matches!(continuation, Continuation::Follow(_)) {
            lane.tags.insert(LaneTag::End);
        }
        let truncated =
            matches!(continuation, Continuation::Stop) && !commit.parent_ids.is_empty();
        if commit.shallow || truncated {
            lane.boundary_commit_id = Some(commit.id.clone());
        }

        let lane_snapshot = self.snapshot();
        self.advance(own, continuation, commit);
        self.seen.insert(commit.id.clone());

        trace!(
            commit = %commit.id,
            lane = own,
            slots = self.slots.len(),
            "laid out row"
        );

        Ok(CommitGraphNode {
            commit_id: commit.id.clone(),
            parent_ids: commit.parent_ids.clone(),
            kind: commit.kind,
            own_lane_index: own,
            lane_snapshot,
            boundary_parents,
        })
    }

    /// Lanes open after the last step, with their current positions.
    #[must_use]
    pub fn active_lanes(&self) -> Vec<Lane> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.awaiting.is_some())
            .map(|(position, slot)| {
                let mut lane = slot.lane.clone();
                lane.index = position;
                lane
            })
            .collect()
    }

    fn check_order(&self, commit: &CommitEntry) -> Result<()> {
        for parent in &commit.parent_ids {
            let detail = if parent == &commit.id {
                "commit lists itself as a parent".to_string()
            } else if self.seen.contains(parent) {
                format!("parent {parent} was listed before its child")
            } else {
                continue;
            };
            return Err(Error::InvalidInputOrdering {
                commit: commit.id.clone(),
                detail,
            });
        }
        Ok(())
    }

    /// Slot waiting for `commit`. At most one slot waits for any commit,
    /// so the first match is also the earliest opened.
    fn awaiting(&self, commit: &CommitId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.awaiting.as_ref() == Some(commit))
    }

    /// The commit's own slot: the one waiting for it, or a new `Start`
    /// lane in the first vacant slot (or at the end).
    fn claim(&mut self, commit: &CommitId) -> usize {
        if let Some(position) = self.awaiting(commit) {
            return position;
        }

        let mut lane = Lane::open(self.palette.next());
        lane.tags.insert(LaneTag::Start);
        let slot = Slot {
            lane,
            awaiting: Some(commit.clone()),
        };

        if let Some(vacant) = self.slots.iter().position(|s| s.awaiting.is_none()) {
            self.slots[vacant] = slot;
            vacant
        } else {
            self.slots.push(slot);
            self.slots.len() - 1
        }
    }

    /// Copy of every slot; vacant slots past the last open one are hidden.
    fn snapshot(&self) -> Vec<Lane> {
        let visible = self
            .slots
            .iter()
            .rposition(|slot| slot.awaiting.is_some())
            .map_or(0, |position| position + 1);

        self.slots
            .iter()
            .enumerate()
            .map(|(position, slot)| {
                let mut lane = slot.lane.clone();
                lane.index = position;
                if position >= visible {
                    lane.tags.insert(LaneTag::HiddenTrailing);
                }
                lane
            })
            .collect()
    }

    /// Wire the commit's parents and prepare the slots for the next row.
    fn advance(&mut self, own: usize, continuation: Continuation, commit: &CommitEntry) {
        self.slots[own].awaiting = match &continuation {
            Continuation::Follow(parent) => Some(parent.clone()),
            Continuation::Join(_) | Continuation::Stop => None,
        };

        // Open lanes run straight down; row-level flags are dropped.
        for (position, slot) in self.slots.iter_mut().enumerate() {
            let lane = &mut slot.lane;
            lane.tags.retain(|tag| *tag == LaneTag::End);
            lane.boundary_commit_id = None;
            lane.from_lane_indices.clear();
            if slot.awaiting.is_some() {
                lane.from_lane_indices.push(position);
            }
        }

        if let Continuation::Join(target) = continuation {
            self.slots[target].lane.add_source(own);
        }

        let mut insert_at = own + 1;
        for parent in commit.parent_ids.iter().skip(1) {
            if !self.known.contains(parent) {
                continue;
            }
            if let Some(existing) = self.awaiting(parent) {
                self.slots[existing].lane.add_source(own);
                continue;
            }

            let mut lane = Lane::open(self.palette.next());
            lane.from_lane_indices.push(own);
            let slot = Slot {
                lane,
                awaiting: Some(parent.clone()),
            };

            if self
                .slots
                .get(insert_at)
                .is_some_and(|s| s.awaiting.is_none())
            {
                self.slots[insert_at] = slot;
            } else {
                self.slots.insert(insert_at, slot);
            }
            insert_at += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::palette::DEFAULT_COLORS;

    fn commit(id: &str, parents: &[&str]) -> CommitEntry {
        CommitEntry::new(id, parents.iter().map(|p| CommitId::from(*p)))
    }

    fn build(commits: &[CommitEntry]) -> CommitGraph {
        LaneAllocator::default().build(commits).unwrap()
    }

    fn from_lists(node: &CommitGraphNode) -> Vec<Vec<usize>> {
        node.lane_snapshot()
            .iter()
            .map(|l| l.from_lane_indices.clone())
            .collect()
    }

    #[test]
    fn test_linear_history_single_lane() {
        let commits = vec![
            commit("e", &["d"]),
            commit("d", &["c"]),
            commit("c", &["b"]),
            commit("b", &["a"]),
            commit("a", &[]),
        ];
        let graph = build(&commits);

        assert_eq!(graph.len(), 5);
        assert_eq!(graph.width(), 1);
        for node in graph.nodes() {
            assert_eq!(node.own_lane_index, 0);
            assert_eq!(node.lane_snapshot().len(), 1);
            assert_eq!(node.own_lane().color, DEFAULT_COLORS[0]);
        }

        assert!(graph.nodes()[0].tags().contains(&LaneTag::Start));
        for node in &graph.nodes()[1..] {
            assert!(!node.tags().contains(&LaneTag::Start));
            assert_eq!(node.own_lane().from_lane_indices, vec![0]);
        }
        for node in &graph.nodes()[..4] {
            assert!(!node.tags().contains(&LaneTag::End));
        }
        assert!(graph.nodes()[4].tags().contains(&LaneTag::End));
        assert_eq!(graph.nodes()[4].own_lane().boundary_commit_id, None);
    }

    #[test]
    fn test_merge_opens_lane_from_own_lane() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("a", &["base"]),
            commit("b", &["base"]),
            commit("base", &[]),
        ];
        let mut allocator = LaneAllocator::default();
        let mut walk = allocator.begin(&commits).unwrap();

        let merge = walk.step(&commits[0]).unwrap();
        assert_eq!(merge.own_lane_index, 0);

        let active = walk.active_lanes();
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|l| l.from_lane_indices == vec![0]));
        assert_ne!(active[0].color, active[1].color);
    }

    #[test]
    fn test_merge_and_rejoin_layout() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("a", &["base"]),
            commit("b", &["base"]),
            commit("base", &[]),
        ];
        let graph = build(&commits);

        let a = graph.node("a").unwrap();
        assert_eq!(a.own_lane_index, 0);
        assert_eq!(from_lists(a), vec![vec![0], vec![0]]);

        let b = graph.node("b").unwrap();
        assert_eq!(b.own_lane_index, 1);
        // b's first parent is already awaited by lane 0: lane 1 ends here.
        assert!(b.tags().contains(&LaneTag::End));

        let base = graph.node("base").unwrap();
        assert_eq!(base.own_lane_index, 0);
        assert_eq!(base.own_lane().from_lane_indices, vec![0, 1]);
        assert!(base.lane_snapshot()[1].is_hidden());
        assert_eq!(base.width(), 1);
        assert_eq!(graph.width(), 2);
    }

    #[test]
    fn test_fork_point_joins_branch_tips() {
        let commits = vec![
            commit("feature", &["base"]),
            commit("main", &["base"]),
            commit("base", &[]),
        ];
        let graph = build(&commits);

        let main = graph.node("main").unwrap();
        assert_eq!(main.own_lane_index, 1);
        assert!(main.tags().contains(&LaneTag::Start));
        assert!(main.tags().contains(&LaneTag::End));

        let base = graph.node("base").unwrap();
        assert_eq!(base.own_lane_index, 0);
        assert_eq!(base.own_lane().from_lane_indices, vec![0, 1]);
        assert!(base.lane_snapshot()[1].is_hidden());
    }

    #[test]
    fn test_merge_parent_already_awaited() {
        let commits = vec![
            commit("x", &["b"]),
            commit("m", &["a", "b"]),
            commit("a", &["b"]),
            commit("b", &[]),
        ];
        let graph = build(&commits);

        let a = graph.node("a").unwrap();
        assert_eq!(a.own_lane_index, 1);
        // m's second parent joined x's lane instead of opening a third.
        assert_eq!(a.lane_snapshot()[0].from_lane_indices, vec![0, 1]);
        assert_eq!(a.lane_snapshot().len(), 2);

        let b = graph.node("b").unwrap();
        assert_eq!(b.own_lane().from_lane_indices, vec![0, 1]);
        assert_eq!(graph.width(), 2);
    }

    #[test]
    fn test_colors_fixed_for_lane_lifetime() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("a", &["a0"]),
            commit("b", &["b0"]),
            commit("a0", &["root"]),
            commit("b0", &["root"]),
            commit("tip", &["root"]),
            commit("root", &[]),
        ];
        let graph = build(&commits);

        let side_color = graph.node("a").unwrap().lane_snapshot()[1].color;
        for id in ["b", "a0", "b0"] {
            let node = graph.node(id).unwrap();
            assert_eq!(node.lane_snapshot()[1].color, side_color, "row {id}");
        }

        let main_color = graph.node("m").unwrap().own_lane().color;
        for node in graph.nodes() {
            if node.lane_snapshot()[0].from_lane_indices.contains(&0) {
                assert_eq!(node.lane_snapshot()[0].color, main_color);
            }
        }
    }

    #[test]
    fn test_vacant_slot_reused_for_new_tip() {
        let commits = vec![
            commit("t1", &["r1"]),
            commit("r1", &[]),
            commit("t2", &["r2"]),
            commit("r2", &[]),
        ];
        let graph = build(&commits);

        let t2 = graph.node("t2").unwrap();
        assert_eq!(t2.own_lane_index, 0);
        assert!(t2.tags().contains(&LaneTag::Start));
        assert_eq!(t2.own_lane().color, DEFAULT_COLORS[1]);
        assert_eq!(graph.width(), 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("b", &["root"]),
            commit("a", &["root"]),
            commit("root", &[]),
        ];
        let mut allocator = LaneAllocator::default();
        let first = allocator.build(&commits).unwrap();
        let second = allocator.build(&commits).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shallow_root_records_boundary() {
        let commits = vec![
            commit("tip", &["graft"]),
            commit("graft", &[]).with_shallow(true),
        ];
        let graph = build(&commits);

        let graft = graph.node("graft").unwrap();
        assert!(graft.tags().contains(&LaneTag::End));
        assert_eq!(
            graft.own_lane().boundary_commit_id,
            Some(CommitId::from("graft"))
        );
        assert_eq!(graph.node("tip").unwrap().own_lane().boundary_commit_id, None);
    }

    #[test]
    fn test_missing_parent_is_boundary() {
        let commits = vec![commit("c", &["b"]), commit("b", &["a"])];
        let graph = build(&commits);

        let b = graph.node("b").unwrap();
        assert_eq!(b.boundary_parents, vec![CommitId::from("a")]);
        assert!(b.tags().contains(&LaneTag::End));
        assert_eq!(b.own_lane().boundary_commit_id, Some(CommitId::from("b")));
    }

    #[test]
    fn test_missing_merge_parent_draws_no_lane() {
        let commits = vec![commit("m", &["a", "gone"]), commit("a", &[])];
        let graph = build(&commits);

        let m = graph.node("m").unwrap();
        assert_eq!(m.boundary_parents, vec![CommitId::from("gone")]);
        assert!(!m.tags().contains(&LaneTag::End));
        assert_eq!(graph.width(), 1);
    }

    #[test]
    fn test_parent_before_child_rejected() {
        let commits = vec![commit("a", &[]), commit("b", &["a"])];
        let err = LaneAllocator::default().build(&commits).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInputOrdering { ref commit, .. } if commit.as_str() == "b"
        ));
    }

    #[test]
    fn test_duplicate_and_self_parent_rejected() {
        let duplicated = vec![commit("a", &[]), commit("a", &[])];
        assert!(matches!(
            LaneAllocator::default().build(&duplicated),
            Err(Error::InvalidInputOrdering { .. })
        ));

        let looped = vec![commit("a", &["a"])];
        assert!(matches!(
            LaneAllocator::default().build(&looped),
            Err(Error::InvalidInputOrdering { .. })
        ));
    }

    #[test]
    fn test_pseudo_rows_carry_signs() {
        let commits = vec![
            commit("::unstaged", &["head"]).with_kind(CommitKind::Unstaged),
            commit("::staged", &["head"]).with_kind(CommitKind::Staged),
            commit("stash", &["head"]).with_kind(CommitKind::Stash),
            commit("head", &[]),
        ];
        let graph = build(&commits);

        assert!(graph.nodes()[0].tags().contains(&LaneTag::SignUnstaged));
        assert!(graph.nodes()[1].tags().contains(&LaneTag::SignStaged));
        assert!(graph.nodes()[2].tags().contains(&LaneTag::SignStash));

        let head = graph.node("head").unwrap();
        assert!(head.tags().iter().all(|t| !matches!(
            t,
            LaneTag::SignStash | LaneTag::SignStaged | LaneTag::SignUnstaged
        )));
        // The stash row reuses the slot the staged row vacated.
        assert_eq!(graph.nodes()[2].own_lane_index, 1);
        assert_eq!(head.own_lane().from_lane_indices, vec![0, 1]);
    }

    #[test]
    fn test_snapshot_length_never_shrinks() {
        let commits = vec![
            commit("m2", &["m1", "c"]),
            commit("m1", &["a", "b"]),
            commit("c", &["root"]),
            commit("b", &["root"]),
            commit("a", &["root"]),
            commit("root", &[]),
        ];
        let graph = build(&commits);

        let lengths: Vec<usize> = graph
            .nodes()
            .iter()
            .map(|n| n.lane_snapshot().len())
            .collect();
        assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "{lengths:?}");
        for node in graph.nodes() {
            for (position, lane) in node.lane_snapshot().iter().enumerate() {
                assert_eq!(lane.index, position);
            }
        }
    }

    #[test]
    fn test_empty_history() {
        let graph = build(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.width(), 0);
    }
}
