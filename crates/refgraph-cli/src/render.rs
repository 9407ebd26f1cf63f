//! Text rendering of reference trees and lane rows.
//!
//! Graph rows are built as [`Cell`] grids first and painted last, so the
//! layout can be tested without terminal colors. Lane `i` is drawn in
//! column `2 * i`; odd columns only ever hold horizontal strokes.

use colored::Colorize;
use refgraph_core::{Color, CommitGraphNode, Emphasis, LaneTag, NodeKind, RefForest, TreeNode};

use crate::output;

/// One character of a graph line and the lane color it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Option<Color>,
}

impl Cell {
    const BLANK: Self = Self {
        glyph: ' ',
        color: None,
    };
}

/// Which sides of a connector cell carry a stroke.
#[derive(Debug, Clone, Copy, Default)]
struct Joint {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl Joint {
    const fn glyph(self) -> char {
        match (self.up, self.down, self.left, self.right) {
            (false, false, false, false) => ' ',
            (true, true, false, false) | (true, false, false, false) | (false, true, false, false) => {
                '│'
            }
            (false, false, _, _) => '─',
            (true, false, false, true) => '╰',
            (true, false, true, false) => '╯',
            (false, true, false, true) => '╭',
            (false, true, true, false) => '╮',
            (true, true, false, true) => '├',
            (true, true, true, false) => '┤',
            (true, false, true, true) => '┴',
            (false, true, true, true) => '┬',
            (true, true, true, true) => '┼',
        }
    }
}

/// Glyph marking the commit on its own lane.
fn marker(node: &CommitGraphNode) -> char {
    let tags = node.tags();
    if tags.contains(&LaneTag::SignStash) {
        '◆'
    } else if tags.contains(&LaneTag::SignStaged) {
        '◉'
    } else if tags.contains(&LaneTag::SignUnstaged) {
        '○'
    } else if node.own_lane().boundary_commit_id.is_some() {
        '◌'
    } else {
        '●'
    }
}

/// Cells of a commit row, `width` lanes wide.
#[must_use]
pub fn commit_cells(node: &CommitGraphNode, width: usize) -> Vec<Cell> {
    let mut cells = vec![Cell::BLANK; width * 2];
    for lane in node.lane_snapshot() {
        if lane.is_hidden() || lane.index >= width {
            continue;
        }
        let glyph = if lane.index == node.own_lane_index {
            marker(node)
        } else if lane.is_vacant() {
            continue;
        } else {
            '│'
        };
        cells[lane.index * 2] = Cell {
            glyph,
            color: Some(lane.color),
        };
    }
    cells
}

/// Cells of the line drawn between `prev` and `next`, or `None` when every
/// lane runs straight down.
#[must_use]
pub fn connector_cells(
    prev: &CommitGraphNode,
    next: &CommitGraphNode,
    width: usize,
) -> Option<Vec<Cell>> {
    let lanes = next.lane_snapshot();
    let bends = lanes
        .iter()
        .any(|lane| lane.from_lane_indices.iter().any(|&source| source != lane.index));
    if !bends {
        return None;
    }

    let columns = width * 2;
    let mut joints = vec![Joint::default(); columns];
    let mut colors: Vec<Option<Color>> = vec![None; columns];

    for lane in lanes.iter().filter(|l| l.index < width) {
        if lane.from_lane_indices.contains(&lane.index) {
            let column = lane.index * 2;
            joints[column].up = true;
            joints[column].down = true;
            colors[column] = Some(lane.color);
        }
    }

    for lane in lanes.iter().filter(|l| l.index < width) {
        for &source in &lane.from_lane_indices {
            if source == lane.index || source >= width {
                continue;
            }
            // A lane closing into another keeps its own color; a lane
            // branching out is drawn in the new lane's color.
            let color = prev
                .lane_snapshot()
                .get(source)
                .filter(|l| l.has(LaneTag::End))
                .map_or(lane.color, |l| l.color);

            let (from, to) = (source * 2, lane.index * 2);
            joints[from].up = true;
            joints[to].down = true;

            let (lo, hi) = (from.min(to), from.max(to));
            joints[lo].right = true;
            joints[hi].left = true;
            for joint in &mut joints[lo + 1..hi] {
                joint.left = true;
                joint.right = true;
            }
            for slot in &mut colors[lo..=hi] {
                slot.get_or_insert(color);
            }
        }
    }

    Some(
        joints
            .iter()
            .zip(colors)
            .map(|(joint, color)| Cell {
                glyph: joint.glyph(),
                color,
            })
            .collect(),
    )
}

/// Paint cells with their lane colors.
#[must_use]
pub fn paint(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|cell| match cell.color {
            Some(c) if cell.glyph != ' ' => cell.glyph.to_string().truecolor(c.r, c.g, c.b).to_string(),
            _ => cell.glyph.to_string(),
        })
        .collect()
}

/// Lines of a reference tree: the section header followed by its nodes.
#[must_use]
pub fn tree_lines(forest: &RefForest) -> Vec<String> {
    let mut lines = vec![forest.root.label.bold().to_string()];
    push_children(&forest.root.children, "", &mut lines);
    lines
}

fn push_children(children: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└─" } else { "├─" };
        lines.push(format!("{prefix}{branch}{}", node_label(node)));

        let nested = format!("{prefix}{}", if last { "  " } else { "│ " });
        push_children(&node.children, &nested, lines);
    }
}

fn node_label(node: &TreeNode) -> String {
    match node.kind {
        NodeKind::Reference => output::branch_name(&node.label, node.is_head),
        NodeKind::Group | NodeKind::Section if node.emphasis == Emphasis::Bold => {
            format!("  {}", node.label.bold())
        }
        NodeKind::Group | NodeKind::Section => format!("  {}", node.label.dimmed()),
    }
}
