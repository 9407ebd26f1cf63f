//! Ahead/behind labels and head marking for reference trees.

use crate::ref_tree::{Emphasis, NodeKind, RefForest, TreeNode};

/// Display label for a branch segment with its tracking counts.
///
/// ```
/// use refgraph_core::annotate::branch_label;
///
/// assert_eq!(branch_label("main", 0, 0), "main");
/// assert_eq!(branch_label("main", 3, 0), "main ↑3");
/// assert_eq!(branch_label("main", 0, 2), "main ↓2");
/// assert_eq!(branch_label("main", 4, 5), "main ↑4 ↓5");
/// ```
#[must_use]
pub fn branch_label(segment: &str, ahead: usize, behind: usize) -> String {
    match (ahead, behind) {
        (0, 0) => segment.to_string(),
        (ahead, 0) => format!("{segment} ↑{ahead}"),
        (0, behind) => format!("{segment} ↓{behind}"),
        (ahead, behind) => format!("{segment} ↑{ahead} ↓{behind}"),
    }
}

/// Mark the reference named `head` as the checked-out branch.
///
/// Every reference node whose id equals `head` gets `is_head` and
/// [`Emphasis::Bold`]; every other reference node is cleared, so the pass
/// can be re-run after a checkout. Section headers stay bold.
/// Returns the number of nodes marked.
pub fn mark_head(forest: &mut RefForest, head: Option<&str>) -> usize {
    forest.root.emphasis = Emphasis::Bold;
    mark_children(&mut forest.root.children, head)
}

fn mark_children(children: &mut [TreeNode], head: Option<&str>) -> usize {
    let mut marked = 0;
    for node in children {
        let is_head = node.kind == NodeKind::Reference && head == Some(node.id.as_str());
        node.is_head = is_head;
        node.emphasis = match node.kind {
            NodeKind::Section => Emphasis::Bold,
            NodeKind::Group | NodeKind::Reference if is_head => Emphasis::Bold,
            NodeKind::Group | NodeKind::Reference => Emphasis::Regular,
        };
        marked += usize::from(is_head);
        marked += mark_children(&mut node.children, head);
    }
    marked
}
