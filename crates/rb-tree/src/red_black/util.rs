use tracing::trace;

use crate::error::InvariantViolation;
use crate::types::{Color, Node, RbNode, Side};
use crate::util::{child, first, get_l, get_p, get_r, next, set_child, set_p, side_of};

#[path = "util/print.rs"]
mod print_impl;

pub use print_impl::print;

/// Color of a possibly vacant position. Vacant positions are black leaves.
#[inline]
pub fn color_of<T>(arena: &[RbNode<T>], i: Option<u32>) -> Color {
    i.map_or(Color::Black, |i| arena[i as usize].color)
}

#[inline]
fn is_red<T>(arena: &[RbNode<T>], i: Option<u32>) -> bool {
    color_of(arena, i) == Color::Red
}

#[inline]
fn set_color<T>(arena: &mut [RbNode<T>], i: u32, color: Color) {
    arena[i as usize].color = color;
}

/// A child position that may be vacant.
///
/// The node that replaced a removed black node may not exist, so deletion
/// fixup tracks the position's parent and side explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    node: Option<u32>,
    parent: Option<u32>,
    side: Side,
}

impl Slot {
    fn at<T>(arena: &[RbNode<T>], node: u32) -> Self {
        let parent = get_p(arena, node);
        let side = parent.map_or(Side::Left, |p| side_of(arena, p, node));
        Self {
            node: Some(node),
            parent,
            side,
        }
    }

    fn root(root: Option<u32>) -> Self {
        Self {
            node: root,
            parent: None,
            side: Side::Left,
        }
    }

    fn color<T>(&self, arena: &[RbNode<T>]) -> Color {
        color_of(arena, self.node)
    }
}

/// Rotates `pivot` down towards `side`; its child on the opposite side takes
/// its place. Returns the new root.
///
/// Rewrites only the pivot and riser links, the parent link of the subtree
/// that crosses over, and the matching child slot of the pivot's old parent.
pub fn rotate<N: Node>(arena: &mut [N], root: Option<u32>, pivot: u32, side: Side) -> Option<u32> {
    let Some(riser) = child(arena, pivot, side.opposite()) else {
        debug_assert!(false, "rotation at {pivot} has no child to lift");
        return root;
    };

    let inner = child(arena, riser, side);
    set_child(arena, pivot, side.opposite(), inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(pivot));
    }

    let p = get_p(arena, pivot);
    set_p(arena, riser, p);
    let root = match p {
        Some(p) => {
            let slot = side_of(arena, p, pivot);
            set_child(arena, p, slot, Some(riser));
            root
        }
        None => Some(riser),
    };

    set_child(arena, riser, side, Some(pivot));
    set_p(arena, pivot, Some(riser));
    root
}

/// Links detached node `n` into the tree and rebalances. Returns the new root.
///
/// Equal keys descend right, so duplicates land after their equals in order.
pub fn insert<T: Ord>(arena: &mut [RbNode<T>], root: Option<u32>, n: u32) -> Option<u32> {
    let Some(mut curr) = root else {
        set_p(arena, n, None);
        set_color(arena, n, Color::Black);
        return Some(n);
    };

    loop {
        let side = if arena[n as usize].k < arena[curr as usize].k {
            Side::Left
        } else {
            Side::Right
        };
        match child(arena, curr, side) {
            Some(c) => curr = c,
            None => {
                set_child(arena, curr, side, Some(n));
                set_p(arena, n, Some(curr));
                return insert_fixup(arena, root, n);
            }
        }
    }
}

fn insert_fixup<T>(arena: &mut [RbNode<T>], mut root: Option<u32>, mut n: u32) -> Option<u32> {
    while let Some(p) = get_p(arena, n) {
        if !is_red(arena, Some(p)) {
            break;
        }
        let Some(g) = get_p(arena, p) else {
            debug_assert!(false, "red node {p} is the root");
            break;
        };

        let p_side = side_of(arena, g, p);
        let u = child(arena, g, p_side.opposite());
        if is_red(arena, u) {
            trace!(node = n, grandparent = g, "insert fixup: red uncle");
            set_color(arena, p, Color::Black);
            if let Some(u) = u {
                set_color(arena, u, Color::Black);
            }
            set_color(arena, g, Color::Red);
            n = g;
            continue;
        }

        let p = if side_of(arena, p, n) != p_side {
            trace!(node = n, parent = p, "insert fixup: inner grandchild");
            root = rotate(arena, root, p, p_side);
            n
        } else {
            p
        };

        trace!(parent = p, grandparent = g, "insert fixup: outer grandchild");
        root = rotate(arena, root, g, p_side.opposite());
        let (p_color, g_color) = (arena[p as usize].color, arena[g as usize].color);
        set_color(arena, p, g_color);
        set_color(arena, g, p_color);
        break;
    }

    if let Some(r) = root {
        set_color(arena, r, Color::Black);
    }
    root
}

/// Puts the subtree `v` where `u` hangs. Returns the new root.
fn transplant<N: Node>(arena: &mut [N], root: Option<u32>, u: u32, v: Option<u32>) -> Option<u32> {
    let up = get_p(arena, u);
    if let Some(v) = v {
        set_p(arena, v, up);
    }
    match up {
        Some(up) => {
            let side = side_of(arena, up, u);
            set_child(arena, up, side, v);
            root
        }
        None => v,
    }
}

/// Unlinks node `z` from the tree and rebalances. Returns the new root.
///
/// `z` stays in the arena fully detached; see [`free_slot`] for reclaiming it.
/// With two children, `z`'s in-order successor takes its place and color.
pub fn remove<T>(arena: &mut [RbNode<T>], mut root: Option<u32>, z: u32) -> Option<u32> {
    let zl = get_l(arena, z);
    let zr = get_r(arena, z);

    let removed_color;
    let x;
    match (zl, zr) {
        (Some(l), Some(r)) => {
            let mut y = r;
            while let Some(yl) = get_l(arena, y) {
                y = yl;
            }
            removed_color = arena[y as usize].color;
            let yr = get_r(arena, y);
            x = if y == r {
                Slot {
                    node: yr,
                    parent: Some(y),
                    side: Side::Right,
                }
            } else {
                let slot = Slot {
                    node: yr,
                    parent: get_p(arena, y),
                    side: Side::Left,
                };
                root = transplant(arena, root, y, yr);
                set_child(arena, y, Side::Right, Some(r));
                set_p(arena, r, Some(y));
                slot
            };
            root = transplant(arena, root, z, Some(y));
            set_child(arena, y, Side::Left, Some(l));
            set_p(arena, l, Some(y));
            let z_color = arena[z as usize].color;
            set_color(arena, y, z_color);
        }
        (only, None) | (None, only) => {
            removed_color = arena[z as usize].color;
            let parent = get_p(arena, z);
            x = Slot {
                node: only,
                parent,
                side: parent.map_or(Side::Left, |p| side_of(arena, p, z)),
            };
            root = transplant(arena, root, z, only);
        }
    }

    let node = &mut arena[z as usize];
    node.p = None;
    node.l = None;
    node.r = None;

    if removed_color == Color::Black {
        root = remove_fixup(arena, root, x);
    }
    root
}

fn remove_fixup<T>(arena: &mut [RbNode<T>], mut root: Option<u32>, mut x: Slot) -> Option<u32> {
    while let Some(p) = x.parent {
        if x.color(arena) == Color::Red {
            break;
        }
        let near = x.side;
        let far = near.opposite();
        let Some(s) = child(arena, p, far) else {
            debug_assert!(false, "doubly black slot under {p} has no sibling");
            x = Slot::at(arena, p);
            continue;
        };

        if is_red(arena, Some(s)) {
            trace!(parent = p, sibling = s, "remove fixup: red sibling");
            set_color(arena, s, Color::Black);
            set_color(arena, p, Color::Red);
            root = rotate(arena, root, p, near);
            continue;
        }

        let s_near = child(arena, s, near);
        let s_far = child(arena, s, far);
        if !is_red(arena, s_near) && !is_red(arena, s_far) {
            trace!(parent = p, sibling = s, "remove fixup: black nephews");
            set_color(arena, s, Color::Red);
            x = Slot::at(arena, p);
            continue;
        }

        if !is_red(arena, s_far) {
            trace!(parent = p, sibling = s, "remove fixup: red near nephew");
            if let Some(s_near) = s_near {
                set_color(arena, s_near, Color::Black);
            }
            set_color(arena, s, Color::Red);
            root = rotate(arena, root, s, far);
            continue;
        }

        trace!(parent = p, sibling = s, "remove fixup: red far nephew");
        let p_color = arena[p as usize].color;
        set_color(arena, s, p_color);
        set_color(arena, p, Color::Black);
        if let Some(s_far) = s_far {
            set_color(arena, s_far, Color::Black);
        }
        root = rotate(arena, root, p, near);
        x = Slot::root(root);
    }

    if let Some(n) = x.node {
        set_color(arena, n, Color::Black);
    }
    root
}

/// Drops the detached node at `idx` from the arena, moving the last node into
/// the hole and re-pointing its links. Returns the dropped node and the root.
pub fn free_slot<T>(
    arena: &mut Vec<RbNode<T>>,
    root: Option<u32>,
    idx: u32,
) -> (RbNode<T>, Option<u32>) {
    let last = (arena.len() - 1) as u32;
    let node = arena.swap_remove(idx as usize);
    if idx == last {
        return (node, root);
    }

    if let Some(p) = get_p(arena, idx) {
        let side = if get_l(arena, p) == Some(last) {
            Side::Left
        } else {
            Side::Right
        };
        set_child(arena, p, side, Some(idx));
    }
    if let Some(l) = get_l(arena, idx) {
        set_p(arena, l, Some(idx));
    }
    if let Some(r) = get_r(arena, idx) {
        set_p(arena, r, Some(idx));
    }

    let root = if root == Some(last) { Some(idx) } else { root };
    (node, root)
}

/// Checks every red-black and ordering invariant of the tree at `root`.
///
/// Returns the black height (number of black nodes on any root-to-leaf path).
pub fn assert_red_black_tree<T: Ord>(
    arena: &[RbNode<T>],
    root: Option<u32>,
) -> Result<usize, InvariantViolation> {
    let Some(root) = root else {
        return Ok(0);
    };

    if get_p(arena, root).is_some() {
        return Err(InvariantViolation::RootHasParent(root));
    }
    if !arena[root as usize].is_black() {
        return Err(InvariantViolation::RedRoot(root));
    }

    fn black_height<T>(arena: &[RbNode<T>], node: Option<u32>) -> Result<usize, InvariantViolation> {
        let Some(node) = node else {
            return Ok(0);
        };

        for c in [get_l(arena, node), get_r(arena, node)].into_iter().flatten() {
            if get_p(arena, c) != Some(node) {
                return Err(InvariantViolation::BrokenParentLink {
                    parent: node,
                    child: c,
                });
            }
            if is_red(arena, Some(node)) && is_red(arena, Some(c)) {
                return Err(InvariantViolation::RedRed {
                    parent: node,
                    child: c,
                });
            }
        }

        let left = black_height(arena, get_l(arena, node))?;
        let right = black_height(arena, get_r(arena, node))?;
        if left != right {
            return Err(InvariantViolation::BlackHeight { node, left, right });
        }

        Ok(left + usize::from(arena[node as usize].is_black()))
    }

    let height = black_height(arena, Some(root))?;

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if arena[prev as usize].k > arena[i as usize].k {
                return Err(InvariantViolation::Order(i));
            }
        }
        prev = Some(i);
        curr = next(arena, i);
    }

    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(arena: &mut Vec<RbNode<i32>>, root: Option<u32>, k: i32) -> Option<u32> {
        arena.push(RbNode::new(k));
        let idx = (arena.len() - 1) as u32;
        insert(arena, root, idx)
    }

    #[test]
    fn rotate_left_then_right_restores_shape() {
        // 0:10 root, 1:20 right of 10, 2:15 left of 20.
        let mut arena: Vec<RbNode<i32>> = [10, 20, 15].into_iter().map(RbNode::new).collect();
        arena[0].r = Some(1);
        arena[1].p = Some(0);
        arena[1].l = Some(2);
        arena[2].p = Some(1);

        let root = rotate(&mut arena, Some(0), 0, Side::Left);
        assert_eq!(root, Some(1));
        assert_eq!(arena[1].p, None);
        assert_eq!(arena[1].l, Some(0));
        assert_eq!(arena[0].p, Some(1));
        assert_eq!(arena[0].r, Some(2));
        assert_eq!(arena[2].p, Some(0));

        let root = rotate(&mut arena, root, 1, Side::Right);
        assert_eq!(root, Some(0));
        assert_eq!(arena[0].p, None);
        assert_eq!(arena[0].r, Some(1));
        assert_eq!(arena[1].p, Some(0));
        assert_eq!(arena[1].l, Some(2));
        assert_eq!(arena[2].p, Some(1));
    }

    #[test]
    fn rotate_below_root_rewrites_parent_slot() {
        let mut arena = Vec::new();
        let mut root = None;
        for k in [20, 10, 30, 25, 35] {
            root = push(&mut arena, root, k);
        }
        // 30 sits right of 20; lift 25 into its place.
        let thirty = 2;
        let root2 = rotate(&mut arena, root, thirty, Side::Right);
        assert_eq!(root2, root);
        assert_eq!(arena[0].r, Some(3));
        assert_eq!(arena[3].p, Some(0));
        assert_eq!(arena[3].r, Some(thirty));
    }

    #[test]
    fn vacant_positions_read_black() {
        let arena = vec![RbNode::new(1)];
        assert_eq!(color_of(&arena, None), Color::Black);
        assert_eq!(color_of(&arena, Some(0)), Color::Red);
    }

    #[test]
    fn free_slot_relocates_last_node() {
        let mut arena = Vec::new();
        let mut root = None;
        for k in [10, 20, 30, 15, 18, 11, 3] {
            root = push(&mut arena, root, k);
        }
        // Detach the node holding 20, then release its slot.
        let z = 1;
        root = remove(&mut arena, root, z);
        let (node, root) = free_slot(&mut arena, root, z);
        assert_eq!(node.k, 20);
        assert_eq!(arena.len(), 6);
        assert_eq!(crate::util::size(&arena, root), 6);
        assert!(assert_red_black_tree(&arena, root).is_ok());
    }

    #[test]
    fn detects_red_root() {
        let arena = vec![RbNode::new(1)];
        assert_eq!(
            assert_red_black_tree(&arena, Some(0)),
            Err(InvariantViolation::RedRoot(0))
        );
    }

    #[test]
    fn detects_black_height_mismatch() {
        let mut arena: Vec<RbNode<i32>> = [2, 1].into_iter().map(RbNode::new).collect();
        arena[0].color = Color::Black;
        arena[1].color = Color::Black;
        arena[0].l = Some(1);
        arena[1].p = Some(0);
        assert_eq!(
            assert_red_black_tree(&arena, Some(0)),
            Err(InvariantViolation::BlackHeight {
                node: 0,
                left: 1,
                right: 0
            })
        );
    }
}
