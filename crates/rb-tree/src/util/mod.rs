//! Arena walking helpers shared by the tree and its validation.
//!
//! All functions take the arena as a slice and work with `u32` indices.

use crate::types::{Node, Side};

#[inline]
pub(crate) fn get_p<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].p()
}

#[inline]
pub(crate) fn get_l<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].l()
}

#[inline]
pub(crate) fn get_r<N: Node>(arena: &[N], idx: u32) -> Option<u32> {
    arena[idx as usize].r()
}

#[inline]
pub(crate) fn set_p<N: Node>(arena: &mut [N], idx: u32, v: Option<u32>) {
    arena[idx as usize].set_p(v);
}

#[inline]
pub(crate) fn child<N: Node>(arena: &[N], idx: u32, side: Side) -> Option<u32> {
    arena[idx as usize].child(side)
}

#[inline]
pub(crate) fn set_child<N: Node>(arena: &mut [N], idx: u32, side: Side, v: Option<u32>) {
    arena[idx as usize].set_child(side, v);
}

/// Side of `parent` that `node` hangs from.
#[inline]
pub(crate) fn side_of<N: Node>(arena: &[N], parent: u32, node: u32) -> Side {
    if get_l(arena, parent) == Some(node) {
        Side::Left
    } else {
        Side::Right
    }
}

/// Leftmost node in the tree.
pub fn first<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = get_l(arena, curr) {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node in the tree.
pub fn last<N: Node>(arena: &[N], root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = get_r(arena, curr) {
        curr = r;
    }
    Some(curr)
}

/// In-order successor.
pub fn next<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, curr) {
        return first(arena, Some(r));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor.
pub fn prev<N: Node>(arena: &[N], mut curr: u32) -> Option<u32> {
    if let Some(l) = get_l(arena, curr) {
        return last(arena, Some(l));
    }
    let mut p = get_p(arena, curr);
    while let Some(pi) = p {
        if get_l(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

fn size_inner<N: Node>(arena: &[N], root: u32) -> usize {
    1 + get_l(arena, root).map_or(0, |l| size_inner(arena, l))
        + get_r(arena, root).map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes under `root`.
pub fn size<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| size_inner(arena, r))
}

/// Number of nodes on the longest downward path from `root`.
pub fn height<N: Node>(arena: &[N], root: Option<u32>) -> usize {
    root.map_or(0, |r| {
        1 + height(arena, get_l(arena, r)).max(height(arena, get_r(arena, r)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RbNode;

    // 0:20 with children 1:10 and 2:30; 3:15 hangs right of 10.
    fn sample() -> Vec<RbNode<i32>> {
        let mut arena: Vec<RbNode<i32>> = [20, 10, 30, 15].into_iter().map(RbNode::new).collect();
        arena[0].l = Some(1);
        arena[0].r = Some(2);
        arena[1].p = Some(0);
        arena[1].r = Some(3);
        arena[2].p = Some(0);
        arena[3].p = Some(1);
        arena
    }

    #[test]
    fn walks_in_order_both_ways() {
        let arena = sample();
        let mut keys = Vec::new();
        let mut curr = first(&arena, Some(0));
        while let Some(i) = curr {
            keys.push(arena[i as usize].k);
            curr = next(&arena, i);
        }
        assert_eq!(keys, vec![10, 15, 20, 30]);

        let mut keys = Vec::new();
        let mut curr = last(&arena, Some(0));
        while let Some(i) = curr {
            keys.push(arena[i as usize].k);
            curr = prev(&arena, i);
        }
        assert_eq!(keys, vec![30, 20, 15, 10]);
    }

    #[test]
    fn size_and_height() {
        let arena = sample();
        assert_eq!(size(&arena, Some(0)), 4);
        assert_eq!(height(&arena, Some(0)), 3);
        assert_eq!(size(&arena, None), 0);
        assert_eq!(height(&arena, None), 0);
        assert_eq!(first(&arena, None), None);
    }

    #[test]
    fn side_of_reports_slot() {
        let arena = sample();
        assert_eq!(side_of(&arena, 0, 1), Side::Left);
        assert_eq!(side_of(&arena, 0, 2), Side::Right);
        assert_eq!(child(&arena, 1, Side::Right), Some(3));
    }
}
