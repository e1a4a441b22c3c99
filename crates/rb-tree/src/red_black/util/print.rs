use std::fmt::{Display, Write};

use crate::types::RbNode;

/// Tree-art rendering of the tree at `root`, one node per line.
///
/// ```text
/// R----20(BLACK)
///    L----10(BLACK)
///    |  R----15(RED)
///    R----30(BLACK)
/// ```
pub fn print<T: Display>(arena: &[RbNode<T>], root: Option<u32>) -> String {
    if root.is_none() {
        return "Tree is empty.".to_string();
    }
    let mut out = String::new();
    print_node(arena, root, "", true, &mut out);
    out.truncate(out.trim_end().len());
    out
}

fn print_node<T: Display>(
    arena: &[RbNode<T>],
    node: Option<u32>,
    tab: &str,
    last: bool,
    out: &mut String,
) {
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    let (branch, pad) = if last { ("R----", "   ") } else { ("L----", "|  ") };
    let _ = writeln!(out, "{tab}{branch}{}({})", n.k, n.color);

    let tab = format!("{tab}{pad}");
    print_node(arena, n.l, &tab, false, out);
    print_node(arena, n.r, &tab, true, out);
}
