//! Red-black tree: arena-level algorithms in [`util`], owning wrapper in
//! [`RbTree`].

#[path = "RbTree.rs"]
pub mod rb_tree;
pub mod util;

pub use rb_tree::{Iter, RbTree};
pub use util::{assert_red_black_tree, color_of, free_slot, insert, print, remove, rotate};
