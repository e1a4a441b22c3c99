//! Arena-based red-black tree.
//!
//! An ordered collection of keys kept balanced by the red-black scheme, so
//! every insert, remove and search touches O(log n) nodes. Duplicate keys are
//! allowed.
//!
//! Nodes are stored in a caller-invisible `Vec` arena and link to each other
//! through `Option<u32>` indices, so parent back-references never own
//! anything. A vacant child position reads as a black leaf.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait, [`RbNode`], [`Color`], [`Side`] |
//! [`util`] | `first`, `last`, `next`, `prev`, `size`, `height` over any [`Node`] arena |
//! [`red_black`] | rotation, insert/remove with fixups, validation, printing, [`RbTree`] |
//! [`error`] | [`TreeError`], [`InvariantViolation`] |
//!
//! # Example
//!
//! ```
//! use rb_tree::RbTree;
//!
//! let mut tree: RbTree<i32> = [10, 20, 30, 15].into_iter().collect();
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 15, 20, 30]);
//! assert!(tree.search(&15));
//! assert!(!tree.search(&25));
//!
//! assert_eq!(tree.remove(&20), Ok(20));
//! assert!(tree.remove(&20).is_err());
//! tree.validate().unwrap();
//! ```

pub mod error;
pub mod red_black;
pub mod types;
pub mod util;

pub use error::{InvariantViolation, TreeError};
pub use red_black::{Iter, RbTree};
pub use types::{Color, Node, RbNode, Side};
