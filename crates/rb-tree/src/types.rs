//! Node definitions.
//!
//! Nodes live in a [`Vec`]-backed arena. Every "pointer" is an `Option<u32>`
//! index into that arena, so parent back-references never own anything and
//! the arena is the single owner of every node.

use std::fmt;

/// Parent/child links (`p`, `l`, `r`) of an arena node.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);

    fn child(&self, side: Side) -> Option<u32> {
        match side {
            Side::Left => self.l(),
            Side::Right => self.r(),
        }
    }

    fn set_child(&mut self, side: Side, v: Option<u32>) {
        match side {
            Side::Left => self.set_l(v),
            Side::Right => self.set_r(v),
        }
    }
}

/// Which child slot of a parent a node (or vacant position) occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::Red => "RED",
            Color::Black => "BLACK",
        })
    }
}

/// Red-black tree node holding a single ordered key.
#[derive(Clone, Debug)]
pub struct RbNode<T> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: T,
    pub color: Color,
}

impl<T> RbNode<T> {
    /// New detached node. Nodes start red.
    pub fn new(k: T) -> Self {
        Self {
            p: None,
            l: None,
            r: None,
            k,
            color: Color::Red,
        }
    }

    pub fn key(&self) -> &T {
        &self.k
    }

    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

impl<T> Node for RbNode<T> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.p = v;
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.l = v;
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.r = v;
    }
}
