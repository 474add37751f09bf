//! An experimental rendition of the list with no `unsafe` at all: node
//! ownership is split into two `StaticRc` halves held by the node's
//! neighbors (or by the list ends), and all aliased access goes through a
//! `GhostToken`. It trades the sentinel ring for `Option` ends, and the
//! in-place algorithms for rebuild-based ones, which is why the
//! raw-pointer list remains the production implementation.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Front = 0,
    Back = 1,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

pub struct List<'id, T> {
    /// the outermost node of each side, `None` when empty
    ends: [Option<NodePtr<'id, T>>; 2],
}

struct Node<'id, T> {
    /// the neighbor toward each side, `None` at the ends
    neighbors: [Option<NodePtr<'id, T>>; 2],
    value: T,
}

type NodePtr<'id, T> = Half<GhostCell<'id, Node<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Node<'id, T> {
    fn new(value: T) -> Self {
        let neighbors = [None, None];
        Self { neighbors, value }
    }
}

impl<'id, T> Default for List<'id, T> {
    fn default() -> Self {
        let ends = [None, None];
        Self { ends }
    }
}

// private methods
impl<'id, T> List<'id, T> {
    fn push(&mut self, side: Side, value: T, token: &mut GhostToken<'id>) {
        let (outer, inner) = Full::split(Full::new(GhostCell::new(Node::new(value))));
        match self.ends[side as usize].take() {
            Some(end) => {
                end.deref().borrow_mut(token).neighbors[side as usize] = Some(outer);
                inner.deref().borrow_mut(token).neighbors[side.opposite() as usize] = Some(end);
            }
            None => self.ends[side.opposite() as usize] = Some(outer),
        }
        self.ends[side as usize] = Some(inner);
    }

    fn pop(&mut self, side: Side, token: &mut GhostToken<'id>) -> Option<T> {
        let inner = self.ends[side as usize].take()?;
        let outer = match inner.deref().borrow_mut(token).neighbors[side.opposite() as usize].take()
        {
            Some(neighbor) => {
                let outer = neighbor.deref().borrow_mut(token).neighbors[side as usize]
                    .take()
                    .unwrap();
                self.ends[side as usize] = Some(neighbor);
                outer
            }
            None => self.ends[side.opposite() as usize].take().unwrap(),
        };
        Some(Full::into_box(Full::join(inner, outer)).into_inner().value)
    }
}

impl<'id, T> List<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }
    pub fn is_empty(&self) -> bool {
        self.ends[Side::Front as usize].is_none()
    }
    pub fn push_back(&mut self, value: T, token: &mut GhostToken<'id>) {
        self.push(Side::Back, value, token);
    }
    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.pop(Side::Back, token)
    }
    pub fn push_front(&mut self, value: T, token: &mut GhostToken<'id>) {
        self.push(Side::Front, value, token);
    }
    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.pop(Side::Front, token)
    }

    /// Reverse by draining from the front and re-pushing at the front.
    /// Not in-place like the production list, but provably safe.
    pub fn reverse(&mut self, token: &mut GhostToken<'id>) {
        let mut reversed = Self::new();
        while let Some(value) = self.pop(Side::Front, token) {
            reversed.push(Side::Front, value, token);
        }
        *self = reversed;
    }

    /// Keep only the elements satisfying the predicate, preserving order.
    pub fn retain<F>(&mut self, token: &mut GhostToken<'id>, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut kept = Self::new();
        while let Some(value) = self.pop(Side::Front, token) {
            if pred(&value) {
                kept.push(Side::Back, value, token);
            }
        }
        *self = kept;
    }
}
