//! This crate provides a doubly-linked list with owned nodes, kept circular
//! through a permanent sentinel node, together with a small set of in-place
//! list algorithms: predicate-based filtering ([`retain`]), reversal
//! ([`reverse`]) and sorting ([`sort`]).
//!
//! The [`List`] allows inserting and removing elements at any given position
//! in constant time. In compromise, accessing or mutating elements at any
//! position takes *O*(*n*) time.
//!
//! A quick example:
//!
//! ```
//! use sentinel_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3, 4, 5]);
//!
//! list.retain(|item| item % 2 == 0);
//! assert_eq!(list, List::from_iter([2, 4]));
//!
//! list.push_front(6);
//! list.reverse();
//! assert_eq!(list, List::from_iter([4, 2, 6]));
//!
//! list.sort();
//! assert_eq!(list.to_string(), "[2, 4, 6]");
//! ```
//!
//! # Memory Layout
//!
//! The list owns a single sentinel node whose payload slot is never read.
//! Each element lives in a heap node carrying `next` and `prev` pointers;
//! the chain of `next` pointers runs from the sentinel through every element
//! and back to the sentinel, and the chain of `prev` pointers runs the same
//! ring in the opposite direction.
//!
//! In an empty list, the sentinel's `next` and `prev` point to the sentinel
//! itself. Otherwise `sentinel.next` is the first element and
//! `sentinel.prev` is the last. Because the sentinel is always present,
//! insertion and removal never need to special-case the ends of the list.
//!
//! With the default `length` feature, the list also tracks its length so
//! that [`List::len`] is *O*(1). Disable it in your `Cargo.toml` to drop
//! the counter:
//! ```text
//! [dependencies]
//! sentinel_list = { default-features = false }
//! ```
//!
//! # Iteration
//!
//! [`Iter`] and [`IterMut`] are double-ended, fused, non-cyclic iterators
//! that walk the ring from `sentinel.next` (or, reversed, from
//! `sentinel.prev`) until they reach the sentinel again. They can be created
//! from the list any number of times, as long as the list is not mutated
//! while one is alive.
//!
//! ```
//! use sentinel_list::List;
//! use std::iter::FromIterator;
//!
//! let list = List::from_iter([1, 2, 3]);
//!
//! let forward: Vec<_> = list.iter().collect();
//! assert_eq!(forward, [&1, &2, &3]);
//!
//! let backward: Vec<_> = list.iter().rev().collect();
//! assert_eq!(backward, [&3, &2, &1]);
//! ```
//!
//! # Cursors
//!
//! [`Cursor`] and [`CursorMut`] point at a node of the list and can move
//! forward or backward over it. In a list with length *n*, there are *n* + 1
//! valid cursor locations, the extra one being the sentinel; all structural
//! edits (insertion before the cursor, removal at the cursor) go through
//! [`CursorMut`].
//!
//! ```
//! use sentinel_list::List;
//! use std::iter::FromIterator;
//!
//! let mut list = List::from_iter([1, 2, 3]);
//! let mut cursor = list.cursor_start_mut();
//!
//! cursor.insert(0); // [0, 1, 2, 3], cursor still at 1
//! assert_eq!(cursor.current(), Some(&1));
//!
//! assert_eq!(cursor.remove(), Some(1)); // [0, 2, 3], cursor at 2
//! assert_eq!(Vec::from_iter(list), vec![0, 2, 3]);
//! ```
//!
//! # Algorithms
//!
//! The in-place algorithms never leave the ring in an inconsistent state:
//! - [`List::retain`] removes every element failing a predicate, keeping
//!   the survivors in their original relative order;
//! - [`List::reverse`] flips every node's link pair (sentinel included), so
//!   forward traversal yields the old backward order;
//! - [`List::sort`] and [`List::sort_by`] run a bubble sort driven by a
//!   strict less-than, so equal elements keep their relative order.
//!
//! [`retain`]: crate::List::retain
//! [`reverse`]: crate::List::reverse
//! [`sort`]: crate::List::sort
//! [`List`]: crate::List
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::list::cursor::Cursor
//! [`CursorMut`]: crate::list::cursor::CursorMut

#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;

pub mod list;

mod experiments;
