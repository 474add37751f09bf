use crate::list::List;
use std::cmp::Ordering;
use std::mem;

mod sort;

/// Structural value equality: forward traversals compared pairwise,
/// unequal lengths compare unequal. Node addresses never take part.
impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> List<T> {
    /// Retains only the elements satisfying the predicate, in place.
    ///
    /// Walks every live node from the front; nodes whose element fails the
    /// predicate are excised, and the traversal continues from the
    /// following node either way. Survivors keep their original relative
    /// order. Retaining everything, nothing, or anything of an empty list
    /// is a no-op in structure.
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.retain(|item| item % 2 == 0);
    /// assert_eq!(list, List::from_iter([2, 4]));
    ///
    /// list.retain(|_| false);
    /// assert!(list.is_empty());
    /// ```
    pub fn retain<F>(&mut self, mut pred: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor_start_mut();
        loop {
            match cursor.current() {
                Some(item) if !pred(item) => {
                    cursor.remove();
                }
                Some(_) => cursor.move_next_cyclic(),
                None => break,
            }
        }
    }

    /// Reverses the list in place.
    ///
    /// Every live node's `prev`/`next` pair is swapped, advancing through
    /// the node's new `prev` (which holds the old `next`); once the walk
    /// returns to the sentinel, the sentinel's own pair is swapped as well,
    /// so a forward traversal now yields the old backward order.
    ///
    /// Reversal is an involution: reversing twice restores the original
    /// sequence.
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3, 4, 5]);
    /// list.reverse();
    /// assert_eq!(list, List::from_iter([5, 4, 3, 2, 1]));
    /// ```
    pub fn reverse(&mut self) {
        let sentinel = self.sentinel_node();
        let mut node = self.front_node();
        // SAFETY: the walk only visits live nodes of the ring, each exactly
        // once; directionality is corrupted while it runs but every link
        // still points at a live node, and the final sentinel swap closes
        // the ring again.
        unsafe {
            while node != sentinel {
                let links = node.as_mut();
                mem::swap(&mut links.next, &mut links.prev);
                node = links.prev;
            }
            let mut sentinel = sentinel;
            let links = sentinel.as_mut();
            mem::swap(&mut links.next, &mut links.prev);
        }
    }

    /// Sorts the list in place, ascending.
    ///
    /// # Current Implementation
    ///
    /// Bubble sort: adjacent passes repeat until a full pass makes no swap.
    /// Comparisons use strict less-than only, so equal elements never swap
    /// and keep their original relative order.
    ///
    /// This operation should compute in *O*(*n*²) time worst case.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 3, 12, 6, 4, 5]);
    /// list.sort();
    /// assert_eq!(list, List::from_iter([1, 3, 4, 5, 6, 12]));
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        sort::bubble_sort(self, |a, b| a.lt(b));
    }

    /// Sorts the list in place with a comparator function.
    ///
    /// The comparator must define a total ordering for the elements; only
    /// its `Less` outcomes drive swaps, so elements the comparator
    /// considers equal keep their original relative order.
    ///
    /// This operation should compute in *O*(*n*²) time worst case.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([5, 4, 1, 3, 2]);
    /// list.sort_by(|a, b| b.cmp(a)); // descending
    /// assert_eq!(list, List::from_iter([5, 4, 3, 2, 1]));
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::bubble_sort(self, |a, b| compare(a, b) == Ordering::Less)
    }
}

#[cfg(test)]
mod tests {
    use crate::list::check_links;
    use crate::List;
    use std::iter::FromIterator;

    #[test]
    fn list_equality() {
        assert_eq!(List::from_iter([1, 2, 3, 4, 5]), List::from_iter([1, 2, 3, 4, 5]));
        // value mismatch
        assert_ne!(List::from_iter([1, 2, 3, 4, 5]), List::from_iter([1, 2, 4, 4, 5]));
        // length mismatch, both ways
        assert_ne!(List::from_iter([1, 2, 3, 4, 5]), List::from_iter([1, 4, 5]));
        assert_ne!(List::from_iter([1, 4, 5]), List::from_iter([1, 2, 3, 4, 5]));
        assert_eq!(List::<i32>::new(), List::new());
        assert_ne!(List::new(), List::from_iter([1]));
    }

    #[test]
    fn retain_filters_in_order() {
        let mut list = List::from_iter([1, 2, 3, 4, 5]);
        list.retain(|item| item % 2 == 0);
        assert_eq!(list, List::from_iter([2, 4]));
        check_links(&list);
    }

    #[test]
    fn retain_all_and_none() {
        let mut list = List::from_iter(0..10);
        list.retain(|_| true);
        assert_eq!(list, List::from_iter(0..10));
        check_links(&list);

        list.retain(|_| false);
        assert!(list.is_empty());
        check_links(&list);

        // removing the head repeatedly
        let mut list = List::from_iter([1, 1, 1, 2]);
        list.retain(|&item| item != 1);
        assert_eq!(list, List::from_iter([2]));
        check_links(&list);
    }

    #[test]
    fn retain_empty_is_noop() {
        let mut list = List::<i32>::new();
        list.retain(|_| false);
        assert!(list.is_empty());
        check_links(&list);
    }

    #[test]
    fn reverse_known_sequence() {
        let mut list = List::from_iter([1, 2, 3, 4, 5]);
        list.reverse();
        assert_eq!(list, List::from_iter([5, 4, 3, 2, 1]));
        check_links(&list);
    }

    #[test]
    fn reverse_is_involution() {
        for len in 0..8 {
            let mut list = List::from_iter(0..len);
            list.reverse();
            list.reverse();
            assert_eq!(list, List::from_iter(0..len));
            check_links(&list);
        }
    }

    #[test]
    fn reverse_matches_reversed_input() {
        let input = [7, 3, 3, 9, 0];
        let mut list = List::from_iter(input);
        list.reverse();
        assert_eq!(list, List::from_iter(input.iter().rev().copied()));
        check_links(&list);
    }

    #[test]
    fn sort_known_sequences() {
        let mut list = List::from_iter([1, 3, 12, 6, 4, 5]);
        list.sort();
        assert_eq!(list, List::from_iter([1, 3, 4, 5, 6, 12]));
        check_links(&list);

        let mut list = List::from_iter([5, 4, 3, 2, 1, 0]);
        list.sort();
        assert_eq!(list, List::from_iter(0..6));
        check_links(&list);
    }

    #[test]
    fn sort_all_permutations() {
        // Every permutation of a fixed multiset sorts to the same ascending order.
        fn permutations(values: &mut Vec<i32>, k: usize, out: &mut Vec<Vec<i32>>) {
            if k <= 1 {
                out.push(values.clone());
                return;
            }
            for i in 0..k {
                permutations(values, k - 1, out);
                if k % 2 == 0 {
                    values.swap(i, k - 1);
                } else {
                    values.swap(0, k - 1);
                }
            }
        }

        let mut values = vec![3, 1, 4, 1, 5];
        let mut sorted = values.clone();
        sorted.sort();

        let len = values.len();
        let mut all = Vec::new();
        permutations(&mut values, len, &mut all);

        for permutation in all {
            let mut list = List::from_iter(permutation);
            list.sort();
            assert_eq!(list, List::from_iter(sorted.iter().copied()));
            check_links(&list);
        }
    }

    #[test]
    fn sort_is_idempotent() {
        let mut list = List::from_iter([2, 9, 9, 1, 5]);
        list.sort();
        let once = list.clone();
        list.sort();
        assert_eq!(list, once);
        check_links(&list);
    }

    #[test]
    fn sort_empty_and_singleton() {
        let mut list = List::<i32>::new();
        list.sort();
        assert!(list.is_empty());
        check_links(&list);

        let mut list = List::from_iter([42]);
        list.sort();
        assert_eq!(list, List::from_iter([42]));
        check_links(&list);
    }

    #[test]
    fn sort_preserves_order_of_equal_elements() {
        // Equal keys never compare `Less`, so they never swap: the sequence
        // numbers of equal keys must come out in their original order.
        let mut list = List::from_iter([(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')]);
        list.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            list,
            List::from_iter([(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')])
        );
        check_links(&list);
    }

    #[test]
    fn sort_by_descending() {
        let mut list = List::from_iter([3, 1, 4, 1, 5]);
        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list, List::from_iter([5, 4, 3, 1, 1]));
        check_links(&list);
    }

    #[test]
    fn empty_list_algorithms_are_noops() {
        let mut list = List::<i32>::new();
        list.retain(|_| true);
        list.reverse();
        list.sort();
        assert!(list.is_empty());
        assert_eq!(list, List::new());
        check_links(&list);
    }
}
