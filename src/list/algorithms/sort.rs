use crate::list::{List, Node};
use std::ptr::NonNull;

/// Bubble sort over the ring: adjacent passes repeat until one completes
/// without a swap. Every unsorted pass removes at least one inversion, so
/// the loop terminates after at most *n* passes.
pub(crate) fn bubble_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    // SAFETY: a pass only walks and re-splices live nodes of `list`, and
    // restores local consistency before returning.
    while unsafe { bubble_pass(list, &mut less) } {}
}

/// One pass from the front: while the current node's successor is live,
/// compare the pair and swap it when out of order, then advance to
/// whichever node now carries the walk. Returns `true` if any swap
/// happened.
unsafe fn bubble_pass<T, F>(list: &mut List<T>, less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    let sentinel = list.sentinel_node();
    let mut node = list.front_node();
    let mut swapped = false;
    while node != sentinel && node.as_ref().next != sentinel {
        let next = node.as_ref().next;
        // strict `<` only: an equal pair never swaps
        if less(&next.as_ref().element, &node.as_ref().element) {
            node = swap_with_next(list, node);
            swapped = true;
        } else {
            node = next;
        }
    }
    swapped
}

/// Move the element of `node` to just after its successor.
///
/// The swap is an excise-and-splice: the node is detached, and its element
/// is carried into a fresh node attached behind the old successor. Node
/// identity therefore does not survive a swap; nothing in the public API
/// can observe node addresses, so only the value sequence matters.
unsafe fn swap_with_next<T>(list: &mut List<T>, node: NonNull<Node<T>>) -> NonNull<Node<T>> {
    let next = node.as_ref().next;
    let element = Node::into_element(list.detach_node(node));
    let node = Node::new_detached(element);
    list.attach_node(next, next.as_ref().next, node);
    node
}
