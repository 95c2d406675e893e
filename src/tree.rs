//! An unbalanced BST built out of raw links. Nodes only point down at their children; whenever an
//! operation needs a node's parent it remembers it while walking down from the root.
//!
//! # Examples
//!
//! ```
//! use comparable_bst::{Text, Tree, Visit};
//!
//! let mut tree = Tree::new();
//! tree.insert(Text::new("M", false))
//!     .insert(Text::new("L", false))
//!     .insert(Text::new("R", false));
//!
//! assert!(tree.contains(&Text::new("L", false)));
//!
//! // Probes bring their own comparison so this finds "M".
//! assert_eq!(tree.get(&Text::new("m", true)), Some(&"M".to_string()));
//!
//! let mut seen = Vec::new();
//! tree.remove(&Text::new("M", false)).visit_in_order(|value| {
//!     seen.push(value.clone());
//!     Visit::Continue
//! });
//! assert_eq!(seen, ["L", "R"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::item::Item;

/// What a visitor wants to happen after it has seen a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Stop the traversal. No further values are visited.
    Done,
    /// Keep going.
    Continue,
}

/// A Binary Search Tree of [`Item`]s. It does not balance itself so inserting already sorted
/// items degrades it to a linked list.
pub struct Tree<I> {
    root: Link<I>,
    marker: PhantomData<Box<Node<I>>>,
}

impl<I> Default for Tree<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Drop for Tree<I> {
    fn drop(&mut self) {
        let mut to_free: Vec<_> = self.root.take().0.into_iter().collect();
        while let Some(ptr) = to_free.pop() {
            // SAFETY: Every node was allocated with `Box::new` in `Link::new` and is owned by
            // exactly one link. We took the root out of the tree and each child pointer is
            // collected exactly once, from its only parent, so nothing is freed twice.
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            to_free.extend(node.left.0);
            to_free.extend(node.right.0);
        }
    }
}

impl<I> Clone for Tree<I>
where
    I: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::new();

        // Each source node is paired with the (still empty) link its copy has to go into.
        let mut pending: Vec<(&Node<I>, *mut Link<I>)> = Vec::new();
        if let Some(root) = self.root() {
            pending.push((root, &mut tree.root as *mut Link<I>));
        }

        while let Some((source, slot)) = pending.pop() {
            let copy = Link::new(source.item.clone());
            // SAFETY: `slot` is either `tree.root` or a child link of a node we allocated in an
            // earlier iteration. Neither has moved or been freed since and nothing else borrows
            // them.
            unsafe { *slot = copy };
            let mut ptr = copy.0.expect("Link::new => node");
            // SAFETY: We just allocated this node and hold the only pointer to it.
            let copy = unsafe { ptr.as_mut() };

            if let Some(left) = source.left() {
                pending.push((left, &mut copy.left as *mut Link<I>));
            }
            if let Some(right) = source.right() {
                pending.push((right, &mut copy.right as *mut Link<I>));
            }
        }

        tree
    }
}

impl<I> fmt::Debug for Tree<I>
where
    I: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

impl<I> Tree<I> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link::none(),
            marker: PhantomData,
        }
    }

    /// Whether the tree has no items.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Whether the tree holds an item that compares equal to `probe`.
    ///
    /// # Examples
    ///
    /// ```
    /// use comparable_bst::{Int, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Int(1));
    ///
    /// assert!(tree.contains(&Int(1)));
    /// assert!(!tree.contains(&Int(42)));
    /// ```
    pub fn contains<P>(&self, probe: &P) -> bool
    where
        I: Item,
        P: Item<Value = I::Value> + ?Sized,
    {
        self.locate(probe).found
    }

    /// Potentially finds the value of the item that compares equal to `probe`. If there is no
    /// such item, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use comparable_bst::{Int, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Int(1));
    ///
    /// assert_eq!(tree.get(&Int(1)), Some(&1));
    /// assert_eq!(tree.get(&Int(42)), None);
    /// ```
    pub fn get<P>(&self, probe: &P) -> Option<&I::Value>
    where
        I: Item,
        P: Item<Value = I::Value> + ?Sized,
    {
        let location = self.locate(probe);
        if !location.found {
            return None;
        }

        // SAFETY: `locate` only hands out links reachable from the root and the returned
        // reference borrows `self` so the node can't be freed while it's alive.
        unsafe { location.node.as_ref() }.map(|node| node.item.value())
    }

    /// Inserts `item`. If an equal item is already in the tree, that item gets
    /// [`update`][Item::update]d with the new item's value instead and `item` is dropped. When the
    /// update changes where the existing item sorts, it is moved to its new position.
    ///
    /// Returns the tree so calls can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use comparable_bst::{Generic, Int, Item, Tree, Visit};
    ///
    /// let mut tree: Tree<Box<dyn Item<Value = i64>>> = Tree::new();
    /// tree.insert(Box::new(Int(1)))
    ///     .insert(Box::new(Int(2)))
    ///     .insert(Box::new(
    ///         Generic::new(3, |this: &i64, to: &i64| this - to).with_updater(|_, _| 0),
    ///     ));
    ///
    /// // The 3 becomes a 0 and moves to the front.
    /// let mut seen = Vec::new();
    /// tree.insert(Box::new(Int(3))).visit_in_order(|value| {
    ///     seen.push(*value);
    ///     Visit::Continue
    /// });
    /// assert_eq!(seen, [0, 1, 2]);
    /// ```
    pub fn insert(&mut self, item: I) -> &mut Self
    where
        I: Item,
        I::Value: Clone,
    {
        let mut pending = Some(item);
        while let Some(item) = pending.take() {
            pending = self.insert_once(item);
        }

        self
    }

    /// Removes the item that compares equal to `probe`. Does nothing if there isn't one.
    ///
    /// Returns the tree so calls can be chained.
    pub fn remove<P>(&mut self, probe: &P) -> &mut Self
    where
        I: Item,
        P: Item<Value = I::Value> + ?Sized,
    {
        self.take(probe);
        self
    }

    /// Removes the item that compares equal to `probe` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use comparable_bst::{Int, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(Int(1));
    ///
    /// assert_eq!(tree.take(&Int(1)), Some(Int(1)));
    /// assert_eq!(tree.take(&Int(1)), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn take<P>(&mut self, probe: &P) -> Option<I>
    where
        I: Item,
        P: Item<Value = I::Value> + ?Sized,
    {
        let Location {
            found,
            node,
            parent,
        } = self.locate(probe);

        match node.0 {
            Some(node) if found => Some(self.remove_node(node, parent)),
            _ => None,
        }
    }

    /// Calls `visitor` with each value from smallest to largest until it returns
    /// [`Visit::Done`].
    pub fn visit_in_order<F>(&self, visitor: F) -> &Self
    where
        I: Item,
        F: FnMut(&I::Value) -> Visit,
    {
        self.visit(Order::Ascending, visitor);
        self
    }

    /// Calls `visitor` with each value from largest to smallest until it returns
    /// [`Visit::Done`].
    pub fn visit_in_reverse<F>(&self, visitor: F) -> &Self
    where
        I: Item,
        F: FnMut(&I::Value) -> Visit,
    {
        self.visit(Order::Descending, visitor);
        self
    }

    fn root(&self) -> Option<&Node<I>> {
        // SAFETY: If the root is not `None` then it is a valid `Node` owned by this tree. The
        // returned reference borrows `self` so the tree can't be mutated while it's alive.
        unsafe { self.root.as_ref() }
    }

    /// Walks down from the root towards `probe`. The returned `node` is the matching node when
    /// `found`, otherwise it's the empty link where `probe` would go. `parent` is the last node
    /// visited before `node`.
    fn locate<P>(&self, probe: &P) -> Location<I>
    where
        I: Item,
        P: Item<Value = I::Value> + ?Sized,
    {
        let mut parent = Link::none();
        let mut node = self.root;

        // SAFETY: Every link reachable from the root points at a live node owned by this tree and
        // we hold `&self` for the whole walk.
        while let Some(current) = unsafe { node.as_ref() } {
            let next = match probe.compare(current.item.value()) {
                Ordering::Less => current.left,
                Ordering::Greater => current.right,
                Ordering::Equal => {
                    return Location {
                        found: true,
                        node,
                        parent,
                    }
                }
            };
            parent = node;
            node = next;
        }

        Location {
            found: false,
            node,
            parent,
        }
    }

    /// Does a single insertion pass. If `item` matched an existing item whose update moved it,
    /// that item is unlinked and handed back to be inserted again.
    fn insert_once(&mut self, item: I) -> Option<I>
    where
        I: Item,
        I::Value: Clone,
    {
        let Location {
            found,
            node,
            parent,
        } = self.locate(&item);

        match node.0 {
            Some(mut ptr) if found => {
                // SAFETY: `ptr` came from `locate` so it's a live node owned by this tree. We
                // hold `&mut self` and no other reference into the tree exists.
                let existing = unsafe { ptr.as_mut() };
                let before = existing.item.value().clone();
                existing.item.update(item.value());

                if existing.item.compare(&before) == Ordering::Equal {
                    return None;
                }

                log::trace!("update changed an item's position, re-inserting it");
                Some(self.remove_node(ptr, parent))
            }
            _ => {
                self.attach(item, parent);
                None
            }
        }
    }

    /// Hangs a new node holding `item` off of `parent`, or makes it the root if there is no
    /// parent.
    fn attach(&mut self, item: I, parent: Link<I>)
    where
        I: Item,
    {
        let Some(mut parent) = parent.0 else {
            debug_assert!(self.root.0.is_none(), "No parent => empty tree");
            self.root = Link::new(item);
            return;
        };

        // SAFETY: `parent` came from `locate` so it's a live node owned by this tree. We hold
        // `&mut self` and no other reference into the tree exists.
        let parent = unsafe { parent.as_mut() };
        if item.compare(parent.item.value()) == Ordering::Less {
            debug_assert!(parent.left.0.is_none(), "Attaching over a left child");
            parent.left = Link::new(item);
        } else {
            debug_assert!(parent.right.0.is_none(), "Attaching over a right child");
            parent.right = Link::new(item);
        }
    }

    /// Unlinks `node` (whose parent is `parent`) from the tree and returns its item.
    ///
    /// A node with two children isn't unlinked itself. It trades items with its in-order
    /// successor and the successor's node, which has no left child, is unlinked instead.
    fn remove_node(&mut self, mut node: NonNull<Node<I>>, mut parent: Link<I>) -> I {
        // SAFETY: `node` came from `locate` so it's a live node owned by this tree. We hold
        // `&mut self` and no other reference into the tree exists.
        let target = unsafe { node.as_mut() };

        if let (Some(_), Some(right)) = (target.left.0, target.right.0) {
            log::trace!("removing a node with two children, promoting its successor");

            let mut successor = right;
            parent = Link(Some(node));
            // SAFETY: These are child links of live nodes owned by this tree. We only read
            // through them.
            while let Some(left) = unsafe { successor.as_ref() }.left.0 {
                parent = Link(Some(successor));
                successor = left;
            }

            // SAFETY: The successor lives in the right subtree of `target` so it's a different
            // node and the two mutable references don't alias.
            std::mem::swap(&mut target.item, unsafe { &mut successor.as_mut().item });
            node = successor;
        }

        // SAFETY: Nothing references `node` except its parent link (or the root) which gets
        // overwritten below before this function returns. It was allocated with `Box::new` in
        // `Link::new`.
        let removed = unsafe { Box::from_raw(node.as_ptr()) };
        debug_assert!(
            removed.left.0.is_none() || removed.right.0.is_none(),
            "Splicing out a node with two children"
        );
        let subtree = if removed.left.0.is_some() {
            removed.left
        } else {
            removed.right
        };

        match parent.0 {
            None => self.root = subtree,
            Some(mut parent) => {
                // SAFETY: `parent` is a live node owned by this tree and distinct from `node`.
                let parent = unsafe { parent.as_mut() };
                if parent.left.0 == Some(node) {
                    parent.left = subtree;
                } else {
                    parent.right = subtree;
                }
            }
        }

        let Node { item, .. } = *removed;
        item
    }

    /// Depth first traversal with an explicit stack so deep trees don't overflow the call stack.
    fn visit<F>(&self, order: Order, mut visitor: F) -> Visit
    where
        I: Item,
        F: FnMut(&I::Value) -> Visit,
    {
        let mut ancestors = Vec::new();
        let mut current = self.root();

        loop {
            while let Some(node) = current {
                ancestors.push(node);
                current = order.first(node);
            }

            let Some(node) = ancestors.pop() else {
                return Visit::Continue;
            };
            if visitor(node.item.value()) == Visit::Done {
                return Visit::Done;
            }
            current = order.second(node);
        }
    }
}

/// Where `locate` ended up.
struct Location<I> {
    found: bool,
    node: Link<I>,
    parent: Link<I>,
}

#[derive(Clone, Copy)]
enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn first<I>(self, node: &Node<I>) -> Option<&Node<I>> {
        match self {
            Self::Ascending => node.left(),
            Self::Descending => node.right(),
        }
    }

    fn second<I>(self, node: &Node<I>) -> Option<&Node<I>> {
        match self {
            Self::Ascending => node.right(),
            Self::Descending => node.left(),
        }
    }
}

struct Link<I>(Option<NonNull<Node<I>>>);

impl<I> Clone for Link<I> {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}
impl<I> Copy for Link<I> {}

impl<I> Link<I> {
    fn none() -> Self {
        Self(None)
    }

    fn new(item: I) -> Self {
        let node = Box::new(Node {
            item,
            left: Self::none(),
            right: Self::none(),
        });
        Self(Some(NonNull::from(Box::leak(node))))
    }

    /// # Safety
    ///
    /// The link must be empty or point at a live node, and the caller picks a lifetime `'a`
    /// during which that node is neither freed nor mutated.
    unsafe fn as_ref<'a>(self) -> Option<&'a Node<I>> {
        match self.0 {
            Some(ptr) => Some(ptr.as_ref()),
            None => None,
        }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

struct Node<I> {
    item: I,
    left: Link<I>,
    right: Link<I>,
}

impl<I> fmt::Debug for Node<I>
where
    I: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<I> Node<I> {
    fn left(&self) -> Option<&Self> {
        // SAFETY: Children are owned by their parent so they live at least as long as `&self`.
        unsafe { self.left.as_ref() }
    }

    fn right(&self) -> Option<&Self> {
        // SAFETY: See `left`.
        unsafe { self.right.as_ref() }
    }
}
