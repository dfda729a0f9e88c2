//! One-shot viewport observation.
//!
//! Both the reveal animator and the lazy image loader track elements that
//! change state the first time they intersect the viewport and are then
//! dropped from observation. [`OneShot`] owns that `Pending → Revealed`
//! transition so it can happen at most once per element.

/// Which of the page's two intersection observers an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Entrance animations for cards, timeline and gallery items
    Reveal,
    /// Deferred image sources
    LazyImages,
}

/// Options a host needs to build an intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that counts as intersecting. `None` keeps the host
    /// default.
    pub threshold: Option<f64>,
    /// CSS margin applied to the root. `None` keeps the host default.
    pub root_margin: Option<String>,
}

/// A single intersection change reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
}

impl<N> IntersectionEntry<N> {
    pub fn entering(target: N) -> Self {
        Self {
            target,
            is_intersecting: true,
        }
    }

    pub fn leaving(target: N) -> Self {
        Self {
            target,
            is_intersecting: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// An observed element.
#[derive(Debug, Clone)]
pub struct Tracked<N, G> {
    pub node: N,
    pub group: G,
    /// Position within its group, in document order
    pub index: usize,
    pub state: RevealState,
}

/// Set of elements waiting for their first intersection.
#[derive(Debug)]
pub struct OneShot<N, G> {
    tracked: Vec<Tracked<N, G>>,
}

impl<N, G> Default for OneShot<N, G> {
    fn default() -> Self {
        Self {
            tracked: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq, G: Copy> OneShot<N, G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `node`. Re-registering a known node is ignored.
    pub fn observe(&mut self, node: N, group: G, index: usize) {
        if self.tracked.iter().any(|t| t.node == node) {
            return;
        }
        self.tracked.push(Tracked {
            node,
            group,
            index,
            state: RevealState::Pending,
        });
    }

    /// Move `node` to `Revealed`. Returns the entry only on the first call for
    /// a tracked node.
    pub fn reveal(&mut self, node: &N) -> Option<Tracked<N, G>> {
        let entry = self
            .tracked
            .iter_mut()
            .find(|t| t.node == *node && t.state == RevealState::Pending)?;
        entry.state = RevealState::Revealed;
        Some(entry.clone())
    }

    pub fn state(&self, node: &N) -> Option<RevealState> {
        self.tracked.iter().find(|t| t.node == *node).map(|t| t.state)
    }

    /// Nodes still waiting to be revealed.
    pub fn pending(&self) -> Vec<N> {
        self.tracked
            .iter()
            .filter(|t| t.state == RevealState::Pending)
            .map(|t| t.node.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }
}
