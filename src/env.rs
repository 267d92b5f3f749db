use std::collections::BTreeMap;
use std::rc::Rc;

/// Finite mapping from identifier to address, shared cheaply via `Rc` so that
/// cloning an environment when pushing a frame is O(1).
#[derive(Debug)]
pub struct Env<A> {
    bindings: Rc<BTreeMap<String, A>>,
}

impl<A> Clone for Env<A> {
    fn clone(&self) -> Self {
        Env {
            bindings: Rc::clone(&self.bindings),
        }
    }
}

impl<A: PartialEq> PartialEq for Env<A> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.bindings, &other.bindings) || self.bindings == other.bindings
    }
}

impl<A: Eq> Eq for Env<A> {}

impl<A: PartialOrd> PartialOrd for Env<A> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.bindings.partial_cmp(&other.bindings)
    }
}

impl<A: Ord> Ord for Env<A> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bindings.cmp(&other.bindings)
    }
}

impl<A: std::hash::Hash> std::hash::Hash for Env<A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bindings.hash(state)
    }
}

impl<A: Clone> Env<A> {
    pub fn new() -> Self {
        Env {
            bindings: Rc::new(BTreeMap::new()),
        }
    }

    pub fn from_bindings(bindings: impl IntoIterator<Item = (String, A)>) -> Self {
        Env {
            bindings: Rc::new(bindings.into_iter().collect()),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&A> {
        self.bindings.get(name)
    }

    /// Returns a new environment with `name` bound to `addr`; copies the
    /// backing map (the core does not require a persistent map).
    pub fn extend(&self, name: impl Into<String>, addr: A) -> Self {
        let mut bindings = (*self.bindings).clone();
        bindings.insert(name.into(), addr);
        Env {
            bindings: Rc::new(bindings),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<A: Clone> Default for Env<A> {
    fn default() -> Self {
        Self::new()
    }
}
