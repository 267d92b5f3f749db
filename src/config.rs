use std::time::Duration;

/// Worklist pop discipline. The explorer is confluent in either order: the
/// final halted set and visited count do not depend on this choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WorklistOrder {
    #[default]
    Lifo,
    Fifo,
}

/// Builder-style configuration for [`crate::explorer::Explorer`].
#[derive(Clone, Debug)]
pub struct ExplorerConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) subsumption: bool,
    pub(crate) capture_graph: bool,
    pub(crate) worklist_order: WorklistOrder,
    pub(crate) max_iterations: Option<u64>,
    pub(crate) collect_garbage: bool,
}

impl ExplorerConfig {
    pub fn new() -> Self {
        ExplorerConfig {
            timeout: None,
            subsumption: true,
            capture_graph: false,
            worklist_order: WorklistOrder::Lifo,
            max_iterations: None,
            collect_garbage: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_subsumption(mut self, enabled: bool) -> Self {
        self.subsumption = enabled;
        self
    }

    pub fn with_graph_capture(mut self, enabled: bool) -> Self {
        self.capture_graph = enabled;
        self
    }

    pub fn with_worklist_order(mut self, order: WorklistOrder) -> Self {
        self.worklist_order = order;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Disabling this yields a baseline continuation store that never
    /// cascades `decRef` removals, kept around to verify that reference-
    /// counted collection never changes the halted value set (property 8).
    /// Intended for tests; real callers want the default (`true`).
    pub fn with_garbage_collection(mut self, enabled: bool) -> Self {
        self.collect_garbage = enabled;
        self
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::new()
    }
}
