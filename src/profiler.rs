use crate::node::SearchNode;
use crate::operation::EditOperation;
use strum::{EnumCount, IntoEnumIterator};

/// Debug hook notified once per node update.
pub trait OperationProfiler {
    fn record(&mut self, op: EditOperation, node: &SearchNode);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProfiler;

impl OperationProfiler for NoopProfiler {
    #[inline(always)]
    fn record(&mut self, _op: EditOperation, _node: &SearchNode) {}
}

/// Counts how often each operation was applied.
#[derive(Debug, Default, Clone)]
pub struct OperationCounter {
    counts: [u64; EditOperation::COUNT],
}

impl OperationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, op: EditOperation) -> u64 {
        self.counts[op.tag() as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EditOperation, u64)> + '_ {
        EditOperation::iter().map(move |op| (op, self.count(op)))
    }
}

impl OperationProfiler for OperationCounter {
    #[inline]
    fn record(&mut self, op: EditOperation, _node: &SearchNode) {
        self.counts[op.tag() as usize] += 1;
    }
}

impl<T: OperationProfiler + ?Sized> OperationProfiler for &mut T {
    #[inline]
    fn record(&mut self, op: EditOperation, node: &SearchNode) {
        (**self).record(op, node);
    }
}
