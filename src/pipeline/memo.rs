use crate::podcast::EnrichedPodcast;

use super::selection::Selection;

/// Identifies one pipeline input set.
///
/// `generation` changes whenever the enriched data set is replaced, so two
/// keys are equal only when both the data and the selection are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub generation: u64,
    pub selection: Selection,
}

/// Single-entry cache for the last pipeline result
#[derive(Debug, Default)]
pub struct PipelineCache {
    entry: Option<(PipelineKey, Vec<EnrichedPodcast>)>,
    computations: usize,
}

impl PipelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the result if `key` differs from the cached key.
    ///
    /// Returns `true` when `compute` ran.
    pub fn refresh<F>(&mut self, key: PipelineKey, compute: F) -> bool
    where
        F: FnOnce() -> Vec<EnrichedPodcast>,
    {
        if matches!(&self.entry, Some((cached, _)) if *cached == key) {
            return false;
        }

        let result = compute();
        self.computations += 1;
        self.entry = Some((key, result));
        true
    }

    /// The cached result; empty before the first refresh
    pub fn current(&self) -> &[EnrichedPodcast] {
        match &self.entry {
            Some((_, result)) => result,
            None => &[],
        }
    }

    /// Number of times the pipeline actually ran
    pub fn computations(&self) -> usize {
        self.computations
    }
}
