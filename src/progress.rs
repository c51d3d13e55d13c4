use serde::Serialize;

/// Counters for one graph load pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadProgress {
    pub loading: bool,
    pub nodes_loaded: usize,
    pub edges_loaded: usize,
}

impl LoadProgress {
    /// Starts a new pass, zeroing the counters.
    pub fn begin(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    pub fn record_node(&mut self) {
        self.nodes_loaded += 1;
    }

    pub fn record_edge(&mut self) {
        self.edges_loaded += 1;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_resets_counters() {
        let mut progress = LoadProgress::default();
        progress.begin();
        progress.record_node();
        progress.record_node();
        progress.record_edge();
        assert_eq!(
            progress,
            LoadProgress {
                loading: true,
                nodes_loaded: 2,
                edges_loaded: 1
            }
        );
        progress.finish();
        assert!(!progress.loading);
        assert_eq!(progress.nodes_loaded, 2);

        progress.begin();
        assert_eq!(progress.nodes_loaded, 0);
        assert!(progress.loading);
    }
}
