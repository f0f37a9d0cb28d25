use std::sync::Arc;

use crate::foundation::error::{LumenError, LumenResult};

/// Worker configuration for row-parallel passes (convolution, pointwise filters).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RowThreading {
    /// Split rows across rayon workers.
    pub parallel: bool,
    /// Dedicated pool size. `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl Default for RowThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl RowThreading {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }

    pub fn with_threads(threads: usize) -> Self {
        Self {
            parallel: true,
            threads: Some(threads),
        }
    }

    /// Build the dedicated pool this configuration asks for, once.
    ///
    /// `None` means work runs on the global rayon pool (or inline when not parallel).
    pub(crate) fn build_pool(&self) -> LumenResult<Option<Arc<rayon::ThreadPool>>> {
        let Some(threads) = self.threads.filter(|_| self.parallel) else {
            return Ok(None);
        };
        if threads == 0 {
            return Err(LumenError::config(
                "row threading 'threads' must be >= 1 when set",
            ));
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lumen-rows-{i}"))
            .build()
            .map(|pool| Some(Arc::new(pool)))
            .map_err(|e| {
                LumenError::Other(anyhow::anyhow!("rayon pool with {threads} threads: {e}"))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
