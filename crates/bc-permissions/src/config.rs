//! Configuration for the permission engine

use crate::algorithms::{CompileOptions, MergeMode, DEFAULT_MAX_COMPARISONS, DEFAULT_MAX_RECTANGLES};
use crate::domain::UsedAxes;
use serde::{Deserialize, Serialize};

/// Engine limits and modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cap on rectangles produced by one compilation. Exceeding it rejects
    /// the input.
    pub max_expanded_rectangles: usize,
    /// Cap on rectangle pairs compared when validating one update.
    pub max_pair_comparisons: usize,
    /// Let the merge pass union one differing address list.
    pub merge_address_lists: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_expanded_rectangles: DEFAULT_MAX_RECTANGLES,
            max_pair_comparisons: DEFAULT_MAX_COMPARISONS,
            merge_address_lists: false,
        }
    }
}

impl EngineConfig {
    /// Config for tests with a small budget.
    pub fn for_testing() -> Self {
        Self {
            max_expanded_rectangles: 1_000,
            max_pair_comparisons: 1_000_000,
            merge_address_lists: false,
        }
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::new(self.max_expanded_rectangles)
    }

    pub fn compile_options_with_catch_all(&self, uses: UsedAxes) -> CompileOptions {
        CompileOptions::with_catch_all(uses, self.max_expanded_rectangles)
    }

    pub fn merge_mode(&self) -> MergeMode {
        if self.merge_address_lists {
            MergeMode::RangesAndAddressLists
        } else {
            MergeMode::RangesOnly
        }
    }
}
