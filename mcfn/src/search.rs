//! The driver tying counter and analyzers together.

use crate::analyze::{can_fit, Analyzer};
use crate::function::{BitAddress, Function};

/// Driver configuration.
pub struct SearchOptions {
    /// Emit a progress log line every this many steps. 0 disables progress
    /// reporting.
    pub progress_interval: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            progress_interval: 5_000_000,
        }
    }
}

/// Counters accumulated over a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of functions found.
    pub functions: u64,
    /// Number of candidates actually examined.
    pub steps: u64,
}

/// Enumerates all functions satisfying every analyzer, in counting order.
///
/// Each iteration queries all analyzers, resuming them from the most
/// significant place changed by the previous iteration, and folds their
/// proposals into the overall resume position. A candidate satisfying all
/// analyzers is passed to `on_function` and then treated like a violation at
/// the least significant place, so the search moves on instead of emitting it
/// again. Runs until the counter wraps around, i.e. the whole space has been
/// either examined or skipped.
///
/// Every emitted candidate is distinct; every skipped candidate is vouched
/// unsatisfiable by at least one analyzer's contract.
pub fn enumerate(
    f: &mut Function,
    analyzers: &mut [&mut dyn Analyzer],
    options: &SearchOptions,
    mut on_function: impl FnMut(&Function),
) -> SearchStats {
    let mut stats = SearchStats::default();

    if !can_fit(f.num_outputs, f.end_input) {
        log::info!("impossibly many output pins, pruning the whole search right away");
        return stats;
    }

    let mut watchdog = 0u64;
    let mut last_change = 0;
    loop {
        stats.steps += 1;
        watchdog += 1;
        let mut next_change = BitAddress::satisfied(f);

        for analyzer in analyzers.iter_mut() {
            let proposed = analyzer.analyze(f, last_change);
            log::trace!("{}: {proposed}", analyzer.name());
            next_change.assign_min(proposed);
        }

        if next_change.is_satisfied(f) {
            on_function(f);
            stats.functions += 1;
            // Force the next candidate to differ at the least significant
            // place.
            next_change = BitAddress::upset(f.end_input - 1, 0);
        } else if options.progress_interval != 0 && watchdog >= options.progress_interval {
            log::debug!("at {f}");
            log::debug!("{} fns in {} steps", stats.functions, stats.steps);
            watchdog -= options.progress_interval;
        }

        last_change = f.advance(next_change);
        if last_change >= f.end_input {
            return stats;
        }
    }
}
