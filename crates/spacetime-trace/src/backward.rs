//! Backward lineage through recorded history.
//!
//! Starting from a blob at "now" (the newest frame in the store), the tracer
//! steps back one recorded frame at a time, following spatial overlap. The
//! walk ends at whichever comes first:
//!
//! - the store runs out of frames ([`BackwardEnd::HistoryExhausted`]),
//! - no alive cell overlaps the blob ([`BackwardEnd::NoAncestors`]); the
//!   empty blob is recorded at that tick,
//! - the requested depth is reached ([`BackwardEnd::DepthReached`]).

use std::collections::BTreeMap;

use serde::Serialize;
use spacetime_types::Blob;
use spacetime_world::HistoryStore;
use tracing::debug;

use crate::error::TraceError;
use crate::overlap::follow_overlap;
use crate::selection::Selection;

/// Default number of steps back from "now".
pub const DEFAULT_BACKWARD_FRAMES: usize = 32;

/// Why a backward walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BackwardEnd {
    /// The oldest recorded frame was reached.
    HistoryExhausted,
    /// Nothing alive overlapped the blob at `tick`: the structure was born
    /// at the following tick.
    NoAncestors {
        /// Tick recorded with an empty blob.
        tick: u64,
    },
    /// `max_frames` steps back were taken.
    DepthReached,
}

/// Ancestry of a blob keyed by absolute tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackwardTrace {
    /// Blob per absolute tick, from the oldest reached up to "now".
    pub frames: BTreeMap<u64, Blob>,
    /// Why the walk stopped.
    pub end: BackwardEnd,
}

impl BackwardTrace {
    /// The newest tick in the trace ("now"), if any frame was recorded.
    pub fn now_tick(&self) -> Option<u64> {
        self.frames.keys().next_back().copied()
    }

    /// The oldest recorded tick and its blob.
    pub fn earliest(&self) -> Option<(u64, &Blob)> {
        self.frames.iter().next().map(|(&tick, blob)| (tick, blob))
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no tick was recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Trace `selection` back through `history` for at most `max_frames` steps
/// beyond the newest frame.
///
/// The selection is expected to be a full connected component of the newest
/// frame.
///
/// # Errors
///
/// Returns [`TraceError::DimsMismatch`] if the selection was taken on a grid
/// other than the one `history` records.
pub fn trace_backward(
    history: &HistoryStore,
    selection: &Selection,
    max_frames: usize,
) -> Result<BackwardTrace, TraceError> {
    let dims = history.dims();
    selection.check_grid(dims)?;

    let depth = i64::try_from(max_frames).unwrap_or(i64::MAX);
    let mut frames = BTreeMap::new();
    let mut active = selection.blob().clone();
    let mut end = BackwardEnd::DepthReached;

    for step in 0..=depth {
        let offset = 0_i64.saturating_sub(step);
        let (Some(frame), Some(tick)) = (history.frame_at(offset), history.tick_at(offset)) else {
            end = BackwardEnd::HistoryExhausted;
            break;
        };

        let ancestors = follow_overlap(frame.cells(), dims, &active);
        if ancestors.is_empty() {
            frames.insert(tick, Blob::new());
            end = BackwardEnd::NoAncestors { tick };
            break;
        }

        frames.insert(tick, ancestors.clone());
        active = ancestors;
    }

    debug!(
        recorded = frames.len(),
        start_cells = selection.len(),
        ?end,
        "Backward trace finished"
    );
    Ok(BackwardTrace { frames, end })
}
