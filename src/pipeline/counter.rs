//! Sliding-window motif counter.
//!
//! After sorting an edge's observations by time, the `h`-subset with the
//! smallest span is always a contiguous run, so checking the `n - h + 1`
//! windows `[j, j + h - 1]` counts every valid motif instance.

use std::time::Instant;

use crate::config::MotifConfig;
use crate::model::{AggregateEdge, MotifEdge, Timestamp, Witness};
use crate::{Error, Result};

/// Window parameters for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    /// `dT`: max span between first and last of the `h` observations.
    pub repetition_window: Timestamp,
    pub h: usize,
    pub verbose: bool,
}

impl From<&MotifConfig> for WindowSpec {
    fn from(config: &MotifConfig) -> Self {
        Self {
            repetition_window: config.repetition_window,
            h: config.h,
            verbose: config.verbose,
        }
    }
}

/// Number of `j` in `[0, n - h]` with `sorted[j + h - 1] - sorted[j] <= window`.
///
/// `sorted` must be ascending. Zero when `n < h` or `h == 0`.
pub fn count_windows(sorted: &[Timestamp], h: usize, window: Timestamp) -> usize {
    qualifying_windows(sorted, h, window).count()
}

/// Start indices `j` of the qualifying windows over ascending `sorted`.
fn qualifying_windows(
    sorted: &[Timestamp],
    h: usize,
    window: Timestamp,
) -> impl Iterator<Item = usize> + '_ {
    let starts = if h == 0 { 0 } else { (sorted.len() + 1).saturating_sub(h) };
    (0..starts).filter(move |&j| sorted[j + h - 1].saturating_sub(sorted[j]) <= window)
}

/// Count the motif instances on one aggregate edge.
///
/// Returns `None` when no window qualifies.
pub fn count_edge(mut edge: AggregateEdge, params: WindowSpec) -> Option<MotifEdge> {
    let h = params.h;
    if h == 0 || edge.timestamps.len() < h {
        return None;
    }
    edge.sort_by_time();

    let mut weight = 0usize;
    let mut witnesses: Vec<Witness> = Vec::new();
    for j in qualifying_windows(&edge.timestamps, h, params.repetition_window) {
        weight += 1;
        if params.verbose {
            witnesses.push(edge.roots[j..j + h].iter().cloned().collect());
        }
    }

    (weight > 0).then(|| MotifEdge {
        source: edge.source,
        target: edge.target,
        weight,
        witnesses: params.verbose.then_some(witnesses),
    })
}

/// Count motifs on every aggregate edge, keeping input order.
///
/// The deadline is checked before each edge, never inside one edge's
/// window scan, so a single very long edge always runs to completion.
/// `DeadlineExceeded::processed` is the number of edges already finished.
pub fn count_motifs(
    edges: Vec<AggregateEdge>,
    params: WindowSpec,
    deadline: Option<Instant>,
) -> Result<Vec<MotifEdge>> {
    let total = edges.len();
    let motifs = count_all(edges, params, deadline)?;
    tracing::debug!(edges = total, motifs = motifs.len(), "counted motif windows");
    Ok(motifs)
}

fn check_deadline(deadline: Option<Instant>, processed: usize, total: usize) -> Result<()> {
    match deadline {
        Some(d) if Instant::now() >= d => Err(Error::DeadlineExceeded { processed, total }),
        _ => Ok(()),
    }
}

#[cfg(not(feature = "parallel"))]
fn count_all(
    edges: Vec<AggregateEdge>,
    params: WindowSpec,
    deadline: Option<Instant>,
) -> Result<Vec<MotifEdge>> {
    let total = edges.len();
    let mut motifs = Vec::new();
    for (processed, edge) in edges.into_iter().enumerate() {
        check_deadline(deadline, processed, total)?;
        motifs.extend(count_edge(edge, params));
    }
    Ok(motifs)
}

#[cfg(feature = "parallel")]
fn count_all(
    edges: Vec<AggregateEdge>,
    params: WindowSpec,
    deadline: Option<Instant>,
) -> Result<Vec<MotifEdge>> {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use rayon::prelude::*;

    let total = edges.len();
    let processed = AtomicUsize::new(0);
    let counted: Vec<Option<MotifEdge>> = edges
        .into_par_iter()
        .map(|edge| {
            check_deadline(deadline, processed.load(Ordering::Relaxed), total)?;
            let motif = count_edge(edge, params);
            processed.fetch_add(1, Ordering::Relaxed);
            Ok(motif)
        })
        .collect::<Result<_>>()?;
    Ok(counted.into_iter().flatten().collect())
}
