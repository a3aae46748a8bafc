use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::gather::axis::linspace;
use crate::prelude::{RadonError, RadonResult};

/// Traces averaged onto uniformly spaced distance bins.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialStack {
    /// `[bins - 1 × Nt]` stacked traces.
    pub data: Array2<f64>,
    /// Number of input traces that went into each stack.
    pub counts: Vec<usize>,
    /// `bins` distance edges.
    pub edges: Vec<f64>,
    /// Distance at the middle of each stack.
    pub centers: Vec<f64>,
}

/// Sorts traces into `bins - 1` uniform distance stacks and averages each stack.
///
/// Trace `j` joins stack `i` when `edges[i] < distance[j] <= edges[i + 1]`; the
/// trace sitting on the first edge joins stack 0. With `root_order = Some(n)`
/// the stack is an n-th root stack instead of a plain mean.
pub fn partial_stack(
    data: ArrayView2<f64>,
    distances: &[f64],
    bins: usize,
    root_order: Option<f64>,
) -> RadonResult<PartialStack> {
    if data.nrows() != distances.len() {
        return Err(RadonError::ShapeMismatch(format!(
            "{} traces for {} distances",
            data.nrows(),
            distances.len()
        )));
    }
    if bins < 2 {
        return Err(RadonError::InvalidStack(format!(
            "need at least two bin edges, got {}",
            bins
        )));
    }
    if let Some(order) = root_order {
        if !order.is_finite() || order <= 0.0 {
            return Err(RadonError::InvalidStack(format!(
                "root order must be positive, got {}",
                order
            )));
        }
    }

    let (min, max) = distances
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    if distances.is_empty() || max <= min {
        return Err(RadonError::InvalidStack(
            "distances must span a non-zero range".into(),
        ));
    }

    let edges = linspace(min, max, bins);
    let width = edges[1] - edges[0];
    let stacks = bins - 1;
    let centers = linspace(min + width / 2.0, max - width / 2.0, stacks);

    let samples = data.ncols();
    let mut sums = Array2::<f64>::zeros((stacks, samples));
    let mut counts = vec![0usize; stacks];

    for (trace, &distance) in data.axis_iter(Axis(0)).zip(distances) {
        let Some(stack) = stack_index(&edges, distance) else {
            continue;
        };
        let contribution = match root_order {
            Some(order) => trace.mapv(|v| v.signum() * v.abs().powf(1.0 / order)),
            None => trace.to_owned(),
        };
        let mut target = sums.row_mut(stack);
        target += &contribution;
        counts[stack] += 1;
    }

    for (mut row, &count) in sums.axis_iter_mut(Axis(0)).zip(&counts) {
        if count == 0 {
            continue;
        }
        row /= count as f64;
        if let Some(order) = root_order {
            let restored: Array1<f64> = row.mapv(|v| v.signum() * v.abs().powf(order));
            row.assign(&restored);
        }
    }

    Ok(PartialStack {
        data: sums,
        counts,
        edges,
        centers,
    })
}

fn stack_index(edges: &[f64], distance: f64) -> Option<usize> {
    if distance == edges[0] {
        return Some(0);
    }
    edges
        .windows(2)
        .position(|pair| distance > pair[0] && distance <= pair[1])
}
