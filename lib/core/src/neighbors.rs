//! Neighbor selection and majority vote.

/// A training row at a given distance from the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub distance: f64,
    pub index: usize,
}

/// Select the `k` nearest rows, closest first.
///
/// The sort is stable: rows at equal distance keep training-table order.
/// `k` larger than `distances.len()` selects every row.
pub fn select_k_nearest(distances: &[f64], k: usize) -> Vec<Neighbor> {
    let mut pairs: Vec<Neighbor> = distances
        .iter()
        .copied()
        .enumerate()
        .map(|(index, distance)| Neighbor { distance, index })
        .collect();

    pairs.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    pairs.truncate(k);
    pairs
}

/// Most frequent label among `neighbors`, with its vote count.
///
/// Ties go to the label whose first occurrence is nearest, i.e. the one seen
/// first when walking `neighbors` in order. Returns `None` for an empty slice.
pub fn majority_vote<'a>(neighbors: &[Neighbor], labels: &'a [String]) -> Option<(&'a str, usize)> {
    // (label, count) in first-seen order
    let mut tally: Vec<(&'a str, usize)> = Vec::new();

    for neighbor in neighbors {
        let label = labels[neighbor.index].as_str();
        match tally.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best: Option<(&'a str, usize)> = None;
    for &(label, count) in &tally {
        // strict > keeps the earlier label on ties
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((label, count));
        }
    }
    best
}
