//! Correlated missingness between field pairs.
//!
//! For every unordered pair of fields the Jaccard similarity of their
//! missingness indicators is computed: rows where both are missing over
//! rows where either is missing. Pairs are enumerated in schema order
//! (outer field `i`, inner field `j > i`) and that enumeration order is the
//! tie-break for every ranking produced here.
//!
//! # Complexity
//! `O(fields^2 x rows)`. Field counts are expected in the tens; a schema
//! with thousands of fields would need a different approach.

use std::cmp::Ordering;

use super::models::{CorrelationReport, FieldMissingCount, MissingnessIndicators, PairSimilarity};

/// Number of fields reported by [`compute_correlations`].
pub const DEFAULT_TOP_FIELDS: usize = 3;

/// Number of pairs reported by [`compute_correlations`].
pub const DEFAULT_TOP_PAIRS: usize = 5;

/// Jaccard similarity of two missingness vectors.
///
/// Returns 0 when neither vector marks any row as missing. Positions past
/// the end of the shorter vector read as present.
pub fn jaccard(a: &[bool], b: &[bool]) -> f64 {
    let rows = a.len().max(b.len());
    let mut intersection: u64 = 0;
    let mut union: u64 = 0;

    for row in 0..rows {
        let in_a = a.get(row).copied().unwrap_or(false);
        let in_b = b.get(row).copied().unwrap_or(false);
        if in_a && in_b {
            intersection += 1;
        }
        if in_a || in_b {
            union += 1;
        }
    }

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Similarity of every unordered field pair, in enumeration order.
pub fn pair_similarities(indicators: &MissingnessIndicators) -> Vec<PairSimilarity> {
    let fields = indicators.fields();
    let mut pairs = Vec::new();

    for (i, field_a) in fields.iter().enumerate() {
        let column_a = indicators.column_at(i).unwrap_or_default();
        for (j, field_b) in fields.iter().enumerate().skip(i + 1) {
            let column_b = indicators.column_at(j).unwrap_or_default();
            let score = jaccard(column_a, column_b);
            tracing::trace!("jaccard({}, {}) = {:.4}", field_a, field_b, score);

            pairs.push(PairSimilarity {
                field_a: field_a.clone(),
                field_b: field_b.clone(),
                jaccard: score,
            });
        }
    }

    pairs
}

/// Ranks fields and pairs with the default limits (3 fields, 5 pairs).
pub fn compute_correlations(indicators: &MissingnessIndicators) -> CorrelationReport {
    compute_correlations_with_limits(indicators, DEFAULT_TOP_FIELDS, DEFAULT_TOP_PAIRS)
}

/// Ranks fields by raw missing count and pairs by Jaccard similarity.
///
/// - `top_fields`: the `field_limit` fields with the most missing values,
///   descending, ties in schema order.
/// - `top_pairs`: the `pair_limit` most similar pairs, descending, ties in
///   enumeration order.
/// - `best_pair`: the first pair with the strictly greatest score. It is
///   `None` only when there are fewer than two fields.
pub fn compute_correlations_with_limits(
    indicators: &MissingnessIndicators,
    field_limit: usize,
    pair_limit: usize,
) -> CorrelationReport {
    let pairs = pair_similarities(indicators);
    let best_pair = best_pair(&pairs);

    let mut ranked_pairs: Vec<(usize, PairSimilarity)> = pairs.into_iter().enumerate().collect();
    ranked_pairs.sort_by(|(ordinal_a, a), (ordinal_b, b)| {
        descending(a.jaccard, b.jaccard).then(ordinal_a.cmp(ordinal_b))
    });
    let top_pairs: Vec<PairSimilarity> = ranked_pairs
        .into_iter()
        .take(pair_limit)
        .map(|(_, pair)| pair)
        .collect();

    let mut ranked_fields: Vec<(usize, FieldMissingCount)> = indicators
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            (
                index,
                FieldMissingCount {
                    field: field.clone(),
                    missing_count: indicators.missing_count(index),
                },
            )
        })
        .collect();
    ranked_fields.sort_by(|(index_a, a), (index_b, b)| {
        b.missing_count
            .cmp(&a.missing_count)
            .then(index_a.cmp(index_b))
    });
    let top_fields: Vec<FieldMissingCount> = ranked_fields
        .into_iter()
        .take(field_limit)
        .map(|(_, field)| field)
        .collect();

    tracing::debug!(
        "Ranked {} fields and {} pairs",
        indicators.fields().len(),
        top_pairs.len()
    );

    CorrelationReport {
        top_fields,
        top_pairs,
        best_pair,
    }
}

fn best_pair(pairs: &[PairSimilarity]) -> Option<PairSimilarity> {
    let mut best: Option<&PairSimilarity> = None;
    for pair in pairs {
        match best {
            Some(current) if pair.jaccard <= current.jaccard => {}
            _ => best = Some(pair),
        }
    }
    best.cloned()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
