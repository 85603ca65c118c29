// Comparison matrix views.
//
// `SimilarityMatrix` is built from a run's reported pairs: names are the
// sorted union of everything that appeared in a reported pair, cells default
// to 0.0, and the diagonal is always empty.
//
// `FullMatrix` is the export variant: every document in batch order, every
// off-diagonal cell scored, diagonal fixed at 100.0. It is either rebuilt from
// a run's recorded pair scores or scored from scratch.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::bands::{MATRIX_MODERATE, MATRIX_SEVERE};
use crate::engine::driver::pair_count;
use crate::engine::similarity::similarity;
use crate::engine::tokenize::normalize;
use crate::models::{Document, PairResult};

/// Symmetric matrix over the names found in a pair list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatrix {
    pub names: Vec<String>,
    /// `cells[i][j]` is `None` exactly when `i == j`
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SimilarityMatrix {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

/// Build the matrix over the sorted, de-duplicated names in `pairs`.
pub fn build_matrix(pairs: &[PairResult]) -> SimilarityMatrix {
    let names: Vec<String> = pairs
        .iter()
        .flat_map(|p| [p.name_a.clone(), p.name_b.clone()])
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    build_matrix_for(names, pairs)
}

/// Build the matrix over a caller-chosen list of names.
///
/// Pairs naming something outside `names`, or naming the same document
/// twice, are skipped.
pub fn build_matrix_for(names: Vec<String>, pairs: &[PairResult]) -> SimilarityMatrix {
    let n = names.len();
    let index: HashMap<&str, usize> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut cells: Vec<Vec<Option<f64>>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { None } else { Some(0.0) }).collect())
        .collect();

    for pair in pairs {
        if pair.name_a == pair.name_b {
            continue;
        }
        let (Some(&row), Some(&col)) = (
            index.get(pair.name_a.as_str()),
            index.get(pair.name_b.as_str()),
        ) else {
            continue;
        };
        cells[row][col] = Some(pair.score);
        cells[col][row] = Some(pair.score);
    }

    SimilarityMatrix { names, cells }
}

/// Headline figures shown under the comparison matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MatrixSummary {
    /// Number of reported pairs
    pub total_comparisons: usize,
    pub severe_count: usize,
    /// Pairs above the moderate threshold (severe pairs included)
    pub moderate_count: usize,
    /// Mean score over the reported pairs (0.0 when there are none)
    pub average: f64,
}

impl MatrixSummary {
    pub fn from_pairs(pairs: &[PairResult]) -> Self {
        let total_comparisons = pairs.len();
        let average = if pairs.is_empty() {
            0.0
        } else {
            pairs.iter().map(|p| p.score).sum::<f64>() / total_comparisons as f64
        };

        Self {
            total_comparisons,
            severe_count: pairs.iter().filter(|p| p.score > MATRIX_SEVERE).count(),
            moderate_count: pairs.iter().filter(|p| p.score > MATRIX_MODERATE).count(),
            average,
        }
    }

    /// The matrix view warns at the moderate threshold, not the class-average one.
    pub fn average_warning(&self) -> bool {
        self.average > MATRIX_MODERATE
    }
}

/// Every document against every other, for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullMatrix {
    pub names: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl FullMatrix {
    /// Score all ordered pairs, keeping batch order. Each document is
    /// normalized once; the diagonal is 100.0 regardless of content.
    pub fn score_all(documents: &[Document]) -> Self {
        let tokens: Vec<_> = documents.iter().map(|d| normalize(&d.text)).collect();
        let n = documents.len();
        let mut cells = vec![vec![0.0; n]; n];

        for i in 0..n {
            cells[i][i] = 100.0;
            for j in (i + 1)..n {
                let score = similarity(&tokens[i], &tokens[j]);
                cells[i][j] = score;
                cells[j][i] = score;
            }
        }

        Self {
            names: documents.iter().map(|d| d.name.clone()).collect(),
            cells,
        }
    }

    /// Rebuild the matrix from a completed run's `pair_scores` without
    /// rescoring anything.
    ///
    /// `names` must be in the batch order the run used. Returns `None` when
    /// the score count doesn't match the number of pairs over `names`.
    pub fn from_pair_scores(names: Vec<String>, pair_scores: &[f64]) -> Option<Self> {
        let n = names.len();
        if pair_scores.len() != pair_count(n) {
            return None;
        }

        let mut cells = vec![vec![0.0; n]; n];
        let mut scores = pair_scores.iter().copied();
        for i in 0..n {
            cells[i][i] = 100.0;
            for j in (i + 1)..n {
                let score = scores.next()?;
                cells[i][j] = score;
                cells[j][i] = score;
            }
        }

        Some(Self { names, cells })
    }
}
