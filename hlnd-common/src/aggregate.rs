//! Summary statistics over a filtered subset
//!
//! All functions are pure and total: an empty subset yields zero counts,
//! empty tables and `None` averages, never a NaN.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

use crate::record::{ArticleRecord, EntityCategory};

/// Headline numbers for a subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total_count: usize,
    /// Distinct non-missing topic labels
    pub unique_topic_count: usize,
    pub anomaly_count: usize,
    /// Mean of the present sentiment values
    ///
    /// `None` is the explicit "undefined" marker for a subset with no
    /// sentiment values (including the empty subset).
    pub average_sentiment: Option<f64>,
}

/// Anomalous versus normal article counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnomalyBreakdown {
    pub anomaly_count: usize,
    pub normal_count: usize,
}

/// One equal-width histogram bucket, `[lower, upper)` except the last
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Sentiment distribution of a subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

pub struct AggregationEngine;

impl AggregationEngine {
    pub fn summarize(subset: &[&ArticleRecord]) -> Metrics {
        let topics: HashSet<&str> = subset.iter().filter_map(|r| r.topic()).collect();

        Metrics {
            total_count: subset.len(),
            unique_topic_count: topics.len(),
            anomaly_count: subset.iter().filter(|r| r.is_anomaly).count(),
            average_sentiment: mean(subset.iter().filter_map(|r| r.sentiment_compound)),
        }
    }

    /// Most frequent topic labels, at most `n`
    ///
    /// Ordered by descending count; equal counts keep the order in which the
    /// topics first appear in the subset.
    pub fn top_topics(subset: &[&ArticleRecord], n: usize) -> Vec<(String, usize)> {
        ranked(subset.iter().filter_map(|r| r.topic()), n)
    }

    pub fn anomaly_breakdown(subset: &[&ArticleRecord]) -> AnomalyBreakdown {
        let anomaly_count = subset.iter().filter(|r| r.is_anomaly).count();
        AnomalyBreakdown {
            anomaly_count,
            normal_count: subset.len() - anomaly_count,
        }
    }

    /// Most frequent entities of one category across the subset, at most `n`
    ///
    /// Same ordering rule as `top_topics`.
    pub fn entity_frequencies(
        subset: &[&ArticleRecord],
        category: EntityCategory,
        n: usize,
    ) -> Vec<(String, usize)> {
        ranked(
            subset
                .iter()
                .flat_map(|r| r.entities(category).iter().map(String::as_str)),
            n,
        )
    }

    /// Equal-width sentiment histogram spanning the subset's own min..max
    ///
    /// `None` when no record carries a sentiment or `bins` is zero. A subset
    /// whose sentiments are all equal gets a single bin.
    pub fn sentiment_histogram(subset: &[&ArticleRecord], bins: usize) -> Option<Histogram> {
        let values: Vec<f64> = subset.iter().filter_map(|r| r.sentiment_compound).collect();
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            return Some(Histogram {
                bins: vec![HistogramBin {
                    lower: min,
                    upper: max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / bins as f64;
        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for v in values {
            let index = (((v - min) / width) as usize).min(bins - 1);
            histogram[index].count += 1;
        }

        Some(Histogram { bins: histogram })
    }
}

fn mean<I: Iterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Count occurrences and keep the top `n`, ties in first-seen order
fn ranked<'a, I: Iterator<Item = &'a str>>(values: I, n: usize) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort: equal counts stay in insertion order
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(value, count)| (value.to_string(), count))
        .collect()
}
