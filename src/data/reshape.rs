use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

/// Errors produced by the reshaping core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    /// A categorical code had no entry in the supplied [`CategoryMap`].
    #[error("unmapped category code {0}")]
    UnmappedCategory(i64),
}

/// Column accessor used by [`melt`] and [`aggregate`].
pub type Extractor<R> = fn(&R) -> f64;

// ---------------------------------------------------------------------------
// Wide-to-long reshaper (melt)
// ---------------------------------------------------------------------------

/// One observation of a long-form table: shared identifier, series label,
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct LongRow {
    pub id: f64,
    pub series: String,
    pub value: f64,
}

/// Fold several value columns into long form.
///
/// Output row count is `rows.len() * columns.len()`. Rows come out
/// column-major (every row of the first declared column, then the second),
/// so series ordering follows column declaration order regardless of how
/// the input rows are ordered. `rename` turns a source column name into
/// the series label.
pub fn melt<R>(
    rows: &[R],
    id: Extractor<R>,
    columns: &[(&str, Extractor<R>)],
    rename: impl Fn(&str) -> String,
) -> Vec<LongRow> {
    let mut out = Vec::with_capacity(rows.len() * columns.len());
    for (name, extract) in columns {
        let series = rename(name);
        for row in rows {
            out.push(LongRow {
                id: id(row),
                series: series.clone(),
                value: extract(row),
            });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Category counter
// ---------------------------------------------------------------------------

/// A fixed code→label mapping with a "no category" sentinel.
///
/// Passed explicitly into [`count_categories`] rather than read from a
/// process-wide constant, so counters for other categorical columns can
/// reuse the same machinery.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    sentinel: i64,
    entries: Vec<(i64, &'static str)>,
}

impl CategoryMap {
    pub fn new(sentinel: i64, entries: Vec<(i64, &'static str)>) -> Self {
        CategoryMap { sentinel, entries }
    }

    /// The geometry codes written by the engine's click logger.
    pub fn geometries() -> Self {
        CategoryMap::new(-1, vec![(0, "Point"), (1, "Line"), (2, "Polygon")])
    }
}

/// Count occurrences of each mapped category.
///
/// Sentinel-coded values are excluded before lookup. Every label of the
/// map is present in the output, in declared order, defaulting to 0. A
/// code outside the map's domain is a hard error; it is never coerced
/// into a default bucket.
pub fn count_categories(
    codes: impl IntoIterator<Item = i64>,
    map: &CategoryMap,
) -> Result<Vec<(&'static str, u64)>, ReshapeError> {
    let mut counts = vec![0u64; map.entries.len()];
    for code in codes {
        if code == map.sentinel {
            continue;
        }
        let idx = map
            .entries
            .iter()
            .position(|(c, _)| *c == code)
            .ok_or(ReshapeError::UnmappedCategory(code))?;
        counts[idx] += 1;
    }
    Ok(map
        .entries
        .iter()
        .zip(counts)
        .map(|((_, label), n)| (*label, n))
        .collect())
}

// ---------------------------------------------------------------------------
// Group-by aggregator
// ---------------------------------------------------------------------------

/// Per-column reduction applied within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Sum,
    Mean,
}

/// One column of a group-by: the reducer and the source accessor.
/// Reduced values come out in field declaration order.
pub struct AggField<R> {
    pub reducer: Reducer,
    pub extract: Extractor<R>,
}

/// One output row of [`aggregate`]: the composite key and the reduced
/// field values, in field declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub key: String,
    pub values: Vec<f64>,
}

/// Partition rows on a composite string key and reduce each declared
/// field within its partition.
///
/// Output carries one row per distinct key, sorted by key, so the result
/// does not depend on input row order (beyond float rounding inside a
/// group's running sum).
pub fn aggregate<R>(
    rows: &[R],
    key: impl Fn(&R) -> String,
    fields: &[AggField<R>],
) -> Vec<GroupRow> {
    struct Acc {
        sums: Vec<f64>,
        count: u64,
    }

    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();
    for row in rows {
        let acc = groups.entry(key(row)).or_insert_with(|| Acc {
            sums: vec![0.0; fields.len()],
            count: 0,
        });
        acc.count += 1;
        for (i, field) in fields.iter().enumerate() {
            acc.sums[i] += (field.extract)(row);
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| {
            let values = fields
                .iter()
                .enumerate()
                .map(|(i, field)| match field.reducer {
                    Reducer::Sum => acc.sums[i],
                    Reducer::Mean => acc.sums[i] / acc.count as f64,
                })
                .collect();
            GroupRow { key, values }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Conditional chart-data selector
// ---------------------------------------------------------------------------

/// Presentation mode chosen from the cardinality of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Trend line over the column's values.
    Line,
    /// Single-category distribution view (box plot / scatter).
    Distribution,
}

/// Number of distinct values in a column, by bit pattern (NaN-safe).
pub fn distinct_count(values: impl IntoIterator<Item = f64>) -> usize {
    let mut seen = BTreeSet::new();
    for v in values {
        seen.insert(v.to_bits());
    }
    seen.len()
}

/// Pure predicate behind the shape-switching charts.
pub fn select_mode(distinct: usize) -> ChartMode {
    if distinct > 1 {
        ChartMode::Line
    } else {
        ChartMode::Distribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frame {
        time: f64,
        mouse_x: f64,
        mouse_y: f64,
    }

    fn frames() -> Vec<Frame> {
        vec![
            Frame {
                time: 0.1,
                mouse_x: 10.0,
                mouse_y: 20.0,
            },
            Frame {
                time: 0.2,
                mouse_x: 11.0,
                mouse_y: 21.0,
            },
            Frame {
                time: 0.3,
                mouse_x: 12.0,
                mouse_y: 22.0,
            },
        ]
    }

    #[test]
    fn melt_doubles_row_count_for_two_value_columns() {
        let rows = frames();
        let melted = melt(
            &rows,
            |f| f.time,
            &[("mouseX", |f: &Frame| f.mouse_x), ("mouseY", |f: &Frame| f.mouse_y)],
            |name| name.trim_start_matches("mouse").to_string(),
        );
        assert_eq!(melted.len(), 2 * rows.len());

        // Column-major: all X rows first, then all Y rows.
        assert!(melted[..3].iter().all(|r| r.series == "X"));
        assert!(melted[3..].iter().all(|r| r.series == "Y"));
        assert_eq!(melted[0].id, 0.1);
        assert_eq!(melted[0].value, 10.0);
        assert_eq!(melted[5].value, 22.0);
    }

    #[test]
    fn melt_is_idempotent_over_reordered_input() {
        let mut rows = frames();
        let a = melt(&rows, |f| f.time, &[("mouseX", |f: &Frame| f.mouse_x)], |n| {
            n.to_string()
        });
        rows.reverse();
        let mut b = melt(&rows, |f| f.time, &[("mouseX", |f: &Frame| f.mouse_x)], |n| {
            n.to_string()
        });
        b.reverse();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_keeps_all_labels_at_zero() {
        let counts = count_categories(std::iter::empty(), &CategoryMap::geometries()).unwrap();
        assert_eq!(
            counts,
            vec![("Point", 0), ("Line", 0), ("Polygon", 0)]
        );
    }

    #[test]
    fn sentinel_rows_are_excluded_from_counts() {
        let counts =
            count_categories([-1, -1, 0, 1, 2, 2], &CategoryMap::geometries()).unwrap();
        assert_eq!(
            counts,
            vec![("Point", 1), ("Line", 1), ("Polygon", 2)]
        );
    }

    #[test]
    fn unmapped_code_fails_loudly() {
        let err = count_categories([0, 7], &CategoryMap::geometries()).unwrap_err();
        assert_eq!(err, ReshapeError::UnmappedCategory(7));
    }

    struct NsRow {
        key: &'static str,
        ns: f64,
    }

    #[test]
    fn sum_then_unit_conversion_matches_hand_computation() {
        let rows = vec![
            NsRow { key: "a", ns: 100.0 },
            NsRow { key: "a", ns: 200.0 },
            NsRow { key: "a", ns: 300.0 },
        ];
        let out = aggregate(
            &rows,
            |r| r.key.to_string(),
            &[AggField {
                reducer: Reducer::Sum,
                extract: |r: &NsRow| r.ns,
            }],
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].values[0], 600.0);
        assert_eq!(out[0].values[0] / 1e6, 0.0006);
    }

    #[test]
    fn aggregation_is_input_order_invariant() {
        let mut rows = vec![
            NsRow { key: "a", ns: 1.0 },
            NsRow { key: "b", ns: 2.0 },
            NsRow { key: "a", ns: 3.0 },
            NsRow { key: "b", ns: 4.0 },
        ];
        let fields = [
            AggField {
                reducer: Reducer::Sum,
                extract: |r: &NsRow| r.ns,
            },
            AggField {
                reducer: Reducer::Mean,
                extract: |r: &NsRow| r.ns,
            },
        ];
        let a = aggregate(&rows, |r| r.key.to_string(), &fields);
        rows.reverse();
        let b = aggregate(&rows, |r| r.key.to_string(), &fields);
        assert_eq!(a, b);
        assert_eq!(a[0].key, "a");
        assert_eq!(a[0].values, vec![4.0, 2.0]);
        assert_eq!(a[1].values, vec![6.0, 3.0]);
    }

    #[test]
    fn distinct_groups_survive_aggregation() {
        let rows = vec![
            NsRow { key: "a", ns: 1.0 },
            NsRow { key: "b", ns: 2.0 },
            NsRow { key: "c", ns: 3.0 },
        ];
        let out = aggregate(
            &rows,
            |r| r.key.to_string(),
            &[AggField {
                reducer: Reducer::Sum,
                extract: |r: &NsRow| r.ns,
            }],
        );
        let keys: Vec<&str> = out.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn mode_follows_column_cardinality() {
        assert_eq!(
            select_mode(distinct_count([5.0, 5.0, 5.0])),
            ChartMode::Distribution
        );
        assert_eq!(
            select_mode(distinct_count([5.0, 6.0, 7.0])),
            ChartMode::Line
        );
    }
}
