//! Customer dataset loading and the aggregates behind the EDA charts, using Polars

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use crate::error::{LoadError, Resource};

pub const CONTRACT: &str = "Contract";
pub const INTERNET_SERVICE: &str = "InternetService";
pub const TENURE: &str = "tenure";
pub const TOTAL_CHARGES: &str = "TotalCharges";
pub const CHURN: &str = "Churn";

/// Label marking a customer who left
pub const CHURNED: &str = "Yes";

const REQUIRED_COLUMNS: [&str; 5] = [CONTRACT, INTERNET_SERVICE, TENURE, TOTAL_CHARGES, CHURN];

/// Cleaned customer table
#[derive(Debug, Clone)]
pub struct ChurnData {
    /// Rows that survived coercion and null removal
    pub frame: DataFrame,
    /// Rows dropped while cleaning
    pub dropped_rows: usize,
}

/// Row counts of a categorical column split by churn label
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedCounts {
    pub column: String,
    /// Category values in order of first appearance
    pub categories: Vec<String>,
    /// Churn labels in order of first appearance
    pub hues: Vec<String>,
    counts: BTreeMap<(String, String), u64>,
}

impl GroupedCounts {
    pub fn count(&self, category: &str, hue: &str) -> u64 {
        self.counts
            .get(&(category.to_string(), hue.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

/// Equal-width histogram with one stacked layer per churn label
#[derive(Debug, Clone, PartialEq)]
pub struct StackedHistogram {
    pub column: String,
    /// `bins + 1` ascending edges
    pub edges: Vec<f64>,
    pub hues: Vec<String>,
    /// `layers[h][b]` counts rows with hue `h` falling in bin `b`
    pub layers: Vec<Vec<u64>>,
}

impl StackedHistogram {
    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Height of the stacked bar for bin `b`
    pub fn bin_total(&self, bin: usize) -> u64 {
        self.layers.iter().map(|layer| layer[bin]).sum()
    }

    pub fn total(&self) -> u64 {
        self.layers.iter().flatten().sum()
    }
}

/// Load the customer CSV and clean it.
///
/// `TotalCharges` is coerced to a float (unparseable values such as the blank
/// entries of brand-new customers become null), then every row holding a null
/// in any column is dropped.
///
/// # Arguments
/// * `file_path` - Path to the CSV file
///
/// # Returns
/// * `ChurnData` with the cleaned frame
pub fn load_customers(file_path: &Path) -> crate::Result<ChurnData> {
    if !file_path.is_file() {
        return Err(LoadError::missing(Resource::Dataset, file_path).into());
    }

    let schema = LazyCsvReader::new(file_path)
        .with_has_header(true)
        .finish()?
        .collect_schema()?;
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|name| !schema.contains(name)) {
        return Err(LoadError::MissingColumn((*missing).to_string()).into());
    }

    // read TotalCharges as text so that the cast below is the only coercion,
    // whatever the inference window saw
    let overrides = Schema::from_iter([Field::new(TOTAL_CHARGES.into(), DataType::String)]);
    let lf = LazyCsvReader::new(file_path)
        .with_has_header(true)
        .with_infer_schema_length(Some(10_000))
        .with_dtype_overwrite(Some(Arc::new(overrides)))
        .finish()?;

    let raw = lf.collect()?;
    let raw_rows = raw.height();

    let frame = raw
        .lazy()
        .with_columns([col(TOTAL_CHARGES).cast(DataType::Float64)])
        .drop_nulls(None)
        .collect()?;

    let dropped_rows = raw_rows.saturating_sub(frame.height());
    tracing::debug!(
        rows = frame.height(),
        dropped = dropped_rows,
        path = %file_path.display(),
        "customer data loaded"
    );

    Ok(ChurnData {
        frame,
        dropped_rows,
    })
}

impl ChurnData {
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Percentage of rows labelled as churned, 0.0 for an empty table
    pub fn churn_rate(&self) -> crate::Result<f64> {
        if self.is_empty() {
            return Ok(0.0);
        }

        let churned = self
            .frame
            .column(CHURN)?
            .cast(&DataType::String)?
            .str()?
            .into_iter()
            .flatten()
            .filter(|label| *label == CHURNED)
            .count();

        Ok(churned as f64 / self.len() as f64 * 100.0)
    }

    /// Count rows per (category, churn label) pair, keeping the row order in
    /// which categories first appear
    pub fn grouped_counts(&self, column: &str) -> crate::Result<GroupedCounts> {
        let grouped = self
            .frame
            .clone()
            .lazy()
            .group_by_stable([col(column), col(CHURN)])
            .agg([len().alias("count")])
            .collect()?;

        let categories_col = grouped.column(column)?.cast(&DataType::String)?;
        let hues_col = grouped.column(CHURN)?.cast(&DataType::String)?;
        let counts_col = grouped.column("count")?.cast(&DataType::UInt64)?;

        let mut counts = BTreeMap::new();
        let mut categories: Vec<String> = Vec::new();
        let mut hues: Vec<String> = Vec::new();
        for ((category, hue), count) in categories_col
            .str()?
            .into_iter()
            .flatten()
            .zip(hues_col.str()?.into_iter().flatten())
            .zip(counts_col.u64()?.into_no_null_iter())
        {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
            if !hues.iter().any(|h| h == hue) {
                hues.push(hue.to_string());
            }
            counts.insert((category.to_string(), hue.to_string()), count);
        }

        Ok(GroupedCounts {
            column: column.to_string(),
            categories,
            hues,
            counts,
        })
    }

    /// Bin a numeric column into `bins` equal-width intervals spanning its
    /// observed range, stacked by churn label. The last bin is closed.
    pub fn stacked_histogram(&self, column: &str, bins: usize) -> crate::Result<StackedHistogram> {
        if bins == 0 {
            anyhow::bail!("Histogram needs at least one bin");
        }

        let values: Vec<f64> = self
            .frame
            .column(column)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_no_null_iter()
            .collect();
        let labels_col = self.frame.column(CHURN)?.cast(&DataType::String)?;
        let labels: Vec<&str> = labels_col.str()?.into_iter().flatten().collect();

        let mut hues: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        hues.sort();
        hues.dedup();

        let edges = bin_edges(&values, bins);
        let mut layers = vec![vec![0u64; bins]; hues.len()];
        for (value, label) in values.iter().zip(labels.iter()) {
            let bin = bin_index(&edges, *value);
            if let Ok(hue) = hues.binary_search_by(|h| h.as_str().cmp(label)) {
                layers[hue][bin] += 1;
            }
        }

        Ok(StackedHistogram {
            column: column.to_string(),
            edges,
            hues,
            layers,
        })
    }
}

fn bin_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if values.is_empty() {
        (0.0, 1.0)
    } else if min == max {
        // a single distinct value still gets a unit-wide range
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let width = (max - min) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { max } else { min + width * i as f64 })
        .collect()
}

fn bin_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let min = edges[0];
    let max = edges[bins];
    let pos = ((value - min) / (max - min) * bins as f64).floor();
    (pos.max(0.0) as usize).min(bins - 1)
}
