//! Scoring many raw records from a CSV file.

use crate::classifier::{Classifier, RiskLabel};
use crate::error::{Result, StrokeError};
use crate::pipeline::StrokePredictor;
use crate::record::RawInputRecord;
use log::{info, warn};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Counts reported at the end of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub scored: usize,
    pub at_risk: usize,
    pub rejected: usize,
}

/// Scores every row of `reader`, writing one line per row to `out`.
/// A bad row is reported and skipped.
pub fn predict_csv<C, R, W>(
    predictor: &StrokePredictor<C>,
    reader: R,
    out: &mut W,
) -> Result<BatchSummary>
where
    C: Classifier,
    R: Read,
    W: Write,
{
    let mut rdr = csv::Reader::from_reader(reader);
    let mut summary = BatchSummary::default();

    for (i, row) in rdr.deserialize::<RawInputRecord>().enumerate() {
        let row_no = i + 1;
        let outcome = row
            .map_err(StrokeError::from)
            .and_then(|record| record.check_bounds().map(|_| record))
            .and_then(|record| predictor.predict(&record));

        match outcome {
            Ok(result) => {
                summary.scored += 1;
                if result.label == RiskLabel::AtRisk {
                    summary.at_risk += 1;
                }
                writeln!(
                    out,
                    "row {row_no}: {} (P = {:.2}%)",
                    result.label.message(),
                    result.probability * 100.0
                )?;
            }
            Err(e) => {
                summary.rejected += 1;
                warn!("row {row_no} rejected: {e}");
                writeln!(out, "row {row_no}: ❌ {e}")?;
            }
        }
    }

    writeln!(
        out,
        "scored {}, at risk {}, rejected {}",
        summary.scored, summary.at_risk, summary.rejected
    )?;
    info!("✅ Batch finished: {summary:?}");
    Ok(summary)
}

pub fn predict_csv_file<C, W>(
    predictor: &StrokePredictor<C>,
    path: &Path,
    out: &mut W,
) -> Result<BatchSummary>
where
    C: Classifier,
    W: Write,
{
    let file = File::open(path).map_err(|source| StrokeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("📄 Scoring records from {:?}", path);
    predict_csv(predictor, file, out)
}
