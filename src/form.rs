//! Line-oriented patient form for the interactive CLI.
//!
//! Generic over any `BufRead`/`Write` pair so sessions can be scripted.

use crate::classifier::{Classifier, PredictionResult};
use crate::error::{Result, StrokeError};
use crate::pipeline::StrokePredictor;
use crate::record::RawInputRecord;
use crate::schema::{FEATURE_ORDER, Feature, FeatureKind, NumericBounds};
use log::warn;
use std::io::{self, BufRead, Write};

pub const MISSING_SELECTION_WARNING: &str = "⚠️ Please complete all selections first.";
pub const DISCLAIMER: &str =
    "Note: this prediction is informational only and is not a medical diagnosis.";

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer<T> {
    Value(T),
    Exit,
}

pub struct Form<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Form<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Form { input, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads one trimmed line; end of input and `exit` both end the session.
    fn read_line(&mut self) -> io::Result<Answer<String>> {
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Answer::Exit);
        }
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            Ok(Answer::Exit)
        } else {
            Ok(Answer::Value(line.to_string()))
        }
    }

    /// Asks for one option of a categorical field; an empty answer leaves it unset.
    ///
    /// Options are picked by their listed number, their value or their
    /// display text. Flags whose values are themselves numerals (`0`/`1`)
    /// are not numbered and only take their display text (`Yes`/`No`), so a
    /// typed digit can never be read as both an option number and a value.
    pub fn select(
        &mut self,
        feature: Feature,
        domain: &[&str],
    ) -> io::Result<Answer<Option<String>>> {
        let numbered = !feature.has_numeral_domain();
        loop {
            if numbered {
                writeln!(self.out, "{}:", feature.label())?;
                writeln!(self.out, "  0) (unset)")?;
                for (i, value) in domain.iter().enumerate() {
                    writeln!(self.out, "  {}) {}", i + 1, feature.display_value(value))?;
                }
            } else {
                let options: Vec<&str> =
                    domain.iter().map(|v| feature.display_value(v)).collect();
                writeln!(
                    self.out,
                    "{} ({}, empty to leave unset):",
                    feature.label(),
                    options.join("/")
                )?;
            }
            write!(self.out, "> ")?;

            let line = match self.read_line()? {
                Answer::Value(line) => line,
                Answer::Exit => return Ok(Answer::Exit),
            };
            if line.is_empty() || (numbered && line == "0") {
                return Ok(Answer::Value(None));
            }
            if numbered {
                if let Some(value) = line
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| domain.get(i))
                {
                    return Ok(Answer::Value(Some(value.to_string())));
                }
            }
            let matches = |v: &&&str| {
                (numbered && v.eq_ignore_ascii_case(&line))
                    || feature.display_value(v).eq_ignore_ascii_case(&line)
            };
            if let Some(value) = domain.iter().find(matches) {
                return Ok(Answer::Value(Some(value.to_string())));
            }
            if numbered {
                writeln!(
                    self.out,
                    "Invalid choice {line:?}, pick 0-{} or type an option.",
                    domain.len()
                )?;
            } else {
                writeln!(self.out, "Invalid choice {line:?}, answer Yes or No.")?;
            }
        }
    }

    /// Asks for a numeric field until the answer is within `bounds`.
    pub fn number(&mut self, feature: Feature, bounds: NumericBounds) -> io::Result<Answer<f64>> {
        loop {
            write!(
                self.out,
                "{} [{}-{}] (default {}): ",
                feature.label(),
                bounds.min,
                bounds.max,
                bounds.default_value()
            )?;
            let line = match self.read_line()? {
                Answer::Value(line) => line,
                Answer::Exit => return Ok(Answer::Exit),
            };
            if line.is_empty() {
                return Ok(Answer::Value(bounds.default_value()));
            }
            match line.parse::<f64>() {
                Ok(x) => match bounds.check(feature, x) {
                    Ok(x) => return Ok(Answer::Value(x)),
                    Err(e) => writeln!(self.out, "⚠️ {e}")?,
                },
                Err(_) => writeln!(self.out, "⚠️ {line:?} is not a number")?,
            }
        }
    }

    /// Prompts every field in vector order.
    pub fn collect_record(&mut self) -> io::Result<Answer<RawInputRecord>> {
        let mut record = RawInputRecord::default();
        for feature in FEATURE_ORDER {
            match feature.kind() {
                FeatureKind::Categorical(domain) => match self.select(feature, domain)? {
                    Answer::Value(v) => record.set_category(feature, v),
                    Answer::Exit => return Ok(Answer::Exit),
                },
                FeatureKind::Numeric(bounds) => match self.number(feature, bounds)? {
                    Answer::Value(x) => record.set_number(feature, x),
                    Answer::Exit => return Ok(Answer::Exit),
                },
            }
        }
        Ok(Answer::Value(record))
    }

    pub fn render(&mut self, outcome: &Result<PredictionResult>) -> io::Result<()> {
        match outcome {
            Ok(result) => {
                writeln!(self.out, "\nPrediction result:")?;
                writeln!(self.out, "{}", result.label.message())?;
                writeln!(
                    self.out,
                    "Probability of stroke: {:.2}%",
                    result.probability * 100.0
                )?;
                writeln!(self.out, "---")?;
                writeln!(self.out, "{DISCLAIMER}")?;
            }
            Err(StrokeError::MissingSelection(missing)) => {
                writeln!(self.out, "{MISSING_SELECTION_WARNING}")?;
                let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
                writeln!(self.out, "   missing: {}", labels.join(", "))?;
            }
            Err(e) => writeln!(self.out, "❌ Prediction failed: {e}")?,
        }
        writeln!(self.out)
    }
}

/// Collects and scores records until the user exits. Returns how many
/// predictions were shown.
pub fn run_session<C, R, W>(
    predictor: &StrokePredictor<C>,
    form: &mut Form<R, W>,
) -> io::Result<usize>
where
    C: Classifier,
    R: BufRead,
    W: Write,
{
    let mut shown = 0;
    loop {
        writeln!(form.out, "Enter patient details (type 'exit' to quit):")?;
        let record = match form.collect_record()? {
            Answer::Value(record) => record,
            Answer::Exit => break,
        };
        let outcome = predictor.predict(&record);
        match &outcome {
            Ok(_) => shown += 1,
            Err(e) => warn!("prediction rejected: {e}"),
        }
        form.render(&outcome)?;
    }
    Ok(shown)
}
