use crate::error::{Result, StrokeError};
use crate::schema::{FEATURE_ORDER, Feature, FeatureKind};
use serde::{Deserialize, Serialize};

/// Raw field values for one submission, before any encoding.
///
/// Categorical fields are `None` (or empty) while unset. The serde field
/// names are the artifact column names so the same struct reads batch CSVs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputRecord {
    pub gender: Option<String>,
    pub age: f64,
    pub hypertension: Option<String>,
    pub heart_disease: Option<String>,
    pub ever_married: Option<String>,
    pub work_type: Option<String>,
    #[serde(rename = "Residence_type", alias = "residence_type")]
    pub residence_type: Option<String>,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: Option<String>,
}

/// A borrowed view of one field of a [`RawInputRecord`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Category(Option<&'a str>),
    Number(f64),
}

impl Default for RawInputRecord {
    /// Every selection unset, every number at its lower bound.
    fn default() -> Self {
        let lower = |f: Feature| f.bounds().map_or(0.0, |b| b.default_value());
        RawInputRecord {
            gender: None,
            age: lower(Feature::Age),
            hypertension: None,
            heart_disease: None,
            ever_married: None,
            work_type: None,
            residence_type: None,
            avg_glucose_level: lower(Feature::AvgGlucoseLevel),
            bmi: lower(Feature::Bmi),
            smoking_status: None,
        }
    }
}

impl RawInputRecord {
    fn category_slot(&self, feature: Feature) -> Option<&Option<String>> {
        match feature {
            Feature::Gender => Some(&self.gender),
            Feature::Hypertension => Some(&self.hypertension),
            Feature::HeartDisease => Some(&self.heart_disease),
            Feature::EverMarried => Some(&self.ever_married),
            Feature::WorkType => Some(&self.work_type),
            Feature::ResidenceType => Some(&self.residence_type),
            Feature::SmokingStatus => Some(&self.smoking_status),
            Feature::Age | Feature::AvgGlucoseLevel | Feature::Bmi => None,
        }
    }

    fn category_slot_mut(&mut self, feature: Feature) -> Option<&mut Option<String>> {
        match feature {
            Feature::Gender => Some(&mut self.gender),
            Feature::Hypertension => Some(&mut self.hypertension),
            Feature::HeartDisease => Some(&mut self.heart_disease),
            Feature::EverMarried => Some(&mut self.ever_married),
            Feature::WorkType => Some(&mut self.work_type),
            Feature::ResidenceType => Some(&mut self.residence_type),
            Feature::SmokingStatus => Some(&mut self.smoking_status),
            Feature::Age | Feature::AvgGlucoseLevel | Feature::Bmi => None,
        }
    }

    fn number_slot_mut(&mut self, feature: Feature) -> Option<&mut f64> {
        match feature {
            Feature::Age => Some(&mut self.age),
            Feature::AvgGlucoseLevel => Some(&mut self.avg_glucose_level),
            Feature::Bmi => Some(&mut self.bmi),
            _ => None,
        }
    }

    pub fn value(&self, feature: Feature) -> FieldValue<'_> {
        match feature {
            Feature::Age => FieldValue::Number(self.age),
            Feature::AvgGlucoseLevel => FieldValue::Number(self.avg_glucose_level),
            Feature::Bmi => FieldValue::Number(self.bmi),
            _ => FieldValue::Category(self.category(feature)),
        }
    }

    /// The selected value of a categorical field; empty strings count as unset.
    pub fn category(&self, feature: Feature) -> Option<&str> {
        self.category_slot(feature)
            .and_then(|slot| slot.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Sets a categorical field. Has no effect on numeric fields.
    pub fn set_category(&mut self, feature: Feature, value: Option<String>) {
        if let Some(slot) = self.category_slot_mut(feature) {
            *slot = value;
        }
    }

    /// Sets a numeric field. Has no effect on categorical fields.
    pub fn set_number(&mut self, feature: Feature, value: f64) {
        if let Some(slot) = self.number_slot_mut(feature) {
            *slot = value;
        }
    }

    /// Categorical fields still unset, in vector order.
    pub fn missing_selections(&self) -> Vec<Feature> {
        FEATURE_ORDER
            .into_iter()
            .filter(|&f| f.is_categorical() && self.category(f).is_none())
            .collect()
    }

    /// Checks every numeric field against its form bounds.
    pub fn check_bounds(&self) -> Result<()> {
        for feature in FEATURE_ORDER {
            if let (FeatureKind::Numeric(bounds), FieldValue::Number(x)) =
                (feature.kind(), self.value(feature))
            {
                bounds.check(feature, x)?;
            }
        }
        Ok(())
    }

    /// Fails with [`StrokeError::MissingSelection`] if any selection is unset.
    pub fn require_selections(&self) -> Result<()> {
        let missing = self.missing_selections();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(StrokeError::MissingSelection(missing))
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> RawInputRecord {
    RawInputRecord {
        gender: Some("Male".into()),
        age: 67.0,
        hypertension: Some("0".into()),
        heart_disease: Some("1".into()),
        ever_married: Some("Yes".into()),
        work_type: Some("Private".into()),
        residence_type: Some("Urban".into()),
        avg_glucose_level: 228.69,
        bmi: 36.6,
        smoking_status: Some("formerly smoked".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_has_everything_unset() {
        let record = RawInputRecord::default();
        assert_eq!(record.missing_selections().len(), 7);
        assert_eq!(record.age, 1.0);
        assert_eq!(record.bmi, 0.0);
        assert!(record.check_bounds().is_ok());
    }

    #[test]
    fn empty_string_counts_as_unset() {
        let mut record = sample_record();
        record.set_category(Feature::WorkType, Some(String::new()));
        assert_eq!(record.missing_selections(), vec![Feature::WorkType]);
        assert!(matches!(
            record.require_selections(),
            Err(StrokeError::MissingSelection(ref f)) if f == &vec![Feature::WorkType]
        ));
    }

    #[test]
    fn setters_route_by_kind() {
        let mut record = RawInputRecord::default();
        record.set_number(Feature::Bmi, 21.5);
        record.set_number(Feature::Gender, 3.0);
        record.set_category(Feature::Gender, Some("Female".into()));
        record.set_category(Feature::Age, Some("40".into()));
        assert_eq!(record.value(Feature::Bmi), FieldValue::Number(21.5));
        assert_eq!(record.value(Feature::Gender), FieldValue::Category(Some("Female")));
        assert_eq!(record.age, 1.0);
    }

    #[test]
    fn bounds_apply_to_numeric_fields() {
        let mut record = sample_record();
        assert!(record.check_bounds().is_ok());
        record.age = 100.0;
        record.avg_glucose_level = 300.0;
        assert!(record.check_bounds().is_ok());
        record.bmi = 60.5;
        assert!(matches!(
            record.check_bounds(),
            Err(StrokeError::InvalidRange { ref field, .. }) if field == "bmi"
        ));
    }

    #[test]
    fn reads_csv_rows_with_blank_selections() {
        let data = "\
            gender,age,hypertension,heart_disease,ever_married,work_type,\
            Residence_type,avg_glucose_level,bmi,smoking_status\n\
            Male,67,0,1,Yes,Private,Urban,228.69,36.6,formerly smoked\n\
            Female,45,0,0,No,,Rural,90.5,22.1,never smoked\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rows: Vec<RawInputRecord> = rdr
            .deserialize::<RawInputRecord>()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        assert_eq!(rows[0], sample_record());
        assert_eq!(rows[1].missing_selections(), vec![Feature::WorkType]);
    }
}
