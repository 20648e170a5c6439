//! Experiment records: flat JSON objects shared with the simulation driver.
//!
//! A record carries the specimen definition (`Length`, `Width`, `tTop`, `tBot`,
//! `tCz`, `Crack`, `E` or `ETop`, optional `gT`, `JobID`) and, once the
//! simulation has been post-processed, the `Displacement` and `Reaction Force`
//! series. Any other keys are ignored here and preserved by the callers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ModelError, Result};

/// A flat experiment record.
pub type Record = serde_json::Map<String, Value>;

pub const DISPLACEMENT: &str = "Displacement";
pub const REACTION_FORCE: &str = "Reaction Force";

const REQUIRED: [&str; 7] = ["Length", "Width", "tTop", "tBot", "tCz", "Crack", "JobID"];

/// The specimen fields of a record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecimenParameters {
    /// Full specimen span.
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "tTop")]
    pub thickness_upper: f64,
    #[serde(rename = "tBot")]
    pub thickness_lower: f64,
    #[serde(rename = "tCz")]
    pub thickness_cohesive: f64,
    #[serde(rename = "Crack")]
    pub crack: f64,
    #[serde(rename = "E", default)]
    pub elastic: Option<Vec<f64>>,
    /// Constants of the upper adherend, used when `E` is absent.
    #[serde(rename = "ETop", default)]
    pub elastic_top: Option<Vec<f64>>,
    #[serde(rename = "gT", default)]
    pub fracture_toughness: Option<f64>,
    #[serde(rename = "JobID", deserialize_with = "job_id")]
    pub job_id: String,
}

impl SpecimenParameters {
    pub fn from_record(record: &Record) -> Result<Self> {
        if let Some(key) = REQUIRED.iter().find(|key| !record.contains_key(**key)) {
            return Err(ModelError::MissingField(*key));
        }
        let parameters: Self = serde_json::from_value(Value::Object(record.clone()))?;
        parameters.elastic_constants()?;
        Ok(parameters)
    }

    /// `E` if the record has it, otherwise `ETop`.
    pub fn elastic_constants(&self) -> Result<&[f64]> {
        self.elastic
            .as_deref()
            .or(self.elastic_top.as_deref())
            .ok_or(ModelError::MissingField("E"))
    }
}

/// Read a numeric series stored under `key`.
pub fn series(record: &Record, key: &'static str) -> Result<Vec<f64>> {
    let values = record
        .get(key)
        .ok_or(ModelError::MissingField(key))?
        .as_array()
        .ok_or(ModelError::InvalidSeries(key))?;
    values
        .iter()
        .map(|value| value.as_f64().ok_or(ModelError::InvalidSeries(key)))
        .collect()
}

/// Job identifiers are usually strings, but numeric ids are accepted.
fn job_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "JobID must be a string or a number, found {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("fixtures are objects"),
        }
    }

    fn base() -> Value {
        json!({
            "Length": 100.0, "Width": 25.0, "tTop": 2.4, "tBot": 2.4, "tCz": 0.2,
            "Crack": 60.0, "JobID": "ENF_01"
        })
    }

    #[test]
    fn prefers_e_over_etop() {
        let mut value = base();
        value["E"] = json!([1.0, 2.0]);
        value["ETop"] = json!([3.0, 4.0]);
        let parameters = SpecimenParameters::from_record(&record(value)).expect("valid record");
        assert_eq!(parameters.elastic_constants().expect("present"), &[1.0, 2.0]);
    }

    #[test]
    fn falls_back_to_etop() {
        let mut value = base();
        value["ETop"] = json!([3.0, 4.0]);
        let parameters = SpecimenParameters::from_record(&record(value)).expect("valid record");
        assert_eq!(parameters.elastic_constants().expect("present"), &[3.0, 4.0]);
        assert_eq!(parameters.fracture_toughness, None);
    }

    #[test]
    fn missing_elastic_constants_fail() {
        let err = SpecimenParameters::from_record(&record(base())).expect_err("no E nor ETop");
        assert!(matches!(err, ModelError::MissingField("E")));
    }

    #[test]
    fn missing_geometry_fails_loudly() {
        let mut value = base();
        value["E"] = json!([1.0]);
        value.as_object_mut().expect("object").remove("tBot");
        let err = SpecimenParameters::from_record(&record(value)).expect_err("tBot is required");
        assert_eq!(err.to_string(), "missing field: tBot");
    }

    #[test]
    fn numeric_job_id() {
        let mut value = base();
        value["E"] = json!([1.0]);
        value["JobID"] = json!(7);
        let parameters = SpecimenParameters::from_record(&record(value)).expect("valid record");
        assert_eq!(parameters.job_id, "7");
    }

    #[test]
    fn series_must_be_numeric() {
        let value = json!({ "Displacement": [0.0, 1.5], "Reaction Force": ["a"] });
        let record = record(value);
        assert_eq!(series(&record, DISPLACEMENT).expect("numeric"), vec![0.0, 1.5]);
        assert!(matches!(
            series(&record, REACTION_FORCE),
            Err(ModelError::InvalidSeries(REACTION_FORCE))
        ));
    }
}
