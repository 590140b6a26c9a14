//! Boundary validation of estimation payloads.
//!
//! Model responses and estimation files are untrusted: every field is checked
//! for presence, type and sign here, and a bad payload maps to a typed
//! [`RoiError`] instead of being coerced. Only
//! `automation_execution_cost_per_cycle` has a default (0).

use serde_json::{Map, Value};

use crate::errors::RoiError;
use crate::roi::EstimationRecord;

/// Canonical field name and the older names accepted for it.
type FieldKeys = (&'static str, &'static [&'static str]);

const TOTAL_TEST_CASES: FieldKeys = ("total_test_cases", &[]);
const MANUAL_EXECUTION_TIME: FieldKeys = ("manual_execution_time_per_test_hrs", &[]);
const MANUAL_COST_PER_HOUR: FieldKeys = ("manual_cost_per_hour", &[]);
const AUTOMATION_DEV_TIME: FieldKeys = ("automation_dev_time_per_test_hrs", &[]);
const AUTOMATION_COST_PER_HOUR: FieldKeys = ("automation_cost_per_hour", &[]);
const AUTOMATION_MAINTENANCE_TIME: FieldKeys = ("automation_maintenance_time_per_cycle_hrs", &[]);
const EXECUTION_CYCLES: FieldKeys = ("execution_cycles_per_year", &["number_of_test_cycles"]);
const TOOLING_COST: FieldKeys = ("tooling_cost_per_year", &["tool_license_cost"]);
const EXECUTION_COST_PER_CYCLE: FieldKeys = ("automation_execution_cost_per_cycle", &[]);

const USER_STORY_KEYS: [&str; 2] = ["user_story", "User Story"];

/// Strip Markdown code fences from a model response and parse it as JSON.
pub fn clean_llm_json(raw: &str) -> Result<Value, RoiError> {
    let text = raw.replace("```json", "").replace("```", "");
    serde_json::from_str(text.trim())
        .map_err(|e| RoiError::invalid("response", format!("not valid JSON: {e}")))
}

impl EstimationRecord {
    /// Validate a JSON mapping into a record.
    pub fn from_value(value: &Value) -> Result<Self, RoiError> {
        let obj = as_object(value)?;

        let record = Self {
            total_test_cases: required_count(obj, TOTAL_TEST_CASES)?,
            manual_execution_time_per_test_hrs: required_amount(obj, MANUAL_EXECUTION_TIME)?,
            manual_cost_per_hour: required_amount(obj, MANUAL_COST_PER_HOUR)?,
            automation_dev_time_per_test_hrs: required_amount(obj, AUTOMATION_DEV_TIME)?,
            automation_cost_per_hour: required_amount(obj, AUTOMATION_COST_PER_HOUR)?,
            automation_maintenance_time_per_cycle_hrs: required_amount(
                obj,
                AUTOMATION_MAINTENANCE_TIME,
            )?,
            execution_cycles_per_year: required_count(obj, EXECUTION_CYCLES)?,
            tooling_cost_per_year: required_amount(obj, TOOLING_COST)?,
            automation_execution_cost_per_cycle: match lookup(obj, EXECUTION_COST_PER_CYCLE) {
                None | Some(Value::Null) => 0.0,
                Some(value) => amount(EXECUTION_COST_PER_CYCLE.0, value)?,
            },
        };
        record.validate()?;
        Ok(record)
    }
}

/// A validated estimation plus the free-text fields that travel with it.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResponse {
    pub record: EstimationRecord,
    pub reasoning: Option<String>,
    pub user_story: Option<String>,
}

impl EstimationResponse {
    pub fn from_value(value: &Value) -> Result<Self, RoiError> {
        let record = EstimationRecord::from_value(value)?;
        let obj = as_object(value)?;

        Ok(Self {
            record,
            reasoning: optional_text(obj, "estimation_reasoning"),
            user_story: USER_STORY_KEYS
                .iter()
                .find_map(|key| optional_text(obj, key)),
        })
    }

    /// Parse a raw model response.
    pub fn from_llm_output(raw: &str) -> Result<Self, RoiError> {
        Self::from_value(&clean_llm_json(raw)?)
    }
}

/// Parse either one estimation object or an array of them.
///
/// Each entry is validated independently so one bad entry does not hide the
/// others.
pub fn parse_estimations(value: &Value) -> Vec<Result<EstimationResponse, RoiError>> {
    match value {
        Value::Array(items) => items.iter().map(EstimationResponse::from_value).collect(),
        other => vec![EstimationResponse::from_value(other)],
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, RoiError> {
    value.as_object().ok_or_else(|| {
        RoiError::invalid(
            "estimation",
            format!("expected a JSON object, got {}", kind(value)),
        )
    })
}

/// The canonical key wins when both it and an alias are present.
fn lookup<'a>(obj: &'a Map<String, Value>, (name, aliases): FieldKeys) -> Option<&'a Value> {
    obj.get(name)
        .or_else(|| aliases.iter().find_map(|alias| obj.get(*alias)))
}

fn required_amount(obj: &Map<String, Value>, keys: FieldKeys) -> Result<f64, RoiError> {
    let value = lookup(obj, keys).ok_or_else(|| RoiError::missing(keys.0))?;
    amount(keys.0, value)
}

fn required_count(obj: &Map<String, Value>, keys: FieldKeys) -> Result<u64, RoiError> {
    let value = lookup(obj, keys).ok_or_else(|| RoiError::missing(keys.0))?;
    count(keys.0, value)
}

fn amount(field: &str, value: &Value) -> Result<f64, RoiError> {
    let number = value.as_f64().ok_or_else(|| {
        RoiError::invalid(field, format!("expected a number, got {}", kind(value)))
    })?;
    if number < 0.0 {
        return Err(RoiError::invalid(
            field,
            format!("must be non-negative, got {number}"),
        ));
    }
    Ok(number)
}

fn count(field: &str, value: &Value) -> Result<u64, RoiError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let number = amount(field, value)?;
    if number.fract() != 0.0 || number > u64::MAX as f64 {
        return Err(RoiError::invalid(
            field,
            format!("expected a whole number, got {number}"),
        ));
    }
    Ok(number as u64)
}

fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
