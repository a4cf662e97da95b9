use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::definition::IndexDefinition;

/// One stage of a rebuild, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Connecting,
    Dropping,
    Inspecting,
    Building,
    Creating,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Connecting => "connecting",
            Step::Dropping => "dropping",
            Step::Inspecting => "inspecting",
            Step::Building => "building",
            Step::Creating => "creating",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time spent in a step, recorded whether it succeeded or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTiming {
    pub step: Step,
    #[serde(rename = "duration_ms", with = "millis")]
    pub duration: Duration,
    pub succeeded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure { step: Step, reason: String },
}

/// Diagnostics for a single rebuild attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildResult {
    pub run_id: Uuid,
    pub index_name: String,
    pub started_at: DateTime<Utc>,
    /// Set for plan runs, which never drop or create.
    #[serde(default)]
    pub dry_run: bool,
    pub dropped_existing: bool,
    /// Distinct labels listed by the catalog, before exclusions.
    pub labels_found: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<IndexDefinition>,
    pub step_durations: Vec<StepTiming>,
    #[serde(rename = "total_ms", with = "millis")]
    pub total: Duration,
    pub outcome: Outcome,
}

impl RebuildResult {
    pub fn new(index_name: impl Into<String>, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            index_name: index_name.into(),
            started_at: Utc::now(),
            dry_run,
            dropped_existing: false,
            labels_found: 0,
            definition: None,
            step_durations: Vec::new(),
            total: Duration::ZERO,
            outcome: Outcome::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }

    /// Duration recorded for `step`, if the run reached it.
    pub fn duration_of(&self, step: Step) -> Option<Duration> {
        self.step_durations
            .iter()
            .find(|t| t.step == step)
            .map(|t| t.duration)
    }

    /// Steps the run entered, in order.
    pub fn steps(&self) -> Vec<Step> {
        self.step_durations.iter().map(|t| t.step).collect()
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = f64::deserialize(d)?;
        Ok(Duration::from_nanos((ms.max(0.0) * 1_000_000.0) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_display_is_lowercase() {
        assert_eq!(Step::Inspecting.to_string(), "inspecting");
        assert_eq!(
            serde_json::to_string(&Step::Creating).unwrap(),
            "\"creating\""
        );
    }

    #[test]
    fn test_failure_outcome_json_shape() {
        let mut result = RebuildResult::new("entities", false);
        result.outcome = Outcome::Failure {
            step: Step::Dropping,
            reason: "permission denied".into(),
        };
        result.step_durations.push(StepTiming {
            step: Step::Connecting,
            duration: Duration::from_millis(12),
            succeeded: true,
        });

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"]["status"], "failure");
        assert_eq!(json["outcome"]["step"], "dropping");
        assert_eq!(json["step_durations"][0]["duration_ms"], 12.0);
        assert!(json.get("definition").is_none());
        assert!(!result.is_success());
    }

    #[test]
    fn test_duration_of_missing_step() {
        let result = RebuildResult::new("entities", false);
        assert_eq!(result.duration_of(Step::Creating), None);
        assert!(result.is_success());
    }
}
