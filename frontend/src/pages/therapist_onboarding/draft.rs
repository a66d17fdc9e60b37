use super::steps::{FieldDef, FieldKind, StepDef, STEPS, STEP_COUNT};
use crate::api::{OnboardingStatus, TherapistRecord};
use serde_json::{Map, Value};

/// Answers collected so far, in the shape the backend stores them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    data: Map<String, Value>,
}

impl Draft {
    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Text form of a scalar answer; numbers saved by an earlier session render as text.
    pub fn text(&self, key: &str) -> String {
        match self.data.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    pub fn set_text(&mut self, key: &str, value: String) {
        if value.trim().is_empty() {
            self.data.remove(key);
        } else {
            self.data.insert(key.to_string(), Value::String(value));
        }
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        match self.data.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn toggle(&mut self, key: &str, option: &str) {
        let mut items = self.list(key);
        match items.iter().position(|item| item == option) {
            Some(index) => {
                items.remove(index);
            }
            None => items.push(option.to_string()),
        }
        if items.is_empty() {
            self.data.remove(key);
        } else {
            self.data.insert(
                key.to_string(),
                Value::Array(items.into_iter().map(Value::String).collect()),
            );
        }
    }

    pub fn is_answered(&self, field: &FieldDef) -> bool {
        match field.kind {
            FieldKind::MultiChoice(_) => !self.list(field.key).is_empty(),
            _ => !self.text(field.key).trim().is_empty(),
        }
    }

    /// Problems that block leaving `step`, as user-facing messages.
    pub fn step_errors(&self, step: &StepDef) -> Vec<String> {
        let mut errors = Vec::new();
        for field in step.fields {
            if field.required && !self.is_answered(field) {
                errors.push(format!("{} is required", field.label));
                continue;
            }
            if field.kind == FieldKind::Number && self.is_answered(field) {
                let raw = self.text(field.key);
                if raw.trim().parse::<f64>().map(|n| n < 0.0).unwrap_or(true) {
                    errors.push(format!("{} must be a positive number", field.label));
                }
            }
        }
        errors
    }

    /// Fields of `step` ready to send: numbers as JSON numbers, unanswered fields left out.
    pub fn step_data(&self, step: &StepDef) -> Map<String, Value> {
        let mut out = Map::new();
        for field in step.fields {
            let Some(value) = self.data.get(field.key) else {
                continue;
            };
            let value = match (field.kind, value) {
                (FieldKind::Number, Value::String(raw)) => raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| value.clone()),
                _ => value.clone(),
            };
            out.insert(field.key.to_string(), value);
        }
        out
    }

    /// Everything collected, normalized step by step.
    pub fn full_data(&self) -> Map<String, Value> {
        let mut out = self.data.clone();
        for step in STEPS.iter() {
            out.extend(self.step_data(step));
        }
        out
    }

    /// Index of the first step with missing answers, if any.
    pub fn first_incomplete_step(&self) -> Option<usize> {
        STEPS.iter().position(|step| !self.step_errors(step).is_empty())
    }
}

/// Step to open when the wizard loads. `onboarding_step` counts saved steps.
pub fn resume_step(record: Option<&TherapistRecord>) -> usize {
    let saved = record.and_then(|r| r.onboarding_step).unwrap_or(0) as usize;
    saved.min(STEP_COUNT - 1)
}

pub fn is_locked(record: Option<&TherapistRecord>) -> bool {
    matches!(
        record.map(|r| r.onboarding_status),
        Some(OnboardingStatus::Submitted | OnboardingStatus::Approved)
    )
}

/// Object path for an uploaded document: `<user_id>/<kind>-<id>.<ext>`.
pub fn document_path(user_id: &str, kind: &str, file_name: &str, id: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}/{}-{}.{}", user_id, kind, id, ext)
}

/// Display form of an answer on the review step.
pub fn display_value(draft: &Draft, field: &FieldDef) -> String {
    match field.kind {
        FieldKind::MultiChoice(_) => draft.list(field.key).join(", "),
        FieldKind::Document if draft.is_answered(field) => "Uploaded".to_string(),
        _ => draft.text(field.key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(step: Option<u8>, status: OnboardingStatus) -> TherapistRecord {
        TherapistRecord {
            id: "th-1".into(),
            user_id: "t1".into(),
            onboarding_status: status,
            onboarding_step: step,
            draft_data: None,
            updated_at: None,
        }
    }

    #[test]
    fn text_and_lists_round_trip_through_map() {
        let mut draft = Draft::default();
        draft.set_text("first_name", "Grace".into());
        draft.toggle("specialties", "Anxiety");
        draft.toggle("specialties", "Grief");
        draft.toggle("specialties", "Anxiety");
        assert_eq!(draft.text("first_name"), "Grace");
        assert_eq!(draft.list("specialties"), vec!["Grief"]);
        draft.set_text("first_name", "  ".into());
        assert!(!draft.as_map().contains_key("first_name"));
    }

    #[test]
    fn step_errors_list_missing_required_fields() {
        let mut draft = Draft::default();
        draft.set_text("first_name", "Grace".into());
        assert_eq!(draft.step_errors(&STEPS[0]), vec!["Last name is required"]);
        draft.set_text("last_name", "Hopper".into());
        assert!(draft.step_errors(&STEPS[0]).is_empty());
    }

    #[test]
    fn numbers_are_validated_and_sent_as_numbers() {
        let mut draft = Draft::default();
        draft.set_text("degree", "PhD".into());
        draft.set_text("institution", "Yale".into());
        draft.set_text("graduation_year", "soon".into());
        assert_eq!(
            draft.step_errors(&STEPS[3]),
            vec!["Graduation year must be a positive number"]
        );
        draft.set_text("graduation_year", "1934".into());
        let data = draft.step_data(&STEPS[3]);
        assert_eq!(data.get("graduation_year"), Some(&json!(1934.0)));
        assert_eq!(data.get("degree"), Some(&json!("PhD")));
        assert!(!data.contains_key("first_name"));
    }

    #[test]
    fn stored_numbers_read_back_as_text() {
        let map = json!({ "weekly_hours": 20 }).as_object().cloned().unwrap();
        assert_eq!(Draft::from_map(map).text("weekly_hours"), "20");
    }

    #[test]
    fn resume_and_lock_follow_record() {
        assert_eq!(resume_step(None), 0);
        assert_eq!(resume_step(Some(&record(Some(3), OnboardingStatus::InProgress))), 3);
        assert_eq!(resume_step(Some(&record(Some(10), OnboardingStatus::InProgress))), 9);
        assert!(!is_locked(Some(&record(Some(3), OnboardingStatus::InProgress))));
        assert!(is_locked(Some(&record(Some(10), OnboardingStatus::Submitted))));
    }

    #[test]
    fn document_path_keeps_extension() {
        assert_eq!(
            document_path("u1", "license_document", "License Scan.PDF", "abc"),
            "u1/license_document-abc.pdf"
        );
        assert_eq!(document_path("u1", "resume", "cv", "abc"), "u1/resume-abc.bin");
    }

    #[test]
    fn first_incomplete_step_points_at_gaps() {
        let mut draft = Draft::default();
        assert_eq!(draft.first_incomplete_step(), Some(0));
        draft.set_text("first_name", "Grace".into());
        draft.set_text("last_name", "Hopper".into());
        assert_eq!(draft.first_incomplete_step(), Some(1));
    }
}
