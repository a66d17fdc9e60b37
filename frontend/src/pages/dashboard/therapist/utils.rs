use crate::api::{OnboardingStatus, TherapistRecord};
use crate::pages::therapist_onboarding::steps::STEP_COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingSummary {
    pub status: OnboardingStatus,
    pub detail: String,
    pub action: Option<(&'static str, &'static str)>,
}

/// What the dashboard card says about the therapist's onboarding.
pub fn onboarding_summary(record: Option<&TherapistRecord>) -> OnboardingSummary {
    let status = record
        .map(|r| r.onboarding_status)
        .unwrap_or(OnboardingStatus::NotStarted);
    let step = record.and_then(|r| r.onboarding_step).unwrap_or(0) as usize;
    match status {
        OnboardingStatus::NotStarted => OnboardingSummary {
            status,
            detail: "Complete your profile so clients can find and book you.".into(),
            action: Some(("/onboarding/therapist", "Start onboarding")),
        },
        OnboardingStatus::InProgress => OnboardingSummary {
            status,
            detail: format!("{} of {} steps saved.", step.min(STEP_COUNT), STEP_COUNT),
            action: Some(("/onboarding/therapist", "Resume onboarding")),
        },
        OnboardingStatus::Submitted => OnboardingSummary {
            status,
            detail: "Our team is reviewing your application.".into(),
            action: None,
        },
        OnboardingStatus::Approved => OnboardingSummary {
            status,
            detail: "Your profile is live.".into(),
            action: None,
        },
        OnboardingStatus::Rejected => OnboardingSummary {
            status,
            detail: "Please review the requested changes and resubmit.".into(),
            action: Some(("/onboarding/therapist", "Update application")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: OnboardingStatus, step: Option<u8>) -> TherapistRecord {
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
    fn missing_record_means_not_started() {
        let summary = onboarding_summary(None);
        assert_eq!(summary.status, OnboardingStatus::NotStarted);
        assert_eq!(summary.action.map(|a| a.1), Some("Start onboarding"));
    }

    #[test]
    fn in_progress_reports_saved_steps() {
        let summary = onboarding_summary(Some(&record(OnboardingStatus::InProgress, Some(3))));
        assert_eq!(summary.detail, "3 of 10 steps saved.");
        assert_eq!(summary.action.map(|a| a.0), Some("/onboarding/therapist"));
    }

    #[test]
    fn submitted_has_no_action() {
        let summary = onboarding_summary(Some(&record(OnboardingStatus::Submitted, Some(10))));
        assert!(summary.action.is_none());
    }
}
