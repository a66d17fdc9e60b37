pub mod appointments;
pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod marketing;
pub mod messages;
pub mod not_found;
pub mod reset_password;
pub mod signup;
pub mod therapist_onboarding;
