//! Static description of the onboarding wizard. Each field key is also its key in the
//! draft object sent to the backend.

pub const STEP_COUNT: usize = 10;
pub const DOCUMENTS_STEP: usize = 8;
pub const REVIEW_STEP: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Date,
    Number,
    LongText,
    /// Single choice rendered as a select.
    Choice(&'static [&'static str]),
    /// Any number of choices, stored as a string array.
    MultiChoice(&'static [&'static str]),
    /// Uploaded file, stored as its public URL.
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDef {
    pub title: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldDef],
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldDef {
    FieldDef {
        key,
        label,
        kind,
        required,
    }
}

pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const LICENSE_TYPES: &[&str] = &["LCSW", "LPC", "LMFT", "LMHC", "PsyD", "PhD", "MD"];

pub const DEGREES: &[&str] = &["MA", "MS", "MSW", "MEd", "PsyD", "PhD", "MD"];

pub const SPECIALTIES: &[&str] = &[
    "Anxiety",
    "Depression",
    "Trauma & PTSD",
    "Relationships",
    "Grief",
    "Addiction",
    "Eating disorders",
    "ADHD",
    "Stress",
    "LGBTQ+ issues",
];

pub const POPULATIONS: &[&str] = &["Children", "Adolescents", "Adults", "Couples", "Families", "Seniors"];

pub const APPROACHES: &[&str] = &[
    "CBT",
    "DBT",
    "EMDR",
    "Psychodynamic",
    "Humanistic",
    "Mindfulness-based",
    "Solution-focused",
    "Family systems",
];

pub const SESSION_FORMATS: &[&str] = &["Video", "Phone", "In person"];

pub const YES_NO: &[&str] = &["Yes", "No"];

pub const INSURERS: &[&str] = &["Aetna", "Blue Cross", "Cigna", "Kaiser", "Medicare", "UnitedHealthcare"];

pub static STEPS: [StepDef; STEP_COUNT] = [
    StepDef {
        title: "Personal info",
        description: "Tell us who you are.",
        fields: &[
            field("first_name", "First name", FieldKind::Text, true),
            field("last_name", "Last name", FieldKind::Text, true),
            field("pronouns", "Pronouns", FieldKind::Text, false),
            field("date_of_birth", "Date of birth", FieldKind::Date, false),
        ],
    },
    StepDef {
        title: "Contact",
        description: "How we and your clients can reach you.",
        fields: &[
            field("phone", "Phone", FieldKind::Tel, true),
            field("contact_email", "Contact email", FieldKind::Email, false),
            field("address_line1", "Street address", FieldKind::Text, true),
            field("city", "City", FieldKind::Text, true),
            field("state", "State", FieldKind::Choice(US_STATES), true),
            field("postal_code", "ZIP code", FieldKind::Text, true),
        ],
    },
    StepDef {
        title: "Credentials",
        description: "Your professional license.",
        fields: &[
            field("license_type", "License type", FieldKind::Choice(LICENSE_TYPES), true),
            field("license_number", "License number", FieldKind::Text, true),
            field("license_state", "Licensing state", FieldKind::Choice(US_STATES), true),
            field("license_expiry", "License expiration", FieldKind::Date, true),
            field("npi_number", "NPI number", FieldKind::Text, false),
        ],
    },
    StepDef {
        title: "Education",
        description: "Your highest clinical degree.",
        fields: &[
            field("degree", "Degree", FieldKind::Choice(DEGREES), true),
            field("institution", "Institution", FieldKind::Text, true),
            field("graduation_year", "Graduation year", FieldKind::Number, true),
        ],
    },
    StepDef {
        title: "Specialties",
        description: "What you help clients with.",
        fields: &[
            field("specialties", "Specialties", FieldKind::MultiChoice(SPECIALTIES), true),
            field("populations", "Populations served", FieldKind::MultiChoice(POPULATIONS), false),
        ],
    },
    StepDef {
        title: "Approaches",
        description: "How you work with clients.",
        fields: &[
            field("approaches", "Therapy approaches", FieldKind::MultiChoice(APPROACHES), true),
            field("bio", "Professional bio", FieldKind::LongText, true),
        ],
    },
    StepDef {
        title: "Availability",
        description: "When and how you see clients.",
        fields: &[
            field("session_formats", "Session formats", FieldKind::MultiChoice(SESSION_FORMATS), true),
            field("weekly_hours", "Hours per week", FieldKind::Number, true),
            field("availability_notes", "Availability notes", FieldKind::LongText, false),
        ],
    },
    StepDef {
        title: "Rates & insurance",
        description: "What you charge.",
        fields: &[
            field("session_rate", "Rate per session (USD)", FieldKind::Number, true),
            field("sliding_scale", "Sliding scale available", FieldKind::Choice(YES_NO), false),
            field("insurance_accepted", "Insurance accepted", FieldKind::MultiChoice(INSURERS), false),
        ],
    },
    StepDef {
        title: "Documents",
        description: "Upload a copy of your license and your CV.",
        fields: &[
            field("license_document_url", "License document", FieldKind::Document, true),
            field("resume_url", "CV or resume", FieldKind::Document, false),
            field("headshot_url", "Profile photo", FieldKind::Document, false),
        ],
    },
    StepDef {
        title: "Review",
        description: "Check your answers and submit for review.",
        fields: &[],
    },
];

pub fn titles() -> Vec<&'static str> {
    STEPS.iter().map(|step| step.title).collect()
}

pub fn find_field(key: &str) -> Option<&'static FieldDef> {
    STEPS.iter().flat_map(|step| step.fields.iter()).find(|f| f.key == key)
}

/// Storage name for a document field: `license_document_url` uploads as `license_document`.
pub fn document_kind(key: &str) -> &str {
    key.strip_suffix("_url").unwrap_or(key)
}
