//! The booking form as rendered on the booking page: fields, option display
//! names, step scopes and the review summary layout.

use crate::config::WizardConfig;
use crate::errors::Result;
use crate::summary::{SummaryItem, SummaryProjector};
use crate::wizard::step::StepDescriptor;

use super::{BookingForm, DateWindow, FieldKind, FormField};

const SERVICE_TYPES: &[(&str, &str)] = &[
    ("home-cleaning", "Home Cleaning"),
    ("meal-preparation", "Meal Preparation"),
    ("home-maintenance", "Home Maintenance"),
    ("shopping-assistance", "Shopping Assistance"),
    ("personal-care", "Personal Care"),
    ("medication-management", "Medication Management"),
    ("mobility-assistance", "Mobility Assistance"),
    ("nursing-care", "Nursing Care"),
    ("wound-care", "Wound Care"),
    ("health-monitoring", "Health Monitoring"),
    ("medical-transport", "Medical Transport"),
    ("social-transport", "Social Transport"),
    ("shopping-transport", "Shopping Transport"),
    ("counseling", "Individual Counseling"),
    ("online-therapy", "Online Therapy"),
    ("support-group", "Support Group"),
    ("family-counseling", "Family Counseling"),
    ("companionship", "Companionship"),
    ("social-activities", "Social Activities"),
    ("community-programs", "Community Programs"),
];

const FREQUENCIES: &[(&str, &str)] = &[
    ("one-time", "One-time service"),
    ("weekly", "Weekly"),
    ("fortnightly", "Fortnightly"),
    ("monthly", "Monthly"),
    ("as-needed", "As needed"),
];

const TIME_SLOTS: &[(&str, &str)] = &[
    ("morning", "Morning (8AM - 12PM)"),
    ("afternoon", "Afternoon (12PM - 5PM)"),
    ("evening", "Evening (5PM - 8PM)"),
    ("flexible", "Flexible"),
];

const URGENCY_LEVELS: &[(&str, &str)] = &[
    ("standard", "Standard (within 1-2 weeks)"),
    ("urgent", "Urgent (within 3-5 days)"),
    ("emergency", "Emergency (within 24 hours)"),
];

const FUNDING_SOURCES: &[(&str, &str)] = &[
    ("ndis", "NDIS"),
    ("aged-care", "Aged Care Package"),
    ("medicare", "Medicare"),
    ("private-health", "Private Health Insurance"),
    ("private-pay", "Private Pay"),
    ("not-sure", "Not Sure - Need Help"),
];

/// Everything the wizard needs to drive one concrete form.
#[derive(Debug, Clone)]
pub struct WizardTemplate {
    pub form: BookingForm,
    pub steps: Vec<StepDescriptor>,
    pub summary: SummaryProjector,
}

/// The three-step service booking form.
pub fn booking_template(config: &WizardConfig) -> Result<WizardTemplate> {
    let window = DateWindow::new(config.earliest_booking_days, config.latest_booking_months);

    let form = BookingForm::new(vec![
        FormField::new("serviceType", "Service Type", FieldKind::Select)
            .with_options(SERVICE_TYPES),
        FormField::new("serviceFrequency", "Service Frequency", FieldKind::Select)
            .with_options(FREQUENCIES),
        FormField::new("preferredDate", "Preferred Date", FieldKind::Date)
            .with_date_window(window),
        FormField::new("preferredTime", "Preferred Time", FieldKind::Select)
            .with_options(TIME_SLOTS),
        FormField::new("urgency", "Urgency", FieldKind::Select)
            .with_options(URGENCY_LEVELS)
            .with_optional(),
        FormField::new("firstName", "First Name", FieldKind::Text),
        FormField::new("lastName", "Last Name", FieldKind::Text),
        FormField::new("email", "Email Address", FieldKind::Email),
        FormField::new("phone", "Phone Number", FieldKind::Telephone),
        FormField::new("address", "Service Address", FieldKind::Textarea),
        FormField::new("age", "Age Range", FieldKind::Select).with_optional(),
        FormField::new("relationship", "Booking For", FieldKind::Select).with_optional(),
        FormField::new("funding", "Funding Source", FieldKind::Select)
            .with_options(FUNDING_SOURCES)
            .with_optional(),
        FormField::new("additionalNotes", "Additional Notes", FieldKind::Textarea)
            .with_optional(),
        FormField::new(
            config.consent_field.clone(),
            "Terms of Service and Privacy Policy",
            FieldKind::Checkbox,
        )
        .with_optional(),
    ])?;

    let steps = vec![
        StepDescriptor::new(
            1,
            "Service Details",
            &[
                "serviceType",
                "serviceFrequency",
                "preferredDate",
                "preferredTime",
                "urgency",
            ],
        ),
        StepDescriptor::new(
            2,
            "Your Details",
            &[
                "firstName",
                "lastName",
                "email",
                "phone",
                "address",
                "age",
                "relationship",
                "funding",
            ],
        ),
        StepDescriptor::new(3, "Review & Confirm", &["additionalNotes"]),
    ];

    let summary = SummaryProjector::new(vec![
        SummaryItem::field("Service Type", "serviceType").with_fallback("Not selected"),
        SummaryItem::field("Frequency", "serviceFrequency").with_fallback("Not selected"),
        SummaryItem::field("Preferred Date", "preferredDate"),
        SummaryItem::field("Preferred Time", "preferredTime"),
        SummaryItem::field("Urgency", "urgency").with_fallback("Standard"),
        SummaryItem::joined("Name", &["firstName", "lastName"], " "),
        SummaryItem::field("Email", "email"),
        SummaryItem::field("Phone", "phone"),
        SummaryItem::field("Address", "address"),
        SummaryItem::field("Age Range", "age"),
        SummaryItem::field("Booking For", "relationship").with_fallback("Myself"),
        SummaryItem::field("Funding Source", "funding"),
        SummaryItem::field("Additional Notes", "additionalNotes").omit_when_empty(),
    ]);

    Ok(WizardTemplate {
        form,
        steps,
        summary,
    })
}
