//! Static link targets for routed intents

use super::classifier::IntentTag;

/// Where a routed intent sends the patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRoute {
    /// Short explanation shown above the link
    pub message: String,
    /// Target URL (absolute or site-relative)
    pub url: String,
    /// Link text
    pub label: String,
}

impl IntentRoute {
    pub fn new(
        message: impl Into<String>,
        url: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            url: url.into(),
            label: label.into(),
        }
    }
}

/// Link targets for both routed intents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRoutes {
    pub appointment: IntentRoute,
    pub medicine: IntentRoute,
}

impl IntentRoutes {
    /// Route for a tag; `None` for [`IntentTag::None`]
    pub fn for_tag(&self, tag: IntentTag) -> Option<&IntentRoute> {
        match tag {
            IntentTag::Appointment => Some(&self.appointment),
            IntentTag::Medicine => Some(&self.medicine),
            IntentTag::None => None,
        }
    }
}

impl Default for IntentRoutes {
    fn default() -> Self {
        Self {
            appointment: IntentRoute::new(
                "You can book an appointment with one of our doctors online.",
                "/appointment.php",
                "Book Appointment",
            ),
            medicine: IntentRoute::new(
                "You can order your medicines from our e-pharmacy.",
                "/epharmacy.php",
                "Visit E-Pharmacy",
            ),
        }
    }
}
