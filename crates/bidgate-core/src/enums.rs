//! Evidence categories, invite state, subscription status, and document kinds.
//!
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EvidenceCategory
// ---------------------------------------------------------------------------

/// Category of an evidence record.
///
/// Closed, ordered enumeration. The declaration order is also the order used
/// to break ties when categories are sorted by count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum EvidenceCategory {
    #[serde(rename = "Case Study")]
    CaseStudy,
    #[serde(rename = "Policy")]
    Policy,
    #[serde(rename = "Certification")]
    Certification,
    #[serde(rename = "Accreditation")]
    Accreditation,
    #[serde(rename = "CV")]
    Cv,
    #[serde(rename = "Social Value")]
    SocialValue,
    #[serde(rename = "Sustainability")]
    Sustainability,
    #[serde(rename = "Health & Safety")]
    HealthAndSafety,
    #[serde(rename = "Quality Management")]
    QualityManagement,
    #[serde(rename = "Information Security")]
    InformationSecurity,
    #[serde(rename = "Financial")]
    Financial,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Methodology")]
    Methodology,
    #[serde(rename = "Testimonial")]
    Testimonial,
    #[serde(rename = "Award")]
    Award,
    #[serde(rename = "Innovation")]
    Innovation,
}

impl EvidenceCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::CaseStudy,
        Self::Policy,
        Self::Certification,
        Self::Accreditation,
        Self::Cv,
        Self::SocialValue,
        Self::Sustainability,
        Self::HealthAndSafety,
        Self::QualityManagement,
        Self::InformationSecurity,
        Self::Financial,
        Self::Insurance,
        Self::Methodology,
        Self::Testimonial,
        Self::Award,
        Self::Innovation,
    ];

    /// Human-readable label, identical to the value stored in the record store.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CaseStudy => "Case Study",
            Self::Policy => "Policy",
            Self::Certification => "Certification",
            Self::Accreditation => "Accreditation",
            Self::Cv => "CV",
            Self::SocialValue => "Social Value",
            Self::Sustainability => "Sustainability",
            Self::HealthAndSafety => "Health & Safety",
            Self::QualityManagement => "Quality Management",
            Self::InformationSecurity => "Information Security",
            Self::Financial => "Financial",
            Self::Insurance => "Insurance",
            Self::Methodology => "Methodology",
            Self::Testimonial => "Testimonial",
            Self::Award => "Award",
            Self::Innovation => "Innovation",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolve a stored label. Matching ignores surrounding whitespace and ASCII case.
    /// Returns `None` for labels outside the enumeration.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// InviteState
// ---------------------------------------------------------------------------

/// Onboarding state of a client, derived from its invite fields.
///
/// ```text
/// no_invite → invited → accepted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InviteState {
    NoInvite,
    Invited,
    Accepted,
}

impl InviteState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NoInvite => &[Self::Invited],
            Self::Invited => &[Self::Accepted],
            Self::Accepted => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoInvite => "no_invite",
            Self::Invited => "invited",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for InviteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SubscriptionStatus
// ---------------------------------------------------------------------------

/// Subscription status as reported by the billing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
    IncompleteExpired,
    Unpaid,
    Paused,
    Inactive,
}

impl SubscriptionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Trialing => "trialing",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
            Self::Incomplete => "incomplete",
            Self::IncompleteExpired => "incomplete_expired",
            Self::Unpaid => "unpaid",
            Self::Paused => "paused",
            Self::Inactive => "inactive",
        }
    }

    /// Parse a stored or provider-reported status. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "trialing" => Some(Self::Trialing),
            "past_due" => Some(Self::PastDue),
            "canceled" | "cancelled" => Some(Self::Canceled),
            "incomplete" => Some(Self::Incomplete),
            "incomplete_expired" => Some(Self::IncompleteExpired),
            "unpaid" => Some(Self::Unpaid),
            "paused" => Some(Self::Paused),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Kind of an uploaded tender document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    Text,
}

impl DocumentKind {
    /// Classify a file name by its extension (case-insensitive).
    /// Returns `None` for unsupported or missing extensions.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "txt" | "md" | "csv" => Some(Self::Text),
            _ => None,
        }
    }

    /// Binary kinds are forwarded as encoded bytes; text is decoded inline.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::Text)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn category_labels_round_trip_through_from_label() {
        for category in EvidenceCategory::ALL {
            assert_eq!(EvidenceCategory::from_label(category.label()), Some(category));
        }
    }

    #[test]
    fn category_index_matches_declaration_order() {
        for (idx, category) in EvidenceCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), idx);
        }
    }

    #[test]
    fn category_from_label_is_lenient_on_case_and_whitespace() {
        assert_eq!(
            EvidenceCategory::from_label("  health & SAFETY "),
            Some(EvidenceCategory::HealthAndSafety)
        );
        assert_eq!(EvidenceCategory::from_label("Gossip"), None);
        assert_eq!(EvidenceCategory::from_label(""), None);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&EvidenceCategory::SocialValue).unwrap();
        assert_eq!(json, "\"Social Value\"");
    }

    #[test]
    fn invite_transitions() {
        assert!(InviteState::NoInvite.can_transition_to(InviteState::Invited));
        assert!(InviteState::Invited.can_transition_to(InviteState::Accepted));
        assert!(!InviteState::Accepted.can_transition_to(InviteState::Accepted));
        assert!(!InviteState::NoInvite.can_transition_to(InviteState::Accepted));
    }

    #[rstest]
    #[case("active", Some(SubscriptionStatus::Active))]
    #[case("Past_Due", Some(SubscriptionStatus::PastDue))]
    #[case("cancelled", Some(SubscriptionStatus::Canceled))]
    #[case("whatever", None)]
    fn subscription_status_parse(#[case] raw: &str, #[case] expected: Option<SubscriptionStatus>) {
        assert_eq!(SubscriptionStatus::parse(raw), expected);
    }

    #[rstest]
    #[case("tender.pdf", Some(DocumentKind::Pdf))]
    #[case("Tender.DOCX", Some(DocumentKind::Docx))]
    #[case("old.doc", Some(DocumentKind::Doc))]
    #[case("notes.txt", Some(DocumentKind::Text))]
    #[case("readme.md", Some(DocumentKind::Text))]
    #[case("archive.zip", None)]
    #[case("no_extension", None)]
    fn document_kind_from_file_name(#[case] name: &str, #[case] expected: Option<DocumentKind>) {
        assert_eq!(DocumentKind::from_file_name(name), expected);
    }

    #[test]
    fn only_text_is_inline() {
        assert!(DocumentKind::Pdf.is_binary());
        assert!(DocumentKind::Doc.is_binary());
        assert!(!DocumentKind::Text.is_binary());
    }
}
