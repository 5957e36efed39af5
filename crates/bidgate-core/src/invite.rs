//! Invite tokens and the invite acceptance rule.
//!
//! Tokens are derived from the company name, so two companies whose names
//! differ only in case or punctuation share a token. Callers check the record
//! store for an existing token before creating a client.

use crate::entities::Client;
use crate::enums::InviteState;
use crate::errors::CoreError;

/// Derive the invite token for a company name: lowercase, keep ASCII letters and digits.
#[must_use]
pub fn invite_token(company_name: &str) -> String {
    company_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Build the public onboarding link for a token.
#[must_use]
pub fn invite_url(app_url: &str, token: &str) -> String {
    format!("{}/invite/{token}", app_url.trim_end_matches('/'))
}

/// Check that `client` may move to [`InviteState::Accepted`].
///
/// # Errors
///
/// Returns [`CoreError::AlreadyAccepted`] if the invite was accepted before, or
/// [`CoreError::InvalidTransition`] if the client has no invite at all.
pub fn ensure_acceptable(client: &Client) -> Result<(), CoreError> {
    let state = client.invite_state();
    if state == InviteState::Accepted {
        return Err(CoreError::AlreadyAccepted);
    }
    if !state.can_transition_to(InviteState::Accepted) {
        return Err(CoreError::InvalidTransition {
            entity_type: "client".into(),
            id: client.id.clone(),
            from: state.to_string(),
            to: InviteState::Accepted.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Acme & Co.", "acmeco")]
    #[case("ACME Ltd", "acmeltd")]
    #[case("  Smith-Jones 2024 ", "smithjones2024")]
    #[case("Café Noir", "cafnoir")]
    #[case("!!!", "")]
    fn token_is_lowercase_alphanumeric(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(invite_token(name), expected);
    }

    #[test]
    fn token_collides_for_punctuation_variants() {
        assert_eq!(invite_token("Acme & Co."), invite_token("ACME CO"));
    }

    #[test]
    fn invite_url_trims_trailing_slash() {
        assert_eq!(
            invite_url("https://app.example.com/", "acmeco"),
            "https://app.example.com/invite/acmeco"
        );
    }

    #[test]
    fn invited_client_is_acceptable() {
        let client = Client {
            id: "c1".into(),
            invite_token: Some("acmeco".into()),
            ..Default::default()
        };
        assert!(ensure_acceptable(&client).is_ok());
    }

    #[test]
    fn accepted_client_is_rejected() {
        let client = Client {
            id: "c1".into(),
            invite_token: Some("acmeco".into()),
            invite_accepted: true,
            ..Default::default()
        };
        assert_eq!(ensure_acceptable(&client), Err(CoreError::AlreadyAccepted));
    }

    #[test]
    fn client_without_invite_cannot_accept() {
        let client = Client {
            id: "c1".into(),
            ..Default::default()
        };
        assert!(matches!(
            ensure_acceptable(&client),
            Err(CoreError::InvalidTransition { .. })
        ));
    }
}
