use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::domain::entities::{
    AuditEvent, AuditEventType, ClientInfo, EmailVerification, PasswordReset,
    PasswordResetOutcome, RefreshGrant, Session, TokenPair, TokenPayload,
    PASSWORD_RESET_PUBLIC_MESSAGE, TOKEN_TYPE,
};

#[test]
fn test_session_copies_client_info() {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let client = ClientInfo::new("10.0.0.7", "curl/8.0");
    let session = Session::new("u1", &client, created_at);

    assert_eq!(session.subject_id(), "u1");
    assert_eq!(session.ip_address, "10.0.0.7");
    assert_eq!(session.user_agent, "curl/8.0");
    assert_eq!(session.created_at, created_at);
}

#[test]
fn test_every_payload_exposes_its_subject() {
    assert_eq!(RefreshGrant::new("u2").subject_id(), "u2");
    assert_eq!(PasswordReset::new("u3", "a@b.com").subject_id(), "u3");
    assert_eq!(EmailVerification::new("u4", "c@d.com").subject_id(), "u4");
}

#[test]
fn test_token_pair_wire_format() {
    let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 3600);
    assert_eq!(pair.token_type, TOKEN_TYPE);

    let value = serde_json::to_value(&pair).unwrap();
    assert_eq!(
        value,
        json!({
            "access_token": "access",
            "refresh_token": "refresh",
            "token_type": "Bearer",
            "expires_in": 3600,
        })
    );
}

#[test]
fn test_password_reset_outcomes_share_public_message() {
    let issued = PasswordResetOutcome::Issued {
        token: "t".to_string(),
        subject_id: "u1".to_string(),
    };
    let unknown = PasswordResetOutcome::UnknownEmail;

    assert_eq!(issued.public_message(), unknown.public_message());
    assert_eq!(unknown.public_message(), PASSWORD_RESET_PUBLIC_MESSAGE);
    assert_eq!(issued.token(), Some("t"));
    assert_eq!(unknown.token(), None);
}

#[test]
fn test_audit_event_builder() {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let event = AuditEvent::new(AuditEventType::Login, true, at)
        .with_subject("u1")
        .with_ip("10.0.0.7")
        .with_details(json!({ "user_agent": "curl/8.0" }));

    assert_eq!(event.subject_id.as_deref(), Some("u1"));
    assert_eq!(event.ip_address.as_deref(), Some("10.0.0.7"));
    assert_eq!(event.event_type.as_str(), "LOGIN");
    assert_eq!(event.details["user_agent"], "curl/8.0");
}
