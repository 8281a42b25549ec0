//! Unit tests for the reCAPTCHA verifier

use rj_core::errors::ChallengeError;
use rj_core::services::{AntiAbuseVerifier, AttestationSlot, VerifierFactory};

use crate::identity::RecaptchaVerifierFactory;

#[tokio::test]
async fn test_browser_token_is_used_once() {
    let slot = AttestationSlot::new();
    let verifier = RecaptchaVerifierFactory::new(slot.clone(), None)
        .create("recaptcha-container")
        .unwrap();
    assert_eq!(verifier.anchor_id(), "recaptcha-container");

    slot.present("solved-1");
    assert_eq!(verifier.token().await.unwrap(), "solved-1");
    assert_eq!(
        verifier.token().await,
        Err(ChallengeError::issuance("reCAPTCHA verification required"))
    );
}

#[tokio::test]
async fn test_browser_token_preferred_over_fallback() {
    let slot = AttestationSlot::new();
    let verifier = RecaptchaVerifierFactory::new(slot.clone(), Some("test-token".to_string()))
        .create("recaptcha-container")
        .unwrap();

    slot.present("solved");
    assert_eq!(verifier.token().await.unwrap(), "solved");
    assert_eq!(verifier.token().await.unwrap(), "test-token");
}

#[tokio::test]
async fn test_cleared_verifier_refuses_tokens() {
    let slot = AttestationSlot::new();
    let verifier = RecaptchaVerifierFactory::new(slot.clone(), Some("test-token".to_string()))
        .create("recaptcha-container")
        .unwrap();
    slot.present("solved");

    verifier.clear();

    assert!(verifier.is_cleared());
    assert!(!slot.is_present());
    assert!(verifier.token().await.is_err());
}

#[test]
fn test_blank_anchor_is_rejected() {
    let factory = RecaptchaVerifierFactory::new(AttestationSlot::new(), None);
    assert!(factory.create(" ").is_err());
}
