use genrecli::management::token_expired;
use genrecli::types::Token;

// Helper function to create a token obtained at `obtained_at` with a
// one-hour lifetime
fn create_test_token(obtained_at: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "playlist-read-private".to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

#[test]
fn test_fresh_token_is_not_expired() {
    let token = create_test_token(1_000);
    assert!(!token_expired(&token, 1_000));
    assert!(!token_expired(&token, 2_000));
}

#[test]
fn test_token_expires_with_safety_margin() {
    let token = create_test_token(1_000);

    // lifetime ends at 4_600; the 240s margin moves the cutoff to 4_360
    assert!(!token_expired(&token, 4_359));
    assert!(token_expired(&token, 4_360));
    assert!(token_expired(&token, 5_000));
}

#[test]
fn test_long_expired_token() {
    let token = create_test_token(0);
    assert!(token_expired(&token, 100_000));
}
