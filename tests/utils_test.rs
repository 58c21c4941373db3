use genrecli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_playlist_id_from_url() {
    // full share URL with query string
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );

    // share URL without query string
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );

    // bare id passes through
    assert_eq!(
        playlist_id_from_url("37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );

    // surrounding whitespace on a bare id is trimmed
    assert_eq!(
        playlist_id_from_url("  37i9dQZF1DXcBWIGoYBM5M "),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0), "0:00");
    assert_eq!(format_duration_ms(1_000), "0:01");
    assert_eq!(format_duration_ms(59_999), "0:59");
    assert_eq!(format_duration_ms(60_000), "1:00");
    assert_eq!(format_duration_ms(225_000), "3:45");
    assert_eq!(format_duration_ms(3_725_000), "62:05");
}

#[test]
fn test_mean() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[42.0]), Some(42.0));
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}
