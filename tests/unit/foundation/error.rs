use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CuepathError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CuepathError::target("x")
            .to_string()
            .contains("target error:")
    );
    assert!(
        CuepathError::easing("x")
            .to_string()
            .contains("easing error:")
    );
    assert!(CuepathError::path("x").to_string().contains("path error:"));
    assert!(
        CuepathError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CuepathError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
