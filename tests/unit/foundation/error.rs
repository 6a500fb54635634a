use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HandwriteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HandwriteError::input("x")
            .to_string()
            .contains("input error:")
    );
    assert!(
        HandwriteError::resource("x")
            .to_string()
            .contains("resource error:")
    );
    assert!(
        HandwriteError::render("x")
            .to_string()
            .contains("render error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HandwriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
