use super::*;

#[test]
fn garbage_bytes_are_not_a_font() {
    let err = FontAsset::from_bytes(b"this is not a font".to_vec()).unwrap_err();
    assert!(matches!(err, HandwriteError::Resource(_)));
}

#[test]
fn missing_font_file_is_a_resource_error() {
    let err = FontAsset::from_path(Path::new("does/not/exist.ttf")).unwrap_err();
    assert!(matches!(err, HandwriteError::Resource(_)));
    assert!(err.to_string().contains("exist.ttf"));
}

#[test]
fn system_font_resolves_a_family_if_present() {
    let Some(path) = crate::test_support::find_system_font() else {
        return;
    };
    let font = FontAsset::from_path(&path).unwrap();
    assert!(!font.family().is_empty());
    assert!(!font.bytes().is_empty());
}
