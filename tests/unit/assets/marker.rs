use super::*;

#[test]
fn premul_constructor_checks_length() {
    assert!(MarkerImage::from_premul_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(MarkerImage::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(MarkerImage::from_premul_rgba8(0, 2, vec![]).is_err());
}

#[test]
fn svg_extension_selects_svg_rasterizer() {
    let dir = std::path::PathBuf::from("target").join("marker_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hand.svg");
    std::fs::write(
        &path,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"><circle cx="2" cy="2" r="2" fill="black"/></svg>"#,
    )
    .unwrap();

    let marker = MarkerImage::from_path(&path, 30, 30).unwrap();
    assert_eq!((marker.width(), marker.height()), (30, 30));
    assert_eq!(marker.rgba8_premul().len(), 30 * 30 * 4);
    // Corners of a circle stay transparent.
    assert_eq!(&marker.rgba8_premul()[..4], &[0, 0, 0, 0]);
}

#[test]
fn unreadable_marker_is_a_resource_error() {
    let err = MarkerImage::from_path(Path::new("does/not/exist.png"), 30, 30).unwrap_err();
    assert!(matches!(err, HandwriteError::Resource(_)));
}
