use super::*;

const SMALL: Canvas = Canvas {
    width: 4,
    height: 2,
};

#[test]
fn filled_frame_is_uniform() {
    let f = FrameRgb8::filled(SMALL, Rgb8::WHITE);
    assert_eq!(f.data.len(), 4 * 2 * 3);
    assert!(f.is_uniform(Rgb8::WHITE));
    assert!(!f.is_uniform(Rgb8::BLACK));
    f.validate().unwrap();
}

#[test]
fn pixel_lookup_and_bounds() {
    let mut f = FrameRgb8::filled(SMALL, Rgb8::WHITE);
    // Row 1, column 2.
    let i = (4 + 2) * 3;
    f.data[i..i + 3].copy_from_slice(&[1, 2, 3]);
    assert_eq!(f.pixel(2, 1), Some(Rgb8::new(1, 2, 3)));
    assert_eq!(f.pixel(4, 0), None);
    assert_eq!(f.pixel(0, 2), None);
}

#[test]
fn fingerprint_tracks_content_and_size() {
    let a = FrameRgb8::filled(SMALL, Rgb8::WHITE);
    let b = FrameRgb8::filled(SMALL, Rgb8::WHITE);
    assert_eq!(a.fingerprint(), b.fingerprint());

    let c = FrameRgb8::filled(SMALL, Rgb8::BLACK);
    assert_ne!(a.fingerprint(), c.fingerprint());

    let d = FrameRgb8::filled(
        Canvas {
            width: 2,
            height: 4,
        },
        Rgb8::WHITE,
    );
    assert_ne!(a.fingerprint(), d.fingerprint());
}

#[test]
fn validate_catches_truncated_data() {
    let mut f = FrameRgb8::filled(SMALL, Rgb8::WHITE);
    f.data.pop();
    assert!(f.validate().is_err());
}
