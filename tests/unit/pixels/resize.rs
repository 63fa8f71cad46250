use super::*;

#[test]
fn resize_produces_requested_dimensions() {
    let src = PixelBuffer::filled(4, 2, [10, 20, 30, 255]).unwrap();
    let out = resize_lanczos(&src, 9, 5).unwrap();
    assert_eq!(out.dimensions(), (9, 5));
}

#[test]
fn resize_constant_image_stays_constant() {
    let src = PixelBuffer::filled(6, 6, [120, 80, 40, 255]).unwrap();
    let out = resize_lanczos(&src, 3, 3).unwrap();
    for px in out.as_raw().chunks_exact(4) {
        assert!((i32::from(px[0]) - 120).abs() <= 1);
        assert!((i32::from(px[3]) - 255).abs() <= 1);
    }
}

#[test]
fn resize_is_deterministic() {
    let mut data = Vec::new();
    for i in 0..(5 * 5) {
        data.extend_from_slice(&[(i * 7) as u8, (i * 13) as u8, (i * 3) as u8, 255]);
    }
    let src = PixelBuffer::from_raw(5, 5, data).unwrap();
    let a = resize_lanczos(&src, 8, 3).unwrap();
    let b = resize_lanczos(&src, 8, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn resize_to_zero_is_configuration_error() {
    let src = PixelBuffer::filled(2, 2, [0, 0, 0, 255]).unwrap();
    assert!(matches!(
        resize_lanczos(&src, 0, 2),
        Err(FramecutError::Configuration(_))
    ));
}

#[test]
fn padded_frame_edges_keep_their_colour() {
    let src = PixelBuffer::filled(2, 2, [255, 0, 0, 255])
        .unwrap()
        .padded(2)
        .unwrap();
    let out = resize_lanczos(&src, 12, 12).unwrap();
    let mut partial = 0;
    for px in out.as_raw().chunks_exact(4) {
        if px[3] > 0 {
            assert_eq!(px[0], 255, "{px:?}");
            assert_eq!(&px[1..3], &[0, 0]);
        } else {
            assert_eq!(px, &[0, 0, 0, 0]);
        }
        if px[3] > 0 && px[3] < 255 {
            partial += 1;
        }
    }
    assert!(partial > 0, "edges should be partially covered");
}

#[test]
fn fully_transparent_samples_stay_transparent_black() {
    let mut data = vec![0u8; 4 * 4 * 4];
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&[90, 200, 10, 0]);
    }
    let src = PixelBuffer::from_raw(4, 4, data).unwrap();
    let out = resize_lanczos(&src, 7, 3).unwrap();
    assert!(out.as_raw().iter().all(|&b| b == 0));
}
