use super::*;
use crate::anim::frame::VecFrameSource;
use crate::foundation::core::TRANSPARENT;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];

fn solid(
    index: u32,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    px: [u8; 4],
    d: DisposalMethod,
) -> AnimationFrame {
    AnimationFrame::new(index, x, y, d, 100, PixelBuffer::filled(w, h, px).unwrap())
}

fn expect_rect(buf: &PixelBuffer, rect: BBox, inside: [u8; 4], outside: [u8; 4]) {
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            let hit = x >= rect.x
                && x < rect.x + rect.width
                && y >= rect.y
                && y < rect.y + rect.height;
            let want = if hit { inside } else { outside };
            assert_eq!(buf.pixel(x, y), Some(want), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn restore_to_background_clears_before_next_frame_is_drawn() {
    let mut c = FrameCompositor::new(4, 4).unwrap();
    assert_eq!(c.state(), CompositorState::Empty);

    let f0 = c
        .compose(solid(0, 0, 0, 4, 4, RED, DisposalMethod::RestoreToBackground))
        .unwrap();
    expect_rect(&f0.buffer, BBox::new(0, 0, 4, 4), RED, RED);

    let f1 = c
        .compose(solid(1, 1, 1, 2, 2, BLUE, DisposalMethod::DoNotDispose))
        .unwrap();
    // Frame 0's area is cleared first, so only the blue square survives.
    expect_rect(&f1.buffer, BBox::new(1, 1, 2, 2), BLUE, TRANSPARENT);
    assert_eq!(c.state(), CompositorState::Composited { index: 1 });
}

#[test]
fn restore_to_previous_rolls_back_the_frame() {
    let frames = vec![
        solid(0, 0, 0, 4, 4, RED, DisposalMethod::RestoreToPrevious),
        solid(1, 0, 0, 1, 1, BLUE, DisposalMethod::DoNotDispose),
        solid(2, 3, 3, 1, 1, GREEN, DisposalMethod::DoNotDispose),
    ];
    let out = composite_all(VecFrameSource::new(4, 4, frames)).unwrap();
    assert_eq!(out.len(), 3);

    expect_rect(&out[0].buffer, BBox::new(0, 0, 4, 4), RED, RED);
    expect_rect(&out[1].buffer, BBox::new(0, 0, 1, 1), BLUE, TRANSPARENT);

    let mut expected = PixelBuffer::transparent(4, 4).unwrap();
    expected.pixel_mut(0, 0).unwrap().copy_from_slice(&BLUE);
    expected.pixel_mut(3, 3).unwrap().copy_from_slice(&GREEN);
    assert_eq!(out[2].buffer, expected);
}

#[test]
fn restore_to_previous_restores_earlier_content_not_transparency() {
    let mut c = FrameCompositor::new(3, 1).unwrap();
    c.compose(solid(0, 0, 0, 3, 1, RED, DisposalMethod::DoNotDispose))
        .unwrap();
    c.compose(solid(1, 1, 0, 1, 1, BLUE, DisposalMethod::RestoreToPrevious))
        .unwrap();
    let f2 = c
        .compose(solid(2, 2, 0, 1, 1, GREEN, DisposalMethod::DoNotDispose))
        .unwrap();
    assert_eq!(f2.buffer.pixel(0, 0), Some(RED));
    assert_eq!(f2.buffer.pixel(1, 0), Some(RED));
    assert_eq!(f2.buffer.pixel(2, 0), Some(GREEN));
}

#[test]
fn do_not_dispose_accumulates_every_unoverwritten_pixel() {
    let frames: Vec<_> = (0..4)
        .map(|i| solid(i, i, i, 1, 1, [i as u8 * 50, 0, 0, 255], DisposalMethod::DoNotDispose))
        .chain(std::iter::once(solid(4, 0, 0, 1, 1, BLUE, DisposalMethod::DoNotDispose)))
        .collect();
    let out = composite_all(VecFrameSource::new(4, 4, frames)).unwrap();
    let last = &out[4].buffer;
    assert_eq!(last.pixel(0, 0), Some(BLUE));
    for i in 1..4u32 {
        assert_eq!(last.pixel(i, i), Some([i as u8 * 50, 0, 0, 255]));
    }
    assert_eq!(last.pixel(1, 0), Some(TRANSPARENT));
}

#[test]
fn unspecified_behaves_like_do_not_dispose() {
    let mut c = FrameCompositor::new(2, 1).unwrap();
    c.compose(solid(0, 0, 0, 1, 1, RED, DisposalMethod::Unspecified))
        .unwrap();
    let f1 = c
        .compose(solid(1, 1, 0, 1, 1, BLUE, DisposalMethod::Unspecified))
        .unwrap();
    assert_eq!(f1.buffer.pixel(0, 0), Some(RED));
    assert_eq!(f1.buffer.pixel(1, 0), Some(BLUE));
}

#[test]
fn transparent_delta_samples_leave_canvas_untouched() {
    let mut c = FrameCompositor::new(2, 1).unwrap();
    c.compose(solid(0, 0, 0, 2, 1, RED, DisposalMethod::DoNotDispose))
        .unwrap();
    let mut data = vec![0u8; 8];
    data[4..].copy_from_slice(&BLUE);
    let delta = PixelBuffer::from_raw(2, 1, data).unwrap();
    let f1 = c
        .compose(AnimationFrame::new(1, 0, 0, DisposalMethod::DoNotDispose, 50, delta))
        .unwrap();
    assert_eq!(f1.buffer.pixel(0, 0), Some(RED));
    assert_eq!(f1.buffer.pixel(1, 0), Some(BLUE));
    assert_eq!(f1.duration_ms, 50);
}

#[test]
fn emitted_frames_are_decoupled_from_the_canvas() {
    let mut c = FrameCompositor::new(2, 2).unwrap();
    let f0 = c
        .compose(solid(0, 0, 0, 2, 2, RED, DisposalMethod::RestoreToBackground))
        .unwrap();
    c.compose(solid(1, 0, 0, 1, 1, BLUE, DisposalMethod::DoNotDispose))
        .unwrap();
    expect_rect(&f0.buffer, BBox::new(0, 0, 2, 2), RED, RED);
}

#[test]
fn out_of_bounds_bbox_poisons_the_session() {
    let mut c = FrameCompositor::new(4, 4).unwrap();
    c.compose(solid(0, 0, 0, 1, 1, RED, DisposalMethod::DoNotDispose))
        .unwrap();
    let err = c
        .compose(solid(1, 3, 3, 2, 2, BLUE, DisposalMethod::DoNotDispose))
        .unwrap_err();
    assert!(matches!(err, FramecutError::ContainerCorruption(_)));

    let again = c.compose(solid(2, 0, 0, 1, 1, BLUE, DisposalMethod::DoNotDispose));
    assert!(matches!(again, Err(FramecutError::ContainerCorruption(_))));
}

#[test]
fn delta_size_must_match_bbox() {
    let mut c = FrameCompositor::new(4, 4).unwrap();
    let mut frame = solid(0, 0, 0, 2, 2, RED, DisposalMethod::DoNotDispose);
    frame.bbox = BBox::new(0, 0, 3, 2);
    assert!(matches!(
        c.compose(frame),
        Err(FramecutError::ContainerCorruption(_))
    ));
}

#[test]
fn out_of_order_frames_are_rejected() {
    let mut c = FrameCompositor::new(2, 2).unwrap();
    let err = c
        .compose(solid(1, 0, 0, 1, 1, RED, DisposalMethod::DoNotDispose))
        .unwrap_err();
    assert!(matches!(err, FramecutError::ContainerCorruption(_)));
}

#[test]
fn composite_stops_after_first_error() {
    let frames = vec![
        solid(0, 0, 0, 1, 1, RED, DisposalMethod::DoNotDispose),
        solid(1, 5, 5, 1, 1, RED, DisposalMethod::DoNotDispose),
        solid(2, 0, 0, 1, 1, RED, DisposalMethod::DoNotDispose),
    ];
    let items: Vec<_> = composite(VecFrameSource::new(2, 2, frames))
        .unwrap()
        .collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert!(items[1].is_err());
    let overflowing = vec![solid(0, 1, 1, 2, 2, RED, DisposalMethod::DoNotDispose)];
    assert!(composite_all(VecFrameSource::new(2, 2, overflowing)).is_err());
}

#[test]
fn disposal_codes_map_and_reserved_codes_fail() {
    assert_eq!(DisposalMethod::from_code(0).unwrap(), DisposalMethod::Unspecified);
    assert_eq!(DisposalMethod::from_code(1).unwrap(), DisposalMethod::DoNotDispose);
    assert_eq!(DisposalMethod::from_code(2).unwrap(), DisposalMethod::RestoreToBackground);
    assert_eq!(DisposalMethod::from_code(3).unwrap(), DisposalMethod::RestoreToPrevious);
    for code in 4..=7 {
        assert!(matches!(
            DisposalMethod::from_code(code),
            Err(FramecutError::ContainerCorruption(_))
        ));
    }
}
