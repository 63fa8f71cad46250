use super::*;

#[test]
fn parse_dimensions_accepts_width_and_width_by_height() {
    assert_eq!(parse_dimensions("48").unwrap(), (48, None));
    assert_eq!(parse_dimensions("48x32").unwrap(), (48, Some(32)));
    assert_eq!(parse_dimensions("64X16").unwrap(), (64, Some(16)));
}

#[test]
fn parse_dimensions_rejects_garbage_and_zero() {
    for bad in ["", "x", "48x", "ax3", "0", "4x0", "-3"] {
        assert!(
            matches!(parse_dimensions(bad), Err(FramecutError::Configuration(_))),
            "{bad}"
        );
    }
    assert!(parse_size("48").is_err());
    assert_eq!(parse_size("8x9").unwrap(), (8, 9));
}

#[test]
fn job_json_defaults_match_the_cli() {
    let job = SliceJob::from_json_str(r#"{"slices": 4}"#).unwrap();
    assert_eq!(job.slices, Some(4));
    assert!(job.auto_detect);
    assert_eq!(job.direction, Axis::Horizontal);
    assert_eq!(job.format, OutputFormat::Png);
    assert_eq!(job.quality, 90);
    assert_eq!(job, SliceJob { slices: Some(4), ..SliceJob::default() });
}

#[test]
fn job_json_full_form() {
    let job = SliceJob::from_json_str(
        r#"{"frame_width": 32, "frame_height": 16, "direction": "v", "auto_detect": false,
            "padding": 2, "resize": [64, 64], "format": "webp", "quality": 75}"#,
    )
    .unwrap();
    job.validate().unwrap();
    assert_eq!(job.params().axis, Axis::Vertical);
    assert_eq!(job.finish().resize, Some((64, 64)));
    assert_eq!(job.finish().padding, 2);
}

#[test]
fn job_json_rejects_unknown_fields() {
    assert!(matches!(
        SliceJob::from_json_str(r#"{"slices": 2, "colour": "red"}"#),
        Err(FramecutError::Configuration(_))
    ));
}

#[test]
fn job_validate_covers_every_configuration_check() {
    assert!(SliceJob::default().validate().is_err());
    let base = SliceJob {
        slices: Some(2),
        ..SliceJob::default()
    };
    base.validate().unwrap();
    assert!(SliceJob { quality: 0, ..base.clone() }.validate().is_err());
    assert!(SliceJob { resize: Some([0, 3]), ..base.clone() }.validate().is_err());
    assert!(SliceJob { slices: Some(0), ..base }.validate().is_err());
}
