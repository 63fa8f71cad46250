use super::*;

const OPAQUE: [u8; 4] = [255, 255, 255, 255];

/// Sheet with opaque columns at `cols`, each column opaque at a single row to prove any one
/// sample is enough.
fn sheet_with_columns(width: u32, height: u32, cols: &[u32]) -> PixelBuffer {
    let mut data = vec![0u8; (width * height * 4) as usize];
    for (i, &x) in cols.iter().enumerate() {
        let y = i as u32 % height;
        let idx = ((y * width + x) * 4) as usize;
        data[idx..idx + 4].copy_from_slice(&OPAQUE);
    }
    PixelBuffer::from_raw(width, height, data).unwrap()
}

#[test]
fn fully_transparent_buffer_yields_no_regions_on_either_axis() {
    for (w, h) in [(1, 1), (7, 3), (16, 16)] {
        let buf = PixelBuffer::transparent(w, h).unwrap();
        assert_eq!(scan_regions(&buf, Axis::Horizontal).count(), 0);
        assert_eq!(scan_regions(&buf, Axis::Vertical).count(), 0);
    }
}

#[test]
fn empty_buffer_yields_no_regions() {
    let buf = PixelBuffer::transparent(0, 4).unwrap();
    assert_eq!(scan_regions(&buf, Axis::Horizontal).count(), 0);
    assert_eq!(scan_regions(&buf, Axis::Vertical).count(), 0);
}

#[test]
fn fully_opaque_buffer_yields_one_region_spanning_axis() {
    let buf = PixelBuffer::filled(5, 3, OPAQUE).unwrap();
    let h: Vec<_> = scan_regions(&buf, Axis::Horizontal).collect();
    assert_eq!(h, vec![Region { start: 0, end: 4 }]);
    let v: Vec<_> = scan_regions(&buf, Axis::Vertical).collect();
    assert_eq!(v, vec![Region { start: 0, end: 2 }]);
}

#[test]
fn gaps_split_regions_in_ascending_order() {
    let buf = sheet_with_columns(12, 3, &[0, 1, 2, 5, 8, 9, 11]);
    let regions: Vec<_> = scan_regions(&buf, Axis::Horizontal).collect();
    assert_eq!(
        regions,
        vec![
            Region { start: 0, end: 2 },
            Region { start: 5, end: 5 },
            Region { start: 8, end: 9 },
            Region { start: 11, end: 11 },
        ]
    );
}

#[test]
fn vertical_axis_scans_rows() {
    let mut buf = PixelBuffer::transparent(3, 6).unwrap();
    for y in [1u32, 2, 4] {
        buf.pixel_mut(2, y).unwrap().copy_from_slice(&OPAQUE);
    }
    let regions: Vec<_> = scan_regions(&buf, Axis::Vertical).collect();
    assert_eq!(
        regions,
        vec![Region { start: 1, end: 2 }, Region { start: 4, end: 4 }]
    );
}

#[test]
fn semi_transparent_samples_count_as_opaque() {
    let mut buf = PixelBuffer::transparent(4, 2).unwrap();
    buf.pixel_mut(3, 1).unwrap().copy_from_slice(&[0, 0, 0, 1]);
    let regions: Vec<_> = scan_regions(&buf, Axis::Horizontal).collect();
    assert_eq!(regions, vec![Region { start: 3, end: 3 }]);
}

#[test]
fn regions_merge_back_to_the_opaque_line_set() {
    let patterns: [&[u32]; 4] = [&[], &[0], &[3, 4, 5, 9, 10, 14, 15], &[1, 3, 5, 7, 9]];
    for cols in patterns {
        let buf = sheet_with_columns(16, 4, cols);
        let merged: Vec<u32> = scan_regions(&buf, Axis::Horizontal)
            .flat_map(|r| r.start..=r.end)
            .collect();
        assert_eq!(merged, opaque_lines(&buf, Axis::Horizontal));
        assert_eq!(merged, cols.to_vec());
    }
}

#[test]
fn scanner_is_fused_after_exhaustion() {
    let buf = sheet_with_columns(4, 1, &[1]);
    let mut scanner = scan_regions(&buf, Axis::Horizontal);
    assert_eq!(scanner.next(), Some(Region { start: 1, end: 1 }));
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.next(), None);
}
