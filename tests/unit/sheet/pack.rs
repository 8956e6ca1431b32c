use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> RasterBuffer {
    let mut buf = RasterBuffer::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            buf.set_pixel(x, y, px);
        }
    }
    buf
}

#[test]
fn packs_frames_row_major_with_no_gaps() {
    let frames = vec![
        solid(2, 2, [255, 0, 0, 255]),
        solid(2, 2, [0, 255, 0, 255]),
        solid(2, 2, [0, 0, 255, 255]),
    ];

    let sheet = pack_frames(&frames, 2, 2, 2).unwrap();
    assert_eq!((sheet.layout.cols, sheet.layout.rows), (2, 2));
    assert_eq!(sheet.raster.width(), 4);
    assert_eq!(sheet.raster.height(), 4);

    assert_eq!(sheet.raster.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(sheet.raster.pixel(2, 0), [0, 255, 0, 255]);
    assert_eq!(sheet.raster.pixel(0, 2), [0, 0, 255, 255]);
    // The fourth cell was never written and stays transparent.
    assert_eq!(sheet.raster.pixel(2, 2), [0, 0, 0, 0]);
}

#[test]
fn auto_columns_follow_the_layout_rule() {
    let frames: Vec<RasterBuffer> = (0..10).map(|_| solid(4, 4, [1, 1, 1, 255])).collect();
    let sheet = pack_frames(&frames, 4, 4, 0).unwrap();
    assert_eq!((sheet.layout.cols, sheet.layout.rows), (4, 3));
    assert_eq!(sheet.raster.width(), 16);
    assert_eq!(sheet.raster.height(), 12);
}

#[test]
fn transparent_frame_pixels_stay_transparent_on_the_sheet() {
    let mut frame = RasterBuffer::new(2, 2).unwrap();
    frame.set_pixel(0, 0, [9, 9, 9, 255]);

    let sheet = pack_frames(std::slice::from_ref(&frame), 2, 2, 0).unwrap();
    assert_eq!(sheet.raster.pixel(0, 0), [9, 9, 9, 255]);
    assert_eq!(sheet.raster.pixel(1, 1), [0, 0, 0, 0]);
}

#[test]
fn mismatched_frame_sizes_are_rejected() {
    let frames = vec![solid(2, 2, [1, 1, 1, 255]), solid(3, 2, [1, 1, 1, 255])];
    assert!(pack_frames(&frames, 2, 2, 0).is_err());
}

#[test]
fn no_frames_is_an_error_at_this_layer() {
    assert!(pack_frames(&[], 2, 2, 0).is_err());
}

#[test]
fn frame_size_is_recorded_on_the_output() {
    let frames = vec![solid(5, 7, [1, 1, 1, 255])];
    let sheet = pack_frames(&frames, 5, 7, 0).unwrap();
    assert_eq!(sheet.frame_width, 5);
    assert_eq!(sheet.frame_height, 7);
}
