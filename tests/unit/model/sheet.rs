use super::*;

fn sheet_4x2() -> SourceSheet {
    // 8x4 pixels cut into a 4x2 grid of 2x2 frames, each cell a distinct color.
    let mut raster = RasterBuffer::new(8, 4).unwrap();
    for row in 0..2u32 {
        for col in 0..4u32 {
            let shade = (row * 4 + col + 1) as u8 * 20;
            for dy in 0..2u32 {
                for dx in 0..2u32 {
                    raster.set_pixel(col * 2 + dx, row * 2 + dy, [shade, 0, 0, 255]);
                }
            }
        }
    }
    SourceSheet {
        id: SheetId::from_u64(1),
        name: "test".to_string(),
        raster,
        grid: SheetGrid::new(4, 2).unwrap(),
        kind: SourceKind::Image,
    }
}

#[test]
fn grid_rejects_zero_dimensions() {
    assert!(SheetGrid::new(0, 1).is_err());
    assert!(SheetGrid::new(1, 0).is_err());
    assert_eq!(SheetGrid::new(3, 2).unwrap().cell_count(), 6);
}

#[test]
fn frame_size_is_integer_cell_division() {
    let sheet = sheet_4x2();
    assert_eq!(sheet.frame_size().unwrap(), (2, 2));
}

#[test]
fn frame_size_rejects_grids_finer_than_the_image() {
    let mut sheet = sheet_4x2();
    sheet.grid = SheetGrid::new(16, 1).unwrap();
    assert!(sheet.frame_size().is_err());
}

#[test]
fn crop_frame_reads_the_right_cell() {
    let sheet = sheet_4x2();
    let frame = sheet.crop_frame(2, 1).unwrap();
    assert_eq!(frame.width(), 2);
    assert_eq!(frame.height(), 2);
    // Cell (2,1) is the 7th cell: shade 7 * 20.
    assert_eq!(frame.pixel(0, 0), [140, 0, 0, 255]);
    assert_eq!(frame.pixel(1, 1), [140, 0, 0, 255]);
}

#[test]
fn crop_frame_rejects_cells_outside_the_grid() {
    let sheet = sheet_4x2();
    assert!(sheet.crop_frame(4, 0).is_err());
    assert!(sheet.crop_frame(0, 2).is_err());
}

#[test]
fn regridding_reinterprets_without_resizing() {
    let mut sheet = sheet_4x2();
    sheet.grid = SheetGrid::new(2, 2).unwrap();
    assert_eq!(sheet.raster.width(), 8);
    assert_eq!(sheet.raster.height(), 4);
    assert_eq!(sheet.frame_size().unwrap(), (4, 2));
}

#[test]
fn sheet_id_raw_roundtrip() {
    let id = SheetId::from_u64(0xdead_beef);
    assert_eq!(id.as_u64(), 0xdead_beef);
}
