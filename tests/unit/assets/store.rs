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
fn inserting_the_same_name_twice_yields_distinct_ids() {
    let mut store = SourceSheetStore::new();
    let grid = SheetGrid::new(2, 1).unwrap();
    let a = store
        .insert_image("walk.png", solid(4, 2, [1, 1, 1, 255]), grid)
        .unwrap();
    let b = store
        .insert_image("walk.png", solid(4, 2, [2, 2, 2, 255]), grid)
        .unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
}

#[test]
fn lookup_and_removal() {
    let mut store = SourceSheetStore::new();
    let grid = SheetGrid::new(1, 1).unwrap();
    let id = store
        .insert_image("one.png", solid(2, 2, [5, 5, 5, 255]), grid)
        .unwrap();

    assert_eq!(store.get(id).unwrap().name, "one.png");
    assert!(store.remove(id));
    assert!(!store.remove(id));
    assert!(store.get(id).is_err());
    assert!(store.is_empty());
}

#[test]
fn removal_keeps_later_sheets_addressable() {
    let mut store = SourceSheetStore::new();
    let grid = SheetGrid::new(1, 1).unwrap();
    let a = store
        .insert_image("a.png", solid(2, 2, [1, 1, 1, 255]), grid)
        .unwrap();
    let b = store
        .insert_image("b.png", solid(2, 2, [2, 2, 2, 255]), grid)
        .unwrap();

    assert!(store.remove(a));
    assert_eq!(store.get(b).unwrap().name, "b.png");
    assert_eq!(store.sheets().len(), 1);
}

#[test]
fn generate_frames_walks_sheets_in_insertion_order() {
    let mut store = SourceSheetStore::new();
    store
        .insert_image(
            "a.png",
            solid(4, 2, [1, 1, 1, 255]),
            SheetGrid::new(2, 1).unwrap(),
        )
        .unwrap();
    let b = store
        .insert_image(
            "b.png",
            solid(2, 4, [2, 2, 2, 255]),
            SheetGrid::new(1, 2).unwrap(),
        )
        .unwrap();

    let frames = store.generate_frames();
    assert_eq!(frames.len(), 4);
    assert!(frames.iter().all(|f| f.selected));
    assert_eq!(
        frames.iter().map(|f| f.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    assert_eq!(frames[2].sheet, b);
    assert_eq!(frames[2].local_index, 0);
    assert_eq!((frames[3].col, frames[3].row), (0, 1));
}

#[test]
fn set_grid_reinterprets_existing_pixels() {
    let mut store = SourceSheetStore::new();
    let id = store
        .insert_image(
            "a.png",
            solid(8, 4, [1, 1, 1, 255]),
            SheetGrid::new(4, 2).unwrap(),
        )
        .unwrap();
    assert_eq!(store.generate_frames().len(), 8);

    store.set_grid(id, SheetGrid::new(2, 2).unwrap()).unwrap();
    assert_eq!(store.get(id).unwrap().raster.width(), 8);
    assert_eq!(store.generate_frames().len(), 4);
}

#[test]
fn insert_frames_packs_an_intermediate_sheet() {
    let mut store = SourceSheetStore::new();
    let frames: Vec<RasterBuffer> = (0..5)
        .map(|i| solid(3, 3, [i as u8, 0, 0, 255]))
        .collect();
    let id = store
        .insert_frames("clip.mp4", SourceKind::Video, &frames)
        .unwrap();

    let sheet = store.get(id).unwrap();
    // 5 frames auto-pack as ceil(sqrt(5)) = 3 columns, 2 rows.
    assert_eq!(sheet.grid, SheetGrid::new(3, 2).unwrap());
    assert_eq!(sheet.raster.width(), 9);
    assert_eq!(sheet.raster.height(), 6);
    assert_eq!(sheet.kind, SourceKind::Video);
    // Frame 4 sits at cell (1, 1).
    assert_eq!(sheet.raster.pixel(3, 3), [4, 0, 0, 255]);
}

#[test]
fn insert_frames_rejects_an_empty_sequence() {
    let mut store = SourceSheetStore::new();
    let err = store
        .insert_frames("empty.mp4", SourceKind::Video, &[])
        .unwrap_err();
    assert!(matches!(err, ForgeError::Decode(_)));
}

#[test]
fn insert_gif_flattens_and_packs() {
    // Two 2x2 frames (red, then blue drawn over) become a 2-frame sheet.
    let palette = [255u8, 0, 0, 0, 0, 255];
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, 2, 2, &palette).unwrap();
        let mut first = gif::Frame::from_palette_pixels(2, 2, [0u8, 0, 0, 0], &palette, None);
        first.dispose = gif::DisposalMethod::Keep;
        encoder.write_frame(&first).unwrap();
        let second = gif::Frame::from_palette_pixels(2, 2, [1u8, 1, 1, 1], &palette, None);
        encoder.write_frame(&second).unwrap();
    }

    let mut store = SourceSheetStore::new();
    let id = store.insert_gif("anim.gif", &bytes).unwrap();
    let sheet = store.get(id).unwrap();
    assert_eq!(sheet.kind, SourceKind::Gif);
    assert_eq!(sheet.grid, SheetGrid::new(2, 1).unwrap());
    assert_eq!(sheet.raster.width(), 4);
    assert_eq!(sheet.raster.height(), 2);
    assert_eq!(sheet.raster.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(sheet.raster.pixel(2, 0), [0, 0, 255, 255]);
}

#[test]
fn insert_gif_rejects_garbage_without_side_effects() {
    let mut store = SourceSheetStore::new();
    assert!(store.insert_gif("bad.gif", b"nope").is_err());
    assert!(store.is_empty());
}
