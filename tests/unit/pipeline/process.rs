use super::*;

use crate::model::sheet::SheetGrid;

const FRAME_COLORS: [[u8; 4]; 8] = [
    [255, 0, 0, 255],
    [0, 255, 0, 255],
    [0, 0, 255, 255],
    [255, 255, 0, 255],
    [255, 0, 255, 255],
    [0, 255, 255, 255],
    [255, 255, 255, 255],
    [128, 128, 128, 255],
];

/// A 4x2 sprite sheet of 16x16 solid-color frames.
fn seeded_store() -> (SourceSheetStore, Vec<Frame>) {
    let mut raster = RasterBuffer::new(64, 32).unwrap();
    for (i, &color) in FRAME_COLORS.iter().enumerate() {
        let col = (i % 4) as u32;
        let row = (i / 4) as u32;
        for dy in 0..16u32 {
            for dx in 0..16u32 {
                raster.set_pixel(col * 16 + dx, row * 16 + dy, color);
            }
        }
    }

    let mut store = SourceSheetStore::new();
    store
        .insert_image("sheet.png", raster, SheetGrid::new(4, 2).unwrap())
        .unwrap();
    let frames = store.generate_frames();
    (store, frames)
}

fn opts_8x8() -> ProcessOptions {
    ProcessOptions {
        target_width: 8,
        target_height: 8,
        ..ProcessOptions::default()
    }
}

#[test]
fn every_other_frame_packs_into_a_2x2_sheet() {
    let (store, mut frames) = seeded_store();
    for frame in frames.iter_mut() {
        frame.selected = frame.index % 2 == 0;
    }

    let sheet = process_sprites(&store, &frames, &opts_8x8())
        .unwrap()
        .expect("output for selected frames");

    assert_eq!((sheet.layout.cols, sheet.layout.rows), (2, 2));
    assert_eq!(sheet.raster.width(), 16);
    assert_eq!(sheet.raster.height(), 16);

    // Source frames 0, 2, 4, 6 land at output cells 0..4 in order.
    assert_eq!(sheet.raster.pixel(0, 0), FRAME_COLORS[0]);
    assert_eq!(sheet.raster.pixel(8, 0), FRAME_COLORS[2]);
    assert_eq!(sheet.raster.pixel(0, 8), FRAME_COLORS[4]);
    assert_eq!(sheet.raster.pixel(8, 8), FRAME_COLORS[6]);
}

#[test]
fn no_selected_frames_is_a_quiet_no_op() {
    let (store, mut frames) = seeded_store();
    for frame in frames.iter_mut() {
        frame.selected = false;
    }
    let out = process_sprites(&store, &frames, &opts_8x8()).unwrap();
    assert!(out.is_none());

    let out = process_sprites(&store, &[], &opts_8x8()).unwrap();
    assert!(out.is_none());
}

#[test]
fn empty_store_is_a_quiet_no_op() {
    let store = SourceSheetStore::new();
    let out = process_sprites(&store, &[], &opts_8x8()).unwrap();
    assert!(out.is_none());
}

#[test]
fn undersized_targets_are_rejected_at_the_boundary() {
    let (store, frames) = seeded_store();
    let opts = ProcessOptions {
        target_width: 4,
        target_height: 8,
        ..ProcessOptions::default()
    };
    assert!(process_sprites(&store, &frames, &opts).is_err());
}

#[test]
fn excessive_erosion_is_rejected_at_the_boundary() {
    let (store, frames) = seeded_store();
    let opts = ProcessOptions {
        target_width: 8,
        target_height: 8,
        removal: Some(crate::filters::background::RemovalOptions {
            erode_iterations: 11,
            ..Default::default()
        }),
        ..ProcessOptions::default()
    };
    assert!(process_sprites(&store, &frames, &opts).is_err());
}

#[test]
fn parallel_processing_matches_sequential_output() {
    let (store, frames) = seeded_store();

    let sequential = process_sprites(&store, &frames, &opts_8x8())
        .unwrap()
        .unwrap();

    let opts = ProcessOptions {
        threading: ProcessThreading {
            parallel: true,
            chunk_size: 3,
            threads: Some(2),
        },
        ..opts_8x8()
    };
    let parallel = process_sprites(&store, &frames, &opts).unwrap().unwrap();

    assert_eq!(sequential.raster, parallel.raster);
    assert_eq!(sequential.layout, parallel.layout);
}

#[test]
fn quantization_caps_the_sheet_to_the_palette() {
    let (store, frames) = seeded_store();
    let opts = ProcessOptions {
        quantize: Some(QuantizeOptions {
            max_colors: 2,
            dither: false,
        }),
        ..opts_8x8()
    };

    let sheet = process_sprites(&store, &frames, &opts).unwrap().unwrap();
    let mut distinct: Vec<[u8; 3]> = sheet
        .raster
        .data()
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .map(|px| [px[0], px[1], px[2]])
        .collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert!(distinct.len() <= 2, "got {} colors", distinct.len());
}

#[test]
fn background_removal_clears_frame_backgrounds() {
    // One 8x8 frame: white field with a black 4x4 block in the middle.
    let mut raster = RasterBuffer::new(8, 8).unwrap();
    for y in 0..8u32 {
        for x in 0..8u32 {
            raster.set_pixel(x, y, [255, 255, 255, 255]);
        }
    }
    for y in 2..6u32 {
        for x in 2..6u32 {
            raster.set_pixel(x, y, [0, 0, 0, 255]);
        }
    }

    let mut store = SourceSheetStore::new();
    store
        .insert_image("one.png", raster, SheetGrid::new(1, 1).unwrap())
        .unwrap();
    let frames = store.generate_frames();

    let opts = ProcessOptions {
        removal: Some(crate::filters::background::RemovalOptions::default()),
        ..opts_8x8()
    };
    let sheet = process_sprites(&store, &frames, &opts).unwrap().unwrap();

    assert_eq!(sheet.raster.pixel(0, 0)[3], 0);
    assert_eq!(sheet.raster.pixel(3, 3), [0, 0, 0, 255]);
}

#[test]
fn ingest_batch_isolates_bad_sources() {
    let palette = [255u8, 0, 0];
    let mut good = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut good, 2, 2, &palette).unwrap();
        let frame = gif::Frame::from_palette_pixels(2, 2, [0u8, 0, 0, 0], &palette, None);
        encoder.write_frame(&frame).unwrap();
    }

    let sources = vec![
        ("good.gif".to_string(), good),
        ("bad.gif".to_string(), b"not a gif".to_vec()),
    ];

    let mut store = SourceSheetStore::new();
    let report = ingest_gif_batch(&mut store, &sources);
    assert_eq!(report.ingested.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, "bad.gif");
    assert_eq!(store.len(), 1);
}
