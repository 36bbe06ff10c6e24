// SPDX-License-Identifier: MPL-2.0
use iced_zoom_lens::config::{self, LensConfig};
use iced_zoom_lens::domain::lens::{DisplayGeometry, DisplayPoint, ExportFormat, LensShape};
use iced_zoom_lens::error::Error;
use iced_zoom_lens::lens::{Effect, Event, HoverState, LensSession};
use iced_zoom_lens::media::{load_image, ImageResource};
use image_rs::{Rgba, RgbaImage};
use tempfile::tempdir;

fn checkerboard(width: u32, height: u32) -> ImageResource {
    ImageResource::from_buffer(RgbaImage::from_fn(width, height, |x, y| {
        if (x / 10 + y / 10) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    }))
}

fn export_job(session: &mut LensSession, format: ExportFormat) -> iced_zoom_lens::lens::ExportJob {
    match session.handle(Event::ExportRequested(Some(format))) {
        Effect::Export(job) => job,
        other => panic!("expected export job, got {other:?}"),
    }
}

#[test]
fn export_without_hover_equals_base_image() {
    let image = checkerboard(120, 80);
    let mut session = LensSession::with_image(LensConfig::default(), image.clone());

    let exported = export_job(&mut session, ExportFormat::Png)
        .run()
        .expect("export");

    let decoded = image_rs::load_from_memory(&exported.bytes)
        .expect("decode")
        .to_rgba8();
    assert_eq!(&decoded, image.pixels());
}

#[test]
fn hover_zoom_export_flow_on_scaled_display() {
    let image = checkerboard(800, 600);
    let mut session = LensSession::with_image(
        LensConfig::from_raw(100, 2.0, "png", "square"),
        image.clone(),
    );
    // Displayed at half size.
    session.handle(Event::LayoutChanged(DisplayGeometry::new(400.0, 300.0, 800, 600)));

    assert!(matches!(
        session.handle(Event::PointerMoved(DisplayPoint::new(200.0, 150.0))),
        Effect::Redraw
    ));
    assert_eq!(session.state(), HoverState::Hovering);
    assert!(matches!(session.handle(Event::Wheel(-10.0)), Effect::Redraw));

    let exported = export_job(&mut session, ExportFormat::Png)
        .run()
        .expect("export");
    session.finish_export();

    let decoded = image_rs::load_from_memory(&exported.bytes)
        .expect("decode")
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (800, 600));
    // At zoom 1.0 on a half-size display the 100px lens covers 200 natural
    // pixels around (400, 300) and shows a 100px window, stretched 2x.
    assert_ne!(&decoded, image.pixels());
    assert_eq!(decoded.get_pixel(0, 0), image.pixels().get_pixel(0, 0));
    assert_eq!(decoded.get_pixel(299, 300), image.pixels().get_pixel(299, 300));
    assert_eq!(decoded.get_pixel(500, 300), image.pixels().get_pixel(500, 300));
}

#[test]
fn pointer_leave_then_wheel_is_ignored() {
    let mut session = LensSession::with_image(LensConfig::default(), checkerboard(200, 200));
    session.handle(Event::PointerMoved(DisplayPoint::new(100.0, 100.0)));
    assert!(matches!(session.handle(Event::PointerLeft), Effect::HideLens));

    assert!(matches!(session.handle(Event::Wheel(5.0)), Effect::None));
    assert!((session.zoom().level() - 2.0).abs() < f32::EPSILON);
}

#[test]
fn jpeg_alias_and_unknown_formats_export_jpeg() {
    for name in ["jpeg", "JPG", "bmp", ""] {
        let mut session = LensSession::with_image(
            LensConfig::from_raw(150, 2.0, name, "circle"),
            checkerboard(64, 64),
        );
        let job = match session.handle(Event::ExportRequested(None)) {
            Effect::Export(job) => job,
            other => panic!("expected export job, got {other:?}"),
        };
        let exported = job.run().expect("export");
        assert_eq!(exported.format, ExportFormat::Jpg, "format name {name:?}");
        assert_eq!(
            image_rs::guess_format(&exported.bytes).expect("known format"),
            image_rs::ImageFormat::Jpeg
        );
    }
}

#[test]
fn config_file_drives_session() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(
        &path,
        "[lens]\nlens_size = 10\nzoom_level = 4.0\nshape = \"SQUARE\"\n\n[export]\nformat = \"PNG\"\n",
    )
    .expect("Failed to write config file");

    let lens = config::load_from_path(&path)
        .expect("Failed to load config")
        .lens_config();
    let session = LensSession::new(lens);

    assert_eq!(session.zoom().lens_size(), 50);
    assert!((session.zoom().level() - 4.0).abs() < f32::EPSILON);
    assert_eq!(session.zoom().shape(), LensShape::Square);
    assert_eq!(session.config().format, ExportFormat::Png);
}

#[test]
fn load_image_from_disk_feeds_session() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("sample.png");
    RgbaImage::from_pixel(30, 20, Rgba([1, 2, 3, 255]))
        .save(&path)
        .expect("Failed to write png");

    let image = load_image(&path).expect("Failed to load png");
    let mut session = LensSession::with_image(LensConfig::default(), image);
    session.handle(Event::PointerMoved(DisplayPoint::new(15.0, 10.0)));

    let frame = session.visible_frame().expect("frame");
    assert_eq!(*frame.image().get_pixel(75, 75), Rgba([1, 2, 3, 255]));
}

#[test]
fn export_needs_an_image() {
    let mut session = LensSession::new(LensConfig::default());
    match session.handle(Event::ExportRequested(None)) {
        Effect::Error(err) => {
            assert_eq!(err, Error::ResourceUnavailable);
            assert_eq!(err.kind(), "error-resource-unavailable");
        }
        other => panic!("expected error, got {other:?}"),
    }
}
