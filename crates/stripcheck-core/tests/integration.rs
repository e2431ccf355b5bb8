//! End-to-end tests for the analysis pipeline.
//!
//! Most tests use a FixedLocator that reports a pre-set fiducial rectangle,
//! so they exercise zone geometry, sampling, classification and rule matching
//! without needing a printable marker. The QR scenes at the end render a real
//! code and go through the default backend.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use qrcode::{Color, QrCode};
use std::io::Cursor;
use std::sync::Arc;
use stripcheck_core::classify::Miss;
use stripcheck_core::config::AnalysisConfig;
use stripcheck_core::error::StripError;
use stripcheck_core::fiducial::FiducialLocator;
use stripcheck_core::model::Rect;
use stripcheck_core::rules::{load_rule_table, parse_rule_table};
use stripcheck_core::{AnalysisEngine, AnalysisResult, RuleTable};

struct FixedLocator {
    fiducial: Option<Rect>,
}

impl FiducialLocator for FixedLocator {
    fn locate(&self, _image: &RgbImage) -> Option<Rect> {
        self.fiducial
    }

    fn backend_name(&self) -> &str {
        "fixed"
    }
}

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const MAGENTA: Rgb<u8> = Rgb([255, 0, 255]);
const ORANGE: Rgb<u8> = Rgb([255, 128, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

// 200x200 frame; the fiducial is 17px from the top edge, giving a 12px border.
const FIDUCIAL: Rect = Rect {
    x: 60,
    y: 17,
    width: 60,
    height: 60,
};
const TOP: Rect = Rect {
    x: 60,
    y: 5,
    width: 60,
    height: 12,
};
const BOTTOM: Rect = Rect {
    x: 60,
    y: 77,
    width: 60,
    height: 12,
};
const LEFT: Rect = Rect {
    x: 48,
    y: 17,
    width: 12,
    height: 60,
};
const RIGHT: Rect = Rect {
    x: 120,
    y: 17,
    width: 12,
    height: 60,
};

const HEADER: &str = "ID\tChlorine\tNitrate\tIron\tPhosphate\tOutput";

fn blank_frame() -> RgbImage {
    RgbImage::from_pixel(200, 200, WHITE)
}

/// Paint the first `count` pixels of `rect` in row-major order.
fn paint(img: &mut RgbImage, rect: Rect, color: Rgb<u8>, count: u32) {
    for i in 0..count.min(rect.width * rect.height) {
        img.put_pixel(rect.x + i % rect.width, rect.y + i / rect.width, color);
    }
}

fn paint_all(img: &mut RgbImage, rect: Rect, color: Rgb<u8>) {
    paint(img, rect, color, rect.width * rect.height);
}

fn rules(records: &[&str]) -> Arc<RuleTable> {
    let mut content = HEADER.to_string();
    for r in records {
        content.push('\n');
        content.push_str(r);
    }
    Arc::new(parse_rule_table(&content).0)
}

fn unsharpened() -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.preprocess.sharpen = false;
    config
}

fn engine(rules: Arc<RuleTable>, fiducial: Option<Rect>) -> AnalysisEngine {
    AnalysisEngine::new(rules)
        .with_locator(Box::new(FixedLocator { fiducial }))
        .with_config(unsharpened())
}

fn analyze(engine: &AnalysisEngine, img: RgbImage) -> AnalysisResult {
    engine.analyze(&DynamicImage::ImageRgb8(img)).unwrap()
}

// ---------------------------------------------------------------------------
// Scenario A: no fiducial found
// ---------------------------------------------------------------------------
#[test]
fn no_fiducial_reports_not_determined() {
    let engine = engine(rules(&["1\tAny\tAny\tAny\tAny\tSafe"]), None);
    let mut img = blank_frame();
    paint_all(&mut img, BOTTOM, MAGENTA);

    let result = analyze(&engine, img);
    assert_eq!(result.status, "CHECK");
    assert_eq!(result.chlorine, "NA");
    assert_eq!(result.nitrate, "NA");
    assert_eq!(result.iron, "NA");
    assert_eq!(result.phosphate, "NA");
}

#[test]
fn no_fiducial_detail_records_miss() {
    let engine = engine(rules(&[]), None);
    let analysis = engine.analyze_rgb(&blank_frame()).unwrap();
    assert_eq!(analysis.miss, Some(Miss::NoFiducial));
    assert!(analysis.fiducial.is_none());
    assert!(analysis.readings.is_empty());
}

// ---------------------------------------------------------------------------
// Scenario B: 12px border, faint chlorine zone
// ---------------------------------------------------------------------------
#[test]
fn faint_chlorine_zone_is_colorless() {
    let engine = engine(rules(&[]), Some(FIDUCIAL));
    let mut img = blank_frame();
    // 14 of 720 pixels, ratio ~0.019.
    paint(&mut img, BOTTOM, MAGENTA, 14);

    let analysis = engine.analyze_rgb(&img).unwrap();
    let zones = analysis.zones.unwrap();
    assert_eq!(zones.border, 12);
    assert_eq!(zones.top, TOP);
    assert_eq!(zones.bottom, BOTTOM);
    assert_eq!(zones.left, LEFT);
    assert_eq!(zones.right, RIGHT);

    let chlorine = analysis
        .readings
        .iter()
        .find(|r| r.zone == BOTTOM)
        .unwrap();
    assert!((chlorine.ratio - 14.0 / 720.0).abs() < 1e-9);
    assert_eq!(analysis.result.chlorine, "Colorless");
}

// ---------------------------------------------------------------------------
// Scenario C: all zones blank, first matching rule selects the verdict
// ---------------------------------------------------------------------------
#[test]
fn blank_zones_match_first_rule() {
    let engine = engine(
        rules(&[
            "1\tPink\tAny\tAny\tAny\tChlorinated",
            "2\tColorless\tAny\tAny\tAny\tSafe",
            "3\tAny\tAny\tAny\tAny\tFallback",
        ]),
        Some(FIDUCIAL),
    );

    let result = analyze(&engine, blank_frame());
    assert_eq!(
        result,
        AnalysisResult {
            status: "Safe".into(),
            chlorine: "Colorless".into(),
            nitrate: "White".into(),
            iron: "Clear".into(),
            phosphate: "Clear".into(),
        }
    );
}

#[test]
fn unmatched_states_yield_check() {
    let engine = engine(rules(&["1\tPink\tAny\tAny\tAny\tChlorinated"]), Some(FIDUCIAL));
    let result = analyze(&engine, blank_frame());
    assert_eq!(result.status, "CHECK");
    assert_eq!(result.chlorine, "Colorless");
}

// ---------------------------------------------------------------------------
// Scenario D: rule table missing
// ---------------------------------------------------------------------------
#[test]
fn missing_rule_table_always_checks() {
    let dir = tempfile::tempdir().unwrap();
    let load = load_rule_table(&dir.path().join("Conditions.txt"));
    assert!(load.failure.is_some());

    let engine = engine(Arc::new(load.table), Some(FIDUCIAL));
    let mut img = blank_frame();
    paint_all(&mut img, BOTTOM, MAGENTA);
    paint_all(&mut img, LEFT, BLUE);

    let result = analyze(&engine, img.clone());
    assert_eq!(result.status, "CHECK");
    assert_eq!(result.chlorine, "Dark Magenta");
    assert_eq!(result.phosphate, "Blue");

    assert_eq!(analyze(&engine, blank_frame()).status, "CHECK");
}

// ---------------------------------------------------------------------------
// Scenario E: fiducial too close to the frame edge
// ---------------------------------------------------------------------------
#[test]
fn fiducial_near_edge_matches_no_fiducial() {
    let table = rules(&["1\tAny\tAny\tAny\tAny\tSafe"]);
    let near_edge = engine(table.clone(), Some(Rect::new(60, 10, 60, 60)));
    let missing = engine(table, None);

    let mut img = blank_frame();
    paint_all(&mut img, Rect::new(60, 0, 60, 10), ORANGE);

    let a = analyze(&near_edge, img.clone());
    let b = analyze(&missing, img);
    assert_eq!(a, b);
    assert_eq!(a, AnalysisResult::not_determined());

    let detail = near_edge.analyze_rgb(&blank_frame()).unwrap();
    assert_eq!(detail.miss, Some(Miss::BorderTooThin));
    assert_eq!(detail.zones.unwrap().border, 5);
}

// ---------------------------------------------------------------------------
// Saturated zones and graded intensities
// ---------------------------------------------------------------------------
#[test]
fn saturated_zones_reach_top_states() {
    let engine = engine(
        rules(&[
            "1\tColorless\tAny\tAny\tAny\tSafe",
            "2\tDark Magenta\tBright Pink\tDark Orange\tBlue\tContaminated",
        ]),
        Some(FIDUCIAL),
    );
    let mut img = blank_frame();
    paint_all(&mut img, TOP, ORANGE);
    paint_all(&mut img, BOTTOM, MAGENTA);
    paint_all(&mut img, LEFT, BLUE);
    paint_all(&mut img, RIGHT, MAGENTA);

    let result = analyze(&engine, img);
    assert_eq!(result.iron, "Dark Orange");
    assert_eq!(result.chlorine, "Dark Magenta");
    assert_eq!(result.phosphate, "Blue");
    assert_eq!(result.nitrate, "Bright Pink");
    assert_eq!(result.status, "Contaminated");
}

#[test]
fn graded_coverage_selects_middle_states() {
    let engine = engine(rules(&[]), Some(FIDUCIAL));
    let mut img = blank_frame();
    paint(&mut img, BOTTOM, MAGENTA, 72); // 0.10
    paint(&mut img, RIGHT, MAGENTA, 72); // 0.10
    paint(&mut img, TOP, ORANGE, 144); // 0.20, on the threshold

    let result = analyze(&engine, img);
    assert_eq!(result.chlorine, "Light Pink");
    assert_eq!(result.nitrate, "Pink");
    assert_eq!(result.iron, "Dark Orange");
    assert_eq!(result.phosphate, "Clear");
}

#[test]
fn sharpening_keeps_solid_zones_readable() {
    let engine = AnalysisEngine::new(rules(&[])).with_locator(Box::new(FixedLocator {
        fiducial: Some(FIDUCIAL),
    }));
    assert!(engine.config().preprocess.sharpen);

    let mut img = blank_frame();
    paint_all(&mut img, TOP, ORANGE);
    paint_all(&mut img, BOTTOM, MAGENTA);
    paint_all(&mut img, LEFT, BLUE);

    let result = analyze(&engine, img);
    assert_eq!(result.iron, "Dark Orange");
    assert_eq!(result.chlorine, "Dark Magenta");
    assert_eq!(result.phosphate, "Blue");
    assert_eq!(result.nitrate, "White");
}

#[test]
fn parallel_and_sequential_sampling_agree() {
    let table = rules(&["1\tAny\tPink\tAny\tAny\tNitrate"]);
    let mut img = blank_frame();
    paint(&mut img, RIGHT, MAGENTA, 100);
    paint(&mut img, LEFT, BLUE, 300);

    let parallel = engine(table.clone(), Some(FIDUCIAL));
    let mut config = unsharpened();
    config.parallel_zones = false;
    let sequential = AnalysisEngine::new(table)
        .with_locator(Box::new(FixedLocator {
            fiducial: Some(FIDUCIAL),
        }))
        .with_config(config);

    let a = parallel.analyze_rgb(&img).unwrap();
    let b = sequential.analyze_rgb(&img).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.result.status, "Nitrate");
    assert_eq!(a.matched_rule.as_deref(), Some("1"));
}

#[test]
fn engine_shared_across_threads() {
    let engine = Arc::new(engine(rules(&["1\tColorless\tAny\tAny\tAny\tSafe"]), Some(FIDUCIAL)));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || analyze(&engine, blank_frame()).status)
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), "Safe");
    }
}

// ---------------------------------------------------------------------------
// Invalid input
// ---------------------------------------------------------------------------
#[test]
fn empty_image_is_rejected() {
    let engine = engine(rules(&[]), Some(FIDUCIAL));
    let err = engine.analyze(&DynamicImage::new_rgb8(0, 0)).unwrap_err();
    assert!(matches!(err, StripError::InvalidImage(_)));
}

#[test]
fn undecodable_bytes_are_rejected() {
    let engine = engine(rules(&[]), Some(FIDUCIAL));
    let err = engine.analyze_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, StripError::ImageDecode(_)));
}

#[test]
fn encoded_frame_without_marker_via_qr_backend() {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(blank_frame())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let engine = AnalysisEngine::new(rules(&["1\tAny\tAny\tAny\tAny\tSafe"]));
    let result = engine.analyze_bytes(&bytes).unwrap();
    assert_eq!(result, AnalysisResult::not_determined());
}

// ---------------------------------------------------------------------------
// QR fiducial through the default backend
// ---------------------------------------------------------------------------

const MODULE: u32 = 6;

/// 400x400 white frame with a 21-module code (126px) at `(x, y)`.
fn qr_scene(x: u32, y: u32) -> RgbImage {
    let code = QrCode::new(b"stripcheck").unwrap();
    let modules = code.width() as u32;
    let mut img = RgbImage::from_pixel(400, 400, WHITE);
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color == Color::Dark {
            let cell = Rect::new(
                x + (i as u32 % modules) * MODULE,
                y + (i as u32 / modules) * MODULE,
                MODULE,
                MODULE,
            );
            paint_all(&mut img, cell, Rgb([0, 0, 0]));
        }
    }
    img
}

/// Code centered at (137, 137): border 39 on every side. Each zone keeps a
/// 19px white strip against the code and is colored beyond it.
fn painted_qr_scene() -> RgbImage {
    let mut img = qr_scene(137, 137);
    paint_all(&mut img, Rect::new(137, 98, 126, 20), ORANGE);
    paint_all(&mut img, Rect::new(137, 282, 126, 20), MAGENTA);
    paint_all(&mut img, Rect::new(98, 137, 20, 126), BLUE);
    // 6 of 39 columns, ratio ~0.15.
    paint_all(&mut img, Rect::new(296, 137, 6, 126), MAGENTA);
    img
}

fn qr_rules() -> Arc<RuleTable> {
    rules(&[
        "1\tColorless\tAny\tAny\tAny\tSafe",
        "2\tDark Magenta\tPink\tDark Orange\tBlue\tContaminated",
    ])
}

#[test]
fn qr_backend_reads_painted_zones() {
    let engine = AnalysisEngine::new(qr_rules());
    let analysis = engine.analyze_rgb(&painted_qr_scene()).unwrap();

    assert_eq!(analysis.fiducial, Some(Rect::new(137, 137, 126, 126)));
    let zones = analysis.zones.unwrap();
    assert_eq!(zones.border, 39);
    assert_eq!(zones.top, Rect::new(137, 98, 126, 39));
    assert_eq!(zones.bottom, Rect::new(137, 263, 126, 39));
    assert_eq!(zones.left, Rect::new(98, 137, 39, 126));
    assert_eq!(zones.right, Rect::new(263, 137, 39, 126));

    assert_eq!(
        analysis.result,
        AnalysisResult {
            status: "Contaminated".into(),
            chlorine: "Dark Magenta".into(),
            nitrate: "Pink".into(),
            iron: "Dark Orange".into(),
            phosphate: "Blue".into(),
        }
    );
    assert_eq!(analysis.matched_rule.as_deref(), Some("2"));
}

#[test]
fn qr_backend_bottom_gap_sets_border() {
    // 16px below the code: border 11, just usable.
    let engine = AnalysisEngine::new(qr_rules());
    let analysis = engine.analyze_rgb(&qr_scene(137, 258)).unwrap();
    assert_eq!(analysis.fiducial, Some(Rect::new(137, 258, 126, 126)));
    assert_eq!(analysis.miss, None);
    assert_eq!(analysis.zones.unwrap().border, 11);
    assert_eq!(analysis.result.status, "Safe");

    // 15px below: border 10, rejected like a missing marker.
    let analysis = engine.analyze_rgb(&qr_scene(137, 259)).unwrap();
    assert_eq!(analysis.miss, Some(Miss::BorderTooThin));
    assert_eq!(analysis.result, AnalysisResult::not_determined());
}

// ---------------------------------------------------------------------------
// File entry point
// ---------------------------------------------------------------------------
#[test]
fn analyze_file_reads_png_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let marked = dir.path().join("strip.png");
    painted_qr_scene().save(&marked).unwrap();
    let blank = dir.path().join("blank.png");
    blank_frame().save(&blank).unwrap();

    let result = stripcheck_core::analyze_file(&marked, qr_rules()).unwrap();
    assert_eq!(result.status, "Contaminated");
    assert_eq!(result.nitrate, "Pink");

    let result = stripcheck_core::analyze_file(&blank, qr_rules()).unwrap();
    assert_eq!(result, AnalysisResult::not_determined());
}

#[test]
fn analyze_file_missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.png");
    let err = stripcheck_core::analyze_file(&missing, qr_rules()).unwrap_err();
    assert!(matches!(err, StripError::ImageDecode(_)));
}
