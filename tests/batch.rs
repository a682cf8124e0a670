//! End-to-end batch tests against a real output directory.

use std::fs;
use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, RgbaImage};

use icon_stencil::{
    DirectoryFetcher, DirectorySink, Generator, GeneratorConfig, GlyphPackage, LibraryGroup,
    SkipReason, StencilDocument, fetch_all, normalize_all, parse_catalog,
};

const CATALOG: &str = r#"{"d":{"results":[
    {"Name":"Alert Notification","Category":"Foundation / Runtime","Icon":"https://cdn.test/icons/alert.svg"},
    {"Name":"Connectivity, Cloud","Category":"Integration","Icon":"https://cdn.test/icons/conn.png"},
    {"Name":"Ghost Service","Category":"Integration","Icon":"https://cdn.test/icons/ghost.svg"}
]}}"#;

const ALERT_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg" width="48" height="48" viewBox="0 0 48 48"><circle cx="24" cy="24" r="20"/></svg>"#;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn read_library(path: &std::path::Path) -> StencilDocument {
    let text = fs::read_to_string(path).unwrap();
    StencilDocument::from_xml("lib", &text).unwrap()
}

#[test]
fn full_batch_to_directory() {
    let icons = tempfile::tempdir().unwrap();
    fs::write(icons.path().join("alert.svg"), ALERT_SVG).unwrap();
    let conn_png = png(32, 20);
    fs::write(icons.path().join("conn.png"), &conn_png).unwrap();
    // ghost.svg is intentionally absent

    let out = tempfile::tempdir().unwrap();
    let entries = parse_catalog(CATALOG).unwrap();
    let records = normalize_all(fetch_all(entries, &DirectoryFetcher::new(icons.path())));

    let glyphs = GlyphPackage::from_json(
        r#"{"collection":"SAP-icons","data":{"add":{"path":"M0 0h512v512H0z"}}}"#,
    )
    .unwrap()
    .glyphs();

    let config = GeneratorConfig::new()
        .with_workers(3)
        .with_group_by_category(true)
        .with_flat_glyphs(true);
    let report = Generator::new(config)
        .unwrap()
        .run(&records, &glyphs, &mut DirectorySink::new(out.path()));

    assert_eq!(report.skipped.len(), 1, "{report}");
    assert_eq!(report.skipped[0].name, "Ghost Service");
    assert_eq!(report.skipped[0].reason, SkipReason::MissingPayload);
    assert!(report.failed_groups.is_empty(), "{report}");

    let root = out.path();
    let regular_alert = root.join("regular/Foundation - Runtime/Alert-Notification.svg");
    let written = fs::read_to_string(&regular_alert).unwrap();
    assert!(written.starts_with("<svg"));

    let regular_conn = root.join("regular/Integration/Connectivity--Cloud.png");
    assert_eq!(fs::read(&regular_conn).unwrap(), conn_png);

    let circled_conn = fs::read_to_string(root.join("circled/Integration/Connectivity--Cloud.svg")).unwrap();
    assert!(circled_conn.contains(r#"viewBox="0 0 56 56""#));
    assert!(circled_conn.contains(r#"r="23""#));
    assert!(circled_conn.contains("data:image/png;base64,"));

    assert!(root.join("SAP-icons/add.svg").is_file());

    let library = read_library(&root.join("libraries/regular-Integration.xml"));
    assert_eq!(library.len(), 1);
    let entry = &library.entries[0];
    assert_eq!(entry.title, "Connectivity--Cloud");
    assert_eq!((entry.w, entry.h), (32, 20));
    assert_eq!(entry.aspect, "fixed");
    let encoded = entry.data.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(general_purpose::STANDARD.decode(encoded).unwrap(), conn_png);

    let circled = read_library(&root.join("libraries/circled-Foundation - Runtime.xml"));
    assert_eq!((circled.entries[0].w, circled.entries[0].h), (56, 56));
    assert!(circled.entries[0].data.starts_with("data:image/svg+xml;base64,"));

    let glyph_library = read_library(&root.join("libraries/SAP-icons.xml"));
    assert_eq!((glyph_library.entries[0].w, glyph_library.entries[0].h), (510, 510));
}

#[test]
fn repackage_scanned_folder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 56 56"/>"#,
    )
    .unwrap();
    fs::write(dir.path().join("b.png"), png(5, 9)).unwrap();

    let group = LibraryGroup::scan("mixed", dir.path()).unwrap();
    let document = group.package().unwrap();

    assert_eq!(document.name, "mixed");
    let shapes: Vec<_> = document
        .entries
        .iter()
        .map(|e| (e.title.as_str(), e.w, e.h))
        .collect();
    assert_eq!(shapes, [("a", 56, 56), ("b", 5, 9)]);
    assert!(document.entries[0].data.starts_with("data:image/svg+xml;base64,"));
    assert!(document.entries[1].data.starts_with("data:image/png;base64,"));
}

#[test]
fn corrupted_file_blocks_only_that_library() {
    let dir = tempfile::tempdir().unwrap();
    let mut broken = png(4, 4);
    broken.truncate(16);
    fs::write(dir.path().join("broken.png"), broken).unwrap();

    let group = LibraryGroup::scan("broken", dir.path()).unwrap();
    let err = group.package().unwrap_err();
    assert!(err.to_string().contains("broken.png"));
}
