//! Snapshot tests using the insta crate.
//!
//! Inline snapshots pin the wire forms hosts persist: document
//! sources, outward events, and option files.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use pdfpane::ViewerOptions;
use pdfpane::types::{DocumentSource, ScalePreset, ViewerEvent};

// ============================================================================
// Document Source Serialization
// ============================================================================

#[test]
fn snapshot_document_source_path() {
    let source = DocumentSource::Path {
        path: "documents/report.pdf".into(),
    };
    insta::assert_json_snapshot!(source, @r#"
    {
      "kind": "path",
      "path": "documents/report.pdf"
    }
    "#);
}

#[test]
fn snapshot_document_source_bytes() {
    let source = DocumentSource::Bytes {
        data: b"%PDF-1.7".to_vec(),
    };
    insta::assert_json_snapshot!(source, @r#"
    {
      "kind": "bytes",
      "data": "JVBERi0xLjc="
    }
    "#);
}

#[test]
fn snapshot_document_source_url() {
    let source = DocumentSource::Url {
        url: "https://example.test/manual.pdf".into(),
    };
    insta::assert_json_snapshot!(source, @r#"
    {
      "kind": "url",
      "url": "https://example.test/manual.pdf"
    }
    "#);
}

// ============================================================================
// Viewer Events
// ============================================================================

#[test]
fn snapshot_viewer_events() {
    let events = vec![
        ViewerEvent::DocumentOpened { page_count: 12 },
        ViewerEvent::PageChanged { page: 3 },
        ViewerEvent::ScaleChanged {
            preset: ScalePreset::PageFit,
            scale: 1.0,
        },
        ViewerEvent::LinkActivated {
            destination: "https://elsewhere.test/manual.pdf".into(),
        },
    ];
    insta::assert_json_snapshot!(events, @r#"
    [
      {
        "event": "document_opened",
        "page_count": 12
      },
      {
        "event": "page_changed",
        "page": 3
      },
      {
        "event": "scale_changed",
        "preset": "page_fit",
        "scale": 1.0
      },
      {
        "event": "link_activated",
        "destination": "https://elsewhere.test/manual.pdf"
      }
    ]
    "#);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn snapshot_default_options() {
    insta::assert_json_snapshot!(ViewerOptions::default(), @r#"
    {
      "src": null,
      "page": 1,
      "worker_source": "pdf-assets/pdf-worker",
      "enable_hw_acceleration": true,
      "asset_root": ""
    }
    "#);
}
