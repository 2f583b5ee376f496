//! Open a document with the pdfium engine and render its first page.
//!
//! Usage: render_page <document.pdf> [page]

use anyhow::Context;
use std::sync::Arc;

use pdfpane::engine::pdfium::PdfiumEngineProvider;
use pdfpane::host::{HostDocument, HostWindow};
use pdfpane::{DocumentSource, PdfViewerElement, ViewerOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().context("usage: render_page <document.pdf> [page]")?;
    let page: u16 = match args.next() {
        Some(raw) => raw.parse().context("page must be a number")?,
        None => 1,
    };

    let options = ViewerOptions {
        src: Some(DocumentSource::Path { path: path.into() }),
        page,
        ..ViewerOptions::default()
    };

    let document = Arc::new(HostDocument::new());
    let (mut viewer, events) = PdfViewerElement::new(HostWindow::shared(), document, options);

    viewer.mount(&PdfiumEngineProvider::new()).await?;
    println!(
        "Opened: {} pages, showing page {}",
        viewer.page_count(),
        viewer.current_page()
    );

    let bitmap = viewer.render_page(page, 0)?;
    let output = format!("page-{page}.png");
    bitmap.save(&output)?;
    println!("Wrote {output} ({}x{})", bitmap.width(), bitmap.height());

    viewer.unmount();
    drop(events);
    Ok(())
}
