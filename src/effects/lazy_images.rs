//! Lazy Images - Deferred image sources, loaded on first sight.
//!
//! Runs after `load`. Every `img[data-src]` is observed; the first time one
//! intersects the viewport its `data-src` is copied to `src`, the `lazy`
//! class is removed and the image is unobserved.

use crate::error::FxResult;
use crate::pipeline::Page;
use crate::state::{IntersectionEntry, ObserverId, ObserverOptions};

pub const LAZY_IMAGES: &str = "img[data-src]";
pub const LAZY_CLASS: &str = "lazy";

pub fn init_lazy_images(page: &mut Page) -> FxResult<()> {
    let images = page.document().query_all(LAZY_IMAGES)?;
    if images.is_empty() {
        tracing::debug!("no lazy images");
        return Ok(());
    }

    let observer = page.create_observer(
        ObserverOptions::default(),
        |page: &mut Page, entries: &[IntersectionEntry], observer: ObserverId| {
            for entry in entries.iter().filter(|e| e.is_intersecting) {
                let img = entry.target;
                let doc = page.document_mut();
                if let Some(src) = doc.attribute(img, "data-src").map(str::to_owned) {
                    doc.set_attribute(img, "src", &src);
                }
                doc.remove_class(img, LAZY_CLASS);
                page.unobserve(observer, img);
                tracing::trace!(?img, "lazy image loaded");
            }
        },
    );

    for &img in &images {
        page.observe(observer, img);
    }
    tracing::debug!(count = images.len(), "lazy images observed");
    Ok(())
}
