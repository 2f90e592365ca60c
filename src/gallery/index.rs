//! Image index derivation.

use crate::content::{Block, Document};

/// One indexed image, rebuilt whenever rendered content changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageEntry {
    /// Source reference (may be empty when the element had none)
    pub src: String,
    /// Alt text, if any
    pub alt: Option<String>,
    /// Caption: containing figure's caption if present, else alt text
    pub caption: Option<String>,
    /// Position in first-appearance order, 0-based
    pub index: usize,
}

impl ImageEntry {
    /// Filename suggested when saving this image: alt text when present,
    /// else a generic placeholder.
    pub fn suggested_name(&self) -> &str {
        self.alt.as_deref().filter(|alt| !alt.is_empty()).unwrap_or("image")
    }
}

/// Build the ordered image index for a rendered document.
///
/// Walks the block tree in document order; each image element yields one
/// entry whose `index` equals its position in the traversal. The walk is
/// pure; a fresh call fully replaces any previous snapshot.
pub fn collect_images(doc: &Document) -> Vec<ImageEntry> {
    let mut entries = Vec::new();
    walk(doc.blocks(), None, &mut entries);
    entries
}

fn walk(blocks: &[Block], figure_caption: Option<&str>, out: &mut Vec<ImageEntry>) {
    for block in blocks {
        match block {
            Block::Image(image) => {
                let caption = figure_caption
                    .map(ToString::to_string)
                    .or_else(|| image.alt.clone());
                out.push(ImageEntry {
                    src: image.src.clone(),
                    alt: image.alt.clone(),
                    caption,
                    index: out.len(),
                });
            }
            Block::Figure(figure) => {
                walk(&figure.children, figure.caption.as_deref(), out);
            }
            Block::Raw(_) | Block::Callout(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_has_no_images() {
        let doc = Document::render(Some("<p>text only</p>"));
        assert!(collect_images(&doc).is_empty());
    }

    #[test]
    fn test_ordinals_follow_document_order() {
        let doc = Document::render(Some(
            "<img src=\"a.png\" alt=\"A\"><p>x</p>\
             <img src=\"b.png\" alt=\"B\"><img src=\"c.png\" alt=\"C\">",
        ));
        let images = collect_images(&doc);
        assert_eq!(images.len(), 3);
        for (i, image) in images.iter().enumerate() {
            assert_eq!(image.index, i);
        }
        assert_eq!(images[0].src, "a.png");
        assert_eq!(images[1].src, "b.png");
        assert_eq!(images[2].src, "c.png");
    }

    #[test]
    fn test_caption_prefers_figure_caption() {
        let doc = Document::render(Some(
            "<figure><img src=\"p.png\" alt=\"alt text\">\
             <figcaption>figure caption</figcaption></figure>",
        ));
        let images = collect_images(&doc);
        assert_eq!(images[0].caption.as_deref(), Some("figure caption"));
        assert_eq!(images[0].alt.as_deref(), Some("alt text"));
    }

    #[test]
    fn test_caption_falls_back_to_alt() {
        let doc = Document::render(Some("<img src=\"p.png\" alt=\"only alt\">"));
        assert_eq!(
            collect_images(&doc)[0].caption.as_deref(),
            Some("only alt")
        );
    }

    #[test]
    fn test_caption_absent_when_no_figure_and_no_alt() {
        let doc = Document::render(Some("<img src=\"p.png\">"));
        let images = collect_images(&doc);
        assert_eq!(images[0].caption, None);
        assert_eq!(images[0].alt, None);
    }

    #[test]
    fn test_figure_images_keep_global_ordinals() {
        let doc = Document::render(Some(
            "<img src=\"a.png\">\
             <figure><img src=\"b.png\"><figcaption>cap</figcaption></figure>\
             <img src=\"c.png\">",
        ));
        let images = collect_images(&doc);
        assert_eq!(images.len(), 3);
        assert_eq!(images[1].src, "b.png");
        assert_eq!(images[1].index, 1);
        assert_eq!(images[1].caption.as_deref(), Some("cap"));
        assert_eq!(images[2].index, 2);
    }

    #[test]
    fn test_suggested_name() {
        let entry = ImageEntry {
            alt: Some("diagram".to_string()),
            ..ImageEntry::default()
        };
        assert_eq!(entry.suggested_name(), "diagram");
        assert_eq!(ImageEntry::default().suggested_name(), "image");
    }
}
