//! Markup scanning into the block tree.
//!
//! A single forward pass over the transformed content that recognizes
//! exactly the elements the rest of the pipeline cares about (`img`,
//! `figure` and `figcaption`) and leaves everything else as raw runs.
//! This is not a sanitizer and not a full HTML parser; malformed markup
//! degrades to raw text, never to an error.

use super::callout::{Segment, scan};
use super::types::{Block, FigureNode, ImageNode};

/// Scan raw content into the structural block tree.
///
/// Callout markers are matched first (line tokenizer); the verbatim runs
/// between them are then scanned for image and figure elements. Ordering
/// is strictly document order throughout.
pub fn scan_blocks(raw: &str) -> Vec<Block> {
    let mut builder = TreeBuilder::default();
    let mut pending: Vec<&str> = Vec::new();

    for segment in scan(raw) {
        match segment {
            Segment::Verbatim(line) => pending.push(line),
            Segment::Callout(block) => {
                builder.scan_run(&pending.join("\n"));
                pending.clear();
                builder.push(Block::Callout(block));
            }
        }
    }
    builder.scan_run(&pending.join("\n"));
    builder.finish()
}

/// Accumulates blocks, tracking at most one open figure grouping.
/// Nested figures are not modeled; an inner `<figure>` is treated as text.
#[derive(Default)]
struct TreeBuilder {
    blocks: Vec<Block>,
    text: String,
    figure: Option<FigureNode>,
}

impl TreeBuilder {
    fn push(&mut self, block: Block) {
        self.flush_text();
        match &mut self.figure {
            Some(figure) => figure.children.push(block),
            None => self.blocks.push(block),
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let run = std::mem::take(&mut self.text);
        match &mut self.figure {
            Some(figure) => figure.children.push(Block::Raw(run)),
            None => self.blocks.push(Block::Raw(run)),
        }
    }

    fn open_figure(&mut self) {
        if self.figure.is_some() {
            return;
        }
        self.flush_text();
        self.figure = Some(FigureNode::default());
    }

    fn close_figure(&mut self) {
        self.flush_text();
        if let Some(figure) = self.figure.take() {
            self.blocks.push(Block::Figure(figure));
        }
    }

    /// Scan one verbatim run for image and figure elements.
    fn scan_run(&mut self, run: &str) {
        let mut rest = run;
        while let Some(open) = rest.find('<') {
            self.text.push_str(&rest[..open]);
            rest = &rest[open..];
            let Some(tag) = Tag::parse(rest) else {
                // Not a recognizable tag; keep the `<` literal
                self.text.push('<');
                rest = &rest[1..];
                continue;
            };
            let after = &rest[tag.len..];
            match tag.name.as_str() {
                "img" => {
                    self.push(Block::Image(ImageNode {
                        src: tag.attr("src").unwrap_or_default(),
                        alt: tag.attr("alt").filter(|alt| !alt.is_empty()),
                    }));
                    rest = after;
                }
                "figure" => {
                    self.open_figure();
                    rest = after;
                }
                "/figure" => {
                    self.close_figure();
                    rest = after;
                }
                "figcaption" if self.figure.is_some() => {
                    let (caption, remaining) = read_until_close(after, "figcaption");
                    let caption = super::types::strip_tags(caption);
                    let caption = caption.trim();
                    if let Some(figure) = &mut self.figure
                        && !caption.is_empty()
                    {
                        figure.caption = Some(caption.to_string());
                    }
                    rest = remaining;
                }
                _ => {
                    // Unhandled element: the tag text stays part of the raw run
                    self.text.push_str(&rest[..tag.len]);
                    rest = after;
                }
            }
        }
        self.text.push_str(rest);
        // A figure left open at the end of a run is closed rather than
        // allowed to swallow a following callout.
        self.close_figure();
        self.flush_text();
    }

    fn finish(mut self) -> Vec<Block> {
        self.close_figure();
        self.flush_text();
        self.blocks
    }
}

/// A parsed opening or closing tag.
struct Tag {
    /// Lowercased tag name; closing tags keep their `/` prefix
    name: String,
    /// Byte length of the whole tag text, `<` through `>`
    len: usize,
    attrs: Vec<(String, String)>,
}

impl Tag {
    /// Parse a tag starting at `input` (which begins with `<`).
    /// Returns `None` for text that only looks like a tag.
    fn parse(input: &str) -> Option<Self> {
        let inner = input.strip_prefix('<')?;
        let close = inner.find('>')?;
        let tag_text = &inner[..close];

        let mut chars = tag_text.char_indices();
        let mut name_end = tag_text.len();
        let leading_slash = tag_text.starts_with('/');
        if leading_slash {
            chars.next();
        }
        let mut saw_name = false;
        for (i, c) in chars.by_ref() {
            if c.is_ascii_alphanumeric() {
                saw_name = true;
            } else {
                name_end = i;
                break;
            }
        }
        if !saw_name {
            return None;
        }
        if name_end == tag_text.len() {
            // Tag with no attributes, e.g. `<figure>`
            return Some(Self {
                name: tag_text.to_ascii_lowercase(),
                len: close + 2,
                attrs: Vec::new(),
            });
        }

        let name = tag_text[..name_end].to_ascii_lowercase();
        let attrs = parse_attrs(&tag_text[name_end..]);
        Some(Self {
            name,
            len: close + 2,
            attrs,
        })
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.clone())
    }
}

fn parse_attrs(mut rest: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() || rest == "/" {
            break;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let name = rest[..name_end].trim_end_matches('/').to_ascii_lowercase();
        rest = &rest[name_end..];
        if let Some(after_eq) = rest.trim_start().strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(quote @ ('"' | '\'')) => {
                    let inner = &after_eq[1..];
                    match inner.find(quote) {
                        Some(end) => (&inner[..end], &inner[end + 1..]),
                        None => (inner, ""),
                    }
                }
                _ => {
                    let end = after_eq
                        .find(char::is_whitespace)
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            if !name.is_empty() {
                attrs.push((name, value.to_string()));
            }
            rest = remaining;
        } else if !name.is_empty() {
            attrs.push((name, String::new()));
        }
    }
    attrs
}

/// Read content up to the matching close tag, returning (inner, remaining).
/// A missing close tag consumes the rest of the run.
fn read_until_close<'a>(input: &'a str, name: &str) -> (&'a str, &'a str) {
    let mut search = 0;
    while let Some(rel) = input[search..].find('<') {
        let at = search + rel;
        let candidate = &input[at..];
        if let Some(inner) = candidate.strip_prefix("</") {
            let rest = inner.trim_start();
            if rest.len() >= name.len() && rest[..name.len()].eq_ignore_ascii_case(name) {
                if let Some(gt) = candidate.find('>') {
                    return (&input[..at], &input[at + gt + 1..]);
                }
            }
        }
        search = at + 1;
    }
    (input, "")
}
