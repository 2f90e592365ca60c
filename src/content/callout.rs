//! Callout marker detection and rewriting.
//!
//! Stored article content may carry inline annotation markers of the form
//! `[!kind] Title` at the start of a line, followed by body lines. This
//! module scans for them with an explicit line tokenizer (no pattern
//! matching, no backtracking) and rewrites each match into a structured
//! block. Anything that fails to match passes through verbatim.

use std::fmt;

/// Annotation kind carried by a callout block.
///
/// Unknown directive tokens normalize to [`CalloutKind::Note`]; the `error`
/// token is an alias for [`CalloutKind::Danger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalloutKind {
    Note,
    Info,
    Tip,
    Success,
    Warning,
    Danger,
    Question,
    Quote,
}

impl CalloutKind {
    /// Normalize a directive token (case-insensitive) to a kind.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "tip" => Self::Tip,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" | "error" => Self::Danger,
            "question" => Self::Question,
            "quote" => Self::Quote,
            // Any [!xxx]-shaped directive is an annotation attempt;
            // unrecognized tokens fall back to the default kind.
            _ => Self::Note,
        }
    }

    /// The CSS-addressable kind name used in rendered markup.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Info => "info",
            Self::Tip => "tip",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Question => "question",
            Self::Quote => "quote",
        }
    }
}

impl fmt::Display for CalloutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched annotation block, transient between scan and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalloutBlock {
    pub kind: CalloutKind,
    pub title: String,
    pub body: Option<String>,
}

impl CalloutBlock {
    /// Serialize to the rendered block markup.
    ///
    /// The template is fixed and never starts a line with `[!`, so output
    /// never re-matches the directive scanner.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(64 + self.title.len());
        out.push_str("<div class=\"callout callout-");
        out.push_str(self.kind.as_str());
        out.push_str("\"><div class=\"callout-title\"><strong>");
        out.push_str(&self.title);
        out.push_str("</strong></div>");
        if let Some(body) = &self.body {
            out.push_str("<div>");
            out.push_str(body);
            out.push_str("</div>");
        }
        out.push_str("</div>");
        out
    }
}

/// One scanned unit of raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A source line passed through unchanged (no trailing newline).
    Verbatim(&'a str),
    /// A matched callout, replacing one directive line plus absorbed body lines.
    Callout(CalloutBlock),
}

/// Tokenizer state. A block has no nesting, so two states suffice:
/// outside any block, or absorbing body lines for the block in progress.
enum State {
    Scanning,
    InBody {
        kind: CalloutKind,
        title: String,
        body: Vec<String>,
    },
}

/// Scan raw content into verbatim lines and callout blocks.
///
/// Matching is non-overlapping, left-to-right, and greedy on trailing
/// lines: a block absorbs every subsequent line until one that starts a
/// new directive (`[!` prefix, the new directive wins) or a pre-rendered
/// paragraph boundary (`<p>` prefix, case-insensitive). Lines are split on
/// `\n`; joining
/// the verbatim segments back with `\n` reproduces the input exactly.
pub fn scan(raw: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut state = State::Scanning;

    for line in raw.split('\n') {
        state = match state {
            State::Scanning => step_scanning(line, &mut segments),
            State::InBody { kind, title, mut body } => {
                if line.starts_with("[!") || starts_paragraph(line) {
                    segments.push(Segment::Callout(finish_block(kind, title, body)));
                    step_scanning(line, &mut segments)
                } else {
                    body.push(line.to_string());
                    State::InBody { kind, title, body }
                }
            }
        };
    }
    if let State::InBody { kind, title, body } = state {
        segments.push(Segment::Callout(finish_block(kind, title, body)));
    }
    segments
}

/// Pre-rendered paragraph open tag, case-insensitive like the rest of the
/// markup handling.
fn starts_paragraph(line: &str) -> bool {
    line.as_bytes()
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"<p>"))
}

fn step_scanning<'a>(line: &'a str, segments: &mut Vec<Segment<'a>>) -> State {
    parse_directive(line).map_or_else(
        || {
            segments.push(Segment::Verbatim(line));
            State::Scanning
        },
        |(kind, title)| State::InBody {
            kind,
            title: title.to_string(),
            body: Vec::new(),
        },
    )
}

fn finish_block(kind: CalloutKind, title: String, body: Vec<String>) -> CalloutBlock {
    let body = body.join("\n");
    let body = body.trim();
    CalloutBlock {
        kind,
        title,
        body: if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        },
    }
}

/// Try to read a directive from the start of a line.
///
/// The shape is `[!` + word token + `]` + non-empty title. A line that
/// fails any of these steps is not a directive and passes through as
/// literal text; there is no partial match.
fn parse_directive(line: &str) -> Option<(CalloutKind, &str)> {
    let rest = line.strip_prefix("[!")?;
    let token_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if token_len == 0 {
        return None;
    }
    let token = &rest[..token_len];
    let rest = rest[token_len..].strip_prefix(']')?;
    let title = rest.trim();
    if title.is_empty() {
        return None;
    }
    Some((CalloutKind::from_token(token), title))
}
