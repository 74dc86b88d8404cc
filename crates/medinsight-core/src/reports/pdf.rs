//! Paginated A4 PDF output for exported documents.
//!
//! Layout is a single column of wrapped lines set in the base-14 Helvetica
//! faces, so no font files are embedded. Text is encoded as WinAnsi; glyphs
//! outside that set are dropped.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::AppResult;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Heading,
    Body,
    Note,
}

impl Style {
    const fn font(self) -> &'static str {
        match self {
            Self::Title | Self::Heading => "F2",
            Self::Body => "F1",
            Self::Note => "F3",
        }
    }

    const fn size(self) -> i64 {
        match self {
            Self::Title => 20,
            Self::Heading => 13,
            Self::Body => 10,
            Self::Note => 9,
        }
    }

    const fn leading(self) -> i64 {
        self.size() + self.size() / 2
    }

    /// Characters per line, assuming an average glyph of 0.55 em.
    const fn wrap_width(self) -> usize {
        ((PAGE_WIDTH - 2 * MARGIN) * 20 / (self.size() * 11)) as usize
    }
}

/// Collects styled lines and lays them out on as many pages as needed.
#[derive(Debug, Default)]
pub(crate) struct PdfBuilder {
    lines: Vec<(Style, String)>,
}

impl PdfBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn title(&mut self, text: &str) -> &mut Self {
        self.push_wrapped(Style::Title, text)
    }

    pub(crate) fn heading(&mut self, text: &str) -> &mut Self {
        self.spacer();
        self.push_wrapped(Style::Heading, text)
    }

    /// One block of text; each source line is wrapped on its own.
    pub(crate) fn paragraph(&mut self, text: &str) -> &mut Self {
        for line in text.lines().map(clean_markup).filter(|l| !l.trim().is_empty()) {
            self.push_wrapped(Style::Body, &line);
        }
        self.spacer()
    }

    pub(crate) fn field(&mut self, label: &str, value: &str) -> &mut Self {
        self.push_wrapped(Style::Body, &format!("{}: {}", label, value))
    }

    pub(crate) fn note(&mut self, text: &str) -> &mut Self {
        self.push_wrapped(Style::Note, text)
    }

    pub(crate) fn spacer(&mut self) -> &mut Self {
        if self.lines.last().is_some_and(|(_, text)| !text.is_empty()) {
            self.lines.push((Style::Body, String::new()));
        }
        self
    }

    fn push_wrapped(&mut self, style: Style, text: &str) -> &mut Self {
        for line in wrap(text, style.wrap_width()) {
            self.lines.push((style, line));
        }
        self
    }

    /// Serialize the document. Always produces at least one page.
    pub(crate) fn finish(&self) -> AppResult<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular = doc.add_object(font("Helvetica"));
        let bold = doc.add_object(font("Helvetica-Bold"));
        let italic = doc.add_object(font("Helvetica-Oblique"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular,
                "F2" => bold,
                "F3" => italic,
            },
        });

        let mut kids = Vec::new();
        for operations in self.paginate() {
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        set_catalog(&mut doc, pages_id);

        let mut out = Vec::new();
        doc.save_to(&mut out)?;
        Ok(out)
    }

    fn paginate(&self) -> Vec<Vec<Operation>> {
        let mut pages = vec![Vec::new()];
        let mut y = PAGE_HEIGHT - MARGIN;

        for (style, text) in &self.lines {
            if y - style.leading() < MARGIN {
                pages.push(Vec::new());
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= style.leading();
            if text.is_empty() {
                continue;
            }
            if let Some(page) = pages.last_mut() {
                page.extend(show_line(*style, y, text));
            }
        }
        pages
    }
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn set_catalog(doc: &mut Document, pages_id: ObjectId) {
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
}

fn show_line(style: Style, y: i64, text: &str) -> Vec<Operation> {
    let font = Object::Name(style.font().as_bytes().to_vec());
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font, Object::Integer(style.size())]),
        Operation::new("Td", vec![Object::Integer(MARGIN), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

/// Drop markdown emphasis and heading markers the model tends to emit.
fn clean_markup(line: &str) -> String {
    line.replace("**", "").trim_start_matches('#').trim_start().to_string()
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed =
            if current.is_empty() { word.len() } else { current.chars().count() + 1 + word.len() };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode for WinAnsiEncoding. Typographic punctuation maps to ASCII.
fn win_ansi(text: &str) -> Vec<u8> {
    text.replace('\u{20B9}', "Rs ")
        .chars()
        .filter_map(|c| match c {
            '\u{2018}' | '\u{2019}' => Some(b'\''),
            '\u{201C}' | '\u{201D}' => Some(b'"'),
            '\u{2013}' | '\u{2014}' => Some(b'-'),
            '\u{2022}' => Some(b'*'),
            c if c.is_ascii() && !c.is_ascii_control() => Some(c as u8),
            c if ('\u{A0}'..='\u{FF}').contains(&c) => Some(c as u8),
            _ => None,
        })
        .collect()
}
