//! Markdown element templates.
//!
//! Each element is a small, syntactically valid markdown fragment filled in
//! from the vocabulary. Generators decide which elements appear; this module
//! only knows how to render them.

use mockdown_core::rng::ChoiceSource;

use crate::vocabulary::Vocabulary;

/// Languages and the snippet each fenced code block shows.
pub const CODE_SNIPPETS: [(&str, &str); 5] = [
    ("python", "print('Hello World')"),
    ("bash", "echo Hello World"),
    ("javascript", "console.log('Hello World');"),
    (
        "go",
        "package main\nimport \"fmt\"\nfunc main() { fmt.Println(\"Hello World\") }",
    ),
    (
        "c",
        "#include <stdio.h>\nint main(){ printf(\"Hello World\"); return 0; }",
    ),
];

/// Destinations of inline external links.
pub const LINK_URLS: [&str; 5] = [
    "https://example.com",
    "https://wikipedia.org",
    "https://github.com",
    "https://python.org",
    "https://golang.org",
];

const IMAGE_QUERIES: [&str; 5] = ["nature", "tech", "city", "abstract", "people"];

/// Optional elements a post section may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Heading,
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    List,
    Image,
    Table,
    Blockquote,
    InlineLink,
}

impl Element {
    /// Every element with its default inclusion probability, in render order.
    pub const DEFAULT_MIX: [(Element, f64); 10] = [
        (Element::Heading, 0.5),
        (Element::Bold, 0.4),
        (Element::Italic, 0.3),
        (Element::InlineCode, 0.25),
        (Element::CodeBlock, 0.2),
        (Element::List, 0.3),
        (Element::Image, 0.25),
        (Element::Table, 0.15),
        (Element::Blockquote, 0.2),
        (Element::InlineLink, 0.25),
    ];

    /// Render one instance of this element.
    pub fn render<R: ChoiceSource>(self, vocab: &Vocabulary, rng: &mut R) -> String {
        match self {
            Self::Heading => heading(vocab, rng),
            Self::Bold => format!("**{}**", vocab.title_words.pick(rng)),
            Self::Italic => format!("*{}*", vocab.title_words.pick(rng)),
            Self::InlineCode => "`example_code()`".to_string(),
            Self::CodeBlock => code_block(rng),
            Self::List => bullet_list(vocab, rng),
            Self::Image => image(rng),
            Self::Table => table(vocab, rng),
            Self::Blockquote => blockquote(vocab, rng),
            Self::InlineLink => inline_link(vocab, rng),
        }
    }
}

/// `[[id]]`.
pub fn wikilink(id: &str) -> String {
    format!("[[{id}]]")
}

/// `lo..=hi` distinct lorem paragraphs joined into one block.
pub fn paragraphs<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R, lo: usize, hi: usize) -> String {
    vocab.paragraphs.sample(rng, lo, hi).join(" ")
}

/// Level 2 to 4 heading.
pub fn heading<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R) -> String {
    let level = rng.between(2, 4);
    format!("{} {}", "#".repeat(level), vocab.title_words.pick(rng))
}

/// Three to six bullet items.
pub fn bullet_list<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R) -> String {
    let n = rng.between(3, 6);
    (0..n)
        .map(|_| format!("- {}", vocab.title_words.pick(rng)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fenced block with a hello-world snippet.
pub fn code_block<R: ChoiceSource>(rng: &mut R) -> String {
    let (lang, code) = CODE_SNIPPETS[rng.below(CODE_SNIPPETS.len())];
    fenced(lang, code)
}

/// A fenced block in `lang`.
pub fn fenced(lang: &str, code: &str) -> String {
    format!("```{lang}\n{code}\n```")
}

/// Two-column table with three to five rows.
pub fn table<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R) -> String {
    let mut out = String::from("| Name | Value |\n|------|-------|");
    for _ in 0..rng.between(3, 5) {
        let name = vocab.title_words.pick(rng);
        let value = rng.between(1, 100);
        out.push_str(&format!("\n| {name} | {value} |"));
    }
    out
}

/// Placeholder image from placehold.co or unsplash.
pub fn image<R: ChoiceSource>(rng: &mut R) -> String {
    if rng.chance(0.5) {
        let w = rng.between(200, 600);
        let h = rng.between(200, 400);
        format!("![Placeholder](https://placehold.co/{w}x{h})")
    } else {
        let query = IMAGE_QUERIES[rng.below(IMAGE_QUERIES.len())];
        format!("![Unsplash](https://source.unsplash.com/random/400x300/?{query})")
    }
}

/// Quote of a paragraph, a tip, or a note.
pub fn blockquote<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R) -> String {
    let text = match rng.below(3) {
        0 => vocab.paragraphs.pick(rng).to_string(),
        1 => format!("Tip: {}", vocab.title_words.pick(rng)),
        _ => format!("Note: {}", vocab.descriptions.pick(rng)),
    };
    format!("> {text}")
}

/// External link with a title word as its text.
pub fn inline_link<R: ChoiceSource>(vocab: &Vocabulary, rng: &mut R) -> String {
    let text = vocab.title_words.pick(rng);
    let url = LINK_URLS[rng.below(LINK_URLS.len())];
    format!("[{text}]({url})")
}
