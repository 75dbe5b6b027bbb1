//! Rendering and reading back generated content.

use std::path::Path;

use mockdown_content::frontmatter::parse_date;
use mockdown_content::{
    Document, FrontMatter, LinkIndex, NoteMeta, Vocabulary, convert_wikilinks, link_targets,
    parse_front_matter, wikilink,
};

#[test]
fn shipped_placeholder_dir_matches_builtin() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("placeholders");
    let loaded = Vocabulary::load(&dir).unwrap();
    assert_eq!(loaded, Vocabulary::builtin().unwrap());
}

#[test]
fn rendered_links_are_recoverable_and_convertible() {
    let body = format!(
        "Opening paragraph.\n\nSee also: {}\n\n## Related\n\n- {}\n",
        wikilink("ZETTEL-0002"),
        wikilink("ZETTEL-0003")
    );
    let doc = Document::new(
        "ZETTEL-0001",
        FrontMatter::Note(NoteMeta {
            id: "ZETTEL-0001".into(),
            title: "Linking".into(),
            date: parse_date("2024-01-01T00:00:00+0000").unwrap(),
            tags: vec!["links".into()],
        }),
        body,
        vec!["ZETTEL-0002".into(), "ZETTEL-0003".into()],
    );

    let rendered = doc.render().unwrap();
    let (fm, body) = parse_front_matter(&rendered).unwrap();
    assert_eq!(fm.unwrap()["id"].as_str(), Some("ZETTEL-0001"));
    assert_eq!(link_targets(body), doc.links);

    let mut index = LinkIndex::new();
    index.insert(Path::new("ZETTEL-0002.md"));
    let converted = convert_wikilinks(body, &index);
    assert!(converted.content.contains("[ZETTEL-0002](/ZETTEL-0002)"));
    assert_eq!(converted.broken, vec!["ZETTEL-0003"]);
}
