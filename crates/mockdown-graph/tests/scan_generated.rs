//! Generated batches, written to disk and scanned back, validate cleanly.

use mockdown_content::Vocabulary;
use mockdown_content::frontmatter::parse_date;
use mockdown_core::rng::seeded;
use mockdown_gen::{BatchRunner, FsSink, IndexOptions, NoteOptions, PostOptions};
use mockdown_graph::{LinkGraph, compute_stats, validate_links};

fn runner() -> BatchRunner {
    BatchRunner::new(
        Vocabulary::builtin().unwrap(),
        parse_date("2025-06-01T12:00:00+0000").unwrap(),
    )
}

#[tokio::test]
async fn scanned_posts_match_the_report() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut sink = FsSink::create(temp.path().join("posts")).unwrap();
    let mut rng = seeded(Some(21));
    let report = runner()
        .posts(25, &PostOptions::default(), &mut rng, &mut sink)
        .unwrap();

    let scanned = LinkGraph::scan_dir(sink.dir()).await.unwrap();
    let reported = LinkGraph::from_report(&report);

    assert_eq!(scanned.document_count(), 25);
    let (a, b) = (compute_stats(&scanned), compute_stats(&reported));
    assert_eq!(a.links, b.links);
    assert_eq!(a.unique_links, b.unique_links);
    assert_eq!(a.orphans, b.orphans);
    assert_eq!(a.max_in_degree, b.max_in_degree);

    let result = validate_links(&scanned);
    assert!(result.valid, "{:?}", result.errors);
}

#[tokio::test]
async fn scanned_notes_validate() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut sink = FsSink::create(temp.path().join("zettelkasten")).unwrap();
    let mut rng = seeded(Some(22));
    let report = runner()
        .notes(
            20,
            &NoteOptions::default(),
            Some(&IndexOptions::default()),
            &mut rng,
            &mut sink,
        )
        .unwrap();

    let graph = LinkGraph::scan_dir(sink.dir()).await.unwrap();
    assert_eq!(graph.document_count(), report.generated.len());
    assert!(graph.dangling().is_empty());
    assert!(validate_links(&graph).valid);
    // Nothing links to the index.
    assert_eq!(graph.in_degree("zettelkasten-index"), 0);
}

#[tokio::test]
async fn removing_a_file_leaves_dangling_links() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut sink = FsSink::create(temp.path()).unwrap();
    let mut rng = seeded(Some(23));
    let report = runner()
        .posts(10, &PostOptions::default(), &mut rng, &mut sink)
        .unwrap();

    let target = &report.links[0].target;
    std::fs::remove_file(sink.path_for(target)).unwrap();

    let result = validate_links(&LinkGraph::scan_dir(temp.path()).await.unwrap());
    assert!(!result.valid);
    assert!(result.find("DANGLING_LINKS").is_some());
}
