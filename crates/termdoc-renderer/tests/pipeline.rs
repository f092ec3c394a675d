//! End-to-end tests of the transcript pipeline.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use termdoc_renderer::termynal::{BoxOptions, TranscriptLine, validate_containment};
use termdoc_renderer::tree::{AnimatedBox, StaticBox};
use termdoc_renderer::{
    Document, Error, InvariantError, Node, Page, ResourceError, SchemaError, TermConfig,
    TermPipeline, html,
};

fn pipeline() -> TermPipeline {
    TermPipeline::new(TermConfig::new("/nonexistent"))
}

/// Run every document hook, returning the resolved tree.
fn build(pipeline: &mut TermPipeline, docname: &str, source: &str) -> Document {
    let mut doc = pipeline.parse_document(docname, source).unwrap();
    pipeline.on_document_parsed(&doc).unwrap();
    pipeline.on_document_resolved(&mut doc).unwrap();
    doc
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_missing_prefix_produces_no_node() {
    let mut pipeline = pipeline();

    for source in [
        ":::cssterm[demo]\n$ ls\n:::\n",
        ":::cssterm[termynal:demo]\n$ ls\n:::\n",
        ":::termynal[cssterm:demo]\n- ls\n:::\n",
    ] {
        let err = pipeline.parse_document("index", source).unwrap_err();
        assert!(
            matches!(err, Error::Schema(SchemaError::MissingPrefix { .. })),
            "{source}: {err:?}"
        );
    }
    assert!(pipeline.context().labels.anonymous("cssterm:demo").is_none());
}

#[test]
fn test_forbidden_extension() {
    let mut pipeline = pipeline();

    let err = pipeline
        .parse_document("index", "::cssterm[cssterm:demo.log]\n")
        .unwrap_err();
    assert!(matches!(err, Error::Schema(SchemaError::ForbiddenExtension { .. })));

    let err = pipeline
        .parse_document("index", "::termynal[termynal:demo.yml]\n")
        .unwrap_err();
    assert!(matches!(err, Error::Schema(SchemaError::ForbiddenExtension { .. })));
}

#[test]
fn test_static_box_round_trip() {
    let mut pipeline = pipeline();
    let doc = build(&mut pipeline, "index", ":::cssterm[cssterm:demo]\n$ ls\nfile.txt\n\n:::\n");

    let [Node::StaticBox(static_box)] = doc.children.as_slice() else {
        panic!("expected a single static box, got {:?}", doc.children);
    };
    assert_eq!(static_box.raw, "$ ls\nfile.txt");
    assert_eq!(static_box.display, "$ ls\nfile.txt");
    assert_eq!(doc.children[0].astext(), "$ ls\nfile.txt");
}

#[test]
fn test_file_backed_static_box_reads_build_root_relative_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    let config = TermConfig::new(root).with_cssterm_dir("/docs");
    fs::create_dir(root.join("docs")).unwrap();

    let mut pipeline = TermPipeline::new(config.clone());
    let err = pipeline
        .parse_document("index", "::cssterm[cssterm:demo]\n")
        .unwrap_err();
    let expected = root.join("docs").join("demo.log");
    assert!(matches!(
        &err,
        Error::Resource(ResourceError::MissingFile { path }) if *path == expected
    ));

    write(&expected, "$ whoami\nroot\n");
    let mut pipeline = TermPipeline::new(config);
    let doc = build(&mut pipeline, "index", "::cssterm[cssterm:demo]\n");
    assert_eq!(doc.children[0].astext(), "$ whoami\nroot");
    assert_eq!(
        pipeline.context().dependencies.dependents_of(&expected),
        vec!["index"]
    );
}

#[test]
fn test_missing_directory_setting() {
    let mut pipeline = pipeline();
    let err = pipeline
        .parse_document("index", "::termynal[termynal:demo]\n")
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(
        err.to_string(),
        "The termynal.dir setting must be set when loading termynal box content from a file."
    );
}

#[test]
fn test_animated_lines_normalized() {
    let mut pipeline = pipeline();
    let source = ":::termynal[termynal:demo]\n- value: \"hi\"\n  type: input\n- null\n- just text\n:::\n";
    let doc = build(&mut pipeline, "index", source);

    let Node::AnimatedBox(animated) = &doc.children[0] else {
        panic!("expected animated box");
    };
    let lines: Vec<(&str, &str)> = animated
        .children
        .iter()
        .map(|node| match node {
            Node::AnimatedLine(line) => (line.value.as_str(), line.kind.as_str()),
            other => panic!("unexpected child {other:?}"),
        })
        .collect();
    assert_eq!(lines, vec![("hi", "input"), ("", ""), ("just text", "")]);
}

#[test]
fn test_invalid_line_key() {
    let mut pipeline = pipeline();
    let err = pipeline
        .parse_document("index", ":::termynal[termynal:demo]\n- value: hi\n  bogus: yes\n:::\n")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"The following termynal line keys are invalid: {"bogus"}."#
    );
}

#[test]
fn test_progress_percent() {
    let mut pipeline = pipeline();
    let ok = ":::termynal[termynal:demo]\n- type: progress\n  progressPercent: 0\n:::\n";
    assert!(pipeline.parse_document("index", ok).is_ok());

    let bad = ":::termynal[termynal:demo]\n- type: progress\n  progressPercent: -1\n:::\n";
    let err = pipeline.parse_document("index", bad).unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(SchemaError::InvalidLineField {
            field: "progressPercent",
            ..
        })
    ));
}

#[test]
fn test_start_delay() {
    let mut pipeline = pipeline();
    let err = pipeline
        .parse_document("index", ":::termynal[termynal:demo]{startDelay=\"12.5\"}\n- ls\n:::\n")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(SchemaError::InvalidOption {
            option: "startDelay",
            ..
        })
    ));

    let doc = build(
        &mut pipeline,
        "index",
        ":::termynal[termynal:demo]{startDelay=\"1500\"}\n- ls\n:::\n",
    );
    let Node::AnimatedBox(animated) = &doc.children[0] else {
        panic!("expected animated box");
    };
    assert_eq!(
        animated.options.attributes().collect::<Vec<_>>(),
        vec![("data-ty-startdelay".to_owned(), "1500")]
    );
}

#[test]
fn test_asset_registration_idempotent() {
    let mut pipeline = pipeline();
    let source = ":::cssterm[cssterm:a]\n$ ls\n:::\n\n:::termynal[termynal:b]\n- ls\n:::\n";
    let doc = build(&mut pipeline, "index", source);
    let mut page = Page::new("index", Some(doc));

    assert!(pipeline.on_page_rendered(&mut page) > 0);
    let css = pipeline.context().assets.css_files().to_vec();
    let js = pipeline.context().assets.js_files().to_vec();

    assert_eq!(pipeline.on_page_rendered(&mut page), 0);
    assert_eq!(pipeline.context().assets.css_files(), css);
    assert_eq!(pipeline.context().assets.js_files(), js);
}

#[test]
fn test_activation_script_per_page() {
    let mut pipeline = pipeline();

    let plain = build(&mut pipeline, "plain", "# No boxes\n\n:::cssterm[cssterm:x]\n$ ls\n:::\n");
    assert!(!plain.children.iter().any(|n| matches!(n, Node::Raw(_))));

    let source = ":::termynal[termynal:first]\n- ls\n:::\n\ntext\n\n:::termynal[termynal:second]\n- pwd\n:::\n";
    let doc = build(&mut pipeline, "guide/two", source);
    let scripts: Vec<&String> = doc
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Raw(html) => Some(html),
            _ => None,
        })
        .collect();
    assert_eq!(
        scripts,
        vec![
            "<script src=\"../_static/termynal.js\" data-termynal-container=\"#termynal-first-box|#termynal-second-box\"></script>\n"
        ]
    );
    assert_eq!(pipeline.context().activated, vec!["guide/two"]);
}

#[test]
fn test_orphan_line_rejected() {
    let mut doc = Document::new("index");
    doc.push(Node::Section {
        ids: vec!["intro".to_owned()],
        children: vec![Node::AnimatedLine(TranscriptLine::text("$ ls"))],
    });

    assert!(matches!(
        validate_containment(&doc),
        Err(InvariantError::OrphanLine { .. })
    ));

    let mut pipeline = pipeline();
    let err = pipeline.on_document_resolved(&mut doc).unwrap_err();
    assert!(matches!(err, Error::Internal(InvariantError::OrphanLine { .. })));
}

#[test]
fn test_unlinked_manual_tree_fails_registration() {
    let mut doc = Document::new("index");
    doc.push(Node::StaticBox(StaticBox::new(
        "cssterm-demo-box".to_owned(),
        "cssterm:demo".to_owned(),
        "$ ls".to_owned(),
    )));

    let mut pipeline = pipeline();
    let err = pipeline.on_document_parsed(&doc).unwrap_err();
    assert!(matches!(
        err,
        Error::Internal(InvariantError::MissingAnonymousLabel { .. })
    ));
}

#[test]
fn test_labels_registered() {
    let mut pipeline = pipeline();
    build(
        &mut pipeline,
        "guide/setup",
        ":::cssterm[cssterm:demo]\n$ ls\n:::\n\n:::termynal[termynal:demo]\n- ls\n:::\n",
    );

    let labels = &pipeline.context().labels;
    let css = labels.get("cssterm:demo").unwrap();
    assert_eq!((css.docname.as_str(), css.id.as_str()), ("guide/setup", "cssterm-demo-box"));
    assert_eq!(css.title, "terminal box");
    let ty = labels.get("termynal:demo").unwrap();
    assert_eq!(ty.id, "termynal-demo-box");
}

#[test]
fn test_duplicate_identifier_gets_unique_id() {
    let mut pipeline = pipeline();
    let doc = build(
        &mut pipeline,
        "index",
        ":::termynal[termynal:demo]\n- a\n:::\n\n:::termynal[termynal:demo]\n- b\n:::\n",
    );

    let ids: Vec<&str> = doc
        .boxes(termdoc_renderer::TranscriptFormat::Termynal)
        .into_iter()
        .flat_map(|n| n.ids().iter().map(String::as_str))
        .collect();
    assert_eq!(ids, vec!["termynal-demo-box", "termynal-demo-box-1"]);
    assert_eq!(
        pipeline.context().labels.get("termynal:demo").unwrap().id,
        "termynal-demo-box"
    );
}

#[test]
fn test_rendered_page() {
    let temp_dir = tempfile::tempdir().unwrap();
    let root = temp_dir.path();
    write(
        &root.join("transcripts/install.yml"),
        "- value: pip install termdoc\n  type: input\n  prompt: $\n- type: progress\n- Done\n",
    );
    let config = TermConfig::new(root).with_termynal_dir("transcripts");
    let mut pipeline = TermPipeline::new(config);

    let doc = build(
        &mut pipeline,
        "index",
        "# Install\n\n::termynal[termynal:install]{lineDelay=500}\n",
    );
    let mut page = Page::new("index", Some(doc));
    pipeline.on_page_rendered(&mut page);
    let out = html::render_page(&page);

    assert!(out.contains("<h1>Install</h1>"));
    assert!(out.contains(
        "<div id=\"termynal-install-box\" data-termynal=\"\" data-ty-linedelay=\"500\">"
    ));
    assert!(out.contains("<span data-ty=\"input\" data-ty-prompt=\"$\">pip install termdoc</span>"));
    assert!(out.contains("<span data-ty=\"progress\"></span>"));
    assert!(out.contains("<link rel=\"stylesheet\" href=\"_static/termynal.css\">"));
    assert!(out.contains("data-termynal-container=\"#termynal-install-box\""));
    assert!(!out.contains("<script src=\"_static/termynal.js\"></script>"));
}

#[test]
fn test_pages_link_only_their_own_assets() {
    let mut pipeline = pipeline();
    let mut pages: Vec<Page> = [
        ("animated", ":::termynal[termynal:a]\n- ls\n:::\n"),
        ("plain", "# Plain\n\nNo boxes here.\n"),
        ("static", ":::cssterm[cssterm:c]\n$ ls\n:::\n"),
    ]
    .into_iter()
    .map(|(docname, source)| Page::new(docname, Some(build(&mut pipeline, docname, source))))
    .collect();
    for page in &mut pages {
        pipeline.on_page_rendered(page);
    }

    let animated = html::render_page(&pages[0]);
    assert!(animated.contains("termynal.css"));
    assert!(!animated.contains("cssterm.css"));

    let plain = html::render_page(&pages[1]);
    assert!(!plain.contains("<link"));
    assert!(!plain.contains("<script"));

    let static_page = html::render_page(&pages[2]);
    assert!(static_page.contains("<link rel=\"stylesheet\" href=\"_static/cssterm.css\">"));
    assert!(!static_page.contains("termynal.css"));
    assert!(!static_page.contains("fonts.googleapis.com"));
}

#[test]
fn test_manual_animated_box_renders() {
    let mut doc = Document::new("index");
    doc.push(Node::AnimatedBox(AnimatedBox {
        ids: vec!["termynal-x-box".to_owned()],
        names: vec!["termynal:x".to_owned()],
        options: BoxOptions::default(),
        children: vec![Node::AnimatedLine(TranscriptLine::text("ok"))],
    }));
    assert!(validate_containment(&doc).is_ok());
    assert_eq!(
        html::render_document(&doc),
        "<div id=\"termynal-x-box\" data-termynal=\"\">\n<span data-ty=\"\">ok</span>\n</div>\n"
    );
}
