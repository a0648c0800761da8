use pagecraft::content::{BlockContent, FormContent, FormField, FieldInput, HeroContent, ResolvedContent};
use pagecraft::generator::{PAGE_STYLESHEET, block_markup, generate_block_markup, generate_page_markup};
use pagecraft::ModelError;
use pagecraft::model::{Block, BlockKind, BlockMode, PageDocument};

fn assert_well_formed(markup: &str) -> roxmltree::Document<'_> {
    match roxmltree::Document::parse(markup) {
        Ok(doc) => doc,
        Err(e) => panic!("markup is not well-formed: {e}\n{markup}"),
    }
}

#[test]
fn every_kind_renders_well_formed_markup() {
    for kind in BlockKind::ALL {
        let markup = generate_block_markup(&ResolvedContent::defaults_for(kind));
        let doc = assert_well_formed(&markup);
        let class = doc.root_element().attribute("class").unwrap_or_default();
        assert!(class.starts_with("pc-"), "{kind}: {class}");
    }
}

#[test]
fn hostile_text_is_escaped() {
    let content = BlockContent::Hero(HeroContent {
        headline: Some("<script>alert('x')</script> & more".to_string()),
        cta_url: Some("/go?a=1&b=\"2\"".to_string()),
        ..Default::default()
    });
    let markup = generate_block_markup(&content.resolve());
    let doc = assert_well_formed(&markup);
    let h1 = doc
        .descendants()
        .find(|n| n.has_tag_name("h1"))
        .unwrap();
    assert_eq!(h1.text(), Some("<script>alert('x')</script> & more"));
    let link = doc.descendants().find(|n| n.has_tag_name("a")).unwrap();
    assert_eq!(link.attribute("href"), Some("/go?a=1&b=\"2\""));
}

#[test]
fn form_fields_render_inputs() {
    let content = BlockContent::Form(FormContent {
        fields: Some(vec![
            FormField {
                name: "email".to_string(),
                label: "Email".to_string(),
                input: FieldInput::Email,
                required: true,
            },
            FormField {
                name: "note".to_string(),
                label: "Note".to_string(),
                input: FieldInput::Textarea,
                required: false,
            },
        ]),
        ..Default::default()
    });
    let markup = generate_block_markup(&content.resolve());
    let doc = assert_well_formed(&markup);
    let input = doc.descendants().find(|n| n.has_tag_name("input")).unwrap();
    assert_eq!(input.attribute("type"), Some("email"));
    assert_eq!(input.attribute("required"), Some("required"));
    let textarea = doc.descendants().find(|n| n.has_tag_name("textarea")).unwrap();
    assert_eq!(textarea.attribute("name"), Some("note"));
    assert!(textarea.attribute("required").is_none());
}

#[test]
fn page_markup_wraps_blocks_in_order() {
    let mut code_block = Block::new(BlockKind::Text);
    code_block.switch_to_code(chrono::Utc::now());
    code_block.edit_code("<p class=\"custom\">Hand written</p>", chrono::Utc::now(), 20);
    let mut broken = Block::new(BlockKind::Divider);
    broken.mode = BlockMode::Code;

    assert!(block_markup(&broken).starts_with("<!--"));
    assert!(matches!(
        PageDocument::from_blocks(vec![broken]),
        Err(ModelError::IncompleteCodeBlock(_))
    ));

    let doc = PageDocument::from_blocks(vec![
        Block::new(BlockKind::Heading),
        code_block,
        Block::new(BlockKind::FlexContainer),
    ])
    .unwrap();
    let markup = generate_page_markup(&doc);
    let parsed = assert_well_formed(&markup);
    let main = parsed.root_element();
    assert_eq!(main.tag_name().name(), "main");
    assert_eq!(main.attribute("class"), Some("pc-page"));

    let children: Vec<_> = main.children().filter(|n| n.is_element()).collect();
    let names: Vec<&str> = children.iter().map(|n| n.tag_name().name()).collect();
    assert_eq!(names, vec!["style", "h2", "p", "div"]);
    assert_eq!(children[2].attribute("class"), Some("custom"));
    assert!(!PAGE_STYLESHEET.contains('<'));
}

#[test]
fn identical_content_renders_identically() {
    let a = Block::new(BlockKind::SmartGrid);
    let b = Block::with_content(a.content.clone());
    assert_eq!(
        generate_block_markup(&a.resolved()),
        generate_block_markup(&b.resolved())
    );
}
