//! Generate HTML markup from resolved block content.
//!
//! Output is deterministic: identical resolved content always produces
//! byte-identical markup. Void elements are self-closed so the output is also
//! well-formed XML. Nesting uses 2-space indentation.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::content::*;
use crate::model::{Block, BlockMode, PageDocument};
use crate::style::{RenderInstructions, TRANSPARENT, resolve_style};

/// Stylesheet shared by every exported page. Consumes the `--pc-*` custom
/// properties emitted by layout blocks and the `pc-hide-*` classes.
pub const PAGE_STYLESHEET: &str = "\
.pc-page { margin: 0 auto; }
.pc-placeholder { min-height: 48px; border: 1px dashed #d1d5db; }
@media (min-width: 1024px) { .pc-hide-desktop { display: none !important; } }
@media (min-width: 768px) and (max-width: 1023px) {
  .pc-hide-tablet { display: none !important; }
  .pc-flex { flex-direction: var(--pc-direction-tablet) !important; gap: var(--pc-gap-tablet) !important; }
  .pc-smart-grid { grid-template-columns: var(--pc-columns-tablet) !important; gap: var(--pc-gap-tablet) !important; }
}
@media (max-width: 767px) {
  .pc-hide-mobile { display: none !important; }
  .pc-flex { flex-direction: var(--pc-direction-mobile) !important; gap: var(--pc-gap-mobile) !important; }
  .pc-smart-grid { grid-template-columns: var(--pc-columns-mobile) !important; gap: var(--pc-gap-mobile) !important; }
  .pc-grid-item { grid-column: auto !important; }
}
";

struct Writer {
    out: String,
    level: usize,
}

impl Writer {
    fn new(level: usize) -> Self {
        Self {
            out: String::with_capacity(512),
            level,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.level {
            self.out.push_str("  ");
        }
    }

    /// A complete line at the current depth.
    fn line(&mut self, text: &str) {
        self.indent();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(tag);
        self.level += 1;
    }

    fn close(&mut self, tag: &str) {
        self.level = self.level.saturating_sub(1);
        self.line(tag);
    }

    fn finish(self) -> String {
        self.out
    }
}

fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

fn class_list(base: &str, extra: &[String]) -> String {
    let mut classes = vec![base.to_string()];
    classes.extend(extra.iter().cloned());
    attr(&classes.join(" "))
}

fn link_attrs(url: &str, new_tab: bool) -> String {
    if new_tab {
        format!(
            " href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
            attr(url)
        )
    } else {
        format!(" href=\"{}\"", attr(url))
    }
}

/// Markup for one block's resolved content.
pub fn generate_block_markup(content: &ResolvedContent) -> String {
    let mut w = Writer::new(0);
    write_content(&mut w, content);
    w.finish()
}

/// Markup for a block as it currently renders: generated from content in
/// visual mode, the edited markup in code mode.
pub fn block_markup(block: &Block) -> String {
    match block.mode {
        BlockMode::Visual => generate_block_markup(&block.resolved()),
        BlockMode::Code => match &block.html_content {
            Some(html) => {
                let mut html = html.clone();
                if !html.ends_with('\n') {
                    html.push('\n');
                }
                html
            }
            None => placeholder_comment(block),
        },
    }
}

fn placeholder_comment(block: &Block) -> String {
    format!(
        "<!-- block {} ({}) has no markup -->\n",
        comment_safe(block.id.as_str()),
        block.kind()
    )
}

/// Collapse every run of `-` to a single one so the text cannot close or
/// nest an HTML comment.
fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Markup for a whole page: the shared stylesheet followed by every block in
/// document order inside a `<main>` element.
pub fn generate_page_markup(doc: &PageDocument) -> String {
    let mut w = Writer::new(0);
    w.open("<main class=\"pc-page\">");
    w.open("<style>");
    for line in PAGE_STYLESHEET.lines() {
        w.line(line);
    }
    w.close("</style>");
    for block in doc {
        for line in block_markup(block).lines() {
            w.line(line);
        }
    }
    w.close("</main>");
    w.finish()
}

fn write_content(w: &mut Writer, content: &ResolvedContent) {
    match content {
        ResolvedContent::Hero(p) => write_hero(w, p),
        ResolvedContent::Heading(p) => {
            let tag = format!("h{}", p.level);
            w.line(&format!(
                "<{tag} class=\"pc-heading\" style=\"text-align: {};\">{}</{tag}>",
                p.align.css(),
                text(&p.text),
            ));
        }
        ResolvedContent::Text(p) => write_text(w, p),
        ResolvedContent::Image(p) => write_image(w, p),
        ResolvedContent::Button(p) => {
            w.line(&format!(
                "<a class=\"pc-btn pc-btn-{}\"{}>{}</a>",
                p.variant.as_str(),
                link_attrs(&p.url, p.open_in_new_tab),
                text(&p.label)
            ));
        }
        ResolvedContent::Features(p) => write_features(w, p),
        ResolvedContent::Testimonial(p) => write_testimonial(w, p),
        ResolvedContent::Divider(p) => {
            w.line(&format!(
                "<hr class=\"pc-divider\" style=\"border: 0; border-top: {}px {} {};\" />",
                p.thickness,
                p.style.css(),
                attr(&p.color)
            ));
        }
        ResolvedContent::Spacer(p) => {
            w.line(&format!(
                "<div class=\"pc-spacer\" style=\"height: {}px;\"></div>",
                p.height
            ));
        }
        ResolvedContent::Form(p) => write_form(w, p),
        ResolvedContent::Container(p) => write_container(w, p),
        ResolvedContent::Grid(p) => write_grid(w, p),
        ResolvedContent::FlexContainer(p) => {
            let out = resolve_style(&p.style);
            write_layout_open(w, "pc-flex", &out);
            for i in 1..=p.item_count {
                w.line(&format!(
                    "<div class=\"pc-flex-item pc-placeholder\">Item {}</div>",
                    i
                ));
            }
            w.close("</div>");
        }
        ResolvedContent::SmartGrid(p) => write_smart_grid(w, p),
    }
}

fn write_hero(w: &mut Writer, p: &HeroProps) {
    w.open(&format!(
        "<section class=\"pc-hero\" style=\"text-align: {};\">",
        p.align.css()
    ));
    w.line(&format!("<h1>{}</h1>", text(&p.headline)));
    if !p.subtext.is_empty() {
        w.line(&format!("<p>{}</p>", text(&p.subtext)));
    }
    if !p.image_url.is_empty() {
        w.line(&format!(
            "<img class=\"pc-hero-image\" src=\"{}\" alt=\"\" />",
            attr(&p.image_url)
        ));
    }
    if !p.cta_text.is_empty() {
        w.line(&format!(
            "<a class=\"pc-btn pc-btn-primary\"{}>{}</a>",
            link_attrs(&p.cta_url, false),
            text(&p.cta_text)
        ));
    }
    w.close("</section>");
}

fn write_text(w: &mut Writer, p: &TextProps) {
    w.open(&format!(
        "<div class=\"pc-text\" style=\"text-align: {};\">",
        p.align.css()
    ));
    for paragraph in p.body.split("\n\n").filter(|s| !s.trim().is_empty()) {
        let lines: Vec<String> = paragraph.lines().map(text).collect();
        w.line(&format!("<p>{}</p>", lines.join("<br />")));
    }
    w.close("</div>");
}

fn write_image(w: &mut Writer, p: &ImageProps) {
    w.open(&format!(
        "<figure class=\"pc-image\" style=\"width: {}%;\">",
        p.width_percent
    ));
    if p.src.is_empty() {
        w.line(&format!(
            "<div class=\"pc-image-placeholder\">{}</div>",
            text(&p.alt)
        ));
    } else {
        w.line(&format!(
            "<img src=\"{}\" alt=\"{}\" />",
            attr(&p.src),
            attr(&p.alt)
        ));
    }
    if !p.caption.is_empty() {
        w.line(&format!("<figcaption>{}</figcaption>", text(&p.caption)));
    }
    w.close("</figure>");
}

fn write_features(w: &mut Writer, p: &FeaturesProps) {
    w.open("<section class=\"pc-features\">");
    w.line(&format!("<h2>{}</h2>", text(&p.title)));
    w.open(&format!(
        "<div class=\"pc-features-grid\" style=\"display: grid; grid-template-columns: repeat({}, minmax(0, 1fr));\">",
        p.columns
    ));
    for item in &p.items {
        w.open(&format!(
            "<div class=\"pc-feature\" data-icon=\"{}\">",
            attr(&item.icon)
        ));
        w.line(&format!("<h3>{}</h3>", text(&item.title)));
        if !item.description.is_empty() {
            w.line(&format!("<p>{}</p>", text(&item.description)));
        }
        w.close("</div>");
    }
    w.close("</div>");
    w.close("</section>");
}

fn write_testimonial(w: &mut Writer, p: &TestimonialProps) {
    w.open("<blockquote class=\"pc-testimonial\">");
    w.line(&format!("<p>{}</p>", text(&p.quote)));
    w.open("<footer>");
    if !p.avatar_url.is_empty() {
        w.line(&format!(
            "<img class=\"pc-avatar\" src=\"{}\" alt=\"{}\" />",
            attr(&p.avatar_url),
            attr(&p.author)
        ));
    }
    w.line(&format!("<cite>{}</cite>", text(&p.author)));
    if !p.role.is_empty() {
        w.line(&format!("<span class=\"pc-role\">{}</span>", text(&p.role)));
    }
    w.close("</footer>");
    w.close("</blockquote>");
}

fn write_form(w: &mut Writer, p: &FormProps) {
    w.open("<form class=\"pc-form\">");
    if !p.title.is_empty() {
        w.line(&format!("<h3>{}</h3>", text(&p.title)));
    }
    for field in &p.fields {
        let required = if field.required {
            " required=\"required\""
        } else {
            ""
        };
        w.open("<label>");
        w.line(&format!("<span>{}</span>", text(&field.label)));
        match field.input {
            FieldInput::Textarea => w.line(&format!(
                "<textarea name=\"{}\"{}></textarea>",
                attr(&field.name),
                required
            )),
            input => w.line(&format!(
                "<input type=\"{}\" name=\"{}\"{} />",
                input.as_str(),
                attr(&field.name),
                required
            )),
        }
        w.close("</label>");
    }
    w.line(&format!(
        "<button type=\"submit\">{}</button>",
        text(&p.submit_label)
    ));
    w.close("</form>");
}

fn write_container(w: &mut Writer, p: &ContainerProps) {
    let mut style = format!("padding: {}px;", p.padding);
    if let Some(max) = p.max_width.pixels() {
        style.push_str(&format!(" max-width: {}px; margin: 0 auto;", max));
    }
    if !p.background_color.eq_ignore_ascii_case(TRANSPARENT) {
        style.push_str(&format!(" background-color: {};", p.background_color));
    }
    w.open(&format!(
        "<div class=\"pc-container\" style=\"{}\">",
        attr(&style)
    ));
    w.line("<div class=\"pc-placeholder\">Container</div>");
    w.close("</div>");
}

fn write_grid(w: &mut Writer, p: &GridProps) {
    w.open(&format!(
        "<div class=\"pc-grid\" style=\"display: grid; grid-template-columns: repeat({}, minmax(0, 1fr)); gap: {}px;\">",
        p.columns, p.gap
    ));
    for i in 1..=p.columns * p.rows {
        w.line(&format!("<div class=\"pc-placeholder\">Cell {}</div>", i));
    }
    w.close("</div>");
}

fn write_layout_open(w: &mut Writer, base_class: &str, out: &RenderInstructions) {
    w.open(&format!(
        "<div class=\"{}\" style=\"{}\">",
        class_list(base_class, &out.visibility_classes()),
        attr(&out.css_text())
    ));
}

fn write_smart_grid(w: &mut Writer, p: &SmartGridProps) {
    let out = resolve_style(&p.style);
    write_layout_open(w, "pc-smart-grid", &out);
    for (i, span) in p.spans.iter().enumerate() {
        w.line(&format!(
            "<div class=\"pc-grid-item pc-placeholder\" style=\"grid-column: span {};\">Item {}</div>",
            span,
            i + 1
        ));
    }
    w.close("</div>");
}
