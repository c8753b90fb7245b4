use crate::render::tree::{Item, PreviewTree, SectionBody};

/// Scale at which a preview is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Editor panel: scaled down to fit beside the form.
    Inline,
    /// Print / export.
    Full,
}

impl Scale {
    fn factor(self) -> f32 {
        match self {
            Scale::Inline => 0.9,
            Scale::Full => 1.0,
        }
    }
}

const PAGE_STYLE: &str = "\
body{margin:0;background:#fff;color:#111;font-family:Inter,Helvetica,Arial,sans-serif;font-size:11pt}\
.page{width:210mm;min-height:297mm;padding:18mm;box-sizing:border-box;transform-origin:top center}\
h1{margin:0;font-size:22pt}\
.headline{margin:2pt 0 6pt;color:#444}\
.contacts{color:#555;font-size:9.5pt}\
.contacts span+span:before{content:\" | \"}\
h2{margin:14pt 0 6pt;font-size:12pt;text-transform:uppercase;border-bottom:1px solid #ccc}\
.item{margin-bottom:8pt}\
.row{display:flex;justify-content:space-between}\
.subtitle{color:#444}\
.period{color:#666;font-size:9.5pt}\
.tags span{display:inline-block;margin:0 4pt 4pt 0;padding:1pt 6pt;background:#f1f1f1;border-radius:3pt}\
@media print{.page{transform:none!important}}";

/// Serializes the tree as a standalone HTML document titled `title`.
pub fn to_html(tree: &PreviewTree, title: &str, scale: Scale) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
        escape(title),
        PAGE_STYLE
    ));
    out.push_str(&format!(
        "<div class=\"page\" style=\"transform:scale({})\">",
        scale.factor()
    ));

    let header = &tree.header;
    out.push_str(&format!("<header><h1>{}</h1>", escape(&header.name)));
    out.push_str(&format!(
        "<p class=\"headline\">{}</p>",
        escape(&header.headline)
    ));
    out.push_str("<p class=\"contacts\">");
    for contact in &header.contacts {
        out.push_str(&format!("<span>{}</span>", escape(contact)));
    }
    out.push_str("</p></header>");

    for section in &tree.sections {
        out.push_str(&format!("<section><h2>{}</h2>", section.kind.title()));
        match &section.body {
            SectionBody::Entries { items } => {
                for item in items {
                    write_item(&mut out, item);
                }
            }
            SectionBody::Tags { tags } => write_tags(&mut out, tags),
        }
        out.push_str("</section>");
    }

    out.push_str("</div></body></html>");
    out
}

fn write_item(out: &mut String, item: &Item) {
    out.push_str(&format!(
        "<div class=\"item\"><div class=\"row\"><strong>{}</strong><span class=\"period\">{}</span></div>",
        escape(&item.title),
        escape(&item.period)
    ));
    if !item.subtitle.is_empty() {
        out.push_str(&format!(
            "<div class=\"subtitle\">{}</div>",
            escape(&item.subtitle)
        ));
    }
    for line in &item.lines {
        out.push_str(&format!("<p>{}</p>", escape(line)));
    }
    if !item.tags.is_empty() {
        write_tags(out, &item.tags);
    }
    out.push_str("</div>");
}

fn write_tags(out: &mut String, tags: &[String]) {
    out.push_str("<div class=\"tags\">");
    for tag in tags {
        out.push_str(&format!("<span>{}</span>", escape(tag)));
    }
    out.push_str("</div>");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
