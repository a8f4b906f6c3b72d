//! Build the document tree from pulldown-cmark events.
//!
//! Block-level siblings are separated by `"\n"` text nodes the same way a
//! hast tree produced from mdast is: between top-level blocks, and around
//! the block children of containers such as `blockquote`, lists and tables.
//! Adjacent text events are merged, soft breaks become `"\n"` and hard
//! breaks become a `br` element followed by `"\n"`.

use inkmark_types::{Element, Node, PropertyValue, Root};
use pulldown_cmark::{Alignment, CodeBlockKind, Event, LinkType, Tag, TagEnd};
use std::collections::HashMap;

const BLOCK_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "ul", "ol", "li", "table",
    "thead", "tbody", "tr", "th", "td", "hr", "div", "dl", "dt", "dd",
];

fn is_block(tag_name: &str) -> bool {
    BLOCK_TAGS.contains(&tag_name)
}

enum FrameKind {
    Element,
    Image { src: String, title: String, alt: String, nested: usize },
    /// Content dropped entirely (metadata blocks).
    Ignored,
}

struct Frame {
    element: Element,
    kind: FrameKind,
    has_blocks: bool,
}

impl Frame {
    fn new(element: Element) -> Self {
        Self {
            element,
            kind: FrameKind::Element,
            has_blocks: false,
        }
    }
}

/// Event-driven tree builder.
pub struct TreeBuilder {
    stack: Vec<Frame>,
    alignments: Vec<Alignment>,
    cell_index: usize,
    in_table_head: bool,
    table_body_open: bool,
    in_html_block: bool,
    footnotes: HashMap<String, usize>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::new(Element::new("#root"))],
            alignments: Vec::new(),
            cell_index: 0,
            in_table_head: false,
            table_body_open: false,
            in_html_block: false,
            footnotes: HashMap::new(),
        }
    }

    /// Feed every event and return the finished tree.
    pub fn build<'a, I>(mut self, events: I) -> Root
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        for event in events {
            self.push_event(event);
        }
        self.finish()
    }

    pub fn push_event(&mut self, event: Event<'_>) {
        match self.stack.last().map(|frame| &frame.kind) {
            Some(FrameKind::Image { .. }) => return self.image_event(event),
            Some(FrameKind::Ignored) => {
                if let Event::End(TagEnd::MetadataBlock(_)) = event {
                    self.stack.pop();
                }
                return;
            }
            _ => {}
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.append(Node::Element(
                Element::new("code").with_children(vec![Node::text(code.to_string())]),
            )),
            Event::InlineMath(math) => self.append(Node::Element(
                Element::new("code")
                    .with_property("class", vec!["language-math".to_string(), "math-inline".to_string()])
                    .with_children(vec![Node::text(math.to_string())]),
            )),
            Event::DisplayMath(math) => {
                let code = Element::new("code")
                    .with_property("class", vec!["language-math".to_string(), "math-display".to_string()])
                    .with_children(vec![Node::text(math.to_string())]);
                self.append(Node::Element(Element::new("pre").with_children(vec![Node::Element(code)])));
            }
            Event::Html(html) => self.push_html_block(&html),
            Event::InlineHtml(html) => self.append(Node::raw(html.to_string())),
            Event::FootnoteReference(label) => {
                let number = self.footnote_number(&label);
                let link = Element::new("a")
                    .with_property("href", format!("#{label}"))
                    .with_children(vec![Node::text(number.to_string())]);
                self.append(Node::Element(
                    Element::new("sup")
                        .with_class("footnote-reference")
                        .with_children(vec![Node::Element(link)]),
                ));
            }
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => {
                self.append(Node::Element(Element::new("br")));
                self.push_text("\n");
            }
            Event::Rule => self.append(Node::Element(Element::new("hr"))),
            Event::TaskListMarker(checked) => self.task_marker(checked),
        }
    }

    pub fn finish(mut self) -> Root {
        while self.stack.len() > 1 {
            self.close();
        }
        let root = self.stack.pop().map(|f| f.element.children).unwrap_or_default();
        Root::new(root)
    }

    fn start(&mut self, tag: Tag<'_>) {
        let element = match tag {
            Tag::Paragraph => Element::new("p"),
            Tag::Heading {
                level,
                id,
                classes,
                attrs,
            } => {
                let mut el = Element::new(format!("h{}", level as usize));
                if let Some(id) = id {
                    el.properties.set("id", id.to_string());
                }
                if !classes.is_empty() {
                    let classes: Vec<String> = classes.iter().map(|c| c.to_string()).collect();
                    el.properties.set("class", classes);
                }
                for (name, value) in attrs {
                    let value = match value {
                        Some(v) => PropertyValue::String(v.to_string()),
                        None => PropertyValue::Bool(true),
                    };
                    el.properties.set(name.to_string(), value);
                }
                el
            }
            Tag::BlockQuote(_) => Element::new("blockquote"),
            Tag::CodeBlock(kind) => {
                let mut code = Element::new("code");
                if let CodeBlockKind::Fenced(info) = kind {
                    if let Some(lang) = info.split_whitespace().next() {
                        code.properties.set("class", vec![format!("language-{lang}")]);
                    }
                }
                self.open(Element::new("pre"));
                code
            }
            Tag::HtmlBlock => {
                self.in_html_block = true;
                return;
            }
            Tag::List(Some(start)) => {
                let mut ol = Element::new("ol");
                if start != 1 {
                    ol.properties.set("start", start.to_string());
                }
                ol
            }
            Tag::List(None) => Element::new("ul"),
            Tag::Item => Element::new("li"),
            Tag::FootnoteDefinition(label) => {
                let number = self.footnote_number(&label);
                self.open(
                    Element::new("div")
                        .with_class("footnote-definition")
                        .with_property("id", label.to_string()),
                );
                self.append(Node::Element(
                    Element::new("sup")
                        .with_class("footnote-definition-label")
                        .with_children(vec![Node::text(number.to_string())]),
                ));
                return;
            }
            Tag::DefinitionList => Element::new("dl"),
            Tag::DefinitionListTitle => Element::new("dt"),
            Tag::DefinitionListDefinition => Element::new("dd"),
            Tag::Table(alignments) => {
                self.alignments = alignments;
                self.table_body_open = false;
                Element::new("table")
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.cell_index = 0;
                self.open(Element::new("thead"));
                Element::new("tr")
            }
            Tag::TableRow => {
                if !self.table_body_open {
                    self.table_body_open = true;
                    self.open(Element::new("tbody"));
                }
                self.cell_index = 0;
                Element::new("tr")
            }
            Tag::TableCell => {
                let mut cell = Element::new(if self.in_table_head { "th" } else { "td" });
                let align = match self.alignments.get(self.cell_index) {
                    Some(Alignment::Left) => Some("left"),
                    Some(Alignment::Center) => Some("center"),
                    Some(Alignment::Right) => Some("right"),
                    _ => None,
                };
                if let Some(align) = align {
                    cell.properties.set("align", align);
                }
                self.cell_index += 1;
                cell
            }
            Tag::Emphasis => Element::new("em"),
            Tag::Strong => Element::new("strong"),
            Tag::Strikethrough => Element::new("del"),
            Tag::Superscript => Element::new("sup"),
            Tag::Subscript => Element::new("sub"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = match link_type {
                    LinkType::Email => format!("mailto:{dest_url}"),
                    _ => dest_url.to_string(),
                };
                let mut a = Element::new("a").with_property("href", href);
                if !title.is_empty() {
                    a.properties.set("title", title.to_string());
                }
                a
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.stack.push(Frame {
                    element: Element::new("img"),
                    kind: FrameKind::Image {
                        src: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                        nested: 0,
                    },
                    has_blocks: false,
                });
                return;
            }
            Tag::MetadataBlock(_) => {
                self.stack.push(Frame {
                    element: Element::new("#metadata"),
                    kind: FrameKind::Ignored,
                    has_blocks: false,
                });
                return;
            }
        };
        self.open(element);
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::HtmlBlock => self.in_html_block = false,
            TagEnd::CodeBlock => {
                self.close(); // code
                self.close(); // pre
            }
            TagEnd::FootnoteDefinition => self.close(),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.close(); // tr
                self.close(); // thead
            }
            TagEnd::Table => {
                if self.table_body_open {
                    self.table_body_open = false;
                    self.close(); // tbody
                }
                self.alignments.clear();
                self.close();
            }
            // Handled while the image frame is on top.
            TagEnd::Image | TagEnd::MetadataBlock(_) => {}
            _ => self.close(),
        }
    }

    fn open(&mut self, element: Element) {
        self.stack.push(Frame::new(element));
    }

    fn close(&mut self) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        if frame.has_blocks {
            push_text_into(&mut frame.element.children, "\n");
        }
        self.append(Node::Element(frame.element));
    }

    /// Events seen while an image is open only contribute to its alt text.
    fn image_event(&mut self, event: Event<'_>) {
        let Some(Frame {
            kind: FrameKind::Image { alt, nested, .. },
            ..
        }) = self.stack.last_mut()
        else {
            return;
        };
        let done = match event {
            Event::Text(text) | Event::Code(text) => {
                alt.push_str(&text);
                false
            }
            Event::SoftBreak | Event::HardBreak => {
                alt.push(' ');
                false
            }
            Event::Start(Tag::Image { .. }) => {
                *nested += 1;
                false
            }
            Event::End(TagEnd::Image) if *nested > 0 => {
                *nested -= 1;
                false
            }
            Event::End(TagEnd::Image) => true,
            _ => false,
        };
        if done {
            self.close_image();
        }
    }

    fn close_image(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if let FrameKind::Image { src, title, alt, .. } = frame.kind {
            let mut img = Element::new("img")
                .with_property("src", src)
                .with_property("alt", alt);
            if !title.is_empty() {
                img.properties.set("title", title);
            }
            self.append(Node::Element(img));
        }
    }

    fn append(&mut self, node: Node) {
        let is_root = self.stack.len() == 1;
        let Some(parent) = self.stack.last_mut() else {
            return;
        };
        let block = match &node {
            Node::Element(el) => is_block(&el.tag_name),
            Node::Raw(_) => self.in_html_block,
            Node::Text(_) => false,
        };

        if block {
            if is_root {
                if !parent.element.children.is_empty() {
                    push_text_into(&mut parent.element.children, "\n");
                }
            } else {
                push_text_into(&mut parent.element.children, "\n");
                parent.has_blocks = true;
            }
        }

        match node {
            Node::Text(text) => push_text_into(&mut parent.element.children, &text),
            other => parent.element.children.push(other),
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(parent) = self.stack.last_mut() {
            push_text_into(&mut parent.element.children, text);
        }
    }

    fn push_html_block(&mut self, html: &str) {
        if self.in_html_block {
            if let Some(Node::Raw(existing)) = self
                .stack
                .last_mut()
                .and_then(|parent| parent.element.children.last_mut())
            {
                existing.push_str(html);
                return;
            }
        }
        self.append(Node::raw(html.to_string()));
    }

    fn task_marker(&mut self, checked: bool) {
        if let Some(item) = self.stack.iter_mut().rev().find(|f| f.element.is("li")) {
            item.element.properties.set("class", vec!["task-list-item".to_string()]);
        }
        let input = Element::new("input")
            .with_property("type", "checkbox")
            .with_property("disabled", true)
            .with_property("checked", checked);
        self.append(Node::Element(input));
        self.push_text(" ");
    }

    fn footnote_number(&mut self, label: &str) -> usize {
        let next = self.footnotes.len() + 1;
        *self.footnotes.entry(label.to_string()).or_insert(next)
    }
}

fn push_text_into(children: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(existing)) = children.last_mut() {
        existing.push_str(text);
    } else {
        children.push(Node::text(text));
    }
}

/// Build a tree from a stream of events.
pub fn build_tree<'a, I>(events: I) -> Root
where
    I: IntoIterator<Item = Event<'a>>,
{
    TreeBuilder::new().build(events)
}
