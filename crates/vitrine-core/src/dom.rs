//! In-memory document model
//!
//! A small arena-backed element tree with just enough of the DOM surface for
//! the renderers: element creation, tree edits, classes, attributes, inline
//! styles, text content, id/class lookups and HTML serialization.
//!
//! Lookups (`get_element_by_id`, `query_by_class`) only see elements attached
//! under the document root, the same as a browser document.

const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "meta", "link", "input"];
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            classes: Vec::new(),
            styles: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    mutations: u64,
}

impl Document {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: vec![Element::new("html")],
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            mutations: 0,
        };

        let head = doc.create_element("head");
        let body = doc.create_element("body");
        doc.link(doc.root, head);
        doc.link(doc.root, body);
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Document with one `<div id=..>` per id appended to `<body>`
    pub fn with_containers(ids: &[&str]) -> Self {
        let mut doc = Self::new();
        for id in ids {
            let div = doc.create_element("div");
            doc.set_attribute(div, "id", id);
            doc.append_child(doc.body, div);
        }
        doc.mutations = 0;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of edits made to the document since construction
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    pub fn element(&self, node: NodeId) -> &Element {
        &self.nodes[node.0]
    }

    fn element_mut(&mut self, node: NodeId) -> &mut Element {
        self.mutations += 1;
        &mut self.nodes[node.0]
    }

    /// Create a detached element. Does not count as a mutation.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if it is
    /// already attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.link(parent, child);
        self.mutations += 1;
    }

    /// Remove every child of `node` and drop its text
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.element_mut(node).children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = None;
    }

    /// Replace the element's content with a single text run
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.nodes[node.0].text = Some(text.to_string());
    }

    /// Concatenated text of the element and its descendants
    pub fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let el = &self.nodes[node.0];
        if let Some(text) = &el.text {
            out.push_str(text);
        }
        for child in &el.children {
            self.collect_text(*child, out);
        }
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let el = self.element_mut(node);
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0].attr(name)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.element_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            self.element_mut(node).classes.retain(|c| c != class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].has_class(class)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let el = self.element_mut(node);
        match el.styles.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => el.styles.push((property.to_string(), value.to_string())),
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Attached descendants of the root in document order
    fn attached(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }
        out
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.attached()
            .into_iter()
            .find(|n| self.nodes[n.0].attr("id") == Some(id))
    }

    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.attached()
            .into_iter()
            .filter(|n| self.nodes[n.0].has_class(class))
            .collect()
    }

    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.attached()
            .into_iter()
            .filter(|n| self.nodes[n.0].tag == tag)
            .collect()
    }

    /// Serialize the attached tree
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        self.render(self.root, &mut out);
        out
    }

    fn render(&self, node: NodeId, out: &mut String) {
        let el = &self.nodes[node.0];
        out.push('<');
        out.push_str(&el.tag);

        for (name, value) in &el.attributes {
            push_attr(out, name, value);
        }
        if !el.classes.is_empty() {
            push_attr(out, "class", &el.classes.join(" "));
        }
        if !el.styles.is_empty() {
            let style = el
                .styles
                .iter()
                .map(|(k, v)| format!("{k}: {v}"))
                .collect::<Vec<_>>()
                .join("; ");
            push_attr(out, "style", &style);
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&el.tag.as_str()) {
            return;
        }

        if let Some(text) = &el.text {
            if RAW_TEXT_ELEMENTS.contains(&el.tag.as_str()) {
                out.push_str(text);
            } else {
                out.push_str(&escape_html(text));
            }
        }
        for child in &el.children {
            self.render(*child, out);
        }

        out.push_str("</");
        out.push_str(&el.tag);
        out.push('>');
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
