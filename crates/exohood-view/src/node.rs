#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(TextNode),
    Element(ElementNode),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    /// Inline style declarations, in insertion order
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(TextNode {
        content: content.into(),
    })
}

pub fn element(tag: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Node {
    Node::Element(ElementNode {
        tag: tag.into(),
        children: children.into_iter().collect(),
        ..Default::default()
    })
}

pub fn div(children: impl IntoIterator<Item = Node>) -> Node {
    element("div", children)
}

pub fn button(label: impl Into<String>) -> Node {
    element("button", [text(label)]).with_attr("type", "button")
}

pub fn fragment(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Fragment(children.into_iter().collect())
}

impl Node {
    pub fn with_attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            Node::Element(mut e) => {
                let name = name.into();
                let value = value.into();
                match e.attributes.iter_mut().find(|(n, _)| *n == name) {
                    Some(slot) => slot.1 = value,
                    None => e.attributes.push((name, value)),
                }
                Node::Element(e)
            }
            other => other,
        }
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_classes([class.into()])
    }

    pub fn with_classes(self, classes: impl IntoIterator<Item = String>) -> Self {
        match self {
            Node::Element(mut e) => {
                for class in classes {
                    if !class.is_empty() && !e.classes.contains(&class) {
                        e.classes.push(class);
                    }
                }
                Node::Element(e)
            }
            other => other,
        }
    }

    pub fn with_style(self, property: impl Into<String>, value: impl Into<String>) -> Self {
        match self {
            Node::Element(mut e) => {
                e.style.push((property.into(), value.into()));
                Node::Element(e)
            }
            other => other,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(e) => e
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Empty => {}
            Node::Text(t) => out.push_str(&t.content),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(children) => children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// First descendant (or self) with `name="value"`
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<&Node> {
        if self.attr(name) == Some(value) {
            return Some(self);
        }
        let children = match self {
            Node::Element(e) => &e.children,
            Node::Fragment(children) => children,
            _ => return None,
        };
        children.iter().find_map(|c| c.find_by_attr(name, value))
    }
}
