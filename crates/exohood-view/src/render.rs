use crate::node::{ElementNode, Node};

pub fn render_to_markup(node: &Node) -> String {
    let mut output = String::new();
    render_node(node, &mut output);
    output
}

fn render_node(node: &Node, output: &mut String) {
    match node {
        Node::Empty => {}

        Node::Text(text) => {
            push_escaped(&text.content, output);
        }

        Node::Element(element) => {
            render_element(element, output);
        }

        Node::Fragment(children) => {
            for child in children {
                render_node(child, output);
            }
        }
    }
}

fn render_element(element: &ElementNode, output: &mut String) {
    output.push('<');
    output.push_str(&element.tag);

    if !element.classes.is_empty() {
        push_attr("class", &element.classes.join(" "), output);
    }

    for (name, value) in &element.attributes {
        push_attr(name, value, output);
    }

    if !element.style.is_empty() {
        let declarations: Vec<String> = element
            .style
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect();
        push_attr("style", &declarations.join("; "), output);
    }

    output.push('>');

    for child in &element.children {
        render_node(child, output);
    }

    output.push_str("</");
    output.push_str(&element.tag);
    output.push('>');
}

fn push_attr(name: &str, value: &str, output: &mut String) {
    output.push(' ');
    output.push_str(name);
    output.push_str("=\"");
    push_escaped(value, output);
    output.push('"');
}

fn push_escaped(content: &str, output: &mut String) {
    for c in content.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::*;

    #[test]
    fn renders_nested_elements() {
        let node = div([text("a"), element("span", [text("b")])]).with_id("main");
        assert_eq!(
            render_to_markup(&node),
            r#"<div id="main">a<span>b</span></div>"#
        );
    }

    #[test]
    fn renders_classes_then_attributes_then_style() {
        let node = div([])
            .with_class("theme")
            .with_class("dark")
            .with_attr("data-instance", "0")
            .with_style("--primary-color", "#0316C1")
            .with_style("--font-family", "inherit");

        assert_eq!(
            render_to_markup(&node),
            r##"<div class="theme dark" data-instance="0" style="--primary-color: #0316C1; --font-family: inherit"></div>"##
        );
    }

    #[test]
    fn escapes_text_and_attribute_values() {
        let node = div([text("<b>&</b>")]).with_attr("title", r#"say "hi" & 'bye'"#);
        assert_eq!(
            render_to_markup(&node),
            "<div title=\"say &quot;hi&quot; &amp; &#39;bye&#39;\">&lt;b&gt;&amp;&lt;/b&gt;</div>"
        );
    }

    #[test]
    fn empty_and_fragments_render_flat() {
        let node = fragment([Node::Empty, text("x"), fragment([text("y")])]);
        assert_eq!(render_to_markup(&node), "xy");
        assert_eq!(render_to_markup(&Node::Empty), "");
    }
}
