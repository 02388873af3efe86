use std::fmt::Display;

/// Minimal SVG element builder. Attributes render in insertion order.
pub(crate) struct SvgTag {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
}

impl SvgTag {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
        }
    }

    pub(crate) fn attr(mut self, key: &'static str, value: impl Display) -> Self {
        self.attributes.push((key, value.to_string()));
        self
    }

    fn open(&self, self_closing: bool) -> String {
        let attrs: String = self
            .attributes
            .iter()
            .map(|(k, v)| format!(" {}=\"{}\"", k, escape_xml(v)))
            .collect();

        if self_closing {
            format!("<{}{}/>", self.name, attrs)
        } else {
            format!("<{}{}>", self.name, attrs)
        }
    }

    /// Appends the element as a self-closing tag.
    pub(crate) fn write_empty(&self, svg: &mut String) {
        svg.push_str(&self.open(true));
        svg.push('\n');
    }

    /// Appends the element wrapping escaped text.
    pub(crate) fn write_text(&self, svg: &mut String, text: &str) {
        svg.push_str(&self.open(false));
        svg.push_str(&escape_xml(text));
        svg.push_str(&format!("</{}>\n", self.name));
    }

    /// Appends the opening tag; the caller closes it.
    pub(crate) fn write_open(&self, svg: &mut String) {
        svg.push_str(&self.open(false));
        svg.push('\n');
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
