//! Formatting utilities (Telegram HTML, link cards, number grouping).

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const RULE: &str = "---------------------";

/// A titled reply made of labelled links, optionally grouped under headings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkCard {
    pub title: &'static str,
    pub sections: Vec<LinkSection>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSection {
    pub heading: Option<&'static str>,
    pub links: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: &'static str,
}

impl Link {
    pub fn new(label: impl Into<String>, url: &'static str) -> Self {
        Self {
            label: label.into(),
            url,
        }
    }

    /// A link whose label is the URL itself.
    pub fn bare(url: &'static str) -> Self {
        Self::new(url, url)
    }
}

impl LinkSection {
    pub fn plain(links: Vec<Link>) -> Self {
        Self {
            heading: None,
            links,
        }
    }

    pub fn titled(heading: &'static str, links: Vec<Link>) -> Self {
        Self {
            heading: Some(heading),
            links,
        }
    }
}

impl LinkCard {
    pub fn new(title: &'static str, sections: Vec<LinkSection>) -> Self {
        Self { title, sections }
    }

    /// Card with a single untitled section.
    pub fn single(title: &'static str, links: Vec<Link>) -> Self {
        Self::new(title, vec![LinkSection::plain(links)])
    }

    pub fn to_html(&self) -> String {
        let mut out = card_header(self.title);
        let sections = self
            .sections
            .iter()
            .map(|s| {
                let mut lines = Vec::new();
                if let Some(h) = s.heading {
                    lines.push(format!("<b>{}</b>", escape_html(h)));
                }
                lines.extend(s.links.iter().map(|l| {
                    format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(l.url),
                        escape_html(&l.label)
                    )
                }));
                lines.join("\n")
            })
            .collect::<Vec<_>>();
        out.push_str(&sections.join("\n\n"));
        out
    }
}

/// Dashed rule, bold title, dashed rule, newline.
pub fn card_header(title: &str) -> String {
    format!("{RULE}\n<b>{}</b>\n{RULE}\n", escape_html(title))
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u128) -> String {
    insert_separators(&n.to_string())
}

/// Fixed-point rendering with grouped integer digits: `1234.5` -> `1,234.50`.
pub fn format_grouped_decimal(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&insert_separators(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn insert_separators(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html() {
        let s = r#"<a href="x&y">"#;
        assert_eq!(escape_html(s), "&lt;a href=&quot;x&amp;y&quot;&gt;");
    }

    #[test]
    fn renders_card_with_sections() {
        let card = LinkCard::new(
            "Bridge",
            vec![
                LinkSection::titled("Status", vec![Link::bare("https://s.example")]),
                LinkSection::titled("Video", vec![Link::new("Watch", "https://v.example/?a=1&b=2")]),
            ],
        );
        assert_eq!(
            card.to_html(),
            "---------------------\n<b>Bridge</b>\n---------------------\n\
<b>Status</b>\n<a href=\"https://s.example\">https://s.example</a>\n\n\
<b>Video</b>\n<a href=\"https://v.example/?a=1&amp;b=2\">Watch</a>"
        );
    }

    #[test]
    fn escapes_labels() {
        let card = LinkCard::single("A & B", vec![Link::new("<x>", "https://x.example")]);
        let html = card.to_html();
        assert!(html.contains("<b>A &amp; B</b>"));
        assert!(html.contains(">&lt;x&gt;</a>"));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(19_500_000), "19,500,000");
    }

    #[test]
    fn groups_decimals() {
        assert_eq!(format_grouped_decimal(1234.5, 2), "1,234.50");
        assert_eq!(format_grouped_decimal(0.004, 2), "0.00");
        assert_eq!(format_grouped_decimal(-1234567.891, 2), "-1,234,567.89");
        assert_eq!(format_grouped_decimal(12.0, 0), "12");
    }
}
