//! Markdown rendering with syntax highlighting and optional math notation

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    math: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(true)
    }

    /// Create with math notation enabled or disabled
    pub fn with_options(math: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
            math,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let mut options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        if self.math {
            options |= Options::ENABLE_MATH;
        }
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block_lang: Option<String> = None;
        let mut in_code_block = false;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    in_code_block = true;
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    code_block_lang = None;
                    in_code_block = false;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                // KaTeX's auto-render picks these up client-side
                Event::InlineMath(tex) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<span class="math math-inline">\({}\)</span>"#,
                        html_escape(&tex)
                    ))));
                }
                Event::DisplayMath(tex) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<div class="math math-display">\[{}\]</div>"#,
                        html_escape(&tex)
                    ))));
                }
                _ => {
                    events.push(event);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                lang, highlighted
            ),
            Err(_) => {
                // Fallback to plain code block
                let escaped = html_escape(code);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang, escaped
                )
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
    }

    #[test]
    fn test_render_inline_math() {
        let renderer = MarkdownRenderer::with_options(true);
        let html = renderer.render("Euler: $e^{i\\pi} + 1 = 0$").unwrap();
        assert!(html.contains("math-inline"));
        assert!(html.contains("e^{i\\pi}"));
    }

    #[test]
    fn test_math_disabled_leaves_dollars_alone() {
        let renderer = MarkdownRenderer::with_options(false);
        let html = renderer.render("Costs $5 or $10 depending.").unwrap();
        assert!(!html.contains("math-inline"));
        assert!(html.contains('$'));
    }

    #[test]
    fn test_display_math_block() {
        let renderer = MarkdownRenderer::with_options(true);
        let html = renderer.render("$$\\int_0^1 x\\,dx$$").unwrap();
        assert!(html.contains("math-display"));
    }
}
