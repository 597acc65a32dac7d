use markdown::{CompileOptions, Options, ParseOptions};

use crate::error::RenderError;

pub trait ContentRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}

/// GFM markdown to HTML. Raw HTML in the post passes through untouched,
/// posts are trusted content written by the site owner.
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let options = Options {
            parse: ParseOptions::gfm(),
            compile: CompileOptions {
                allow_dangerous_html: true,
                allow_dangerous_protocol: true,
                ..CompileOptions::gfm()
            },
        };
        MarkdownRenderer { options }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        markdown::to_html_with_options(markdown, &self.options).map_err(|e| RenderError {
            reason: e.reason.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        let html = MarkdownRenderer::new().render("## Tips\n\nHello *world*\n").unwrap();
        assert!(html.contains("<h2>Tips</h2>"));
        assert!(html.contains("<p>Hello <em>world</em></p>"));
    }

    #[test]
    fn test_raw_html_is_kept() {
        let md = "Intro\n\n<div class=\"note\">Raw <b>HTML</b></div>\n\n<!-- more -->\n";
        let html = MarkdownRenderer::new().render(md).unwrap();
        assert!(html.contains("<div class=\"note\">Raw <b>HTML</b></div>"));
        assert!(html.contains("<!-- more -->"));
        assert!(!html.contains("&lt;div"));
    }

    #[test]
    fn test_gfm_extensions() {
        let md = "| a | b |\n| - | - |\n| 1 | 2 |\n\n~~gone~~\n";
        let html = MarkdownRenderer::new().render(md).unwrap();
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_deterministic() {
        let md = "# Title\n\nSome `code` and a [link](https://example.com).\n";
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render(md).unwrap(), renderer.render(md).unwrap());
    }
}
