//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code
//! block highlighting. It implements the [`RenderPipeline`] boundary:
//! the chat loop hands it the entire accumulated response on every delta
//! and reprints the result, because markdown structure can change
//! retroactively as tokens arrive (an open code fence closes only once
//! enough text is in).

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;

use charla_core::render::RenderPipeline;
use charla_types::chat::StreamMetrics;

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Print the metrics footer after a completed response.
    ///
    /// Format: "{tps} tps · {tokens} tokens · {duration}s"
    pub fn print_metrics_footer(&self, metrics: &StreamMetrics) {
        println!(
            "  {} {} {} {} {} {}",
            style(format!("{:.1}", metrics.tps)).dim(),
            style("tps").dim(),
            style("\u{00b7}").dim(),
            style(format!("{} tokens", metrics.tokens)).dim(),
            style("\u{00b7}").dim(),
            style(format!("{:.1}s", metrics.duration_s)).dim(),
        );
    }

    /// Highlight a code block using syntect, with a language label line.
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut h = HighlightLines::new(syntax, theme);

        let label = if lang.is_empty() { "code" } else { lang };
        let mut output = String::new();
        output.push_str(&format!(
            "  {}\n",
            style(format!("--- {} ---", label.to_uppercase())).dim()
        ));

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline for ChatRenderer {
    /// Render markdown with syntax-highlighted code blocks.
    ///
    /// Code fences are routed through syntect; everything else through
    /// termimad. An unclosed trailing fence (mid-stream) is still
    /// highlighted with what has arrived so far.
    fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") && !in_code_block {
                in_code_block = true;
                code_lang = line.trim_start_matches('`').trim().to_string();
                code_buf.clear();
            } else if line.starts_with("```") && in_code_block {
                in_code_block = false;
                output.push_str(&self.highlight_code(&code_buf, &code_lang));
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                let rendered = self.skin.term_text(line);
                output.push_str(&format!("{rendered}"));
            }
        }

        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_idempotent() {
        let renderer = ChatRenderer::new();
        let input = "# Title\n\nSome *prose* here.\n\n```rust\nfn main() {}\n```\n";
        assert_eq!(renderer.render(input), renderer.render(input));
    }

    #[test]
    fn test_render_plain_prose() {
        let renderer = ChatRenderer::new();
        let out = renderer.render("hello world");
        assert!(out.contains("hello world"));
    }

    #[test]
    fn test_code_fence_gets_language_label() {
        let renderer = ChatRenderer::new();
        let out = renderer.render("```python\nprint('hi')\n```\n");
        assert!(out.contains("PYTHON"));
    }

    #[test]
    fn test_unclosed_fence_still_highlighted() {
        // Mid-stream state: the fence has not closed yet.
        let renderer = ChatRenderer::new();
        let out = renderer.render("```rust\nlet x = 1;");
        assert!(out.contains("RUST"));
        assert!(out.contains("let x = 1;") || out.contains("x"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let renderer = ChatRenderer::new();
        let out = renderer.render("```nosuchlang\nsome code\n```\n");
        assert!(out.contains("NOSUCHLANG"));
    }
}
