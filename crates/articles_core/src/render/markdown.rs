use pulldown_cmark::{html, Options, Parser};

/// Converts Markdown source to an HTML fragment.
///
/// Tables, strikethrough and footnotes are enabled. Inline and block HTML in
/// the source is passed through unchanged.
pub fn markdown_to_html(markdown_input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    let parser = Parser::new_ext(markdown_input, options);

    let mut html_output = String::with_capacity(markdown_input.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::markdown_to_html;

    #[test]
    fn converts_emphasis_and_headings() {
        let html = markdown_to_html("## Intro\n\nsome *emphasis*");
        assert!(html.contains("<h2>Intro</h2>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn strikethrough_is_enabled() {
        assert!(markdown_to_html("~~gone~~").contains("<del>gone</del>"));
    }

    #[test]
    fn raw_html_passes_through() {
        let html = markdown_to_html("<div class=\"note\">kept</div>\n");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }
}
