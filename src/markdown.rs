use pulldown_cmark::{html, Options, Parser};

/// Renders Markdown to HTML. Malformed input renders best-effort.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(content, options);
    let mut output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}
