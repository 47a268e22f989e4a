use regex::{Captures, Regex};

/// Strips source text of everything that could masquerade as a real
/// identifier reference: regex literals, string literal bodies, and comments.
///
/// Interpolated expressions inside string literals are live code and are kept
/// (the literal is replaced by the interpolated expressions' source text).
/// Sanitizing never fails; unmatched delimiters are left as-is.
pub struct Sanitizer {
    regex_literal: Regex,
    escaped_quote: Regex,
    string_literal: Regex,
    interpolation: Regex,
    block_comment: Regex,
    line_comment: Regex,
}

impl Sanitizer {
    pub fn new() -> Self {
        Self {
            regex_literal: Regex::new(r"(?s)#/.*?/#").unwrap(),
            escaped_quote: Regex::new(r#"\\""#).unwrap(),
            string_literal: Regex::new(r#"(?s)"""(?P<triple>.*?)"""|"(?P<single>[^"\n]*)""#)
                .unwrap(),
            interpolation: Regex::new(r"(?s)\\\((?P<expr>.*?)\)").unwrap(),
            block_comment: Regex::new(r"(?s)/\*.*?\*/").unwrap(),
            line_comment: Regex::new(r"//[^\n]*").unwrap(),
        }
    }

    /// Sanitize full file content for reference counting.
    ///
    /// Steps run in a fixed order; each assumes the previous one already ran:
    /// 1. regex literals (`#/ … /#`)
    /// 2. escaped quotes (`\"`), so they cannot terminate a literal early
    /// 3. string literals, triple- then single-delimited — interpolation
    ///    bodies survive, everything else collapses to `""`
    /// 4. block comments
    /// 5. line comments
    pub fn sanitize(&self, text: &str) -> String {
        let text = self.regex_literal.replace_all(text, "");
        let text = self.escaped_quote.replace_all(&text, "");
        let text = self
            .string_literal
            .replace_all(&text, |caps: &Captures| self.replace_literal(caps));
        let text = self.block_comment.replace_all(&text, "");
        let text = self.line_comment.replace_all(&text, "");
        text.into_owned()
    }

    fn replace_literal(&self, caps: &Captures) -> String {
        let body = caps
            .name("triple")
            .or_else(|| caps.name("single"))
            .map(|m| m.as_str())
            .unwrap_or("");

        let expressions: Vec<&str> = self
            .interpolation
            .captures_iter(body)
            .map(|c| c.name("expr").unwrap().as_str())
            .collect();

        if expressions.is_empty() {
            "\"\"".to_string()
        } else {
            expressions.join(" ")
        }
    }

    /// Remove block comments while keeping the file's line count intact, so
    /// line numbers computed afterwards refer to the file on disk.
    pub fn strip_block_comments(&self, text: &str) -> String {
        self.block_comment
            .replace_all(text, |caps: &Captures| {
                "\n".repeat(caps[0].matches('\n').count())
            })
            .into_owned()
    }

    /// Truncate a single line at its line-comment marker.
    pub fn strip_line_comment<'a>(&self, line: &'a str) -> &'a str {
        match line.find("//") {
            Some(index) => &line[..index],
            None => line,
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
