use crate::entity::Entity;
use crate::output::escape::push_body_text;
use crate::output::positions::PositionMap;
use crate::output::utf16::Utf16Text;
use crate::output::{ConvertError, Tag};
use derive_builder::Builder;

const PARAGRAPH_OPEN: &str = "<p>";
const PARAGRAPH_CLOSE: &str = "</p>";
const PARAGRAPH_BREAK: &str = "</p><p>";
const LINE_BREAK: &str = "<br/>";

/// Options for rendering messages as HTML.
///
/// Both options default to `false`: out of the box, the output reproduces a message's visual styling, but not its
/// links.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
#[builder(default)]
pub struct ConvertOptions {
    /// Whether bare URL mentions should become links to themselves.
    pub link_urls: bool,
    /// Whether links with explicit targets should become links.
    pub text_links: bool,
}

/// Renders messages as HTML.
///
/// ```
/// use tghtml::entity::{Entity, EntityKind};
/// use tghtml::output::{ConvertOptions, HtmlWriter};
///
/// let writer = HtmlWriter::with_options(ConvertOptions::default());
/// let html = writer.render("hello\nworld", &[Entity::new(EntityKind::Bold, 0, 5)]).unwrap();
/// assert_eq!(html, "<p><b>hello</b></p><p>world</p>");
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct HtmlWriter {
    options: ConvertOptions,
}

impl HtmlWriter {
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Renders `text` with its `entities`.
    ///
    /// If there are no entities and no newlines, the text comes back exactly as given: not escaped, and not wrapped in
    /// a paragraph. Otherwise, the result is one `<p>` containing the escaped, styled text, with each newline either
    /// starting a new paragraph or, within preformatted text, becoming a `<br/>`.
    pub fn render(&self, text: &str, entities: &[Entity]) -> Result<String, ConvertError> {
        if entities.is_empty() && memchr::memchr(b'\n', text.as_bytes()).is_none() {
            tracing::trace!(len = text.len(), "plain single-line message; passing through");
            return Ok(text.to_string());
        }

        let text = Utf16Text::new(text);
        let positions = PositionMap::build(&text, entities, &self.options)?;
        tracing::debug!(
            entities = entities.len(),
            positions = positions.len(),
            code_units = text.len(),
            "rendering message"
        );

        let mut out = String::with_capacity(text.len() + PARAGRAPH_OPEN.len() + PARAGRAPH_CLOSE.len());
        out.push_str(PARAGRAPH_OPEN);
        let mut open_tags: Vec<&Tag> = Vec::with_capacity(entities.len());

        for (offset, event, next_offset) in positions.iter() {
            for closing in &event.to_close {
                match open_tags.pop() {
                    Some(innermost) if innermost == closing => out.push_str(closing.closing()),
                    innermost => {
                        tracing::debug!(offset, tag = closing.opening(), "close doesn't match the innermost open tag");
                        return Err(ConvertError::StructuralMismatch {
                            offset,
                            expected: closing.clone(),
                            found: innermost.cloned(),
                        });
                    }
                }
            }

            if event.is_break {
                if open_tags.iter().any(|tag| tag.is_preformatted()) {
                    out.push_str(LINE_BREAK);
                } else {
                    out.push_str(PARAGRAPH_BREAK);
                }
            }

            for opening in &event.to_open {
                out.push_str(opening.opening());
                open_tags.push(opening);
            }

            let next_offset = next_offset.unwrap_or(text.len());
            push_body_text(&mut out, &text.decode(offset..next_offset)?);
        }

        if !open_tags.is_empty() {
            return Err(ConvertError::UnclosedTags(open_tags.into_iter().cloned().collect()));
        }
        out.push_str(PARAGRAPH_CLOSE);
        Ok(out)
    }
}

/// Renders `text` with its `entities`, using the default [ConvertOptions].
///
/// See [HtmlWriter::render].
pub fn convert(text: &str, entities: &[Entity]) -> Result<String, ConvertError> {
    HtmlWriter::default().render(text, entities)
}

/// Renders `text` with its `entities`.
///
/// See [HtmlWriter::render].
pub fn convert_with_options(text: &str, entities: &[Entity], options: &ConvertOptions) -> Result<String, ConvertError> {
    HtmlWriter::with_options(*options).render(text, entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::output::tags::*;
    use crate::util::utils_for_test::*;

    mod fast_path {
        use super::*;

        #[test]
        fn plain_text_is_unchanged() {
            check("hello", &[], "hello");
        }

        #[test]
        fn plain_text_is_not_escaped() {
            check("<script>&</script>", &[], "<script>&</script>");
        }

        #[test]
        fn empty_text() {
            check("", &[], "");
        }

        #[test]
        fn ignored_entity_still_takes_full_path() {
            check("#tag <3", &[Entity::new(EntityKind::Hashtag, 0, 4)], "<p>#tag &lt;3</p>");
        }
    }

    mod breaks {
        use super::*;

        #[test]
        fn newline_becomes_paragraph() {
            check("hi\nbye", &[], "<p>hi</p><p>bye</p>");
        }

        #[test]
        fn consecutive_newlines() {
            check("a\n\nb", &[], "<p>a</p><p></p><p>b</p>");
        }

        #[test]
        fn trailing_newline() {
            check("a\n", &[], "<p>a</p><p></p>");
        }

        #[test]
        fn newline_in_code_becomes_br() {
            check("a\nb", &[Entity::new(EntityKind::Code, 0, 3)], "<p><pre>a<br/>b</pre></p>");
        }

        #[test]
        fn newline_in_pre_nested_in_bold_becomes_br() {
            check(
                "x\ny",
                &[Entity::new(EntityKind::Bold, 0, 3), Entity::new(EntityKind::Pre, 0, 3)],
                "<p><b><pre>x<br/>y</pre></b></p>",
            );
        }

        #[test]
        fn newline_in_bold_inside_pre_becomes_br() {
            check(
                "x\ny",
                &[Entity::new(EntityKind::Code, 0, 3), Entity::new(EntityKind::Bold, 0, 3)],
                "<p><pre><b>x<br/>y</b></pre></p>",
            );
        }

        #[test]
        fn newline_in_bold_becomes_paragraph() {
            // tags stay open across the paragraph break; the break is emitted in place
            check("x\ny", &[Entity::new(EntityKind::Bold, 0, 3)], "<p><b>x</p><p>y</b></p>");
        }

        #[test]
        fn newline_right_after_code_becomes_paragraph() {
            check(
                "code\ntext",
                &[Entity::new(EntityKind::Code, 0, 4)],
                "<p><pre>code</pre></p><p>text</p>",
            );
        }

        #[test]
        fn newline_right_before_code_becomes_paragraph() {
            check(
                "text\ncode",
                &[Entity::new(EntityKind::Code, 4, 5)],
                "<p>text</p><p><pre>code</pre></p>",
            );
        }

        #[test]
        fn carriage_return_is_kept_as_text() {
            check("a\r\nb", &[], "<p>a\r</p><p>b</p>");
        }
    }

    mod styling {
        use super::*;

        #[test]
        fn bold() {
            check("bold", &[Entity::new(EntityKind::Bold, 0, 4)], "<p><b>bold</b></p>");
        }

        #[test]
        fn every_fixed_style() {
            check(
                "i b c s p u",
                &[
                    Entity::new(EntityKind::Italic, 0, 1),
                    Entity::new(EntityKind::Bold, 2, 1),
                    Entity::new(EntityKind::Code, 4, 1),
                    Entity::new(EntityKind::Strikethrough, 6, 1),
                    Entity::new(EntityKind::Spoiler, 8, 1),
                    Entity::new(EntityKind::Underline, 10, 1),
                ],
                r#"<p><i>i</i> <b>b</b> <pre>c</pre> <s>s</s> [p] <span style="text-decoration: underline">u</span></p>"#,
            );
        }

        #[test]
        fn nested() {
            check(
                "hello world",
                &[
                    Entity::new(EntityKind::Bold, 0, 11),
                    Entity::new(EntityKind::Italic, 6, 5),
                ],
                "<p><b>hello <i>world</i></b></p>",
            );
        }

        #[test]
        fn nested_sharing_both_ends() {
            check(
                "abc",
                &[Entity::new(EntityKind::Bold, 0, 3), Entity::new(EntityKind::Italic, 0, 3)],
                "<p><b><i>abc</i></b></p>",
            );
        }

        #[test]
        fn adjacent() {
            check(
                "abcd",
                &[Entity::new(EntityKind::Bold, 0, 2), Entity::new(EntityKind::Italic, 2, 2)],
                "<p><b>ab</b><i>cd</i></p>",
            );
        }

        #[test]
        fn zero_length_entity_renders_nothing() {
            check(
                "abc",
                &[Entity::new(EntityKind::Bold, 0, 3), Entity::new(EntityKind::Italic, 1, 0)],
                "<p><b>abc</b></p>",
            );
        }

        #[test]
        fn offsets_are_code_units() {
            check(
                "🦀 rust",
                &[Entity::new(EntityKind::Bold, 3, 4)],
                "<p>🦀 <b>rust</b></p>",
            );
        }

        #[test]
        fn entity_covering_astral_char() {
            check("a🦀b", &[Entity::new(EntityKind::Spoiler, 1, 2)], "<p>a[🦀]b</p>");
        }

        #[test]
        fn ignored_entities() {
            check(
                "call +1 555 #now",
                &[
                    Entity::new(EntityKind::PhoneNumber, 5, 6),
                    Entity::new(EntityKind::Hashtag, 12, 4),
                ],
                "<p>call +1 555 #now</p>",
            );
        }
    }

    mod escaping {
        use super::*;

        #[test]
        fn body_is_escaped() {
            check(
                "<script>\nx",
                &[],
                "<p>&lt;script&gt;</p><p>x</p>",
            );
        }

        #[test]
        fn escaped_inside_tags() {
            check(
                r#"a<b & "c""#,
                &[Entity::new(EntityKind::Bold, 1, 3)],
                r#"<p>a<b>&lt;b </b>&amp; &quot;c&quot;</p>"#,
            );
        }
    }

    mod links {
        use super::*;

        #[test]
        fn urls_are_plain_by_default() {
            check(
                "see a.com",
                &[Entity::new(EntityKind::Url, 4, 5)],
                "<p>see a.com</p>",
            );
        }

        #[test]
        fn urls_link_to_themselves_when_enabled() {
            let options = ConvertOptionsBuilder::default().link_urls(true).build().unwrap();
            check_with(
                &options,
                "see a.com/?x&y",
                &[Entity::new(EntityKind::Url, 4, 10)],
                r#"<p>see <a href="a.com/?x&amp;y">a.com/?x&amp;y</a></p>"#,
            );
        }

        #[test]
        fn text_links_when_enabled() {
            let options = ConvertOptionsBuilder::default().text_links(true).build().unwrap();
            check_with(
                &options,
                "click here",
                &[
                    Entity::new(EntityKind::Bold, 0, 10),
                    Entity::new(EntityKind::TextUrl, 6, 4).with_payload("https://example.com/?a=\"1\""),
                ],
                r#"<p><b>click <a href="https://example.com/?a=&quot;1&quot;">here</a></b></p>"#,
            );
        }

        #[test]
        fn two_links_with_shared_end() {
            let options = ConvertOptionsBuilder::default().text_links(true).build().unwrap();
            check_with(
                &options,
                "ab",
                &[
                    Entity::new(EntityKind::TextUrl, 0, 2).with_payload("x"),
                    Entity::new(EntityKind::TextUrl, 1, 1).with_payload("y"),
                ],
                r#"<p><a href="x">a<a href="y">b</a></a></p>"#,
            );
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn crossing_entities() {
            let result = convert(
                "abcd",
                &[Entity::new(EntityKind::Bold, 0, 3), Entity::new(EntityKind::Italic, 1, 3)],
            );
            assert_eq!(
                result,
                Err(ConvertError::StructuralMismatch {
                    offset: 3,
                    expected: BOLD,
                    found: Some(ITALIC),
                })
            );
        }

        #[test]
        fn inner_declared_before_outer_at_shared_start() {
            let result = convert(
                "abcd",
                &[Entity::new(EntityKind::Italic, 0, 2), Entity::new(EntityKind::Bold, 0, 4)],
            );
            assert_eq!(
                result,
                Err(ConvertError::StructuralMismatch {
                    offset: 2,
                    expected: ITALIC,
                    found: Some(BOLD),
                })
            );
        }

        #[test]
        fn crossing_links_to_different_targets() {
            let options = ConvertOptionsBuilder::default().text_links(true).build().unwrap();
            let result = convert_with_options(
                "abcd",
                &[
                    Entity::new(EntityKind::TextUrl, 0, 3).with_payload("x"),
                    Entity::new(EntityKind::TextUrl, 1, 3).with_payload("y"),
                ],
                &options,
            );
            unwrap!(result, Err(ConvertError::StructuralMismatch { offset: 3, .. }));
        }

        #[test]
        fn unknown_kind() {
            let result = convert("abc", &[Entity::new("MessageEntityBlink", 0, 3)]);
            assert_eq!(
                result,
                Err(ConvertError::UnknownEntityKind("MessageEntityBlink".to_string()))
            );
        }

        #[test]
        fn entity_out_of_bounds() {
            let result = convert("abc", &[Entity::new(EntityKind::Bold, 1, 5)]);
            unwrap!(result, Err(ConvertError::EntityOutOfBounds { .. }));
        }

        #[test]
        fn entity_splitting_surrogate_pair() {
            let result = convert("🦀", &[Entity::new(EntityKind::Bold, 0, 1)]);
            unwrap!(result, Err(ConvertError::SplitSurrogate { start: 0, end: 1 }));
        }
    }

    mod properties {
        use super::*;

        #[test]
        fn balanced_nesting() {
            let entities = [
                Entity::new(EntityKind::Bold, 0, 18),
                Entity::new(EntityKind::Italic, 0, 9),
                Entity::new(EntityKind::Underline, 2, 5),
                Entity::new(EntityKind::Strikethrough, 4, 3),
                Entity::new(EntityKind::Code, 10, 8),
                Entity::new(EntityKind::Spoiler, 12, 6),
            ];
            let html = convert("one two three\nfour", &entities).unwrap();
            let all_tags = [BOLD, ITALIC, UNDERLINE, STRIKETHROUGH, PRE, SPOILER];
            for tag in &all_tags {
                assert_eq!(html.matches(tag.opening()).count(), 1, "{html}");
                assert_eq!(html.matches(tag.closing()).count(), 1, "{html}");
            }

            // Replay the output, and check that each closer matches the most recent unclosed opener.
            let mut stack = Vec::new();
            let mut remaining = html.as_str();
            while !remaining.is_empty() {
                if let Some(tag) = all_tags.iter().find(|t| remaining.starts_with(t.opening())) {
                    stack.push(tag);
                    remaining = &remaining[tag.opening().len()..];
                } else if let Some(tag) = all_tags.iter().find(|t| remaining.starts_with(t.closing())) {
                    assert_eq!(stack.pop(), Some(tag), "{html}");
                    remaining = &remaining[tag.closing().len()..];
                } else {
                    let skip = remaining.chars().next().map_or(1, char::len_utf8);
                    remaining = &remaining[skip..];
                }
            }
            assert!(stack.is_empty(), "{html}");
            assert!(html.contains("<pre>re[e<br/>four]</pre></b>"), "{html}");
        }

        #[test]
        fn fast_path_identity() {
            for text in ["", "a", "<&>\"'", "🦀🦀", "tab\there", "cr\ronly"] {
                assert_eq!(convert(text, &[]).unwrap(), text);
            }
        }
    }

    fn check(text: &str, entities: &[Entity], expect: &str) {
        check_with(&ConvertOptions::default(), text, entities, expect)
    }

    fn check_with(options: &ConvertOptions, text: &str, entities: &[Entity], expect: &str) {
        let actual = convert_with_options(text, entities, options).unwrap();
        assert_eq!(actual, expect);
    }
}
