use crate::entity::{Entity, EntityKind};
use crate::output::escape::escape_html;
use crate::output::{ConvertError, ConvertOptions};
use std::borrow::Cow;

/// A pair of markup fragments that surround one styled span.
///
/// Two tags are equal iff both of their fragments are equal. In particular, two links to different targets are
/// different tags.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    opening: Cow<'static, str>,
    closing: Cow<'static, str>,
}

pub(crate) const ITALIC: Tag = Tag::fixed("<i>", "</i>");
pub(crate) const BOLD: Tag = Tag::fixed("<b>", "</b>");
/// The preformatted tag. Newlines within it become `<br/>`s instead of new paragraphs.
pub(crate) const PRE: Tag = Tag::fixed("<pre>", "</pre>");
pub(crate) const STRIKETHROUGH: Tag = Tag::fixed("<s>", "</s>");
pub(crate) const SPOILER: Tag = Tag::fixed("[", "]");
pub(crate) const UNDERLINE: Tag = Tag::fixed(r#"<span style="text-decoration: underline">"#, "</span>");

impl Tag {
    const fn fixed(opening: &'static str, closing: &'static str) -> Self {
        Self {
            opening: Cow::Borrowed(opening),
            closing: Cow::Borrowed(closing),
        }
    }

    fn link_to(target: &str) -> Self {
        Self {
            opening: Cow::Owned(format!(r#"<a href="{}">"#, escape_html(target))),
            closing: Cow::Borrowed("</a>"),
        }
    }

    pub fn opening(&self) -> &str {
        &self.opening
    }

    pub fn closing(&self) -> &str {
        &self.closing
    }

    pub(crate) fn is_preformatted(&self) -> bool {
        *self == PRE
    }
}

/// How a kind of entity turns into a [Tag].
#[derive(Debug, PartialEq, Eq)]
enum TagRule {
    Ignore,
    Fixed(Tag),
    /// A link whose target is the text the entity covers.
    LinkToCoveredText,
    /// A link whose target is the entity's payload.
    LinkToPayload,
}

fn rule_for(kind: &EntityKind, options: &ConvertOptions) -> Result<TagRule, ConvertError> {
    let rule = match kind {
        EntityKind::Italic => TagRule::Fixed(ITALIC),
        EntityKind::Bold => TagRule::Fixed(BOLD),
        EntityKind::Code | EntityKind::Pre => TagRule::Fixed(PRE),
        EntityKind::Strikethrough => TagRule::Fixed(STRIKETHROUGH),
        EntityKind::Spoiler => TagRule::Fixed(SPOILER),
        EntityKind::Underline => TagRule::Fixed(UNDERLINE),
        EntityKind::PhoneNumber | EntityKind::Hashtag => TagRule::Ignore,
        EntityKind::Url if options.link_urls => TagRule::LinkToCoveredText,
        EntityKind::TextUrl if options.text_links => TagRule::LinkToPayload,
        EntityKind::Url | EntityKind::TextUrl => TagRule::Ignore,
        EntityKind::Unknown(name) => return Err(ConvertError::UnknownEntityKind(name.clone())),
    };
    Ok(rule)
}

/// Resolves an entity to its tag, or `None` if the entity doesn't contribute any markup.
///
/// `covered_text` is only invoked for entities whose tag depends on the text they cover.
pub(crate) fn resolve<F>(entity: &Entity, options: &ConvertOptions, covered_text: F) -> Result<Option<Tag>, ConvertError>
where
    F: FnOnce() -> Result<String, ConvertError>,
{
    let tag = match rule_for(&entity.kind, options)? {
        TagRule::Ignore => None,
        TagRule::Fixed(tag) => Some(tag),
        TagRule::LinkToCoveredText => Some(Tag::link_to(&covered_text()?)),
        TagRule::LinkToPayload => entity.payload.as_deref().map(Tag::link_to),
    };
    Ok(tag)
}
