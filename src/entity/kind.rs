use std::fmt::{Display, Formatter};

/// The kind of formatting an [`Entity`](crate::entity::Entity) declares.
///
/// Kinds are parsed by name. Both the MTProto type names (`"MessageEntityBold"`) and the Bot API names (`"bold"`)
/// are recognized. Anything else is kept as [`EntityKind::Unknown`], so that the converter can report it instead of
/// guessing at how it should look.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Italic,
    Bold,
    /// Inline code. Rendered the same as [`EntityKind::Pre`].
    Code,
    Pre,
    Strikethrough,
    /// Hidden text. There's no HTML element for this, so it renders as `[brackets]`.
    Spoiler,
    Underline,
    PhoneNumber,
    Hashtag,
    /// A bare URL mention; the URL is the covered text itself.
    Url,
    /// A link whose target is the entity's payload, not its covered text.
    TextUrl,
    /// A kind we don't know how to render.
    Unknown(String),
}

/// `(kind, MTProto name, Bot API name)`
const NAMES: [(EntityKind, &str, &str); 11] = [
    (EntityKind::Italic, "MessageEntityItalic", "italic"),
    (EntityKind::Bold, "MessageEntityBold", "bold"),
    (EntityKind::Code, "MessageEntityCode", "code"),
    (EntityKind::Pre, "MessageEntityPre", "pre"),
    (EntityKind::Strikethrough, "MessageEntityStrike", "strikethrough"),
    (EntityKind::Spoiler, "MessageEntitySpoiler", "spoiler"),
    (EntityKind::Underline, "MessageEntityUnderline", "underline"),
    (EntityKind::PhoneNumber, "MessageEntityPhone", "phone_number"),
    (EntityKind::Hashtag, "MessageEntityHashtag", "hashtag"),
    (EntityKind::Url, "MessageEntityUrl", "url"),
    (EntityKind::TextUrl, "MessageEntityTextUrl", "text_link"),
];

impl EntityKind {
    pub fn from_name(name: &str) -> Self {
        NAMES
            .iter()
            .find(|(_, mtproto, bot_api)| *mtproto == name || *bot_api == name)
            .map(|(kind, _, _)| kind.clone())
            .unwrap_or_else(|| EntityKind::Unknown(name.to_string()))
    }

    /// The kind's MTProto name, or the original name for [`EntityKind::Unknown`].
    pub fn name(&self) -> &str {
        if let EntityKind::Unknown(name) = self {
            return name;
        }
        NAMES
            .iter()
            .find(|(kind, _, _)| kind == self)
            .map(|(_, mtproto, _)| *mtproto)
            .unwrap_or_default()
    }
}

impl From<&str> for EntityKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
