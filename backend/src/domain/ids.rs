//! Storage-assigned identifiers for every entity.

use super::macros::define_id;

define_id! {
    /// Identifier of a [`User`](super::User).
    UserId
}

define_id! {
    /// Identifier of a [`Website`](super::Website).
    WebsiteId
}

define_id! {
    /// Identifier of a [`Page`](super::Page).
    PageId
}

define_id! {
    /// Identifier of a [`ContentBlock`](super::ContentBlock).
    ContentBlockId
}

define_id! {
    /// Identifier of a [`NavigationItem`](super::NavigationItem).
    NavigationItemId
}

define_id! {
    /// Identifier of an [`AiBuilderSession`](super::AiBuilderSession).
    AiSessionId
}

define_id! {
    /// Identifier of a [`Template`](super::Template).
    TemplateId
}

define_id! {
    /// Identifier of a [`Feature`](super::Feature).
    FeatureId
}
