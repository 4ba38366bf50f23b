//! Landing page view model assembled from the catalogue.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Feature, FeatureResponse, JsonObject};

/// A labelled link rendered in the header or footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LandingLink {
    /// Visible text.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// Static copy for the landing page, typically loaded from a fixture file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LandingContent {
    /// Hero banner content.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub hero_content: JsonObject,
    /// Ordered "how it works" steps.
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub how_it_works_steps: Vec<JsonObject>,
    /// Call-to-action content.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub cta_content: JsonObject,
    /// Header links.
    #[serde(default)]
    pub navigation_items: Vec<LandingLink>,
    /// Footer links.
    #[serde(default)]
    pub footer_links: Vec<LandingLink>,
}

/// Everything the marketing landing page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LandingPageData {
    /// Hero banner content.
    #[schema(value_type = Object)]
    pub hero_content: JsonObject,
    /// Active features in display order.
    pub features: Vec<FeatureResponse>,
    /// Ordered "how it works" steps.
    #[schema(value_type = Vec<Object>)]
    pub how_it_works_steps: Vec<JsonObject>,
    /// Call-to-action content.
    #[schema(value_type = Object)]
    pub cta_content: JsonObject,
    /// Header links.
    pub navigation_items: Vec<LandingLink>,
    /// Footer links.
    pub footer_links: Vec<LandingLink>,
}

impl LandingPageData {
    /// Combine static copy with catalogue features.
    ///
    /// Inactive features are dropped and the rest ordered by
    /// `(sort_order, id)`, whatever order they arrive in.
    pub fn assemble(content: LandingContent, features: &[Feature]) -> Self {
        let mut listed: Vec<&Feature> = features.iter().filter(|f| f.is_active).collect();
        listed.sort_by_key(|feature| feature.order_key());
        Self {
            hero_content: content.hero_content,
            features: listed.into_iter().map(FeatureResponse::from).collect(),
            how_it_works_steps: content.how_it_works_steps,
            cta_content: content.cta_content,
            navigation_items: content.navigation_items,
            footer_links: content.footer_links,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Landing page assembly coverage.
    use super::*;
    use crate::domain::{FeatureCreate, FeatureId, FeatureType};
    use chrono::{DateTime, Utc};
    use rstest::rstest;
    use serde_json::json;

    fn feature(id: i64, sort_order: i32, is_active: bool) -> Feature {
        let draft = FeatureCreate {
            name: format!("feature-{id}"),
            title: format!("Feature {id}"),
            description: "Does a thing".to_owned(),
            feature_type: FeatureType::Core,
            icon: None,
            sort_order,
            feature_metadata: JsonObject::new(),
        };
        let mut feature =
            Feature::create(FeatureId::new(id), draft, DateTime::<Utc>::UNIX_EPOCH)
                .expect("valid draft");
        feature.is_active = is_active;
        feature
    }

    #[rstest]
    fn lists_active_features_by_sort_order() {
        let features = vec![
            feature(1, 20, true),
            feature(2, 10, false),
            feature(3, 10, true),
            feature(4, 5, true),
        ];

        let data = LandingPageData::assemble(LandingContent::default(), &features);

        let ids: Vec<i64> = data.features.iter().map(|f| f.id.get()).collect();
        assert_eq!(ids, vec![4, 3, 1]);
    }

    #[rstest]
    fn copies_static_content_verbatim() {
        let content: LandingContent = serde_json::from_value(json!({
            "hero_content": {"headline": "Build a site in minutes"},
            "how_it_works_steps": [{"step": 1}, {"step": 2}],
            "footer_links": [{"label": "Privacy", "url": "/privacy"}],
        }))
        .expect("parses");

        let data = LandingPageData::assemble(content, &[]);

        assert_eq!(
            data.hero_content.get("headline"),
            Some(&json!("Build a site in minutes"))
        );
        assert_eq!(data.how_it_works_steps.len(), 2);
        let first_footer = data.footer_links.first().map(|l| l.url.as_str());
        assert_eq!(first_footer, Some("/privacy"));
        assert!(data.navigation_items.is_empty());
    }
}
