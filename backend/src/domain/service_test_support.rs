//! Shared fixtures for the domain service unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use super::{
    Feature, FeatureCreate, FeatureId, FeatureType, JsonObject, NavigationItem,
    NavigationItemCreate, NavigationItemId, Page, PageCreate, PageId, User, UserCreate, UserId,
    Website, WebsiteCreate, WebsiteId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock that moves forward one second every time it is read.
pub(crate) struct SteppingClock(Mutex<DateTime<Utc>>);

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut guard = self.0.lock().expect("clock mutex");
        let now = *guard;
        *guard = now + TimeDelta::seconds(1);
        now
    }
}

/// First reading of [`fixture_clock`]; one minute after the sample records
/// were created.
pub(crate) fn clock_start() -> DateTime<Utc> {
    fixture_timestamp() + TimeDelta::minutes(1)
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(SteppingClock(Mutex::new(clock_start())))
}

pub(crate) fn sample_user(id: i64) -> User {
    User::create(
        UserId::new(id),
        UserCreate {
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            full_name: format!("User {id}"),
        },
        fixture_timestamp(),
    )
    .expect("valid user")
}

pub(crate) fn sample_website(id: i64, owner: i64) -> Website {
    Website::create(
        WebsiteId::new(id),
        UserId::new(owner),
        WebsiteCreate::named(format!("Site {id}")),
        fixture_timestamp(),
    )
    .expect("valid website")
}

pub(crate) fn sample_page(id: i64, website: i64, slug: &str) -> Page {
    Page::create(
        PageId::new(id),
        WebsiteId::new(website),
        PageCreate::new(format!("Page {id}"), slug),
        fixture_timestamp(),
    )
    .expect("valid page")
}

pub(crate) fn sample_nav_item(id: i64, website: i64, parent: Option<i64>) -> NavigationItem {
    let mut draft = NavigationItemCreate::link(format!("Item {id}"), format!("/item-{id}"));
    draft.parent_id = parent.map(NavigationItemId::new);
    NavigationItem::create(
        NavigationItemId::new(id),
        WebsiteId::new(website),
        draft,
        fixture_timestamp(),
    )
    .expect("valid navigation item")
}

pub(crate) fn sample_feature(id: i64, sort_order: i32) -> Feature {
    Feature::create(
        FeatureId::new(id),
        FeatureCreate {
            name: format!("feature-{id}"),
            title: format!("Feature {id}"),
            description: "Helps you ship".to_owned(),
            feature_type: FeatureType::Core,
            icon: None,
            sort_order,
            feature_metadata: JsonObject::new(),
        },
        fixture_timestamp(),
    )
    .expect("valid feature")
}
