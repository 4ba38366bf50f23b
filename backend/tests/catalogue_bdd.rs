//! Behaviour tests for the template and feature catalogue.
//!
//! Exercises template usage counting, landing page feature ordering and
//! idempotent startup seeding from the bundled fixture.
use std::path::PathBuf;
use std::sync::Mutex;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sitecraft::domain::{
    FeatureCreate, FeatureType, JsonObject, LandingContent, LandingPageData, SeedOutcome, Template,
    TemplateCreate,
};
use sitecraft::seeding::seed_catalogue_on_startup;

mod support;

use support::{SiteWorld, unquote};

#[derive(Debug, Default)]
struct CatalogueWorld {
    site: SiteWorld,
    template: Option<Template>,
    landing: Option<LandingPageData>,
    second_run: Option<SeedOutcome>,
}

#[fixture]
fn world() -> Mutex<CatalogueWorld> {
    Mutex::new(CatalogueWorld::default())
}

fn feature(name: &str, sort_order: i32) -> FeatureCreate {
    FeatureCreate {
        name: name.to_owned(),
        title: format!("{name} title"),
        description: format!("{name} description"),
        feature_type: name.parse().unwrap_or(FeatureType::Core),
        icon: None,
        sort_order,
        feature_metadata: JsonObject::new(),
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("catalogue.json")
}

#[given("a template {name}")]
fn a_template(world: &Mutex<CatalogueWorld>, name: String) {
    let mut world = world.lock().expect("world lock");
    let draft = TemplateCreate {
        name: unquote(&name).to_owned(),
        title: "Business landing".to_owned(),
        description: "A landing page for small businesses".to_owned(),
        category: "business".to_owned(),
        preview_image: None,
        structure: JsonObject::new(),
        default_styling: JsonObject::new(),
        is_premium: false,
    };
    let template = world
        .site
        .block_on(world.site.catalogue().create_template(draft))
        .expect("create template");
    world.template = Some(template);
}

#[given("features {first} at {first_order}, {second} at {second_order} and {third} at {third_order}")]
fn features_at(
    world: &Mutex<CatalogueWorld>,
    first: String,
    first_order: i32,
    second: String,
    second_order: i32,
    third: String,
    third_order: i32,
) {
    let world = world.lock().expect("world lock");
    let catalogue = world.site.catalogue();
    for (name, order) in [
        (first, first_order),
        (second, second_order),
        (third, third_order),
    ] {
        world
            .site
            .block_on(catalogue.create_feature(feature(unquote(&name), order)))
            .expect("create feature");
    }
}

#[when("the template is used {times} times")]
fn the_template_is_used(world: &Mutex<CatalogueWorld>, times: usize) {
    let mut world = world.lock().expect("world lock");
    let id = world.template.as_ref().expect("template created").id;
    for _ in 0..times {
        let template = world
            .site
            .block_on(world.site.catalogue().record_usage(id))
            .expect("record usage");
        world.template = Some(template);
    }
}

#[when("the landing page is assembled")]
fn the_landing_page_is_assembled(world: &Mutex<CatalogueWorld>) {
    let mut world = world.lock().expect("world lock");
    let landing = world
        .site
        .block_on(world.site.catalogue().landing_page(LandingContent::default()))
        .expect("assemble landing page");
    world.landing = Some(landing);
}

#[when("the bundled catalogue is seeded twice")]
fn the_bundled_catalogue_is_seeded_twice(world: &Mutex<CatalogueWorld>) {
    let mut world = world.lock().expect("world lock");
    let catalogue = world.site.catalogue();
    let path = fixture_path();
    world
        .site
        .block_on(seed_catalogue_on_startup(&catalogue, &path))
        .expect("first seeding run");
    let (_, outcome) = world
        .site
        .block_on(seed_catalogue_on_startup(&catalogue, &path))
        .expect("second seeding run");
    world.second_run = Some(outcome);
}

#[then("the template usage count is {count}")]
fn the_template_usage_count_is(world: &Mutex<CatalogueWorld>, count: u32) {
    let world = world.lock().expect("world lock");
    let id = world.template.as_ref().expect("template created").id;
    let stored = world
        .site
        .block_on(world.site.catalogue().get_template(id))
        .expect("template stored");
    assert_eq!(stored.usage_count, count);
}

#[then("the landing features are {names}")]
fn the_landing_features_are(world: &Mutex<CatalogueWorld>, names: String) {
    let world = world.lock().expect("world lock");
    let landing = world.landing.as_ref().expect("landing assembled");
    let actual: Vec<&str> = landing
        .features
        .iter()
        .map(|feature| feature.name.as_str())
        .collect();
    let expected: Vec<&str> = names.split(',').map(|name| unquote(name.trim())).collect();
    assert_eq!(actual, expected);
}

#[then("the second run creates nothing")]
fn the_second_run_creates_nothing(world: &Mutex<CatalogueWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.second_run, Some(SeedOutcome::default()));
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Using a template increments its usage count"
)]
fn using_a_template_increments_its_usage_count(world: Mutex<CatalogueWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Landing features follow their sort order"
)]
fn landing_features_follow_their_sort_order(world: Mutex<CatalogueWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/catalogue.feature",
    name = "Seeding the bundled catalogue twice is harmless"
)]
fn seeding_the_bundled_catalogue_twice_is_harmless(world: Mutex<CatalogueWorld>) {
    drop(world);
}
