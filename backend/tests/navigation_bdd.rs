//! Behaviour tests for navigation hierarchies.
use std::collections::HashMap;
use std::sync::Mutex;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use sitecraft::domain::{
    Error, NavigationForest, NavigationItem, NavigationItemCreate, NavigationItemUpdate, Website,
};

mod support;

use support::{SiteWorld, assert_error, unquote};

#[derive(Debug, Default)]
struct NavigationWorld {
    site: SiteWorld,
    website: Option<Website>,
    items: HashMap<String, NavigationItem>,
    forest: Option<NavigationForest>,
    update: Option<Result<NavigationItem, Error>>,
}

impl NavigationWorld {
    fn item(&self, label: &str) -> &NavigationItem {
        self.items
            .get(unquote(label))
            .unwrap_or_else(|| panic!("item {label} added"))
    }

    fn add(&mut self, label: &str, parent: Option<&str>) {
        let website_id = self.website.as_ref().expect("website created").id;
        let label = unquote(label);
        let mut draft = NavigationItemCreate::link(label, format!("/{}", label.to_lowercase()));
        if let Some(parent) = parent {
            draft = draft.under(self.item(parent).id);
        }
        let item = self
            .site
            .block_on(self.site.navigation().add(website_id, draft))
            .expect("add navigation item");
        self.items.insert(label.to_owned(), item);
    }

    fn forest(&self) -> &NavigationForest {
        self.forest.as_ref().expect("forest assembled")
    }

    fn depth_of(&self, label: &str) -> usize {
        self.forest()
            .flatten()
            .into_iter()
            .find(|(_, item)| item.label == unquote(label))
            .map(|(depth, _)| depth)
            .unwrap_or_else(|| panic!("{label} in forest"))
    }
}

#[fixture]
fn world() -> Mutex<NavigationWorld> {
    Mutex::new(NavigationWorld::default())
}

#[given("a website with a navigation item {label}")]
fn a_website_with_a_navigation_item(world: &Mutex<NavigationWorld>, label: String) {
    let mut world = world.lock().expect("world lock");
    world.website = Some(world.site.website("owner", None));
    world.add(&label, None);
}

#[given("an item {label} under {parent}")]
fn an_item_under(world: &Mutex<NavigationWorld>, label: String, parent: String) {
    let mut world = world.lock().expect("world lock");
    world.add(&label, Some(&parent));
}

#[when("{label} is moved under {parent}")]
fn is_moved_under(world: &Mutex<NavigationWorld>, label: String, parent: String) {
    let mut world = world.lock().expect("world lock");
    let id = world.item(&label).id;
    let update = NavigationItemUpdate {
        parent_id: Some(Some(world.item(&parent).id)),
        ..NavigationItemUpdate::default()
    };
    let outcome = world
        .site
        .block_on(world.site.navigation().update(id, &update, None));
    world.update = Some(outcome);
}

#[when("{label} is deleted")]
fn is_deleted(world: &Mutex<NavigationWorld>, label: String) {
    let world = world.lock().expect("world lock");
    let id = world.item(&label).id;
    world
        .site
        .block_on(world.site.navigation().delete(id))
        .expect("delete item");
}

#[when("the navigation forest is assembled")]
fn the_navigation_forest_is_assembled(world: &Mutex<NavigationWorld>) {
    let mut world = world.lock().expect("world lock");
    let website_id = world.website.as_ref().expect("website created").id;
    let forest = world
        .site
        .block_on(world.site.navigation().forest(website_id))
        .expect("assemble forest");
    world.forest = Some(forest);
}

#[then("the move fails with {code}")]
fn the_move_fails_with(world: &Mutex<NavigationWorld>, code: String) {
    let world = world.lock().expect("world lock");
    assert_error(world.update.as_ref(), &code);
}

#[then("{label} is still a top-level item")]
fn is_still_a_top_level_item(world: &Mutex<NavigationWorld>, label: String) {
    let world = world.lock().expect("world lock");
    let stored = world
        .site
        .block_on(world.site.navigation().get(world.item(&label).id))
        .expect("item stored");
    assert_eq!(stored.parent_id, None);
}

#[then("{label} is the only top-level item")]
fn is_the_only_top_level_item(world: &Mutex<NavigationWorld>, label: String) {
    let world = world.lock().expect("world lock");
    let roots: Vec<&str> = world
        .forest()
        .roots()
        .iter()
        .map(|node| node.item.label.as_str())
        .collect();
    assert_eq!(roots, [unquote(&label)]);
}

#[then("{label} sits at depth {depth}")]
fn sits_at_depth(world: &Mutex<NavigationWorld>, label: String, depth: usize) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.depth_of(&label), depth);
}

#[scenario(
    path = "tests/features/navigation.feature",
    name = "Moving an item under its own descendant is rejected"
)]
fn moving_an_item_under_its_descendant_is_rejected(world: Mutex<NavigationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation.feature",
    name = "The forest nests children under their parents"
)]
fn the_forest_nests_children(world: Mutex<NavigationWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/navigation.feature",
    name = "Deleting an item promotes its children"
)]
fn deleting_an_item_promotes_its_children(world: Mutex<NavigationWorld>) {
    drop(world);
}
