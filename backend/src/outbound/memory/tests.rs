//! Behaviour of the in-memory adapter through the repository ports.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AiSessionRepository, ContentBlockRepository, NavigationRepository, PageRepository,
    TemplateRepository, UserRepository, WebsiteRepository, constraints, references,
};
use crate::domain::{
    AiBuilderRequest, BlockPosition, ContentBlockCreate, ContentType, JsonObject,
    NavigationItemCreate, NewAiSession, NewContentBlock, NewNavigationItem, NewPage, NewTemplate,
    NewUser, NewWebsite, PageCreate, TemplateCreate, UserCreate, WebsiteCreate,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn store() -> InMemorySiteStore {
    InMemorySiteStore::new()
}

async fn add_user(store: &InMemorySiteStore, name: &str) -> User {
    let draft = UserCreate {
        email: format!("{name}@example.com"),
        username: name.to_owned(),
        full_name: name.to_owned(),
    };
    UserRepository::create(store, &NewUser::try_new(draft, now()).expect("valid user"))
        .await
        .expect("user stored")
}

async fn add_website(store: &InMemorySiteStore, owner: UserId, domain: Option<&str>) -> Website {
    let mut draft = WebsiteCreate::named("Bakery");
    draft.domain = domain.map(str::to_owned);
    WebsiteRepository::create(
        store,
        &NewWebsite::try_new(owner, draft, now()).expect("valid website"),
    )
    .await
    .expect("website stored")
}

async fn add_page(store: &InMemorySiteStore, website: WebsiteId, slug: &str, home: bool) -> Page {
    let mut draft = PageCreate::new("Page", slug);
    draft.is_homepage = home;
    PageRepository::create(
        store,
        &NewPage::try_new(website, draft, now()).expect("valid page"),
    )
    .await
    .expect("page stored")
}

async fn add_block(store: &InMemorySiteStore, page: PageId, position: i32) -> ContentBlock {
    let draft = ContentBlockCreate::new(ContentType::Text, position);
    let block = NewContentBlock::try_new(page, draft, now()).expect("valid block");
    ContentBlockRepository::create(store, &block)
        .await
        .expect("block stored")
}

async fn add_session(
    store: &InMemorySiteStore,
    session_id: &str,
    owner: UserId,
    website_id: Option<WebsiteId>,
) -> AiBuilderSession {
    let request = AiBuilderRequest {
        prompt: "A bakery".to_owned(),
        website_id,
    };
    let session = NewAiSession::try_new(
        session_id.to_owned(),
        owner,
        request,
        JsonObject::new(),
        now(),
    )
    .expect("valid session");
    AiSessionRepository::create(store, &session)
        .await
        .expect("session stored")
}

async fn add_nav(
    store: &InMemorySiteStore,
    website: WebsiteId,
    parent: Option<NavigationItemId>,
) -> Result<NavigationItem, RepositoryError> {
    let mut draft = NavigationItemCreate::link("Item", "/item");
    draft.parent_id = parent;
    NavigationRepository::create(
        store,
        &NewNavigationItem::try_new(website, draft, now()).expect("valid item"),
    )
    .await
}

#[rstest]
#[tokio::test]
async fn duplicate_username_names_its_constraint(store: InMemorySiteStore) {
    add_user(&store, "ada").await;
    let draft = UserCreate {
        email: "other@example.com".to_owned(),
        username: "ada".to_owned(),
        full_name: "Other".to_owned(),
    };

    let error = UserRepository::create(&store, &NewUser::try_new(draft, now()).expect("valid"))
        .await
        .expect_err("duplicate");

    assert_eq!(
        error,
        RepositoryError::unique_violation(constraints::USERS_USERNAME)
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_domain_is_rejected(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    add_website(&store, owner.id, Some("example.com")).await;
    let draft = WebsiteCreate {
        domain: Some("example.com".to_owned()),
        ..WebsiteCreate::named("Copy")
    };

    let error = WebsiteRepository::create(
        &store,
        &NewWebsite::try_new(owner.id, draft, now()).expect("valid"),
    )
    .await
    .expect_err("taken");

    assert_eq!(
        error,
        RepositoryError::unique_violation(constraints::WEBSITES_DOMAIN)
    );
}

#[rstest]
#[tokio::test]
async fn stale_update_leaves_record_untouched(store: InMemorySiteStore) {
    let user = add_user(&store, "ada").await;
    let mut changed = user.clone();
    changed.full_name = "Changed".to_owned();
    changed.revision = 2;

    let error = UserRepository::update(&store, &changed, 7)
        .await
        .expect_err("stale");

    assert_eq!(error, RepositoryError::revision_mismatch(7_u32, 1_u32));
    let stored = UserRepository::find_by_id(&store, user.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored, user);
}

#[rstest]
#[tokio::test]
async fn blocks_come_back_in_position_order(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let page = add_page(&store, website.id, "home", false).await;
    for position in [3, 1, 2] {
        add_block(&store, page.id, position).await;
    }

    let blocks = store.list_by_page(page.id).await.expect("listed");

    let positions: Vec<i32> = blocks.iter().map(|b| b.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
}

#[rstest]
#[tokio::test]
async fn reorder_naming_a_foreign_block_changes_nothing(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let home = add_page(&store, website.id, "home", false).await;
    let about = add_page(&store, website.id, "about", false).await;
    let mine = add_block(&store, home.id, 1).await;
    let foreign = add_block(&store, about.id, 1).await;
    let moves = [
        BlockPosition {
            block_id: mine.id,
            position: 5,
        },
        BlockPosition {
            block_id: foreign.id,
            position: 6,
        },
    ];

    let error = store
        .reorder(home.id, &moves, now())
        .await
        .expect_err("foreign");

    assert!(matches!(error, RepositoryError::Inconsistent { .. }));
    let unchanged = ContentBlockRepository::find_by_id(&store, mine.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(unchanged.position, 1);
}

#[rstest]
#[tokio::test]
async fn reorder_bumps_revisions_and_returns_new_order(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let page = add_page(&store, website.id, "home", false).await;
    let first = add_block(&store, page.id, 1).await;
    let second = add_block(&store, page.id, 2).await;
    let moves = [
        BlockPosition {
            block_id: first.id,
            position: 2,
        },
        BlockPosition {
            block_id: second.id,
            position: 1,
        },
    ];

    let blocks = store
        .reorder(page.id, &moves, now())
        .await
        .expect("reordered");

    let ids: Vec<ContentBlockId> = blocks.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(blocks.iter().all(|b| b.revision == 2));
}

#[rstest]
#[tokio::test]
async fn new_homepage_demotes_previous(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let first = add_page(&store, website.id, "home", true).await;
    let second = add_page(&store, website.id, "welcome", true).await;

    let pages = PageRepository::list_by_website(&store, website.id)
        .await
        .expect("listed");

    let homes: Vec<PageId> = pages
        .iter()
        .filter(|p| p.is_homepage)
        .map(|p| p.id)
        .collect();
    assert_eq!(homes, vec![second.id]);
    assert_ne!(first.id, second.id);
}

#[rstest]
#[tokio::test]
async fn slug_is_unique_per_website_only(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let one = add_website(&store, owner.id, None).await;
    let two = add_website(&store, owner.id, None).await;
    add_page(&store, one.id, "about", false).await;
    add_page(&store, two.id, "about", false).await;

    let draft = PageCreate::new("Again", "about");
    let page = NewPage::try_new(one.id, draft, now()).expect("valid");

    let error = PageRepository::create(&store, &page)
        .await
        .expect_err("duplicate slug");

    assert_eq!(
        error,
        RepositoryError::unique_violation(constraints::PAGES_WEBSITE_SLUG)
    );
}

#[rstest]
#[tokio::test]
async fn parent_in_another_website_is_a_missing_reference(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let one = add_website(&store, owner.id, None).await;
    let two = add_website(&store, owner.id, None).await;
    let parent = add_nav(&store, one.id, None).await.expect("root");

    let error = add_nav(&store, two.id, Some(parent.id))
        .await
        .expect_err("foreign parent");

    assert_eq!(
        error,
        RepositoryError::missing_reference(references::NAVIGATION_PARENT)
    );
}

#[rstest]
#[tokio::test]
async fn deleting_a_navigation_item_splices_children(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let root = add_nav(&store, website.id, None).await.expect("root");
    let middle = add_nav(&store, website.id, Some(root.id))
        .await
        .expect("middle");
    let leaf = add_nav(&store, website.id, Some(middle.id))
        .await
        .expect("leaf");

    let deleted = NavigationRepository::delete(&store, middle.id, now())
        .await
        .expect("deleted");

    assert!(deleted);

    let moved = NavigationRepository::find_by_id(&store, leaf.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(moved.parent_id, Some(root.id));
    assert_eq!(moved.revision, 2);
}

#[rstest]
#[tokio::test]
async fn reparenting_into_a_descendant_is_rejected_at_write(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let root = add_nav(&store, website.id, None).await.expect("root");
    let child = add_nav(&store, website.id, Some(root.id))
        .await
        .expect("child");
    let mut moved = root.clone();
    moved.parent_id = Some(child.id);

    let error = NavigationRepository::update(&store, &moved, root.revision)
        .await
        .expect_err("loop");

    assert!(matches!(error, RepositoryError::Inconsistent { .. }));
    let stored = NavigationRepository::find_by_id(&store, root.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.parent_id, None);
}

#[rstest]
#[tokio::test]
async fn website_delete_cascades_and_detaches_sessions(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    let website = add_website(&store, owner.id, None).await;
    let page = add_page(&store, website.id, "home", true).await;
    let block = add_block(&store, page.id, 1).await;
    add_nav(&store, website.id, None).await.expect("nav");
    let session = add_session(&store, "s-1", owner.id, Some(website.id)).await;

    let deleted = WebsiteRepository::delete(&store, website.id)
        .await
        .expect("deleted");

    assert!(deleted);
    let page = PageRepository::find_by_id(&store, page.id)
        .await
        .expect("lookup");
    assert!(page.is_none());
    let block = ContentBlockRepository::find_by_id(&store, block.id)
        .await
        .expect("lookup");
    assert!(block.is_none());
    let navigation = NavigationRepository::list_by_website(&store, website.id)
        .await
        .expect("listed");
    assert!(navigation.is_empty());
    let detached = store
        .find_by_session_id(&session.session_id)
        .await
        .expect("lookup")
        .expect("kept");
    assert_eq!(detached.website_id, None);
}

#[rstest]
#[tokio::test]
async fn user_delete_removes_sessions(store: InMemorySiteStore) {
    let owner = add_user(&store, "ada").await;
    add_session(&store, "s-2", owner.id, None).await;

    let deleted = UserRepository::delete(&store, owner.id)
        .await
        .expect("deleted");

    assert!(deleted);
    let sessions = store.list_by_user(owner.id).await.expect("listed");
    assert!(sessions.is_empty());
}

#[rstest]
#[tokio::test]
async fn usage_count_only_goes_up(store: InMemorySiteStore) {
    let draft = TemplateCreate {
        name: "portfolio".to_owned(),
        title: "Portfolio".to_owned(),
        description: "Show your work".to_owned(),
        category: "personal".to_owned(),
        preview_image: None,
        structure: JsonObject::new(),
        default_styling: JsonObject::new(),
        is_premium: false,
    };
    let template = TemplateRepository::create(
        &store,
        &NewTemplate::try_new(draft, now()).expect("valid template"),
    )
    .await
    .expect("stored");

    let mut last = template.usage_count;
    for _ in 0..3 {
        let used = store
            .increment_usage(template.id, now())
            .await
            .expect("used");
        assert!(used.usage_count > last);
        last = used.usage_count;
    }
    assert_eq!(last, 3);
}
