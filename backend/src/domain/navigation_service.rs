//! Navigation service: keeps each website's menu a forest.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use super::ports::NavigationRepository;
use super::service_support::{check_expected_revision, map_repository_error, not_found};
use super::{
    Error, NavigationError, NavigationForest, NavigationItem, NavigationItemCreate,
    NavigationItemId, NavigationItemUpdate, NewNavigationItem, WebsiteId, ensure_acyclic,
};

const ENTITY: &str = "navigation item";

fn map_navigation_error(error: NavigationError) -> Error {
    match error {
        NavigationError::ParentNotFound { parent } => {
            Error::referential_integrity(error.to_string())
                .with_details(json!({ "parentId": parent }))
        }
        NavigationError::WouldCycle { id, parent } => Error::consistency(error.to_string())
            .with_details(json!({ "id": id, "parentId": parent })),
        NavigationError::Cycle { ref ids } => {
            let details = json!({ "ids": ids });
            Error::consistency(error.to_string()).with_details(details)
        }
    }
}

/// Maintains navigation items and assembles menus.
#[derive(Clone)]
pub struct NavigationService<N> {
    items: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NavigationService<N> {
    /// Create a new service over the given repository.
    pub fn new(items: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { items, clock }
    }
}

impl<N> NavigationService<N>
where
    N: NavigationRepository,
{
    /// Add an item to a website's navigation.
    ///
    /// A parent must already belong to the same website.
    pub async fn add(
        &self,
        website_id: WebsiteId,
        draft: NavigationItemCreate,
    ) -> Result<NavigationItem, Error> {
        let new_item = NewNavigationItem::try_new(website_id, draft, self.clock.utc())?;
        if let Some(parent_id) = new_item.parent_id {
            let parent = self
                .items
                .find_by_id(parent_id)
                .await
                .map_err(|err| map_repository_error(ENTITY, err))?;
            if parent.is_none_or(|parent| parent.website_id != website_id) {
                return Err(map_navigation_error(NavigationError::ParentNotFound {
                    parent: parent_id,
                }));
            }
        }
        let item = self
            .items
            .create(&new_item)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        info!(item_id = %item.id, website_id = %website_id, "navigation item added");
        Ok(item)
    }

    /// Fetch an item.
    pub async fn get(&self, id: NavigationItemId) -> Result<NavigationItem, Error> {
        self.items
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?
            .ok_or_else(|| not_found(ENTITY, id))
    }

    /// Apply a partial update.
    ///
    /// A new parent is checked against the website's current items; a move
    /// that would make an item its own ancestor fails with
    /// [`ErrorCode::Consistency`](super::ErrorCode::Consistency). The
    /// repository repeats the walk at write time, so a concurrent move that
    /// invalidated this snapshot fails the same way.
    pub async fn update(
        &self,
        id: NavigationItemId,
        update: &NavigationItemUpdate,
        expected_revision: Option<u32>,
    ) -> Result<NavigationItem, Error> {
        let current = self.get(id).await?;
        check_expected_revision(expected_revision, current.revision)?;
        if let Some(parent) = update.parent_id
            && parent != current.parent_id
        {
            let siblings = self
                .items
                .list_by_website(current.website_id)
                .await
                .map_err(|err| map_repository_error(ENTITY, err))?;
            ensure_acyclic(&siblings, id, parent).map_err(map_navigation_error)?;
        }
        let next = current.apply(update, self.clock.utc())?;
        self.items
            .update(&next, current.revision)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        Ok(next)
    }

    /// Assemble a website's navigation trees.
    pub async fn forest(&self, website_id: WebsiteId) -> Result<NavigationForest, Error> {
        let items = self
            .items
            .list_by_website(website_id)
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        let forest = NavigationForest::build(items).map_err(map_navigation_error)?;
        if !forest.orphans().is_empty() {
            warn!(
                website_id = %website_id,
                orphans = ?forest.orphans(),
                "navigation items with missing parents promoted to roots"
            );
        }
        Ok(forest)
    }

    /// Remove an item; its children move up to its parent.
    pub async fn delete(&self, id: NavigationItemId) -> Result<(), Error> {
        let deleted = self
            .items
            .delete(id, self.clock.utc())
            .await
            .map_err(|err| map_repository_error(ENTITY, err))?;
        if deleted {
            Ok(())
        } else {
            Err(not_found(ENTITY, id))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Navigation service coverage.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockNavigationRepository;
    use crate::domain::service_test_support::{fixture_clock, sample_nav_item};
    use rstest::rstest;

    fn make_service(repo: MockNavigationRepository) -> NavigationService<MockNavigationRepository> {
        NavigationService::new(Arc::new(repo), fixture_clock())
    }

    fn chain() -> Vec<NavigationItem> {
        vec![
            sample_nav_item(1, 1, None),
            sample_nav_item(2, 1, Some(1)),
            sample_nav_item(3, 1, Some(2)),
        ]
    }

    #[rstest]
    #[tokio::test]
    async fn moving_an_ancestor_under_its_descendant_is_rejected() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Ok(Some(sample_nav_item(1, 1, None))));
        repo.expect_list_by_website().return_once(|_| Ok(chain()));
        repo.expect_update().never();
        let update = NavigationItemUpdate {
            parent_id: Some(Some(NavigationItemId::new(3))),
            ..NavigationItemUpdate::default()
        };

        let error = make_service(repo)
            .update(NavigationItemId::new(1), &update, None)
            .await
            .expect_err("cycle");

        assert_eq!(error.code(), ErrorCode::Consistency);
    }

    #[rstest]
    #[tokio::test]
    async fn label_only_update_skips_the_cycle_walk() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Ok(Some(sample_nav_item(2, 1, Some(1)))));
        repo.expect_list_by_website().never();
        repo.expect_update().return_once(|_, _| Ok(()));
        let update = NavigationItemUpdate {
            label: Some("Docs".to_owned()),
            ..NavigationItemUpdate::default()
        };

        let item = make_service(repo)
            .update(NavigationItemId::new(2), &update, Some(1))
            .await
            .expect("updated");

        assert_eq!(item.label, "Docs");
        assert_eq!(item.parent_id, Some(NavigationItemId::new(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn parent_from_another_website_is_referential() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_find_by_id()
            .return_once(|_| Ok(Some(sample_nav_item(7, 2, None))));
        repo.expect_create().never();
        let draft = NavigationItemCreate::link("Docs", "/docs").under(NavigationItemId::new(7));

        let error = make_service(repo)
            .add(WebsiteId::new(1), draft)
            .await
            .expect_err("foreign parent");

        assert_eq!(error.code(), ErrorCode::ReferentialIntegrity);
    }

    #[rstest]
    #[tokio::test]
    async fn forest_nests_children() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_list_by_website().return_once(|_| Ok(chain()));

        let forest = make_service(repo)
            .forest(WebsiteId::new(1))
            .await
            .expect("forest");

        let depths: Vec<usize> = forest.flatten().iter().map(|(depth, _)| *depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn stored_loop_fails_forest_assembly() {
        let mut repo = MockNavigationRepository::new();
        repo.expect_list_by_website().return_once(|_| {
            Ok(vec![
                sample_nav_item(1, 1, Some(2)),
                sample_nav_item(2, 1, Some(1)),
            ])
        });

        let error = make_service(repo)
            .forest(WebsiteId::new(1))
            .await
            .expect_err("loop");

        assert_eq!(error.code(), ErrorCode::Consistency);
    }
}
