//! Port abstraction for navigation item persistence adapters.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NavigationError, NavigationItem, NavigationItemId, NewNavigationItem, WebsiteId, ensure_acyclic,
};

use super::{RepositoryError, references};

/// Port for storing navigation items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NavigationRepository: Send + Sync {
    /// Insert a new item.
    ///
    /// A missing website, or a parent that is not an item of the same
    /// website, fails with [`RepositoryError::MissingReference`].
    async fn create(&self, item: &NewNavigationItem) -> Result<NavigationItem, RepositoryError>;

    /// Fetch an item by identifier.
    async fn find_by_id(
        &self,
        id: NavigationItemId,
    ) -> Result<Option<NavigationItem>, RepositoryError>;

    /// List every item of a website ordered by identifier.
    async fn list_by_website(
        &self,
        website_id: WebsiteId,
    ) -> Result<Vec<NavigationItem>, RepositoryError>;

    /// Overwrite an item if its stored revision is still
    /// `expected_revision`.
    ///
    /// A changed parent is checked against the website's items as they stand
    /// at write time: a parent outside the website fails with
    /// [`RepositoryError::MissingReference`], a move that would close a loop
    /// with [`RepositoryError::Inconsistent`].
    async fn update(
        &self,
        item: &NavigationItem,
        expected_revision: u32,
    ) -> Result<(), RepositoryError>;

    /// Delete an item, moving its children up to its parent.
    ///
    /// Returns `Ok(false)` when the item did not exist.
    async fn delete(&self, id: NavigationItemId, now: DateTime<Utc>)
    -> Result<bool, RepositoryError>;
}

/// Check a reparenting against `items`, every stored item of the website.
///
/// Adapters call this while holding the website's navigation rows so the
/// walk and the write see the same hierarchy.
pub fn check_reparent(
    items: &[NavigationItem],
    id: NavigationItemId,
    parent: Option<NavigationItemId>,
) -> Result<(), RepositoryError> {
    ensure_acyclic(items, id, parent).map_err(|err| match err {
        NavigationError::ParentNotFound { .. } => {
            RepositoryError::missing_reference(references::NAVIGATION_PARENT)
        }
        NavigationError::WouldCycle { .. } | NavigationError::Cycle { .. } => {
            RepositoryError::inconsistent(err.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service_test_support::sample_nav_item;
    use rstest::rstest;

    fn chain() -> Vec<NavigationItem> {
        vec![
            sample_nav_item(1, 1, None),
            sample_nav_item(2, 1, Some(1)),
            sample_nav_item(3, 1, Some(2)),
        ]
    }

    #[rstest]
    #[case(3, Some(1), true)]
    #[case(1, None, true)]
    #[case(1, Some(3), false)]
    #[case(2, Some(2), false)]
    fn loops_are_reported_as_inconsistent(
        #[case] id: i64,
        #[case] parent: Option<i64>,
        #[case] allowed: bool,
    ) {
        let outcome = check_reparent(
            &chain(),
            NavigationItemId::new(id),
            parent.map(NavigationItemId::new),
        );

        if allowed {
            assert_eq!(outcome, Ok(()));
        } else {
            assert!(matches!(outcome, Err(RepositoryError::Inconsistent { .. })));
        }
    }

    #[rstest]
    fn unknown_parent_is_a_missing_reference() {
        let unknown = Some(NavigationItemId::new(9));

        let outcome = check_reparent(&chain(), NavigationItemId::new(1), unknown);

        assert_eq!(
            outcome,
            Err(RepositoryError::missing_reference(references::NAVIGATION_PARENT))
        );
    }
}
