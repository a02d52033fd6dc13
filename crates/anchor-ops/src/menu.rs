use anchor_core::AnchorLinkSpec;

use crate::{AnchorStore, EntityId, PermalinkResolver};

/// A navigational link entity as supplied by the host menu system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: EntityId,
    pub url: String,
    /// Target identifier when the item points at a resolvable entity;
    /// `None` for custom links, whose original URL is the only base.
    pub target: Option<String>,
}

impl MenuItem {
    pub fn new(id: EntityId, url: impl Into<String>) -> Self {
        MenuItem {
            id,
            url: url.into(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Applies stored anchors to menu items at render time. Stateless beyond
/// the borrowed store and resolver; construct one per render pass.
pub struct MenuLinkService<'a, S, R>
where
    S: AnchorStore,
    R: PermalinkResolver,
{
    store: &'a S,
    resolver: &'a R,
}

impl<'a, S, R> MenuLinkService<'a, S, R>
where
    S: AnchorStore,
    R: PermalinkResolver,
{
    pub fn new(store: &'a S, resolver: &'a R) -> Self {
        MenuLinkService { store, resolver }
    }

    /// Final URL for one item. Items without a stored anchor pass through
    /// untouched; items with one get the anchor appended to the freshest
    /// base available.
    pub fn refresh_url(&self, item: &MenuItem) -> String {
        let token = match self.store.load(item.id) {
            Some(token) => token,
            None => return item.url.clone(),
        };

        let target_resolved_url = item
            .target
            .as_deref()
            .and_then(|target| self.resolver.resolve(target));

        AnchorLinkSpec {
            token,
            original_url: item.url.clone(),
            target_resolved_url,
        }
        .resolve()
    }

    /// Bulk update: rewrite every item's URL in place.
    pub fn refresh_all(&self, items: &mut [MenuItem]) {
        for item in items {
            item.url = self.refresh_url(item);
        }
    }
}
