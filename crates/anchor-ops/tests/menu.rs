use anchor_core::AnchorToken;
use anchor_ops::{
    AnchorPolicy, AnchorStore, EntityId, MemoryAnchorStore, MenuItem, MenuLinkService, OpsError,
    PermalinkResolver, SaveOutcome, StaticResolver,
};
use pretty_assertions::assert_eq;

fn service_fixture() -> (MemoryAnchorStore, StaticResolver) {
    let mut store = MemoryAnchorStore::new();
    store.save(1, Some("contact-section")).expect("save anchor");
    store.save(2, Some("  Our Team!! ")).expect("save anchor");

    let mut resolver = StaticResolver::new();
    resolver.insert("about", "https://example.com/about-us");

    (store, resolver)
}

#[test]
fn custom_link_items_replace_their_fragment() {
    let (store, resolver) = service_fixture();
    let service = MenuLinkService::new(&store, &resolver);

    let item = MenuItem::new(1, "https://example.com/landing#stale");
    assert_eq!(
        service.refresh_url(&item),
        "https://example.com/landing#contact-section"
    );
}

#[test]
fn page_items_survive_slug_renames() {
    let (store, resolver) = service_fixture();
    let service = MenuLinkService::new(&store, &resolver);

    // The stored URL predates a rename; the resolver supplies the
    // current permalink.
    let item = MenuItem::new(2, "https://example.com/old-about").with_target("about");
    assert_eq!(
        service.refresh_url(&item),
        "https://example.com/about-us#Our-Team"
    );
}

#[test]
fn unresolvable_targets_fall_back_to_the_original_url() {
    let (store, resolver) = service_fixture();
    let service = MenuLinkService::new(&store, &resolver);

    let item = MenuItem::new(1, "https://example.com/page").with_target("vanished");
    assert_eq!(
        service.refresh_url(&item),
        "https://example.com/page#contact-section"
    );
}

#[test]
fn items_without_anchors_pass_through() {
    let (store, resolver) = service_fixture();
    let service = MenuLinkService::new(&store, &resolver);

    let item = MenuItem::new(99, "https://example.com/plain#keep");
    assert_eq!(service.refresh_url(&item), "https://example.com/plain#keep");
}

#[test]
fn refresh_all_rewrites_in_place() {
    let (store, resolver) = service_fixture();
    let service = MenuLinkService::new(&store, &resolver);

    let mut items = vec![
        MenuItem::new(1, "https://example.com/a"),
        MenuItem::new(99, "https://example.com/b"),
        MenuItem::new(2, "https://example.com/c").with_target("about"),
    ];
    service.refresh_all(&mut items);

    assert_eq!(items[0].url, "https://example.com/a#contact-section");
    assert_eq!(items[1].url, "https://example.com/b");
    assert_eq!(items[2].url, "https://example.com/about-us#Our-Team");
}

#[test]
fn save_load_round_trip_preserves_canonical_value() {
    let mut store = MemoryAnchorStore::new();
    store.save(5, Some("  4 Easy Steps?? ")).expect("save");
    let token = store.load(5).expect("anchor present");
    assert_eq!(token.value(), Some("4-Easy-Steps"));
}

#[test]
fn policy_capped_store_feeds_capped_urls() {
    let mut store = MemoryAnchorStore::with_policy(AnchorPolicy::default().with_max_length(7));
    store.save(3, Some("Contact Section")).expect("save");

    let resolver = StaticResolver::new();
    let service = MenuLinkService::new(&store, &resolver);
    let item = MenuItem::new(3, "https://example.com/p");
    assert_eq!(service.refresh_url(&item), "https://example.com/p#Contact");
}

#[test]
fn fallible_stores_surface_persistence_errors() {
    // Hosts backed by real metadata storage can fail to write; the trait
    // carries that through `OpsError::Store`.
    struct ReadOnlyStore;
    impl AnchorStore for ReadOnlyStore {
        fn save(&mut self, entity: EntityId, _raw: Option<&str>) -> Result<SaveOutcome, OpsError> {
            Err(OpsError::Store {
                id: entity,
                message: "storage is read-only".to_string(),
            })
        }

        fn load(&self, _entity: EntityId) -> Option<AnchorToken> {
            None
        }
    }

    let mut store = ReadOnlyStore;
    let err = store.save(42, Some("top")).unwrap_err();
    assert!(matches!(err, OpsError::Store { id: 42, .. }));
    assert_eq!(
        err.to_string(),
        "failed to persist anchor for item 42: storage is read-only"
    );
}

#[test]
fn resolver_trait_objects_compose() {
    // A host can bring its own resolver; the service only needs the trait.
    struct RenamedEverything;
    impl PermalinkResolver for RenamedEverything {
        fn resolve(&self, _target: &str) -> Option<String> {
            Some("https://example.com/fresh".to_string())
        }
    }

    let mut store = MemoryAnchorStore::new();
    store.save(1, Some("top")).expect("save");
    let resolver = RenamedEverything;
    let service = MenuLinkService::new(&store, &resolver);

    let item = MenuItem::new(1, "https://example.com/stale#old").with_target("anything");
    assert_eq!(service.refresh_url(&item), "https://example.com/fresh#top");
}
