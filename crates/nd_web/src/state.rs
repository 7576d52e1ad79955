use std::sync::Arc;
use nd_core::ArticleStore;
use nd_related::RelatedArticleFinder;

pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub finder: RelatedArticleFinder,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            finder: RelatedArticleFinder::new(store.clone()),
            store,
        }
    }
}
