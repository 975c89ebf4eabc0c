use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;

use shared_database::DocumentStore;

/// Resolve display names for a set of profile ids with one concurrent
/// lookup per id. Lookups carry no ordering guarantee but all complete
/// before this returns; ids whose profile is gone are simply absent from
/// the map, and callers fall back to a sentinel ("Unknown").
pub async fn display_names(
    store: &Arc<dyn DocumentStore>,
    collection: &str,
    ids: impl IntoIterator<Item = String>,
) -> HashMap<String, String> {
    let lookups = ids.into_iter().map(|id| {
        let store = store.clone();
        let collection = collection.to_string();
        async move {
            let name = store
                .get(&collection, &id)
                .await
                .ok()
                .flatten()
                .and_then(|doc| doc.get("name").and_then(Value::as_str).map(str::to_string));
            (id, name)
        }
    });

    join_all(lookups)
        .await
        .into_iter()
        .filter_map(|(id, name)| name.map(|name| (id, name)))
        .collect()
}
