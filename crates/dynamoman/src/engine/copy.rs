//! Stage promotion: copying tables between stages with field rewriting.

use async_trait::async_trait;
use dynamoman_core::rewrite::{FieldPath, StageRewrite};
use dynamoman_core::stage::{derive_destination_name, filter_by_stage_suffix};
use dynamoman_core::storage::{Page, TableStore};
use tracing::{debug, info, warn};

use super::report::TransferReport;
use super::resolver::resolve_key_schema;
use super::scanner::{scan, PageHandler, ScanControl};
use crate::error::Result;

struct Copier<'a, S: ?Sized> {
    store: &'a S,
    destination: &'a str,
    rewrite: &'a StageRewrite,
    report: TransferReport,
}

#[async_trait]
impl<'a, S> PageHandler for Copier<'a, S>
where
    S: TableStore + ?Sized,
{
    async fn on_page(&mut self, page: &Page) -> Result<ScanControl> {
        self.report.pages += 1;

        for item in &page.items {
            let mut item = item.clone();
            self.report.rewritten += self.rewrite.apply(&mut item);
            self.store.put_item(self.destination, item).await?;
            self.report.items += 1;
        }

        debug!(
            destination = self.destination,
            copied = self.report.items,
            "Copied page"
        );
        Ok(ScanControl::Continue)
    }
}

/// Copies every item of `source` into `destination`, rewriting stage tokens.
///
/// Items are upserted with their full content; only the fields named by the
/// rewrite change.
pub async fn copy_table<S>(
    store: &S,
    source: &str,
    destination: &str,
    rewrite: &StageRewrite,
) -> Result<TransferReport>
where
    S: TableStore + ?Sized,
{
    resolve_key_schema(store, destination).await?;
    info!(
        source,
        destination,
        from = rewrite.from_token(),
        to = rewrite.to_token(),
        "Copying table"
    );

    let mut report = TransferReport::new(source);
    report.destination = Some(destination.to_string());
    let mut copier = Copier {
        store,
        destination,
        rewrite,
        report,
    };
    scan(store, source, &mut copier).await?;

    let report = copier.report;
    info!(
        source,
        destination,
        copied = report.items,
        rewritten = report.rewritten,
        "Copy finished"
    );
    Ok(report)
}

/// Copies every table ending with `from_suffix` to its `to_suffix` twin.
///
/// Tables are copied one after another; the first failure ends the run.
pub async fn copy_stage<S>(
    store: &S,
    from_suffix: &str,
    to_suffix: &str,
    paths: Vec<FieldPath>,
) -> Result<Vec<TransferReport>>
where
    S: TableStore + ?Sized,
{
    let rewrite = StageRewrite::from_stages(from_suffix, to_suffix, paths)?;
    let names = store.list_tables().await?;
    let sources = filter_by_stage_suffix(&names, from_suffix);
    info!(
        from = from_suffix,
        to = to_suffix,
        tables = sources.len(),
        "Copying stage"
    );

    let mut reports = Vec::with_capacity(sources.len());
    for source in sources {
        let destination = derive_destination_name(&source, from_suffix, to_suffix);
        if destination == source {
            warn!(table = %source, "Source and destination are the same table, skipping");
            continue;
        }
        reports.push(copy_table(store, &source, &destination, &rewrite).await?);
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::engine::fixtures::{item, s};
    use crate::error::EngineError;
    use crate::store::memory::MemoryStore;
    use dynamoman_core::item::{AttributeValue, Item};
    use dynamoman_core::rewrite::default_rewrite_paths;
    use dynamoman_core::schema::KeySchema;
    use dynamoman_core::storage::StoreError;

    fn quiz(id: &str) -> Item {
        let result: HashMap<String, AttributeValue> =
            [("thumbnail".to_string(), s("cdn/dev/r.png"))]
                .into_iter()
                .collect();
        let mut item = item(id, "cdn/dev/q.png");
        item.insert("results".to_string(), AttributeValue::L(vec![AttributeValue::M(result)]));
        item.insert("title".to_string(), s("dev notes"));
        item
    }

    async fn stage_store() -> MemoryStore {
        let store = MemoryStore::new().with_page_size(2);
        for name in ["quiz-dev", "quiz-prod", "users-dev", "users-prod", "audit"] {
            store.create_table(name, KeySchema::partition("id")).await;
        }
        store
            .insert("quiz-dev", (0..3).map(|i| quiz(&i.to_string())))
            .await
            .unwrap();
        store
            .insert("users-dev", [item("u1", "avatars/dev/u1.png")])
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_copy_table_rewrites_configured_fields_only() {
        let store = stage_store().await;
        let rewrite = StageRewrite::from_stages("-dev", "-prod", default_rewrite_paths()).unwrap();

        let report = copy_table(&store, "quiz-dev", "quiz-prod", &rewrite)
            .await
            .unwrap();

        assert_eq!(report.items, 3);
        assert_eq!(report.rewritten, 6);
        let copied = store.items("quiz-prod").await.unwrap();
        assert_eq!(copied.len(), 3);
        for item in &copied {
            assert_eq!(item["thumbnail"], s("cdn/prod/q.png"));
            assert_eq!(
                item["results"].as_l().unwrap()[0].as_m().unwrap()["thumbnail"],
                s("cdn/prod/r.png")
            );
            assert_eq!(item["title"], s("dev notes"));
        }
        assert_eq!(store.items("quiz-dev").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_copy_stage_maps_every_suffixed_table() {
        let store = stage_store().await;

        let reports = copy_stage(&store, "-dev", "-prod", default_rewrite_paths())
            .await
            .unwrap();

        let pairs: Vec<_> = reports
            .iter()
            .map(|r| (r.table.as_str(), r.destination.as_deref()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("quiz-dev", Some("quiz-prod")),
                ("users-dev", Some("users-prod"))
            ]
        );
        assert_eq!(
            store.items("users-prod").await.unwrap(),
            vec![item("u1", "avatars/prod/u1.png")]
        );
        assert!(store.items("audit").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_destination_fails_before_copying() {
        let store = stage_store().await;

        let result = copy_stage(&store, "-dev", "-staging", default_rewrite_paths()).await;

        assert!(matches!(
            result,
            Err(EngineError::Store(StoreError::TableNotFound { ref table })) if table == "quiz-staging"
        ));
    }

    #[tokio::test]
    async fn test_put_failure_is_fatal() {
        let store = stage_store().await;
        store.fail_writes_after("quiz-prod", 1).await;

        let result = copy_stage(&store, "-dev", "-prod", default_rewrite_paths()).await;

        assert!(matches!(
            result,
            Err(EngineError::Store(StoreError::PutFailed { .. }))
        ));
        assert_eq!(store.items("quiz-prod").await.unwrap().len(), 1);
        assert!(store.items("users-prod").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_stage_token_is_rejected() {
        let store = stage_store().await;

        let result = copy_stage(&store, "dev-", "-prod", default_rewrite_paths()).await;

        assert!(matches!(result, Err(EngineError::Rewrite(_))));
    }

    #[tokio::test]
    async fn test_same_stage_copies_nothing() {
        let store = stage_store().await;

        let reports = copy_stage(&store, "-dev", "-dev", default_rewrite_paths())
            .await
            .unwrap();

        assert!(reports.is_empty());
    }
}
