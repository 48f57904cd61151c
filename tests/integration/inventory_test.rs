//! Inventory integration tests using LocalStack.

use crate::common::{LocalStackTestContext, ddss_journal_key};
use ddss_error::Result;
use ddss_inventory::{
    Delivery, EventEnvelope, FirehoseDelivery, Inventory, InventoryConfig, ObjectLister,
    S3Config, S3JournalLister, create_s3_client,
};
use std::sync::{Arc, Mutex};

/// Delivery that keeps every batch for verification.
#[derive(Default, Clone)]
struct CollectingDelivery {
    batches: Arc<Mutex<Vec<Vec<String>>>>,
}

impl CollectingDelivery {
    fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Delivery for CollectingDelivery {
    async fn put_batch(&self, records: &[String]) -> Result<()> {
        self.batches.lock().unwrap().push(records.to_vec());
        Ok(())
    }

    fn name(&self) -> &str {
        "collecting"
    }
}

fn config(bucket: &str, stream: &str) -> InventoryConfig {
    InventoryConfig::new(bucket, stream, "ddss_meta", "ddss-inventory-it", "us-east-1")
}

async fn lister(ctx: &LocalStackTestContext, bucket: &str) -> S3JournalLister {
    let s3_config = S3Config::new(bucket)
        .with_region(&ctx.region)
        .with_endpoint(&ctx.endpoint)
        .with_credentials("test", "test");
    let client = create_s3_client(&s3_config).await.unwrap();
    S3JournalLister::new(client, bucket, None)
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_lister_keeps_only_journals() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "ddss-it-lister";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.empty_bucket(bucket).await.unwrap();

    let journal = ddss_journal_key("main", 1_700_000_100, 1_700_000_000, 1);
    ctx.put_object(bucket, &journal).await.unwrap();
    ctx.put_object(bucket, "main/db_1700000100_1700000000_1_A1B2C3D4/rawdata/slicesv2.dat")
        .await
        .unwrap();
    ctx.put_object(bucket, "main/db_1700000100_1700000000_1_A1B2C3D4/receipt.json")
        .await
        .unwrap();

    let listing = lister(&ctx, bucket).await.list_journal_keys().await.unwrap();

    assert_eq!(listing.objects_listed, 3);
    assert_eq!(listing.keys, vec![journal]);

    ctx.empty_bucket(bucket).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_lister_missing_bucket_fails() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let err = lister(&ctx, "ddss-it-does-not-exist")
        .await
        .list_journal_keys()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("ddss-it-does-not-exist"));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_inventory_batches_201_journals() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "ddss-it-batching";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.empty_bucket(bucket).await.unwrap();

    for i in 0..201 {
        let earliest = 1_700_000_000 + i as i64 * 3_600;
        let key = ddss_journal_key("firewall", earliest + 3_599, earliest, i);
        ctx.put_object(bucket, &key).await.unwrap();
    }

    let delivery = CollectingDelivery::default();
    let inventory = Inventory::new(
        lister(&ctx, bucket).await,
        delivery.clone(),
        config(bucket, "collecting"),
    );

    let stats = inventory.run().await.unwrap();

    let batches = delivery.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 200);
    assert_eq!(batches[1].len(), 1);
    assert_eq!(stats.records_delivered, 201);

    let event: EventEnvelope = serde_json::from_str(&batches[0][0]).unwrap();
    assert_eq!(event.event.index, "firewall");
    assert_eq!(event.event.s3_bucket, bucket);

    ctx.empty_bucket(bucket).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_inventory_delivers_to_firehose() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "ddss-it-firehose-source";
    let sink = "ddss-it-firehose-sink";
    let stream = "ddss-it-stream";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.create_bucket(sink).await.unwrap();
    ctx.empty_bucket(bucket).await.unwrap();
    ctx.create_delivery_stream(stream, sink).await.unwrap();

    for i in 0..3 {
        let key = ddss_journal_key("main", 1_700_000_100 + i as i64, 1_700_000_000, i);
        ctx.put_object(bucket, &key).await.unwrap();
    }

    let delivery = FirehoseDelivery::with_client(ctx.firehose.clone(), stream);
    let inventory = Inventory::new(lister(&ctx, bucket).await, delivery, config(bucket, stream));

    let stats = inventory.run().await.unwrap();

    assert_eq!(stats.batches_delivered, 1);
    assert_eq!(stats.records_delivered, 3);

    ctx.empty_bucket(bucket).await.ok();
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_inventory_empty_bucket_delivers_nothing() {
    let ctx = LocalStackTestContext::new().await;

    if !ctx.is_available().await {
        eprintln!("LocalStack not available, skipping test");
        return;
    }

    let bucket = "ddss-it-empty";
    ctx.create_bucket(bucket).await.unwrap();
    ctx.empty_bucket(bucket).await.unwrap();

    let delivery = CollectingDelivery::default();
    let inventory = Inventory::new(
        lister(&ctx, bucket).await,
        delivery.clone(),
        config(bucket, "collecting"),
    );

    let stats = inventory.run().await.unwrap();

    assert!(delivery.batches().is_empty());
    assert_eq!(stats.journals_found, 0);
}
