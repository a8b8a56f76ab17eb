use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tickerlens_core::portfolio::entity::{HoldingDraft, HoldingId};
use tickerlens_core::store::error::StoreError;
use tickerlens_core::store::port::HoldingStore;
use tickerlens_store::holdings::MemoryHoldingStore;

fn draft(symbol: &str, quantity: Decimal, cost: Decimal) -> HoldingDraft {
    HoldingDraft {
        symbol: symbol.to_string(),
        quantity,
        cost_basis_per_unit: cost,
    }
}

/// # Summary
/// 持仓增删改与快照版本号。
#[tokio::test]
async fn test_holding_crud_bumps_version() -> anyhow::Result<()> {
    let store = MemoryHoldingStore::new();
    assert_eq!(store.snapshot().await?.version, 0);

    let msft = store.add(draft("msft", dec!(10), dec!(300))).await?;
    let aapl = store.add(draft("AAPL", dec!(5), dec!(150))).await?;
    assert_eq!(msft.symbol, "MSFT");

    let snapshot = store.snapshot().await?;
    assert_eq!(snapshot.version, 2);
    assert_eq!(snapshot.holdings.len(), 2);

    let edited = store.update(&msft.id, draft("MSFT", dec!(12), dec!(310))).await?;
    assert_eq!(edited.quantity, dec!(12));
    assert_eq!(edited.id, msft.id);

    let removed = store.remove(&aapl.id).await?;
    assert_eq!(removed.symbol, "AAPL");

    let snapshot = store.snapshot().await?;
    assert_eq!(snapshot.version, 4);
    assert_eq!(snapshot.holdings, vec![edited]);
    Ok(())
}

/// # Summary
/// 已取出的快照不受后续写入影响。
#[tokio::test]
async fn test_snapshot_is_isolated_from_later_writes() -> anyhow::Result<()> {
    let store = MemoryHoldingStore::new();
    store.add(draft("META", dec!(1), dec!(1))).await?;

    let before = store.snapshot().await?;
    store.add(draft("GOOGL", dec!(1), dec!(1))).await?;

    assert_eq!(before.holdings.len(), 1);
    assert_eq!(store.snapshot().await?.holdings.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_invalid_and_unknown_holdings() -> anyhow::Result<()> {
    let store = MemoryHoldingStore::new();

    let negative = store.add(draft("AAPL", dec!(-1), dec!(1))).await;
    assert!(matches!(negative, Err(StoreError::InvalidInput(_))));

    let missing = HoldingId("missing".to_string());
    let result = store.update(&missing, draft("AAPL", dec!(1), dec!(1))).await;
    assert_eq!(result, Err(StoreError::NotFound("missing".to_string())));
    assert!(matches!(store.remove(&missing).await, Err(StoreError::NotFound(_))));

    // 失败的写操作不改变版本号
    assert_eq!(store.snapshot().await?.version, 0);
    Ok(())
}

/// # Summary
/// 并发写入全部生效且版本号与写入次数一致。
#[tokio::test]
async fn test_concurrent_adds_are_serialized() -> anyhow::Result<()> {
    let store = Arc::new(MemoryHoldingStore::new());
    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.add(draft("AMZN", Decimal::from(i), dec!(100))).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let snapshot = store.snapshot().await?;
    assert_eq!(snapshot.version, 20);
    assert_eq!(snapshot.holdings.len(), 20);
    Ok(())
}
