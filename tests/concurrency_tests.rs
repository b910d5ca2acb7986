//! Concurrency integration tests
//!
//! These tests drive the ledger from many OS threads (and tokio worker
//! threads) at once and check that per-user mutations behave as if they had
//! run one at a time:
//! - same-user charges and uses never lose updates
//! - balances stay within `0..=max_point` under contention
//! - history always replays to the final balance
//! - lock-free readers never observe a record ahead of its balance

use point_ledger::{LedgerConfig, LedgerError, PointLedger, Points, TransactionKind, UserId};
use rstest::rstest;
use std::sync::Barrier;
use std::thread;

/// Run `count` closures on their own threads, released together by a barrier
fn run_together<F>(count: usize, f: F)
where
    F: Fn(usize) + Sync,
{
    let barrier = Barrier::new(count);
    thread::scope(|scope| {
        for i in 0..count {
            let barrier = &barrier;
            let f = &f;
            scope.spawn(move || {
                barrier.wait();
                f(i);
            });
        }
    });
}

fn assert_replays(ledger: &PointLedger, user_id: UserId) {
    let statement = ledger.statement(user_id);
    assert_eq!(
        statement.replayed_points(),
        statement.balance.points,
        "history of user {} does not replay to its balance",
        user_id
    );
}

#[rstest]
#[case::two_requests(2, 1_000)]
#[case::many_small(64, 10)]
#[case::many_large(32, 31_250)]
fn test_concurrent_charges_sum_exactly(#[case] threads: usize, #[case] amount: Points) {
    let ledger = PointLedger::default();

    run_together(threads, |_| {
        ledger.charge(1, amount).unwrap();
    });

    let statement = ledger.statement(1);
    assert_eq!(statement.balance.points, threads as Points * amount);
    assert_eq!(statement.history.len(), threads);
    assert!(statement
        .history
        .iter()
        .all(|r| r.kind == TransactionKind::Charge && r.amount == amount));
    assert_replays(&ledger, 1);
}

#[test]
fn test_concurrent_uses_drain_exactly() {
    let ledger = PointLedger::default();
    ledger.charge(1, 2_000).unwrap();

    run_together(2, |_| {
        ledger.use_points(1, 1_000).unwrap();
    });

    assert_eq!(ledger.get_balance(1).points, 0);
    assert_eq!(ledger.get_history(1).len(), 3);
}

#[test]
fn test_concurrent_charge_and_use_commute() {
    // Repeat on fresh users to cover both interleavings
    let ledger = PointLedger::default();
    let start: Points = 500;
    let charge: Points = 1_000;
    let use_amount: Points = 500;

    for user_id in 0..200u64 {
        ledger.charge(user_id, start).unwrap();

        run_together(2, |i| {
            if i == 0 {
                ledger.charge(user_id, charge).unwrap();
            } else {
                ledger.use_points(user_id, use_amount).unwrap();
            }
        });

        let statement = ledger.statement(user_id);
        assert_eq!(statement.balance.points, start + charge - use_amount);
        assert_eq!(statement.history.len(), 3);
        assert_replays(&ledger, user_id);
    }
}

#[test]
fn test_racing_charges_stop_at_limit() {
    let ledger = PointLedger::new(LedgerConfig::new(1_000));

    let outcomes: Vec<Result<Points, LedgerError>> = {
        let results = std::sync::Mutex::new(Vec::new());
        run_together(30, |_| {
            let result = ledger.charge(1, 100).map(|b| b.points);
            results.lock().unwrap().push(result);
        });
        results.into_inner().unwrap()
    };

    let accepted = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(accepted, 10);
    assert!(outcomes
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, LedgerError::LimitExceeded { limit: 1_000, .. })));
    assert_eq!(ledger.get_balance(1).points, 1_000);
    assert_eq!(ledger.get_history(1).len(), 10);
}

#[test]
fn test_mixed_contention_stays_in_bounds() {
    let max_point: Points = 10_000;
    let ledger = PointLedger::new(LedgerConfig::new(max_point));

    run_together(16, |i| {
        for step in 0..200 {
            let amount = ((i * 37 + step * 11) % 900 + 1) as Points;
            let result = if (i + step) % 3 == 0 {
                ledger.use_points(1, amount)
            } else {
                ledger.charge(1, amount)
            };

            match result {
                Ok(balance) => assert!((0..=max_point).contains(&balance.points)),
                Err(e) => assert!(e.is_rejection()),
            }
        }
    });

    let balance = ledger.get_balance(1);
    assert!((0..=max_point).contains(&balance.points));
    assert_replays(&ledger, 1);
}

#[test]
fn test_different_users_progress_independently() {
    let ledger = PointLedger::default();

    run_together(8, |i| {
        let user_id = i as UserId;
        for _ in 0..100 {
            ledger.charge(user_id, 3).unwrap();
        }
        for _ in 0..50 {
            ledger.use_points(user_id, 2).unwrap();
        }
    });

    for user_id in 0..8u64 {
        assert_eq!(ledger.get_balance(user_id).points, 200);
        assert_eq!(ledger.get_history(user_id).len(), 150);
        assert_replays(&ledger, user_id);
    }
    assert_eq!(ledger.statements().len(), 8);
}

#[test]
fn test_lock_free_readers_never_see_records_ahead_of_balance() {
    let ledger = PointLedger::default();

    run_together(5, |i| {
        if i < 4 {
            for _ in 0..250 {
                ledger.charge(1, 4).unwrap();
            }
        } else {
            let mut last_seen = 0;
            for _ in 0..1_000 {
                let history = ledger.get_history(1);
                let balance = ledger.get_balance(1).points;
                let replayed: Points = history.iter().map(|r| r.amount).sum();

                assert!(replayed <= balance, "history {} ahead of balance {}", replayed, balance);
                assert!(balance >= last_seen, "balance went backwards");
                assert_eq!(balance % 4, 0);
                last_seen = balance;
            }
        }
    });

    assert_eq!(ledger.get_balance(1).points, 4_000);
    assert_replays(&ledger, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_charges_from_tokio_tasks() {
    let ledger = PointLedger::default();

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.charge(42, 250) })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let statement = ledger.statement(42);
    assert_eq!(statement.balance.points, 25_000);
    assert_eq!(statement.history.len(), 100);

    let ids: Vec<u64> = statement.history.iter().map(|r| r.record_id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}
