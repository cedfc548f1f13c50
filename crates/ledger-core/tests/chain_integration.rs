use ledger_core::constants::GENESIS_PREVIOUS_HASH;
use ledger_core::{hash_block, Chain, LedgerError};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};

fn random_chain(rng: &mut StdRng, n: usize) -> Chain {
    let mut chain = Chain::new();
    for _ in 0..n {
        let len = rng.gen_range(0..40);
        let tx: String = (&mut *rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect();
        chain.append(tx, rng.gen());
    }
    chain
}

#[test]
fn test_demo_scenario() -> anyhow::Result<()> {
    let mut chain = Chain::new();

    chain.append("Alice to Bob", 123);
    assert_eq!(chain.latest().previous_hash, GENESIS_PREVIOUS_HASH);
    assert!(chain.verify());

    chain.append("Bob to Carol", 456);
    chain.append("Carol to Dave", 789);
    assert!(chain.verify());

    chain.try_mutate(1, "New transaction")?;
    assert!(!chain.verify());
    assert_eq!(chain.first_broken_link(), Some(2));
    Ok(())
}

#[test]
fn test_mutating_last_block_stays_valid() {
    let mut chain = Chain::new();
    chain.append("Alice to Bob", 123);
    chain.append("Bob to Carol", 456);
    chain.append("Carol to Dave", 789);

    chain.mutate(2, "New transaction");
    assert!(chain.verify());
}

#[test]
fn test_random_chains_verify_after_construction() {
    let mut rng = StdRng::seed_from_u64(42);
    for n in 0..50 {
        let chain = random_chain(&mut rng, n);
        assert_eq!(chain.len(), n);
        assert!(chain.verify(), "fresh chain of {n} blocks should verify");
        for block in chain.iter() {
            assert_eq!(
                block.current_hash,
                hash_block(&block.transaction, block.nonce, &block.previous_hash)
            );
        }
    }
}

#[test]
fn test_random_tamper_detected_at_successor() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let n = rng.gen_range(2..30);
        let mut chain = random_chain(&mut rng, n);
        let target = rng.gen_range(0..n);
        let original = chain.get(target).unwrap().transaction.clone();
        chain.mutate(target, format!("{original}!tampered"));

        // the mutated block itself always stays self-consistent
        assert!(chain.get(target).unwrap().is_consistent());
        if target == n - 1 {
            assert!(chain.verify());
            assert_eq!(chain.first_broken_link(), None);
        } else {
            assert!(!chain.verify());
            assert_eq!(chain.first_broken_link(), Some(target + 1));
        }
    }
}

#[test]
fn test_out_of_range_mutate_leaves_chain_unchanged() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut chain = random_chain(&mut rng, 10);
    let snapshot = chain.clone();

    chain.mutate(10, "nope");
    chain.mutate(1_000, "nope");
    assert_eq!(chain, snapshot);
    assert!(chain.verify());

    assert_eq!(
        chain.try_mutate(10, "nope"),
        Err(LedgerError::IndexOutOfRange { index: 10, len: 10 })
    );
    assert_eq!(chain, snapshot);
}

#[test]
fn test_tampered_chain_stays_invalid_after_appends() {
    let mut chain = Chain::new();
    chain.append("Alice to Bob", 123);
    chain.append("Bob to Carol", 456);
    chain.mutate(0, "Alice to Eve");
    assert!(!chain.verify());

    // new blocks link to the current tip, they do not repair older links
    chain.append("Carol to Dave", 789);
    assert!(!chain.verify());
    assert_eq!(chain.first_broken_link(), Some(1));
}

#[test]
fn test_json_dump_round_trip_preserves_validity() -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(99);
    let mut chain = random_chain(&mut rng, 5);
    chain.mutate(2, "forged");

    let json = serde_json::to_string_pretty(&chain)?;
    let restored: Chain = serde_json::from_str(&json)?;
    assert_eq!(restored, chain);
    assert_eq!(restored.first_broken_link(), Some(3));
    Ok(())
}
