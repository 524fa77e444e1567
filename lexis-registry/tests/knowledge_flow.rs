//! End-to-end flows: mint → update → transfer → SIP009 queries, plus
//! restart from a sqlite-backed configuration.

use std::sync::Arc;

use lexis_registry::testing::{TestEnv, ALICE, BOB, CHARLIE};
use lexis_registry::{
    Context, ExecuteMsg, MemorySink, QueryMsg, Registry, RegistryConfig, RegistryError,
};
use lexis_types::{Knowledge, LexisError, Principal, RegistryEvent};
use proptest::prelude::*;

const TOPIC: &str = "AI Ethics";
const DATA: &str = "AI systems should be designed with ethical considerations in mind.";
const URI: &str = "https://example.com/ai-ethics";

#[test]
fn mint_first_token_to_wallet() {
    let mut env = TestEnv::new();
    let id = env.registry.mint(&Context::new(ALICE), TOPIC, DATA, URI).unwrap();

    assert_eq!(id, 1);
    assert_eq!(env.registry.get_balance(&ALICE).unwrap(), 1);
    assert_eq!(
        env.events(),
        vec![RegistryEvent::Mint {
            id: 1,
            owner: ALICE,
            class: "ai-assistant".to_string(),
            asset: "ai-knowledge".to_string(),
        }]
    );
}

#[test]
fn owner_updates_knowledge_data() {
    let mut env = TestEnv::new();
    let ctx = env.ctx(ALICE);
    let id = env
        .registry
        .mint(&ctx, TOPIC, "Initial data about AI ethics.", URI)
        .unwrap();

    let updated = "Updated data about AI ethics and its importance.";
    assert!(env.registry.update(&ctx, id, updated).unwrap());
    assert_eq!(
        env.registry.get_knowledge(id),
        Some(Knowledge::new(TOPIC, updated, URI))
    );
}

#[test]
fn non_owner_cannot_update() {
    let mut env = TestEnv::new();
    let id = env
        .registry
        .mint(&Context::new(ALICE), TOPIC, "Initial data about AI ethics.", URI)
        .unwrap();

    let err = env
        .registry
        .update(&Context::new(BOB), id, "Attempt to update by non-owner.")
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Lexis(LexisError::NotTokenOwner { id: 1 })
    ));
    assert_eq!(err.code(), Some(101));
    assert_eq!(
        env.registry.get_knowledge(id).unwrap().data,
        "Initial data about AI ethics."
    );
}

#[test]
fn anyone_can_read_knowledge() {
    let mut env = TestEnv::new();
    let id = env.registry.mint(&Context::new(ALICE), TOPIC, DATA, URI).unwrap();

    for reader in [ALICE, BOB, CHARLIE] {
        let resp = env
            .registry
            .query(&Context::new(reader), QueryMsg::GetKnowledge { id })
            .unwrap();
        let knowledge: Option<Knowledge> = resp.decode().unwrap();
        let knowledge = knowledge.unwrap();
        assert_eq!(knowledge.topic, TOPIC);
        assert_eq!(knowledge.data, DATA);
    }
}

#[test]
fn sip009_surface() {
    let mut env = TestEnv::new();
    let id = env.registry.mint(&Context::new(ALICE), TOPIC, DATA, URI).unwrap();

    assert_eq!(env.registry.get_last_token_id().unwrap(), 1);
    assert_eq!(env.registry.get_token_owner(id).unwrap(), Some(ALICE));
    assert_eq!(env.registry.get_balance(&ALICE).unwrap(), 1);
    assert_eq!(env.registry.get_token_uri(id).unwrap().as_deref(), Some(URI));

    assert!(env
        .registry
        .transfer(&Context::new(ALICE), id, ALICE, BOB)
        .unwrap());
    assert_eq!(env.registry.get_token_owner(id).unwrap(), Some(BOB));
    assert_eq!(env.registry.get_balance(&ALICE).unwrap(), 0);
    assert_eq!(env.registry.get_balance(&BOB).unwrap(), 1);

    // The previous owner has lost every mutation right.
    assert!(env
        .registry
        .update(&Context::new(ALICE), id, "y")
        .unwrap_err()
        .is_not_token_owner());
    assert!(env
        .registry
        .transfer(&Context::new(ALICE), id, ALICE, CHARLIE)
        .unwrap_err()
        .is_not_token_owner());
}

#[test]
fn byte_level_dispatch() {
    let mut env = TestEnv::new();
    let mint = ExecuteMsg::Mint {
        topic: TOPIC.to_string(),
        data: DATA.to_string(),
        uri: URI.to_string(),
    }
    .to_bytes()
    .unwrap();

    let msg = ExecuteMsg::from_bytes(&mint).unwrap();
    let resp = env.registry.execute(&Context::new(BOB), msg).unwrap();
    assert_eq!(resp.decode::<u64>().unwrap(), 1);
    assert_eq!(resp.events()[0].attribute("id").as_deref(), Some("1"));

    let query = QueryMsg::GetBalance { owner: BOB }.to_bytes().unwrap();
    let resp = env
        .registry
        .query(&Context::new(ALICE), QueryMsg::from_bytes(&query).unwrap())
        .unwrap();
    assert_eq!(resp.decode::<u64>().unwrap(), 1);
}

#[test]
fn sqlite_registry_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = RegistryConfig::default();
    config.storage.db_type = "sqlite".to_string();
    config.storage.data_dir = tmp.path().to_string_lossy().into_owned();
    config.collection.class = "archive".to_string();

    {
        let sink = Arc::new(MemorySink::new());
        let mut reg = Registry::open(&config, sink.clone()).unwrap();
        reg.mint(&Context::new(ALICE), TOPIC, DATA, URI).unwrap();
        reg.mint(&Context::new(BOB), "second", "two", "uri-2").unwrap();
        reg.update(&Context::new(ALICE), 1, "revised").unwrap();
        reg.transfer(&Context::new(BOB), 2, BOB, ALICE).unwrap();
        assert_eq!(sink.events()[0].attribute("class").as_deref(), Some("archive"));
    }

    let mut reg = Registry::open(&config, Arc::new(MemorySink::new())).unwrap();
    assert_eq!(reg.get_last_token_id().unwrap(), 2);
    assert_eq!(reg.get_knowledge(1).unwrap().data, "revised");
    assert_eq!(reg.tokens_of(&ALICE), vec![1, 2]);
    assert_eq!(reg.mint(&Context::new(CHARLIE), "t", "d", "u").unwrap(), 3);
}

#[derive(Debug, Clone)]
enum Op {
    Mint(u8),
    Update(u8, u64),
    Transfer(u8, u64, u8, u8),
}

fn principal(n: u8) -> Principal {
    [n % 4 + 1; 20]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Mint),
        (any::<u8>(), 0u64..12).prop_map(|(c, id)| Op::Update(c, id)),
        (any::<u8>(), 0u64..12, any::<u8>(), any::<u8>())
            .prop_map(|(c, id, f, t)| Op::Transfer(c, id, f, t)),
    ]
}

proptest! {
    #[test]
    fn prop_ids_dense_and_ownership_consistent(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut env = TestEnv::new();
        let mut mints = 0u64;

        for op in ops {
            match op {
                Op::Mint(c) => {
                    let id = env.registry.mint(&Context::new(principal(c)), "t", "d", "u").unwrap();
                    mints += 1;
                    prop_assert_eq!(id, mints);
                }
                Op::Update(c, id) => {
                    let caller = principal(c);
                    let before = env.registry.get_knowledge(id);
                    let owner = env.registry.get_token_owner(id).unwrap();
                    let result = env.registry.update(&Context::new(caller), id, "new");
                    if owner == Some(caller) {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(env.registry.get_knowledge(id).unwrap().data, "new");
                    } else {
                        prop_assert!(result.unwrap_err().is_not_token_owner());
                        prop_assert_eq!(env.registry.get_knowledge(id), before);
                    }
                }
                Op::Transfer(c, id, f, t) => {
                    let (caller, from, to) = (principal(c), principal(f), principal(t));
                    let owner = env.registry.get_token_owner(id).unwrap();
                    let result = env.registry.transfer(&Context::new(caller), id, from, to);
                    if caller == from && owner == Some(from) {
                        prop_assert!(result.is_ok());
                        prop_assert_eq!(env.registry.get_token_owner(id).unwrap(), Some(to));
                    } else {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(env.registry.get_token_owner(id).unwrap(), owner);
                    }
                }
            }

            prop_assert_eq!(env.registry.get_last_token_id().unwrap(), mints);
            let total: u64 = (0..4u8)
                .map(|n| env.registry.get_balance(&principal(n)).unwrap())
                .sum();
            prop_assert_eq!(total, mints);
        }
    }
}
