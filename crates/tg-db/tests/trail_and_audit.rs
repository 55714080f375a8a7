//! Audit and JSONL trail integration tests.
//!
//! - Every mutation leaves one audit row per touched record
//! - Committed mutations are appended to `{team}.jsonl`
//! - Failed mutations leave neither audit rows nor trail lines

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tg_core::audit_detail::{ReorderedDetail, SiblingOrder};
use tg_core::enums::{AuditAction, EntityType, TrailOp};
use tg_core::identity::Actor;
use tg_db::repos::audit::AuditFilter;
use tg_db::service::ThinkgraphService;
use tg_db::updates::decision::{DecisionUpdateBuilder, NewDecision};
use tg_db::updates::option::NewOption;

async fn test_service_with_trail(trail_dir: &std::path::Path) -> ThinkgraphService {
    ThinkgraphService::new_local(":memory:", Some(trail_dir.to_path_buf()))
        .await
        .unwrap()
}

fn alice() -> Actor {
    Actor::new("usr-alice", "team-1")
}

#[tokio::test]
async fn mutations_are_audited_and_trailed_per_team() {
    let dir = TempDir::new().unwrap();
    let svc = test_service_with_trail(dir.path()).await;

    let root = svc.create_decision(&alice(), NewDecision::titled("Root")).await.unwrap();
    let child = svc
        .create_decision(&alice(), NewDecision::titled("Child").under(&root.id))
        .await
        .unwrap();
    svc.update_decision(
        &alice(),
        &child.id,
        DecisionUpdateBuilder::new().title("Renamed").build(),
    )
    .await
    .unwrap();
    svc.move_decision(&alice(), &child.id, None, 1.0).await.unwrap();
    svc.create_option(&alice(), NewOption::new(&root.id, "Do nothing"))
        .await
        .unwrap();

    let ops = svc.trail().read_team("team-1").unwrap();
    let kinds: Vec<(TrailOp, EntityType)> = ops.iter().map(|o| (o.op, o.entity)).collect();
    assert_eq!(
        kinds,
        vec![
            (TrailOp::Create, EntityType::Decision),
            (TrailOp::Create, EntityType::Decision),
            (TrailOp::Update, EntityType::Decision),
            (TrailOp::Move, EntityType::Decision),
            (TrailOp::Create, EntityType::Option),
        ]
    );
    assert!(ops.iter().all(|o| o.team == "team-1" && o.actor == "usr-alice"));
    assert_eq!(ops[3].data["to_path"], format!("/{}/", child.id));

    assert!(dir.path().join("team-1.jsonl").exists());
    assert!(!dir.path().join("team-2.jsonl").exists());

    let audit = svc.query_audit(&AuditFilter::for_team("team-1")).await.unwrap();
    assert_eq!(audit.len(), 5);
    assert_eq!(audit[0].entity_type, EntityType::Option);
    assert_eq!(audit[1].action, AuditAction::Moved);
}

#[tokio::test]
async fn reorder_writes_one_trail_line_for_the_batch() {
    let dir = TempDir::new().unwrap();
    let svc = test_service_with_trail(dir.path()).await;
    let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
    let b = svc.create_decision(&alice(), NewDecision::titled("B")).await.unwrap();

    svc.reorder_decisions(
        &alice(),
        &[
            SiblingOrder { id: b.id.clone(), order: 0.0 },
            SiblingOrder { id: a.id.clone(), order: 1.0 },
            SiblingOrder { id: "dec-missing0".into(), order: 2.0 },
        ],
    )
    .await
    .unwrap();

    let ops = svc.trail().read_team("team-1").unwrap();
    let last = ops.last().unwrap();
    assert_eq!(last.op, TrailOp::Reorder);
    assert_eq!(last.id, "");
    let detail: ReorderedDetail = serde_json::from_value(last.data.clone()).unwrap();
    assert_eq!(detail.applied.len(), 2);
    assert_eq!(detail.skipped, vec!["dec-missing0".to_string()]);

    // Nothing applied: no trail line.
    svc.reorder_decisions(&alice(), &[SiblingOrder { id: "dec-missing0".into(), order: 0.0 }])
        .await
        .unwrap();
    assert_eq!(svc.trail().read_team("team-1").unwrap().len(), ops.len());
}

#[tokio::test]
async fn failed_move_leaves_no_trace() {
    let dir = TempDir::new().unwrap();
    let svc = test_service_with_trail(dir.path()).await;
    let a = svc.create_decision(&alice(), NewDecision::titled("A")).await.unwrap();
    let b = svc
        .create_decision(&alice(), NewDecision::titled("B").under(&a.id))
        .await
        .unwrap();

    assert!(svc.move_decision(&alice(), &a.id, Some(&b.id), 0.0).await.is_err());

    assert_eq!(svc.trail().read_team("team-1").unwrap().len(), 2);
    assert_eq!(
        svc.query_audit(&AuditFilter::for_team("team-1")).await.unwrap().len(),
        2
    );
}
