//! Integration tests for a full planning session.
//!
//! These tests verify the end-to-end flow:
//! 1. LoadProjectHandler reads and parses the project files
//! 2. A PlanningSession collects regions, budget and targets
//! 3. RunOptimizerHandler validates, calls the optimizer, builds output
//!
//! Uses in-memory adapters so no OptiPass server is needed.

use serde_json::json;
use std::sync::Arc;

use tidegate_planner::adapters::{InMemoryProjectReader, ProjectFiles, ScriptedOptimizer};
use tidegate_planner::application::{
    LoadProjectCommand, LoadProjectHandler, ProjectContext, RunError, RunOptimizerHandler,
};
use tidegate_planner::domain::budget::{BudgetKind, BudgetSchedule, BudgetTriple};
use tidegate_planner::domain::foundation::TargetId;
use tidegate_planner::domain::results::{Cell, OptimizerRawResult, NET_GAIN_COLUMN};
use tidegate_planner::domain::run::RunValidationError;
use tidegate_planner::domain::session::{SessionDefaults, TargetMode};
use tidegate_planner::domain::target::ColumnMapping;
use tidegate_planner::ports::TargetFiles;

// =============================================================================
// Test Infrastructure
// =============================================================================

const BARRIERS: &str = "\
ID,region,cost,DSID,type,X,Y
A1,Alsea,600000,,Tide Gate,10.0,20.0
A2,Alsea,400000,A1,Culvert,11.0,21.0
S1,Siuslaw,500000,,Tide Gate,30.0,40.0
";

const TARGETS: &str = "\
abbrev,long,short,label,infra
CO,Coho Salmon,Coho,Coho habitat (miles),0
FI,Fish Habitat,Fish,Fish habitat (miles),0
";

fn project_files() -> ProjectFiles {
    ProjectFiles {
        barriers: BARRIERS.to_string(),
        targets: TargetFiles {
            targets: TARGETS.to_string(),
            layout: "CO FI\n".to_string(),
        },
        mapping: ColumnMapping::new(
            Some("climate".to_string()),
            vec!["current.csv".to_string(), "future.csv".to_string()],
        ),
        map_info: r#"{"map_type": "TiledMap", "map_title": "Central Coast"}"#.to_string(),
    }
}

async fn load_project() -> Arc<ProjectContext> {
    let reader = InMemoryProjectReader::new().with_project("coast", project_files());
    LoadProjectHandler::new(Arc::new(reader), "http://localhost:8000")
        .handle(LoadProjectCommand {
            project: "coast".to_string(),
            initial_tab: 2,
        })
        .await
        .expect("project should load")
}

fn optimizer_answer() -> OptimizerRawResult {
    serde_json::from_value(json!({
        "summary": [
            {"budget": 0, "netgain": 0.0, "CO": 0.0, "FI": 0.0, "gates": []},
            {"budget": 500000, "netgain": 2.0, "CO": 1.5, "FI": 0.5, "gates": ["S1"]},
            {"budget": 1000000, "netgain": 3.5, "CO": 2.0, "FI": 1.5, "gates": ["A1", "S1"]}
        ],
        "matrix": [
            {"ID": "A1", "count": 1, "0": 0, "500000": 0, "1000000": 1, "CO": 0.5, "FI": 1.0},
            {"ID": "A2", "count": 0, "0": 0, "500000": 0, "1000000": 0, "CO": 0.1, "FI": 0.1},
            {"ID": "S1", "count": 2, "0": 0, "500000": 1, "1000000": 1, "CO": 1.5}
        ]
    }))
    .expect("answer should decode")
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn region_totals_drive_basic_budget() {
    let project = load_project().await;
    assert_eq!(project.region_names(), vec!["Alsea", "Siuslaw"]);

    let mut session = project.new_session();
    session.toggle_region("Alsea").unwrap();
    session.toggle_region("Siuslaw").unwrap();
    assert_eq!(session.total_cost(), 1_500_000.0);

    let basic = session.budget_mut().basic_mut().unwrap();
    basic.select_highest();
    assert_eq!(basic.selected().label, "$1M");
    assert_eq!(session.budget().values(), BudgetTriple::new(0, 100_000, 10));
}

#[tokio::test]
async fn full_run_produces_tables_and_curves() {
    let project = load_project().await;
    let optimizer = ScriptedOptimizer::new().with_result(optimizer_answer());
    let handler = RunOptimizerHandler::new(Arc::new(optimizer.clone()));

    let mut session = project.new_session();
    session.toggle_region("Alsea").unwrap();
    session.toggle_region("Siuslaw").unwrap();
    session.budget_mut().basic_mut().unwrap().select("$1M");
    session.targets_mut().toggle(TargetId::from("CO"));
    session.targets_mut().toggle(TargetId::from("FI"));

    let output = handler.handle(&mut session, &project).await.unwrap();

    // Request
    let sent = &optimizer.calls()[0];
    assert_eq!(sent.regions, vec!["Alsea", "Siuslaw"]);
    assert_eq!(sent.budget, BudgetTriple::new(0, 100_000, 10));
    assert_eq!(sent.weights, None);

    // Summary
    let summary = &output.budget_summary;
    assert!(summary.has_net_gain());
    assert_eq!(summary.column_count(), 3 + 2);
    assert_eq!(summary.columns[1], NET_GAIN_COLUMN);
    assert_eq!(summary.rows[2].barrier_count, 2);

    // Detail: zero-count barriers dropped, highest count first
    let detail = &output.barrier_detail;
    let ids: Vec<&str> = detail.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["S1", "A1"]);
    let fish = detail.column("Fish").unwrap();
    assert_eq!(detail.rows[0].cells[fish], Cell::Missing);
    assert!(detail.column("$500K").is_some());

    // Curves
    let labels: Vec<&str> = output.chart_series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Net", "Coho", "Fish"]);

    assert_eq!(
        output.title,
        "Regions: Alsea, Siuslaw; Targets: Coho, Fish; Budgets: $100K to $1M"
    );
    assert_eq!(session.last_output(), Some(&output));
}

#[tokio::test]
async fn weighted_targets_and_mapping_reach_optimizer() {
    let project = load_project().await;
    let optimizer = ScriptedOptimizer::new().with_result(optimizer_answer());
    let handler = RunOptimizerHandler::new(Arc::new(optimizer.clone()));

    let mut session = project.new_session();
    session.toggle_region("Siuslaw").unwrap();
    session.budget_mut().activate(BudgetKind::Fixed);
    session.budget_mut().fixed_mut().unwrap().set_text("$500K");
    session.set_target_mode(TargetMode::Weighted);
    session.targets_mut().set_weight(TargetId::from("CO"), "3");
    session.targets_mut().set_weight(TargetId::from("FI"), "1");
    session.set_mapping(Some("future"), &project.mapping).unwrap();

    let output = handler.handle(&mut session, &project).await.unwrap();

    let sent = &optimizer.calls()[0];
    assert_eq!(sent.weights, Some(vec![3, 1]));
    assert_eq!(sent.mapping.as_deref(), Some("future"));
    assert_eq!(sent.budget, BudgetTriple::new(500_000, 0, 1));

    // Single budget: no curves
    assert!(output.chart_series.is_empty());
    assert!(output.title.contains("Targets: Coho ⨉ 3, Fish ⨉ 1"));
    assert!(output.title.contains("Climate: future"));
    assert!(output.title.ends_with("Budget: $500K"));
}

#[tokio::test]
async fn bad_weights_are_rejected_before_calling_optimizer() {
    let project = load_project().await;
    let optimizer = ScriptedOptimizer::new();
    let handler = RunOptimizerHandler::new(Arc::new(optimizer.clone()));

    let mut session = project.new_session();
    session.toggle_region("Alsea").unwrap();
    session.budget_mut().basic_mut().unwrap().select("$500K");
    session.set_target_mode(TargetMode::Weighted);
    session.targets_mut().set_weight(TargetId::from("CO"), "0");
    session.targets_mut().set_weight(TargetId::from("FI"), "3");

    let err = handler.handle(&mut session, &project).await.unwrap_err();

    assert_eq!(
        err,
        RunError::Validation(RunValidationError::InvalidWeights {
            values: vec!["0".to_string(), "3".to_string()],
        })
    );
    assert_eq!(optimizer.call_count(), 0);
}

#[tokio::test]
async fn no_solution_reason_passes_through_with_hint() {
    let project = load_project().await;
    let optimizer = ScriptedOptimizer::new().with_rejection("No solution");
    let handler = RunOptimizerHandler::new(Arc::new(optimizer));

    let mut session = project.new_session();
    session.apply_defaults(&SessionDefaults {
        regions: vec!["Alsea".to_string()],
        budget: 500_000,
        targets: vec![TargetId::from("CO")],
    });

    let err = handler.handle(&mut session, &project).await.unwrap_err();

    assert_eq!(err.to_string(), "optimizer rejected the run: No solution");
    assert_eq!(err.hint(), Some("try increasing the maximum budget"));
    assert!(session.last_output().is_none());
}
