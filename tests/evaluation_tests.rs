//! Criteria evaluation integration tests.
//!
//! These tests drive contracts end to end through the world: spawn criteria
//! on initiation, flip flags while active, and check which groups fire.

use std::cell::RefCell;
use std::rc::Rc;

use contract_criteria::contracts::ContractStatus;
use contract_criteria::core::{
    ContractCriteriaConfig, CriteriaGroupDefinition, EntityId, GroupCatalog, GroupId,
};
use contract_criteria::criteria::{ManualCriterion, TimerCriterion};
use contract_criteria::effects::{BoundEffect, ContractEffect, HandlerContext};
use contract_criteria::engine::ContractWorld;
use contract_criteria::events::ContractEvent;
use contract_criteria::spawning::PrototypeCatalog;

fn prototypes() -> PrototypeCatalog {
    PrototypeCatalog::new()
        .with_criterion("flag", || ManualCriterion::new("Flag"))
        .with_criterion("deadline", || TimerCriterion::new(3))
}

fn catalog() -> GroupCatalog {
    GroupCatalog::new()
        .with_group(
            CriteriaGroupDefinition::all("payment").with_effect(ContractEffect::FinalizeContract),
        )
        .with_group(
            CriteriaGroupDefinition::any("breach").with_effect(ContractEffect::BreachContract),
        )
        .with_group(
            CriteriaGroupDefinition::all("bonus").with_effect(ContractEffect::GrantBonus { amount: 10 }),
        )
        .with_group(
            CriteriaGroupDefinition::any("alarm").with_effect(ContractEffect::custom("alarm")),
        )
}

/// Records every dispatched effect.
fn recorder(world: &mut ContractWorld) -> Rc<RefCell<Vec<BoundEffect>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    world.subscribe(move |bound: &BoundEffect, _: &mut HandlerContext| {
        sink.borrow_mut().push(bound.clone());
    });
    seen
}

fn active(world: &mut ContractWorld, config: ContractCriteriaConfig) -> EntityId {
    let contract = world.create_contract_with_criteria("Contract", config);
    world
        .set_contract_status(contract, ContractStatus::Initiating)
        .unwrap();
    world
        .set_contract_status(contract, ContractStatus::Active)
        .unwrap();
    contract
}

fn group(world: &ContractWorld, contract: EntityId, id: &str) -> Vec<EntityId> {
    world
        .registry(contract)
        .unwrap()
        .criteria(&GroupId::from(id))
        .to_vec()
}

fn is_fulfilled(world: &ContractWorld, contract: EntityId, id: &str) -> bool {
    world
        .registry(contract)
        .unwrap()
        .is_fulfilled(&GroupId::from(id))
}

/// ALL group: [F,F] no, [T,F] no, [T,T] fires once even if re-signaled.
#[test]
fn test_all_group_fires_once() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let seen = recorder(&mut world);
    let contract = active(
        &mut world,
        ContractCriteriaConfig::new()
            .with_criterion("bonus", "flag")
            .with_criterion("bonus", "flag"),
    );
    let criteria = group(&world, contract, "bonus");

    world.criteria_updated(contract).unwrap();
    assert!(!is_fulfilled(&world, contract, "bonus"));

    world.set_criterion_status(criteria[0], true).unwrap();
    assert!(!is_fulfilled(&world, contract, "bonus"));

    world.set_criterion_status(criteria[1], true).unwrap();
    assert!(is_fulfilled(&world, contract, "bonus"));
    assert_eq!(seen.borrow().len(), 1);

    // Re-signal: toggle off and on, plus a bare update.
    world.set_criterion_status(criteria[0], false).unwrap();
    world.set_criterion_status(criteria[0], true).unwrap();
    world.criteria_updated(contract).unwrap();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].effect, ContractEffect::GrantBonus { amount: 10 });
    assert_eq!(seen.borrow()[0].contract, contract);
}

/// ANY group: [F,F] no, [F,T] fires; later toggles do not re-trigger.
#[test]
fn test_any_group_fires_once() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let seen = recorder(&mut world);
    let contract = active(
        &mut world,
        ContractCriteriaConfig::new()
            .with_criterion("alarm", "flag")
            .with_criterion("alarm", "flag"),
    );
    let criteria = group(&world, contract, "alarm");

    world.criteria_updated(contract).unwrap();
    assert!(seen.borrow().is_empty());

    world.set_criterion_status(criteria[1], true).unwrap();
    assert_eq!(seen.borrow().len(), 1);

    world.set_criterion_status(criteria[0], true).unwrap();
    world.set_criterion_status(criteria[0], false).unwrap();
    world.set_criterion_status(criteria[1], false).unwrap();
    world.set_criterion_status(criteria[1], true).unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

/// Groups without registered criteria never fire, whatever their mode.
#[test]
fn test_empty_group_never_fires() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let seen = recorder(&mut world);
    let contract = active(
        &mut world,
        ContractCriteriaConfig::new().with_criterion("alarm", "flag"),
    );

    // "payment" (ALL) and "breach" (ANY) have no members on this contract.
    world.criteria_updated(contract).unwrap();
    assert!(seen.borrow().is_empty());
    assert!(!is_fulfilled(&world, contract, "payment"));
    assert!(!is_fulfilled(&world, contract, "breach"));
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Active
    );
}

/// Payment (ALL, 2) and breach (ANY, 1): satisfying payment finalizes and
/// later updates are no-ops.
#[test]
fn test_payment_finalizes_and_breach_becomes_irrelevant() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let seen = recorder(&mut world);
    let contract = active(
        &mut world,
        ContractCriteriaConfig::new()
            .with_criterion("payment", "flag")
            .with_criterion("payment", "flag")
            .with_criterion("breach", "flag"),
    );
    let payment = group(&world, contract, "payment");
    let breach = group(&world, contract, "breach");

    world.set_criterion_status(payment[0], true).unwrap();
    world.set_criterion_status(payment[1], true).unwrap();
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Finalized
    );

    world.set_criterion_status(breach[0], true).unwrap();
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Finalized
    );
    assert!(!is_fulfilled(&world, contract, "breach"));
    assert_eq!(seen.borrow().len(), 1);
}

/// One update can fire several independent groups in a single pass, in
/// registration order.
#[test]
fn test_single_update_fires_multiple_groups() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let seen = recorder(&mut world);
    let contract = world.create_contract_with_criteria(
        "Contract",
        ContractCriteriaConfig::new()
            .with_criterion("bonus", "flag")
            .with_criterion("alarm", "flag")
            .with_criterion("bonus", "flag"),
    );
    world
        .set_contract_status(contract, ContractStatus::Initiating)
        .unwrap();
    let bonus = group(&world, contract, "bonus");
    let alarm = group(&world, contract, "alarm");

    // Updates before activation are ignored.
    world.set_criterion_status(bonus[0], true).unwrap();
    world.set_criterion_status(alarm[0], true).unwrap();
    assert!(seen.borrow().is_empty());

    world
        .set_contract_status(contract, ContractStatus::Active)
        .unwrap();
    world.set_criterion_status(bonus[1], true).unwrap();

    let effects: Vec<_> = seen.borrow().iter().map(|b| b.effect.clone()).collect();
    assert_eq!(
        effects,
        vec![
            ContractEffect::GrantBonus { amount: 10 },
            ContractEffect::custom("alarm"),
        ]
    );
    assert_eq!(world.journal().criteria_updates(contract), 3);
}

/// Timers only run after activation and can breach a contract.
#[test]
fn test_timer_breaches_contract() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let contract = world.create_contract_with_criteria(
        "Contract",
        ContractCriteriaConfig::new()
            .with_criterion("payment", "flag")
            .with_criterion("breach", "deadline"),
    );
    world
        .set_contract_status(contract, ContractStatus::Initiating)
        .unwrap();

    world.tick(10).unwrap();
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Initiating
    );

    world
        .set_contract_status(contract, ContractStatus::Active)
        .unwrap();
    world.tick(1).unwrap();
    world.tick(1).unwrap();
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Active
    );

    world.tick(1).unwrap();
    assert_eq!(
        world.contract(contract).unwrap().status(),
        ContractStatus::Breached
    );

    let deadline = group(&world, contract, "breach")[0];
    assert!(!world.criterion(deadline).unwrap().is_ticking());
}

/// The journal shows the full notification sequence for a contract.
#[test]
fn test_notification_sequence() {
    let mut world = ContractWorld::new(catalog(), prototypes());
    let contract = active(
        &mut world,
        ContractCriteriaConfig::new().with_criterion("payment", "flag"),
    );
    let criterion = group(&world, contract, "payment")[0];
    world.set_criterion_status(criterion, true).unwrap();

    let events: Vec<_> = world.journal().iter().cloned().collect();
    assert_eq!(
        events,
        vec![
            ContractEvent::StatusChanged {
                contract,
                from: ContractStatus::Uninitialized,
                to: ContractStatus::Initiating,
            },
            ContractEvent::CriterionSetup { criterion },
            ContractEvent::StatusChanged {
                contract,
                from: ContractStatus::Initiating,
                to: ContractStatus::Active,
            },
            ContractEvent::StartTicking { criterion },
            ContractEvent::CriteriaUpdated { contract },
            ContractEvent::GroupFulfilled {
                contract,
                group: GroupId::from("payment"),
            },
            ContractEvent::EffectDispatched(ContractEffect::FinalizeContract.bind(contract)),
            ContractEvent::StatusChanged {
                contract,
                from: ContractStatus::Active,
                to: ContractStatus::Finalized,
            },
        ]
    );
}
