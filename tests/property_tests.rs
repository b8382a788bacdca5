//! Property tests for the lifecycle and fire-once guarantees.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use contract_criteria::contracts::ContractStatus;
use contract_criteria::core::{
    ContractCriteriaConfig, CriteriaGroupDefinition, CriteriaMode, EntityId, GroupCatalog, GroupId,
};
use contract_criteria::criteria::{evaluate_group, GroupOutcome, ManualCriterion};
use contract_criteria::effects::{BoundEffect, ContractEffect, HandlerContext};
use contract_criteria::engine::ContractWorld;
use contract_criteria::spawning::PrototypeCatalog;

const GROUPS: [&str; 3] = ["all", "any", "end"];

fn status() -> impl Strategy<Value = ContractStatus> {
    prop_oneof![
        Just(ContractStatus::Uninitialized),
        Just(ContractStatus::Initiating),
        Just(ContractStatus::Active),
        Just(ContractStatus::Finalized),
        Just(ContractStatus::Breached),
    ]
}

fn mode() -> impl Strategy<Value = CriteriaMode> {
    prop_oneof![Just(CriteriaMode::All), Just(CriteriaMode::Any)]
}

fn world() -> ContractWorld {
    let catalog = GroupCatalog::new()
        .with_group(CriteriaGroupDefinition::all("all").with_effect(ContractEffect::custom("all")))
        .with_group(CriteriaGroupDefinition::any("any").with_effect(ContractEffect::custom("any")))
        .with_group(CriteriaGroupDefinition::all("end").with_effect(ContractEffect::FinalizeContract));
    let prototypes = PrototypeCatalog::new().with_criterion("flag", || ManualCriterion::new("Flag"));
    ContractWorld::new(catalog, prototypes)
}

proptest! {
    /// Whatever sequence of requests is made, the status only moves forward,
    /// and rejected requests leave it unchanged.
    #[test]
    fn test_status_only_moves_forward(requests in prop::collection::vec(status(), 0..20)) {
        let mut world = world();
        let contract = world.create_contract("Contract");

        for next in requests {
            let before = world.contract(contract).unwrap().status();
            let result = world.set_contract_status(contract, next);
            let after = world.contract(contract).unwrap().status();

            prop_assert_eq!(result.is_ok(), before.can_transition_to(next));
            if result.is_ok() {
                prop_assert_eq!(after, next);
                prop_assert!(after.rank() > before.rank());
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    /// Each group's effects are dispatched at most once, however the flags
    /// are toggled.
    #[test]
    fn test_groups_fire_at_most_once(
        members in prop::collection::vec(0..GROUPS.len(), 1..8),
        toggles in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>()), 0..40),
    ) {
        let mut world = world();
        let seen: Rc<RefCell<Vec<ContractEffect>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        world.subscribe(move |bound: &BoundEffect, _: &mut HandlerContext| {
            sink.borrow_mut().push(bound.effect.clone());
        });

        let config = members
            .iter()
            .fold(ContractCriteriaConfig::new(), |config, &g| config.with_criterion(GROUPS[g], "flag"));
        let contract = world.create_contract_with_criteria("Contract", config);
        world.set_contract_status(contract, ContractStatus::Initiating).unwrap();
        world.set_contract_status(contract, ContractStatus::Active).unwrap();

        let criteria: Vec<EntityId> = world.registry(contract).unwrap().all_criteria().collect();
        for (index, satisfied) in toggles {
            let criterion = criteria[index.index(criteria.len())];
            world.set_criterion_status(criterion, satisfied).unwrap();
        }

        let seen = seen.borrow();
        for name in GROUPS {
            let fired = seen
                .iter()
                .filter(|effect| match effect {
                    ContractEffect::Custom { key, .. } => key == name,
                    ContractEffect::FinalizeContract => name == "end",
                    _ => false,
                })
                .count();
            prop_assert!(fired <= 1, "group {} fired {} times", name, fired);

            let fulfilled = world.registry(contract).unwrap().is_fulfilled(&GroupId::from(name));
            prop_assert_eq!(fired == 1, fulfilled);
        }
    }

    /// ALL and ANY agree with the iterator quantifiers for non-empty groups,
    /// and empty groups are always inert.
    #[test]
    fn test_evaluate_group_matches_quantifiers(
        mode in mode(),
        flags in prop::collection::vec(any::<bool>(), 0..10),
    ) {
        let outcome = evaluate_group(mode, flags.iter().copied());
        let expected = if flags.is_empty() {
            GroupOutcome::Inert
        } else {
            let satisfied = match mode {
                CriteriaMode::All => flags.iter().all(|&f| f),
                CriteriaMode::Any => flags.iter().any(|&f| f),
            };
            if satisfied { GroupOutcome::Satisfied } else { GroupOutcome::Unsatisfied }
        };
        prop_assert_eq!(outcome, expected);
    }
}
