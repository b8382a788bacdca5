use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contracts::{Contract, ContractStatus, ParticipantId};
use crate::core::GroupId;
use crate::criteria::{CriteriaRegistry, DisplayData};
use crate::engine::ContractWorld;

/// Owner name shown for contracts nobody owns yet.
pub const INACTIVE_OWNER: &str = "[INACTIVE]";

/// How the viewer relates to a contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerRole {
    /// Nobody owns the contract; the viewer may take it.
    OpenToOwn,
    /// Owned by someone else; the viewer may join.
    OpenToJoin,
    Subcontractor,
    Owner,
}

impl ViewerRole {
    fn of(contract: &Contract, viewer: ParticipantId) -> Self {
        if contract.owner.is_none() {
            Self::OpenToOwn
        } else if contract.has_subcontractor(viewer) {
            Self::Subcontractor
        } else if contract.is_owned_by(viewer) {
            Self::Owner
        } else {
            Self::OpenToJoin
        }
    }
}

/// One criteria group as shown to the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupListing {
    pub group: GroupId,
    /// Visible criteria, in registration order.
    pub criteria: Vec<DisplayData>,
    /// Descriptions of the effects the group carries.
    pub effects: Vec<String>,
    pub fulfilled: bool,
}

/// One contract as shown to the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractListing {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub owner_name: String,
    pub subcontractor_names: Vec<String>,
    pub status: ContractStatus,
    pub role: ViewerRole,
    pub groups: Vec<GroupListing>,
}

/// Listings for every contract with a criteria registry, in creation order.
///
/// Finished contracts are hidden from viewers who could only join them.
pub fn contract_listings(world: &ContractWorld, viewer: ParticipantId) -> Vec<ContractListing> {
    world
        .contracts()
        .filter_map(|contract| {
            let registry = world.try_registry(contract.id)?;
            let role = ViewerRole::of(contract, viewer);
            if contract.is_terminal() && role == ViewerRole::OpenToJoin {
                return None;
            }
            Some(listing(world, contract, registry, role))
        })
        .collect()
}

fn listing(
    world: &ContractWorld,
    contract: &Contract,
    registry: &CriteriaRegistry,
    role: ViewerRole,
) -> ContractListing {
    let groups = registry
        .iter()
        .map(|(group, criteria)| {
            let static_effects = world
                .catalog()
                .get(group)
                .map_or(&[][..], |definition| definition.effects.as_slice());
            GroupListing {
                group: group.clone(),
                criteria: criteria
                    .iter()
                    .filter_map(|&id| world.try_get_display_data(id))
                    .collect(),
                effects: static_effects
                    .iter()
                    .chain(registry.extra_effects(group))
                    .filter_map(|effect| effect.describe())
                    .collect(),
                fulfilled: registry.is_fulfilled(group),
            }
        })
        .collect();

    ContractListing {
        uuid: contract.uuid,
        name: contract.name.clone(),
        description: contract.description.clone(),
        owner_name: contract
            .owner
            .as_ref()
            .map_or_else(|| INACTIVE_OWNER.to_string(), |o| o.name.clone()),
        subcontractor_names: contract.subcontractors.iter().map(|s| s.name.clone()).collect(),
        status: contract.status(),
        role,
        groups,
    }
}
