//! Configuration types.
//!
//! Hosts configure the engine by providing:
//! - `CriteriaGroupDefinition`: how a named group is satisfied and what it does
//! - `GroupCatalog`: the shared, read-only set of group definitions
//! - `ContractCriteriaConfig`: which criteria a given contract spawns, per group
//! - `WorldConfig`: engine-wide knobs
//!
//! Everything here is plain data and derives serde, so it can be loaded from
//! whatever format the host uses.

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::ContractEffect;
use crate::error::{ConfigError, ContractError};

/// Criteria group identifier, e.g. `"payment"` or `"breach"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a criterion prototype known to the spawning collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrototypeId(String);

impl PrototypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PrototypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PrototypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quantifier applied over a group's criteria.
///
/// Parsing is strict: anything other than `all` or `any` is a
/// configuration error rather than a silent fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CriteriaMode {
    /// Every criterion must be satisfied.
    All,
    /// At least one criterion must be satisfied.
    Any,
}

impl CriteriaMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }
}

impl FromStr for CriteriaMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else if s.eq_ignore_ascii_case("any") {
            Ok(Self::Any)
        } else {
            Err(ConfigError::UnknownMode(s.to_string()))
        }
    }
}

impl TryFrom<String> for CriteriaMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CriteriaMode> for String {
    fn from(mode: CriteriaMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for CriteriaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static definition of a criteria group, shared by every contract using it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaGroupDefinition {
    pub id: GroupId,
    pub mode: CriteriaMode,

    /// Effects applied, in order, when the group is fulfilled.
    #[serde(default)]
    pub effects: SmallVec<[ContractEffect; 2]>,
}

impl CriteriaGroupDefinition {
    pub fn new(id: impl Into<GroupId>, mode: CriteriaMode) -> Self {
        Self {
            id: id.into(),
            mode,
            effects: SmallVec::new(),
        }
    }

    /// Shorthand for an ALL group.
    pub fn all(id: impl Into<GroupId>) -> Self {
        Self::new(id, CriteriaMode::All)
    }

    /// Shorthand for an ANY group.
    pub fn any(id: impl Into<GroupId>) -> Self {
        Self::new(id, CriteriaMode::Any)
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: ContractEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Read-only lookup from group id to definition.
#[derive(Clone, Debug, Default)]
pub struct GroupCatalog {
    groups: FxHashMap<GroupId, CriteriaGroupDefinition>,
}

impl GroupCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions.
    ///
    /// Panics on duplicate ids, like [`GroupCatalog::register`].
    pub fn from_definitions(definitions: impl IntoIterator<Item = CriteriaGroupDefinition>) -> Self {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.register(definition);
        }
        catalog
    }

    /// Register a group definition.
    ///
    /// Panics if a group with the same id already exists.
    pub fn register(&mut self, definition: CriteriaGroupDefinition) {
        if self.groups.contains_key(&definition.id) {
            panic!("Criteria group `{}` already registered", definition.id);
        }
        self.groups.insert(definition.id.clone(), definition);
    }

    /// Register a definition (builder pattern).
    #[must_use]
    pub fn with_group(mut self, definition: CriteriaGroupDefinition) -> Self {
        self.register(definition);
        self
    }

    #[must_use]
    pub fn get(&self, id: &GroupId) -> Option<&CriteriaGroupDefinition> {
        self.groups.get(id)
    }

    /// Look up a definition that must exist.
    pub fn require(&self, id: &GroupId) -> Result<&CriteriaGroupDefinition, ContractError> {
        self.groups.get(id).ok_or_else(|| {
            tracing::error!(group = %id, "criteria group is not defined");
            ContractError::UnknownGroup { group: id.clone() }
        })
    }

    #[must_use]
    pub fn contains(&self, id: &GroupId) -> bool {
        self.groups.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// One criterion to spawn for a contract: which prototype, under which group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSlot {
    pub group: GroupId,
    pub prototype: PrototypeId,
}

impl CriterionSlot {
    pub fn new(group: impl Into<GroupId>, prototype: impl Into<PrototypeId>) -> Self {
        Self {
            group: group.into(),
            prototype: prototype.into(),
        }
    }
}

/// Per-contract criteria configuration.
///
/// Slots are spawned in order when the contract starts initiating. Extra
/// effects are appended after a group's static effects when it fires.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCriteriaConfig {
    #[serde(default)]
    pub slots: Vec<CriterionSlot>,

    #[serde(default)]
    pub extra_effects: FxHashMap<GroupId, Vec<ContractEffect>>,
}

impl ContractCriteriaConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion slot (builder pattern).
    #[must_use]
    pub fn with_criterion(
        mut self,
        group: impl Into<GroupId>,
        prototype: impl Into<PrototypeId>,
    ) -> Self {
        self.slots.push(CriterionSlot::new(group, prototype));
        self
    }

    /// Add an extra effect for a group (builder pattern).
    #[must_use]
    pub fn with_extra_effect(mut self, group: impl Into<GroupId>, effect: ContractEffect) -> Self {
        self.extra_effects.entry(group.into()).or_default().push(effect);
        self
    }
}

/// Engine-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for contract uuid generation.
    pub seed: u64,

    /// Maximum number of journal entries kept. `None` for unbounded.
    pub journal_limit: Option<usize>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            journal_limit: Some(4096),
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_journal_limit(mut self, limit: Option<usize>) -> Self {
        self.journal_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("all".parse::<CriteriaMode>(), Ok(CriteriaMode::All));
        assert_eq!("ANY".parse::<CriteriaMode>(), Ok(CriteriaMode::Any));
        assert_eq!(
            "majority".parse::<CriteriaMode>(),
            Err(ConfigError::UnknownMode("majority".to_string()))
        );
    }

    #[test]
    fn test_mode_rejected_when_deserializing() {
        let json = r#"{ "id": "payment", "mode": "most" }"#;
        let result: Result<CriteriaGroupDefinition, _> = serde_json::from_str(json);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unknown criteria mode"));
    }

    #[test]
    fn test_group_definition_from_json() {
        let json = r#"{
            "id": "payment",
            "mode": "all",
            "effects": ["FinalizeContract", { "GrantBonus": { "amount": 50 } }]
        }"#;
        let definition: CriteriaGroupDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(definition.id, GroupId::from("payment"));
        assert_eq!(definition.mode, CriteriaMode::All);
        assert_eq!(definition.effects.len(), 2);
        assert_eq!(definition.effects[0], ContractEffect::FinalizeContract);
        assert_eq!(definition.effects[1], ContractEffect::GrantBonus { amount: 50 });
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = GroupCatalog::new()
            .with_group(CriteriaGroupDefinition::all("payment"))
            .with_group(CriteriaGroupDefinition::any("breach"));

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&GroupId::from("payment")));
        assert_eq!(
            catalog.require(&GroupId::from("breach")).unwrap().mode,
            CriteriaMode::Any
        );
        assert!(matches!(
            catalog.require(&GroupId::from("bonus")),
            Err(ContractError::UnknownGroup { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_group_panics() {
        let _ = GroupCatalog::from_definitions([
            CriteriaGroupDefinition::all("payment"),
            CriteriaGroupDefinition::any("payment"),
        ]);
    }

    #[test]
    fn test_contract_config_builder() {
        let config = ContractCriteriaConfig::new()
            .with_criterion("payment", "deliver-cargo")
            .with_criterion("payment", "return-ship")
            .with_extra_effect("payment", ContractEffect::GrantBonus { amount: 10 });

        assert_eq!(config.slots.len(), 2);
        assert_eq!(config.slots[1], CriterionSlot::new("payment", "return-ship"));
        assert_eq!(config.extra_effects[&GroupId::from("payment")].len(), 1);
    }

    #[test]
    fn test_world_config_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{ "seed": 9 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.journal_limit, Some(4096));
    }
}
