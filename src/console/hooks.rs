//! Authorization gate.
//!
//! One capability check parameterized by resource and action instead of a
//! wide per-operation interface; new resource kinds slot in without
//! changing the contract. Invoked once per resource after aggregation,
//! strictly side-effect free, and never an input to aggregation itself:
//! hidden resources are computed in full and then omitted, so rollups stay
//! correct.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    Topic(&'a str),
    ConsumerGroup(&'a str),
    Cluster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    See,
    ViewPartitions,
    ViewConfig,
    ViewConsumers,
    PatchReassignments,
}

pub trait ConsoleHooks: Send + Sync {
    fn is_allowed(&self, resource: Resource<'_>, action: Action) -> bool;

    /// The action names to annotate a visible resource with. Only consulted
    /// for resources that already passed `is_allowed(_, See)`.
    fn allowed_actions(&self, resource: Resource<'_>) -> Vec<String>;
}

/// Default policy when no external policy is attached.
pub struct AllowAllHooks;

impl ConsoleHooks for AllowAllHooks {
    fn is_allowed(&self, _resource: Resource<'_>, _action: Action) -> bool {
        true
    }

    fn allowed_actions(&self, _resource: Resource<'_>) -> Vec<String> {
        // "all" is understood by consumers as the wildcard action set.
        vec!["all".to_string()]
    }
}
