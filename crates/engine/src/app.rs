//! Application composition.
//!
//! Wires the default adapters and the farming pipeline together. Hosts hand
//! in their world/session/notification implementations plus whichever
//! verification integrations are actually present in the running
//! environment; an absent integration stays `None` and the coordinator
//! fails closed for tasks that require it.

use std::sync::Arc;

use questline_domain::{DomainError, Quest};

use crate::infrastructure::ports::{
    ActivityLogPort, AdvancementPort, BlockTrackerPort, DiagnosticsPort, GrowthCapabilityPort,
    ProgressRepo, SessionPort, WorldQueryPort,
};
use crate::infrastructure::{
    CatalogEligibility, InMemoryProgressRepo, StaticQuestCatalog, TracingDiagnostics,
};
use crate::use_cases::farming::{
    ActivityLogProvider, BlockTrackerProvider, ChangeSetDeriver, FarmingTaskHandler,
    MaturityFilter, ProgressMutator, TaskMatcher, VerificationCoordinator,
};

/// Verification integrations detected at startup. `None` = absent.
#[derive(Default)]
pub struct Integrations {
    pub block_tracker: Option<Arc<dyn BlockTrackerPort>>,
    pub activity_log: Option<Arc<dyn ActivityLogPort>>,
}

/// Main application state: the composed farming pipeline plus the progress
/// store it writes to.
pub struct App {
    pub farming: Arc<FarmingTaskHandler>,
    pub progress: Arc<dyn ProgressRepo>,
}

impl App {
    /// Compose the pipeline for a loaded quest set.
    ///
    /// Fails if any farming task carries invalid configuration; nothing is
    /// partially wired in that case.
    pub fn new(
        quests: &[Quest],
        session: Arc<dyn SessionPort>,
        world: Arc<dyn WorldQueryPort>,
        capability: Arc<dyn GrowthCapabilityPort>,
        advancement: Arc<dyn AdvancementPort>,
        integrations: Integrations,
    ) -> Result<Self, DomainError> {
        let progress = Arc::new(InMemoryProgressRepo::new());
        let diagnostics: Arc<dyn DiagnosticsPort> = Arc::new(TracingDiagnostics::new());

        let catalog = Arc::new(StaticQuestCatalog::new(quests)?);
        let eligibility = Arc::new(CatalogEligibility::new(Arc::clone(&progress)));

        let mutator = Arc::new(ProgressMutator::new(
            Arc::clone(&progress) as Arc<dyn ProgressRepo>,
            advancement,
            Arc::clone(&diagnostics),
        ));
        let coordinator = VerificationCoordinator::new(
            vec![
                Arc::new(BlockTrackerProvider::new(integrations.block_tracker)),
                Arc::new(ActivityLogProvider::new(integrations.activity_log)),
            ],
            Arc::clone(&mutator),
            Arc::clone(&diagnostics),
        );

        let farming = Arc::new(FarmingTaskHandler::new(
            session,
            ChangeSetDeriver::new(world),
            MaturityFilter::new(capability),
            TaskMatcher::new(catalog, eligibility, diagnostics),
            coordinator,
            mutator,
        ));

        Ok(Self {
            farming,
            progress,
        })
    }
}
