//! LoadProjectHandler - Fetches and parses everything a project publishes.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::map::{MapInfo, MapView};
use crate::domain::region::{BarrierCatalog, RegionCostTable};
use crate::domain::session::PlanningSession;
use crate::domain::target::{ColumnMapping, TargetCatalog};
use crate::ports::ProjectReader;

/// Command to load one project.
#[derive(Debug, Clone)]
pub struct LoadProjectCommand {
    pub project: String,
    /// Tab the dashboard opens on.
    pub initial_tab: u8,
}

/// Read-only project data shared by every session.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub server_url: String,
    pub project: String,
    pub initial_tab: u8,
    pub targets: TargetCatalog,
    pub mapping: ColumnMapping,
    pub map_info: MapInfo,
    pub map: MapView,
    pub barriers: BarrierCatalog,
    pub region_costs: RegionCostTable,
}

impl ProjectContext {
    /// Region names, sorted.
    pub fn region_names(&self) -> Vec<String> {
        self.region_costs.region_names()
    }

    /// Opens a fresh planning session over this project.
    pub fn new_session(&self) -> PlanningSession {
        PlanningSession::new(self.region_costs.clone())
    }
}

/// Handler for loading projects.
pub struct LoadProjectHandler {
    reader: Arc<dyn ProjectReader>,
    server_url: String,
}

impl LoadProjectHandler {
    pub fn new(reader: Arc<dyn ProjectReader>, server_url: impl Into<String>) -> Self {
        Self {
            reader,
            server_url: server_url.into(),
        }
    }

    /// Loads the project in server order: project list, targets, column
    /// mapping, map description, barriers. The first failure aborts.
    pub async fn handle(&self, cmd: LoadProjectCommand) -> Result<Arc<ProjectContext>, DomainError> {
        let project = cmd.project;

        // 1. Project must exist
        let projects = self.reader.projects().await?;
        if !projects.iter().any(|p| *p == project) {
            return Err(DomainError::new(
                ErrorCode::ProjectNotFound,
                format!("unknown project: {}", project),
            )
            .with_detail("project", project));
        }

        // 2. Targets
        let files = self.reader.targets(&project).await?;
        let targets = TargetCatalog::from_csv(&files.targets, &files.layout)?;
        debug!(project = %project, targets = targets.len(), "targets loaded");

        // 3. Column mapping
        let mapping = self.reader.column_mapping(&project).await?;

        // 4. Map description
        let map_info = MapInfo::from_json(&self.reader.map_info(&project).await?)?;

        // 5. Barriers and region totals
        let barriers = BarrierCatalog::from_csv(&self.reader.barriers(&project).await?)?;
        let region_costs = RegionCostTable::from_catalog(&barriers);

        let map = MapView::build(&map_info, &self.server_url, &project, &barriers)?;

        info!(
            project = %project,
            barriers = barriers.len(),
            regions = region_costs.region_names().len(),
            map = %map.kind(),
            "setup complete"
        );

        Ok(Arc::new(ProjectContext {
            server_url: self.server_url.clone(),
            project,
            initial_tab: cmd.initial_tab,
            targets,
            mapping,
            map_info,
            map,
            barriers,
            region_costs,
        }))
    }
}
