//! Wiring of stores, controller and the requested change.

use anyhow::{Context, Result, bail};
use cgpa_application::{SyncController, SyncHandle};
use cgpa_core::config::AppConfig;
use cgpa_core::identity::Identity;
use cgpa_core::record::{CoursePatch, Mutation, RecordModel, RecordRepository, UserDocumentStore};
use cgpa_infrastructure::storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use cgpa_infrastructure::{
    CgpaPaths, ConfigService, DirUserDocumentStore, InMemoryUserDocumentStore, LocalStore,
};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Course fields as typed on the command line.
#[derive(Args, Debug, Default)]
pub struct CourseFields {
    /// Course code or title
    #[arg(long)]
    pub name: Option<String>,
    /// Letter grade A-F; anything else leaves the course ungraded
    #[arg(long)]
    pub grade: Option<String>,
    /// Credit units; text that is not a number counts as 0
    #[arg(long)]
    pub units: Option<String>,
}

impl CourseFields {
    pub fn into_patch(self) -> CoursePatch {
        CoursePatch::from_input(
            self.name.as_deref(),
            self.grade.as_deref(),
            self.units.as_deref(),
        )
    }
}

/// What one invocation does once the records are loaded.
#[derive(Debug)]
pub enum Plan {
    Show,
    Apply(Vec<Mutation>),
    /// Append a course and fill it in; the index is only known after loading.
    AddCourse {
        semester_id: String,
        patch: CoursePatch,
    },
}

pub struct Setup {
    pub config: AppConfig,
    pub data_dir: Option<PathBuf>,
    pub user: Option<String>,
    pub ephemeral: bool,
}

impl Setup {
    fn identity(&self) -> Identity {
        self.user
            .as_deref()
            .map(Identity::signed_in)
            .unwrap_or_default()
    }
}

pub fn load_config(path: Option<&Path>) -> cgpa_core::error::Result<AppConfig> {
    ConfigService::resolve(path)?.load()
}

fn build_controller(setup: &Setup) -> Result<SyncController> {
    let storage = &setup.config.storage;

    let kv: Arc<dyn KeyValueStore>;
    let documents: Arc<dyn UserDocumentStore>;
    if setup.ephemeral {
        kv = Arc::new(MemoryKeyValueStore::new());
        documents = Arc::new(InMemoryUserDocumentStore::new());
    } else {
        let data_dir = setup.data_dir.as_deref().or(storage.data_dir.as_deref());
        let paths = CgpaPaths::new(data_dir).context("Failed to resolve the data directory")?;
        tracing::debug!("Using data directory {}", paths.data_dir().display());
        kv = Arc::new(FileKeyValueStore::new(paths.local_dir()));
        documents = Arc::new(DirUserDocumentStore::new(paths.users_dir()));
    }

    let local: Arc<dyn RecordRepository> = Arc::new(LocalStore::new(kv, storage.local_key.clone()));
    Ok(SyncController::new(
        local,
        documents,
        setup.config.sync.debounce(),
    ))
}

/// Expands `plan` into mutations against the loaded records.
fn mutations_for(plan: Plan, loaded: &RecordModel) -> Result<Vec<Mutation>> {
    Ok(match plan {
        Plan::Show => Vec::new(),
        Plan::Apply(mutations) => mutations,
        Plan::AddCourse { semester_id, patch } => {
            if loaded.state.session_of(&semester_id).is_none() {
                bail!("Unknown semester '{}'", semester_id);
            }
            let index = loaded.state.courses(&semester_id).len();
            let mut mutations = vec![Mutation::AddCourse {
                semester_id: semester_id.clone(),
            }];
            if !patch.is_empty() {
                mutations.push(Mutation::UpdateCourse {
                    semester_id,
                    index,
                    patch,
                });
            }
            mutations
        }
    })
}

/// Loads the records for the configured identity, applies `plan` and
/// returns the records as persisted on shutdown.
pub async fn execute(setup: &Setup, plan: Plan) -> Result<RecordModel> {
    let (handle, task) = SyncHandle::spawn(build_controller(setup)?);

    handle.identity_changed(setup.identity()).await?;
    handle.flush().await?;
    let loaded = handle.snapshot().model;

    let mutations = mutations_for(plan, &loaded)?;
    let requested = !mutations.is_empty();
    for mutation in mutations {
        handle.mutate(mutation).await?;
    }

    handle.shutdown().await?;
    task.await.context("Sync loop panicked")?;

    let model = handle.snapshot().model;
    if requested && model.state == loaded.state {
        eprintln!("Nothing changed; check the ids and positions shown by `cgpa show`.");
    }
    Ok(model.as_ref().clone())
}
