//! Application state - explicit dependency container.
//!
//! Every collaborator the handlers need is constructed at startup and
//! carried here; there are no ambient singletons.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    IdentityService, ImportService, Mailer, Services, SpreadsheetImporter, TokenService,
    UserService,
};

/// Handler-facing collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Credential store and account creation
    pub identity: Arc<dyn IdentityService>,
    /// Session token issuance and verification
    pub tokens: Arc<dyn TokenService>,
    /// Account lookups
    pub users: Arc<dyn UserService>,
    /// Spreadsheet parsing
    pub importer: Arc<dyn SpreadsheetImporter>,
    /// Credential delivery
    pub mailer: Arc<dyn Mailer>,
    /// Bulk registration pipeline
    pub imports: Arc<ImportService>,
    /// Database connection (health probe)
    pub database: Arc<Database>,
}

impl AppState {
    /// Build state from a live database and configuration.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            identity: services.identity(),
            tokens: services.tokens(),
            users: services.users(),
            importer: services.importer(),
            mailer: services.mailer(),
            imports: services.imports(),
            database,
        }
    }

    /// Build state from individually injected collaborators.
    pub fn new(
        identity: Arc<dyn IdentityService>,
        tokens: Arc<dyn TokenService>,
        users: Arc<dyn UserService>,
        importer: Arc<dyn SpreadsheetImporter>,
        mailer: Arc<dyn Mailer>,
        database: Arc<Database>,
    ) -> Self {
        let imports = Arc::new(ImportService::new(identity.clone(), mailer.clone()));
        Self {
            identity,
            tokens,
            users,
            importer,
            mailer,
            imports,
            database,
        }
    }
}
