//! Service container - wires concrete services over a live database.
//!
//! Collaborators are constructed here, explicitly, and handed to the
//! HTTP layer; nothing is resolved from ambient global state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    ExcelImporter, IdentityManager, IdentityService, ImportService, JwtTokenService, Mailer,
    SmtpMailer, SpreadsheetImporter, TokenService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// All application services, constructed once at startup.
pub struct Services {
    identity: Arc<dyn IdentityService>,
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserService>,
    importer: Arc<dyn SpreadsheetImporter>,
    mailer: Arc<dyn Mailer>,
    imports: Arc<ImportService>,
}

impl Services {
    /// Wire every service over the given connection and configuration.
    pub fn from_connection(db: DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let identity: Arc<dyn IdentityService> = Arc::new(IdentityManager::new(uow.clone()));
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config));
        let users: Arc<dyn UserService> = Arc::new(UserManager::new(uow));
        let importer: Arc<dyn SpreadsheetImporter> = Arc::new(ExcelImporter);
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_env());
        let imports = Arc::new(ImportService::new(identity.clone(), mailer.clone()));

        Self {
            identity,
            tokens,
            users,
            importer,
            mailer,
            imports,
        }
    }

    pub fn identity(&self) -> Arc<dyn IdentityService> {
        self.identity.clone()
    }

    pub fn tokens(&self) -> Arc<dyn TokenService> {
        self.tokens.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    pub fn importer(&self) -> Arc<dyn SpreadsheetImporter> {
        self.importer.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }

    pub fn imports(&self) -> Arc<ImportService> {
        self.imports.clone()
    }
}
