use color_eyre::eyre::eyre;
use color_eyre::Result;
use watchtrack_config::{Config, PathManager};
use watchtrack_core::StateHandle;
use watchtrack_models::Session;
use watchtrack_remote::{AuthClient, CatalogClient, StoreClient};

/// Everything a command needs: validated config, the three remote clients,
/// and the shared client state.
pub struct AppContext {
    pub config: Config,
    pub paths: PathManager,
    pub state: StateHandle,
    pub catalog: CatalogClient,
    pub store: StoreClient,
    pub auth: AuthClient,
}

impl AppContext {
    pub fn init() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();

        if !config_file.exists() {
            // First run: write a starter config and point the user at it
            Config::template()
                .save_to_file(&config_file)
                .map_err(|e| eyre!("Failed to write starter config: {}", e))?;
            return Err(eyre!(
                "No configuration found. A starter file was written to {}.\n\
                 Fill it in, or run 'watchtrack config catalog' and 'watchtrack config backend'.",
                config_file.display()
            ));
        }

        let config = Config::load_from_file(&config_file)
            .map_err(|e| eyre!("Failed to load {}: {}", config_file.display(), e))?;
        config.validate().map_err(|e| eyre!("{}", e))?;

        let catalog = CatalogClient::new(&config.catalog);
        let store = StoreClient::new(&config.backend);
        let auth = AuthClient::new(&config.backend, paths.credentials_file());

        Ok(Self {
            config,
            paths,
            state: StateHandle::new(),
            catalog,
            store,
            auth,
        })
    }

    /// Restore the persisted session and mirror its user into shared
    /// state. Commands that need the row store call this first.
    pub async fn require_session(&self) -> Result<Session> {
        match self.auth.restore_session().await {
            Some(session) => {
                self.state.set_user(session.user.clone());
                Ok(session)
            }
            None => Err(eyre!("Not signed in. Run 'watchtrack login' first")),
        }
    }
}
