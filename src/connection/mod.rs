//! Connection management for MongoDB
//!
//! Owns the single `mongodb::Client` of a run:
//! - Connection establishment, verified with a `ping`
//! - Database and collection handles
//! - Server version lookup
//! - Shutdown, which is safe to call whether or not `connect` succeeded

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::error::{ConnectionError, Result};

/// MongoDB connection manager
pub struct ConnectionManager {
    /// MongoDB client instance
    client: Option<Client>,

    /// Connection configuration
    config: ConnectionConfig,

    /// Current connection state
    state: ConnectionState,
}

/// Connection state information
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected
    Disconnected,

    /// Connected and ready
    Connected,

    /// Connection failed
    Failed(String),
}

impl ConnectionManager {
    /// Create a new connection manager
    ///
    /// # Arguments
    /// * `config` - Connection configuration (URI, namespace, timeout)
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            client: None,
            config,
            state: ConnectionState::Disconnected,
        }
    }

    /// Establish the connection and verify it with a ping
    ///
    /// The driver connects lazily, so the ping is what actually surfaces an
    /// unreachable server or bad credentials.
    pub async fn connect(&mut self) -> Result<()> {
        match self.open_client().await {
            Ok(client) => {
                self.client = Some(client);
                self.state = ConnectionState::Connected;
                info!("Connected to {}", sanitize_uri(&self.config.uri));
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    async fn open_client(&self) -> Result<Client> {
        let options = self.client_options().await?;
        let client = Client::with_options(options)
            .map_err(|e| ConnectionError::ConnectionFailed(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ConnectionError::PingFailed(e.to_string()))?;

        Ok(client)
    }

    /// Parse the URI and apply timeout and application name
    async fn client_options(&self) -> Result<ClientOptions> {
        let mut options = ClientOptions::parse(&self.config.uri)
            .await
            .map_err(|e| ConnectionError::InvalidUri(format!("{}: {}", self.config.uri, e)))?;

        let timeout = self.config.timeout_duration();
        options.server_selection_timeout = Some(timeout);
        options.connect_timeout = Some(timeout);
        if options.app_name.is_none() {
            options.app_name = Some(self.config.app_name.clone());
        }

        debug!(
            "Client options: timeout={}s, app_name={:?}",
            self.config.timeout, options.app_name
        );
        Ok(options)
    }

    /// Shut the client down
    ///
    /// A no-op when no client was ever created.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.client.take() {
            client.shutdown().await;
            debug!("Client shut down");
        }
        self.state = ConnectionState::Disconnected;
    }

    /// Get the MongoDB client
    pub fn get_client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| ConnectionError::NotConnected.into())
    }

    /// Get a database handle
    pub fn get_database(&self, name: &str) -> Result<Database> {
        Ok(self.get_client()?.database(name))
    }

    /// Get a handle on the configured database
    pub fn book_database(&self) -> Result<Database> {
        self.get_database(&self.config.database)
    }

    /// Query the server version with `buildInfo`
    pub async fn server_version(&self) -> Result<String> {
        let info = self
            .get_database("admin")?
            .run_command(doc! { "buildInfo": 1 })
            .await?;

        Ok(info.get_str("version").unwrap_or("unknown").to_string())
    }

    /// Get current connection state
    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Connection settings this manager was created with
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

/// Hide credentials in a connection URI for display
pub fn sanitize_uri(uri: &str) -> String {
    if let Some(proto_end) = uri.find("://") {
        if let Some(at) = uri.rfind('@') {
            if at > proto_end {
                return format!("{}***{}", &uri[..proto_end + 3], &uri[at..]);
            }
        }
    }
    uri.to_string()
}
