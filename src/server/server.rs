use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::server::*;
use crate::settings::Settings;
use anyhow::{anyhow, bail};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::sync::Arc;

pub struct Server {
    pub friend_requestor: Arc<dyn FriendRequestor>,
    pub friend_responder: Arc<dyn FriendResponder>,
    pub friendship_terminator: Arc<dyn FriendshipTerminator>,
    pub friendship_reader: Arc<dyn FriendshipReader>,
    /// Present with the `memory` store; lets callers seed members.
    pub member_registry: Option<Arc<MemoryMemberDirectory>>,
    /// Present with the `memory` events backend.
    pub recorded_events: Option<Arc<RecordingEventPublisher>>,
    pool: Option<MySqlPool>,
}

struct Storage {
    member_directory: Arc<dyn MemberDirectory>,
    friendship_repo: Arc<dyn FriendshipRepo>,
    tx_manager: Arc<dyn TxManager>,
    member_registry: Option<Arc<MemoryMemberDirectory>>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let storage = match settings.store.backend.as_str() {
            "memory" => {
                let store = MemoryStore::new();
                let registry = Arc::new(MemoryMemberDirectory::new());
                Storage {
                    member_directory: registry.clone(),
                    friendship_repo: Arc::new(MemoryFriendshipRepo::new(store.clone())),
                    tx_manager: Arc::new(MemoryTxManager::new(store)),
                    member_registry: Some(registry),
                    pool: None,
                }
            }
            "mysql" => {
                let dsn = settings
                    .store
                    .dsn
                    .as_deref()
                    .ok_or_else(|| anyhow!("store.dsn is required for the mysql backend"))?;
                let pool = MySqlPoolOptions::new()
                    .max_connections(settings.store.max_connections)
                    .connect(dsn)
                    .await?;
                if settings.store.ensure_schema {
                    ensure_schema(&pool).await?;
                }
                Storage {
                    member_directory: Arc::new(MySqlMemberDirectory::new(pool.clone())),
                    friendship_repo: Arc::new(MySqlFriendshipRepo::new(pool.clone())),
                    tx_manager: Arc::new(MySqlTxManager::new(pool.clone())),
                    member_registry: None,
                    pool: Some(pool),
                }
            }
            other => bail!("Unknown store backend: {}", other),
        };

        let mut recorded_events = None;
        let event_publisher: Arc<dyn EventPublisher> = match settings.events.backend.as_str() {
            "log" => Arc::new(LogEventPublisher),
            "outbox" => match &storage.pool {
                Some(pool) => Arc::new(MySqlOutboxPublisher::new(pool.clone())),
                None => bail!("the outbox events backend needs the mysql store"),
            },
            "memory" => {
                let recorder = Arc::new(RecordingEventPublisher::new());
                recorded_events = Some(recorder.clone());
                recorder
            }
            other => bail!("Unknown events backend: {}", other),
        };

        let friend_requestor: Arc<dyn FriendRequestor> = Arc::new(RealFriendRequestor::new(
            storage.member_directory.clone(),
            storage.friendship_repo.clone(),
            event_publisher.clone(),
            storage.tx_manager.clone(),
        ));
        let friend_responder: Arc<dyn FriendResponder> = Arc::new(RealFriendResponder::new(
            storage.member_directory.clone(),
            storage.friendship_repo.clone(),
            event_publisher.clone(),
            storage.tx_manager.clone(),
        ));
        let friendship_terminator: Arc<dyn FriendshipTerminator> =
            Arc::new(RealFriendshipTerminator::new(
                storage.member_directory.clone(),
                storage.friendship_repo.clone(),
                event_publisher,
                storage.tx_manager,
            ));
        let friendship_reader: Arc<dyn FriendshipReader> = Arc::new(RealFriendshipReader::new(
            storage.member_directory,
            storage.friendship_repo,
        ));

        info!(
            store = %settings.store.backend,
            events = %settings.events.backend,
            "server started"
        );

        Ok(Self {
            friend_requestor,
            friend_responder,
            friendship_terminator,
            friendship_reader,
            member_registry: storage.member_registry,
            recorded_events,
            pool: storage.pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("mysql pool closed");
        }
    }
}
