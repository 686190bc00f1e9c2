//! Session wrapper — create/find/join как command/result events
//!
//! HYBRID ARCHITECTURE: matchmaking backend (online subsystem) живёт
//! снаружи ECS за trait'ом. Симуляция пишет SessionCommand, раз за тик
//! система прокачивает их через backend и отвечает SessionResult.
//! Успешный create/join дополнительно даёт LevelTransition — сигнал
//! внешнему слою грузить уровень.
//!
//! LoopbackBackend — дефолтная in-process реализация (детерминистичные
//! session id через ChaCha8Rng), достаточно для headless-симуляции и тестов.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Ошибки matchmaking backend'а
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session {id} not found")]
    NotFound { id: u64 },
    #[error("session {id} is full")]
    Full { id: u64 },
    #[error("backend unavailable")]
    BackendUnavailable,
}

/// Настройки создаваемой сессии
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub max_players: u32,
    pub map_name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_players: 4,
            map_name: "arena".to_string(),
        }
    }
}

/// Найденная сессия (результат Find)
#[derive(Debug, Clone, PartialEq)]
pub struct FoundSession {
    pub id: u64,
    pub map_name: String,
    pub open_slots: u32,
}

/// Command event: запрос к matchmaking backend'у
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Create { settings: SessionSettings },
    Find,
    Join { id: u64 },
}

/// Result event: ответ backend'а (ровно один на command)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SessionResult {
    Created { success: bool, id: Option<u64> },
    FindCompleted { sessions: Vec<FoundSession> },
    Joined { outcome: Result<String, SessionError> },
}

/// Event: внешнему слою пора грузить уровень
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LevelTransition {
    pub map_name: String,
    /// Connect string при join (None = мы хост)
    pub connection: Option<String>,
}

/// Seam для matchmaking: симуляция не знает, loopback это или
/// реальный online subsystem
pub trait SessionBackend: Send + Sync {
    fn create(&mut self, settings: &SessionSettings) -> Result<u64, SessionError>;
    fn find(&mut self) -> Result<Vec<FoundSession>, SessionError>;
    fn join(&mut self, id: u64) -> Result<String, SessionError>;
}

struct HostedSession {
    id: u64,
    settings: SessionSettings,
    players: u32,
}

/// In-process backend: сессии живут в памяти, id детерминистичны по seed
pub struct LoopbackBackend {
    rng: ChaCha8Rng,
    sessions: Vec<HostedSession>,
}

impl LoopbackBackend {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            sessions: Vec::new(),
        }
    }
}

impl SessionBackend for LoopbackBackend {
    fn create(&mut self, settings: &SessionSettings) -> Result<u64, SessionError> {
        let id: u64 = self.rng.gen();
        self.sessions.push(HostedSession {
            id,
            settings: settings.clone(),
            players: 1, // хост занимает слот
        });
        Ok(id)
    }

    fn find(&mut self) -> Result<Vec<FoundSession>, SessionError> {
        Ok(self
            .sessions
            .iter()
            .filter(|session| session.players < session.settings.max_players)
            .map(|session| FoundSession {
                id: session.id,
                map_name: session.settings.map_name.clone(),
                open_slots: session.settings.max_players - session.players,
            })
            .collect())
    }

    fn join(&mut self, id: u64) -> Result<String, SessionError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|session| session.id == id)
            .ok_or(SessionError::NotFound { id })?;
        if session.players >= session.settings.max_players {
            return Err(SessionError::Full { id });
        }
        session.players += 1;
        Ok(format!("loopback:{}", id))
    }
}

/// Resource-обёртка над backend'ом
#[derive(Resource)]
pub struct SessionService {
    backend: Box<dyn SessionBackend>,
}

impl SessionService {
    pub fn new(backend: Box<dyn SessionBackend>) -> Self {
        Self { backend }
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new(Box::new(LoopbackBackend::new(0)))
    }
}

/// Система: прокачка commands через backend, раз за тик
pub fn process_session_commands(
    mut service: ResMut<SessionService>,
    mut commands: EventReader<SessionCommand>,
    mut results: EventWriter<SessionResult>,
    mut transitions: EventWriter<LevelTransition>,
) {
    for command in commands.read() {
        match command {
            SessionCommand::Create { settings } => {
                match service.backend.create(settings) {
                    Ok(id) => {
                        crate::logger::log_info(&format!(
                            "🎮 Session {} created (map {})",
                            id, settings.map_name
                        ));
                        results.write(SessionResult::Created {
                            success: true,
                            id: Some(id),
                        });
                        // Хост сразу едет на свой уровень
                        transitions.write(LevelTransition {
                            map_name: settings.map_name.clone(),
                            connection: None,
                        });
                    }
                    Err(error) => {
                        crate::logger::log_warning(&format!("Session create failed: {}", error));
                        results.write(SessionResult::Created {
                            success: false,
                            id: None,
                        });
                    }
                }
            }
            SessionCommand::Find => {
                let sessions = service.backend.find().unwrap_or_default();
                crate::logger::log(&format!("Session find: {} open", sessions.len()));
                results.write(SessionResult::FindCompleted { sessions });
            }
            SessionCommand::Join { id } => {
                let outcome = service.backend.join(*id);
                if let Ok(connection) = &outcome {
                    crate::logger::log_info(&format!("🎮 Joined session {}", id));
                    transitions.write(LevelTransition {
                        map_name: String::new(), // карту диктует хост
                        connection: Some(connection.clone()),
                    });
                }
                results.write(SessionResult::Joined { outcome });
            }
        }
    }
}

/// Session Plugin
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionCommand>()
            .add_event::<SessionResult>()
            .add_event::<LevelTransition>()
            .init_resource::<SessionService>();

        app.add_systems(FixedUpdate, process_session_commands);
    }
}
