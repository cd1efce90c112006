use hm_behavior::EngineError;
use hm_core::EntityId;
use hm_mobility::MobilityError;
use hm_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("character {0} has no behavior state")]
    MissingState(EntityId),

    #[error("behavior state for {0}, which is not a character in the world")]
    OrphanState(EntityId),

    #[error("content fault: {0}")]
    Engine(#[from] EngineError),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("invalid run config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
