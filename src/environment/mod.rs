pub mod error;
pub mod model;
pub mod storage;
pub mod types;

pub use error::{ApiError, ConfigError};
pub use model::{Model, RestTransport, Transport};
pub use storage::Store;
pub use types::Config;

/// Everything the comment effects need: the API and the store they report into.
#[derive(Clone, Debug)]
pub struct Environment {
    pub model: Model,
    pub store: Store,
}

impl Environment {
    pub fn new(model: Model, store: Store) -> Self {
        Self { model, store }
    }

    /// A fresh, empty store talking to the API described by `config`
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Ok(Self::new(Model::new(config)?, Store::default()))
    }
}
