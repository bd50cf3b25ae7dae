mod config;
mod types;

pub(crate) use config::{
    DB_TABLE_PREFIX, GENERIC_DATA_STORE_TYPE, GENERIC_DATA_STORE_URL, connect_data_store,
};
pub use types::DataStore;
