use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Notes table name
pub(crate) static DB_TABLE_NOTES: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_NOTES").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "notes"))
});
