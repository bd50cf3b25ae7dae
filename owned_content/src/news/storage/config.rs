use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// News table name
pub(crate) static DB_TABLE_NEWS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_NEWS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "news"))
});

/// Comments table name
pub(crate) static DB_TABLE_COMMENTS: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_COMMENTS").unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "comments"))
});
