//! Naming utilities for generated indexes

/// Prefix for plain indexes created from a table's `index` groups
pub const INDEX_PREFIX: &str = "shovel_";

/// Prefix for the unique index created from a table's `unique` groups
pub const UNIQUE_INDEX_PREFIX: &str = "u_";

/// Name of the unique index for a table.
///
/// Only the bare table name is used, so same-named tables in different
/// schemas share it.
pub fn unique_index_name(table_name: &str) -> String {
    format!("{}{}", UNIQUE_INDEX_PREFIX, table_name)
}

/// Name of a plain index over the given columns.
///
/// Spaces inside a column entry (`"block_num desc"`) become underscores.
pub fn index_name<S: AsRef<str>>(columns: &[S]) -> String {
    let joined = columns
        .iter()
        .map(|c| c.as_ref().replace(' ', "_"))
        .collect::<Vec<_>>()
        .join("_");
    format!("{}{}", INDEX_PREFIX, joined)
}
