//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a row in either the income or the expense table.
///
/// IDs are only unique within their own table, so a [TransactionId] must
/// always travel together with the ledger it belongs to.
pub type TransactionId = DatabaseId;
