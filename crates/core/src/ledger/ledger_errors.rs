use thiserror::Error;

/// Errors raised while replaying transfers into the ledger.
#[derive(Error, Debug, PartialEq)]
pub enum LedgerError {
    #[error("Pool {0} was already ingested")]
    PoolAlreadyIngested(String),

    #[error(
        "Event out of order in pool {pool}: ({block}, {log_index}) follows ({previous_block}, {previous_log_index})"
    )]
    OutOfOrder {
        pool: String,
        block: u64,
        log_index: u32,
        previous_block: u64,
        previous_log_index: u32,
    },

    #[error("Event ({block}, {log_index}) belongs to pool {event_pool}, not {pool}")]
    ForeignEvent {
        pool: String,
        event_pool: String,
        block: u64,
        log_index: u32,
    },

    #[error("Balance of {account} in pool {pool} overflows at block {block}")]
    Overflow {
        pool: String,
        account: String,
        block: u64,
    },
}
