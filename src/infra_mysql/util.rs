use super::repo_tx_mysql::MySqlTx;
use crate::application_port::FriendshipError;
use crate::domain_port::*;
use sqlx::mysql::MySqlDatabaseError;

const ER_DUP_ENTRY: u16 = 1062;
const ER_LOCK_DEADLOCK: u16 = 1213;

/// Every `StorageTx` handed to the MySQL repos comes from `MySqlTxManager`.
pub fn downcast<'a, 't>(tx: &'a mut dyn StorageTx<'t>) -> &'a mut MySqlTx<'t> {
    unsafe {
        let p = tx as *mut dyn StorageTx<'t>;
        let p = p as *mut MySqlTx<'t>;
        &mut *p
    }
}

fn mysql_error_number(err: &sqlx::Error) -> Option<u16> {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return Some(mysql_err.number());
        }
    }
    None
}

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(ER_DUP_ENTRY)
}

pub fn is_deadlock(err: &sqlx::Error) -> bool {
    mysql_error_number(err) == Some(ER_LOCK_DEADLOCK)
}

/// Maps a driver error into the store variant, naming the failed step.
pub fn store_error(context: &str, err: sqlx::Error) -> FriendshipError {
    if is_deadlock(&err) {
        return FriendshipError::Store(format!("{context}: deadlock, transaction rolled back"));
    }
    FriendshipError::Store(format!("{context}: {err}"))
}
