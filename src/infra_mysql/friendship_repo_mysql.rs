use super::util::{downcast, is_dup_key, store_error};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::mysql::MySqlRow;
use sqlx::{Database, Decode, Encode, MySqlPool, Row, Type};

impl<'r, DB: Database> Decode<'r, DB> for FriendshipStatus
where
    &'r str: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <&str as Decode<DB>>::decode(value)?;
        Ok(s.parse()?)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for FriendshipStatus
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        self.to_string().encode_by_ref(buf)
    }
}

impl<DB: Database> Type<DB> for FriendshipStatus
where
    String: Type<DB>,
{
    fn type_info() -> <DB as Database>::TypeInfo {
        <String as Type<DB>>::type_info()
    }

    fn compatible(ty: &<DB as Database>::TypeInfo) -> bool {
        <String as Type<DB>>::compatible(ty)
    }
}

const SELECT_FRIENDSHIP: &str = r#"
SELECT id, member_id, friend_member_id, status, created_at, updated_at
FROM friendship
"#;

fn side_column(side: Side) -> &'static str {
    match side {
        Side::Subject => "member_id",
        Side::Target => "friend_member_id",
    }
}

pub struct MySqlFriendshipRepo {
    pool: MySqlPool,
}

impl MySqlFriendshipRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlFriendshipRepo { pool }
    }

    fn row_to_friendship(r: &MySqlRow) -> Result<Friendship, FriendshipError> {
        let decode = |e: sqlx::Error| FriendshipError::Store(format!("decode friendship: {e}"));

        let relationship = Relationship::new(
            r.try_get::<MemberId, _>("member_id").map_err(decode)?,
            r.try_get::<MemberId, _>("friend_member_id").map_err(decode)?,
        )
        .map_err(|e| FriendshipError::Store(format!("corrupt friendship row: {e}")))?;

        Ok(Friendship::restore(
            r.try_get::<FriendshipId, _>("id").map_err(decode)?,
            relationship,
            r.try_get::<FriendshipStatus, _>("status").map_err(decode)?,
            r.try_get::<DateTime<Utc>, _>("created_at").map_err(decode)?,
            r.try_get::<DateTime<Utc>, _>("updated_at").map_err(decode)?,
        ))
    }

    fn rows_to_friendships(rows: &[MySqlRow]) -> Result<Vec<Friendship>, FriendshipError> {
        rows.iter().map(Self::row_to_friendship).collect()
    }
}

#[async_trait::async_trait]
impl FriendshipRepo for MySqlFriendshipRepo {
    async fn find_by_pair_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let tx = downcast(tx);

        let row = sqlx::query(&format!(
            "{SELECT_FRIENDSHIP} WHERE member_id = ? AND friend_member_id = ? FOR UPDATE"
        ))
        .bind(relationship.member_id())
        .bind(relationship.friend_member_id())
        .fetch_optional(tx.conn())
        .await
        .map_err(|e| store_error("select friendship by pair", e))?;

        row.as_ref().map(Self::row_to_friendship).transpose()
    }

    async fn find_by_id_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let tx = downcast(tx);

        let row = sqlx::query(&format!("{SELECT_FRIENDSHIP} WHERE id = ? FOR UPDATE"))
            .bind(friendship_id)
            .fetch_optional(tx.conn())
            .await
            .map_err(|e| store_error("select friendship by id", e))?;

        row.as_ref().map(Self::row_to_friendship).transpose()
    }

    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError> {
        let tx = downcast(tx);

        let res = sqlx::query(
            r#"
INSERT INTO friendship (id, member_id, friend_member_id, status, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(friendship.id())
        .bind(friendship.member_id())
        .bind(friendship.friend_member_id())
        .bind(friendship.status())
        .bind(friendship.created_at())
        .bind(friendship.updated_at())
        .execute(tx.conn())
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(e) if is_dup_key(&e) => Err(FriendshipError::DuplicatePair {
                member_id: friendship.member_id(),
                friend_member_id: friendship.friend_member_id(),
            }),
            Err(e) => Err(store_error("insert friendship", e)),
        }
    }

    async fn update_status_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        friendship: &Friendship,
    ) -> Result<(), FriendshipError> {
        let tx = downcast(tx);

        sqlx::query("UPDATE friendship SET status = ?, updated_at = ? WHERE id = ?")
            .bind(friendship.status())
            .bind(friendship.updated_at())
            .bind(friendship.id())
            .execute(tx.conn())
            .await
            .map_err(|e| store_error("update friendship status", e))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        friendship_id: FriendshipId,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let row = sqlx::query(&format!("{SELECT_FRIENDSHIP} WHERE id = ?"))
            .bind(friendship_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("select friendship by id", e))?;

        row.as_ref().map(Self::row_to_friendship).transpose()
    }

    async fn find_by_pair(
        &self,
        relationship: Relationship,
    ) -> Result<Option<Friendship>, FriendshipError> {
        let row = sqlx::query(&format!(
            "{SELECT_FRIENDSHIP} WHERE member_id = ? AND friend_member_id = ?"
        ))
        .bind(relationship.member_id())
        .bind(relationship.friend_member_id())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("select friendship by pair", e))?;

        row.as_ref().map(Self::row_to_friendship).transpose()
    }

    async fn exists(
        &self,
        relationship: Relationship,
        status: FriendshipStatus,
    ) -> Result<bool, FriendshipError> {
        let count: i64 = sqlx::query_scalar(
            r#"
SELECT COUNT(1)
FROM friendship
WHERE member_id = ? AND friend_member_id = ? AND status = ?
"#,
        )
        .bind(relationship.member_id())
        .bind(relationship.friend_member_id())
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("friendship exists", e))?;

        Ok(count > 0)
    }

    async fn list_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        page: PageRequest,
    ) -> Result<Page<Friendship>, FriendshipError> {
        let total = self.count_by_member(member_id, side, status).await?;
        if total == 0 {
            return Ok(Page::new(Vec::new(), page, 0));
        }

        let order = page.direction.as_sql();
        let rows = sqlx::query(&format!(
            "{SELECT_FRIENDSHIP} WHERE {} = ? AND status = ? \
             ORDER BY created_at {order}, id {order} LIMIT ? OFFSET ?",
            side_column(side)
        ))
        .bind(member_id)
        .bind(status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list friendships", e))?;

        Ok(Page::new(Self::rows_to_friendships(&rows)?, page, total))
    }

    async fn list_all_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
        direction: SortDirection,
    ) -> Result<Vec<Friendship>, FriendshipError> {
        let order = direction.as_sql();
        let rows = sqlx::query(&format!(
            "{SELECT_FRIENDSHIP} WHERE {} = ? AND status = ? ORDER BY created_at {order}, id {order}",
            side_column(side)
        ))
        .bind(member_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("list all friendships", e))?;

        Self::rows_to_friendships(&rows)
    }

    async fn count_by_member(
        &self,
        member_id: MemberId,
        side: Side,
        status: FriendshipStatus,
    ) -> Result<u64, FriendshipError> {
        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM friendship WHERE {} = ? AND status = ?",
            side_column(side)
        ))
        .bind(member_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("count friendships", e))?;

        Ok(count as u64)
    }
}
