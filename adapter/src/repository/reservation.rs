use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use derive_new::new;
use kernel::model::{
    cancellation::event::{CancellationLedgerAction, NewCancellationRecord},
    id::{CancelId, ReservationId, ThemeId, TimeSlotId},
    list::PaginatedList,
    reservation::{
        event::{
            CancelReservation, ConfirmReservation, CreateReservation, ReservationListOptions,
            UpdateReservation,
        },
        Reservation, ReservationStatus,
    },
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

// theme / time_slot と JOIN した予約 1 件分の SELECT 句。
// ReservationRow のカラム構成と一致させること。
const SELECT_RESERVATION: &str = r#"
    SELECT
    r.reservation_id,
    r.reservation_date,
    r.customer_name,
    r.customer_phone,
    r.head_count,
    r.payment_type,
    r.reservation_status,
    r.refund_bank,
    r.refund_account,
    r.cancelled_at,
    t.theme_id,
    t.theme_name,
    t.price_per_person,
    s.time_slot_id,
    s.start_time,
    s.end_time
    FROM reservation AS r
    INNER JOIN theme AS t ON r.theme_id = t.theme_id
    INNER JOIN time_slot AS s ON r.time_slot_id = s.time_slot_id
"#;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

// 部分一意インデックス（有効な予約は同一枠に高々 1 件）への違反は
// 予約の重複として返す
fn map_reservation_insert_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::AlreadyBooked("この時間枠は既に予約されています。".into())
        }
        _ => AppError::SpecificOperationError(e),
    }
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のテーマ・時間枠が存在し、公開中か
        // - 同一 (テーマ, 時間枠, 日付) に有効な予約が存在しないか
        {
            //
            // ① テーマの存在確認 ＋ is_active チェック
            //
            let theme_active = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT is_active
                FROM theme
                WHERE theme_id = $1
                "#,
            )
            .bind(event.theme_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let theme_active = match theme_active {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "テーマ（{}）が見つかりませんでした。",
                        event.theme_id
                    )))
                }
                Some(a) => a,
            };

            if !theme_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "テーマ（{}）は現在予約を受け付けていません。",
                    event.theme_id
                )));
            }

            //
            // ② 時間枠の存在確認（テーマへの所属も含む）＋ is_active チェック
            //
            let slot_active = sqlx::query_scalar::<_, bool>(
                r#"
                SELECT is_active
                FROM time_slot
                WHERE time_slot_id = $1 AND theme_id = $2
                "#,
            )
            .bind(event.time_slot_id)
            .bind(event.theme_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let slot_active = match slot_active {
                None => {
                    return Err(AppError::EntityNotFound(format!(
                        "時間枠（{}）が見つかりませんでした。",
                        event.time_slot_id
                    )))
                }
                Some(a) => a,
            };

            if !slot_active {
                return Err(AppError::UnprocessableEntity(format!(
                    "時間枠（{}）は現在予約を受け付けていません。",
                    event.time_slot_id
                )));
            }

            //
            // ③ 同一 (テーマ, 時間枠, 日付) に有効な予約（WAIT / CONFIRMED）が
            //    存在しないか確認
            //
            let occupied = sqlx::query_scalar::<_, ReservationId>(
                r#"
                SELECT reservation_id
                FROM reservation
                WHERE theme_id = $1
                  AND time_slot_id = $2
                  AND reservation_date = $3
                  AND reservation_status IN ('WAIT', 'CONFIRMED')
                LIMIT 1
                "#,
            )
            .bind(event.theme_id)
            .bind(event.time_slot_id)
            .bind(event.reservation_date)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if occupied.is_some() {
                return Err(AppError::AlreadyBooked(
                    "この時間枠は既に予約されています。".into(),
                ));
            }
        }

        // チェックを通過したので reservation テーブルにレコードを追加する。
        // 同時予約のすり抜けは部分一意インデックスで防ぎ、一意制約違反は
        // AlreadyBooked として返す
        let reservation_id = sqlx::query_scalar::<_, ReservationId>(
            r#"
                INSERT INTO reservation
                (theme_id, time_slot_id, reservation_date,
                customer_name, customer_phone, head_count,
                payment_type, reservation_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING reservation_id
                ;
            "#,
        )
        .bind(event.theme_id)
        .bind(event.time_slot_id)
        .bind(event.reservation_date)
        .bind(&event.customer_name)
        .bind(&event.customer_phone)
        .bind(event.head_count)
        .bind(&event.payment_type)
        .bind(event.reservation_status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_reservation_insert_error)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATION} WHERE r.reservation_id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(reservation_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(Reservation::try_from).transpose()
    }

    // 予約番号・予約者名・電話番号の完全一致でのみヒットする
    async fn find_by_confirmation(
        &self,
        event: ConfirmReservation,
    ) -> AppResult<Option<Reservation>> {
        let sql = format!(
            "{SELECT_RESERVATION} \
             WHERE r.reservation_id = $1 \
               AND r.customer_name = $2 \
               AND r.customer_phone = $3"
        );
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(event.reservation_id)
            .bind(&event.customer_name)
            .bind(&event.customer_phone)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        row.map(Reservation::try_from).transpose()
    }

    // 指定テーマ・日付の予約済み時間枠を取得する。
    // 取消済みの枠はすぐ再予約できるよう、CANCELLED は除外する
    async fn find_reserved_slot_ids(
        &self,
        theme_id: ThemeId,
        date: NaiveDate,
    ) -> AppResult<Vec<TimeSlotId>> {
        sqlx::query_scalar::<_, TimeSlotId>(
            r#"
                SELECT time_slot_id
                FROM reservation
                WHERE theme_id = $1
                  AND reservation_date = $2
                  AND reservation_status IN ('WAIT', 'CONFIRMED')
                ;
            "#,
        )
        .bind(theme_id)
        .bind(date)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(
        &self,
        options: ReservationListOptions,
    ) -> AppResult<PaginatedList<Reservation>> {
        let ReservationListOptions {
            limit,
            offset,
            keyword,
        } = options;
        let pattern = keyword.map(|k| format!("%{k}%"));

        let total: i64 = match &pattern {
            Some(pattern) => sqlx::query_scalar(
                r#"
                    SELECT COUNT(*)
                    FROM reservation AS r
                    WHERE r.customer_name LIKE $1
                       OR r.customer_phone LIKE $1
                       OR CAST(r.reservation_id AS TEXT) LIKE $1
                    ;
                "#,
            )
            .bind(pattern)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?,
            None => sqlx::query_scalar("SELECT COUNT(*) FROM reservation")
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?,
        };

        let rows = match &pattern {
            Some(pattern) => {
                let sql = format!(
                    "{SELECT_RESERVATION} \
                     WHERE r.customer_name LIKE $1 \
                        OR r.customer_phone LIKE $1 \
                        OR CAST(r.reservation_id AS TEXT) LIKE $1 \
                     ORDER BY r.reservation_id DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, ReservationRow>(&sql)
                    .bind(pattern)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
            None => {
                let sql = format!(
                    "{SELECT_RESERVATION} \
                     ORDER BY r.reservation_id DESC \
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, ReservationRow>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(self.db.inner_ref())
                    .await
            }
        }
        .map_err(AppError::SpecificOperationError)?;

        let items = rows
            .into_iter()
            .map(Reservation::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    // 部分更新を行う
    async fn update(
        &self,
        reservation_id: ReservationId,
        event: UpdateReservation,
    ) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        let sql = format!("{SELECT_RESERVATION} WHERE r.reservation_id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(reservation_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{reservation_id}）が見つかりませんでした。"
            )));
        };
        let current: Reservation = row.try_into()?;

        // キャンセル済み予約への status / refund 系の書き込みは
        // ここで黙って落ちる（kernel 側のルール）
        let resolved = event.resolve(current.reservation_status)?;

        let now = Utc::now();
        let res = sqlx::query(
            r#"
                UPDATE reservation
                SET
                    reservation_status = COALESCE($2, reservation_status),
                    head_count = COALESCE($3, head_count),
                    refund_bank = COALESCE($4, refund_bank),
                    refund_account = COALESCE($5, refund_account),
                    cancelled_at = CASE WHEN $6 THEN $7 ELSE cancelled_at END
                WHERE reservation_id = $1
                ;
            "#,
        )
        .bind(reservation_id)
        .bind(resolved.reservation_status.map(|s| s.as_str()))
        .bind(resolved.head_count)
        .bind(resolved.refund_bank.as_deref())
        .bind(resolved.refund_account.as_deref())
        .bind(resolved.triggers_cancellation)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        // CANCELLED への遷移なら、更新後の値のスナップショットで
        // 取消台帳へ追記する（既存レコードがあれば何もしない）
        if resolved.triggers_cancellation {
            let mut updated = current.clone();
            updated.reservation_status = ReservationStatus::Cancelled;
            if let Some(head_count) = resolved.head_count {
                updated.head_count = head_count;
            }
            if let Some(bank) = resolved.refund_bank.clone() {
                updated.refund_bank = Some(bank);
            }
            if let Some(account) = resolved.refund_account.clone() {
                updated.refund_account = Some(account);
            }
            self.insert_cancellation_record(&mut tx, NewCancellationRecord::snapshot(&updated, now))
                .await?;
        }

        // 返金状態の更新。台帳レコードが存在する場合のみ反映される
        // （これが refund_status を進める唯一の経路）
        if let Some(refund_status) = resolved.refund_status {
            sqlx::query(
                r#"
                    UPDATE reservation_cancel
                    SET refund_status = $2
                    WHERE reservation_id = $1
                    ;
                "#,
            )
            .bind(reservation_id)
            .bind(refund_status.as_str())
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    // 予約取消操作を行う
    async fn cancel(&self, event: CancelReservation) -> AppResult<CancelId> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        let sql = format!("{SELECT_RESERVATION} WHERE r.reservation_id = $1");
        let row = sqlx::query_as::<_, ReservationRow>(&sql)
            .bind(event.reservation_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                event.reservation_id
            )));
        };
        let reservation: Reservation = row.try_into()?;

        // 既に台帳レコードがある場合はその ID を返すだけ（冪等）
        let existing = sqlx::query_scalar::<_, CancelId>(
            r#"
                SELECT cancel_id
                FROM reservation_cancel
                WHERE reservation_id = $1
                ;
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if let CancellationLedgerAction::ReuseExisting(cancel_id) =
            CancellationLedgerAction::for_existing(existing)
        {
            return Ok(cancel_id);
        }

        let now = Utc::now();
        let res = sqlx::query(
            r#"
                UPDATE reservation
                SET reservation_status = 'CANCELLED', cancelled_at = $2
                WHERE reservation_id = $1
                ;
            "#,
        )
        .bind(event.reservation_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been cancelled".into(),
            ));
        }

        let cancel_id = self
            .insert_cancellation_record(&mut tx, NewCancellationRecord::snapshot(&reservation, now))
            .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(cancel_id)
    }
}

impl ReservationRepositoryImpl {
    // create, update, cancel メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 取消台帳への追記。同じ予約 ID のレコードが既にあれば作成を
    // スキップし、既存の ID を返す（冪等）
    async fn insert_cancellation_record(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        record: NewCancellationRecord,
    ) -> AppResult<CancelId> {
        let existing = sqlx::query_scalar::<_, CancelId>(
            r#"
                SELECT cancel_id
                FROM reservation_cancel
                WHERE reservation_id = $1
                ;
            "#,
        )
        .bind(record.reservation_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        if let CancellationLedgerAction::ReuseExisting(cancel_id) =
            CancellationLedgerAction::for_existing(existing)
        {
            return Ok(cancel_id);
        }

        sqlx::query_scalar::<_, CancelId>(
            r#"
                INSERT INTO reservation_cancel
                (reservation_id, theme_name, reservation_date, start_time,
                customer_name, customer_phone, head_count, payment_type,
                refund_bank, refund_account, refund_status,
                reservation_status, cancelled_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                'PENDING', 'CANCELLED', $11)
                RETURNING cancel_id
                ;
            "#,
        )
        .bind(record.reservation_id)
        .bind(&record.theme_name)
        .bind(record.reservation_date)
        .bind(record.start_time)
        .bind(&record.customer_name)
        .bind(&record.customer_phone)
        .bind(record.head_count)
        .bind(&record.payment_type)
        .bind(&record.refund_bank)
        .bind(&record.refund_account)
        .bind(record.cancelled_at)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct StubDbError {
        unique: bool,
    }

    impl fmt::Display for StubDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if self.unique {
                f.write_str("duplicate key value violates unique constraint")
            } else {
                f.write_str("database error")
            }
        }
    }

    impl StdError for StubDbError {}

    impl DatabaseError for StubDbError {
        fn message(&self) -> &str {
            "database error"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    #[test]
    fn unique_violation_on_insert_maps_to_already_booked() {
        let e = sqlx::Error::Database(Box::new(StubDbError { unique: true }));
        assert!(matches!(
            map_reservation_insert_error(e),
            AppError::AlreadyBooked(_)
        ));
    }

    #[test]
    fn other_database_errors_are_not_masked() {
        let e = sqlx::Error::Database(Box::new(StubDbError { unique: false }));
        assert!(matches!(
            map_reservation_insert_error(e),
            AppError::SpecificOperationError(_)
        ));
    }
}
