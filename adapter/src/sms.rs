use async_trait::async_trait;
use kernel::sms::{ReservationNotice, SmsNotifier};
use shared::{
    config::SmsConfig,
    error::{AppError, AppResult},
};

/// SMS ゲートウェイの HTTP クライアント実装。
pub struct SmsClientImpl {
    client: reqwest::Client,
    config: SmsConfig,
}

impl SmsClientImpl {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SmsNotifier for SmsClientImpl {
    async fn send_reservation_notice(&self, notice: ReservationNotice) -> AppResult<()> {
        if !self.config.enabled {
            tracing::debug!("SMS 送信は無効化されているためスキップします");
            return Ok(());
        }

        let body = serde_json::json!({
            "message": {
                "from": self.config.from_number,
                "to": normalize_phone(&notice.customer_phone),
                "text": build_message(&notice),
            }
        });

        let res = self
            .client
            .post(format!("{}/messages/v4/send", self.config.endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("SMS 送信に失敗しました: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "SMS ゲートウェイがエラーを返しました: {}",
                res.status()
            )));
        }

        tracing::info!(
            reservation_id = %notice.reservation_id,
            "予約確認 SMS を送信しました"
        );
        Ok(())
    }
}

// 受信番号は「01012345678」形式にする
fn normalize_phone(phone: &str) -> String {
    phone.replace('-', "")
}

fn build_message(notice: &ReservationNotice) -> String {
    format!(
        "[KEYSTONE 脱出ゲーム予約]\n\n\
         予約番号: {}\n\
         予約者: {}\n\
         テーマ: {}\n\
         日付: {}\n\
         時間: {}\n\
         人数: {}名\n\
         合計金額: {}円\n\n\
         上記の合計金額を指定口座へお振込みいただいた時点で予約が確定します。\n\
         お振込みの際は必ず予約者名義でお願いします。\n\
         入金が確認できない場合、予約は取消されます。\n\
         取消はホームページからお手続きいただけます。",
        notice.reservation_id,
        notice.customer_name,
        notice.theme_name,
        notice.reservation_date,
        notice.start_time.format("%H:%M"),
        notice.head_count,
        notice.total_price,
    )
}
