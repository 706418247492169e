use shared::config::AdminConfig;

/// 管理者 API の認可ポリシー。X-ADMIN-KEY ヘッダの値を設定済みの
/// 鍵と比較する。開発環境向けの明示的なバイパスフラグを持つ。
#[derive(Debug, Clone)]
pub struct AdminKeyPolicy {
    api_key: String,
    bypass: bool,
}

impl AdminKeyPolicy {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            bypass: config.bypass,
        }
    }

    pub fn authorize(&self, provided: Option<&str>) -> bool {
        if self.bypass {
            return true;
        }
        matches!(provided, Some(key) if key == self.api_key)
    }
}
