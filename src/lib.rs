pub mod features;
pub mod shared;

use chrono::NaiveDate;
use log::{error, info, warn};
use rusqlite::Connection;
use features::logos::LogoService;
use shared::config::{
    initialize_application, initialize_logging_system, load_environment_variables,
    log_initialization_complete, EnvironmentConfig,
};
use shared::database::initialize_database;
use shared::errors::{AppError, AppResult};
use shared::utils::today_in;
use std::sync::{Mutex, MutexGuard};

/// アプリケーション状態（データベース接続・設定・ロゴ取得サービスを保持）
///
/// UI層はこの状態を1つだけ保持し、各機能の `commands` に渡す。
pub struct AppState {
    pub db: Mutex<Connection>,
    pub config: EnvironmentConfig,
    pub logos: LogoService,
}

impl AppState {
    /// 接続と設定からアプリケーション状態を作成する
    ///
    /// # 戻り値
    /// アプリケーション状態、またはロゴ取得サービスを作成できない場合は設定エラー
    pub fn new(conn: Connection, config: EnvironmentConfig) -> AppResult<Self> {
        let logos = LogoService::from_config(&config)?;

        Ok(Self {
            db: Mutex::new(conn),
            config,
            logos,
        })
    }

    /// データベース接続のロックを取得する
    ///
    /// # 戻り値
    /// ロック済みの接続、またはロックが汚染されている場合はエラー
    pub fn lock_db(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|e| AppError::concurrency(format!("データベースロックエラー: {e}")))
    }

    /// 設定されたタイムゾーンでの今日の日付
    pub fn today(&self) -> NaiveDate {
        today_in(self.config.timezone)
    }

    /// データベース接続を明示的に閉じる
    ///
    /// # 戻り値
    /// 成功時はOk(())、クローズに失敗した場合はエラー
    pub fn shutdown(self) -> AppResult<()> {
        let conn = match self.db.into_inner() {
            Ok(conn) => conn,
            Err(poisoned) => {
                warn!("汚染されたロックからデータベース接続を回収します");
                poisoned.into_inner()
            }
        };

        conn.close().map_err(|(_, e)| {
            error!("データベース接続のクローズに失敗しました: {e}");
            AppError::Database(e.to_string())
        })?;

        info!("データベース接続を閉じました");
        Ok(())
    }
}

/// 環境変数から設定を読み込み、アプリケーションを初期化する
///
/// # 戻り値
/// アプリケーション状態、または失敗時はエラー
pub fn initialize() -> AppResult<AppState> {
    load_environment_variables();
    let config = EnvironmentConfig::from_env()?;
    initialize_with_config(config)
}

/// 指定した設定でアプリケーションを初期化する
///
/// # 引数
/// * `config` - 環境設定
///
/// # 戻り値
/// アプリケーション状態、または失敗時はエラー
///
/// # 処理内容
/// 1. ログシステムの初期化
/// 2. データディレクトリとデータベースパスの決定
/// 3. データベース接続とテーブル作成
pub fn initialize_with_config(config: EnvironmentConfig) -> AppResult<AppState> {
    initialize_logging_system(&config);

    info!("アプリケーション初期化を開始します...");

    let init_result = initialize_application(&config).map_err(|e| {
        error!("アプリケーションの初期化に失敗しました: {e}");
        e
    })?;

    let conn = initialize_database(&init_result.database_path).map_err(|e| {
        error!("データベースの初期化に失敗しました: {e}");
        e
    })?;

    let state = AppState::new(conn, config)?;

    log_initialization_complete(&init_result);
    info!("アプリケーション初期化が完了しました");

    Ok(state)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_and_shutdown() {
        let state = test_support::test_state();

        {
            let conn = state.lock_db().unwrap();
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM colors", [], |row| row.get(0))
                .unwrap();
            assert_eq!(count, 24);
        }

        assert!(state.shutdown().is_ok());
    }

    #[test]
    fn test_today_uses_configured_timezone() {
        let state = test_support::test_state();
        assert_eq!(state.today(), today_in(chrono_tz::Asia::Tokyo));
    }
}
