use crate::shared::errors::{AppError, AppResult};
use chrono_tz::Tz;
use std::path::PathBuf;
use url::Url;

/// ロゴ取得サービスのデフォルトURL
pub const DEFAULT_LOGO_BASE_URL: &str = "https://logo.clearbit.com";

/// ロゴ取得のデフォルトタイムアウト（秒）
pub const DEFAULT_LOGO_TIMEOUT_SECS: u64 = 5;

/// デフォルトのタイムゾーン
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Tokyo;

/// アプリケーションデータディレクトリ名
const APP_DIR_NAME: &str = "subtrack";

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: Environment,
    /// ログレベル
    pub log_level: String,
    /// 「今日」の判定に使うタイムゾーン
    pub timezone: Tz,
    /// データベースファイルを置くディレクトリ
    pub data_dir: PathBuf,
    /// ロゴ取得サービスのベースURL（パスを追加できるURLであることを検証済み）
    pub logo_base_url: Url,
    /// ロゴ取得のタイムアウト（秒）
    pub logo_timeout_secs: u64,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # 戻り値
    /// 環境設定、または値が不正な場合はエラー
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// # 引数
    /// * `lookup` - 変数名から値を返す関数
    ///
    /// # 戻り値
    /// 環境設定、または値が不正な場合はエラー
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = environment_from(lookup("ENVIRONMENT"));
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| {
            if environment == Environment::Development {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        let timezone = match lookup("APP_TIMEZONE") {
            Some(name) => name.parse::<Tz>().map_err(|e| {
                AppError::configuration(format!("APP_TIMEZONE が不正です ({name}): {e}"))
            })?,
            None => DEFAULT_TIMEZONE,
        };

        let data_dir = match lookup("APP_DATA_DIR") {
            Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        let logo_base_url = parse_logo_base_url(
            lookup("LOGO_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_LOGO_BASE_URL),
        )?;

        let logo_timeout_secs = match lookup("LOGO_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                AppError::configuration(format!("LOGO_TIMEOUT_SECS が不正です ({raw}): {e}"))
            })?,
            None => DEFAULT_LOGO_TIMEOUT_SECS,
        };

        Ok(Self {
            environment,
            log_level,
            timezone,
            data_dir,
            logo_base_url,
            logo_timeout_secs,
        })
    }
}

/// ロゴ取得元のURLを検証する
///
/// # 引数
/// * `raw` - 環境変数の値
///
/// # 戻り値
/// パスを追加できるURL、または不正な場合は設定エラー
fn parse_logo_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::configuration(format!("LOGO_BASE_URL が不正です ({raw}): {e}")))?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::configuration(format!(
            "LOGO_BASE_URL はhttp(s)のURLで指定してください: {raw}"
        )));
    }

    Ok(url)
}

/// OS標準のデータディレクトリ配下のアプリ用ディレクトリを取得する
fn default_data_dir() -> AppResult<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| AppError::configuration("データディレクトリを特定できません"))
}

/// 環境変数の値から実行環境を判定する
fn environment_from(value: Option<String>) -> Environment {
    match value.as_deref() {
        Some("production") => Environment::Production,
        Some(_) => Environment::Development,
        None => {
            if cfg!(debug_assertions) {
                Environment::Development
            } else {
                Environment::Production
            }
        }
    }
}

/// 環境に応じたデータベースファイル名を取得する
///
/// # 引数
/// * `env` - 実行環境
///
/// # 戻り値
/// データベースファイル名
///
/// # ファイル名の規則
/// - 開発環境: "dev_subscriptions.db"
/// - プロダクション環境: "subscriptions.db"
pub fn get_database_filename(env: Environment) -> &'static str {
    match env {
        Environment::Development => "dev_subscriptions.db",
        Environment::Production => "subscriptions.db",
    }
}

/// 環境に応じた.envファイルを読み込む
pub fn load_environment_variables() {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            // 環境固有のファイルがない場合は、デフォルトの.envを試行
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// # 引数
/// * `env_config` - 環境設定
///
/// # 処理内容
/// 1. ログレベルを設定
/// 2. env_loggerを初期化（初期化済みの場合は何もしない）
pub fn initialize_logging_system(env_config: &EnvironmentConfig) {
    let log_level = match env_config.log_level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    };

    let result = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    if result.is_err() {
        log::debug!("ログシステムは既に初期化されています");
        return;
    }

    log::info!(
        "ログシステムを初期化しました: level={}, environment={:?}",
        env_config.log_level, env_config.environment
    );
}
