/// 環境設定とログ初期化
pub mod environment;

/// アプリケーションデータディレクトリとデータベースパスの初期化
pub mod initialization;

pub use environment::{
    get_database_filename, initialize_logging_system,
    load_environment_variables, Environment, EnvironmentConfig,
};
pub use initialization::{
    initialize_application, log_initialization_complete, InitializationResult,
};
