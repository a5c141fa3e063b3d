use super::models::{fallback_glyph, Logo};
use crate::shared::config::EnvironmentConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// サブスクリプションのロゴ取得サービス
///
/// 取得は失敗しても呼び出し元にエラーを返さず、代替表示にフォールバックする。
pub struct LogoService {
    client: Client,
    base_url: Url,
}

impl LogoService {
    /// 環境設定からロゴ取得サービスを作成
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        Self::new(config.logo_base_url.clone(), config.logo_timeout_secs)
    }

    /// 取得元とタイムアウトを指定してロゴ取得サービスを作成
    ///
    /// # 引数
    /// * `base_url` - ロゴ取得元のベースURL
    /// * `timeout_secs` - リクエストのタイムアウト（秒）
    ///
    /// # 戻り値
    /// ロゴ取得サービス、またはURLにパスを追加できない場合は設定エラー
    pub fn new(base_url: Url, timeout_secs: u64) -> AppResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "ロゴ取得元のURLにパスを追加できません: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// サブスクリプション名からロゴのURLを組み立てる
    ///
    /// 名前を小文字にして空白を除き、`.com` を付けたドメインを取得元のパスに追加する。
    ///
    /// # 引数
    /// * `name` - サブスクリプション名
    ///
    /// # 戻り値
    /// ロゴのURL
    pub fn logo_url(&self, name: &str) -> AppResult<Url> {
        let domain: String = name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::configuration("ロゴ取得元のURLにパスを追加できません"))?
            .pop_if_empty()
            .push(&format!("{domain}.com"));

        Ok(url)
    }

    /// ロゴを取得する
    ///
    /// 通信失敗・成功以外のステータス・空のレスポンスはすべて代替表示になる。
    ///
    /// # 引数
    /// * `name` - サブスクリプション名
    ///
    /// # 戻り値
    /// 画像または代替表示の1文字
    pub async fn fetch(&self, name: &str) -> Logo {
        match self.try_fetch(name).await {
            Ok(logo) => logo,
            Err(e) => {
                warn!("ロゴを取得できませんでした（代替表示を使用）: name={name}, {e}");
                Logo::Fallback {
                    glyph: fallback_glyph(name),
                }
            }
        }
    }

    async fn try_fetch(&self, name: &str) -> AppResult<Logo> {
        if name.trim().is_empty() {
            return Err(AppError::validation("名前が空です"));
        }

        let url = self.logo_url(name)?;
        debug!("ロゴを取得します: {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::external_service("logo".to_string(), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(
                "logo".to_string(),
                format!("ステータス {status}: {url}"),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::external_service("logo".to_string(), e.to_string()))?;

        if bytes.is_empty() {
            return Err(AppError::external_service(
                "logo".to_string(),
                format!("空のレスポンス: {url}"),
            ));
        }

        Ok(Logo::Image {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn service_for(base_url: &str) -> LogoService {
        LogoService::new(Url::parse(base_url).unwrap(), 2).unwrap()
    }

    /// 1回だけ固定のレスポンスを返すローカルサーバーを起動し、そのURLを返す
    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            socket.write_all(response).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}")
    }

    #[test]
    fn test_logo_url() {
        let service = service_for("https://logo.clearbit.com");

        assert_eq!(
            service.logo_url("Netflix").unwrap().as_str(),
            "https://logo.clearbit.com/netflix.com"
        );
        assert_eq!(
            service.logo_url("Disney Plus").unwrap().as_str(),
            "https://logo.clearbit.com/disneyplus.com"
        );
    }

    #[test]
    fn test_logo_url_keeps_base_path() {
        let service = service_for("http://localhost:8080/logos/");

        assert_eq!(
            service.logo_url("Spotify").unwrap().as_str(),
            "http://localhost:8080/logos/spotify.com"
        );
    }

    #[test]
    fn test_cannot_be_a_base_url_is_rejected() {
        let result = LogoService::new(Url::parse("mailto:logo@example.com").unwrap(), 5);

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_fetch_returns_image_on_success() {
        let base_url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 4\r\nConnection: close\r\n\r\n\x89PNG",
        )
        .await;
        let service = service_for(&base_url);

        let logo = service.fetch("Netflix").await;

        assert_eq!(
            logo,
            Logo::Image {
                bytes: b"\x89PNG".to_vec(),
                content_type: "image/png".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_not_found() {
        let base_url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let service = service_for(&base_url);

        assert_eq!(service.fetch("Netflix").await, Logo::Fallback { glyph: 'N' });
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_empty_body() {
        let base_url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let service = service_for(&base_url);

        assert_eq!(service.fetch("Hulu").await, Logo::Fallback { glyph: 'H' });
    }

    #[tokio::test]
    async fn test_fetch_falls_back_when_unreachable() {
        let service = LogoService::from_config(&test_config()).unwrap();

        let logo = service.fetch("Netflix").await;

        assert_eq!(logo, Logo::Fallback { glyph: 'N' });
    }

    #[tokio::test]
    async fn test_fetch_empty_name_falls_back() {
        let service = LogoService::from_config(&test_config()).unwrap();

        assert_eq!(service.fetch("  ").await, Logo::Fallback { glyph: '?' });
    }
}
