use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use survey_core::Clock;
use url::Url;

use super::credentials::ServiceAccountKey;
use crate::repository::{StorageError, TabularSink};

/// OAuth scopes requested for the service account.
pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs of the Drive and Sheets REST APIs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SheetsEndpoints {
    pub(crate) drive_base: String,
    pub(crate) sheets_base: String,
}

impl Default for SheetsEndpoints {
    fn default() -> Self {
        Self {
            drive_base: "https://www.googleapis.com/drive/v3/".into(),
            sheets_base: "https://sheets.googleapis.com/v4/".into(),
        }
    }
}

//
// ─── REQUEST BUILDING ─────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

fn url_err(e: url::ParseError) -> StorageError {
    StorageError::Connection(format!("invalid endpoint: {e}"))
}

/// Signed JWT assertion for the service-account token grant.
pub(crate) fn build_assertion(
    key: &ServiceAccountKey,
    issued_at: DateTime<Utc>,
) -> Result<String, StorageError> {
    let iat = issued_at.timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES.join(" "),
        aud: &key.token_uri,
        iat,
        exp: iat + TOKEN_LIFETIME_SECS,
    };
    let mut header = Header::new(Algorithm::RS256);
    header.kid.clone_from(&key.private_key_id);
    let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .map_err(|e| StorageError::Auth(format!("invalid private key: {e}")))?;
    jsonwebtoken::encode(&header, &claims, &signing_key)
        .map_err(|e| StorageError::Auth(format!("cannot sign assertion: {e}")))
}

fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub(crate) fn drive_query(title: &str) -> String {
    format!(
        "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
        escape_query_literal(title)
    )
}

pub(crate) fn drive_search_url(base: &str, title: &str) -> Result<Url, StorageError> {
    let mut url = Url::parse(base).map_err(url_err)?.join("files").map_err(url_err)?;
    url.query_pairs_mut()
        .append_pair("q", &drive_query(title))
        .append_pair("fields", "files(id,name)")
        .append_pair("pageSize", "1")
        .append_pair("supportsAllDrives", "true")
        .append_pair("includeItemsFromAllDrives", "true");
    Ok(url)
}

fn spreadsheet_url(base: &str, segments: &[&str]) -> Result<Url, StorageError> {
    let mut url = Url::parse(base).map_err(url_err)?;
    url.path_segments_mut()
        .map_err(|()| StorageError::Connection(format!("invalid endpoint: {base}")))?
        .pop_if_empty()
        .push("spreadsheets")
        .extend(segments);
    Ok(url)
}

pub(crate) fn metadata_url(base: &str, spreadsheet_id: &str) -> Result<Url, StorageError> {
    let mut url = spreadsheet_url(base, &[spreadsheet_id])?;
    url.query_pairs_mut()
        .append_pair("fields", "sheets.properties(title,index)");
    Ok(url)
}

/// A1 range anchoring an append on the given worksheet.
pub(crate) fn a1_range(sheet_title: &str) -> String {
    format!("'{}'!A1", sheet_title.replace('\'', "''"))
}

pub(crate) fn append_url(
    base: &str,
    spreadsheet_id: &str,
    sheet_title: &str,
) -> Result<Url, StorageError> {
    let action = format!("{}:append", a1_range(sheet_title));
    let mut url = spreadsheet_url(base, &[spreadsheet_id, "values", &action])?;
    url.query_pairs_mut()
        .append_pair("valueInputOption", "RAW")
        .append_pair("insertDataOption", "INSERT_ROWS");
    Ok(url)
}

//
// ─── RESPONSE SHAPES ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: i64,
}

impl SpreadsheetMeta {
    /// Title of the worksheet at the lowest index.
    pub(crate) fn first_sheet_title(self) -> Option<String> {
        self.sheets
            .into_iter()
            .min_by_key(|entry| entry.properties.index)
            .map(|entry| entry.properties.title)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppendRequest<'a> {
    range: String,
    major_dimension: &'static str,
    values: [&'a [String]; 1],
}

fn http_err(e: reqwest::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

async fn ensure_success(response: Response, context: &str) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StorageError::Auth(format!("{context}: HTTP {status}: {body}"))
        }
        StatusCode::NOT_FOUND => StorageError::NotFound(context.to_string()),
        _ => StorageError::Connection(format!("{context}: HTTP {status}: {body}")),
    })
}

//
// ─── CLIENT ───────────────────────────────────────────────────────────────────
//

/// Appends rows to a Google spreadsheet located by title.
#[derive(Clone)]
pub struct GoogleSheetsClient {
    http: Client,
    key: Arc<ServiceAccountKey>,
    endpoints: SheetsEndpoints,
    clock: Clock,
}

impl GoogleSheetsClient {
    #[must_use]
    pub fn new(key: Arc<ServiceAccountKey>) -> Self {
        Self {
            http: Client::new(),
            key,
            endpoints: SheetsEndpoints::default(),
            clock: Clock::system(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_endpoints(mut self, endpoints: SheetsEndpoints) -> Self {
        self.http = Client::builder()
            .no_proxy()
            .build()
            .expect("local http client");
        self.endpoints = endpoints;
        self
    }

    async fn access_token(&self) -> Result<String, StorageError> {
        let assertion = build_assertion(&self.key, self.clock.now())?;
        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(http_err)?;
        let response = ensure_success(response, "token exchange")
            .await
            .map_err(|e| match e {
                StorageError::NotFound(ctx) => StorageError::Auth(ctx),
                other => other,
            })?;
        let body: TokenResponse = response.json().await.map_err(http_err)?;
        Ok(body.access_token)
    }

    async fn find_spreadsheet(&self, token: &str, title: &str) -> Result<String, StorageError> {
        let url = drive_search_url(&self.endpoints.drive_base, title)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(http_err)?;
        let list: DriveFileList = ensure_success(response, "spreadsheet lookup")
            .await?
            .json()
            .await
            .map_err(http_err)?;
        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| StorageError::NotFound(format!("spreadsheet '{title}'")))
    }

    async fn first_sheet_title(&self, token: &str, spreadsheet_id: &str) -> Result<String, StorageError> {
        let url = metadata_url(&self.endpoints.sheets_base, spreadsheet_id)?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(http_err)?;
        let meta: SpreadsheetMeta = ensure_success(response, "spreadsheet metadata")
            .await?
            .json()
            .await
            .map_err(http_err)?;
        meta.first_sheet_title()
            .ok_or_else(|| StorageError::NotFound(format!("worksheet in {spreadsheet_id}")))
    }
}

#[async_trait]
impl TabularSink for GoogleSheetsClient {
    async fn append_row(&self, sheet_name: &str, columns: &[String]) -> Result<(), StorageError> {
        let token = self.access_token().await?;
        let spreadsheet_id = self.find_spreadsheet(&token, sheet_name).await?;
        let worksheet = self.first_sheet_title(&token, &spreadsheet_id).await?;

        let url = append_url(&self.endpoints.sheets_base, &spreadsheet_id, &worksheet)?;
        let body = AppendRequest {
            range: a1_range(&worksheet),
            major_dimension: "ROWS",
            values: [columns],
        };
        let response = self
            .http
            .post(url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(http_err)?;
        ensure_success(response, "row append").await?;

        tracing::info!(sheet_name, worksheet = %worksheet, cells = columns.len(), "appended row");
        Ok(())
    }
}

/// Remote sink used when no service account is configured; every append fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredSheets;

#[async_trait]
impl TabularSink for UnconfiguredSheets {
    async fn append_row(&self, _sheet_name: &str, _columns: &[String]) -> Result<(), StorageError> {
        Err(StorageError::Auth(
            "no service account credentials configured".into(),
        ))
    }
}
