//! Google Sheets remote sink: service-account credentials and the REST client.

mod client;
mod credentials;
#[cfg(test)]
mod test_server;

pub use client::{GoogleSheetsClient, SCOPES, UnconfiguredSheets};
pub use credentials::{CredentialsError, SECRETS_TABLE, ServiceAccountKey};
