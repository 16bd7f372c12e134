use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};

use super::http_client::{HttpClient, HttpsConnector};
use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::ports::spreadsheet_gateway::SpreadsheetGatewayError;

pub async fn auth(
    config: &SpreadsheetConfig,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetGatewayError> {
    let priv_key_path = config.priv_key.as_str();
    let secret: oauth2::ServiceAccountKey = oauth2::read_service_account_key(priv_key_path)
        .await
        .change_context(SpreadsheetGatewayError::Authentication(
            "could not read service account private key",
        ))
        .attach_printable_lazy(|| format!("Key path: '{}'", priv_key_path))?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetGatewayError::Authentication(
            "could not create an authenticator",
        ))
}
