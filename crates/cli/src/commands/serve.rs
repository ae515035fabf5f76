use std::sync::Arc;

use anyhow::Result;
use caseintake_http::{create_router, AppState};
use caseintake_outbound::{AnalyticsClient, OptInClient};
use caseintake_service::{CaseMirror, HospitalService, ProgressService};
use caseintake_sheets::SheetsClient;
use caseintake_storage::PgStorage;
use caseintake_uploads::UploadIssuer;

use crate::commands::get_database_url;

pub(crate) async fn run(port: u16, host: String) -> Result<()> {
    let database_url = get_database_url()?;
    let storage = Arc::new(PgStorage::new(&database_url).await?);

    let mirror = build_mirror()?;
    let uploads = build_upload_issuer().await;
    let analytics = build_analytics()?;
    let optin = build_optin()?;

    let progress_service = Arc::new(ProgressService::new(storage.clone(), mirror));
    let hospital_service = Arc::new(HospitalService::new(storage));

    let state = Arc::new(AppState {
        progress_service,
        hospital_service,
        uploads,
        analytics,
        optin,
    });

    let allowed_origins: Vec<String> = std::env::var("CASEINTAKE_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let router = create_router(state, &allowed_origins);
    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Sheet mirror is optional: both the token and the spreadsheet id must be
/// present, otherwise submissions persist without mirroring.
fn build_mirror() -> Result<Option<Arc<dyn CaseMirror>>> {
    let token = std::env::var("CASEINTAKE_SHEETS_TOKEN").ok();
    let spreadsheet_id = std::env::var("CASEINTAKE_SPREADSHEET_ID").ok();
    match (token, spreadsheet_id) {
        (Some(token), Some(spreadsheet_id)) => {
            let sheet_name = std::env::var("CASEINTAKE_SHEET_NAME")
                .unwrap_or_else(|_| "Cases".to_owned());
            let client = SheetsClient::new(token, spreadsheet_id, sheet_name)?;
            tracing::info!("sheet mirror enabled");
            Ok(Some(Arc::new(client)))
        },
        _ => {
            tracing::info!(
                "CASEINTAKE_SHEETS_TOKEN / CASEINTAKE_SPREADSHEET_ID not set, sheet mirror disabled"
            );
            Ok(None)
        },
    }
}

/// Upload issuance degrades to disabled when unconfigured or when the S3
/// client cannot be built; the rest of the API stays up.
async fn build_upload_issuer() -> Option<Arc<UploadIssuer>> {
    let bucket = std::env::var("CASEINTAKE_UPLOAD_BUCKET").ok()?;
    let secret = match std::env::var("CASEINTAKE_UPLOAD_TOKEN_SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            tracing::warn!(
                "CASEINTAKE_UPLOAD_BUCKET is set but CASEINTAKE_UPLOAD_TOKEN_SECRET is not, uploads disabled"
            );
            return None;
        },
    };
    let prefix =
        std::env::var("CASEINTAKE_UPLOAD_PREFIX").unwrap_or_else(|_| "uploads".to_owned());
    let region = std::env::var("CASEINTAKE_S3_REGION").ok();
    let endpoint = std::env::var("CASEINTAKE_S3_ENDPOINT").ok();
    match UploadIssuer::new(bucket, prefix, region, endpoint, secret).await {
        Ok(issuer) => {
            tracing::info!("upload issuer enabled");
            Some(Arc::new(issuer))
        },
        Err(e) => {
            tracing::warn!("Failed to initialize upload issuer: {}", e);
            None
        },
    }
}

fn build_analytics() -> Result<Option<Arc<AnalyticsClient>>> {
    let Ok(endpoint) = std::env::var("CASEINTAKE_ANALYTICS_ENDPOINT") else {
        tracing::info!("CASEINTAKE_ANALYTICS_ENDPOINT not set, analytics forwarding disabled");
        return Ok(None);
    };
    let api_key = std::env::var("CASEINTAKE_ANALYTICS_API_KEY").unwrap_or_default();
    let client = AnalyticsClient::new(endpoint, api_key)?;
    tracing::info!("analytics forwarding enabled");
    Ok(Some(Arc::new(client)))
}

fn build_optin() -> Result<Option<Arc<OptInClient>>> {
    let Ok(endpoint) = std::env::var("CASEINTAKE_OPTIN_ENDPOINT") else {
        tracing::info!("CASEINTAKE_OPTIN_ENDPOINT not set, opt-in email disabled");
        return Ok(None);
    };
    let api_key = std::env::var("CASEINTAKE_OPTIN_API_KEY").unwrap_or_default();
    let client = OptInClient::new(endpoint, api_key)?;
    tracing::info!("opt-in email enabled");
    Ok(Some(Arc::new(client)))
}
