/*!
glimpse REST API Server

Provides HTTP endpoints for analyzing parsed tables and returning column
analyses plus ranked chart suggestions. File parsing happens client-side
(or via the CLI); this server accepts the already-parsed table shape.

## Usage

```bash
glimpse-rest --host 127.0.0.1 --port 3000
```

## Endpoints

- `POST /api/v1/analyze` - Analyze a table and return the full report
- `GET /api/v1/health` - Health check
- `GET /api/v1/version` - Version information
*/

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use glimpse::reader::json::cell_from_json;
use glimpse::{
    CellValue, ClassifierOptions, DatasetReport, GlimpseError, Row, Table, VERSION,
};

/// CLI arguments for the REST API server
#[derive(Parser)]
#[command(name = "glimpse-rest")]
#[command(about = "glimpse REST API Server")]
#[command(version = VERSION)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(long, default_value = "3334")]
    port: u16,

    /// CORS allowed origins (comma-separated)
    #[arg(long, default_value = "*")]
    cors_origin: String,
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for /api/v1/analyze endpoint
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    /// Ordered column headers
    headers: Vec<String>,
    /// Rows as header → raw JSON value mappings
    rows: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Optional classifier overrides
    #[serde(default)]
    options: AnalyzeOptions,
}

/// Classifier overrides carried in the request body
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeOptions {
    date_fraction_threshold: Option<f64>,
    min_date_values: Option<usize>,
}

impl AnalyzeOptions {
    fn to_classifier_options(&self) -> ClassifierOptions {
        let defaults = ClassifierOptions::default();
        ClassifierOptions {
            date_fraction_threshold: self
                .date_fraction_threshold
                .unwrap_or(defaults.date_fraction_threshold),
            min_date_values: self.min_date_values.unwrap_or(defaults.min_date_values),
        }
    }
}

/// Successful API response
#[derive(Debug, Serialize)]
struct ApiSuccess<T> {
    status: String,
    data: T,
}

/// Error API response
#[derive(Debug, Serialize)]
struct ApiError {
    status: String,
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Version response
#[derive(Debug, Serialize)]
struct VersionResponse {
    version: String,
    features: Vec<String>,
}

// ============================================================================
// Error Handling
// ============================================================================

/// Custom error type for API responses
struct ApiErrorResponse {
    status: StatusCode,
    error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let json = Json(self.error);
        (self.status, json).into_response()
    }
}

impl From<GlimpseError> for ApiErrorResponse {
    fn from(err: GlimpseError) -> Self {
        let (status, error_type) = match &err {
            GlimpseError::Reader(_) => (StatusCode::BAD_REQUEST, "ReaderError"),
            GlimpseError::Writer(_) => (StatusCode::INTERNAL_SERVER_ERROR, "WriterError"),
            GlimpseError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        ApiErrorResponse {
            status,
            error: ApiError {
                status: "error".to_string(),
                error: ErrorDetails {
                    message: err.to_string(),
                    error_type: error_type.to_string(),
                },
            },
        }
    }
}

impl From<String> for ApiErrorResponse {
    fn from(msg: String) -> Self {
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError {
                status: "error".to_string(),
                error: ErrorDetails {
                    message: msg,
                    error_type: "BadRequest".to_string(),
                },
            },
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Build a core table from the request body's headers and rows.
fn table_from_request(request: &AnalyzeRequest) -> Result<Table, GlimpseError> {
    let mut seen = std::collections::HashSet::new();
    for header in &request.headers {
        if !seen.insert(header.as_str()) {
            return Err(GlimpseError::Reader(format!(
                "duplicate column header '{}'",
                header
            )));
        }
    }

    let rows: Vec<Row> = request
        .rows
        .iter()
        .map(|obj| {
            obj.iter()
                .map(|(key, value)| (key.clone(), cell_from_json(value)))
                .collect::<std::collections::HashMap<String, CellValue>>()
        })
        .collect();

    Ok(Table::new(request.headers.clone(), rows))
}

// ============================================================================
// Handler Functions
// ============================================================================

/// POST /api/v1/analyze - Analyze a parsed table
async fn analyze_handler(
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ApiSuccess<DatasetReport>>, ApiErrorResponse> {
    info!(
        "Analyzing table: {} columns, {} rows",
        request.headers.len(),
        request.rows.len()
    );

    let table = table_from_request(&request)?;
    let options = request.options.to_classifier_options();
    let report = DatasetReport::build_with(&table, &options);

    info!(
        "Analysis complete: {} columns analyzed, {} suggestions",
        report.analysis.len(),
        report.suggestion_count()
    );

    Ok(Json(ApiSuccess {
        status: "success".to_string(),
        data: report,
    }))
}

/// GET /api/v1/health - Health check
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/v1/version - Version information
async fn version_handler() -> Json<VersionResponse> {
    let mut features = Vec::new();

    #[cfg(feature = "excel")]
    features.push("excel".to_string());

    features.push("rest".to_string());

    Json(VersionResponse {
        version: VERSION.to_string(),
        features,
    })
}

/// Root handler
async fn root_handler() -> &'static str {
    "glimpse REST API Server - See /api/v1/health for status"
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glimpse_rest=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Configure CORS
    let cors = if cli.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    } else {
        let origins: Vec<axum::http::HeaderValue> = cli
            .cors_origin
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    };

    // Build router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/analyze", post(analyze_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/version", get(version_handler))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .expect("Invalid host or port");

    info!("Starting glimpse REST API server on {}", addr);
    info!("API documentation:");
    info!("  POST /api/v1/analyze - Analyze a parsed table");
    info!("  GET  /api/v1/health  - Health check");
    info!("  GET  /api/v1/version - Version info");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
