// HTTP front end: POST /parse with a multipart `file` (.csv) and `date` (DD/MM/YYYY).

use axum::{
    body::Bytes,
    extract::Multipart,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use log::{error, info, warn};
use serde::Serialize;
use statement_balances::{parse_target_date, summarize};

const DEFAULT_PORT: &str = "8080";

const NO_FILE: &str = "No file uploaded";
const NOT_CSV: &str = "Invalid file format, only CSV files are allowed";
const BAD_DATE: &str = "Invalid date format";
const DECODE_FAILED: &str = "Error parsing CSV file";

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

fn reject(status: StatusCode, error: &'static str) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Fields collected from the multipart form
#[derive(Default)]
struct Upload {
    file: Option<(String, Bytes)>,
    date: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Response> {
    let mut upload = Upload::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!("malformed multipart body: {}", e);
                return Err(reject(StatusCode::BAD_REQUEST, NO_FILE));
            }
        };

        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                let contents = field
                    .bytes()
                    .await
                    .map_err(|_| reject(StatusCode::BAD_REQUEST, NO_FILE))?;
                upload.file = Some((filename, contents));
            }
            Some("date") => {
                upload.date = field.text().await.unwrap_or_default();
            }
            _ => {}
        }
    }
    Ok(upload)
}

async fn parse_statement(multipart: Multipart) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let Some((filename, contents)) = upload.file else {
        return reject(StatusCode::BAD_REQUEST, NO_FILE);
    };
    if !filename.ends_with(".csv") {
        return reject(StatusCode::BAD_REQUEST, NOT_CSV);
    }
    let Ok(date) = parse_target_date(&upload.date) else {
        return reject(StatusCode::BAD_REQUEST, BAD_DATE);
    };

    match summarize(&contents[..], date) {
        Ok(mut balances) => {
            balances.sort_by(|a, b| a.currency.cmp(&b.currency));
            info!("{}: {} balances for {}", filename, balances.len(), date);
            (StatusCode::OK, Json(balances)).into_response()
        }
        Err(e) => {
            error!("{}: {}", filename, e);
            reject(StatusCode::INTERNAL_SERVER_ERROR, DECODE_FAILED)
        }
    }
}

fn app() -> Router {
    Router::new().route("/parse", post(parse_statement))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);

    axum::serve(listener, app()).await?;
    Ok(())
}
