//! UEEX Calculator Web Server: REST API built with axum.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
    Json,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use ueex_core::schedule::XML_MIME_TYPE;
use ueex_core::{build_schedule_xml, compute_fees, generate_document_id, FeeRequest, ScheduleDocument};

use crate::models::*;
use crate::prices::PriceService;

// ============================================================================
// App State
// ============================================================================

pub type SharedPrices = Arc<PriceService>;

// ============================================================================
// Router
// ============================================================================

pub fn create_router(prices: SharedPrices) -> Router {
    Router::new()
        // Health
        .route("/health", get(handle_health))
        // Calculator
        .route("/api/fees", post(handle_fees))
        .route("/api/reference", get(handle_reference))
        // Schedule documents
        .route("/api/schedule", post(handle_schedule))
        .route("/api/schedule/download", post(handle_schedule_download))
        .route("/api/schedule/new-id", get(handle_new_document_id))
        // Price history
        .route("/api/prices", get(handle_prices))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(prices)
}

// ============================================================================
// Helpers
// ============================================================================

fn ok_json<T: serde::Serialize>(msg: &str, data: T) -> impl IntoResponse {
    Json(ApiResponse::success(msg, data))
}

fn err_json(msg: &str, status: StatusCode) -> (StatusCode, Json<ApiResponse<()>>) {
    (status, Json(ApiResponse::error(msg, status.as_u16())))
}

fn rejection_json(rejection: JsonRejection) -> (StatusCode, Json<ApiResponse<()>>) {
    tracing::debug!(error = %rejection, "rejected request body");
    err_json(&rejection.body_text(), StatusCode::BAD_REQUEST)
}

// ============================================================================
// Route Handlers
// ============================================================================

async fn handle_health(State(prices): State<SharedPrices>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "priceSource": if prices.is_offline() { "synthetic" } else { "UEEX" },
        "server": "UEEX Calculator API Server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_fees(payload: Result<Json<FeeRequest>, JsonRejection>) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_json(rejection).into_response(),
    };
    if let Err(e) = request.validate() {
        return err_json(&e.to_string(), StatusCode::BAD_REQUEST).into_response();
    }

    let breakdown = compute_fees(&request);
    tracing::debug!(
        auction = %request.auction_type,
        direction = %request.trade_direction,
        total = breakdown.total_amount,
        "fees calculated"
    );
    ok_json("Fees calculated", FeeResponse::from(breakdown)).into_response()
}

async fn handle_reference() -> impl IntoResponse {
    ok_json("Reference data retrieved", ReferenceData::current())
}

async fn handle_schedule(payload: Result<Json<ScheduleDocument>, JsonRejection>) -> impl IntoResponse {
    let doc = match payload {
        Ok(Json(doc)) => doc,
        Err(rejection) => return rejection_json(rejection).into_response(),
    };

    match build_schedule_xml(&doc) {
        Ok(xml) => ok_json(
            "Schedule document generated",
            ScheduleResponse {
                file_name: doc.file_name(),
                document_id: doc.document_id,
                mime_type: XML_MIME_TYPE.to_string(),
                xml,
            },
        )
        .into_response(),
        Err(e) => err_json(&e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    }
}

async fn handle_schedule_download(
    payload: Result<Json<ScheduleDocument>, JsonRejection>,
) -> impl IntoResponse {
    let doc = match payload {
        Ok(Json(doc)) => doc,
        Err(rejection) => return rejection_json(rejection).into_response(),
    };

    match build_schedule_xml(&doc) {
        Ok(xml) => {
            let disposition = format!("attachment; filename=\"{}\"", doc.file_name());
            (
                [
                    (header::CONTENT_TYPE, XML_MIME_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                xml,
            )
                .into_response()
        }
        Err(e) => err_json(&e.to_string(), StatusCode::BAD_REQUEST).into_response(),
    }
}

async fn handle_new_document_id() -> impl IntoResponse {
    ok_json(
        "Document id generated",
        DocumentIdResponse {
            document_id: generate_document_id(),
        },
    )
}

async fn handle_prices(
    State(prices): State<SharedPrices>,
    Query(q): Query<PriceQuery>,
) -> impl IntoResponse {
    let history = prices.history(q.period()).await;
    ok_json("Price history retrieved", history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::prices::PriceSourceConfig;

    fn app() -> Router {
        let prices = PriceService::new(PriceSourceConfig {
            offline: true,
            ..Default::default()
        })
        .unwrap();
        create_router(Arc::new(prices))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const SCHEDULE_BODY: &str = r#"{
        "documentId": "8F14E45F-CEEA-467A-9A36-DEDD4BEA2543",
        "revisionNumber": 3,
        "sender": {"eic": "62X000000000001A", "roleCode": "A08"},
        "receiver": {"eic": "10X1001A1001A450", "roleCode": "A04"},
        "deliveryDate": "2025-03-30",
        "timeSeriesList": [{
            "inDomain": "10Y1001C--000182",
            "outDomain": "10YHU-MAVIR----U",
            "hourlyValues": [1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24]
        }]
    }"#;

    #[tokio::test]
    async fn health_reports_offline_source() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["priceSource"], "synthetic");
    }

    #[tokio::test]
    async fn fees_endpoint_returns_both_views() {
        let body = r#"{"volumeMW": 100, "hoursCount": 24, "pricePerMWh": 3500,
            "auctionType": "specialized", "tradeDirection": "sell", "includeVAT": true}"#;
        let response = app().oneshot(post_json("/api/fees", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["breakdown"]["totalVolume"], 2400.0);
        assert_eq!(json["data"]["breakdown"]["commissionRatePercent"], 0.5);
        let total: f64 = json["data"]["rounded"]["totalAmount"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(total, 6_669_600.0);
    }

    #[tokio::test]
    async fn fees_endpoint_rejects_invalid_requests() {
        let response = app()
            .oneshot(post_json("/api/fees", r#"{"hoursCount": 0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["errorCode"], 400);

        let response = app()
            .oneshot(post_json("/api/fees", r#"{"volumeMW": 1e25}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("too large"));

        let response = app()
            .oneshot(post_json("/api/fees", r#"{"auctionType": "spot"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["success"], false);
    }

    #[tokio::test]
    async fn schedule_endpoint_returns_xml_and_file_name() {
        let response = app()
            .oneshot(post_json("/api/schedule", SCHEDULE_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["data"]["fileName"], "Schedule_2025-03-30_rev3.xml");
        assert_eq!(json["data"]["mimeType"], "application/xml");
        let xml = json["data"]["xml"].as_str().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<quantity>24</quantity>"));
        assert!(xml.contains("<out_Domain.mRID codingScheme=\"A01\">10YHU-MAVIR----U</out_Domain.mRID>"));
    }

    #[tokio::test]
    async fn schedule_download_is_an_attachment() {
        let response = app()
            .oneshot(post_json("/api/schedule/download", SCHEDULE_BODY))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Schedule_2025-03-30_rev3.xml\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"<?xml"));
    }

    #[tokio::test]
    async fn schedule_with_short_series_is_rejected() {
        let body = SCHEDULE_BODY.replace("1,2,3,", "");
        let response = app()
            .oneshot(post_json("/api/schedule", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("21"));
    }

    #[tokio::test]
    async fn new_id_and_reference_data() {
        let json = body_json(app().oneshot(get("/api/schedule/new-id")).await.unwrap()).await;
        assert_eq!(json["data"]["documentId"].as_str().unwrap().len(), 36);

        let json = body_json(app().oneshot(get("/api/reference")).await.unwrap()).await;
        assert_eq!(json["data"]["domains"].as_array().unwrap().len(), 6);
        assert_eq!(json["data"]["defaultAuctionType"], "specialized");
    }

    #[tokio::test]
    async fn prices_fall_back_to_synthetic_offline() {
        let response = app().oneshot(get("/api/prices?period=week")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["source"], "synthetic");
        assert_eq!(json["data"]["data"].as_array().unwrap().len(), 8);
        assert!(json["data"]["notice"].is_string());

        let json = body_json(app().oneshot(get("/api/prices?period=decade")).await.unwrap()).await;
        assert_eq!(json["data"]["data"].as_array().unwrap().len(), 31);
    }
}
