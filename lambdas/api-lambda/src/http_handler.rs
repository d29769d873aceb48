use lambda_http::{
    http::{Method, StatusCode},
    Body, Error, Request, Response,
};
use salon_shared::{stylists, types::StylistStatus, AppState};
use std::env;
use std::sync::Arc;

/// Main Lambda handler - routes requests to the stylists resource
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    let path = event.uri().path();
    let body = event.body();
    tracing::info!("API Lambda invoked - Method: {} Path: {}", method, path);

    // Handle CORS preflight
    if method == "OPTIONS" {
        return Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type,Authorization")
            .body(Body::Empty)
            .map_err(Box::new)?);
    }

    let table_name = env::var("TABLE_NAME").unwrap_or_else(|_| "salon-manager".to_string());

    // Stylists routes
    if path.starts_with("/stylists") {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        return match (method, parts.as_slice()) {
            // POST /stylists - create stylist (optional inline photo)
            (&Method::POST, ["stylists"]) => {
                stylists::create_stylist(
                    &state.dynamo_client,
                    &state.s3_client,
                    &state.ses_client,
                    &table_name,
                    body,
                )
                .await
            }
            // GET /stylists - list all stylists
            (&Method::GET, ["stylists"]) => {
                stylists::list_stylists(&state.dynamo_client, &table_name).await
            }
            // PUT /stylists/{id}/inactive - deactivate
            (&Method::PUT, ["stylists", stylist_id, "inactive"]) => {
                stylists::set_stylist_status(
                    &state.dynamo_client,
                    &table_name,
                    stylist_id,
                    StylistStatus::Inactive,
                )
                .await
            }
            // PUT /stylists/{id}/active - reactivate
            (&Method::PUT, ["stylists", stylist_id, "active"]) => {
                stylists::set_stylist_status(
                    &state.dynamo_client,
                    &table_name,
                    stylist_id,
                    StylistStatus::Active,
                )
                .await
            }
            // DELETE /stylists/{id} - delete stylist
            (&Method::DELETE, ["stylists", stylist_id]) => {
                stylists::delete_stylist(&state.dynamo_client, &table_name, stylist_id).await
            }
            _ => not_found(),
        };
    }

    tracing::warn!("No route matched - Method: {} Path: {}", method, path);
    not_found()
}

fn not_found() -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(
            serde_json::json!({"message": "Not found"})
                .to_string()
                .into(),
        )
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_state() -> Arc<AppState> {
        let config = aws_config::SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new("us-east-1"))
            .build();
        AppState::new(
            aws_sdk_dynamodb::Client::new(&config),
            aws_sdk_s3::Client::new(&config),
            aws_sdk_sesv2::Client::new(&config),
        )
    }

    fn request(method: &str, path: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let state = test_state().await;
        let response = function_handler(request("OPTIONS", "/stylists", Body::Empty), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response
                .headers()
                .get("Access-Control-Allow-Origin")
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let state = test_state().await;
        let response = function_handler(request("GET", "/appointments", Body::Empty), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_unknown_stylist_subpath_is_not_found() {
        let state = test_state().await;
        // PUT without a status segment matches no route
        let response = function_handler(request("PUT", "/stylists/abc-123", Body::Empty), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 404);

        let state = test_state().await;
        let response = function_handler(
            request("PUT", "/stylists/abc-123/retired", Body::Empty),
            state,
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_is_rejected() {
        let state = test_state().await;
        let body = Body::Text(r#"{"name": "Ada Lane"}"#.to_string());
        let response = function_handler(request("POST", "/stylists", body), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body_string = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(body_string.contains("Missing required fields"));
        assert!(body_string.contains("phone"));
        assert!(body_string.contains("email"));
        assert!(body_string.contains("role"));
    }

    #[tokio::test]
    async fn test_create_with_invalid_json_is_rejected() {
        let state = test_state().await;
        let body = Body::Text("not json".to_string());
        let response = function_handler(request("POST", "/stylists", body), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
}
