use axum::Json;

pub async fn api_docs() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Med Assistance API",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/": { "get": { "summary": "Drug description form" } },
            "/health": { "get": { "summary": "Health check" } },
            "/api/v1/describe": {
                "post": {
                    "summary": "Describe a drug package from a photo (multipart: prompt, image)",
                    "requestBody": {
                        "content": {
                            "multipart/form-data": {
                                "schema": {
                                    "type": "object",
                                    "properties": {
                                        "prompt": { "type": "string" },
                                        "image": { "type": "string", "format": "binary" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "/api/v1/docs": { "get": { "summary": "OpenAPI spec" } },
            "/static/pic.png": { "get": { "summary": "Branding image" } }
        }
    }))
}
