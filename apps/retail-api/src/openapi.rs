//! `OpenAPI` documentation and Swagger UI configuration.
//!
//! Sets up utoipa for `OpenAPI` spec generation and configures Swagger UI
//! for interactive API documentation with bearer authentication.

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// `OpenAPI` documentation for the SmartRetail API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartRetail API",
        version = "0.3.0",
        description = "Multi-tenant retail record API with batch upsert reconciliation and JWT authentication"
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Products", description = "Product records"),
        (name = "Customers", description = "Customer records"),
        (name = "Sales", description = "Sale records with owned lines"),
        (name = "SaleLines", description = "Standalone sale line records"),
    ),
    paths(
        crate::health::healthz_handler,
        smartretail_api_auth::handlers::login_handler,
        smartretail_api_records::handlers::list_products_handler,
        smartretail_api_records::handlers::get_product_handler,
        smartretail_api_records::handlers::submit_products_handler,
        smartretail_api_records::handlers::insert_products_handler,
        smartretail_api_records::handlers::list_customers_handler,
        smartretail_api_records::handlers::get_customer_handler,
        smartretail_api_records::handlers::submit_customers_handler,
        smartretail_api_records::handlers::insert_customers_handler,
        smartretail_api_records::handlers::list_sales_handler,
        smartretail_api_records::handlers::get_sale_handler,
        smartretail_api_records::handlers::submit_sales_handler,
        smartretail_api_records::handlers::insert_sales_handler,
        smartretail_api_records::handlers::list_sale_lines_handler,
        smartretail_api_records::handlers::get_sale_line_handler,
        smartretail_api_records::handlers::submit_sale_lines_handler,
        smartretail_api_records::handlers::insert_sale_lines_handler,
    )
)]
pub struct ApiDoc;

/// Swagger UI routes serving the generated `OpenAPI` document.
pub fn swagger_routes() -> Router {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("spec serializes");
        assert!(json.contains("/products"));
        assert!(json.contains("/auth/login"));
        assert!(json.contains("bearerAuth"));
    }
}
