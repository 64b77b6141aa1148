//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::account::UserView;
use crate::catalog::{CreateProductRequest, Product, UpdateProductRequest};
use crate::gateway::health::HealthResponse;
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::validation::FieldError;

/// Bearer token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from /api/v1/auth/register or /api/v1/auth/login: Authorization: Bearer {token}",
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        version = "1.0.0",
        description = "Per-user product catalog with signed bearer-token authentication.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::health::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::catalog::handlers::list_products,
        crate::catalog::handlers::create_product,
        crate::catalog::handlers::update_product,
        crate::catalog::handlers::delete_product,
    ),
    components(
        schemas(
            HealthResponse,
            FieldError,
            UserView,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            Product,
            CreateProductRequest,
            UpdateProductRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login (public)"),
        (name = "Products", description = "Owner-scoped product catalog (bearer token required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Stockroom API");
        assert!(spec.to_json().is_ok());
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/auth/register"));
        assert!(paths.paths.contains_key("/api/v1/auth/login"));
        assert!(paths.paths.contains_key("/api/v1/products"));
        assert!(paths.paths.contains_key("/api/v1/products/{id}"));
    }

    #[test]
    fn test_security_scheme_registered() {
        let components = ApiDoc::openapi().components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
