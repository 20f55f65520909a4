use super::handlers::{health, users, ErrorBody};
use crate::users::{NewUser, User};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
    ),
    components(schemas(User, NewUser, ErrorBody, health::Health)),
    tags(
        (name = "users", description = "User management"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

/// The `OpenAPI` document, titled and versioned from Cargo metadata.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = env!("CARGO_PKG_NAME").to_string();
    doc.info.version = env!("CARGO_PKG_VERSION").to_string();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["/api/users", "/api/users/{id}", "/health"]);
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
    }
}
