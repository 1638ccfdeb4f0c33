pub mod auth;

pub mod catalog;

pub mod evaluations;

pub mod questions;

pub mod templates;

pub use auth::configure_auth_routes;
pub use catalog::configure_catalog_routes;
pub use evaluations::configure_evaluation_routes;
pub use questions::configure_question_routes;
pub use templates::configure_template_routes;
