//! Desktop client for the Templator template and form generator.
//!
//! Talks to the Templator REST backend: templates are registered with
//! typed variable placeholders, and the generate view synthesizes an
//! input form from each template's variable schema, submits the values
//! for rendering, and shows the result.

pub mod api_client;
pub mod app;
pub mod async_bridge;
pub mod banner;
pub mod create_panel;
pub mod create_state;
pub mod form_model;
pub mod generate_panel;
pub mod generate_state;
pub mod list_panel;
pub mod list_state;
pub mod theme;
