//! CRUD over a remote JSON API.
//!
//! [`RemoteApiDataSource`] maps model operations onto REST calls of the
//! form `{base_url}/{resource}/{action}.json`, where the resource is the
//! model's declared API name, lower-cased and pluralized.

mod json_source;
mod model;

pub use json_source::{Calculation, RemoteApiDataSource};
pub use model::{ApiModel, RemoteModel};
