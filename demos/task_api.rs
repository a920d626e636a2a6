//! Task API request flow demonstration.
//!
//! This example shows a JSON controller backed by a remote API:
//! 1. Build a request adapter from a routed request
//! 2. Merge query, route and form parameters
//! 3. Forward the action to the remote API through the data source
//! 4. Let the formatter derive the status and write the envelope
//!
//! The remote API is simulated with `RecordingTransport`; the base URL is
//! read from `JSON_API_BASE_URL` when set.
//!
//! Run with: `cargo run --example task_api`

use json_api_plugins::datasource::{ApiModel, RemoteApiDataSource};
use json_api_plugins::response::ResponseFormatter;
use json_api_plugins::web::{
    ActionContext, DetectMethod, RequestAdapter, RequestCycle, RequestDataMerger,
};
use json_api_plugins::{
    BufferedResponse, DataSourceConfig, HttpMethod, HttpTransport, PagingInfo, RecordingTransport,
    RequestDataConfig,
};
use serde_json::{json, Value};

type Tasks<T> = RemoteApiDataSource<T>;

/// `POST tasks/add.json`
fn add<T: HttpTransport>(tasks: &Tasks<T>, ctx: &mut ActionContext<'_>) -> json_api_plugins::Result<()> {
    let name = ctx.data.get("name").cloned().unwrap_or(Value::Null);
    let created = tasks.create(&ApiModel::new("Task"), &["name"], &[name])?;
    ctx.response.set("task", created);
    ctx.response.set_method_success(true, None);
    Ok(())
}

/// `GET tasks/index.json`
fn index<T: HttpTransport>(tasks: &Tasks<T>, ctx: &mut ActionContext<'_>) -> json_api_plugins::Result<()> {
    let rows = tasks.read(&ApiModel::new("Task"), &ctx.data.to_value())?;
    let found = rows.as_array().is_some_and(|rows| !rows.is_empty());
    ctx.response.set("tasks", rows);
    ctx.response.set_method_success(found, None);
    Ok(())
}

/// `DELETE tasks/delete/{id}.json`
fn delete<T: HttpTransport>(tasks: &Tasks<T>, ctx: &mut ActionContext<'_>) -> json_api_plugins::Result<()> {
    let Some(id) = ctx.data.get("id").cloned() else {
        ctx.response.set_response_code(404);
        ctx.response.set_response_message("No task id given");
        return Ok(());
    };
    let id = match id {
        Value::String(id) => id,
        other => other.to_string(),
    };
    tasks.delete(&ApiModel::new("Task"), id)?;
    ctx.response.set_method_success(true, Some("Task removed"));
    Ok(())
}

fn json_request(action: &str, method: HttpMethod) -> RequestAdapter {
    let mut request = RequestAdapter::new("tasks", action);
    request.set_url(format!("tasks/{action}.json"));
    request.set_extension(Some("json".to_string()));
    request.set_method(method);
    request
}

fn dispatch<T, F>(tasks: &Tasks<T>, mut request: RequestAdapter, action: F) -> json_api_plugins::Result<()>
where
    T: HttpTransport,
    F: FnOnce(&Tasks<T>, &mut ActionContext<'_>) -> json_api_plugins::Result<()>,
{
    println!("\n=== {} {} ===", request.meta().url, request.method());

    let merger = RequestDataMerger::new(RequestDataConfig {
        form: true,
        ..RequestDataConfig::default()
    });
    let mut cycle = RequestCycle::new(merger, ResponseFormatter::new());
    let sink = BufferedResponse::new();
    cycle.run(&mut request, &sink, |ctx| action(tasks, ctx))?;

    println!("{}", sink.status().unwrap_or_default());
    for (name, value) in sink.headers() {
        println!("{name}: {value}");
    }
    println!("{}", sink.body_text().unwrap_or_default());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = DataSourceConfig::from_env()
        .unwrap_or_else(|_| DataSourceConfig::new("https://api.example.com"));

    let http = RecordingTransport::new();
    http.push_response(r#"{"id": 41, "name": "Buy milk"}"#);
    http.push_response(r#"[{"id": 40, "name": "Walk dog"}, {"id": 41, "name": "Buy milk"}]"#);
    http.push_response("");
    let tasks = RemoteApiDataSource::new(config, http);

    let mut add_request = json_request("add", HttpMethod::Post);
    add_request.add_form_param("Task", json!({"name": "Buy milk"}));
    dispatch(&tasks, add_request, add)?;

    let mut index_request = json_request("index", HttpMethod::Get);
    index_request.add_query_param("page", 1);
    index_request.set_paging(
        "Task",
        PagingInfo {
            page: 1,
            current: 2,
            count: 2,
            next_page: 0,
            prev_page: 0,
            page_count: 1,
        },
    );
    dispatch(&tasks, index_request, index)?;

    let mut delete_request = json_request("delete", HttpMethod::Delete);
    delete_request.add_named_param("id", 40);
    dispatch(&tasks, delete_request, delete)?;

    // A read action reached with the wrong verb
    dispatch(&tasks, json_request("view", HttpMethod::Post), |_, ctx| {
        ctx.response.set_method_success(true, None);
        Ok(())
    })?;

    println!("\n=== Remote calls ===");
    for request in tasks.transport().requests() {
        println!("{} {}", request.method, request.url);
    }
    Ok(())
}
