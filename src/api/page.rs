use askama::Template;

use crate::container::ContainerState;
use crate::metrics::ContainerSnapshot;

/// The dashboard page. `host` is used to build links to published ports.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage<'a> {
    title: &'a str,
    host: &'a str,
    rows: Vec<Row<'a>>,
}

struct Row<'a> {
    name: &'a str,
    id: &'a str,
    status: &'a str,
    state: ContainerState,
    running: bool,
    cpu_percent: String,
    memory_usage_mb: u64,
    published_port: Option<u16>,
}

impl<'a> IndexPage<'a> {
    pub fn new(title: &'a str, snapshots: &'a [ContainerSnapshot], host: &'a str) -> Self {
        Self {
            title,
            host,
            rows: snapshots.iter().map(Row::new).collect(),
        }
    }
}

impl<'a> Row<'a> {
    fn new(snapshot: &'a ContainerSnapshot) -> Self {
        Self {
            name: snapshot.name().trim_start_matches('/'),
            id: snapshot.id().as_str(),
            status: snapshot.status_text(),
            state: snapshot.state(),
            running: snapshot.state().is_running(),
            cpu_percent: format!("{:.2}", snapshot.cpu_percent()),
            memory_usage_mb: snapshot.memory_usage_mb(),
            published_port: snapshot.published_port(),
        }
    }
}
