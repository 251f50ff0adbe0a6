//! Walks the seeded fixture through a handful of requests and prints what
//! each role is allowed to see.

use anyhow::Context;
use serde_json::json;

use orgguard_app::{AccessError, RequestContext, Services};
use orgguard_auth::{IdentityClaim, Role, RolePermissionMap};
use orgguard_directory::{NewTask, TaskCategory};
use orgguard_infra::{AppConfig, InMemoryStores, seed_fixture};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    orgguard_observability::init(&config.log);

    let stores = InMemoryStores::new();
    if !config.seed.enabled {
        tracing::warn!("seeding disabled; nothing to demonstrate");
        return Ok(());
    }
    let fixture = seed_fixture(&stores).context("seeding fixture")?;
    let services = Services::in_memory(&stores, &config);

    let owner = RequestContext::authenticated(IdentityClaim::new(
        fixture.owner,
        Role::Owner,
        fixture.tech_corp,
    ));
    let admin = RequestContext::authenticated(IdentityClaim::new(
        fixture.admin,
        Role::Admin,
        fixture.engineering,
    ));
    let viewer = RequestContext::authenticated(IdentityClaim::new(
        fixture.viewer,
        Role::Viewer,
        fixture.sales,
    ));

    print_json("roles", &json!(RolePermissionMap::standard().describe()))?;

    for (label, ctx) in [("owner", &owner), ("admin", &admin), ("viewer", &viewer)] {
        let tasks = services.tasks.list(ctx)?.into_value();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        print_json(&format!("{label} sees tasks"), &json!(titles))?;
    }

    let created = services
        .tasks
        .create(&admin, NewTask::new("Write onboarding guide", TaskCategory::Work))?
        .into_value();
    print_json("admin created", &json!(created))?;

    let denied = services
        .tasks
        .create(&viewer, NewTask::new("Not allowed", TaskCategory::Other));
    print_outcome("viewer create", denied.map(|c| c.into_value().id))?;

    let cross_org = services.tasks.get(&admin, fixture.sales_task);
    print_outcome("admin reads sales task", cross_org.map(|c| c.into_value().id))?;

    let anonymous = services.tasks.list(&RequestContext::anonymous());
    print_outcome("anonymous list", anonymous.map(|c| c.into_value().len()))?;

    let summary = services.organizations.get(&owner, fixture.engineering)?.into_value();
    print_json("engineering summary", &json!(summary))?;

    let trail = services.audit_log.recent(&owner)?.into_value();
    print_json("audit trail (owner)", &json!(trail))?;

    let viewer_permissions = services.pipeline().registry().permissions_of(Role::Viewer);
    print_json("viewer permissions", &json!(viewer_permissions))?;

    Ok(())
}

fn print_json(label: &str, value: &serde_json::Value) -> anyhow::Result<()> {
    println!("== {label}\n{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome<T: serde::Serialize>(label: &str, result: Result<T, AccessError>) -> anyhow::Result<()> {
    let value = match result {
        Ok(value) => json!({ "ok": value }),
        Err(e) => json!({ "status": e.kind().http_status(), "error": e.to_string() }),
    };
    print_json(label, &value)
}
