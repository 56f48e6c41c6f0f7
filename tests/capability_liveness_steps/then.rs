//! Then steps for capability liveness BDD scenarios.

use super::world::{LivenessWorld, capability_id, run_async};
use capability_directory::directory::domain::StalenessQuery;
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(r#"provider "{id}" is active"#)]
fn provider_is_active(world: &LivenessWorld, id: String) -> Result<(), eyre::Report> {
    let record = run_async(world.directory.get_states(&capability_id(&id)?))
        .wrap_err("read activity")?
        .ok_or_else(|| eyre::eyre!("no activity record for '{id}'"))?;
    if !record.is_active() {
        return Err(eyre::eyre!("expected '{id}' to be active"));
    }
    Ok(())
}

#[then(r#"the tool host for "{service}" is "{id}""#)]
fn tool_host_is(world: &LivenessWorld, service: String, id: String) -> Result<(), eyre::Report> {
    let host = run_async(world.directory.resolve_tool_host(&service))
        .wrap_err("resolve tool host")?
        .ok_or_else(|| eyre::eyre!("no host for '{service}'"))?;
    if host.id().as_str() != id {
        return Err(eyre::eyre!("expected host '{id}', found '{}'", host.id()));
    }
    Ok(())
}

#[then(r#"the stale inactive providers older than {seconds:i64} seconds are "{ids}""#)]
fn stale_inactive_providers_are(
    world: &LivenessWorld,
    seconds: i64,
    ids: String,
) -> Result<(), eyre::Report> {
    let query = StalenessQuery::new(seconds, true).wrap_err("build staleness query")?;
    let stale = run_async(world.directory.find_stale_capabilities(query))
        .wrap_err("find stale capabilities")?;
    let found: Vec<&str> = stale.iter().map(|entry| entry.target.id().as_str()).collect();
    let expected: Vec<&str> = ids.split(',').map(str::trim).collect();
    if found != expected {
        return Err(eyre::eyre!("expected stale {expected:?}, found {found:?}"));
    }
    Ok(())
}

#[then("cleanup of providers older than {seconds:i64} seconds removes {count:usize} provider")]
fn cleanup_removes(world: &LivenessWorld, seconds: i64, count: usize) -> Result<(), eyre::Report> {
    let query = StalenessQuery::new(seconds, false).wrap_err("build staleness query")?;
    let removed = run_async(world.directory.cleanup_stale(query)).wrap_err("cleanup")?;
    if removed != count {
        return Err(eyre::eyre!("expected {count} removals, got {removed}"));
    }
    Ok(())
}

#[then("the directory lists {count:usize} provider")]
fn directory_lists(world: &LivenessWorld, count: usize) -> Result<(), eyre::Report> {
    let all = run_async(world.directory.list_all()).wrap_err("list")?;
    if all.len() != count {
        return Err(eyre::eyre!("expected {count} providers, found {}", all.len()));
    }
    Ok(())
}

#[then("the last ping was ignored")]
fn last_ping_ignored(world: &LivenessWorld) -> Result<(), eyre::Report> {
    match world.last_ping {
        Some(false) => Ok(()),
        other => Err(eyre::eyre!("expected an ignored ping, got {other:?}")),
    }
}

#[then("the directory has counted {count:u64} missed ping")]
fn missed_pings_counted(world: &LivenessWorld, count: u64) -> Result<(), eyre::Report> {
    let missed = world.directory.missed_ping_count();
    if missed != count {
        return Err(eyre::eyre!("expected {count} missed pings, found {missed}"));
    }
    Ok(())
}

#[then(r#"provider "{id}" keeps at most {max:usize} states"#)]
fn history_bounded(world: &LivenessWorld, id: String, max: usize) -> Result<(), eyre::Report> {
    let record = run_async(world.directory.get_states(&capability_id(&id)?))
        .wrap_err("read activity")?
        .ok_or_else(|| eyre::eyre!("no activity record for '{id}'"))?;
    if record.states().len() > max {
        return Err(eyre::eyre!(
            "expected at most {max} states, found {}",
            record.states().len()
        ));
    }
    Ok(())
}
