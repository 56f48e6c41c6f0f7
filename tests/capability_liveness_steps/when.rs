//! When steps for capability liveness BDD scenarios.

use super::world::{LivenessWorld, capability_id, run_async};
use capability_directory::directory::domain::ServiceState;
use eyre::WrapErr;
use mockable::Clock;
use rstest_bdd_macros::when;

#[when(r#"provider "{id}" pings"#)]
fn provider_pings(world: &mut LivenessWorld, id: String) -> Result<(), eyre::Report> {
    let accepted = run_async(world.directory.ping(&capability_id(&id)?)).wrap_err("ping")?;
    world.last_ping = Some(accepted);
    Ok(())
}

#[when(r#"provider "{id}" deregisters and registers again"#)]
fn provider_restarts(world: &mut LivenessWorld, id: String) -> Result<(), eyre::Report> {
    let capability = capability_id(&id)?;
    let target = run_async(world.directory.find_by_id(&capability))
        .wrap_err("look up target")?
        .ok_or_else(|| eyre::eyre!("provider '{id}' is not registered"))?;
    run_async(world.directory.ping(&capability)).wrap_err("ping before deregistering")?;
    run_async(world.directory.deregister(&target)).wrap_err("deregister")?;
    run_async(world.directory.register(target)).wrap_err("register again")?;
    Ok(())
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut LivenessWorld, seconds: i64) {
    world.clock.advance(seconds);
}

#[when(r#"provider "{id}" reports {count:usize} healthy states"#)]
fn provider_reports_states(
    world: &mut LivenessWorld,
    id: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let capability = capability_id(&id)?;
    for _ in 0..count {
        world.clock.advance(1);
        let state = ServiceState::healthy(world.clock.utc());
        let updated = run_async(world.directory.update_last_state(&capability, state))
            .wrap_err("update state")?;
        if !updated {
            return Err(eyre::eyre!("state update for '{id}' was ignored"));
        }
    }
    Ok(())
}
