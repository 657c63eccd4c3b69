use anyhow::anyhow;
use sysinfo::{ProcessesToUpdate, System};

use crate::bot::handler::events::HandlerResult;
use crate::bot::handler::framework::Context;
use crate::utils::misc;

/// Resident memory of this process, in bytes.
fn process_memory() -> anyhow::Result<u64> {
    let pid = sysinfo::get_current_pid().map_err(|why| anyhow!(why))?;

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    system
        .process(pid)
        .map(|process| process.memory())
        .ok_or(anyhow!("process {pid} not found"))
}

pub async fn status(ctx: Context<'_>) -> HandlerResult<'_, ()> {
    let data = ctx.data().clone();

    let result: anyhow::Result<()> = async {
        let uptime = misc::uptime_to_string(data.started.elapsed());
        let guilds = ctx.cache().guild_count();
        let memory = match process_memory() {
            Ok(bytes) => misc::bytes_to_string(bytes),
            Err(why) => {
                log::warn!("could not read process memory: {why:?}");
                "unknown".to_string()
            }
        };

        ctx.say(format!(
            "🟢 FRIDAY status\n⏱️ Uptime: {uptime}\n🛰️ Servers: {guilds}\n🧠 Memory: {memory}"
        ))
        .await?;

        Ok(())
    }
    .await;

    match result {
        Ok(_) => HandlerResult::ok(()),
        Err(why) => HandlerResult::err(why, ctx),
    }
}
