use async_trait::async_trait;
use subpub::event::Event;
use subpub::handler::{EventHandler, Handler};
use subpub_macros::{event, handler};

#[event]
struct Ping {
    n: u32,
}

#[handler]
struct PingHandler;

#[handler(name = "ping.audit")]
struct AuditHandler;

#[async_trait]
impl EventHandler<Ping> for PingHandler {
    async fn run(&self, event: Ping) -> anyhow::Result<()> {
        anyhow::ensure!(event.n > 0, "n must be positive");
        Ok(())
    }
}

#[async_trait]
impl EventHandler<Ping> for AuditHandler {
    async fn run(&self, _event: Ping) -> anyhow::Result<()> {
        Ok(())
    }
}

fn main() {
    assert!(Ping::NAME.ends_with("::Ping"));
    assert!(PingHandler::NAME.ends_with("::PingHandler"));
    assert_eq!(AuditHandler::NAME, "ping.audit");
}
