use crate::server::GatewayTestServer;
use mailroom::daemon::{HealthProbe, HttpHealthProbe, LivenessKeeper, ProbePhase, ProbeSchedule};
use mailroom::llm::{CompletionClient, GeminiClient};
use std::sync::Arc;
use std::time::Duration;

const SCHEDULE: ProbeSchedule = ProbeSchedule {
    startup_delay: Duration::from_secs(10),
    interval: Duration::from_secs(600),
    retry_delay: Duration::from_secs(60),
};

fn probe_for(base_url: &str) -> Arc<dyn HealthProbe> {
    Arc::new(
        HttpHealthProbe::new(base_url, Duration::from_secs(2))
            .expect("probe should accept the gateway URL"),
    )
}

#[tokio::test]
async fn keeper_probes_the_running_gateway() {
    let client: Arc<dyn CompletionClient> =
        Arc::new(GeminiClient::new("unused", "gemini-2.5-flash"));
    let server = GatewayTestServer::start(client).await;

    let mut keeper = LivenessKeeper::new(Some(probe_for(&server.base_url())), SCHEDULE);
    assert_eq!(keeper.tick().await, SCHEDULE.interval);

    let state = keeper.state();
    assert_eq!(state.consecutive_failures, 0);
    assert_eq!(state.phase, ProbePhase::Waiting(SCHEDULE.interval));
}

#[tokio::test]
async fn keeper_backs_off_when_gateway_is_down() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("port should bind");
    let port = listener
        .local_addr()
        .expect("listener should expose local address")
        .port();
    drop(listener);

    let probe = probe_for(&format!("http://127.0.0.1:{port}"));
    let mut keeper = LivenessKeeper::new(Some(probe), SCHEDULE);
    assert_eq!(keeper.tick().await, SCHEDULE.retry_delay);
    assert_eq!(keeper.tick().await, SCHEDULE.retry_delay);
    assert_eq!(keeper.state().consecutive_failures, 2);
}
