use padlock::env::ActionSpace;
use padlock::{Env, PADLOCK_V0, RandomPolicy, RolloutConfig, make, run_episodes};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("🔒 Starting padlock random agent example");

    // One hand-driven episode through the registry
    let mut env = make(PADLOCK_V0, Some(0))?;
    let (obs, _) = env.reset(None, None)?;
    println!("📤 Initial observation: {:?}", obs.to_rows());

    let (obs, reward, terminated, truncated, _) = env.step((0, 0).into())?;
    println!(
        "Step (0, 0): obs={:?} reward={} terminated={} truncated={}",
        obs.to_rows(),
        reward,
        terminated,
        truncated
    );

    if let Err(e) = env.render() {
        println!("render: {}", e);
    }

    // Batch of random-policy episodes
    println!("\n🔄 Running random episodes...");
    let stats = run_episodes(
        || padlock::PadlockEnv::new(None),
        |seed| RandomPolicy::new(ActionSpace::new(4, 4), Some(seed)),
        (0..8).collect(),
        RolloutConfig::default(),
    )
    .await?;

    for episode in &stats {
        println!(
            "Seed {:?}: {} steps, reward {}, solved={}",
            episode.seed, episode.steps, episode.total_reward, episode.terminated
        );
    }

    let solved = stats.iter().filter(|s| s.terminated).count();
    println!("✅ Solved {}/{} locks", solved, stats.len());

    Ok(())
}
