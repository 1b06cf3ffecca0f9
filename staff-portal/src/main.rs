use anyhow::Context;
use clap::Parser;
use staff_portal::console::{Console, Terminal};
use staff_portal::{App, Config, RedbKv, print_banner, setup_environment};
use std::io;

/// Personnel and item-request management console
#[derive(Debug, Parser)]
#[command(name = "staff-portal", version, about)]
struct Args {
    /// Directory holding the database and logs
    #[arg(long, env = "WORK_DIR")]
    work_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Require the Admin role on admin pages
    #[arg(long)]
    strict_admin_routes: bool,

    /// Route to open after start-up, e.g. `#/login`
    #[arg(default_value = "")]
    route: String,
}

fn main() -> anyhow::Result<()> {
    // 1. .env before anything reads the environment
    dotenv::dotenv().ok();
    let args = Args::parse();

    // 2. Configuration: environment, then flags
    let mut config = match args.work_dir {
        Some(dir) => Config::with_overrides(dir),
        None => Config::from_env(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    config.strict_admin_routes |= args.strict_admin_routes;

    setup_environment(&config).context("failed to prepare working directory")?;
    print_banner();

    // 3. Storage and controller
    let db_path = config.db_path();
    let local = RedbKv::open(&db_path)
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let mut app = App::start(config, Box::new(local)).context("failed to start portal")?;
    if !args.route.is_empty() {
        app.navigate(&args.route).context("failed to open start route")?;
    }

    // 4. Console loop
    println!("Type `help` for commands.");
    let stdin = io::stdin();
    let mut console = Console::new(app, Terminal::new(stdin.lock(), io::stdout()));
    console.run()
}
