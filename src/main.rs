use snake::Config;

fn main() -> miette::Result<()> {
    // Show logs filtered by `RUST_LOG`
    env_logger::init();

    snake::run(Config::default())
}
