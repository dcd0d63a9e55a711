use flowgen::{Config, GeneratorBuilder};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let generator = GeneratorBuilder::new().config(Config::from_env()).build();

    let prompt = std::env::args().nth(1).unwrap_or_else(|| "summarize top 5 news from https://news.ycombinator.com".to_string());

    let graph = generator.generate(&prompt).await;

    println!("{}", serde_json::to_string_pretty(&graph).unwrap());
}
