use rigging::Registry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The stock binary ships no units of its own; providers come from tools
    // that embed the library and call `cli::run` with a populated registry.
    rigging::cli::run(Registry::new("rigging")).await
}
